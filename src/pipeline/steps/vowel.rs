use tracing::debug;

use crate::data_model::Table;
use crate::error::Result;
use crate::executor::CleaningStep;
use crate::pipeline::steps::map_text_cells;
use crate::utils::text::short_vowel_for;

/// Replaces one Hindi long-vowel sign with its short form.
pub struct ShortenVowel {
    letter: String,
    replacement: Option<&'static str>,
}

impl ShortenVowel {
    pub fn new(letter: impl Into<String>) -> Self {
        let letter = letter.into();
        let replacement = short_vowel_for(&letter);
        ShortenVowel {
            letter,
            replacement,
        }
    }
}

impl CleaningStep for ShortenVowel {
    fn name(&self) -> &'static str {
        "shorten_vowel"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        let replacement = match self.replacement {
            Some(r) => r,
            None => {
                debug!(letter = %self.letter, "Letter has no short form, leaving column unchanged");
                return Ok(table);
            }
        };
        map_text_cells(&mut table, column, self.name(), |s| {
            s.replace(self.letter.as_str(), replacement)
        })?;
        Ok(table)
    }
}
