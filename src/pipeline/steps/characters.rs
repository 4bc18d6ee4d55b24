use crate::data_model::Table;
use crate::error::Result;
use crate::executor::CleaningStep;
use crate::pipeline::steps::map_text_cells;
use crate::utils::text::{strip_chars, PUNCTUATION};

fn literal_targets(targets: Vec<String>) -> Vec<String> {
    // An empty pattern would match between every character
    targets.into_iter().filter(|t| !t.is_empty()).collect()
}

fn replace_targets(text: &str, targets: &[String], replacement: &str) -> String {
    targets
        .iter()
        .fold(text.to_string(), |acc, t| acc.replace(t.as_str(), replacement))
}

/// Replaces every occurrence of each target substring with one replacement.
/// Targets are literal text, applied in list order.
pub struct ReplaceChars {
    targets: Vec<String>,
    replacement: String,
}

impl ReplaceChars {
    pub fn new(targets: Vec<String>, replacement: String) -> Self {
        ReplaceChars {
            targets: literal_targets(targets),
            replacement,
        }
    }
}

impl CleaningStep for ReplaceChars {
    fn name(&self) -> &'static str {
        "replace_chars"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        if self.targets.is_empty() {
            return Ok(table);
        }
        map_text_cells(&mut table, column, self.name(), |s| {
            replace_targets(s, &self.targets, &self.replacement)
        })?;
        Ok(table)
    }
}

/// Deletes every occurrence of each target substring.
pub struct RemoveChars {
    targets: Vec<String>,
}

impl RemoveChars {
    pub fn new(targets: Vec<String>) -> Self {
        RemoveChars {
            targets: literal_targets(targets),
        }
    }
}

impl CleaningStep for RemoveChars {
    fn name(&self) -> &'static str {
        "remove_chars"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        if self.targets.is_empty() {
            return Ok(table);
        }
        map_text_cells(&mut table, column, self.name(), |s| {
            replace_targets(s, &self.targets, "")
        })?;
        Ok(table)
    }
}

pub struct RemovePunctuation;

impl CleaningStep for RemovePunctuation {
    fn name(&self) -> &'static str {
        "remove_punctuation"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        map_text_cells(&mut table, column, self.name(), |s| {
            strip_chars(s, |c| PUNCTUATION.contains(&c))
        })?;
        Ok(table)
    }
}

pub struct RemoveNumericChars;

impl CleaningStep for RemoveNumericChars {
    fn name(&self) -> &'static str {
        "remove_numeric_chars"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        map_text_cells(&mut table, column, self.name(), |s| strip_chars(s, char::is_numeric))?;
        Ok(table)
    }
}

pub struct RemoveAlphaChars;

impl CleaningStep for RemoveAlphaChars {
    fn name(&self) -> &'static str {
        "remove_alpha_chars"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        map_text_cells(&mut table, column, self.name(), |s| strip_chars(s, char::is_alphabetic))?;
        Ok(table)
    }
}

/// Keeps letters and digits only; spaces go too.
pub struct RemoveNonAlphanumeric;

impl CleaningStep for RemoveNonAlphanumeric {
    fn name(&self) -> &'static str {
        "remove_non_alphanumeric"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        map_text_cells(&mut table, column, self.name(), |s| {
            strip_chars(s, |c| !c.is_alphanumeric())
        })?;
        Ok(table)
    }
}
