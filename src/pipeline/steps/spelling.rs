use crate::data_model::Table;
use crate::error::Result;
use crate::executor::CleaningStep;
use crate::pipeline::steps::map_text_cells;
use crate::utils::spelling::SpellChecker;

/// Corrects each whitespace-separated token; owns its own checker.
pub struct CheckSpelling {
    checker: SpellChecker,
}

impl CheckSpelling {
    pub fn new(checker: SpellChecker) -> Self {
        CheckSpelling { checker }
    }
}

impl CleaningStep for CheckSpelling {
    fn name(&self) -> &'static str {
        "check_spelling"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        map_text_cells(&mut table, column, self.name(), |s| self.checker.correct_text(s))?;
        Ok(table)
    }
}
