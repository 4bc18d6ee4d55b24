use crate::data_model::Table;
use crate::error::Result;
use crate::executor::CleaningStep;
use crate::pipeline::steps::map_text_cells;
use crate::utils::text::title_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    Upper,
    Lower,
}

/// Upper- or lower-cases a column. Which one is decided when the pipeline is
/// built; this step never sees both flags.
pub struct CaseConversion {
    mode: CaseMode,
}

impl CaseConversion {
    pub fn new(mode: CaseMode) -> Self {
        CaseConversion { mode }
    }
}

impl CleaningStep for CaseConversion {
    fn name(&self) -> &'static str {
        match self.mode {
            CaseMode::Upper => "uppercase",
            CaseMode::Lower => "lowercase",
        }
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        match self.mode {
            CaseMode::Upper => map_text_cells(&mut table, column, self.name(), str::to_uppercase)?,
            CaseMode::Lower => map_text_cells(&mut table, column, self.name(), str::to_lowercase)?,
        }
        Ok(table)
    }
}

pub struct TitleCase;

impl CleaningStep for TitleCase {
    fn name(&self) -> &'static str {
        "title_case"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        map_text_cells(&mut table, column, self.name(), title_case)?;
        Ok(table)
    }
}
