use crate::data_model::{CellValue, Table};
use crate::error::Result;
use crate::executor::CleaningStep;
use crate::pipeline::steps::map_text_cells;
use crate::utils::text::normalize_whitespace;

/// Collapses repeated whitespace, detaches spaces from a following full stop
/// and trims the ends of every text cell.
pub struct RemoveSpaces;

impl CleaningStep for RemoveSpaces {
    fn name(&self) -> &'static str {
        "remove_spaces"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        map_text_cells(&mut table, column, self.name(), normalize_whitespace)?;
        Ok(table)
    }
}

/// Replaces missing cells with the empty string. Works on any column type.
pub struct RemoveNulls;

impl CleaningStep for RemoveNulls {
    fn name(&self) -> &'static str {
        "remove_nulls"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        for cell in table.column_values_mut(column)? {
            if cell.is_missing() {
                *cell = CellValue::text("");
            }
        }
        Ok(table)
    }
}
