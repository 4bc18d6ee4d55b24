//! Whole-table operations. These ignore the selected column.

use std::collections::HashSet;

use tracing::debug;

use crate::data_model::{CellKey, CellValue, Table};
use crate::error::Result;
use crate::executor::{CleaningStep, StepScope};

/// Drops every row equal to an earlier one, keeping the first occurrence.
pub struct RemoveDuplicateRows;

impl CleaningStep for RemoveDuplicateRows {
    fn name(&self) -> &'static str {
        "remove_duplicate_rows"
    }

    fn scope(&self) -> StepScope {
        StepScope::Table
    }

    fn apply(&self, mut table: Table, _column: &str) -> Result<Table> {
        let keep: Vec<bool> = {
            let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(table.n_rows());
            (0..table.n_rows())
                .map(|i| {
                    let key: Vec<CellKey<'_>> =
                        table.columns().iter().map(|c| c.values[i].key()).collect();
                    seen.insert(key)
                })
                .collect()
        };
        let dropped = keep.iter().filter(|k| !**k).count();
        debug!(dropped, "Removing duplicate rows");
        table.retain_rows(&keep)?;
        Ok(table)
    }
}

/// Drops every column whose name was already seen, keeping the first.
pub struct RemoveDuplicateColumns;

impl CleaningStep for RemoveDuplicateColumns {
    fn name(&self) -> &'static str {
        "remove_duplicate_columns"
    }

    fn scope(&self) -> StepScope {
        StepScope::Table
    }

    fn apply(&self, mut table: Table, _column: &str) -> Result<Table> {
        let keep: Vec<bool> = {
            let mut seen = HashSet::new();
            table.column_names().into_iter().map(|n| seen.insert(n)).collect()
        };
        table.retain_columns(&keep)?;
        Ok(table)
    }
}

/// Drops rows in which every cell is missing.
pub struct RemoveEmptyRows;

impl CleaningStep for RemoveEmptyRows {
    fn name(&self) -> &'static str {
        "remove_empty_rows"
    }

    fn scope(&self) -> StepScope {
        StepScope::Table
    }

    fn apply(&self, mut table: Table, _column: &str) -> Result<Table> {
        let keep: Vec<bool> = (0..table.n_rows())
            .map(|i| table.columns().iter().any(|c| !c.values[i].is_missing()))
            .collect();
        table.retain_rows(&keep)?;
        Ok(table)
    }
}

/// Drops columns in which every cell is missing.
pub struct RemoveEmptyColumns;

impl CleaningStep for RemoveEmptyColumns {
    fn name(&self) -> &'static str {
        "remove_empty_columns"
    }

    fn scope(&self) -> StepScope {
        StepScope::Table
    }

    fn apply(&self, mut table: Table, _column: &str) -> Result<Table> {
        let keep: Vec<bool> = table
            .columns()
            .iter()
            .map(|c| !c.values.iter().all(CellValue::is_missing))
            .collect();
        table.retain_columns(&keep)?;
        Ok(table)
    }
}
