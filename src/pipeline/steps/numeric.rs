use std::cmp::Ordering;

use crate::data_model::{CellValue, Table};
use crate::error::{PipelineError, Result};
use crate::executor::CleaningStep;
use crate::pipeline::steps::require_numeric;

/// Turns every value below zero into a missing cell.
pub struct RemoveNegative;

impl CleaningStep for RemoveNegative {
    fn name(&self) -> &'static str {
        "remove_negative"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        require_numeric(&table, column, self.name())?;
        for cell in table.column_values_mut(column)? {
            if cell.as_f64().is_some_and(|v| v < 0.0) {
                *cell = CellValue::Missing;
            }
        }
        Ok(table)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Reorders whole rows by the values of one numeric column.
///
/// The sort is stable and missing values go last in both directions.
pub struct SortColumn {
    direction: SortDirection,
}

impl SortColumn {
    pub fn new(direction: SortDirection) -> Self {
        SortColumn { direction }
    }
}

impl CleaningStep for SortColumn {
    fn name(&self) -> &'static str {
        match self.direction {
            SortDirection::Ascending => "sort_ascending",
            SortDirection::Descending => "sort_descending",
        }
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        require_numeric(&table, column, self.name())?;
        let keys: Vec<Option<f64>> = match table.column(column) {
            Some(c) => c.values.iter().map(CellValue::as_f64).collect(),
            None => {
                return Err(PipelineError::ColumnNotFound {
                    column: column.to_string(),
                })
            }
        };

        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| match (keys[a], keys[b]) {
            (Some(x), Some(y)) => match self.direction {
                SortDirection::Ascending => x.total_cmp(&y),
                SortDirection::Descending => y.total_cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        table.reorder_rows(&order)?;
        Ok(table)
    }
}

/// Turns values outside the inclusive `[min, max]` range into missing cells.
pub struct RemoveOutOfRange {
    min: f64,
    max: f64,
}

impl RemoveOutOfRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min > max {
            return Err(PipelineError::InvalidParameter {
                operation: "remove_out_of_range",
                message: format!("min_value {} is greater than max_value {}", min, max),
            });
        }
        Ok(RemoveOutOfRange { min, max })
    }
}

impl CleaningStep for RemoveOutOfRange {
    fn name(&self) -> &'static str {
        "remove_out_of_range"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        require_numeric(&table, column, self.name())?;
        for cell in table.column_values_mut(column)? {
            if let Some(v) = cell.as_f64() {
                if v < self.min || v > self.max {
                    *cell = CellValue::Missing;
                }
            }
        }
        Ok(table)
    }
}
