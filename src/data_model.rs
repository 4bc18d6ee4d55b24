use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PipelineError, Result};

/// A single cell. `Missing` is distinct from an empty `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the cell; `None` for text and missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Hashable identity used for duplicate detection.
    pub(crate) fn key(&self) -> CellKey<'_> {
        match self {
            CellValue::Missing => CellKey::Missing,
            CellValue::Integer(i) => CellKey::Integer(*i),
            // -0.0 and 0.0 must collapse to the same key
            CellValue::Float(f) if *f == 0.0 => CellKey::Float(0f64.to_bits()),
            CellValue::Float(f) => CellKey::Float(f.to_bits()),
            CellValue::Text(s) => CellKey::Text(s),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{:.1}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum CellKey<'a> {
    Missing,
    Integer(i64),
    Float(u64),
    Text(&'a str),
}

/// The type of a column, inferred from its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// No cells, or every cell missing.
    Empty,
    Integer,
    Float,
    Text,
    /// Text and numbers side by side.
    Mixed,
}

impl ColumnType {
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut current = ColumnType::Empty;
        for cell in cells {
            let cell_type = match cell {
                CellValue::Missing => continue,
                CellValue::Integer(_) => ColumnType::Integer,
                CellValue::Float(_) => ColumnType::Float,
                CellValue::Text(_) => ColumnType::Text,
            };
            current = match (current, cell_type) {
                (ColumnType::Empty, t) => t,
                (a, b) if a == b => a,
                (ColumnType::Integer, ColumnType::Float) | (ColumnType::Float, ColumnType::Integer) => {
                    ColumnType::Float
                }
                _ => return ColumnType::Mixed,
            };
        }
        current
    }

    /// All-missing columns count as numeric so numeric operations are no-ops on them.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Empty | ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Empty => "empty",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    pub fn column_type(&self) -> ColumnType {
        ColumnType::infer(&self.values)
    }

    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(CellValue::is_missing)
    }
}

/// Ordered named columns of equal length.
///
/// Fields are private: every mutation goes through methods that keep all
/// columns the same length. Rows have no identity beyond their position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != expected) {
                return Err(PipelineError::InvalidTable(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name,
                    bad.values.len(),
                    expected
                )));
            }
        }
        Ok(Table { columns })
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Mutable access to a column's cells. Length cannot change through this.
    pub fn column_values_mut(&mut self, name: &str) -> Result<&mut [CellValue]> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| c.values.as_mut_slice())
            .ok_or_else(|| PipelineError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    pub fn column_type(&self, name: &str) -> Result<ColumnType> {
        self.column(name)
            .map(Column::column_type)
            .ok_or_else(|| PipelineError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.n_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Keeps the rows whose flag is `true`. `keep` must have one entry per row.
    pub fn retain_rows(&mut self, keep: &[bool]) -> Result<()> {
        if keep.len() != self.n_rows() {
            return Err(PipelineError::InvalidTable(format!(
                "row mask has {} entries for {} rows",
                keep.len(),
                self.n_rows()
            )));
        }
        for column in &mut self.columns {
            let mut flags = keep.iter();
            column.values.retain(|_| *flags.next().unwrap_or(&false));
        }
        Ok(())
    }

    /// Rearranges rows so that new row `i` is old row `order[i]`.
    pub fn reorder_rows(&mut self, order: &[usize]) -> Result<()> {
        let n_rows = self.n_rows();
        let mut seen = vec![false; n_rows];
        let is_permutation = order.len() == n_rows
            && order
                .iter()
                .all(|&i| i < n_rows && !std::mem::replace(&mut seen[i], true));
        if !is_permutation {
            return Err(PipelineError::InvalidTable(format!(
                "row order is not a permutation of {} rows",
                n_rows
            )));
        }
        for column in &mut self.columns {
            let mut old = std::mem::take(&mut column.values);
            column.values = order
                .iter()
                .map(|&i| std::mem::take(&mut old[i]))
                .collect();
        }
        Ok(())
    }

    /// Keeps the columns whose flag is `true`.
    pub fn retain_columns(&mut self, keep: &[bool]) -> Result<()> {
        if keep.len() != self.columns.len() {
            return Err(PipelineError::InvalidTable(format!(
                "column mask has {} entries for {} columns",
                keep.len(),
                self.columns.len()
            )));
        }
        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&false));
        Ok(())
    }
}
