// src/pipeline/readers/csv_reader.rs

use std::collections::HashSet;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::config::CsvLoaderConfig;
use crate::data_model::{CellValue, Column, Table};
use crate::error::{PipelineError, Result};
use crate::pipeline::readers::BaseReader;

/// Reads CSV documents into a [`Table`].
///
/// The first record is the header. Fields listed in `na_values` become
/// missing cells. With type inference on, a column whose present fields all
/// parse as integers becomes an integer column, else one whose fields all
/// parse as numbers becomes a float column, else it stays text.
#[derive(Debug, Clone, Default)]
pub struct CsvTableReader {
    config: CsvLoaderConfig,
}

impl CsvTableReader {
    pub fn new(config: CsvLoaderConfig) -> Self {
        CsvTableReader { config }
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter_byte())
            .has_headers(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, h)| {
                if h.trim().is_empty() {
                    format!("Unnamed: {}", idx)
                } else {
                    h.to_string()
                }
            })
            .collect();

        let na: HashSet<&str> = self.config.na_values.iter().map(String::as_str).collect();
        let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            for (idx, field) in record.iter().enumerate() {
                let cell = if na.contains(field) {
                    None
                } else {
                    Some(field.to_string())
                };
                raw[idx].push(cell);
            }
        }

        let columns = headers
            .into_iter()
            .zip(raw)
            .map(|(name, fields)| Column::new(name, self.convert(fields)))
            .collect();
        let table = Table::from_columns(columns)?;
        debug!(rows = table.n_rows(), columns = table.n_columns(), "Parsed CSV input");
        Ok(table)
    }

    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| {
            PipelineError::ParseError(format!(
                "Failed to read input file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        self.read_bytes(&bytes)
    }

    fn convert(&self, fields: Vec<Option<String>>) -> Vec<CellValue> {
        let present = || fields.iter().flatten().map(|f| f.trim());
        let any_present = present().next().is_some();

        if self.config.infer_types && any_present {
            if present().all(|f| f.parse::<i64>().is_ok()) {
                return fields
                    .iter()
                    .map(|f| match f.as_deref().map(|s| s.trim().parse::<i64>()) {
                        Some(Ok(v)) => CellValue::Integer(v),
                        _ => CellValue::Missing,
                    })
                    .collect();
            }
            if present().all(|f| f.parse::<f64>().is_ok()) {
                return fields
                    .iter()
                    .map(|f| match f.as_deref().map(|s| s.trim().parse::<f64>()) {
                        Some(Ok(v)) => CellValue::Float(v),
                        _ => CellValue::Missing,
                    })
                    .collect();
            }
        }

        fields
            .into_iter()
            .map(|f| f.map_or(CellValue::Missing, CellValue::Text))
            .collect()
    }
}

impl BaseReader for CsvTableReader {
    fn read_table(&self, bytes: &[u8]) -> Result<Table> {
        self.read_bytes(bytes)
    }
}
