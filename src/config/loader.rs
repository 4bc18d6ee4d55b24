use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Spellings read as missing cells, the conventional NA set.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// How uploaded CSV bytes become a table.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CsvLoaderConfig {
    pub delimiter: char,
    /// Field values (compared exactly, before any trimming) read as missing.
    pub na_values: Vec<String>,
    /// When false every non-missing field is kept as text.
    pub infer_types: bool,
}

impl Default for CsvLoaderConfig {
    fn default() -> Self {
        CsvLoaderConfig {
            delimiter: ',',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            infer_types: true,
        }
    }
}

impl CsvLoaderConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() || self.delimiter == '"' || self.delimiter == '\n' {
            return Err(PipelineError::ConfigValidationError(format!(
                "CsvLoaderConfig: delimiter must be a single ASCII character other than quote or newline, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }

    pub(crate) fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII; fall back to comma for unvalidated configs
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}
