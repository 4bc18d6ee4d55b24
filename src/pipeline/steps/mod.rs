// src/pipeline/steps/mod.rs

mod case;
mod characters;
mod markup;
mod numeric;
mod spelling;
mod structure;
mod vowel;
mod whitespace;

pub use case::{CaseConversion, CaseMode, TitleCase};
pub use characters::{
    RemoveAlphaChars, RemoveChars, RemoveNonAlphanumeric, RemoveNumericChars, RemovePunctuation,
    ReplaceChars,
};
pub use markup::{RemoveHtml, RemoveUrls};
pub use numeric::{RemoveNegative, RemoveOutOfRange, SortColumn, SortDirection};
pub use spelling::CheckSpelling;
pub use structure::{RemoveDuplicateColumns, RemoveDuplicateRows, RemoveEmptyColumns, RemoveEmptyRows};
pub use vowel::ShortenVowel;
pub use whitespace::{RemoveNulls, RemoveSpaces};

use crate::data_model::{CellValue, ColumnType, Table};
use crate::error::{PipelineError, Result};

/// Rewrites every text cell of `column`. Missing cells stay missing; numeric
/// cells of a mixed column are left alone. Purely numeric columns are
/// rejected since string operations are undefined on them.
pub(crate) fn map_text_cells(
    table: &mut Table,
    column: &str,
    operation: &'static str,
    f: impl Fn(&str) -> String,
) -> Result<()> {
    let found = table.column_type(column)?;
    if matches!(found, ColumnType::Integer | ColumnType::Float) {
        return Err(PipelineError::TypeMismatch {
            operation,
            column: column.to_string(),
            expected: "text",
            found,
        });
    }
    for cell in table.column_values_mut(column)? {
        if let CellValue::Text(s) = cell {
            *s = f(s);
        }
    }
    Ok(())
}

/// Fails unless `column` holds only numbers (or nothing).
pub(crate) fn require_numeric(table: &Table, column: &str, operation: &'static str) -> Result<()> {
    let found = table.column_type(column)?;
    if found.is_numeric() {
        Ok(())
    } else {
        Err(PipelineError::TypeMismatch {
            operation,
            column: column.to_string(),
            expected: "numeric",
            found,
        })
    }
}
