use crate::data_model::Table;
use crate::error::Result;

/// Trait for writing a cleaned table to an output sink (e.g. file, response body).
pub trait BaseWriter {
    fn write_table(&mut self, table: &Table) -> Result<()>;

    /// Flush and close the output writer.
    fn close(self) -> Result<()>;
}
