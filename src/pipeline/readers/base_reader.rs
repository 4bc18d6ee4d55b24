use crate::data_model::Table;
use crate::error::Result;

pub trait BaseReader {
    /// Parses a whole document into a table.
    fn read_table(&self, bytes: &[u8]) -> Result<Table>;
}
