pub mod base_writer;
pub mod csv_writer;
pub mod json_writer;

pub use base_writer::BaseWriter;
pub use csv_writer::CsvTableWriter;
pub use json_writer::{table_to_json, JsonTableWriter};
