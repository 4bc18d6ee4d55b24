use std::io::Write;

use csv::WriterBuilder;

use crate::data_model::Table;
use crate::error::Result;
use crate::pipeline::writers::BaseWriter;

/// Writes a table back out as CSV. Missing cells become empty fields.
pub struct CsvTableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvTableWriter<W> {
    pub fn new(sink: W, delimiter: u8) -> Self {
        let writer = WriterBuilder::new().delimiter(delimiter).from_writer(sink);
        CsvTableWriter { writer }
    }
}

impl<W: Write> BaseWriter for CsvTableWriter<W> {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        if table.n_columns() == 0 {
            return Ok(());
        }
        self.writer.write_record(table.column_names())?;
        for i in 0..table.n_rows() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|c| c.values[i].to_string())
                .collect();
            self.writer.write_record(&record)?;
        }
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
