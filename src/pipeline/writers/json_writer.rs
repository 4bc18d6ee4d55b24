use std::collections::HashSet;
use std::io::Write;

use serde_json::{Map, Value};

use crate::data_model::{CellValue, Table};
use crate::error::Result;
use crate::pipeline::writers::BaseWriter;

/// Column-oriented JSON: `{column: {"0": value, "1": value, ...}}`.
///
/// Column order is kept. A repeated column name is suffixed `.1`, `.2`, ...
/// so every column gets its own key.
pub fn table_to_json(table: &Table) -> Value {
    let mut out = Map::with_capacity(table.n_columns());
    let mut used: HashSet<String> = HashSet::with_capacity(table.n_columns());
    for column in table.columns() {
        let key = unique_key(&column.name, &used);
        used.insert(key.clone());
        let cells: Map<String, Value> = column
            .values
            .iter()
            .enumerate()
            .map(|(i, cell)| (i.to_string(), cell_to_json(cell)))
            .collect();
        out.insert(key, Value::Object(cells));
    }
    Value::Object(out)
}

fn unique_key(name: &str, used: &HashSet<String>) -> String {
    if !used.contains(name) {
        return name.to_string();
    }
    (1..)
        .map(|n| format!("{}.{}", name, n))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Missing => Value::Null,
        CellValue::Integer(i) => Value::from(*i),
        // Non-finite floats have no JSON form
        CellValue::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
        CellValue::Text(s) => Value::String(s.clone()),
    }
}

pub struct JsonTableWriter<W: Write> {
    sink: W,
    pretty: bool,
}

impl<W: Write> JsonTableWriter<W> {
    pub fn new(sink: W, pretty: bool) -> Self {
        JsonTableWriter { sink, pretty }
    }
}

impl<W: Write> BaseWriter for JsonTableWriter<W> {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        let value = table_to_json(table);
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.sink, &value)?;
        } else {
            serde_json::to_writer(&mut self.sink, &value)?;
        }
        self.sink.write_all(b"\n")?;
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }
}
