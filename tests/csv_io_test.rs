use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;
use CsvScrubber::config::CsvLoaderConfig;
use CsvScrubber::data_model::{CellValue, ColumnType};
use CsvScrubber::pipeline::readers::{BaseReader, CsvTableReader};
use CsvScrubber::pipeline::writers::{table_to_json, BaseWriter, CsvTableWriter};

const SAMPLE: &str = "id,name,score,notes\n\
1,John   Clinton,10,\n\
2,  Mike  ,-5,NA\n\
3,\"Smith, Anna\",2.5,ok\n";

#[test]
fn test_read_sample_types_and_missing() {
    let table = CsvTableReader::default().read_table(SAMPLE.as_bytes()).unwrap();
    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.column_type("id").unwrap(), ColumnType::Integer);
    assert_eq!(table.column_type("score").unwrap(), ColumnType::Float);
    assert_eq!(table.column_type("name").unwrap(), ColumnType::Text);
    assert_eq!(
        table.column("notes").unwrap().values,
        vec![CellValue::Missing, CellValue::Missing, CellValue::text("ok")]
    );
    assert_eq!(table.column("name").unwrap().values[2], CellValue::text("Smith, Anna"));
}

#[test]
fn test_read_path_and_missing_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "{}", SAMPLE).expect("Failed to write temp file");
    let reader = CsvTableReader::new(CsvLoaderConfig::default());
    assert_eq!(reader.read_path(file.path()).unwrap().n_columns(), 4);
    assert!(reader.read_path("does/not/exist.csv").is_err());
}

#[test]
fn test_empty_document_gives_empty_table() {
    let table = CsvTableReader::default().read_bytes(b"").unwrap();
    assert_eq!(table.n_columns(), 0);
    assert_eq!(table.n_rows(), 0);
}

#[test]
fn test_header_only_document() {
    let table = CsvTableReader::default().read_bytes(b"a,b\n").unwrap();
    assert_eq!(table.column_names(), vec!["a", "b"]);
    assert_eq!(table.n_rows(), 0);
    assert_eq!(table.column_type("a").unwrap(), ColumnType::Empty);
}

#[test]
fn test_json_shape() {
    let table = CsvTableReader::default()
        .read_bytes(b"b,a\n1,x\n2,\n")
        .unwrap();
    assert_eq!(
        table_to_json(&table),
        json!({"b": {"0": 1, "1": 2}, "a": {"0": "x", "1": null}})
    );
}

#[test]
fn test_csv_round_trip_keeps_values() {
    let reader = CsvTableReader::default();
    let table = reader.read_bytes(SAMPLE.as_bytes()).unwrap();

    let mut buf = Vec::new();
    let mut writer = CsvTableWriter::new(&mut buf, b',');
    writer.write_table(&table).unwrap();
    writer.close().unwrap();

    let reread = reader.read_bytes(&buf).unwrap();
    assert_eq!(reread, table);
}
