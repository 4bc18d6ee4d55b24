use CsvScrubber::data_model::{CellValue, Column, Table};
use CsvScrubber::error::{PipelineError, Result};
use CsvScrubber::executor::{CleaningStep, PipelineExecutor, StepScope};

// Helper function to create a single-column text table for testing
fn create_test_table(values: &[&str]) -> Table {
    Table::from_columns(vec![Column::new(
        "text",
        values.iter().map(|v| CellValue::text(*v)).collect(),
    )])
    .unwrap()
}

fn text_values(table: &Table) -> Vec<String> {
    table
        .column("text")
        .unwrap()
        .values
        .iter()
        .map(|c| c.to_string())
        .collect()
}

// Mock step appending a suffix to every cell
struct AppendStep {
    name: &'static str,
    suffix: &'static str,
}

impl CleaningStep for AppendStep {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        for cell in table.column_values_mut(column)? {
            if let CellValue::Text(s) = cell {
                s.push_str(self.suffix);
            }
        }
        Ok(table)
    }
}

// Mock step that always fails
struct FailingStep;

impl CleaningStep for FailingStep {
    fn name(&self) -> &'static str {
        "failing_step"
    }

    fn apply(&self, _table: Table, _column: &str) -> Result<Table> {
        Err(PipelineError::InvalidParameter {
            operation: "failing_step",
            message: "Mock error".to_string(),
        })
    }
}

struct DropAllRows;

impl CleaningStep for DropAllRows {
    fn name(&self) -> &'static str {
        "drop_all_rows"
    }

    fn scope(&self) -> StepScope {
        StepScope::Table
    }

    fn apply(&self, mut table: Table, _column: &str) -> Result<Table> {
        let keep = vec![false; table.n_rows()];
        table.retain_rows(&keep)?;
        Ok(table)
    }
}

#[test]
fn test_empty_pipeline_is_identity() {
    let executor = PipelineExecutor::new(vec![]);
    let table = create_test_table(&["a", "b"]);
    let out = executor.run_single(table.clone(), "text").unwrap();
    assert_eq!(out, table);
}

#[test]
fn test_steps_run_in_order() {
    let executor = PipelineExecutor::new(vec![
        Box::new(AppendStep { name: "first", suffix: "1" }),
        Box::new(AppendStep { name: "second", suffix: "2" }),
    ]);
    let out = executor
        .run_single(create_test_table(&["a", "b"]), "text")
        .unwrap();
    assert_eq!(text_values(&out), vec!["a12", "b12"]);
    assert_eq!(executor.step_names(), vec!["first", "second"]);
}

#[test]
fn test_missing_column_fails_before_any_step() {
    let executor = PipelineExecutor::new(vec![Box::new(AppendStep { name: "first", suffix: "1" })]);
    let err = executor
        .run_single(create_test_table(&["a"]), "nope")
        .unwrap_err();
    match err {
        PipelineError::ColumnNotFound { column } => assert_eq!(column, "nope"),
        other => panic!("Expected ColumnNotFound, got {:?}", other),
    }
}

#[test]
fn test_failure_aborts_and_names_the_step() {
    let executor = PipelineExecutor::new(vec![
        Box::new(AppendStep { name: "first", suffix: "1" }),
        Box::new(FailingStep),
        Box::new(AppendStep { name: "never", suffix: "x" }),
    ]);
    let err = executor
        .run_single(create_test_table(&["a"]), "text")
        .unwrap_err();
    match &err {
        PipelineError::StepError {
            step_name,
            column,
            source,
        } => {
            assert_eq!(step_name, "failing_step");
            assert_eq!(column, "text");
            assert!(matches!(**source, PipelineError::InvalidParameter { .. }));
        }
        other => panic!("Expected StepError, got {:?}", other),
    }
    assert_eq!(err.kind(), "invalid_parameter");
}

#[test]
fn test_table_steps_only_do_not_need_the_column() {
    let executor = PipelineExecutor::new(vec![Box::new(DropAllRows)]);
    let out = executor
        .run_single(create_test_table(&["a", "b"]), "missing")
        .unwrap();
    assert_eq!(out.n_rows(), 0);
    assert_eq!(out.column_names(), vec!["text"]);
}
