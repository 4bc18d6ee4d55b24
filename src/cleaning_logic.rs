// src/cleaning_logic.rs

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, info_span, instrument};
use uuid::Uuid;

use crate::config::{CleaningRequest, CsvLoaderConfig};
use crate::data_model::Table;
use crate::error::Result;
use crate::executor::PipelineExecutor;
use crate::pipeline::catalog::build_pipeline;
use crate::pipeline::readers::CsvTableReader;
use crate::pipeline::writers::table_to_json;
use crate::utils::prometheus_metrics::*;
use crate::utils::spelling::DictionarySource;

/// Outcome of one successful cleaning request.
#[derive(Debug, Clone, Serialize)]
pub struct CleaningReport {
    pub success: bool,
    pub request_id: Uuid,
    pub processed_at: DateTime<Utc>,
    /// Step names in the order they ran.
    pub operations: Vec<&'static str>,
    pub rows: usize,
    pub columns: usize,
    pub data: Value,
}

/// Runs an already-built pipeline over a table, recording metrics.
pub fn execute_cleaning(executor: &PipelineExecutor, table: Table, column: &str) -> Result<Table> {
    ROWS_PROCESSED_TOTAL.inc_by(table.n_rows() as f64);
    let cleaned = executor.run_single(table, column)?;
    for name in executor.step_names() {
        OPERATIONS_APPLIED_TOTAL.with_label_values(&[name]).inc();
    }
    Ok(cleaned)
}

/// Builds the pipeline for `request` and applies it to `table`.
#[instrument(skip_all, fields(column = %request.column_name))]
pub fn clean_table(
    table: Table,
    request: &CleaningRequest,
    dictionary: &DictionarySource,
) -> Result<Table> {
    let executor = build_pipeline(request, dictionary)?;
    execute_cleaning(&executor, table, &request.column_name)
}

/// Parse, clean and serialize one uploaded CSV document.
pub fn process_upload(
    bytes: &[u8],
    request: &CleaningRequest,
    loader: &CsvLoaderConfig,
    dictionary: &DictionarySource,
) -> Result<CleaningReport> {
    let request_id = Uuid::new_v4();
    let span = info_span!("clean_request", %request_id, column = %request.column_name);
    let _enter = span.enter();

    REQUESTS_TOTAL.inc();
    let timer = CLEANING_DURATION_SECONDS.start_timer();
    let started = Instant::now();

    let result = (|| -> Result<CleaningReport> {
        let executor = build_pipeline(request, dictionary)?;
        let table = CsvTableReader::new(loader.clone()).read_bytes(bytes)?;
        let cleaned = execute_cleaning(&executor, table, &request.column_name)?;
        Ok(CleaningReport {
            success: true,
            request_id,
            processed_at: Utc::now(),
            operations: executor.step_names(),
            rows: cleaned.n_rows(),
            columns: cleaned.n_columns(),
            data: table_to_json(&cleaned),
        })
    })();
    timer.observe_duration();

    match &result {
        Ok(report) => info!(
            operations = report.operations.len(),
            rows = report.rows,
            columns = report.columns,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Cleaning request completed"
        ),
        Err(e) => {
            REQUESTS_FAILED_TOTAL.inc();
            error!(error = %e, kind = e.kind(), "Cleaning request failed");
        }
    }
    result
}
