use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use tracing::{debug, info_span, warn};

/// Whether a step touches one named column or the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepScope {
    Column,
    Table,
}

/// One cleaning operation.
///
/// Steps are synchronous and stateless across calls: the table is passed in
/// by value and handed back transformed.
pub trait CleaningStep: Send + Sync {
    // Used in logs, metrics labels and error payloads
    fn name(&self) -> &'static str;

    fn scope(&self) -> StepScope {
        StepScope::Column
    }

    fn apply(&self, table: Table, column: &str) -> Result<Table>;
}

pub struct PipelineExecutor {
    pub(crate) steps: Vec<Box<dyn CleaningStep>>, // Holds the ordered steps
}

impl PipelineExecutor {
    pub fn new(steps: Vec<Box<dyn CleaningStep>>) -> Self {
        if steps.is_empty() {
            warn!("Pipeline created with no steps.");
        }
        PipelineExecutor { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Fails with `ColumnNotFound` when any column-scoped step is present and
    /// the table has no column called `column`.
    pub fn validate_column(&self, table: &Table, column: &str) -> Result<()> {
        let needs_column = self.steps.iter().any(|s| s.scope() == StepScope::Column);
        if needs_column && !table.has_column(column) {
            return Err(PipelineError::ColumnNotFound {
                column: column.to_string(),
            });
        }
        Ok(())
    }

    /// Runs every step in order. The first failure aborts the rest.
    pub fn run_single(&self, initial_table: Table, column: &str) -> Result<Table> {
        self.validate_column(&initial_table, column)?;

        let mut current = initial_table;
        for (index, step) in self.steps.iter().enumerate() {
            let span = info_span!("pipeline_step", index, operation = step.name());
            let _enter = span.enter();
            debug!(rows = current.n_rows(), columns = current.n_columns(), "Running step");

            current = step
                .apply(current, column)
                .map_err(|e| PipelineError::StepError {
                    step_name: step.name().to_string(),
                    column: column.to_string(),
                    source: Box::new(e),
                })?;
        }
        Ok(current)
    }
}
