use crate::data_model::ColumnType;
use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The Error type for cleaning operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Column '{column}' not found in table")]
    ColumnNotFound { column: String },

    #[error("Operation '{operation}' expects a {expected} column, but '{column}' is {found}")]
    TypeMismatch {
        operation: &'static str,
        column: String,
        expected: &'static str,
        found: ColumnType,
    },

    #[error("Operation '{operation}' requires parameter '{parameter}'")]
    MissingParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    #[error("Invalid parameter for operation '{operation}': {message}")]
    InvalidParameter {
        operation: &'static str,
        message: String,
    },

    #[error("Failed to parse input table: {0}")]
    ParseError(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration validation error: {0}")]
    ConfigValidationError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization/Deserialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Error in operation '{step_name}' on column '{column}': {source}")]
    StepError {
        step_name: String,
        column: String,
        source: Box<PipelineError>,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Stable tag used by the HTTP layer and in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::ColumnNotFound { .. } => "column_not_found",
            PipelineError::TypeMismatch { .. } => "type_mismatch",
            PipelineError::MissingParameter { .. } => "missing_parameter",
            PipelineError::InvalidParameter { .. } => "invalid_parameter",
            PipelineError::ParseError(_) => "parse_error",
            PipelineError::InvalidTable(_) => "invalid_table",
            PipelineError::ConfigError(_) => "config_error",
            PipelineError::ConfigValidationError(_) => "config_validation_error",
            PipelineError::IoError { .. } => "io_error",
            PipelineError::SerializationError { .. } => "serialization_error",
            // The wrapper reports whatever the failing operation reported.
            PipelineError::StepError { source, .. } => source.kind(),
            PipelineError::Unexpected(_) => "unexpected",
        }
    }

    /// Name of the operation that failed, when known.
    pub fn operation(&self) -> Option<&str> {
        match self {
            PipelineError::StepError { step_name, .. } => Some(step_name),
            PipelineError::TypeMismatch { operation, .. }
            | PipelineError::MissingParameter { operation, .. }
            | PipelineError::InvalidParameter { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Unwraps `StepError` layers down to the error the operation raised.
    pub fn root(&self) -> &PipelineError {
        match self {
            PipelineError::StepError { source, .. } => source.root(),
            other => other,
        }
    }
}

// csv::Error carries position information in its Display output, which is
// all the caller needs; the loader is the only producer of these.
impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::ParseError(err.to_string())
    }
}
