#![allow(non_snake_case)]

// Declare the modules that form the library's public API
pub mod config;
pub mod data_model;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod utils;

pub mod cleaning_logic;
pub mod server;

pub use data_model::{CellValue, Column, ColumnType, Table};
pub use error::{PipelineError, Result};
pub use executor::{CleaningStep, PipelineExecutor, StepScope};
