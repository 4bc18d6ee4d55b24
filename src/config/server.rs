use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::config::loader::CsvLoaderConfig;
use crate::config::read_yaml;
use crate::error::{PipelineError, Result};
use crate::utils::logging::LogFormat;

/// Settings for the HTTP service, read from YAML.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub max_upload_bytes: usize,
    /// Word list for spelling correction; the embedded English list when unset.
    pub dictionary_path: Option<PathBuf>,
    pub loader: CsvLoaderConfig,
    pub log_format: LogFormat,
    pub log_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            bind_addr: "127.0.0.1:3000".to_string(),
            max_upload_bytes: 64 * 1024 * 1024,
            dictionary_path: None,
            loader: CsvLoaderConfig::default(),
            log_format: LogFormat::Pretty,
            log_dir: None,
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.max_upload_bytes == 0 {
            return Err(PipelineError::ConfigValidationError(
                "ServiceConfig: max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        self.loader.validate()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr.parse().map_err(|e| {
            PipelineError::ConfigValidationError(format!(
                "ServiceConfig: bind_addr '{}' is not a socket address: {}",
                self.bind_addr, e
            ))
        })
    }

    /// Command-line values override the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(addr) = &args.bind_addr {
            self.bind_addr = addr.clone();
        }
        if let Some(path) = &args.dictionary {
            self.dictionary_path = Some(path.clone());
        }
        if let Some(format) = args.log_format {
            self.log_format = format;
        }
    }
}

/// Loads and validates the service configuration YAML file.
pub fn load_service_config<P: AsRef<std::path::Path>>(path: P) -> Result<ServiceConfig> {
    let config: ServiceConfig = read_yaml(path.as_ref(), "service config")?;
    config.validate()?;
    Ok(config)
}

// Define command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "HTTP service that cleans a column of an uploaded CSV", long_about = None)]
pub struct Args {
    /// Path to the service configuration YAML file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Address to listen on (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    pub bind_addr: Option<String>,

    /// Word list used for spelling correction
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Validate the service configuration and exit
    #[arg(long)]
    pub validate_config: bool,
}
