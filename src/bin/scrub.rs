// src/bin/scrub.rs

//! # Scrub CLI
//!
//! One-shot command line front end: reads a CSV file, applies the cleaning
//! operations enabled by a request file and/or `--set` pairs to one column,
//! and writes the cleaned table as column-oriented JSON or as CSV.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing::info;
use CsvScrubber::cleaning_logic::clean_table;
use CsvScrubber::config::{load_cleaning_request, CleaningRequest, CsvLoaderConfig};
use CsvScrubber::pipeline::readers::CsvTableReader;
use CsvScrubber::pipeline::writers::{BaseWriter, CsvTableWriter, JsonTableWriter};
use CsvScrubber::utils::logging::{init_tracing, LogFormat};
use CsvScrubber::utils::spelling::DictionarySource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

// Define command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Clean one column of a CSV file", long_about = None)]
struct Args {
    /// Input CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Column the column-scoped operations act on (overrides the request file)
    #[arg(long)]
    column: Option<String>,

    /// YAML cleaning request
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Extra request parameters as key=value, e.g. --set remove_spaces=true
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Word list used for spelling correction
    #[arg(long)]
    dictionary: Option<PathBuf>,

    #[arg(long, default_value = ",")]
    delimiter: char,

    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

fn build_request(args: &Args) -> anyhow::Result<CleaningRequest> {
    let mut request = match &args.request {
        Some(path) => load_cleaning_request(path)
            .with_context(|| format!("Loading request from {}", path.display()))?,
        None => CleaningRequest::default(),
    };
    for pair in &args.set {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("--set expects KEY=VALUE, got '{}'", pair);
        };
        request.set_param(key.trim(), value)?;
    }
    if let Some(column) = &args.column {
        request.column_name = column.clone();
    }
    request.validate()?;
    Ok(request)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(args.log_format, None)?;

    let request = build_request(&args)?;
    let loader = CsvLoaderConfig {
        delimiter: args.delimiter,
        ..Default::default()
    };
    loader.validate()?;

    let dictionary = match &args.dictionary {
        Some(path) => DictionarySource::from_path(path)?,
        None => DictionarySource::Embedded,
    };

    let table = CsvTableReader::new(loader.clone())
        .read_path(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    let cleaned = clean_table(table, &request, &dictionary)?;
    info!(rows = cleaned.n_rows(), columns = cleaned.n_columns(), "Cleaning finished");

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    match args.format {
        OutputFormat::Json => {
            let mut writer = JsonTableWriter::new(sink, true);
            writer.write_table(&cleaned)?;
            writer.close()?;
        }
        OutputFormat::Csv => {
            let mut writer = CsvTableWriter::new(sink, u8::try_from(args.delimiter)?);
            writer.write_table(&cleaned)?;
            writer.close()?;
        }
    }
    Ok(())
}
