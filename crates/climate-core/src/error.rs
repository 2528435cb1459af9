use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the climate visualiser.
#[derive(Error, Debug)]
pub enum ClimateError {
    /// The CSV header lacks one or more required columns.
    ///
    /// Lists every missing column, `year` first and months in calendar order.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Parsing finished without a single valid observation.
    #[error("No valid observations found in the input")]
    EmptyResult,

    /// The input file is not a CSV file.
    #[error("Invalid file type: {0}. Please provide a valid CSV file.")]
    InvalidFileType(String),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the header row.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The remote aggregation service failed or could not be reached.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// The remote aggregation service returned an unusable payload.
    #[error("Malformed server response: {0}")]
    MalformedResponse(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the climate crates.
pub type Result<T> = std::result::Result<T, ClimateError>;
