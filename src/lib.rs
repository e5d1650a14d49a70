use std::path::PathBuf;
use serde::Serialize;

pub mod cli;
pub mod convert;
pub mod export;
pub mod history;
pub mod normalizer;
pub mod utils;

/// One output row. Field order here is the column order of the CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub ts: String,
    #[serde(rename = "Track Name")]
    pub track_name: String,
    #[serde(rename = "Artist Name(s)")]
    pub artist_name: String,
    pub ms_played: u64,
    #[serde(rename = "Genres")]
    pub genres: String,
    #[serde(rename = "Artist Genres")]
    pub artist_genres: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryMissing(PathBuf),
    #[error(
        "No listening history files found in {}. Looking for files matching: {}",
        .dir.display(),
        history::discovery::PATTERNS.join(", ")
    )]
    NoInputsMatched { dir: PathBuf },
    #[error("No streaming data found in JSON files")]
    NoRecordsExtracted,
    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Top-level value is {0}, expected a list")]
    NotAnArray(&'static str),
    #[error("Invalid stream entry: {0}")]
    InvalidRecord(String),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ConvertError {
    /// Process exit code for a failure that ends the run.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

// Re-exports for convenience
pub use convert::{run, ConversionReport};
pub use export::writer::HistoryWriter;
pub use history::discovery::FileDiscovery;
pub use history::loader::RecordLoader;
pub use normalizer::fields::{FieldNormalizer, FIELD_RULES, HEADER};
pub use normalizer::raw::{RawRecord, RawValue};
