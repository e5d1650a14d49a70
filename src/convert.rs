use std::path::{Path, PathBuf};
use crate::utils::file_ops::display_name;
use crate::{ConvertError, FieldNormalizer, FileDiscovery, HistoryWriter, RecordLoader, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub files: Vec<PathBuf>,
    pub streams_found: usize,
    pub records_written: usize,
    pub records_skipped: usize,
    pub output_path: PathBuf,
}

/// Runs discovery, loading, normalization and the CSV sink in sequence.
pub fn run(input_dir: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<ConversionReport> {
    run_with(&FieldNormalizer::new(), input_dir, output_path)
}

pub fn run_with(
    normalizer: &FieldNormalizer,
    input_dir: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<ConversionReport> {
    let input_dir = input_dir.as_ref();
    let output_path = output_path.as_ref();

    println!("Searching for listening history files in: {}", input_dir.display());
    let files = FileDiscovery::new()?.discover(input_dir)?;

    if files.is_empty() {
        return Err(ConvertError::NoInputsMatched {
            dir: input_dir.to_path_buf(),
        });
    }

    println!("Found {} file(s):", files.len());
    for file in &files {
        println!("  - {}", display_name(file));
    }

    let mut streams = Vec::new();
    for file in &files {
        println!("Processing {}...", display_name(file));
        streams.extend(RecordLoader::load(file));
    }

    if streams.is_empty() {
        return Err(ConvertError::NoRecordsExtracted);
    }

    let streams_found = streams.len();
    println!("\nTotal streams found: {}", streams_found);

    let mut records = Vec::with_capacity(streams_found);
    let mut records_skipped = 0;
    for stream in streams {
        match normalizer.normalize_value(stream) {
            Ok(record) => records.push(record),
            Err(e) => {
                println!("Warning: Skipping invalid stream entry: {}", e);
                log::warn!("{:?}", e);
                records_skipped += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(ConvertError::NoRecordsExtracted);
    }

    println!("Writing to {}...", output_path.display());
    let records_written = HistoryWriter::new().write(records, output_path)?;

    Ok(ConversionReport {
        files,
        streams_found,
        records_written,
        records_skipped,
        output_path: output_path.to_path_buf(),
    })
}
