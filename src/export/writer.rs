use std::path::Path;
use csv::WriterBuilder;
use crate::normalizer::fields::HEADER;
use crate::{ConvertError, NormalizedRecord, Result};

pub struct HistoryWriter;

impl HistoryWriter {
    pub fn new() -> Self {
        Self
    }

    /// Sorts by `ts` and writes header plus rows to `output_path`.
    /// Returns the number of data rows written.
    pub fn write(&self, mut records: Vec<NormalizedRecord>, output_path: impl AsRef<Path>) -> Result<usize> {
        let output_path_ref = output_path.as_ref();
        let on_error = |source: csv::Error| ConvertError::OutputWrite {
            path: output_path_ref.to_path_buf(),
            source,
        };

        // Both dialects use ISO-8601-ordered timestamps, so plain string order is chronological.
        records.sort_by(|a, b| a.ts.cmp(&b.ts));

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(output_path_ref)
            .map_err(on_error)?;

        writer.write_record(HEADER).map_err(on_error)?;
        for record in &records {
            writer.serialize(record).map_err(on_error)?;
        }

        writer.flush().map_err(|e| on_error(e.into()))?;
        log::debug!("Wrote {} rows to {}", records.len(), output_path_ref.display());
        Ok(records.len())
    }
}

impl Default for HistoryWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn record(ts: &str, track: &str) -> NormalizedRecord {
        NormalizedRecord {
            ts: ts.into(),
            track_name: track.into(),
            artist_name: "X".into(),
            ms_played: 1000,
            genres: String::new(),
            artist_genres: String::new(),
        }
    }

    #[test]
    fn writes_header_and_sorted_rows() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("listening_history.csv");

        let written = HistoryWriter::new()
            .write(
                vec![
                    record("2024-02-01 00:00", "B"),
                    record("2024-01-15T00:00:00Z", "A"),
                ],
                &out,
            )
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "ts,Track Name,Artist Name(s),ms_played,Genres,Artist Genres\n\
             2024-01-15T00:00:00Z,A,X,1000,,\n\
             2024-02-01 00:00,B,X,1000,,\n"
        );
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.csv");

        HistoryWriter::new()
            .write(
                vec![
                    record("2024-01-01 00:00", "second-day"),
                    record("2023-12-31 00:00", "first"),
                    record("2024-01-01 00:00", "second-night"),
                ],
                &out,
            )
            .unwrap();

        let body = fs::read_to_string(&out).unwrap();
        let tracks: Vec<_> = body.lines().skip(1).map(|l| l.split(',').nth(1).unwrap()).collect();
        assert_eq!(tracks, vec!["first", "second-day", "second-night"]);
    }

    #[test]
    fn quotes_commas_quotes_and_newlines() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.csv");
        let mut row = record("2024-01-01 00:00", "Hello, \"World\"");
        row.artist_name = "Line\nBreak".into();

        HistoryWriter::new().write(vec![row], &out).unwrap();

        let body = fs::read_to_string(&out).unwrap();
        assert_eq!(
            body.lines().nth(1).unwrap(),
            "2024-01-01 00:00,\"Hello, \"\"World\"\"\",\"Line"
        );
        assert!(body.contains("\"Hello, \"\"World\"\"\",\"Line\nBreak\",1000,,\n"));
    }

    #[test]
    fn output_has_no_bom_or_crlf() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.csv");

        HistoryWriter::new().write(vec![record("t", "A")], &out).unwrap();

        let bytes = fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"ts,"));
        assert!(!bytes.contains(&b'\r'));
    }

    #[test]
    fn truncates_existing_output() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.csv");
        fs::write(&out, "stale content that is much longer than the new output\n".repeat(20)).unwrap();

        HistoryWriter::new().write(vec![record("t", "A")], &out).unwrap();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "ts,Track Name,Artist Name(s),ms_played,Genres,Artist Genres\nt,A,X,1000,,\n"
        );
    }

    #[test]
    fn unwritable_path_is_an_output_error() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("no_such_dir").join("out.csv");

        let err = HistoryWriter::new().write(vec![record("t", "A")], &out).unwrap_err();
        assert!(matches!(err, ConvertError::OutputWrite { path, .. } if path == out));
    }
}
