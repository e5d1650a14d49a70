use std::fs;
use std::path::Path;
use serde_json::Value;
use crate::{ConvertError, Result};

pub struct RecordLoader;

impl RecordLoader {
    /// Reads one export file. Never fails: problems are reported and the
    /// file contributes no records.
    pub fn load(path: impl AsRef<Path>) -> Vec<Value> {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(records) => {
                log::debug!("Loaded {} records from {}", records.len(), path.display());
                records
            }
            Err(ConvertError::NotAnArray(kind)) => {
                println!("Warning: {} does not contain a list ({}). Skipping.", path.display(), kind);
                Vec::new()
            }
            Err(ConvertError::Json(e)) => {
                println!(
                    "Error parsing {}: {} (line {}, column {})",
                    path.display(),
                    e,
                    e.line(),
                    e.column()
                );
                Vec::new()
            }
            Err(e) => {
                println!("Error reading {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Vec<Value>> {
        let text = fs::read_to_string(path.as_ref())?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        match serde_json::from_str::<Value>(text)? {
            Value::Array(records) => Ok(records),
            other => Err(ConvertError::NotAnArray(kind_of(&other))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
