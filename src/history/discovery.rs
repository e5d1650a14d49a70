use std::path::{Path, PathBuf};
use regex::Regex;
use crate::{ConvertError, Result};

/// Filename globs for every known export generation, in lookup order.
pub const PATTERNS: [&str; 3] = [
    "StreamingHistory*.json",
    "Streaming_History*.json",
    "endsong_*.json", // extended streaming history
];

pub struct FileDiscovery {
    patterns: Vec<Regex>,
}

impl FileDiscovery {
    pub fn new() -> Result<Self> {
        let patterns = PATTERNS
            .iter()
            .map(|glob| glob_to_regex(glob))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(file_name))
    }

    /// Lists the export files directly inside `dir`, sorted and without duplicates.
    pub fn discover(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ConvertError::DirectoryMissing(dir.to_path_buf()));
        }

        let entries = Self::collect_files(dir);
        let mut found = Vec::new();

        for pattern in &self.patterns {
            for entry in &entries {
                let Some(name) = entry.file_name().to_str() else {
                    continue;
                };
                if pattern.is_match(name) {
                    log::debug!("{} matched {}", name, pattern.as_str());
                    found.push(entry.path().to_path_buf());
                }
            }
        }

        found.sort();
        found.dedup();
        Ok(found)
    }

    fn collect_files(dir: &Path) -> Vec<walkdir::DirEntry> {
        walkdir::WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("Error accessing entry: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .collect()
    }
}

/// `*` matches any run of characters; everything else is literal.
fn glob_to_regex(glob: &str) -> Result<Regex> {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Ok(Regex::new(&format!("^{}$", body))?)
}
