use std::borrow::Cow;
use std::path::Path;

/// Base name for progress output, falling back to the full path.
pub fn display_name(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}
