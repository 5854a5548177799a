//! Atomic single-document JSON persistence scaffold shared by every store
//! in this crate.
//!
//! Writes follow a "whole-document rewrite, no partial writes observable"
//! contract, adapted here to flat JSON. Load tolerates a missing file
//! (returns the caller-supplied default) and a malformed/partial document
//! (also returns the default) — repair of corrupted persistence is
//! explicitly out of scope.

use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Load a JSON document from `path`, returning `T::default()` (via the
/// supplied closure) if the file is missing or fails to parse.
///
/// Read failures are logged at `warn` and never propagated: every store in
/// this crate starts empty rather than surfacing a read failure.
pub fn load_or_default<T, F>(path: &Path, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %err, "failed to read persistence file");
            }
            return default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to parse persistence file, starting empty");
            default()
        }
    }
}

/// Atomically write `value` as JSON to `path`: serialize to a sibling
/// `.tmp` file, then `rename` it over the destination. On the same
/// filesystem this makes the replacement atomic — readers never observe a
/// half-written document.
///
/// Write failures are logged and returned to the caller so the in-memory
/// store can decide whether to retry; callers must never let a
/// persistence failure propagate as a user-visible error from an
/// otherwise-successful in-memory mutation.
pub fn save_atomic<T: Serialize>(path: &Path, value: &T) -> crate::error::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = tmp_path_for(path);
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "persistence".to_string());
    name.push_str(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq, Default)]
    struct Doc {
        value: u32,
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let doc: Doc = load_or_default(&path, Doc::default);
        assert_eq!(doc, Doc::default());
    }

    #[test]
    fn load_malformed_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        let doc: Doc = load_or_default(&path, Doc::default);
        assert_eq!(doc, Doc::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let doc = Doc { value: 42 };
        save_atomic(&path, &doc).unwrap();
        let loaded: Doc = load_or_default(&path, Doc::default);
        assert_eq!(loaded, doc);
        assert!(!tmp_path_for(&path).exists());
    }
}
