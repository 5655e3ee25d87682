//! Directory-backed [`KeyValueStore`]: one `<key>.json` file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError};

/// Name of the marker file written to probe whether the directory is usable.
const PROBE_FILE: &str = ".taskboard-probe";

/// Maximum key length accepted by [`FileStore`].
pub const MAX_KEY_LEN: usize = 128;

/// Stores each key as a JSON file inside a directory.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(StoreError::InvalidKey(format!(
            "key must be 1..={MAX_KEY_LEN} bytes"
        )));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl KeyValueStore for FileStore {
    fn is_available(&self) -> bool {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            tracing::debug!(dir = %self.dir.display(), error = %err, "store directory not creatable");
            return false;
        }
        let probe = self.dir.join(PROBE_FILE);
        let usable = std::fs::write(&probe, b"ok").is_ok();
        // Best effort; a leftover marker is harmless.
        let _ = std::fs::remove_file(&probe);
        usable
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed(format!("{}: {e}", path.display()))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.dir.display())))?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value)
            .map_err(|e| StoreError::WriteFailed(format!("{}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| StoreError::WriteFailed(format!("{}: {e}", path.display())))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::WriteFailed(format!("{}: {e}", path.display()))),
        }
    }
}
