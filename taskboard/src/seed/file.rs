//! Seed read from a JSON file on disk.

use std::path::{Path, PathBuf};

use taskboard_proto::{Board, codec};

use super::{SeedError, SeedSource};

/// Reads the seed board from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSeed {
    path: PathBuf,
}

impl FileSeed {
    /// Creates a seed reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the seed file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedSource for FileSeed {
    async fn fetch(&self) -> Result<Board, SeedError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SeedError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(codec::decode_board(&text)?)
    }
}
