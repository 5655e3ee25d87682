//! One-shot sources for the initial board.
//!
//! When nothing is persisted, the board manager asks a [`SeedSource`] for a
//! starting board exactly once. A failing seed is not fatal: the manager
//! logs it and starts from an empty board.

pub mod file;
pub mod http;

pub use file::FileSeed;
pub use http::HttpSeed;

use std::path::PathBuf;

use taskboard_proto::Board;
use taskboard_proto::codec::CodecError;

/// Errors that can occur while fetching a seed board.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The HTTP request could not be completed.
    #[error("seed request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("seed request returned HTTP {0}")]
    Status(u16),

    /// The payload is not a valid board.
    #[error("seed payload invalid: {0}")]
    Decode(#[from] CodecError),

    /// No seed source has been configured.
    #[error("no seed source configured")]
    NotConfigured,
}

/// A source of the initial board.
pub trait SeedSource: Send + Sync {
    /// Fetches the seed board.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the board cannot be obtained or decoded.
    fn fetch(&self) -> impl std::future::Future<Output = Result<Board, SeedError>> + Send;
}

/// Seed held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSeed {
    board: Board,
}

impl StaticSeed {
    /// Wraps `board`.
    #[must_use]
    pub const fn new(board: Board) -> Self {
        Self { board }
    }
}

impl SeedSource for StaticSeed {
    async fn fetch(&self) -> Result<Board, SeedError> {
        Ok(self.board.clone())
    }
}

/// Seed that never yields a board; the manager starts empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSeed;

impl SeedSource for NoSeed {
    async fn fetch(&self) -> Result<Board, SeedError> {
        Err(SeedError::NotConfigured)
    }
}

/// Seed chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSeed {
    /// Fetch over HTTP.
    Http(HttpSeed),
    /// Read a local JSON file.
    File(FileSeed),
    /// A board supplied by the caller.
    Static(StaticSeed),
    /// Start empty.
    None(NoSeed),
}

impl SeedSource for ConfiguredSeed {
    async fn fetch(&self) -> Result<Board, SeedError> {
        match self {
            Self::Http(seed) => seed.fetch().await,
            Self::File(seed) => seed.fetch().await,
            Self::Static(seed) => seed.fetch().await,
            Self::None(seed) => seed.fetch().await,
        }
    }
}
