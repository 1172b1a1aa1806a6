//! Error taxonomy of the dataset loader

use std::{io, path::Path};
use thiserror::Error;

/// Result type of dataset operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Things that can go wrong while locating or parsing a split
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Requested split is not one of `train`, `dev` or `test`
    #[error("unknown dataset split {0:?}, expected one of train, dev or test")]
    UnknownSplit(Box<str>),

    /// The dataset archive could not be downloaded, verified or extracted
    #[error("failed to fetch {url}")]
    DownloadFailure {
        /// Location of the archive
        url: Box<str>,

        /// What the fetcher reported
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A sentence block does not have the column count of its split
    #[error(
        "malformed sentence at {}:{line}: expected {expected} columns, found {found}",
        .path.display()
    )]
    MalformedRecord {
        /// File being parsed
        path: Box<Path>,

        /// 1-based line number of the first token of the sentence
        line: usize,

        /// Column count required by the split
        expected: usize,

        /// Column count shared by all tokens of the sentence
        found: usize,
    },

    /// A split file could not be opened or read
    #[error("I/O error on {}", .path.display())]
    Io {
        /// File being accessed
        path: Box<Path>,

        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// There is no per-user cache directory on this system
    #[error("could not determine a cache directory for the dataset")]
    NoCacheDir,
}
//
impl Error {
    /// Wrap an I/O error with the path it happened on
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().into(),
            source,
        }
    }
}
