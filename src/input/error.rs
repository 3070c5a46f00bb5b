//! Error types for id file loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading an id file.
///
/// A missing file is not an error: it loads as an empty list.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file exists but could not be read.
    #[error("cannot read id file {path}: {source}\n  Suggestion: check the file permissions")]
    Io {
        /// The id file that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl InputError {
    /// Creates an IO error for the given id file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
