//! Source file reading.

use std::path::PathBuf;
use std::string::FromUtf8Error;

use crate::DocumentPath;

/// UTF-8 text of the documentation source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawContent(String);

impl RawContent {
    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the content in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the file was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Error returned when the source file cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// No file exists at the path.
    #[error("Source file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but reading it failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file content is not valid UTF-8.
    #[error("Source file {} is not valid UTF-8: {source}", path.display())]
    InvalidUtf8 {
        /// Path that was read.
        path: PathBuf,
        /// Decoding error.
        #[source]
        source: FromUtf8Error,
    },
}

impl ReadError {
    /// Check if the error means the file is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Reads the documentation source from the filesystem.
///
/// Each call is a single blocking attempt; failures are not retried.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentReader;

impl ContentReader {
    /// Read the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::NotFound`] if nothing exists at `path`,
    /// [`ReadError::Io`] if reading fails, and [`ReadError::InvalidUtf8`]
    /// if the content cannot be decoded.
    pub fn read(&self, path: &DocumentPath) -> Result<RawContent, ReadError> {
        let path = path.as_path();
        tracing::debug!(path = %path.display(), "Reading documentation source");

        if !path.exists() {
            return Err(ReadError::NotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|source| {
            // Removed between the existence check and the read
            if source.kind() == std::io::ErrorKind::NotFound {
                ReadError::NotFound(path.to_path_buf())
            } else {
                ReadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let text = String::from_utf8(bytes).map_err(|source| ReadError::InvalidUtf8 {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "Read documentation source");
        Ok(RawContent(text))
    }
}
