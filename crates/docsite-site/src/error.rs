//! Pipeline error types.

use std::fmt;

use docsite_renderer::CompileError;

use crate::{DocumentPath, ReadError};

/// Position of a render in the page pipeline.
///
/// A render starts in `Start`, moves through `Locating`, `Reading` and
/// `Rendering`, and ends in `DoneOk` or `DoneError`. Only `Reading` and
/// `Rendering` can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Start,
    Locating,
    Reading,
    Rendering,
    DoneOk,
    DoneError,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Locating => "locating",
            Self::Reading => "reading",
            Self::Rendering => "rendering",
            Self::DoneOk => "done",
            Self::DoneError => "failed",
        };
        f.write_str(name)
    }
}

/// Failure category shown to readers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source file is absent.
    NotFound,
    /// The source file exists but could not be read or decoded.
    ReadFailure,
    /// The content could not be compiled.
    CompileFailure,
}

impl ErrorKind {
    /// Headline message for the fallback view.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NotFound | Self::ReadFailure => "Unable to load the documentation content.",
            Self::CompileFailure => "Unable to render the documentation content.",
        }
    }

    /// Short explanation following the headline.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::NotFound => "The source file does not exist.",
            Self::ReadFailure => "The source file could not be read.",
            Self::CompileFailure => "The markdown could not be compiled.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "not_found",
            Self::ReadFailure => "read_failure",
            Self::CompileFailure => "compile_failure",
        };
        f.write_str(name)
    }
}

/// Error returned when a page cannot be produced.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Reading the source failed.
    #[error("{source}")]
    Read {
        /// Attempted source path.
        path: DocumentPath,
        /// Underlying read error.
        #[source]
        source: ReadError,
    },
    /// Compiling the source failed.
    #[error("Failed to compile {path}: {source}")]
    Compile {
        /// Attempted source path.
        path: DocumentPath,
        /// Underlying compile error.
        #[source]
        source: CompileError,
    },
}

impl PageError {
    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Read { source, .. } if source.is_not_found() => ErrorKind::NotFound,
            Self::Read { .. } => ErrorKind::ReadFailure,
            Self::Compile { .. } => ErrorKind::CompileFailure,
        }
    }

    /// Stage the render was in when it failed.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Read { .. } => Stage::Reading,
            Self::Compile { .. } => Stage::Rendering,
        }
    }

    /// Source path the render attempted.
    #[must_use]
    pub fn path(&self) -> &DocumentPath {
        match self {
            Self::Read { path, .. } | Self::Compile { path, .. } => path,
        }
    }
}

/// Reader-facing description of a failed render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDiagnostic {
    /// Failure category.
    pub kind: ErrorKind,
    /// Stage that failed.
    pub stage: Stage,
    /// Attempted source path.
    pub path: DocumentPath,
    /// Underlying error text.
    pub detail: String,
}

impl ErrorDiagnostic {
    /// Headline message for the fallback view.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl From<&PageError> for ErrorDiagnostic {
    fn from(err: &PageError) -> Self {
        Self {
            kind: err.kind(),
            stage: err.stage(),
            path: err.path().clone(),
            detail: err.to_string(),
        }
    }
}
