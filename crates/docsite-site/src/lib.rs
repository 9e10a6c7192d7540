//! Page composition for docsite.
//!
//! This crate provides:
//! - [`SourceLocator`]: resolves the markdown source path
//! - [`ContentReader`]: reads the source as UTF-8
//! - [`PageComposer`]: runs the pipeline and produces a full HTML page or a
//!   fallback view
//!
//! # Quick Start
//!
//! ```no_run
//! use docsite_site::{PageComposer, PageComposerConfig, RenderMode};
//!
//! let composer = PageComposer::new(PageComposerConfig {
//!     mode: RenderMode::Markdown,
//!     ..PageComposerConfig::default()
//! });
//!
//! // Reads docs/main.md from the working directory on every call
//! let page = composer.compose();
//! println!("{}", page.html);
//! ```

mod composer;
mod error;
mod layout;
mod locator;
mod reader;

pub use composer::{ComposedPage, PageComposer, PageComposerConfig, RenderMode, RenderedContent};
pub use error::{ErrorDiagnostic, ErrorKind, PageError, Stage};
pub use layout::{ERROR_TITLE, ErrorView, Layout};
pub use locator::{DocumentPath, SourceLocator};
pub use reader::{ContentReader, RawContent, ReadError};

// Re-export compiler options for configuring the composer
pub use docsite_renderer::CompileOptions;
