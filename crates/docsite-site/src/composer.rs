//! Page composition: locate, read, render, wrap.
//!
//! [`PageComposer`] runs the whole pipeline for every call. Nothing is cached
//! between renders, so edits to the source file show up on the next request.

use std::path::PathBuf;

use docsite_renderer::{CompileOptions, compile, render_verbatim};

use crate::error::{ErrorDiagnostic, PageError, Stage};
use crate::layout::{ErrorView, Layout};
use crate::{ContentReader, DocumentPath, SourceLocator};

/// How the source text is turned into HTML.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Compile markdown with front-matter and embedded HTML.
    #[default]
    Markdown,
    /// Show the raw text escaped inside `<pre>`.
    Verbatim,
}

/// Configuration for [`PageComposer`].
#[derive(Clone, Debug)]
pub struct PageComposerConfig {
    /// Source file, relative to `base_dir`.
    pub source_file: PathBuf,
    /// Directory the source file is resolved against.
    ///
    /// If `None`, the process working directory at render time is used.
    pub base_dir: Option<PathBuf>,
    /// Rendering path.
    pub mode: RenderMode,
    /// Include the attempted path in the fallback view.
    pub show_path: bool,
    /// Include the underlying error text in the fallback view.
    pub development: bool,
    /// Page shell settings.
    pub layout: Layout,
    /// Markdown compiler options.
    pub compile: CompileOptions,
}

impl Default for PageComposerConfig {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from("docs/main.md"),
            base_dir: None,
            mode: RenderMode::default(),
            show_path: true,
            development: false,
            layout: Layout::default(),
            compile: CompileOptions::default(),
        }
    }
}

/// Content produced by a successful render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedContent {
    /// HTML fragment for the content region.
    pub html: String,
    /// Document title, if one was found.
    pub title: Option<String>,
    /// Front-matter description, if any.
    pub description: Option<String>,
    /// Size of the source in bytes.
    pub source_len: usize,
}

/// A full HTML page, either the document or the fallback view.
#[derive(Clone, Debug)]
pub struct ComposedPage {
    /// Complete HTML document.
    pub html: String,
    /// Set when the fallback view was produced.
    pub diagnostic: Option<ErrorDiagnostic>,
}

impl ComposedPage {
    /// Check if this is the fallback view.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// Builds the documentation page from the source file.
///
/// Holds only immutable configuration and is safe to share across threads.
///
/// # Example
///
/// ```no_run
/// use docsite_site::{PageComposer, PageComposerConfig};
///
/// let composer = PageComposer::new(PageComposerConfig::default());
/// let page = composer.compose();
/// if page.is_error() {
///     eprintln!("fallback view served");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct PageComposer {
    config: PageComposerConfig,
}

impl PageComposer {
    /// Create a composer.
    #[must_use]
    pub fn new(config: PageComposerConfig) -> Self {
        Self { config }
    }

    /// Composer configuration.
    #[must_use]
    pub fn config(&self) -> &PageComposerConfig {
        &self.config
    }

    /// Resolve the source path for this render.
    #[must_use]
    pub fn locate(&self) -> DocumentPath {
        let locator = match &self.config.base_dir {
            Some(dir) => SourceLocator::new(dir, &self.config.source_file),
            None => SourceLocator::from_current_dir(&self.config.source_file),
        };
        locator.locate()
    }

    /// Run the pipeline and return the content fragment.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Read`] if the source cannot be read and
    /// [`PageError::Compile`] if it cannot be compiled.
    pub fn render(&self) -> Result<RenderedContent, PageError> {
        tracing::trace!(stage = %Stage::Start, "Render started");

        tracing::trace!(stage = %Stage::Locating);
        let path = self.locate();

        tracing::trace!(stage = %Stage::Reading, path = %path);
        let raw = match ContentReader.read(&path) {
            Ok(raw) => raw,
            Err(source) => return Err(PageError::Read { path, source }),
        };

        tracing::trace!(stage = %Stage::Rendering, path = %path);
        let content = match self.config.mode {
            RenderMode::Verbatim => RenderedContent {
                html: render_verbatim(raw.as_str()),
                title: None,
                description: None,
                source_len: raw.len(),
            },
            RenderMode::Markdown => {
                let doc = match compile(raw.as_str(), &self.config.compile) {
                    Ok(doc) => doc,
                    Err(source) => return Err(PageError::Compile { path, source }),
                };
                RenderedContent {
                    html: doc.html,
                    title: doc.title,
                    description: doc.front_matter.description,
                    source_len: raw.len(),
                }
            }
        };

        tracing::debug!(
            stage = %Stage::DoneOk,
            path = %path,
            bytes = content.source_len,
            "Rendered documentation page"
        );
        Ok(content)
    }

    /// Run the pipeline and wrap the result in the page shell.
    ///
    /// Never fails: any error produces the fallback view and is logged.
    #[must_use]
    pub fn compose(&self) -> ComposedPage {
        let layout = &self.config.layout;
        match self.render() {
            Ok(content) => ComposedPage {
                html: layout.page(
                    &content.html,
                    content.title.as_deref(),
                    content.description.as_deref(),
                ),
                diagnostic: None,
            },
            Err(err) => {
                tracing::error!(
                    stage = %err.stage(),
                    kind = %err.kind(),
                    path = %err.path(),
                    error = %err,
                    "Failed to render documentation page"
                );
                tracing::trace!(stage = %Stage::DoneError);

                let diagnostic = ErrorDiagnostic::from(&err);
                let view = ErrorView {
                    message: diagnostic.message(),
                    hint: diagnostic.kind.hint(),
                    path: self.config.show_path.then(|| diagnostic.path.to_string()),
                    detail: self.config.development.then(|| diagnostic.detail.clone()),
                };
                ComposedPage {
                    html: layout.error_page(&view),
                    diagnostic: Some(diagnostic),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ErrorKind;

    static_assertions::assert_impl_all!(PageComposer: Send, Sync);

    fn composer_for(dir: &Path) -> PageComposer {
        PageComposer::new(PageComposerConfig {
            base_dir: Some(dir.to_path_buf()),
            ..PageComposerConfig::default()
        })
    }

    fn write_source(dir: &Path, content: &str) {
        fs::create_dir_all(dir.join("docs")).unwrap();
        fs::write(dir.join("docs/main.md"), content).unwrap();
    }

    #[test]
    fn test_render_heading_and_paragraph() {
        let temp = tempfile::tempdir().unwrap();
        write_source(temp.path(), "# Hello\nWorld");

        let content = composer_for(temp.path()).render().unwrap();

        assert_eq!(content.html, r#"<h1 id="hello">Hello</h1><p>World</p>"#);
        assert_eq!(content.title.as_deref(), Some("Hello"));
        assert_eq!(content.source_len, 13);
    }

    #[test]
    fn test_compose_success_page() {
        let temp = tempfile::tempdir().unwrap();
        write_source(temp.path(), "# Hello\nWorld");

        let page = composer_for(temp.path()).compose();

        assert!(!page.is_error());
        assert!(page.html.contains(r#"<h1 id="hello">Hello</h1>"#));
        assert!(page.html.contains("<p>World</p>"));
        assert!(page.html.contains("<title>Hello</title>"));
        assert!(!page.html.contains("Error Loading Content"));
    }

    #[test]
    fn test_compose_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let composer = composer_for(temp.path());

        let page = composer.compose();

        let diagnostic = page.diagnostic.as_ref().unwrap();
        assert_eq!(diagnostic.kind, ErrorKind::NotFound);
        assert_eq!(diagnostic.stage, Stage::Reading);
        assert!(page.html.contains("Error Loading Content"));
        assert!(page.html.contains("Unable to load the documentation content."));
        assert!(page.html.contains(&composer.locate().to_string()));
        assert!(page.html.contains("docs/main.md"));
    }

    #[test]
    fn test_front_matter_is_stripped() {
        let temp = tempfile::tempdir().unwrap();
        write_source(temp.path(), "---\ntitle: X\n---\nBody");

        let content = composer_for(temp.path()).render().unwrap();

        assert!(content.html.contains("Body"));
        assert!(!content.html.contains("---"));
        assert!(!content.html.contains("title"));
        assert_eq!(content.title.as_deref(), Some("X"));
    }

    #[test]
    fn test_front_matter_description_reaches_page() {
        let temp = tempfile::tempdir().unwrap();
        write_source(temp.path(), "---\ndescription: Runbooks\n---\nBody");

        let page = composer_for(temp.path()).compose();

        assert!(page.html.contains(r#"<meta name="description" content="Runbooks">"#));
    }

    #[test]
    fn test_malformed_markup_has_distinct_message() {
        let temp = tempfile::tempdir().unwrap();
        write_source(temp.path(), "Intro\n\n<div>\n\nnever closed\n");

        let page = composer_for(temp.path()).compose();

        let diagnostic = page.diagnostic.as_ref().unwrap();
        assert_eq!(diagnostic.kind, ErrorKind::CompileFailure);
        assert_eq!(diagnostic.stage, Stage::Rendering);
        assert!(page.html.contains(diagnostic.message()));
        assert!(page.html.contains("Unable to render the documentation content."));
        assert!(!page.html.contains("Unable to load the documentation content."));
    }

    #[test]
    fn test_render_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        write_source(
            temp.path(),
            "---\ntitle: Guide\n---\n# Intro\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n",
        );
        let composer = composer_for(temp.path());

        let first = composer.compose();
        let second = composer.compose();

        assert_eq!(first.html, second.html);
    }

    #[test]
    fn test_render_picks_up_file_changes() {
        let temp = tempfile::tempdir().unwrap();
        let composer = composer_for(temp.path());

        write_source(temp.path(), "first");
        assert_eq!(composer.render().unwrap().html, "<p>first</p>");

        write_source(temp.path(), "second");
        assert_eq!(composer.render().unwrap().html, "<p>second</p>");
    }

    #[test]
    fn test_verbatim_mode_escapes_source() {
        let temp = tempfile::tempdir().unwrap();
        write_source(temp.path(), "# Title\n<div>");
        let composer = PageComposer::new(PageComposerConfig {
            base_dir: Some(temp.path().to_path_buf()),
            mode: RenderMode::Verbatim,
            ..PageComposerConfig::default()
        });

        let content = composer.render().unwrap();

        assert_eq!(content.html, "<pre># Title\n&lt;div&gt;</pre>");
        assert_eq!(content.title, None);
    }

    #[test]
    fn test_hide_path() {
        let temp = tempfile::tempdir().unwrap();
        let composer = PageComposer::new(PageComposerConfig {
            base_dir: Some(temp.path().to_path_buf()),
            show_path: false,
            ..PageComposerConfig::default()
        });

        let page = composer.compose();

        assert!(page.is_error());
        assert!(!page.html.contains("docs/main.md"));
        assert!(!page.html.contains("Path:"));
    }

    #[test]
    fn test_development_shows_detail() {
        let temp = tempfile::tempdir().unwrap();
        write_source(temp.path(), "<span>open\n");
        let composer = PageComposer::new(PageComposerConfig {
            base_dir: Some(temp.path().to_path_buf()),
            development: true,
            ..PageComposerConfig::default()
        });

        let page = composer.compose();

        assert!(page.html.contains(r#"<pre class="error-detail">"#));
        assert!(page.html.contains("unclosed tag &lt;span&gt;"));
    }

    #[test]
    fn test_production_hides_detail() {
        let temp = tempfile::tempdir().unwrap();
        write_source(temp.path(), "<span>open\n");

        let page = composer_for(temp.path()).compose();

        assert!(page.is_error());
        assert!(!page.html.contains(r#"<pre class="error-detail">"#));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failure_is_logged_with_path() {
        let temp = tempfile::tempdir().unwrap();
        let composer = composer_for(temp.path());
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .finish();

        let page = tracing::subscriber::with_default(subscriber, || composer.compose());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(page.is_error());
        assert!(output.contains("Failed to render documentation page"), "{output}");
        assert!(output.contains("kind=not_found"), "{output}");
        assert!(output.contains("stage=reading"), "{output}");
        assert!(output.contains(&composer.locate().to_string()), "{output}");
    }
}
