//! Whole-document compilation: front-matter plus markdown body.

use crate::frontmatter::{FrontMatter, split_front_matter};
use crate::{CompileError, MarkdownRenderer};

/// Options for [`compile`].
#[derive(Clone, Debug)]
pub struct CompileOptions {
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
    /// Use the first H1 as the document title when front-matter has none.
    pub extract_title: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            extract_title: true,
        }
    }
}

/// A compiled markdown document.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledDocument {
    /// Rendered HTML of the body (front-matter excluded).
    pub html: String,
    /// Document title: front-matter `title`, else the first H1.
    pub title: Option<String>,
    /// Parsed front-matter (default when the document has none).
    pub front_matter: FrontMatter,
}

/// Compile a markdown document to HTML.
///
/// A leading front-matter block is parsed and removed before the body is
/// rendered. Output depends only on `source` and `options`.
///
/// # Errors
///
/// Returns [`CompileError::FrontMatter`] for malformed front-matter and
/// [`CompileError::Markup`] for unbalanced embedded HTML.
///
/// # Example
///
/// ```
/// use docsite_renderer::{CompileOptions, compile};
///
/// let doc = compile("---\ntitle: X\n---\nBody", &CompileOptions::default()).unwrap();
/// assert_eq!(doc.html, "<p>Body</p>");
/// assert_eq!(doc.title.as_deref(), Some("X"));
/// ```
pub fn compile(source: &str, options: &CompileOptions) -> Result<CompiledDocument, CompileError> {
    let split = split_front_matter(source);
    let front_matter = match split.front_matter {
        Some(yaml) => FrontMatter::from_yaml(yaml).inspect_err(|e| {
            tracing::debug!(error = %e, "Front-matter rejected");
        })?,
        None => FrontMatter::default(),
    };

    let mut renderer = MarkdownRenderer::new()
        .with_gfm(options.gfm)
        .with_first_line(split.body_line);
    if options.extract_title {
        renderer = renderer.with_title_extraction();
    }

    let result = renderer.render_markdown(split.body).inspect_err(|e| {
        tracing::debug!(error = %e, "Markdown body rejected");
    })?;

    let title = front_matter.title.clone().or(result.title);
    Ok(CompiledDocument {
        html: result.html,
        title,
        front_matter,
    })
}
