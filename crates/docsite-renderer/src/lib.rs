//! Markdown compiler for docsite.
//!
//! Turns a markdown document, optionally starting with a YAML front-matter
//! block and containing embedded HTML, into an HTML fragment ready to be
//! placed inside a page layout.
//!
//! # Pipeline
//!
//! 1. [`split_front_matter`] separates the `---` delimited header from the body
//! 2. [`FrontMatter::from_yaml`] parses the header as key/value pairs
//! 3. [`MarkdownRenderer`] renders the body with `pulldown-cmark`, checking that
//!    embedded HTML elements are balanced
//!
//! [`compile`] runs all three. [`render_verbatim`] is the alternative that
//! skips markdown and shows the raw text in a `<pre>` block.
//!
//! # Example
//!
//! ```
//! use docsite_renderer::{CompileOptions, compile};
//!
//! let doc = compile("# Hello\nWorld", &CompileOptions::default()).unwrap();
//! assert_eq!(doc.html, r#"<h1 id="hello">Hello</h1><p>World</p>"#);
//! ```

mod document;
mod error;
mod frontmatter;
mod html;
mod markup;
mod renderer;
mod util;

pub use document::{CompileOptions, CompiledDocument, compile};
pub use error::CompileError;
pub use frontmatter::{FrontMatter, SplitDocument, split_front_matter};
pub use html::{escape_html, render_verbatim};
pub use renderer::{MarkdownRenderer, RenderResult};
