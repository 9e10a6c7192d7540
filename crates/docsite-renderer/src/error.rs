//! Compilation error type.

/// Error returned when a document cannot be compiled to HTML.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The leading front-matter block is not a valid YAML mapping.
    #[error("Invalid front-matter: {0}")]
    FrontMatter(String),

    /// Embedded markup is not well-formed (e.g., unbalanced tags).
    #[error("Invalid markup at line {line}: {message}")]
    Markup {
        /// Human-readable description of the problem.
        message: String,
        /// 1-based line number in the source document.
        line: usize,
    },
}
