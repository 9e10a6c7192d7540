//! HTML page shell around rendered content.

use std::fmt::Write;

use docsite_renderer::escape_html;

/// Fixed title of the fallback view.
pub const ERROR_TITLE: &str = "Error Loading Content";

const STYLESHEET: &str = "\
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Roboto,\"Helvetica Neue\",Arial,sans-serif;line-height:1.6;color:#1f2328;background:#fff}\
.container{max-width:960px;margin:0 auto;padding:2rem 1rem}\
.markdown-body h1,.markdown-body h2,.markdown-body h3{line-height:1.25;margin:1.5em 0 .5em}\
.markdown-body h1{font-size:2em;border-bottom:1px solid #d1d9e0;padding-bottom:.3em}\
.markdown-body h2{font-size:1.5em;border-bottom:1px solid #d1d9e0;padding-bottom:.3em}\
.markdown-body pre{background:#f6f8fa;padding:1rem;overflow:auto;border-radius:6px}\
.markdown-body code{font-family:ui-monospace,SFMono-Regular,Menlo,monospace;font-size:.875em}\
.markdown-body table{border-collapse:collapse}\
.markdown-body th,.markdown-body td{border:1px solid #d1d9e0;padding:.375rem .75rem}\
.markdown-body blockquote{margin:0;padding:0 1em;color:#59636e;border-left:.25em solid #d1d9e0}\
.markdown-body img{max-width:100%}\
.alert{padding:.5rem 1rem;margin-bottom:1rem;border-left:.25em solid #d1d9e0}\
.alert-title{display:flex;align-items:center;gap:.5rem;font-weight:600}\
.alert-note{border-color:#0969da}.alert-tip{border-color:#1a7f37}.alert-important{border-color:#8250df}\
.alert-warning{border-color:#9a6700}.alert-caution{border-color:#cf222e}\
.error-message{padding:1rem;background:#fef2f2;border:1px solid #fecaca;border-radius:.5rem}\
.error-message h1{margin:0 0 .5rem;font-size:1.125rem;font-weight:600;color:#b91c1c}\
.error-message p{margin:.25rem 0;color:#dc2626}\
.error-message code{font-family:ui-monospace,SFMono-Regular,Menlo,monospace}\
.error-detail{white-space:pre-wrap;background:#fff;border:1px solid #fecaca;padding:.5rem;border-radius:.25rem}";

/// Site-wide page settings.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Default `<title>`.
    pub title: String,
    /// Default meta description.
    pub description: String,
    /// Value of `<html lang>`.
    pub lang: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            title: "DevOps System Documentation".to_owned(),
            description: "Technical documentation for DevOps system".to_owned(),
            lang: "zh".to_owned(),
        }
    }
}

/// Contents of the fallback view.
#[derive(Clone, Debug, Default)]
pub struct ErrorView<'a> {
    /// Headline message.
    pub message: &'a str,
    /// Secondary explanation.
    pub hint: &'a str,
    /// Attempted source path, when it may be shown.
    pub path: Option<String>,
    /// Underlying error text, shown only in development.
    pub detail: Option<String>,
}

impl Layout {
    /// Wrap an already rendered HTML fragment in the page shell.
    ///
    /// `title` and `description` override the site defaults when present.
    #[must_use]
    pub fn page(&self, content: &str, title: Option<&str>, description: Option<&str>) -> String {
        let mut body = String::with_capacity(content.len() + 64);
        body.push_str(r#"<article class="markdown-body">"#);
        body.push_str(content);
        body.push_str("</article>");
        self.shell(
            title.unwrap_or(&self.title),
            description.unwrap_or(&self.description),
            &body,
        )
    }

    /// Render the fallback view.
    #[must_use]
    pub fn error_page(&self, view: &ErrorView<'_>) -> String {
        let mut body = String::new();
        body.push_str(r#"<div class="error-message" role="alert">"#);
        write!(body, "<h1>{ERROR_TITLE}</h1>").unwrap();
        write!(body, "<p>{}</p>", escape_html(view.message)).unwrap();
        if !view.hint.is_empty() {
            write!(body, "<p>{}</p>", escape_html(view.hint)).unwrap();
        }
        if let Some(path) = &view.path {
            write!(body, "<p>Path: <code>{}</code></p>", escape_html(path)).unwrap();
        }
        if let Some(detail) = &view.detail {
            write!(
                body,
                r#"<pre class="error-detail">{}</pre>"#,
                escape_html(detail)
            )
            .unwrap();
        }
        body.push_str("</div>");
        self.shell(ERROR_TITLE, &self.description, &body)
    }

    fn shell(&self, title: &str, description: &str, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + STYLESHEET.len() + 256);
        out.push_str("<!DOCTYPE html>\n");
        writeln!(out, r#"<html lang="{}">"#, escape_html(&self.lang)).unwrap();
        out.push_str("<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        writeln!(out, "<title>{}</title>", escape_html(title)).unwrap();
        writeln!(
            out,
            r#"<meta name="description" content="{}">"#,
            escape_html(description)
        )
        .unwrap();
        writeln!(out, "<style>{STYLESHEET}</style>").unwrap();
        out.push_str("</head>\n<body>\n");
        out.push_str(r#"<div class="container"><main>"#);
        out.push_str(body);
        out.push_str("</main></div>\n</body>\n</html>\n");
        out
    }
}
