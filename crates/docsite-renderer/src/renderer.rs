//! Markdown renderer producing semantic HTML5.

use std::collections::HashMap;
use std::fmt::Write;

use pulldown_cmark::{Alignment, BlockQuoteKind, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::CompileError;
use crate::html::{self, escape_html, slugify};
use crate::markup::MarkupValidator;
use crate::util::{heading_level_to_num, line_starts};

/// Result of rendering markdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if title extraction was enabled).
    pub title: Option<String>,
}

/// Heading being collected until its end tag, when the id is known.
#[derive(Default)]
struct HeadingBuffer {
    level: u8,
    text: String,
    html: String,
}

/// Code block being collected until its end tag.
struct CodeBuffer {
    lang: Option<String>,
    content: String,
}

/// Image whose alt text is being collected.
struct ImageBuffer {
    src: String,
    title: String,
    alt: String,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    cell: usize,
    in_head: bool,
}

impl TableState {
    fn alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Markdown to HTML renderer.
///
/// Raw HTML embedded in the document is passed through, after checking that
/// its elements are balanced. An unbalanced document fails with
/// [`CompileError::Markup`] instead of producing broken output.
///
/// # Example
///
/// ```
/// use docsite_renderer::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new()
///     .with_title_extraction()
///     .render_markdown("# Hello\n\n**Bold** text")
///     .unwrap();
///
/// assert_eq!(result.title.as_deref(), Some("Hello"));
/// assert_eq!(
///     result.html,
///     r#"<h1 id="hello">Hello</h1><p><strong>Bold</strong> text</p>"#
/// );
/// ```
pub struct MarkdownRenderer {
    output: String,
    gfm: bool,
    extract_title: bool,
    first_line: usize,
    title: Option<String>,
    heading: Option<HeadingBuffer>,
    heading_ids: HashMap<String, usize>,
    code: Option<CodeBuffer>,
    image: Option<ImageBuffer>,
    table: TableState,
    /// Stack of alert kinds for nested blockquotes (regular blockquote uses None).
    alert_stack: Vec<Option<BlockQuoteKind>>,
    markup: MarkupValidator,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            gfm: true,
            extract_title: false,
            first_line: 1,
            title: None,
            heading: None,
            heading_ids: HashMap::new(),
            code: None,
            image: None,
            table: TableState::default(),
            alert_stack: Vec::new(),
            markup: MarkupValidator::new(),
        }
    }

    /// Enable title extraction from the first H1 heading.
    ///
    /// The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Alerts (`> [!NOTE]`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Set the source line number of the first markdown line.
    ///
    /// Used when the markdown follows a front-matter block, so error
    /// positions refer to the original file.
    #[must_use]
    pub fn with_first_line(mut self, line: usize) -> Self {
        self.first_line = line.max(1);
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Markup`] if embedded HTML elements are unbalanced.
    pub fn render_markdown(&mut self, markdown: &str) -> Result<RenderResult, CompileError> {
        let starts = line_starts(markdown);
        let parser = Parser::new_ext(markdown, self.parser_options()).into_offset_iter();

        for (event, range) in parser {
            if let Event::Html(fragment) | Event::InlineHtml(fragment) = &event {
                let line = self.first_line + starts.partition_point(|&s| s <= range.start) - 1;
                self.markup.feed(fragment, line)?;
            }
            self.process_event(event);
        }
        std::mem::take(&mut self.markup).finish()?;

        Ok(RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.title.take(),
        })
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" checked disabled> "#
                } else {
                    r#"<input type="checkbox" disabled> "#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled in parser options
            }
        }
    }

    /// Push inline markup to the heading buffer or output.
    ///
    /// Dropped while collecting image alt text, which is plain text only.
    fn push_inline(&mut self, content: &str) {
        if self.image.is_some() {
            return;
        }
        match &mut self.heading {
            Some(heading) => heading.html.push_str(content),
            None => self.output.push_str(content),
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                self.heading = Some(HeadingBuffer {
                    level: heading_level_to_num(level),
                    ..HeadingBuffer::default()
                });
            }
            Tag::BlockQuote(kind) => {
                self.alert_stack.push(kind);
                match kind {
                    Some(kind) => html::alert_start(kind, &mut self.output),
                    None => self.output.push_str("<blockquote>"),
                }
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBuffer {
                    lang,
                    content: String::new(),
                });
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments,
                    ..TableState::default()
                };
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell = 0;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.cell = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let tag = if self.table.in_head { "th" } else { "td" };
                let align = self.table.alignment_style();
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let link = if title.is_empty() {
                    format!(r#"<a href="{}">"#, escape_html(&dest_url))
                } else {
                    format!(
                        r#"<a href="{}" title="{}">"#,
                        escape_html(&dest_url),
                        escape_html(&title)
                    )
                };
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                if self.image.is_none() {
                    self.image = Some(ImageBuffer {
                        src: dest_url.into_string(),
                        title: title.into_string(),
                        alt: String::new(),
                    });
                }
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.take() {
                    self.finish_heading(heading);
                }
            }
            TagEnd::BlockQuote(_) => match self.alert_stack.pop() {
                Some(Some(_)) => html::alert_end(&mut self.output),
                _ => self.output.push_str("</blockquote>"),
            },
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    html::code_block(code.lang.as_deref(), &code.content, &mut self.output);
                }
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.table.in_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.table.in_head { "</th>" } else { "</td>" });
                self.table.cell += 1;
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some(image) = self.image.take() {
                    let mut rendered = String::new();
                    html::image(&image.src, &image.alt, &image.title, &mut rendered);
                    self.push_inline(&rendered);
                }
            }
        }
    }

    fn finish_heading(&mut self, heading: HeadingBuffer) {
        let text = heading.text.trim();
        if self.extract_title && self.title.is_none() && heading.level == 1 {
            self.title = Some(text.to_owned());
        }

        let id = self.unique_id(text);
        write!(
            self.output,
            r#"<h{level} id="{id}">{html}</h{level}>"#,
            level = heading.level,
            html = heading.html.trim(),
        )
        .unwrap();
    }

    /// Generate a heading id, suffixing repeats with `-1`, `-2`, ...
    fn unique_id(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base.push_str("section");
        }
        let count = self.heading_ids.entry(base.clone()).or_default();
        let id = match *count {
            0 => base,
            n => format!("{base}-{n}"),
        };
        *count += 1;
        escape_html(&id)
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = &mut self.code {
            code.content.push_str(text);
        } else if let Some(image) = &mut self.image {
            image.alt.push_str(text);
        } else if let Some(heading) = &mut self.heading {
            heading.text.push_str(text);
            heading.html.push_str(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(image) = &mut self.image {
            image.alt.push_str(code);
        } else if let Some(heading) = &mut self.heading {
            heading.text.push_str(code);
            write!(heading.html, "<code>{}</code>", escape_html(code)).unwrap();
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn raw_html(&mut self, html: &str) {
        if let Some(code) = &mut self.code {
            code.content.push_str(html);
        } else {
            self.push_inline(html);
        }
    }

    fn soft_break(&mut self) {
        if let Some(image) = &mut self.image {
            image.alt.push(' ');
        } else if let Some(heading) = &mut self.heading {
            heading.text.push(' ');
            heading.html.push('\n');
        } else {
            self.output.push('\n');
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
