//! Front-matter support.
//!
//! A document may start with a YAML block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: Deployment Guide
//! owner: platform-team
//! ---
//! # Deploying
//! ```
//!
//! The closing delimiter may also be `...`. A block is front-matter only when
//! it is empty or its first line is a `key:` line. Anything else (including
//! an opening `---` without a closing delimiter) is treated as markdown, where
//! `---` is a thematic break.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::CompileError;

/// Metadata parsed from a document's front-matter block.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FrontMatter {
    /// Page title (overrides H1 extraction).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Remaining keys, in key order.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FrontMatter {
    /// Parse front-matter from the YAML between the delimiters.
    ///
    /// Empty content yields a default instance.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::FrontMatter`] if the YAML is malformed or is not
    /// a mapping with string keys.
    pub fn from_yaml(content: &str) -> Result<Self, CompileError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| CompileError::FrontMatter(e.to_string()))?;

        let mapping = match value {
            serde_yaml::Value::Null => return Ok(Self::default()),
            serde_yaml::Value::Mapping(mapping) => mapping,
            _ => {
                return Err(CompileError::FrontMatter(
                    "expected key/value pairs".to_owned(),
                ));
            }
        };

        let mut fields = BTreeMap::new();
        for (key, value) in mapping {
            let key = match key {
                serde_yaml::Value::String(key) => key,
                other => {
                    return Err(CompileError::FrontMatter(format!(
                        "keys must be strings, found {other:?}"
                    )));
                }
            };
            let value = serde_json::to_value(&value)
                .map_err(|e| CompileError::FrontMatter(format!("{key}: {e}")))?;
            fields.insert(key, value);
        }

        Ok(Self {
            title: take_text(&mut fields, "title")?,
            description: take_text(&mut fields, "description")?,
            extra: fields,
        })
    }

    /// Check if no metadata was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.extra.is_empty()
    }
}

/// Remove a scalar field and convert it to text.
fn take_text(
    fields: &mut BTreeMap<String, serde_json::Value>,
    key: &str,
) -> Result<Option<String>, CompileError> {
    match fields.remove(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(CompileError::FrontMatter(format!(
            "{key} must be a plain value"
        ))),
    }
}

/// A document split into its front-matter block and markdown body.
#[derive(Debug, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Raw YAML between the delimiters, if the document has front-matter.
    pub front_matter: Option<&'a str>,
    /// Markdown body following the front-matter.
    pub body: &'a str,
    /// 1-based line number of the first body line in the original source.
    pub body_line: usize,
}

/// Split a leading front-matter block from the markdown body.
#[must_use]
pub fn split_front_matter(source: &str) -> SplitDocument<'_> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let whole = SplitDocument {
        front_matter: None,
        body: source,
        body_line: 1,
    };

    let mut lines = source.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return whole;
    };
    if first.trim_end() != "---" {
        return whole;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    let mut line_count = 1;
    for line in lines {
        line_count += 1;
        let delimiter = line.trim_end();
        if delimiter == "---" || delimiter == "..." {
            let yaml = &source[yaml_start..offset];
            if !yaml.is_empty() && !starts_with_key(yaml) {
                return whole;
            }
            return SplitDocument {
                front_matter: Some(&source[yaml_start..offset]),
                body: &source[offset + line.len()..],
                body_line: line_count + 1,
            };
        }
        offset += line.len();
    }

    whole
}

/// Check whether the first line of a block opens a YAML mapping entry.
fn starts_with_key(yaml: &str) -> bool {
    let line = yaml.lines().next().unwrap_or_default();
    let Some((key, rest)) = line.split_once(':') else {
        return false;
    };
    let key_start = key.starts_with(|c: char| c.is_alphanumeric() || matches!(c, '_' | '"' | '\''));
    key_start && (rest.is_empty() || rest.starts_with(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_without_front_matter() {
        let split = split_front_matter("# Hello\nWorld");
        assert_eq!(split.front_matter, None);
        assert_eq!(split.body, "# Hello\nWorld");
        assert_eq!(split.body_line, 1);
    }

    #[test]
    fn test_split_with_front_matter() {
        let split = split_front_matter("---\ntitle: X\n---\nBody");
        assert_eq!(split.front_matter, Some("title: X\n"));
        assert_eq!(split.body, "Body");
        assert_eq!(split.body_line, 4);
    }

    #[test]
    fn test_split_crlf_line_endings() {
        let split = split_front_matter("---\r\ntitle: X\r\n---\r\nBody\r\n");
        assert_eq!(split.front_matter, Some("title: X\r\n"));
        assert_eq!(split.body, "Body\r\n");
    }

    #[test]
    fn test_split_dots_closing_delimiter() {
        let split = split_front_matter("---\na: 1\n...\ntext");
        assert_eq!(split.front_matter, Some("a: 1\n"));
        assert_eq!(split.body, "text");
    }

    #[test]
    fn test_split_empty_front_matter() {
        let split = split_front_matter("---\n---\nBody");
        assert_eq!(split.front_matter, Some(""));
        assert_eq!(split.body, "Body");
        assert_eq!(split.body_line, 3);
    }

    #[test]
    fn test_split_unclosed_is_body() {
        let split = split_front_matter("---\n\nSome text");
        assert_eq!(split.front_matter, None);
        assert_eq!(split.body, "---\n\nSome text");
    }

    #[test]
    fn test_split_thematic_breaks_are_body() {
        let source = "---\n\nIntro paragraph\n\n---\n\nMore";
        let split = split_front_matter(source);
        assert_eq!(split.front_matter, None);
        assert_eq!(split.body, source);
        assert_eq!(split.body_line, 1);
    }

    #[test]
    fn test_split_block_without_key_is_body() {
        let split = split_front_matter("---\nJust a sentence.\n---\nMore");
        assert_eq!(split.front_matter, None);

        let split = split_front_matter("---\n- a\n- b\n---\nMore");
        assert_eq!(split.front_matter, None);
    }

    #[test]
    fn test_split_quoted_and_empty_value_keys() {
        let split = split_front_matter("---\n\"title\": X\n---\nBody");
        assert_eq!(split.front_matter, Some("\"title\": X\n"));

        let split = split_front_matter("---\ntags:\n  - ops\n---\nBody");
        assert_eq!(split.front_matter, Some("tags:\n  - ops\n"));
    }

    #[test]
    fn test_split_delimiter_must_be_first_line() {
        let split = split_front_matter("Intro\n---\ntitle: X\n---\n");
        assert_eq!(split.front_matter, None);
    }

    #[test]
    fn test_split_strips_bom() {
        let split = split_front_matter("\u{feff}---\ntitle: X\n---\nBody");
        assert_eq!(split.front_matter, Some("title: X\n"));
    }

    #[test]
    fn test_from_yaml_title_and_description() {
        let fm = FrontMatter::from_yaml("title: Guide\ndescription: How to deploy\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Guide"));
        assert_eq!(fm.description.as_deref(), Some("How to deploy"));
        assert!(fm.extra.is_empty());
    }

    #[test]
    fn test_from_yaml_extra_fields() {
        let fm = FrontMatter::from_yaml("owner: sre\ntags:\n  - ops\n  - ci\n").unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(fm.extra["owner"], serde_json::json!("sre"));
        assert_eq!(fm.extra["tags"], serde_json::json!(["ops", "ci"]));
    }

    #[test]
    fn test_from_yaml_numeric_title() {
        let fm = FrontMatter::from_yaml("title: 2024\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("2024"));
    }

    #[test]
    fn test_from_yaml_empty() {
        assert!(FrontMatter::from_yaml("").unwrap().is_empty());
        assert!(FrontMatter::from_yaml("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_from_yaml_malformed() {
        let err = FrontMatter::from_yaml("title: [unclosed\n").unwrap_err();
        assert!(matches!(err, CompileError::FrontMatter(_)));
    }

    #[test]
    fn test_from_yaml_scalar_rejected() {
        let err = FrontMatter::from_yaml("just a sentence\n").unwrap_err();
        assert_eq!(
            err,
            CompileError::FrontMatter("expected key/value pairs".to_owned())
        );
    }

    #[test]
    fn test_from_yaml_nested_title_rejected() {
        let err = FrontMatter::from_yaml("title:\n  en: Guide\n").unwrap_err();
        assert!(err.to_string().contains("title"));
    }
}
