//! Front matter splitting and parsing.
//!
//! A source may begin with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Setup
//! order: 2
//! ---
//! # Body starts here
//! ```

use serde_yaml::{Mapping, Value};

use crate::error::ContentError;

const FENCE: &str = "---";

/// Metadata recognised in a front matter block.
///
/// Unknown keys are ignored. This includes `slug`: a page's slug always comes
/// from its path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub order: Option<i64>,
    pub excerpt: Option<String>,
}

impl FrontMatter {
    /// Extract known fields from a YAML mapping.
    ///
    /// String fields accept any scalar; numbers and booleans are stringified.
    /// `order` accepts integers and integer strings. Values of the wrong shape
    /// are dropped rather than rejected.
    fn from_mapping(map: &Mapping) -> Self {
        let get = |key: &str| map.get(key).and_then(scalar_to_string);
        Self {
            title: get("title"),
            description: get("description"),
            date: get("date"),
            category: get("category"),
            order: map.get("order").and_then(scalar_to_order),
            excerpt: get("excerpt"),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn scalar_to_order(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Split a source into its front matter and body.
///
/// Text that does not open with a `---` line has no front matter; the whole
/// text is the body. An opened block must be closed by another `---` line.
///
/// # Errors
///
/// Returns [`ContentError::FrontMatter`] if the block is never closed, the
/// YAML is malformed, or it is not a mapping.
pub fn split_front_matter(raw: &str) -> Result<(FrontMatter, &str), ContentError> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let (first_line, rest) = text.split_once('\n').unwrap_or((text, ""));
    if first_line.trim_end() != FENCE {
        return Ok((FrontMatter::default(), text));
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((parse_yaml(yaml)?, body));
        }
        offset += line.len();
    }

    Err(ContentError::FrontMatter(
        "missing closing `---` fence".to_owned(),
    ))
}

fn parse_yaml(yaml: &str) -> Result<FrontMatter, ContentError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| ContentError::FrontMatter(format!("Invalid YAML: {e}")))?;
    match value {
        Value::Mapping(map) => Ok(FrontMatter::from_mapping(&map)),
        Value::Null => Ok(FrontMatter::default()),
        _ => Err(ContentError::FrontMatter(
            "expected a mapping of keys to values".to_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_front_matter() {
        let (meta, body) = split_front_matter("# Title\n\nBody").unwrap();

        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "# Title\n\nBody");
    }

    #[test]
    fn test_all_fields() {
        let raw = "---\ntitle: Setup\ndescription: How to install\ndate: 2025-01-15\ncategory: guides\norder: 2\nexcerpt: Short\n---\nBody text\n";
        let (meta, body) = split_front_matter(raw).unwrap();

        assert_eq!(
            meta,
            FrontMatter {
                title: Some("Setup".to_owned()),
                description: Some("How to install".to_owned()),
                date: Some("2025-01-15".to_owned()),
                category: Some("guides".to_owned()),
                order: Some(2),
                excerpt: Some("Short".to_owned()),
            }
        );
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn test_slug_and_unknown_keys_ignored() {
        let raw = "---\ntitle: Page\nslug: custom/slug\ntags: [a, b]\n---\n";
        let (meta, body) = split_front_matter(raw).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Page"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_scalars_are_stringified() {
        let raw = "---\ntitle: 2024\ncategory: true\n---\n";
        let (meta, _) = split_front_matter(raw).unwrap();

        assert_eq!(meta.title.as_deref(), Some("2024"));
        assert_eq!(meta.category.as_deref(), Some("true"));
    }

    #[test]
    fn test_order_from_string() {
        let (meta, _) = split_front_matter("---\norder: \" 7 \"\n---\n").unwrap();
        assert_eq!(meta.order, Some(7));

        let (meta, _) = split_front_matter("---\norder: first\n---\n").unwrap();
        assert_eq!(meta.order, None);
    }

    #[test]
    fn test_empty_block() {
        let (meta, body) = split_front_matter("---\n---\nBody").unwrap();

        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let (meta, body) = split_front_matter("---\r\ntitle: Win\r\n---\r\nBody").unwrap();

        assert_eq!(meta.title.as_deref(), Some("Win"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_byte_order_mark() {
        let (meta, _) = split_front_matter("\u{feff}---\ntitle: Bom\n---\n").unwrap();

        assert_eq!(meta.title.as_deref(), Some("Bom"));
    }

    #[test]
    fn test_unclosed_block_is_error() {
        let err = split_front_matter("---\ntitle: Broken\n\nBody").unwrap_err();

        assert!(matches!(err, ContentError::FrontMatter(_)));
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let err = split_front_matter("---\ntitle: [unclosed\n---\n").unwrap_err();

        assert!(err.to_string().starts_with("Invalid front matter: Invalid YAML"));
    }

    #[test]
    fn test_non_mapping_is_error() {
        let err = split_front_matter("---\n- a\n- b\n---\n").unwrap_err();

        assert!(matches!(err, ContentError::FrontMatter(_)));
    }

    #[test]
    fn test_thematic_break_later_is_not_front_matter() {
        let raw = "Intro\n\n---\n\nMore";
        let (meta, body) = split_front_matter(raw).unwrap();

        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, raw);
    }
}
