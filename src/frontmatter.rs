//! Frontmatter parsing for posts and series definition files.
//!
//! Both kinds of file are markdown with a leading YAML block:
//!
//! ```text
//! ---
//! title: Dependency Injection Explained
//! date: 2024-03-01
//! series: Spring Core Concepts
//! part: 2
//! tags: [spring, java]
//! ---
//! Body text...
//! ```
//!
//! Frontmatter is written by hand, so every field is read defensively:
//!
//! | Field | Accepted | Otherwise |
//! |-------|----------|-----------|
//! | `title` | string, number, or list of strings (joined with spaces) | `"Untitled"` |
//! | `date` | string or number, kept verbatim | `""` |
//! | `tags` | list | no tags |
//! | `series` | non-empty string | not in a series |
//! | `part` | integer, or a float with no fractional part | no part |
//! | `order` (definitions) | same as `part` | default order |
//!
//! A file without a frontmatter block parses as a document with no metadata.
//! Only structurally broken files (unterminated block, invalid YAML, YAML that
//! isn't a mapping) are errors, and only for that one file.

use crate::types::{Document, Membership, RawDefinition, UNTITLED};
use serde_yaml::Value;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("frontmatter block is not terminated by a `---` line")]
    Unterminated,
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("frontmatter must be a mapping of keys to values")]
    NotAMapping,
}

const FENCE: &str = "---";

/// Split a document into its parsed frontmatter and its body.
///
/// Returns `(Value::Null, text)` when the text has no frontmatter block.
pub fn split_frontmatter(text: &str) -> Result<(Value, &str), FrontmatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some((first_line, rest)) = split_line(text) else {
        return Ok((Value::Null, text));
    };
    if first_line.trim_end() != FENCE {
        return Ok((Value::Null, text));
    }

    let mut offset = 0;
    let mut remaining = rest;
    while let Some((line, after)) = split_line(remaining) {
        if line.trim_end() == FENCE {
            let yaml = &rest[..offset];
            let value = parse_yaml(yaml)?;
            return Ok((value, after));
        }
        offset += remaining.len() - after.len();
        remaining = after;
    }
    Err(FrontmatterError::Unterminated)
}

/// Split off the first line (without its terminator). `None` for empty input.
fn split_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }
    match text.find('\n') {
        Some(pos) => Some((text[..pos].trim_end_matches('\r'), &text[pos + 1..])),
        None => Some((text, "")),
    }
}

fn parse_yaml(yaml: &str) -> Result<Value, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Value::Null);
    }
    let value: Value = serde_yaml::from_str(yaml)?;
    match value {
        Value::Mapping(_) | Value::Null => Ok(value),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Render a scalar (string, number, bool) as text. Other YAML types yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Scalar text, or a list of scalars joined with spaces.
fn text_field(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::Sequence(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            Some(parts.join(" "))
        }
        other => scalar_text(other),
    };
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// An integer, or a float with no fractional part. Strings are not numbers.
fn integer_field(value: Option<&Value>) -> Option<i64> {
    let Value::Number(n) = value? else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

/// A non-empty string after trimming. Numbers, lists and the rest are rejected.
fn string_field(value: Option<&Value>) -> Option<String> {
    let Value::String(s) = value? else {
        return None;
    };
    Some(s.trim().to_string()).filter(|s| !s.is_empty())
}

fn tags_field(value: Option<&Value>) -> BTreeSet<String> {
    match value {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(scalar_text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        _ => BTreeSet::new(),
    }
}

/// Number of whitespace-separated words in a body.
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Estimated reading time in whole minutes, rounded up.
///
/// A `words_per_minute` of zero is treated as one to keep the division defined;
/// config validation rejects zero before it gets here.
pub fn reading_time(words: usize, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    words.div_ceil(wpm).try_into().unwrap_or(u32::MAX)
}

/// Parse a post into a [`Document`].
pub fn parse_document(slug: &str, text: &str) -> Result<Document, FrontmatterError> {
    let (meta, body) = split_frontmatter(text)?;

    let series = string_field(meta.get("series"));
    let part = integer_field(meta.get("part"));

    Ok(Document {
        slug: slug.to_string(),
        title: text_field(meta.get("title")).unwrap_or_else(|| UNTITLED.to_string()),
        date: meta
            .get("date")
            .and_then(scalar_text)
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        tags: tags_field(meta.get("tags")),
        membership: Membership::from_parts(series.as_deref(), part),
        summary: text_field(meta.get("summary")).unwrap_or_default(),
        word_count: word_count(body),
    })
}

/// Parse a series definition file into a [`RawDefinition`].
///
/// Validation (e.g. the title requirement) happens in the builder, so this
/// only fails on broken frontmatter.
pub fn parse_definition(source: &str, text: &str) -> Result<RawDefinition, FrontmatterError> {
    let (meta, _) = split_frontmatter(text)?;
    Ok(RawDefinition {
        source: source.to_string(),
        title: text_field(meta.get("title")),
        description: text_field(meta.get("description")),
        level: text_field(meta.get("level")),
        icon: text_field(meta.get("icon")),
        order: integer_field(meta.get("order")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // split_frontmatter()
    // =========================================================================

    #[test]
    fn splits_block_and_body() {
        let (meta, body) = split_frontmatter("---\ntitle: Hello\n---\nBody here\n").unwrap();
        assert_eq!(meta.get("title").and_then(Value::as_str), Some("Hello"));
        assert_eq!(body, "Body here\n");
    }

    #[test]
    fn crlf_line_endings() {
        let (meta, body) = split_frontmatter("---\r\ntitle: Hello\r\n---\r\nBody").unwrap();
        assert_eq!(meta.get("title").and_then(Value::as_str), Some("Hello"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn no_block_returns_whole_text() {
        let (meta, body) = split_frontmatter("# Just markdown\n").unwrap();
        assert!(meta.is_null());
        assert_eq!(body, "# Just markdown\n");
    }

    #[test]
    fn empty_block() {
        let (meta, body) = split_frontmatter("---\n---\ntext").unwrap();
        assert!(meta.is_null());
        assert_eq!(body, "text");
    }

    #[test]
    fn byte_order_mark_ignored() {
        let (meta, _) = split_frontmatter("\u{feff}---\ntitle: X\n---\n").unwrap();
        assert_eq!(meta.get("title").and_then(Value::as_str), Some("X"));
    }

    #[test]
    fn horizontal_rule_in_body_is_not_a_fence() {
        let (_, body) = split_frontmatter("---\ntitle: X\n---\nabove\n---\nbelow").unwrap();
        assert_eq!(body, "above\n---\nbelow");
    }

    #[test]
    fn unterminated_block_is_error() {
        let err = split_frontmatter("---\ntitle: X\nbody").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated));
    }

    #[test]
    fn invalid_yaml_is_error() {
        let err = split_frontmatter("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn non_mapping_yaml_is_error() {
        let err = split_frontmatter("---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::NotAMapping));
    }

    // =========================================================================
    // parse_document()
    // =========================================================================

    #[test]
    fn full_document() {
        let text = "---\n\
title: Beans and Contexts\n\
date: 2024-03-01\n\
series: Spring Core Concepts\n\
part: 2\n\
tags: [spring, java]\n\
summary: How the container wires things.\n\
---\n\
one two three four\n";
        let doc = parse_document("beans", text).unwrap();
        assert_eq!(doc.slug, "beans");
        assert_eq!(doc.title, "Beans and Contexts");
        assert_eq!(doc.date, "2024-03-01");
        assert_eq!(
            doc.membership,
            Membership::Member {
                series: "Spring Core Concepts".to_string(),
                part: Some(2)
            }
        );
        assert_eq!(
            doc.tags,
            ["java", "spring"].iter().map(|s| s.to_string()).collect()
        );
        assert_eq!(doc.summary, "How the container wires things.");
        assert_eq!(doc.word_count, 4);
    }

    #[test]
    fn missing_title_defaults_to_untitled() {
        let doc = parse_document("x", "---\ndate: 2024-01-01\n---\n").unwrap();
        assert_eq!(doc.title, UNTITLED);
        let doc = parse_document("x", "---\ntitle: \"\"\n---\n").unwrap();
        assert_eq!(doc.title, UNTITLED);
    }

    #[test]
    fn list_title_is_joined() {
        let doc = parse_document("x", "---\ntitle: [Part, One]\n---\n").unwrap();
        assert_eq!(doc.title, "Part One");
    }

    #[test]
    fn numeric_title_is_text() {
        let doc = parse_document("x", "---\ntitle: 1984\n---\n").unwrap();
        assert_eq!(doc.title, "1984");
    }

    #[test]
    fn non_numeric_part_is_none() {
        let doc = parse_document("x", "---\nseries: S\npart: two\n---\n").unwrap();
        assert_eq!(doc.membership.part(), None);
        let doc = parse_document("x", "---\nseries: S\npart: \"2\"\n---\n").unwrap();
        assert_eq!(doc.membership.part(), None);
    }

    #[test]
    fn whole_float_part_accepted_fractional_rejected() {
        let doc = parse_document("x", "---\nseries: S\npart: 3.0\n---\n").unwrap();
        assert_eq!(doc.membership.part(), Some(3));
        let doc = parse_document("x", "---\nseries: S\npart: 2.5\n---\n").unwrap();
        assert_eq!(doc.membership.part(), None);
    }

    #[test]
    fn non_array_tags_are_absent() {
        let doc = parse_document("x", "---\ntags: rust\n---\n").unwrap();
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn empty_series_means_no_series() {
        let doc = parse_document("x", "---\nseries: \"\"\npart: 1\n---\n").unwrap();
        assert_eq!(doc.membership, Membership::NoSeries);
    }

    #[test]
    fn non_string_series_means_no_series() {
        let doc = parse_document("x", "---\nseries: [Alpha, Beta]\npart: 1\n---\n").unwrap();
        assert_eq!(doc.membership, Membership::NoSeries);
        let doc = parse_document("x", "---\nseries: 42\npart: 1\n---\n").unwrap();
        assert_eq!(doc.membership, Membership::NoSeries);
    }

    #[test]
    fn series_name_is_trimmed() {
        let doc = parse_document("x", "---\nseries: \"  Alpha \"\npart: 1\n---\n").unwrap();
        assert_eq!(doc.membership.series_name(), Some("Alpha"));
    }

    #[test]
    fn part_without_series_is_dropped() {
        let doc = parse_document("x", "---\npart: 1\n---\n").unwrap();
        assert_eq!(doc.membership, Membership::NoSeries);
    }

    #[test]
    fn document_without_frontmatter() {
        let doc = parse_document("plain", "just some words").unwrap();
        assert_eq!(doc.title, UNTITLED);
        assert_eq!(doc.date, "");
        assert_eq!(doc.membership, Membership::NoSeries);
        assert_eq!(doc.word_count, 3);
    }

    // =========================================================================
    // parse_definition()
    // =========================================================================

    #[test]
    fn definition_fields() {
        let text = "---\ntitle: Rust\ndescription: Systems, safely.\nlevel: Advanced\nicon: 🦀\norder: 3\n---\n";
        let def = parse_definition("rust.md", text).unwrap();
        assert_eq!(def.source, "rust.md");
        assert_eq!(def.title.as_deref(), Some("Rust"));
        assert_eq!(def.description.as_deref(), Some("Systems, safely."));
        assert_eq!(def.level.as_deref(), Some("Advanced"));
        assert_eq!(def.icon.as_deref(), Some("🦀"));
        assert_eq!(def.order, Some(3));
    }

    #[test]
    fn definition_without_title_still_parses() {
        let def = parse_definition("anon.md", "---\norder: 1\n---\n").unwrap();
        assert_eq!(def.title, None);
        assert_eq!(def.order, Some(1));
    }

    // =========================================================================
    // reading_time()
    // =========================================================================

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time(0, 200), 0);
        assert_eq!(reading_time(1, 200), 1);
        assert_eq!(reading_time(200, 200), 1);
        assert_eq!(reading_time(201, 200), 2);
    }

    #[test]
    fn reading_time_zero_wpm_does_not_panic() {
        assert_eq!(reading_time(5, 0), 5);
    }
}
