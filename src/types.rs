//! Shared types passed between the content store, the series builder, and the
//! navigation resolver.
//!
//! Inputs (`Document`, `RawDefinition`) are produced once per build by a
//! [`crate::store`] reader and never mutated. Everything else is derived and
//! recomputed wholesale on every build.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const UNTITLED: &str = "Untitled";

/// Default `order` for series definitions that don't declare one.
pub const DEFAULT_SERIES_ORDER: i64 = 999;

/// Whether a document belongs to a series, and at which declared part.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Membership {
    #[default]
    NoSeries,
    Member {
        series: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        part: Option<i64>,
    },
}

impl Membership {
    /// Build a membership from raw frontmatter values. An empty series name
    /// means no membership; the part is dropped along with it.
    pub fn from_parts(series: Option<&str>, part: Option<i64>) -> Self {
        match series.map(str::trim) {
            Some(name) if !name.is_empty() => Membership::Member {
                series: name.to_string(),
                part,
            },
            _ => Membership::NoSeries,
        }
    }

    pub fn series_name(&self) -> Option<&str> {
        match self {
            Membership::Member { series, .. } => Some(series),
            Membership::NoSeries => None,
        }
    }

    pub fn part(&self) -> Option<i64> {
        match self {
            Membership::Member { part, .. } => *part,
            Membership::NoSeries => None,
        }
    }
}

/// One parsed post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// File stem, e.g. `spring-intro` for `posts/spring-intro.md`
    pub slug: String,
    pub title: String,
    /// Raw date string as written by the author; see [`crate::dates::parse_date`]
    pub date: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub membership: Membership,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    pub word_count: usize,
}

/// A series definition record as authored in `series/*.md`, before validation.
///
/// Every field is optional here; the builder decides what to do with records
/// that lack a title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDefinition {
    /// Where the record came from (file name), for log messages
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i64>,
}

/// A validated series definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDefinition {
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub icon: Option<String>,
    pub order: i64,
    /// `to_slug(title)`. The builder derives series slugs from titles itself;
    /// this is carried for callers inspecting parsed definitions.
    pub slug: String,
}

/// A document's entry inside its series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMember {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<i64>,
    pub date: String,
    /// Estimated minutes to read
    pub reading_time: u32,
}

/// A fully resolved series with its members in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub level: String,
    pub icon: String,
    pub posts: Vec<SeriesMember>,
    pub post_count: usize,
    /// Latest parseable member date, as written; empty if none parsed
    pub last_updated: String,
}

/// Minimal link to another post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLink {
    pub slug: String,
    pub title: String,
}

/// How a navigation result was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavLink {
    /// Target slug not in the document set
    Unresolved,
    /// Neighbours taken from the series reading order
    SeriesLinked,
    /// Neighbours taken from the global chronological order
    ChronoLinked,
    /// No series and no chronological neighbours (a lone post)
    Terminal,
}

/// Previous/next posts for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationResult {
    pub prev_post: Option<PostLink>,
    pub next_post: Option<PostLink>,
    pub link: NavLink,
}

impl NavigationResult {
    pub fn unresolved() -> Self {
        Self {
            prev_post: None,
            next_post: None,
            link: NavLink::Unresolved,
        }
    }
}
