//! Series metadata resolution.
//!
//! Each series carries three descriptive fields (description, level, icon) that
//! can come from three places:
//!
//! 1. **Dynamic definitions**: `series/*.md` files whose frontmatter `title`
//!    matches the series name exactly.
//! 2. **Fallback table**: a small built-in table keyed by exact title. It ships
//!    with entries for the two Spring series and can be replaced through the
//!    `[fallback]` section of `config.toml`.
//! 3. **Default**: `"Explore this comprehensive series of articles."`,
//!    `"All Levels"`, `"📚"`.
//!
//! ## Resolution priority
//!
//! Sources rank per series, not per field. A matching definition replaces the
//! fallback entry entirely; its missing fields come from the default:
//!
//! ```text
//! definition exists:  definition field → default
//! otherwise:          fallback field   → default
//! ```
//!
//! So a definition file that only sets `level` still gets a description, the
//! result is always complete, and fallback text never shows up on a series
//! that has its own definition.
//!
//! A series name that matches nothing silently resolves to the default. A typo
//! in a post's `series:` field therefore creates a new series with default
//! metadata rather than a warning.

use crate::types::SeriesDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_DESCRIPTION: &str = "Explore this comprehensive series of articles.";
pub const DEFAULT_LEVEL: &str = "All Levels";
pub const DEFAULT_ICON: &str = "📚";

/// Descriptive metadata shown on series cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesMetadata {
    pub description: String,
    pub level: String,
    pub icon: String,
}

impl Default for SeriesMetadata {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

/// Metadata and ordering used when no definition files exist (or don't cover a series).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fallbacks {
    /// Series order used when there are no definition files.
    pub order: Vec<String>,
    /// Metadata keyed by exact series title.
    pub series: BTreeMap<String, SeriesMetadata>,
}

impl Default for Fallbacks {
    fn default() -> Self {
        let mut series = BTreeMap::new();
        series.insert(
            "Getting Started With Spring Boot".to_string(),
            SeriesMetadata {
                description: "A beginner-friendly introduction to Spring Boot, covering fundamentals and core concepts.".to_string(),
                level: "Beginner".to_string(),
                icon: "🚀".to_string(),
            },
        );
        series.insert(
            "Spring Core Concepts".to_string(),
            SeriesMetadata {
                description: "Deep dive into Spring Framework internals, beans, dependency injection, and advanced concepts.".to_string(),
                level: "Intermediate".to_string(),
                icon: "🎓".to_string(),
            },
        );
        Self {
            order: vec![
                "Getting Started With Spring Boot".to_string(),
                "Spring Core Concepts".to_string(),
            ],
            series,
        }
    }
}

impl Fallbacks {
    /// No fallback entries at all: every series resolves to the default and
    /// series without definitions sort alphabetically.
    pub fn empty() -> Self {
        Self {
            order: Vec::new(),
            series: BTreeMap::new(),
        }
    }
}

/// Return the first non-empty (after trimming) value from `sources`.
fn first_non_empty(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| opt.map(str::trim).filter(|s| !s.is_empty()))
        .map(String::from)
        .next()
}

/// Resolve the complete metadata for a series title.
pub fn resolve_metadata(
    title: &str,
    dynamic: &BTreeMap<String, SeriesDefinition>,
    fallbacks: &Fallbacks,
) -> SeriesMetadata {
    let pick = |value: Option<&str>, default: &str| {
        first_non_empty(&[value]).unwrap_or_else(|| default.to_string())
    };

    if let Some(def) = dynamic.get(title) {
        return SeriesMetadata {
            description: pick(def.description.as_deref(), DEFAULT_DESCRIPTION),
            level: pick(def.level.as_deref(), DEFAULT_LEVEL),
            icon: pick(def.icon.as_deref(), DEFAULT_ICON),
        };
    }

    let fallback = fallbacks.series.get(title);
    SeriesMetadata {
        description: pick(fallback.map(|f| f.description.as_str()), DEFAULT_DESCRIPTION),
        level: pick(fallback.map(|f| f.level.as_str()), DEFAULT_LEVEL),
        icon: pick(fallback.map(|f| f.icon.as_str()), DEFAULT_ICON),
    }
}
