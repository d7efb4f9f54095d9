//! Shared test utilities for the blog-series test suite.
//!
//! Provides fixture builders for documents and definitions, plus lookup
//! helpers that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let docs = vec![
//!     post("a1", "2024-01-01").in_series("Alpha", Some(2)).build(),
//!     post("solo", "2024-02-01").titled("Standalone").build(),
//! ];
//! let catalog = build_series(&docs, None, &Fallbacks::default(), 200);
//! assert_eq!(member_slugs(find_series(&catalog, "Alpha")), vec!["a1"]);
//! ```

use crate::series::SeriesCatalog;
use crate::slug::to_slug;
use crate::types::{Document, Membership, RawDefinition, Series, SeriesDefinition};
use std::collections::BTreeSet;

// =========================================================================
// Builders
// =========================================================================

/// Builder for a [`Document`]. Title defaults to the slug.
pub struct PostBuilder {
    doc: Document,
}

/// Start building a post with the given slug and raw date.
pub fn post(slug: &str, date: &str) -> PostBuilder {
    PostBuilder {
        doc: Document {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: date.to_string(),
            tags: BTreeSet::new(),
            membership: Membership::NoSeries,
            summary: String::new(),
            word_count: 0,
        },
    }
}

impl PostBuilder {
    pub fn titled(mut self, title: &str) -> Self {
        self.doc.title = title.to_string();
        self
    }

    pub fn in_series(mut self, series: &str, part: Option<i64>) -> Self {
        self.doc.membership = Membership::from_parts(Some(series), part);
        self
    }

    pub fn words(mut self, count: usize) -> Self {
        self.doc.word_count = count;
        self
    }

    pub fn build(self) -> Document {
        self.doc
    }
}

/// A raw definition record as a reader would produce it.
pub fn raw_definition(source: &str, title: Option<&str>, order: Option<i64>) -> RawDefinition {
    RawDefinition {
        source: source.to_string(),
        title: title.map(String::from),
        order,
        ..RawDefinition::default()
    }
}

/// Chainable setters for [`RawDefinition`] in fixtures.
pub trait RawDefinitionExt {
    fn with_level(self, level: &str) -> Self;
}

impl RawDefinitionExt for RawDefinition {
    fn with_level(mut self, level: &str) -> Self {
        self.level = Some(level.to_string());
        self
    }
}

/// A validated definition with no descriptive fields set.
pub fn definition(title: &str, order: i64) -> SeriesDefinition {
    SeriesDefinition {
        title: title.to_string(),
        description: None,
        level: None,
        icon: None,
        order,
        slug: to_slug(title),
    }
}

// =========================================================================
// Catalog lookups: panics with a clear message on miss
// =========================================================================

/// Find a series by title. Panics if not found.
pub fn find_series<'a>(catalog: &'a SeriesCatalog, title: &str) -> &'a Series {
    catalog.find_by_title(title).unwrap_or_else(|| {
        let titles = series_titles(catalog);
        panic!("series '{title}' not found. Available: {titles:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All series titles in catalog order.
pub fn series_titles(catalog: &SeriesCatalog) -> Vec<&str> {
    catalog.series.iter().map(|s| s.title.as_str()).collect()
}

/// Member slugs in reading order.
pub fn member_slugs(series: &Series) -> Vec<&str> {
    series.posts.iter().map(|m| m.slug.as_str()).collect()
}
