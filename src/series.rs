//! Series building: grouping, member ordering, and series ordering.
//!
//! [`build_series`] is a pure fold from `(documents, definitions)` to a
//! [`SeriesCatalog`]. Nothing is cached between calls and nothing global is
//! consulted except the [`Fallbacks`] passed in.
//!
//! ## Pipeline
//!
//! ```text
//! RawDefinition[] ──► parse_definitions ──► by_title + GlobalSeriesOrder
//!                                                   │
//! Document[] ──► canonical (slug) order ──► group ──┤
//!                                                   ▼
//!                              order members ──► order series ──► SeriesCatalog
//! ```
//!
//! ## Ordering rules
//!
//! Members within a series form a total order:
//!
//! 1. `part` ascending, missing parts last
//! 2. title, lexicographic
//! 3. slug
//!
//! Series form a total order too: position in the GlobalSeriesOrder first,
//! then series absent from that list, alphabetically by title.
//!
//! GlobalSeriesOrder is the list of definition titles sorted by `order`
//! (default 999, ties keep encounter order). With no usable definitions it is
//! the fallback order list; an empty fallback list leaves pure alphabetical order.

use crate::dates::parse_date;
use crate::frontmatter::reading_time;
use crate::metadata::{Fallbacks, resolve_metadata};
use crate::slug::to_slug;
use crate::types::{
    DEFAULT_SERIES_ORDER, Document, RawDefinition, Series, SeriesDefinition, SeriesMember,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Validated definitions plus the order they impose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDefinitions {
    pub by_title: BTreeMap<String, SeriesDefinition>,
    /// Definition titles sorted by `order`, each title once
    pub order: Vec<String>,
    /// Sources of records that were skipped (no title)
    pub skipped: Vec<String>,
}

/// Series whose titles normalize to the same slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugCollision {
    pub slug: String,
    /// Colliding titles in resolved series order
    pub titles: Vec<String>,
}

/// The ordered series collection for one build.
///
/// This is the single source of truth for both the listing and the
/// next-series suggestion: anything that needs series order reads it from here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesCatalog {
    pub series: Vec<Series>,
    /// The GlobalSeriesOrder that was applied
    pub order: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slug_collisions: Vec<SlugCollision>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_definitions: Vec<String>,
}

impl SeriesCatalog {
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.title == title)
    }

    /// Look up a series by slug. On a slug collision the first series in
    /// resolved order wins.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.slug == slug)
    }

    pub fn slug_collisions(&self) -> &[SlugCollision] {
        &self.slug_collisions
    }
}

/// Validate raw definition records and derive the definition order.
pub fn parse_definitions(raw: &[RawDefinition]) -> ParsedDefinitions {
    let mut parsed = ParsedDefinitions::default();
    let mut sorted: Vec<SeriesDefinition> = Vec::with_capacity(raw.len());

    for record in raw {
        let title = match record.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                warn!(source = %record.source, "series definition has no title, skipping");
                parsed.skipped.push(record.source.clone());
                continue;
            }
        };

        let def = SeriesDefinition {
            slug: to_slug(&title),
            description: record.description.clone(),
            level: record.level.clone(),
            icon: record.icon.clone(),
            order: record.order.unwrap_or(DEFAULT_SERIES_ORDER),
            title,
        };

        if parsed.by_title.contains_key(&def.title) {
            warn!(
                source = %record.source,
                title = %def.title,
                "duplicate series definition, later record replaces metadata"
            );
        }
        parsed.by_title.insert(def.title.clone(), def.clone());
        sorted.push(def);
    }

    // Stable: equal `order` keeps encounter order
    sorted.sort_by_key(|d| d.order);
    for def in sorted {
        if !parsed.order.contains(&def.title) {
            parsed.order.push(def.title);
        }
    }
    parsed
}

/// Per-series state while folding over documents.
struct Accumulator {
    posts: Vec<SeriesMember>,
    last_updated: Option<(NaiveDateTime, String)>,
}

/// Group documents into series and order everything.
///
/// `definitions` is `None` when there is no definition store at all; an empty
/// slice behaves the same way. Either way the fallback order applies.
pub fn build_series(
    documents: &[Document],
    definitions: Option<&[RawDefinition]>,
    fallbacks: &Fallbacks,
    words_per_minute: u32,
) -> SeriesCatalog {
    let parsed = definitions.map(parse_definitions).unwrap_or_default();
    let order = if parsed.order.is_empty() {
        fallbacks.order.clone()
    } else {
        parsed.order.clone()
    };

    let mut canonical: Vec<&Document> = documents.iter().collect();
    canonical.sort_by(|a, b| compare_documents(a, b));

    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for doc in canonical {
        let Some(series_name) = doc.membership.series_name() else {
            continue;
        };
        let acc = groups.entry(series_name).or_insert_with(|| Accumulator {
            posts: Vec::new(),
            last_updated: None,
        });
        acc.posts.push(SeriesMember {
            slug: doc.slug.clone(),
            title: doc.title.clone(),
            part: doc.membership.part(),
            date: doc.date.clone(),
            reading_time: reading_time(doc.word_count, words_per_minute),
        });
        if let Some(parsed_date) = parse_date(&doc.date) {
            let advances = acc
                .last_updated
                .as_ref()
                .is_none_or(|(current, _)| parsed_date > *current);
            if advances {
                acc.last_updated = Some((parsed_date, doc.date.clone()));
            }
        }
    }

    let mut series: Vec<Series> = groups
        .into_iter()
        .map(|(title, mut acc)| {
            let meta = resolve_metadata(title, &parsed.by_title, fallbacks);
            acc.posts.sort_by(compare_members);
            Series {
                slug: to_slug(title),
                title: title.to_string(),
                description: meta.description,
                level: meta.level,
                icon: meta.icon,
                post_count: acc.posts.len(),
                posts: acc.posts,
                last_updated: acc.last_updated.map(|(_, raw)| raw).unwrap_or_default(),
            }
        })
        .collect();

    sort_series(&mut series, &order);
    let slug_collisions = find_slug_collisions(&series);

    debug!(
        series = series.len(),
        definitions = parsed.by_title.len(),
        "built series catalog"
    );

    SeriesCatalog {
        series,
        order,
        slug_collisions,
        skipped_definitions: parsed.skipped,
    }
}

/// Canonical document order used before grouping, so that the fold never
/// depends on the order the store discovered files in.
fn compare_documents(a: &Document, b: &Document) -> Ordering {
    a.slug
        .cmp(&b.slug)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.date.cmp(&b.date))
}

/// Reading order within a series: part (missing last), title, slug.
pub fn compare_members(a: &SeriesMember, b: &SeriesMember) -> Ordering {
    a.part
        .is_none()
        .cmp(&b.part.is_none())
        .then_with(|| a.part.cmp(&b.part))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.slug.cmp(&b.slug))
        .then_with(|| a.date.cmp(&b.date))
}

/// Order series by their position in `order`; unlisted series go last, by title.
pub fn sort_series(series: &mut [Series], order: &[String]) {
    let mut rank: HashMap<&str, usize> = HashMap::with_capacity(order.len());
    for (idx, title) in order.iter().enumerate() {
        rank.entry(title.as_str()).or_insert(idx);
    }
    series.sort_by(|a, b| {
        let ra = rank.get(a.title.as_str()).copied().unwrap_or(usize::MAX);
        let rb = rank.get(b.title.as_str()).copied().unwrap_or(usize::MAX);
        ra.cmp(&rb).then_with(|| a.title.cmp(&b.title))
    });
}

fn find_slug_collisions(series: &[Series]) -> Vec<SlugCollision> {
    let mut by_slug: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for s in series {
        if s.slug.is_empty() {
            warn!(title = %s.title, "series title normalizes to an empty slug");
        }
        by_slug.entry(&s.slug).or_default().push(s.title.clone());
    }

    by_slug
        .into_iter()
        .filter(|(_, titles)| titles.len() > 1)
        .map(|(slug, titles)| {
            warn!(slug = %slug, titles = ?titles, "series slug collision");
            SlugCollision {
                slug: slug.to_string(),
                titles,
            }
        })
        .collect()
}
