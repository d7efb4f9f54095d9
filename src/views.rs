//! Presentation-ready views assembled from the catalog and navigation results.
//!
//! These are what a template layer (or the CLI) consumes:
//!
//! - [`post_context`]: everything a post page needs around its body, namely the
//!   series sidebar box, previous/next links, and the "up next" series card
//!   that only appears on a series' final post.
//! - [`series_page`]: a series with its neighbours in catalog order.
//!
//! The series listing needs no extra assembly; it is
//! [`SeriesCatalog::series`] as-is.

use crate::navigation::{is_last_post_in_series, next_series, previous_series, resolve_navigation};
use crate::series::SeriesCatalog;
use crate::types::{Document, NavigationResult, Series, SeriesMember};
use serde::Serialize;

/// The series sidebar shown on a member post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesBox {
    pub title: String,
    pub slug: String,
    /// 1-based position of the post in reading order
    pub part: usize,
    pub total: usize,
    pub members: Vec<SeriesMember>,
}

/// Summary of a series suggested after finishing another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextSeriesCard {
    pub slug: String,
    pub title: String,
    pub post_count: usize,
    pub description: String,
    pub level: String,
    pub icon: String,
}

impl From<&Series> for NextSeriesCard {
    fn from(series: &Series) -> Self {
        Self {
            slug: series.slug.clone(),
            title: series.title.clone(),
            post_count: series.post_count,
            description: series.description.clone(),
            level: series.level.clone(),
            icon: series.icon.clone(),
        }
    }
}

/// Navigation context for one post page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostContext {
    pub slug: String,
    pub title: String,
    pub navigation: NavigationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_box: Option<SeriesBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_series: Option<NextSeriesCard>,
}

/// A series page: the series plus its neighbours in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPage {
    pub series: Series,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_series: Option<NextSeriesCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_series: Option<NextSeriesCard>,
}

/// Build the post page context for `slug`. `None` if no such post exists.
pub fn post_context(
    slug: &str,
    documents: &[Document],
    catalog: &SeriesCatalog,
) -> Option<PostContext> {
    let doc = documents.iter().find(|d| d.slug == slug)?;
    let navigation = resolve_navigation(slug, documents, catalog);

    let series = doc
        .membership
        .series_name()
        .and_then(|name| catalog.find_by_title(name));
    let position = series.and_then(|s| s.posts.iter().position(|m| m.slug == slug));

    let (series_box, next_series_card) = match (series, position) {
        (Some(series), Some(idx)) => {
            let card = is_last_post_in_series(slug, &series.posts)
                .then(|| next_series(&series.title, catalog.series()))
                .flatten()
                .map(NextSeriesCard::from);
            let series_box = SeriesBox {
                title: series.title.clone(),
                slug: series.slug.clone(),
                part: idx + 1,
                total: series.post_count,
                members: series.posts.clone(),
            };
            (Some(series_box), card)
        }
        _ => (None, None),
    };

    Some(PostContext {
        slug: doc.slug.clone(),
        title: doc.title.clone(),
        navigation,
        series_box,
        next_series: next_series_card,
    })
}

/// Build the page for the series with `series_slug`. `None` if unknown.
pub fn series_page(series_slug: &str, catalog: &SeriesCatalog) -> Option<SeriesPage> {
    let series = catalog.find_by_slug(series_slug)?;
    Some(SeriesPage {
        prev_series: previous_series(&series.title, catalog.series()).map(NextSeriesCard::from),
        next_series: next_series(&series.title, catalog.series()).map(NextSeriesCard::from),
        series: series.clone(),
    })
}
