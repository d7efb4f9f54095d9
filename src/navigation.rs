//! Post-to-post navigation and end-of-series detection.
//!
//! ## Previous / next
//!
//! A post that is a member of a series links only to its series neighbours:
//! the first part has no "previous" and the last part has no "next", even when
//! chronologically adjacent posts exist. Series reading stays linear.
//!
//! Every other post (no series, or a series the catalog doesn't contain it in)
//! links through the global chronological order, newest first:
//!
//! ```text
//! newest ─────────────────────────────────────────► oldest
//!   p3 (2024-03-01)     p2 (2024-02-01)     p1 (2024-01-01)
//!                  next ◄──── p2 ────► prev
//! ```
//!
//! Posts with missing or unparseable dates sort as the oldest, and ties are
//! broken by slug so the order is total.
//!
//! ## Next series
//!
//! [`next_series`] and [`previous_series`] walk the catalog's own ordered list,
//! the same one the listing displays, so "what's shown" and "what's suggested
//! next" can't disagree.

use crate::dates::parse_date;
use crate::series::SeriesCatalog;
use crate::types::{Document, NavLink, NavigationResult, PostLink, Series, SeriesMember};

/// All documents, newest first. Unparseable dates last, ties by slug.
pub fn chronological_order(documents: &[Document]) -> Vec<&Document> {
    let mut keyed: Vec<_> = documents
        .iter()
        .map(|doc| (parse_date(&doc.date), doc))
        .collect();
    // Option orders None before Some, so comparing b to a puts undated posts last
    keyed.sort_by(|(da, a), (db, b)| {
        db.cmp(da)
            .then_with(|| a.slug.cmp(&b.slug))
            .then_with(|| a.title.cmp(&b.title))
    });
    keyed.into_iter().map(|(_, doc)| doc).collect()
}

fn member_link(member: &SeriesMember) -> PostLink {
    PostLink {
        slug: member.slug.clone(),
        title: member.title.clone(),
    }
}

fn document_link(doc: &Document) -> PostLink {
    PostLink {
        slug: doc.slug.clone(),
        title: doc.title.clone(),
    }
}

/// Find `slug` among a series' ordered members.
fn series_position<'a>(
    doc: &Document,
    catalog: &'a SeriesCatalog,
) -> Option<(&'a Series, usize)> {
    let series = catalog.find_by_title(doc.membership.series_name()?)?;
    let idx = series.posts.iter().position(|m| m.slug == doc.slug)?;
    Some((series, idx))
}

/// Resolve previous/next posts for `target_slug`.
///
/// An unknown slug yields [`NavLink::Unresolved`] with both sides empty.
pub fn resolve_navigation(
    target_slug: &str,
    documents: &[Document],
    catalog: &SeriesCatalog,
) -> NavigationResult {
    let chrono = chronological_order(documents);
    let Some(idx) = chrono.iter().position(|d| d.slug == target_slug) else {
        return NavigationResult::unresolved();
    };
    let target = chrono[idx];

    if let Some((series, pos)) = series_position(target, catalog) {
        return NavigationResult {
            prev_post: pos
                .checked_sub(1)
                .and_then(|p| series.posts.get(p))
                .map(member_link),
            next_post: series.posts.get(pos + 1).map(member_link),
            link: NavLink::SeriesLinked,
        };
    }

    let prev_post = chrono.get(idx + 1).map(|d| document_link(d));
    let next_post = idx
        .checked_sub(1)
        .and_then(|p| chrono.get(p))
        .map(|d| document_link(d));
    let link = if prev_post.is_none() && next_post.is_none() {
        NavLink::Terminal
    } else {
        NavLink::ChronoLinked
    };
    NavigationResult {
        prev_post,
        next_post,
        link,
    }
}

/// True iff `members` is non-empty and its last member is `slug`.
pub fn is_last_post_in_series(slug: &str, members: &[SeriesMember]) -> bool {
    members.last().is_some_and(|last| last.slug == slug)
}

/// The series after `current_title` in catalog order.
pub fn next_series<'a>(current_title: &str, series: &'a [Series]) -> Option<&'a Series> {
    let idx = series.iter().position(|s| s.title == current_title)?;
    series.get(idx + 1)
}

/// The series before `current_title` in catalog order.
pub fn previous_series<'a>(current_title: &str, series: &'a [Series]) -> Option<&'a Series> {
    let idx = series.iter().position(|s| s.title == current_title)?;
    idx.checked_sub(1).and_then(|p| series.get(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Fallbacks;
    use crate::series::build_series;
    use crate::test_helpers::*;

    fn catalog(docs: &[Document]) -> SeriesCatalog {
        build_series(docs, None, &Fallbacks::empty(), 200)
    }

    fn slugs(result: &NavigationResult) -> (Option<&str>, Option<&str>) {
        (
            result.prev_post.as_ref().map(|p| p.slug.as_str()),
            result.next_post.as_ref().map(|p| p.slug.as_str()),
        )
    }

    fn alpha_docs() -> Vec<Document> {
        vec![
            post("a1", "2024-01-01").in_series("Alpha", Some(2)).build(),
            post("a2", "2024-01-02").in_series("Alpha", Some(1)).build(),
            post("a3", "2024-01-03").in_series("Alpha", None).build(),
        ]
    }

    // =========================================================================
    // Series-linked navigation
    // =========================================================================

    #[test]
    fn series_neighbours_follow_part_order() {
        let docs = alpha_docs();
        let cat = catalog(&docs);

        let nav = resolve_navigation("a1", &docs, &cat);
        assert_eq!(slugs(&nav), (Some("a2"), Some("a3")));
        assert_eq!(nav.link, NavLink::SeriesLinked);

        assert_eq!(slugs(&resolve_navigation("a2", &docs, &cat)), (None, Some("a1")));
        assert_eq!(slugs(&resolve_navigation("a3", &docs, &cat)), (Some("a1"), None));
    }

    #[test]
    fn series_ends_do_not_leak_chronological_neighbours() {
        let mut docs = alpha_docs();
        docs.push(post("newer", "2025-01-01").build());
        docs.push(post("older", "2020-01-01").build());
        let cat = catalog(&docs);

        let first = resolve_navigation("a2", &docs, &cat);
        assert_eq!(first.prev_post, None);
        let last = resolve_navigation("a3", &docs, &cat);
        assert_eq!(last.next_post, None);
    }

    #[test]
    fn single_member_series_has_no_neighbours() {
        let docs = vec![
            post("only", "2024-01-01").in_series("Solo", Some(1)).build(),
            post("other", "2024-02-01").build(),
        ];
        let nav = resolve_navigation("only", &docs, &catalog(&docs));
        assert_eq!(slugs(&nav), (None, None));
        assert_eq!(nav.link, NavLink::SeriesLinked);
    }

    #[test]
    fn links_carry_titles() {
        let docs = vec![
            post("one", "").titled("First").in_series("S", Some(1)).build(),
            post("two", "").titled("Second").in_series("S", Some(2)).build(),
        ];
        let nav = resolve_navigation("two", &docs, &catalog(&docs));
        assert_eq!(
            nav.prev_post,
            Some(PostLink {
                slug: "one".to_string(),
                title: "First".to_string()
            })
        );
    }

    // =========================================================================
    // Chronological navigation
    // =========================================================================

    #[test]
    fn chronological_prev_is_older_next_is_newer() {
        let docs = vec![
            post("p1", "2024-01-01").build(),
            post("p3", "2024-03-01").build(),
            post("p2", "2024-02-01").build(),
        ];
        let cat = catalog(&docs);
        let order: Vec<&str> = chronological_order(&docs)
            .iter()
            .map(|d| d.slug.as_str())
            .collect();
        assert_eq!(order, vec!["p3", "p2", "p1"]);

        let nav = resolve_navigation("p2", &docs, &cat);
        assert_eq!(slugs(&nav), (Some("p1"), Some("p3")));
        assert_eq!(nav.link, NavLink::ChronoLinked);

        assert_eq!(slugs(&resolve_navigation("p3", &docs, &cat)), (Some("p2"), None));
        assert_eq!(slugs(&resolve_navigation("p1", &docs, &cat)), (None, Some("p2")));
    }

    #[test]
    fn undated_posts_are_oldest_and_tie_by_slug() {
        let docs = vec![
            post("zz-undated", "").build(),
            post("garbage", "tomorrow-ish").build(),
            post("dated", "2001-01-01").build(),
            post("b-same", "2024-01-01").build(),
            post("a-same", "2024-01-01").build(),
        ];
        let order: Vec<&str> = chronological_order(&docs)
            .iter()
            .map(|d| d.slug.as_str())
            .collect();
        assert_eq!(
            order,
            vec!["a-same", "b-same", "dated", "garbage", "zz-undated"]
        );
    }

    #[test]
    fn series_members_appear_in_chronology_for_others() {
        let docs = vec![
            post("member", "2024-02-01").in_series("S", Some(1)).build(),
            post("before", "2024-01-01").build(),
            post("after", "2024-03-01").build(),
        ];
        let nav = resolve_navigation("before", &docs, &catalog(&docs));
        assert_eq!(slugs(&nav), (None, Some("member")));
    }

    #[test]
    fn claimed_series_missing_from_catalog_falls_back() {
        let docs = vec![
            post("ghost", "2024-02-01").in_series("Ghost", Some(1)).build(),
            post("old", "2024-01-01").build(),
            post("new", "2024-03-01").build(),
        ];
        // Catalog built without the ghost post, so its series doesn't exist
        let cat = catalog(&docs[1..]);
        let nav = resolve_navigation("ghost", &docs, &cat);
        assert_eq!(slugs(&nav), (Some("old"), Some("new")));
        assert_eq!(nav.link, NavLink::ChronoLinked);
    }

    #[test]
    fn claimed_series_without_the_post_falls_back() {
        let members = vec![post("m1", "2024-01-01").in_series("S", Some(1)).build()];
        let cat = catalog(&members);

        let mut docs = members.clone();
        docs.push(post("stray", "2024-02-01").in_series("S", Some(2)).build());
        let nav = resolve_navigation("stray", &docs, &cat);
        assert_eq!(slugs(&nav), (Some("m1"), None));
        assert_eq!(nav.link, NavLink::ChronoLinked);
    }

    #[test]
    fn lone_post_is_terminal() {
        let docs = vec![post("alone", "2024-01-01").build()];
        let nav = resolve_navigation("alone", &docs, &catalog(&docs));
        assert_eq!(slugs(&nav), (None, None));
        assert_eq!(nav.link, NavLink::Terminal);
    }

    #[test]
    fn unknown_slug_is_unresolved() {
        let docs = alpha_docs();
        let nav = resolve_navigation("nope", &docs, &catalog(&docs));
        assert_eq!(nav, NavigationResult::unresolved());
    }

    // =========================================================================
    // is_last_post_in_series()
    // =========================================================================

    #[test]
    fn last_post_detection() {
        let docs = alpha_docs();
        let cat = catalog(&docs);
        let members = &find_series(&cat, "Alpha").posts;
        assert!(is_last_post_in_series("a3", members));
        assert!(!is_last_post_in_series("a1", members));
        assert!(!is_last_post_in_series("missing", members));
    }

    #[test]
    fn last_post_false_for_empty_list() {
        assert!(!is_last_post_in_series("a1", &[]));
        assert!(!is_last_post_in_series("", &[]));
    }

    // =========================================================================
    // next_series() / previous_series()
    // =========================================================================

    #[test]
    fn next_series_follows_definition_order() {
        let docs = vec![
            post("a", "").in_series("Alpha", Some(1)).build(),
            post("b", "").in_series("Beta", Some(1)).build(),
        ];
        let defs = vec![
            raw_definition("beta.md", Some("Beta"), Some(2)),
            raw_definition("alpha.md", Some("Alpha"), Some(1)),
        ];
        let cat = build_series(&docs, Some(&defs), &Fallbacks::default(), 200);

        assert_eq!(next_series("Alpha", cat.series()).unwrap().title, "Beta");
        assert!(next_series("Beta", cat.series()).is_none());
        assert!(next_series("Gamma", cat.series()).is_none());
    }

    #[test]
    fn next_series_uses_displayed_order_for_unlisted_series() {
        let docs = vec![
            post("a", "").in_series("Alpha", Some(1)).build(),
            post("z", "").in_series("Zulu", Some(1)).build(),
            post("m", "").in_series("Mike", Some(1)).build(),
        ];
        let defs = vec![raw_definition("zulu.md", Some("Zulu"), Some(1))];
        let cat = build_series(&docs, Some(&defs), &Fallbacks::default(), 200);

        assert_eq!(series_titles(&cat), vec!["Zulu", "Alpha", "Mike"]);
        assert_eq!(next_series("Zulu", cat.series()).unwrap().title, "Alpha");
        assert_eq!(next_series("Alpha", cat.series()).unwrap().title, "Mike");
    }

    #[test]
    fn previous_series_boundaries() {
        let docs = vec![
            post("a", "").in_series("Alpha", Some(1)).build(),
            post("b", "").in_series("Beta", Some(1)).build(),
        ];
        let cat = catalog(&docs);
        assert!(previous_series("Alpha", cat.series()).is_none());
        assert_eq!(previous_series("Beta", cat.series()).unwrap().title, "Alpha");
        assert!(previous_series("Nope", cat.series()).is_none());
    }

    #[test]
    fn next_series_on_empty_catalog() {
        assert!(next_series("Alpha", &[]).is_none());
    }
}
