//! CLI output formatting for catalogs, series pages, and post navigation.
//!
//! # Information-First Display
//!
//! Every entity leads with its positional index and title; slugs, levels and
//! dates follow as indented context lines. Series members are numbered by
//! reading position, with the declared part shown alongside when present.
//!
//! # Output Format
//!
//! ## Listing
//!
//! ```text
//! Series
//! 001 🚀 Getting Started With Spring Boot (2 posts)
//!     Slug: getting-started-with-spring-boot
//!     Level: Beginner
//!     Updated: 2024-01-08
//!     001 Why Spring Boot [part 1] · 3 min
//!     002 Your First Controller [part 2] · 5 min
//! ```
//!
//! ## Post
//!
//! ```text
//! Your First Controller (boot-controller)
//!     Series: Getting Started With Spring Boot (part 2 of 2)
//!     Previous: Why Spring Boot (boot-why)
//!     Next: none
//!     Up next: 🎓 Spring Core Concepts (3 posts)
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::series::SeriesCatalog;
use crate::store::SkippedFile;
use crate::types::{PostLink, Series, SeriesMember};
use crate::views::{NextSeriesCard, PostContext, SeriesPage};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format a series header: index, icon, title, post count.
///
/// ```text
/// 001 🚀 Getting Started With Spring Boot (2 posts)
/// ```
fn series_header(index: usize, series: &Series) -> String {
    format!(
        "{} {} {} ({})",
        format_index(index),
        series.icon,
        series.title,
        plural(series.post_count, "post")
    )
}

/// Format a member line: position, title, declared part, reading time.
///
/// ```text
/// 001 Why Spring Boot [part 1] · 3 min
/// 003 Appendix · 1 min
/// ```
fn member_line(index: usize, member: &SeriesMember) -> String {
    let part = member
        .part
        .map(|p| format!(" [part {p}]"))
        .unwrap_or_default();
    format!(
        "{} {}{} · {} min",
        format_index(index),
        member.title,
        part,
        member.reading_time
    )
}

fn link_text(link: Option<&PostLink>) -> String {
    match link {
        Some(l) => format!("{} ({})", l.title, l.slug),
        None => "none".to_string(),
    }
}

fn card_text(card: &NextSeriesCard) -> String {
    format!(
        "{} {} ({})",
        card.icon,
        card.title,
        plural(card.post_count, "post")
    )
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn series_details(series: &Series, depth: usize, lines: &mut Vec<String>) {
    let pad = indent(depth);
    lines.push(format!("{pad}Slug: {}", series.slug));
    lines.push(format!("{pad}Level: {}", series.level));
    if !series.last_updated.is_empty() {
        lines.push(format!("{pad}Updated: {}", series.last_updated));
    }
    for (i, member) in series.posts.iter().enumerate() {
        lines.push(format!("{pad}{}", member_line(i + 1, member)));
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Format the ordered series listing.
pub fn format_listing(catalog: &SeriesCatalog) -> Vec<String> {
    let mut lines = vec!["Series".to_string()];
    if catalog.is_empty() {
        lines.push(format!("{}No series found", indent(1)));
        return lines;
    }
    for (i, series) in catalog.series().iter().enumerate() {
        lines.push(series_header(i + 1, series));
        series_details(series, 1, &mut lines);
    }
    lines
}

pub fn print_listing(catalog: &SeriesCatalog) {
    for line in format_listing(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Series page
// ============================================================================

/// Format a single series page with its neighbours.
pub fn format_series_page(page: &SeriesPage) -> Vec<String> {
    let series = &page.series;
    let mut lines = vec![format!(
        "{} {} ({})",
        series.icon,
        series.title,
        plural(series.post_count, "post")
    )];
    lines.push(format!("{}{}", indent(1), truncate_desc(&series.description, 72)));
    series_details(series, 1, &mut lines);

    let prev = page.prev_series.as_ref().map(card_text);
    let next = page.next_series.as_ref().map(card_text);
    lines.push(format!(
        "{}Previous series: {}",
        indent(1),
        prev.as_deref().unwrap_or("none")
    ));
    lines.push(format!(
        "{}Next series: {}",
        indent(1),
        next.as_deref().unwrap_or("none")
    ));
    lines
}

pub fn print_series_page(page: &SeriesPage) {
    for line in format_series_page(page) {
        println!("{}", line);
    }
}

// ============================================================================
// Post navigation
// ============================================================================

/// Format the navigation context of one post.
pub fn format_post_context(ctx: &PostContext) -> Vec<String> {
    let pad = indent(1);
    let mut lines = vec![format!("{} ({})", ctx.title, ctx.slug)];

    if let Some(series_box) = &ctx.series_box {
        lines.push(format!(
            "{pad}Series: {} (part {} of {})",
            series_box.title, series_box.part, series_box.total
        ));
    }
    lines.push(format!(
        "{pad}Previous: {}",
        link_text(ctx.navigation.prev_post.as_ref())
    ));
    lines.push(format!(
        "{pad}Next: {}",
        link_text(ctx.navigation.next_post.as_ref())
    ));
    if let Some(card) = &ctx.next_series {
        lines.push(format!("{pad}Up next: {}", card_text(card)));
    }
    lines
}

pub fn print_post_context(ctx: &PostContext) {
    for line in format_post_context(ctx) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format a content health report.
pub fn format_check(
    document_count: usize,
    definition_count: Option<usize>,
    catalog: &SeriesCatalog,
    skipped: &[SkippedFile],
) -> Vec<String> {
    let pad = indent(1);
    let mut lines = vec![
        format!("Posts: {document_count}"),
        match definition_count {
            Some(n) => format!("Definitions: {n}"),
            None => "Definitions: none (no series directory)".to_string(),
        },
        format!("Series: {}", catalog.series().len()),
    ];

    if !skipped.is_empty() {
        lines.push(format!("Skipped files: {}", skipped.len()));
        for file in skipped {
            lines.push(format!("{pad}{}: {}", file.path.display(), file.error));
        }
    }
    if !catalog.skipped_definitions.is_empty() {
        lines.push("Definitions without a title:".to_string());
        for source in &catalog.skipped_definitions {
            lines.push(format!("{pad}{source}"));
        }
    }
    if !catalog.slug_collisions().is_empty() {
        lines.push("Slug collisions:".to_string());
        for collision in catalog.slug_collisions() {
            lines.push(format!(
                "{pad}\"{}\": {}",
                collision.slug,
                collision.titles.join(", ")
            ));
        }
    }
    lines
}

pub fn print_check(
    document_count: usize,
    definition_count: Option<usize>,
    catalog: &SeriesCatalog,
    skipped: &[SkippedFile],
) {
    for line in format_check(document_count, definition_count, catalog, skipped) {
        println!("{}", line);
    }
}
