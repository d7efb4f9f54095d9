//! Series title → URL slug normalization.
//!
//! `"Getting Started With Spring Boot"` becomes `getting-started-with-spring-boot`.
//! Only `[a-z0-9]` survive; every other run of characters (spaces, punctuation,
//! non-ASCII letters) collapses into a single dash, and leading/trailing dashes
//! are stripped.
//!
//! Titles made entirely of punctuation normalize to the empty string. Two such
//! series would share the slug `""`; the builder reports that as a collision
//! instead of inventing a disambiguation (see [`crate::series::SeriesCatalog::slug_collisions`]).

/// Convert a series title to its URL slug.
///
/// Idempotent: `to_slug(&to_slug(x)) == to_slug(x)`.
pub fn to_slug(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}
