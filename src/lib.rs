//! # Blog Series
//!
//! Series grouping, ordering, and post-to-post navigation for markdown blogs.
//! Posts name their series and part in frontmatter; optional definition files
//! describe each series and fix the order in which series are suggested.
//!
//! # Architecture: Read → Build → Navigate
//!
//! ```text
//! 1. Read      posts/, series/  →  Document[], RawDefinition[]   (store, frontmatter)
//! 2. Build     documents + defs →  SeriesCatalog                 (series, metadata)
//! 3. Navigate  catalog + slug   →  PostContext / SeriesPage      (navigation, views)
//! ```
//!
//! Only stage 1 touches the filesystem, and it does so behind the
//! [`store::DocumentReader`] and [`store::DefinitionReader`] traits. Stages 2
//! and 3 are pure functions recomputed on every call: nothing is cached and no
//! state survives between builds. A caller that wants to reuse a catalog across
//! many pages builds it once and passes it down.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Content readers: `ContentDir` (filesystem) and `MemoryStore` |
//! | [`frontmatter`] | YAML frontmatter splitting and defensive field coercion |
//! | [`series`] | The series builder: grouping, member order, series order |
//! | [`metadata`] | Description/level/icon precedence: definition → fallback → default |
//! | [`navigation`] | Previous/next resolution, last-post and next-series detection |
//! | [`views`] | Post page and series page contexts for templates |
//! | [`slug`] | Series title → URL slug |
//! | [`dates`] | Lenient date parsing for ordering |
//! | [`config`] | `config.toml` loading and validation |
//! | [`types`] | Shared records (`Document`, `Series`, `NavigationResult`, ...) |
//! | [`output`] | CLI text formatting |
//!
//! # Design Decisions
//!
//! ## Total Orders Everywhere
//!
//! Authors duplicate part numbers, forget them, and reuse titles. Every sort in
//! the crate therefore ends in a unique key (the slug), so the same content
//! always produces the same order regardless of the order files were read in.
//!
//! ## Series Navigation Never Leaves the Series
//!
//! The first part of a series has no "previous" link and the last part has no
//! "next" link, even if other posts were published around them. The last part
//! instead suggests the next series in catalog order.
//!
//! ## One Source of Series Order
//!
//! The listing page and the next-series suggestion both read the same
//! [`series::SeriesCatalog`]; there is no second order list to drift out of sync.
//!
//! ## Bad Records Degrade, Builds Don't Fail
//!
//! A post with broken frontmatter, a definition without a title, or an
//! unparseable date is logged (via `tracing`) and skipped or given a safe
//! default. Only a missing posts directory or an invalid `config.toml` stops
//! a build.

pub mod config;
pub mod dates;
pub mod frontmatter;
pub mod metadata;
pub mod navigation;
pub mod output;
pub mod series;
pub mod slug;
pub mod store;
pub mod types;
pub mod views;

#[cfg(test)]
pub(crate) mod test_helpers;
