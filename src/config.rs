//! Site configuration module.
//!
//! Loads and validates an optional `config.toml` in the content root. User
//! values are merged over the stock defaults, so a config file only needs the
//! keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! posts_dir = "posts"       # Post markdown files, relative to the content root
//! series_dir = "series"     # Series definition files (may be absent)
//! words_per_minute = 200    # Reading speed used for reading-time estimates
//!
//! [fallback]
//! # Series order used when no series definition files exist
//! order = ["Getting Started With Spring Boot", "Spring Core Concepts"]
//!
//! # Metadata for series without a definition file, keyed by exact title
//! [fallback.series."Spring Core Concepts"]
//! description = "Deep dive into Spring Framework internals, ..."
//! level = "Intermediate"
//! icon = "🎓"
//! ```
//!
//! ## Partial Configuration
//!
//! Tables merge key by key; arrays replace. Adding a
//! `[fallback.series."My Series"]` table extends the built-in fallback table
//! (and can override an existing title), while setting `fallback.order`
//! replaces the whole list.
//!
//! Unknown keys are rejected to catch typos early.

use crate::metadata::Fallbacks;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding post markdown files, relative to the content root.
    pub posts_dir: String,
    /// Directory holding series definition files. Missing is fine.
    pub series_dir: String,
    /// Reading speed for reading-time estimates.
    pub words_per_minute: u32,
    /// Series order and metadata used when definitions don't cover a series.
    pub fallback: Fallbacks,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            series_dir: "series".to_string(),
            words_per_minute: 200,
            fallback: Fallbacks::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "words_per_minute must be greater than 0".into(),
            ));
        }
        if self.posts_dir.trim().is_empty() {
            return Err(ConfigError::Validation("posts_dir must not be empty".into()));
        }
        if self.posts_dir == self.series_dir {
            return Err(ConfigError::Validation(
                "posts_dir and series_dir must differ".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if there is no config file.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from the content root: stock defaults, overlaid with the
/// user's `config.toml` if present, then validated.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# blog-series configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory of post markdown files, relative to the content root.
posts_dir = "posts"

# Directory of series definition files. Each file's frontmatter declares
# title, description, level, icon and order. The directory may be absent.
series_dir = "series"

# Reading speed used for reading-time estimates (minutes rounded up).
words_per_minute = 200

# ---------------------------------------------------------------------------
# Fallbacks for series without definition files
# ---------------------------------------------------------------------------
[fallback]
# Series order used only when no series definition files exist.
# Series not listed here sort after listed ones, alphabetically.
order = ["Getting Started With Spring Boot", "Spring Core Concepts"]

# Metadata keyed by exact series title. Tables you add here extend this list.
[fallback.series."Getting Started With Spring Boot"]
description = "A beginner-friendly introduction to Spring Boot, covering fundamentals and core concepts."
level = "Beginner"
icon = "🚀"

[fallback.series."Spring Core Concepts"]
description = "Deep dive into Spring Framework internals, beans, dependency injection, and advanced concepts."
level = "Intermediate"
icon = "🎓"
"##
}
