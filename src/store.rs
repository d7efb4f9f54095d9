//! Content stores: where documents and series definitions come from.
//!
//! The series builder never touches the filesystem itself. It is handed
//! readers implementing [`DocumentReader`] and [`DefinitionReader`]:
//!
//! - [`ContentDir`] reads `posts/*.md` and `series/*.md` under a content root.
//! - [`MemoryStore`] holds already-parsed records, for tests and for callers
//!   that get their content from somewhere else.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                # Optional, see crate::config
//! ├── posts/
//! │   ├── spring-intro.md        # slug "spring-intro"
//! │   └── beans-explained.md
//! └── series/                    # Optional
//!     └── spring-core.md         # frontmatter: title, description, level, icon, order
//! ```
//!
//! Only `.md` files directly inside each directory are read; hidden files are
//! ignored. Files are parsed in parallel and returned in file-name order.
//! A file that can't be read or parsed is logged and skipped; only a missing
//! posts directory fails the whole load.

use crate::config::SiteConfig;
use crate::frontmatter::{FrontmatterError, parse_definition, parse_document};
use crate::series::{SeriesCatalog, build_series};
use crate::types::{Document, RawDefinition};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Posts directory not found: {0}")]
    MissingPostsDir(PathBuf),
}

/// Why a single file was left out of a load.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
}

/// A file that was skipped, with the reason.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: FileError,
}

/// Records read from one directory plus the files that had to be skipped.
#[derive(Debug)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub skipped: Vec<SkippedFile>,
}

/// Supplies the full document set for a build.
pub trait DocumentReader {
    fn read_documents(&self) -> Result<Vec<Document>, StoreError>;
}

/// Supplies raw series definitions. `Ok(None)` means there is no definition
/// store at all, which is distinct from an empty one only for logging.
pub trait DefinitionReader {
    fn read_definitions(&self) -> Result<Option<Vec<RawDefinition>>, StoreError>;
}

/// Posts and series directories on disk.
#[derive(Debug, Clone)]
pub struct ContentDir {
    pub posts: PathBuf,
    pub series: PathBuf,
}

impl ContentDir {
    pub fn new(posts: impl Into<PathBuf>, series: impl Into<PathBuf>) -> Self {
        Self {
            posts: posts.into(),
            series: series.into(),
        }
    }

    /// Directories as configured, relative to `root`.
    pub fn from_config(root: &Path, config: &SiteConfig) -> Self {
        Self::new(root.join(&config.posts_dir), root.join(&config.series_dir))
    }

    /// Read every post, keeping track of skipped files.
    pub fn load_documents(&self) -> Result<Loaded<Document>, StoreError> {
        if !self.posts.is_dir() {
            return Err(StoreError::MissingPostsDir(self.posts.clone()));
        }
        let files = markdown_files(&self.posts)?;
        Ok(parse_all(&files, |path, text| {
            parse_document(&file_stem(path), text)
        }))
    }

    /// Read every series definition. `None` if the series directory is absent.
    pub fn load_definitions(&self) -> Result<Option<Loaded<RawDefinition>>, StoreError> {
        if !self.series.is_dir() {
            debug!(dir = %self.series.display(), "no series directory");
            return Ok(None);
        }
        let files = markdown_files(&self.series)?;
        Ok(Some(parse_all(&files, |path, text| {
            parse_definition(&file_name(path), text)
        })))
    }
}

impl DocumentReader for ContentDir {
    fn read_documents(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.load_documents()?.items)
    }
}

impl DefinitionReader for ContentDir {
    fn read_definitions(&self) -> Result<Option<Vec<RawDefinition>>, StoreError> {
        Ok(self.load_definitions()?.map(|loaded| loaded.items))
    }
}

/// Already-parsed content held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub documents: Vec<Document>,
    pub definitions: Option<Vec<RawDefinition>>,
}

impl MemoryStore {
    pub fn new(documents: Vec<Document>, definitions: Option<Vec<RawDefinition>>) -> Self {
        Self {
            documents,
            definitions,
        }
    }
}

impl DocumentReader for MemoryStore {
    fn read_documents(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents.clone())
    }
}

impl DefinitionReader for MemoryStore {
    fn read_definitions(&self) -> Result<Option<Vec<RawDefinition>>, StoreError> {
        Ok(self.definitions.clone())
    }
}

/// Everything one build needs: the documents and the catalog derived from them.
#[derive(Debug, Clone)]
pub struct Site {
    pub documents: Vec<Document>,
    pub catalog: SeriesCatalog,
}

/// Read content through the given readers and build the series catalog.
pub fn load_site(
    documents: &dyn DocumentReader,
    definitions: &dyn DefinitionReader,
    config: &SiteConfig,
) -> Result<Site, StoreError> {
    let documents = documents.read_documents()?;
    let definitions = definitions.read_definitions()?;
    let catalog = build_series(
        &documents,
        definitions.as_deref(),
        &config.fallback,
        config.words_per_minute,
    );
    Ok(Site { documents, catalog })
}

/// `.md` files directly inside `dir`, sorted by file name, hidden files excluded.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        let is_markdown = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("md"));
        if entry.file_type().is_file() && is_markdown && !name.starts_with('.') {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Read and parse files in parallel. Output keeps the input order.
fn parse_all<T, F>(files: &[PathBuf], parse: F) -> Loaded<T>
where
    T: Send,
    F: Fn(&Path, &str) -> Result<T, FrontmatterError> + Sync,
{
    let results: Vec<Result<T, SkippedFile>> = files
        .par_iter()
        .map(|path| {
            let parsed = fs::read_to_string(path)
                .map_err(FileError::from)
                .and_then(|text| parse(path, &text).map_err(FileError::from));
            parsed.map_err(|error| SkippedFile {
                path: path.clone(),
                error,
            })
        })
        .collect();

    let mut loaded = Loaded {
        items: Vec::with_capacity(results.len()),
        skipped: Vec::new(),
    };
    for result in results {
        match result {
            Ok(item) => loaded.items.push(item),
            Err(skipped) => {
                warn!(path = %skipped.path.display(), error = %skipped.error, "skipping file");
                loaded.skipped.push(skipped);
            }
        }
    }
    loaded
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
