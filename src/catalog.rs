//! Catalog assembly — the gather stage.
//!
//! Walks the `posts` subtree of the source root, runs every Markdown file
//! through parse → validate → normalize, resolves versions, and returns the
//! records sorted by date descending. That final order is the one rendering
//! and any aggregate view (feed, home) consume.
//!
//! One bad file fails the whole gather. There is no per-file partial
//! success: content errors block the site from republishing.

use crate::frontmatter::{self, FrontmatterError};
use crate::normalize::{self, NormalizeError};
use crate::types::ContentRecord;
use crate::validate::{self, ValidateError};
use crate::versions;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Subdirectory of the source root holding the Markdown posts.
pub const POSTS_DIR: &str = "posts";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{file}: {source}")]
    Io {
        file: PathBuf,
        source: std::io::Error,
    },
    #[error("{file}: {source}")]
    Frontmatter {
        file: PathBuf,
        source: FrontmatterError,
    },
    #[error(transparent)]
    Validate(#[from] ValidateError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("cannot walk posts directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// The complete, ordered record set driving page generation.
///
/// Immutable once built: rendering only reads it.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<ContentRecord>,
}

impl Catalog {
    /// Records in date-descending order.
    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pretty JSON dump of the whole catalog, for debugging.
    pub fn debug_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}

/// Build the catalog from the source root.
///
/// A missing `posts` directory is treated as an empty corpus, not an error —
/// the site still builds with only static assets.
pub fn gather(source_root: &Path) -> Result<Catalog, CatalogError> {
    let posts_dir = source_root.join(POSTS_DIR);
    if !posts_dir.is_dir() {
        return Ok(Catalog { records: vec![] });
    }

    // Collect and sort paths up front so everything downstream (including
    // the version tie-break) sees one deterministic enumeration order.
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(&posts_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("md"))
        {
            files.push(entry.into_path());
        }
    }
    files.sort();

    let mut records = Vec::with_capacity(files.len());
    for file in &files {
        let text = fs::read_to_string(file).map_err(|source| CatalogError::Io {
            file: file.clone(),
            source,
        })?;
        let (meta, body) =
            frontmatter::parse(&text).map_err(|source| CatalogError::Frontmatter {
                file: file.clone(),
                source,
            })?;
        validate::validate(file, &meta)?;
        records.push(normalize::normalize(file, meta, body)?);
    }

    let mut records = versions::resolve(records);
    records.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(Catalog { records })
}
