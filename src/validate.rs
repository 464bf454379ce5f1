//! Content validation.
//!
//! Runs against raw front matter before any normalization. Every rule is
//! fatal to the whole run: a broken post blocks the entire site from
//! republishing rather than silently publishing a broken page.

use crate::types::RawMetadata;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("{file}: front matter has no `{field}`")]
    MissingField { file: PathBuf, field: &'static str },
    #[error("{file}: front matter has an image but no image-alt description")]
    ImageWithoutAlt { file: PathBuf },
    #[error("{file}: short posts require the file name, title, and date to match")]
    ShortPostMismatch { file: PathBuf },
}

/// Check required-field and cross-field rules for one post.
///
/// `file` is the source path, used both in error messages and for the
/// short-post rule, which compares against the filename stem.
pub fn validate(file: &Path, meta: &RawMetadata) -> Result<(), ValidateError> {
    let missing = |field| ValidateError::MissingField {
        file: file.to_path_buf(),
        field,
    };

    if meta.description.as_deref().is_none_or(str::is_empty) {
        return Err(missing("description"));
    }
    if meta.tags.is_empty() {
        return Err(missing("tags"));
    }
    if meta.uuid.as_deref().is_none_or(str::is_empty) {
        return Err(missing("uuid"));
    }
    if meta.date.as_deref().is_none_or(str::is_empty) {
        return Err(missing("date"));
    }
    if meta.kind.as_deref().is_none_or(str::is_empty) {
        return Err(missing("type"));
    }

    if meta.image.is_some() && meta.image_alt.as_deref().is_none_or(str::is_empty) {
        return Err(ValidateError::ImageWithoutAlt {
            file: file.to_path_buf(),
        });
    }

    // Short posts are named by their timestamp: the filename stem, the
    // title, and the date string must agree exactly.
    if meta.kind.as_deref() == Some("short") {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let matches = meta.title.as_deref() == Some(stem.as_ref())
            && meta.title.as_deref() == meta.date.as_deref();
        if !matches {
            return Err(ValidateError::ShortPostMismatch {
                file: file.to_path_buf(),
            });
        }
    }

    Ok(())
}
