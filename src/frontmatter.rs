//! Front-matter parsing.
//!
//! Every post starts with a YAML metadata block fenced by `---` markers:
//!
//! ```text
//! ---
//! description: A post about nothing
//! tags: [misc]
//! uuid: 9f1c...
//! date: 2023-05-05-10-00-00
//! type: essay
//! ---
//! Markdown body...
//! ```
//!
//! This module only splits the document and decodes the YAML. Field
//! semantics (required keys, cross-field rules) belong to [`crate::validate`].

use crate::types::RawMetadata;
use thiserror::Error;

/// Delimits the metadata block. Must appear at least twice.
const MARKER: &str = "---";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("no front-matter block: expected two `---` markers")]
    MissingMarker,
    #[error("invalid metadata: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a source document into decoded metadata and raw Markdown body.
///
/// Anything before the first marker is discarded; the body keeps everything
/// after the second marker verbatim, further `---` runs included (they are
/// thematic breaks in Markdown).
pub fn parse(text: &str) -> Result<(RawMetadata, String), FrontmatterError> {
    let mut parts = text.splitn(3, MARKER);
    let _preamble = parts.next();
    let yaml = parts.next().ok_or(FrontmatterError::MissingMarker)?;
    let body = parts.next().ok_or(FrontmatterError::MissingMarker)?;

    let metadata: RawMetadata = serde_yaml::from_str(yaml)?;
    Ok((metadata, body.to_string()))
}
