//! Content normalization.
//!
//! Turns a validated [`RawMetadata`] plus its source file into a
//! [`ContentRecord`] with every computed field filled in: URL slug, title,
//! parsed date and location, and the rendered HTML body. Normalization is
//! strictly per-record — nothing here looks at other records, so order
//! doesn't matter (version resolution runs afterwards).

use crate::types::{
    ContentRecord, Location, PageType, RawMetadata, DATE_FORMAT, HOME_URL,
};
use crate::typography;
use chrono::NaiveDateTime;
use pulldown_cmark::{html as md_html, Options, Parser};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("{file}: bad date `{value}` (expected YYYY-MM-DD-HH-MM-SS)")]
    Date { file: PathBuf, value: String },
    #[error("{file}: bad location `{value}` (expected `lat,lon`)")]
    Location { file: PathBuf, value: String },
    #[error("{file}: unknown page type `{value}`")]
    UnknownPageType { file: PathBuf, value: String },
}

/// Build a normalized record from validated front matter.
///
/// The caller must have run [`crate::validate::validate`] first: this
/// function trusts that required fields are present.
pub fn normalize(
    file: &Path,
    meta: RawMetadata,
    body: String,
) -> Result<ContentRecord, NormalizeError> {
    let kind_str = meta.kind.unwrap_or_default();
    let kind = PageType::parse(&kind_str).ok_or_else(|| NormalizeError::UnknownPageType {
        file: file.to_path_buf(),
        value: kind_str.clone(),
    })?;

    // The slug is the filename stem; the home page is pinned to the site
    // root's default document.
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let url = if kind == PageType::Home {
        HOME_URL.to_string()
    } else {
        stem.clone()
    };

    let title = match meta.title.filter(|t| !t.is_empty()) {
        Some(t) => typography::clean(&t),
        None => typography::clean(&title_from_slug(&stem)),
    };
    let description = typography::clean(meta.description.as_deref().unwrap_or_default());

    let raw_date = meta.date.unwrap_or_default();
    let date = NaiveDateTime::parse_from_str(&raw_date, DATE_FORMAT).map_err(|_| {
        NormalizeError::Date {
            file: file.to_path_buf(),
            value: raw_date.clone(),
        }
    })?;

    let location = meta
        .location
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| parse_location(file, s))
        .transpose()?;

    let html = render_markdown(&body);

    Ok(ContentRecord {
        identifier: meta.uuid,
        kind,
        title,
        description,
        tags: meta.tags,
        raw_date,
        date,
        location,
        image: meta.image,
        image_alt: meta.image_alt,
        body,
        html,
        url,
        versions: 1,
        latest: true,
        source: file.to_path_buf(),
    })
}

/// Render a Markdown body to HTML.
///
/// Smart punctuation is the typographic-correction pass for bodies: the
/// renderer itself produces curly quotes, en/em dashes, and ellipses.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_SMART_PUNCTUATION);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

/// Derive a display title from a slug: separators become spaces, words get
/// capitalized. `on-writing-well` → `On Writing Well`.
fn title_from_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_location(file: &Path, value: &str) -> Result<Location, NormalizeError> {
    let err = || NormalizeError::Location {
        file: file.to_path_buf(),
        value: value.to_string(),
    };
    let (lat, lon) = value.split_once(',').ok_or_else(err)?;
    Ok(Location {
        latitude: lat.trim().parse().map_err(|_| err())?,
        longitude: lon.trim().parse().map_err(|_| err())?,
    })
}
