//! Shared types for the build pipeline.
//!
//! These flow from the gather stage (frontmatter → validate → normalize →
//! versions) into rendering, and are serialized to JSON for the debug dump,
//! so they must stay `Serialize`-clean.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Timestamp format used by post dates and filename prefixes:
/// `2023-05-05-10-00-00`.
pub const DATE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// URL slug forced onto the `home` page so it lands at the site root's
/// default document.
pub const HOME_URL: &str = "index";

/// Which template a record renders with.
///
/// This is a closed set: a post declaring any other type is a content error
/// caught during normalization, not something to silently skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Home,
    Essay,
    Long,
    Short,
    Feed,
    Other,
}

impl PageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Self::Home),
            "essay" => Some(Self::Essay),
            "long" => Some(Self::Long),
            "short" => Some(Self::Short),
            "feed" => Some(Self::Feed),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Template selector handed to the template engine.
    pub fn template(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Essay => "essay",
            Self::Long => "long",
            Self::Short => "short",
            Self::Feed => "feed",
            Self::Other => "other",
        }
    }
}

/// Geolocation parsed from a `"lat,lon"` front-matter string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw front-matter fields as authored, before validation.
///
/// Everything is optional here — required-field enforcement is the
/// validator's job, so a missing key produces a named validation error
/// instead of a YAML decode error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub uuid: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub location: Option<String>,
}

/// One fully-processed source document.
///
/// Built once per run by the gather stage; immutable after catalog assembly
/// except for the version fields, which the resolver fills in.
#[derive(Debug, Clone, Serialize)]
pub struct ContentRecord {
    /// Stable key grouping revisions of the same logical content.
    /// Absent means the record is never superseded.
    pub identifier: Option<String>,
    pub kind: PageType,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Date string exactly as authored; short posts must match it to the
    /// filename and title.
    pub raw_date: String,
    pub date: NaiveDateTime,
    pub location: Option<Location>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    /// Raw Markdown body.
    #[serde(skip)]
    pub body: String,
    /// Rendered, typography-corrected HTML body.
    pub html: String,
    /// Output path stem. File stem of the source, except `home` which is
    /// forced to [`HOME_URL`].
    pub url: String,
    /// How many records share this identifier (1 for singletons).
    pub versions: u32,
    /// True for exactly one record per identifier group: the most recent.
    pub latest: bool,
    /// Source file, for error reporting and the version tie-break.
    pub source: PathBuf,
}
