//! # Pressgang
//!
//! A minimal static site generator for a single personal website. Posts are
//! Markdown files with YAML front matter; every run republishes the whole
//! site from scratch.
//!
//! # Architecture: One Linear Pipeline
//!
//! ```text
//! update assets → gather catalog → wipe output → render pages → copy static
//! ```
//!
//! There is no incremental build, no plugin system, and no multi-site
//! support — deliberately. At personal-site scale a full rebuild takes
//! milliseconds, and rebuilding everything every time removes the cache
//! invalidation problem by construction. The only complexity worth keeping
//! is in the content model: posts carry a stable identifier so revisions of
//! the same piece can coexist, with exactly one marked as the latest.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Splits a post into YAML metadata and Markdown body |
//! | [`validate`] | Required-field and cross-field rules; any violation aborts the run |
//! | [`normalize`] | Computed fields: slug, title, date, location, rendered HTML |
//! | [`versions`] | Marks the latest revision per identifier group |
//! | [`catalog`] | Walks the posts tree and assembles the ordered record set |
//! | [`render`] | Per-page-type maud templates and output-path derivation |
//! | [`assets`] | WebP conversion, Markdown reference rewriting, static copy-through |
//! | [`build`] | The pipeline orchestrator and its fatal-vs-recoverable policy |
//! | [`watch`] | Debounced full-rebuild-on-change loop |
//! | [`config`] | The explicit `BuildConfig` passed into every run |
//! | [`types`] | `ContentRecord` and friends, shared across stages |
//! | [`typography`] | Entity decoding and smart punctuation for metadata text |
//!
//! # Design Decisions
//!
//! ## Stop-And-Fix Over Partial Publish
//!
//! Every content error — missing front-matter field, malformed date, a
//! short post whose filename disagrees with its title — fails the entire
//! run before the previous output directory is touched. With one author
//! and a hand-curated corpus, "fix the source file" beats "publish
//! something possibly wrong" every time.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, interpolation is
//! auto-escaped, and there is no template directory to ship or get out of
//! sync. The engine sits behind the [`render::TemplateEngine`] trait so
//! tests can substitute a deterministic stub.
//!
//! ## Pure-Rust Imaging
//!
//! Image conversion uses the `image` crate's codecs — no ImageMagick, no
//! system dependencies. The binary is fully self-contained.

pub mod assets;
pub mod build;
pub mod catalog;
pub mod config;
pub mod frontmatter;
pub mod normalize;
pub mod render;
pub mod types;
pub mod typography;
pub mod validate;
pub mod versions;
pub mod watch;
