//! The publish pipeline.
//!
//! One run is one linear sequence of stages:
//!
//! ```text
//! update source assets → gather catalog → wipe output → render pages → copy static
//! ```
//!
//! Error policy: any failure while updating sources or gathering aborts the
//! run before the output directory is touched, so the previous site stays
//! published. Once the wipe begins there is no rollback — a failure
//! mid-write leaves a partial site, an accepted cost of the
//! full-rebuild-every-time design.

use crate::assets::{self, AssetError};
use crate::catalog::{self, CatalogError};
use crate::config::BuildConfig;
use crate::render::{self, RenderError, TemplateEngine};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("cannot prepare output directory {0}: {1}")]
    Output(PathBuf, std::io::Error),
    #[error("cannot write debug dump {0}: {1}")]
    DebugDump(PathBuf, std::io::Error),
    #[error("cannot serialize debug dump: {0}")]
    DebugJson(#[from] serde_json::Error),
}

/// What a successful run did, for the one-line CLI report.
#[derive(Debug)]
pub struct BuildReport {
    pub pages: usize,
    pub images_converted: u32,
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn summary(&self) -> String {
        format!(
            "Done! {} pages, {} images converted. Build time: {} ms",
            self.pages,
            self.images_converted,
            self.elapsed.as_millis()
        )
    }
}

/// Run the full pipeline once.
///
/// `debug_dump`, when set, receives a pretty-JSON dump of the catalog after
/// a successful gather — handy while iterating on content in watch mode.
pub fn build(
    config: &BuildConfig,
    engine: &dyn TemplateEngine,
    debug_dump: Option<&Path>,
) -> Result<BuildReport, BuildError> {
    let start = Instant::now();

    // Mutates the source tree, so it must precede gathering.
    let images_converted = assets::update_sources(&config.source_root)?;

    // Everything that can reject content happens here, before the previous
    // output is destroyed.
    let catalog = catalog::gather(&config.source_root)?;

    if let Some(path) = debug_dump {
        let json = catalog.debug_json()?;
        fs::write(path, json).map_err(|e| BuildError::DebugDump(path.to_path_buf(), e))?;
    }

    // Point of no return.
    let out = &config.output_root;
    if out.exists() {
        fs::remove_dir_all(out).map_err(|e| BuildError::Output(out.clone(), e))?;
    }
    fs::create_dir_all(out).map_err(|e| BuildError::Output(out.clone(), e))?;

    let now = chrono::Local::now().naive_local();
    let written = render::write_pages(engine, &catalog, out, now)?;

    assets::copy_static(&config.source_root, &config.assets_root, out)?;

    Ok(BuildReport {
        pages: written.len(),
        images_converted,
        elapsed: start.elapsed(),
    })
}
