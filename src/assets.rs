//! Source-asset updating and static copy-through.
//!
//! Two jobs, both thin I/O around the content tree:
//!
//! 1. **Source updates**, run before gathering: convert raster images in the
//!    content `images/` directory to WebP (removing the originals) and
//!    rewrite Markdown references to match. This mutates the source tree.
//! 2. **Copy-through**, run after rendering: images, stylesheets, fonts,
//!    and miscellaneous assets into fixed subdirectories of the output.
//!
//! Conversion uses the `image` crate's pure-Rust codecs — no system
//! dependencies, same as the rest of the binary.

use image::codecs::webp::WebPEncoder;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Content subdirectory holding post images.
pub const IMAGES_DIR: &str = "images";

/// Raster formats that get converted to WebP.
const CONVERTIBLE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("{file}: {source}")]
    Io {
        file: PathBuf,
        source: std::io::Error,
    },
    #[error("{file}: {source}")]
    Image {
        file: PathBuf,
        source: image::ImageError,
    },
    #[error("cannot walk {0}: {1}")]
    Walk(PathBuf, walkdir::Error),
}

fn io_err(file: &Path) -> impl FnOnce(std::io::Error) -> AssetError + '_ {
    move |source| AssetError::Io {
        file: file.to_path_buf(),
        source,
    }
}

/// Update the source tree in place: convert images, then fix references.
///
/// Must run before the gather stage — it changes the Markdown files that
/// gathering reads. Returns the number of images converted.
pub fn update_sources(source_root: &Path) -> Result<u32, AssetError> {
    let converted = convert_images(&source_root.join(IMAGES_DIR))?;
    if converted > 0 {
        rewrite_image_references(source_root)?;
    }
    Ok(converted)
}

/// Convert every JPEG/PNG in `dir` to a sibling `.webp`, removing the
/// original. Missing directory means nothing to convert.
pub fn convert_images(dir: &Path) -> Result<u32, AssetError> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_err(dir))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .is_some_and(|e| CONVERTIBLE_EXTENSIONS.contains(&e.as_str()))
        })
        .collect();
    entries.sort();

    let mut converted = 0;
    for path in &entries {
        let img = image::open(path).map_err(|source| AssetError::Image {
            file: path.clone(),
            source,
        })?;
        let webp_path = path.with_extension("webp");
        let writer = BufWriter::new(File::create(&webp_path).map_err(io_err(&webp_path))?);
        img.write_with_encoder(WebPEncoder::new_lossless(writer))
            .map_err(|source| AssetError::Image {
                file: webp_path.clone(),
                source,
            })?;
        fs::remove_file(path).map_err(io_err(path))?;
        converted += 1;
    }
    Ok(converted)
}

/// Rewrite `.jpg`/`.jpeg`/`.png` references to `.webp` in every Markdown
/// file under the source root. Files are only rewritten when something
/// actually changed, to keep mtimes (and watch triggers) quiet.
pub fn rewrite_image_references(source_root: &Path) -> Result<u32, AssetError> {
    let mut rewritten = 0;
    for entry in WalkDir::new(source_root).sort_by_file_name() {
        let entry = entry.map_err(|e| AssetError::Walk(source_root.to_path_buf(), e))?;
        if !entry.file_type().is_file()
            || entry
                .path()
                .extension()
                .is_none_or(|e| !e.eq_ignore_ascii_case("md"))
        {
            continue;
        }
        let path = entry.path();
        let original = fs::read_to_string(path).map_err(io_err(path))?;
        let updated = original
            .replace(".jpeg", ".webp")
            .replace(".jpg", ".webp")
            .replace(".png", ".webp");
        if updated != original {
            fs::write(path, updated).map_err(io_err(path))?;
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

/// Copy static assets into the output tree.
///
/// Images come from the content root; stylesheets, fonts, and misc assets
/// from the builder-side assets root. Each lands under a fixed output
/// subdirectory. Missing source directories are skipped — a site without
/// custom fonts is not an error.
pub fn copy_static(
    source_root: &Path,
    assets_root: &Path,
    out_root: &Path,
) -> Result<(), AssetError> {
    copy_flat(&source_root.join(IMAGES_DIR), &out_root.join("images"), None)?;
    copy_flat(
        &assets_root.join("css"),
        &out_root.join("css"),
        Some(&["css", "map"]),
    )?;
    copy_flat(&assets_root.join("fonts"), &out_root.join("fonts"), None)?;
    copy_flat(&assets_root.join("assets"), &out_root.join("assets"), None)?;
    Ok(())
}

/// Copy the files of `src` (non-recursive) into `dst`, optionally filtered
/// by extension.
fn copy_flat(src: &Path, dst: &Path, extensions: Option<&[&str]>) -> Result<(), AssetError> {
    if !src.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dst).map_err(io_err(dst))?;
    for entry in fs::read_dir(src).map_err(io_err(src))? {
        let entry = entry.map_err(io_err(src))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(exts) = extensions {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if !exts.contains(&ext.as_str()) {
                continue;
            }
        }
        let target = dst.join(entry.file_name());
        fs::copy(&path, &target).map_err(io_err(&target))?;
    }
    Ok(())
}
