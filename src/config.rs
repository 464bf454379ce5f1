//! Build configuration.
//!
//! One explicit struct passed into the pipeline at construction — no global
//! paths. Defaults suit the conventional layout (content next to the
//! builder checkout); a `config.toml` in the working directory can override
//! any path, and CLI flags override that.
//!
//! ```toml
//! # config.toml — all keys optional
//! source = "content"   # posts/ and images/ live here
//! output = "public"    # wiped and rebuilt every run
//! assets = "."         # css/, fonts/, assets/ live here
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("cannot parse {0}: {1}")]
    Toml(PathBuf, toml::de::Error),
}

/// Everything a run needs to know. Constructed once in `main`, immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content root: `posts/` and `images/` subtrees.
    pub source_root: PathBuf,
    /// Output root. Destroyed and repopulated on every run.
    pub output_root: PathBuf,
    /// Builder-side static files: `css/`, `fonts/`, `assets/`.
    pub assets_root: PathBuf,
    /// Continuous rebuild on filesystem change.
    pub watch: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_root: "content".into(),
            output_root: "public".into(),
            assets_root: ".".into(),
            watch: false,
        }
    }
}

/// Sparse overrides from `config.toml`. Unknown keys are rejected to catch
/// typos early.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    source: Option<PathBuf>,
    output: Option<PathBuf>,
    assets: Option<PathBuf>,
}

impl BuildConfig {
    /// Defaults, then `dir/config.toml` overrides if the file exists.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            let text = fs::read_to_string(&path).map_err(|e| ConfigError::Io(path.clone(), e))?;
            let file: ConfigFile =
                toml::from_str(&text).map_err(|e| ConfigError::Toml(path.clone(), e))?;
            if let Some(source) = file.source {
                config.source_root = source;
            }
            if let Some(output) = file.output {
                config.output_root = output;
            }
            if let Some(assets) = file.assets {
                config.assets_root = assets;
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = BuildConfig::load(tmp.path()).unwrap();
        assert_eq!(config.source_root, PathBuf::from("content"));
        assert_eq!(config.output_root, PathBuf::from("public"));
        assert!(!config.watch);
    }

    #[test]
    fn file_overrides_are_sparse() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "output = \"dist\"\n").unwrap();
        let config = BuildConfig::load(tmp.path()).unwrap();
        assert_eq!(config.output_root, PathBuf::from("dist"));
        assert_eq!(config.source_root, PathBuf::from("content"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "outpot = \"dist\"\n").unwrap();
        assert!(matches!(
            BuildConfig::load(tmp.path()),
            Err(ConfigError::Toml(..))
        ));
    }
}
