//! Project configuration management for `pagepack.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── output     # [output]
//! │   ├── pages      # [pages]
//! │   ├── resolve    # [resolve]
//! │   └── serve      # [serve]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # ProjectConfig (this file)
//! ```
//!
//! A project without `pagepack.toml` is valid: every section has defaults
//! matching the conventional `src/pages` layout.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{OutputConfig, PagesConfig, ResolveConfig, ServeConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config, reload_config};

use crate::{cli::Cli, debug, log, utils::path::normalize_path};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pagepack.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file, which may not exist (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Page discovery settings
    #[serde(default)]
    pub pages: PagesConfig,

    /// Bundle output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Module resolution settings
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Dev-server descriptor settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl ProjectConfig {
    /// Load configuration from CLI arguments.
    ///
    /// With `--root`, the config file is looked up inside that directory.
    /// Otherwise it is searched upward from cwd and its parent directory
    /// becomes the project root. No config file means defaults rooted at
    /// cwd (or `--root`).
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let (config_path, root) = Self::resolve_paths(cli, &cwd);
        if cli.root.is_some() && !root.is_dir() {
            return Err(ConfigError::Validation(format!(
                "project root `{}` is not a directory",
                root.display()
            ))
            .into());
        }

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            debug!("config"; "{} not found, using defaults", config_path.display());
            Self::default()
        };

        config.config_path = normalize_path(&config_path);
        config.cli = Some(cli);
        config.set_root(&normalize_path(&root));
        config.validate()?;

        Ok(config)
    }

    /// Resolve `(config_path, root)` for the given CLI arguments.
    fn resolve_paths(cli: &Cli, cwd: &Path) -> (PathBuf, PathBuf) {
        if let Some(root) = &cli.root {
            let root = cwd.join(root);
            let config_path = if cli.config.is_absolute() {
                cli.config.clone()
            } else {
                root.join(&cli.config)
            };
            return (config_path, root);
        }

        match find_config_file(&cli.config) {
            Some(path) => {
                let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                (path, root)
            }
            None => (cwd.join(&cli.config), cwd.to_path_buf()),
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute page root directory.
    pub fn page_root(&self) -> PathBuf {
        self.root_join(&self.pages.root)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.pages.validate(&mut diag);
        self.output.validate(&mut diag);
        self.serve.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ProjectConfig {
    let (parsed, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Default config rooted at `root`.
#[cfg(test)]
pub fn test_config_at(root: &Path) -> ProjectConfig {
    let mut config = ProjectConfig::default();
    config.set_root(root);
    config.config_path = root.join("pagepack.toml");
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::parse_from(args)))
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(ProjectConfig::parse_with_ignored("[pages\nroot = \"src\"").is_err());
    }

    #[test]
    fn test_parse_empty_is_default() {
        let config = test_parse_config("");
        assert_eq!(config.pages.home, "home");
        assert_eq!(config.serve.port, 4000);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[pages]\nhome = \"index\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.pages.home, "index");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = ProjectConfig::parse_with_ignored("[serve]\nport = 1234").unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_validate_reports_every_section() {
        let config = test_parse_config("[pages]\nhome = \"\"\n[serve]\nport = 0");
        let err = config.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pages.home"));
        assert!(msg.contains("serve.port"));
    }

    #[test]
    fn test_page_root() {
        let config = test_config_at(Path::new("/project"));
        assert_eq!(config.page_root(), PathBuf::from("/project/src/pages"));
    }

    #[test]
    fn test_load_with_root_and_config_file() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(
            temp.path().join("pagepack.toml"),
            "[pages]\nhome = \"landing\"\n[serve]\nport = 5000",
        )
        .unwrap();

        let root = temp.path().to_str().unwrap();
        let cli = leak_cli(&["pagepack", "--root", root, "pages"]);
        let config = ProjectConfig::load(cli).unwrap();

        assert_eq!(config.pages.home, "landing");
        assert_eq!(config.serve.port, 5000);
        assert_eq!(config.get_root(), normalize_path(temp.path()));
        assert!(config.cli.is_some());
    }

    #[test]
    fn test_load_without_config_file_uses_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = temp.path().to_str().unwrap();
        let cli = leak_cli(&["pagepack", "--root", root, "pages"]);
        let config = ProjectConfig::load(cli).unwrap();

        assert_eq!(config.pages.root, PathBuf::from("src/pages"));
        assert!(!config.config_path.exists());
    }

    #[test]
    fn test_load_missing_root_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let cli = leak_cli(&["pagepack", "--root", missing.to_str().unwrap(), "pages"]);

        let err = ProjectConfig::load(cli).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_load_invalid_config_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join("pagepack.toml"), "[serve]\nport = 0").unwrap();

        let root = temp.path().to_str().unwrap();
        let cli = leak_cli(&["pagepack", "--root", root, "pages"]);
        assert!(ProjectConfig::load(cli).is_err());
    }
}
