//! `[pages]` section configuration.
//!
//! Describes where pages live and how they are discovered.
//!
//! # Example
//!
//! ```toml
//! [pages]
//! root = "src/pages"          # Page root (relative to project root)
//! scripts = "**/*.js"         # Entry script glob (relative to page root)
//! templates = "**/*.html"     # Template glob (relative to page root)
//! home = "home"               # Page directory served for "/"
//! vendors = ["vue"]           # Modules bundled into the shared `vendors` entry
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Page discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Page root directory. Its path is also the prefix stripped from keys.
    pub root: PathBuf,

    /// Glob for entry scripts, relative to `root`.
    pub scripts: String,

    /// Glob for page templates, relative to `root`.
    pub templates: String,

    /// Page directory key that the dev server serves for `/`.
    pub home: String,

    /// Modules of the shared `vendors` entry.
    pub vendors: Vec<String>,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src/pages"),
            scripts: "**/*.js".into(),
            templates: "**/*.html".into(),
            home: "home".into(),
            vendors: vec!["vue".into()],
        }
    }
}

impl PagesConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.root.is_absolute() {
            diag.error_with_hint(
                FieldPath::new("pages.root"),
                format!("must be relative to the project root, got `{}`", self.root.display()),
                "use a path like \"src/pages\"",
            );
        }

        if self.home.trim_matches('/').is_empty() {
            diag.error(FieldPath::new("pages.home"), "must name a page directory");
        }

        if self.vendors.is_empty() {
            diag.error_with_hint(
                FieldPath::new("pages.vendors"),
                "must list at least one module",
                "the default is [\"vue\"]",
            );
        }

        for (field, pattern) in [
            (FieldPath::new("pages.scripts"), &self.scripts),
            (FieldPath::new("pages.templates"), &self.templates),
        ] {
            if let Err(e) = glob::Pattern::new(pattern) {
                diag.error(field, format!("invalid glob `{pattern}`: {}", e.msg));
            }
        }
    }
}
