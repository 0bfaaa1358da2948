//! `[output]` section configuration.
//!
//! Filename templates are passed to the bundler untouched; `[name]`,
//! `[id]` and `[chunkHash]` are the bundler's placeholders.
//!
//! # Example
//!
//! ```toml
//! [output]
//! dir = "build"                               # Bundle output (relative to project root)
//! public_path = "/"
//! filename = "pages/[name].js"
//! chunk_filename = "pages/[id].chunk.js?[chunkHash]"
//! css_filename = "pages/[name].css"
//! vendor_filename = "assets/js/vender.js"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Bundle output directory.
    pub dir: PathBuf,

    /// Public URL prefix of emitted assets.
    pub public_path: String,

    /// Entry bundle filename template.
    pub filename: String,

    /// Async chunk filename template.
    pub chunk_filename: String,

    /// Extracted stylesheet filename template.
    pub css_filename: String,

    /// Filename of the shared vendors chunk.
    pub vendor_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("build"),
            public_path: "/".into(),
            filename: "pages/[name].js".into(),
            chunk_filename: "pages/[id].chunk.js?[chunkHash]".into(),
            css_filename: "pages/[name].css".into(),
            vendor_filename: "assets/js/vender.js".into(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.public_path.ends_with('/') {
            diag.error_with_hint(
                FieldPath::new("output.public_path"),
                format!("must end with `/`, got `{}`", self.public_path),
                format!("use \"{}/\"", self.public_path),
            );
        }
        if !self.filename.contains("[name]") {
            diag.error(
                FieldPath::new("output.filename"),
                "must contain `[name]`, otherwise every entry writes the same file",
            );
        }
    }
}
