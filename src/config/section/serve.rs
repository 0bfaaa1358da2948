//! `[serve]` section configuration.
//!
//! Settings copied into the bundler's dev-server descriptor. pagepack
//! does not run a server itself.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! port = 4000                 # Dev server port
//! content_base = "src"        # Static content root (relative to project root)
//! index = "index.html"
//! compress = true
//! poll = 1000                 # File-watch polling interval (ms)
//! aggregate_timeout = 300     # Rebuild delay after the first change (ms)
//! open = true                 # Open a browser once the server is up
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Development server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// HTTP port number.
    pub port: u16,

    /// Static content root.
    pub content_base: PathBuf,

    /// Index file served for directory requests.
    pub index: String,

    /// Gzip responses.
    pub compress: bool,

    /// Polling interval in milliseconds.
    pub poll: u64,

    /// Aggregate timeout in milliseconds.
    pub aggregate_timeout: u64,

    /// Emit the open-browser plugin.
    pub open: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            content_base: PathBuf::from("src"),
            index: "index.html".into(),
            compress: true,
            poll: 1000,
            aggregate_timeout: 300,
            open: true,
        }
    }
}

impl ServeConfig {
    /// URL the open-browser plugin points at.
    pub fn local_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.port == 0 {
            diag.error_with_hint(
                FieldPath::new("serve.port"),
                "must be non-zero",
                "the default is 4000",
            );
        }
    }
}
