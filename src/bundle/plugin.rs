//! Plugin descriptors.
//!
//! Each plugin is serialized as `{"plugin": <name>, "options": {...}}`;
//! the bundler host instantiates the matching plugin class.

use serde::Serialize;

use crate::discover::{PageDescriptor, VENDORS};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "plugin", content = "options", rename_all = "kebab-case")]
pub enum Plugin {
    /// Write extracted styles to their own files.
    ExtractStyles { filename: String },
    /// Move modules shared by every entry into the vendors chunk.
    CommonChunk(CommonChunk),
    /// Open a browser tab at the dev server URL.
    OpenBrowser { url: String },
    /// Generate one HTML page from a template.
    HtmlPage(PageDescriptor),
    /// Minify emitted scripts.
    Minify(Minify),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonChunk {
    pub name: String,
    pub chunks: Vec<String>,
    /// A module moves to the vendors chunk only if every entry uses it.
    pub min_chunks: usize,
    pub filename: String,
}

impl CommonChunk {
    pub fn vendors(chunks: Vec<String>, filename: &str) -> Self {
        Self {
            name: VENDORS.to_string(),
            min_chunks: chunks.len(),
            chunks,
            filename: filename.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Minify {
    pub warnings: bool,
    pub comments: bool,
    pub compress: bool,
}

impl Default for Minify {
    fn default() -> Self {
        Self {
            warnings: false,
            comments: false,
            compress: true,
        }
    }
}
