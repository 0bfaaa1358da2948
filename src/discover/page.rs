//! Page template descriptors.
//!
//! One descriptor per discovered template. A template whose key is also an
//! entry gets its bundle injected:
//!
//! ```text
//! src/pages/home/index.html + entry home/index  ->  inject "body", chunks [vendors, home/index]
//! src/pages/about/index.html (no entry)         ->  inject false
//! ```

use std::path::Path;

use serde::{Serialize, Serializer};

use super::entry::{EntryMap, VENDORS};
use super::PageKey;
use crate::utils::path::to_slash;

/// Where the bundler injects script tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inject {
    /// Leave the template untouched.
    Disabled,
    /// Append tags at the end of `<body>`.
    Body,
}

impl Serialize for Inject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Body => serializer.serialize_str("body"),
        }
    }
}

/// Options for one generated HTML page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    #[serde(skip)]
    pub key: PageKey,

    /// Output file, relative to the output directory.
    pub filename: String,

    /// Template source, relative to the project root.
    pub template: String,

    pub inject: Inject,

    pub cache: bool,

    /// Chunks injected into the page, shared vendors first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chunks: Vec<String>,

    /// Append a compilation hash to injected URLs.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hash: bool,
}

impl PageDescriptor {
    /// Build the descriptor for a template (path relative to project root).
    pub fn for_template(template: &Path, prefix: &str, entries: &EntryMap) -> Self {
        let key = PageKey::from_file(template, prefix);
        let injected = entries.contains(key.as_str());

        Self {
            filename: format!("pages/{key}.html"),
            template: format!("./{}", to_slash(template)),
            inject: if injected { Inject::Body } else { Inject::Disabled },
            cache: false,
            chunks: if injected {
                vec![VENDORS.to_string(), key.to_string()]
            } else {
                Vec::new()
            },
            hash: injected,
            key,
        }
    }

    #[inline]
    pub fn is_injected(&self) -> bool {
        self.inject == Inject::Body
    }
}

/// Build descriptors in template discovery order.
pub fn build_descriptors<P: AsRef<Path>>(
    templates: &[P],
    prefix: &str,
    entries: &EntryMap,
) -> Vec<PageDescriptor> {
    templates
        .iter()
        .map(|t| PageDescriptor::for_template(t.as_ref(), prefix, entries))
        .collect()
}
