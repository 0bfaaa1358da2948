//! Page key derivation.
//!
//! A page key identifies a page by its location under the page root:
//!
//! ```text
//! src/pages/home/index.js    (prefix "src/pages/")  ->  home/index
//! src/pages/about.html       (prefix "src/pages/")  ->  about
//! src/pages/shop/cart        (directory)            ->  shop/cart
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::utils::path::{lexical_normalize, to_slash};

/// Normalized, `/`-separated page identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageKey(String);

impl PageKey {
    /// Derive the key of a page file.
    ///
    /// `directory + "/" + basename-without-extension`, lexically normalized,
    /// with `prefix` stripped when the normalized path starts with it.
    /// A prefix that does not match (different case, different root) is
    /// left in the key.
    pub fn from_file(path: &Path, prefix: &str) -> Self {
        let stemmed = match (path.parent(), path.file_stem()) {
            (Some(dir), Some(stem)) => dir.join(stem),
            _ => path.to_path_buf(),
        };
        Self::from_normalized(&stemmed, prefix)
    }

    /// Derive the key of a page directory.
    ///
    /// Unlike [`PageKey::from_file`], nothing after a dot is treated as an
    /// extension: `v1.2/` keys as `v1.2` (not `v1`), so its rewrite rule
    /// matches `/v1.2` and points at `/pages/v1.2/index.html`.
    pub fn from_dir(path: &Path, prefix: &str) -> Self {
        Self::from_normalized(path, prefix)
    }

    fn from_normalized(path: &Path, prefix: &str) -> Self {
        let normalized = to_slash(&lexical_normalize(path));
        let prefix = normalize_prefix(prefix);

        let key = match normalized.strip_prefix(prefix.as_str()) {
            Some(rest) if !prefix.is_empty() => rest,
            _ => normalized.as_str(),
        };

        Self(key.to_string())
    }

    /// Build a key from an already-normalized string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Bring a prefix into the same shape as a normalized key path.
///
/// Separators become `/` and leading `./` segments are dropped. A trailing
/// `/` is preserved, so `src/pages/` strips the separator too.
fn normalize_prefix(prefix: &str) -> String {
    let mut prefix = prefix.replace('\\', "/");
    while let Some(rest) = prefix.strip_prefix("./") {
        prefix = rest.to_string();
    }
    prefix
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PageKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
