//! History-fallback rewrite rules for the dev server.
//!
//! Every page directory gets a prefix rule pointing at its `index.html`,
//! and `/` is sent to the home page:
//!
//! ```text
//! ^/about  ->  /pages/about/index.html
//! ^/shop   ->  /pages/shop/index.html
//! ^/$      ->  /pages/home/index.html
//! ```
//!
//! Rules are tried in order; the first match wins.

use regex::Regex;
use serde::Serialize;

use super::{DiscoverError, PageKey};

/// One request-path rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteRule {
    /// Regex source matched against the request path.
    pub from: String,

    /// Template served instead.
    pub to: String,

    #[serde(skip)]
    regex: Regex,
}

impl RewriteRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self, regex::Error> {
        let from = from.into();
        let regex = Regex::new(&from)?;
        Ok(Self {
            from,
            to: to.into(),
            regex,
        })
    }

    /// Prefix rule for a page directory.
    pub fn for_page(key: &PageKey) -> Result<Self, DiscoverError> {
        Self::new(
            format!("^/{}", regex::escape(key.as_str())),
            index_of(key.as_str()),
        )
        .map_err(|source| DiscoverError::Rewrite {
            key: key.to_string(),
            source,
        })
    }

    /// Exact `/` rule for the home page.
    pub fn for_home(home: &str) -> Result<Self, DiscoverError> {
        let home = home.trim_matches('/');
        Self::new("^/$", index_of(home)).map_err(|source| DiscoverError::Rewrite {
            key: home.to_string(),
            source,
        })
    }

    #[inline]
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Generated template path for a page directory.
fn index_of(key: &str) -> String {
    format!("/pages/{key}/index.html")
}

/// Ordered rewrite rules.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RewriteTable {
    rules: Vec<RewriteRule>,
}

impl RewriteTable {
    /// One prefix rule per page directory, then the home rule.
    ///
    /// Empty keys (the page root itself) never produce a rule.
    pub fn build<'a>(
        dirs: impl IntoIterator<Item = &'a PageKey>,
        home: &str,
    ) -> Result<Self, DiscoverError> {
        let mut rules = Vec::new();
        for key in dirs {
            if key.is_empty() {
                continue;
            }
            rules.push(RewriteRule::for_page(key)?);
        }
        rules.push(RewriteRule::for_home(home)?);
        Ok(Self { rules })
    }

    /// First rule matching `path`.
    pub fn resolve(&self, path: &str) -> Option<&RewriteRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[cfg(test)]
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }
}
