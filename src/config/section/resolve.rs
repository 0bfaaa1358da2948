//! `[resolve]` section configuration.
//!
//! Module resolution settings passed to the bundler. Aliases declared here
//! are layered over the built-in ones: same key replaces the value in place,
//! new keys are appended.
//!
//! Alias values starting with `./` or `../` are paths resolved against the
//! project root; anything else is a module specifier kept verbatim.
//!
//! # Example
//!
//! ```toml
//! [resolve]
//! extensions = [".js", ".vue"]
//!
//! [resolve.alias]
//! "@utils" = "./src/assets/utils"
//! "vue" = "vue/dist/vue.runtime.js"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Built-in aliases, in emission order.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("@style", "./src/assets/css"),
    ("@js", "./src/assets/js"),
    ("vue", "vue/dist/vue.js"),
    ("@components", "./src/assets/components"),
];

const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".css", ".less", ".sass", ".scss", ".vue"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Extra or overriding aliases.
    pub alias: BTreeMap<String, String>,

    /// Extensions tried when an import omits one.
    pub extensions: Vec<String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            alias: BTreeMap::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl ResolveConfig {
    /// Built-in aliases overlaid with the configured ones.
    pub fn aliases(&self) -> Vec<(String, String)> {
        let mut merged: Vec<(String, String)> = DEFAULT_ALIASES
            .iter()
            .map(|(k, v)| {
                let value = self.alias.get(*k).map_or(*v, String::as_str);
                ((*k).to_string(), value.to_string())
            })
            .collect();

        for (key, value) in &self.alias {
            if !DEFAULT_ALIASES.iter().any(|(k, _)| k == key) {
                merged.push((key.clone(), value.clone()));
            }
        }

        merged
    }
}

/// Whether an alias value names a project path rather than a module.
pub fn is_path_alias(value: &str) -> bool {
    value.starts_with("./") || value.starts_with("../")
}
