//! Bundler configuration assembly.
//!
//! Turns a [`Discovery`] into the finished configuration object handed to
//! the bundler host. The value is built in one go for a given [`Mode`] and
//! never patched afterwards:
//!
//! ```text
//! ProjectConfig ─┐
//!                ├─► Discovery::scan ─► BundlerConfig::from_discovery ─► JSON
//! Mode ──────────┘
//! ```
//!
//! | Mode        | devtool                    | extra plugins | devServer |
//! |-------------|----------------------------|---------------|-----------|
//! | production  | `source-map`               | minify        | no        |
//! | development | `#cheap-module-source-map` | -             | yes       |

mod dev_server;
mod plugin;
mod rules;

pub use plugin::Plugin;

use dev_server::DevServer;
use plugin::{CommonChunk, Minify};
use rules::{Rule, module_rules};

use serde::Serialize;
use thiserror::Error;

use crate::config::ProjectConfig;
use crate::config::section::resolve::is_path_alias;
use crate::core::Mode;
use crate::discover::{DiscoverError, Discovery, EntryMap};
use crate::utils::path::{lexical_normalize, to_slash};

/// Errors that abort config assembly.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error("invalid module rule pattern `{pattern}`")]
    Rule {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// The configuration object consumed by the bundler.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
    pub entry: EntryMap,
    pub output: Output,
    pub module: ModuleSection,
    pub resolve: Resolve,
    pub devtool: String,
    pub performance: Performance,
    pub plugins: Vec<Plugin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServer>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Absolute output directory.
    pub path: String,
    pub filename: String,
    pub public_path: String,
    pub chunk_filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleSection {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resolve {
    pub alias: serde_json::Map<String, serde_json::Value>,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Performance {
    pub hints: bool,
}

impl BundlerConfig {
    /// Discover pages and assemble the config in one pass.
    pub fn assemble(config: &ProjectConfig, mode: Mode) -> Result<Self, BundleError> {
        let discovery = Discovery::scan(config, mode)?;
        Self::from_discovery(discovery, config, mode)
    }

    /// Assemble the config from an existing discovery result.
    ///
    /// Rewrite rules in `discovery` are only used in development mode.
    pub fn from_discovery(
        discovery: Discovery,
        config: &ProjectConfig,
        mode: Mode,
    ) -> Result<Self, BundleError> {
        let chunks = discovery.chunk_names();
        let Discovery {
            entries,
            pages,
            rewrites,
        } = discovery;

        let mut plugins = vec![
            Plugin::ExtractStyles {
                filename: config.output.css_filename.clone(),
            },
            Plugin::CommonChunk(CommonChunk::vendors(chunks, &config.output.vendor_filename)),
        ];
        if config.serve.open {
            plugins.push(Plugin::OpenBrowser {
                url: config.serve.local_url(),
            });
        }
        plugins.extend(pages.into_iter().map(Plugin::HtmlPage));

        let (devtool, dev_server) = match mode {
            Mode::Production => {
                plugins.push(Plugin::Minify(Minify::default()));
                ("source-map", None)
            }
            Mode::Development => (
                "#cheap-module-source-map",
                Some(DevServer::new(config, rewrites.unwrap_or_default())),
            ),
        };

        Ok(Self {
            entry: entries,
            output: Output {
                path: absolute(config, &config.output.dir.to_string_lossy()),
                filename: config.output.filename.clone(),
                public_path: config.output.public_path.clone(),
                chunk_filename: config.output.chunk_filename.clone(),
            },
            module: ModuleSection {
                rules: module_rules()?,
            },
            resolve: Resolve {
                alias: aliases(config),
                extensions: config.resolve.extensions.clone(),
            },
            devtool: devtool.to_string(),
            performance: Performance { hints: false },
            plugins,
            dev_server,
        })
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Project-relative path rendered as an absolute, `/`-separated string.
fn absolute(config: &ProjectConfig, path: &str) -> String {
    to_slash(&lexical_normalize(&config.root_join(path)))
}

/// Alias table with path aliases resolved against the project root.
fn aliases(config: &ProjectConfig) -> serde_json::Map<String, serde_json::Value> {
    config
        .resolve
        .aliases()
        .into_iter()
        .map(|(key, value)| {
            let value = if is_path_alias(&value) {
                absolute(config, &value)
            } else {
                value
            };
            (key, serde_json::Value::String(value))
        })
        .collect()
}
