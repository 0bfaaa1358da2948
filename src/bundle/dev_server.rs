//! Dev-server descriptor, emitted in development mode only.

use serde::Serialize;

use crate::config::ProjectConfig;
use crate::discover::RewriteTable;
use crate::utils::path::{lexical_normalize, to_slash};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServer {
    pub port: u16,
    pub index: String,
    pub compress: bool,
    /// Absolute static content root.
    pub content_base: String,
    pub watch_content_base: bool,
    pub watch_options: WatchOptions,
    pub history_api_fallback: HistoryApiFallback,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchOptions {
    pub watch_content_base: bool,
    pub redirect: bool,
    pub watch: bool,
    /// Polling interval in milliseconds.
    pub poll: u64,
    pub aggregate_timeout: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryApiFallback {
    pub rewrites: RewriteTable,
}

impl DevServer {
    pub fn new(config: &ProjectConfig, rewrites: RewriteTable) -> Self {
        let serve = &config.serve;
        Self {
            port: serve.port,
            index: serve.index.clone(),
            compress: serve.compress,
            content_base: to_slash(&lexical_normalize(&config.root_join(&serve.content_base))),
            watch_content_base: true,
            watch_options: WatchOptions {
                watch_content_base: true,
                redirect: false,
                watch: true,
                poll: serve.poll,
                aggregate_timeout: serve.aggregate_timeout,
            },
            history_api_fallback: HistoryApiFallback { rewrites },
        }
    }
}
