//! `pagepack route`: resolve request paths against the dev-server rewrites.

use anyhow::Result;

use crate::config::ProjectConfig;
use crate::core::Mode;
use crate::discover::{Discovery, RewriteTable};

pub fn show_routes(config: &ProjectConfig, paths: &[String]) -> Result<()> {
    let found = Discovery::scan(config, Mode::Development)?;
    let table = found.rewrites.unwrap_or_default();

    for path in paths {
        println!("{}", describe(&table, path));
    }
    Ok(())
}

fn describe(table: &RewriteTable, path: &str) -> String {
    match table.resolve(path) {
        Some(rule) => format!("{path} -> {} (via {})", rule.to, rule.from),
        None => format!("{path} -> (no rewrite, served from contentBase)"),
    }
}
