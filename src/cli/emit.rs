//! `pagepack config`: assemble once and emit JSON.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::bundle::BundlerConfig;
use crate::config::ProjectConfig;
use crate::core::Mode;
use crate::log;

use super::EmitArgs;

pub fn emit_config(config: &ProjectConfig, mode: Mode, args: &EmitArgs) -> Result<()> {
    let bundler = BundlerConfig::assemble(config, mode)?;
    let json = bundler.to_json(args.pretty)?;
    write_output(&json, args.output.as_deref())?;

    if let Some(path) = &args.output {
        log!("emit"; "{} config with {} entries written to {}",
            mode, bundler.entry.len(), path.display());
    }
    Ok(())
}

/// Write `json` to `path`, or stdout when no path is given.
///
/// Parent directories are created as needed.
pub fn write_output(json: &str, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{json}")?;
        out.flush()?;
        return Ok(());
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_write_output_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("build/nested/webpack.json");
        write_output("{}", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_emit_config_to_file() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("src/pages/home/index.js");
        fs::create_dir_all(script.parent().unwrap()).unwrap();
        fs::write(&script, "").unwrap();

        let config = test_config_at(temp.path());
        let out: PathBuf = temp.path().join("out/webpack.json");
        let args = EmitArgs {
            output: Some(out.clone()),
            pretty: true,
        };
        emit_config(&config, Mode::Production, &args).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["entry"]["home/index"][0], "./src/pages/home/index.js");
        assert_eq!(value["devtool"], "source-map");
        assert!(value.get("devServer").is_none());
    }
}
