//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::Mode;

/// pagepack - page discovery and bundler config assembly
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Project root (default: directory of the config file, or cwd)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Config file path (default: pagepack.toml)
    #[arg(short = 'C', long, global = true, default_value = "pagepack.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Assemble the bundler configuration and print it as JSON
    #[command(visible_alias = "c")]
    Config {
        #[command(flatten)]
        mode: ModeArgs,

        #[command(flatten)]
        emit: EmitArgs,
    },

    /// List discovered entries, page templates and rewrite rules
    #[command(visible_alias = "p")]
    Pages {
        #[command(flatten)]
        mode: ModeArgs,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show which template the dev server rewrites a request path to
    #[command(visible_alias = "r")]
    Route {
        /// Request paths such as `/about/team`
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<String>,
    },

    /// Rebuild the bundler configuration whenever pages change
    #[command(visible_alias = "w")]
    Watch {
        #[command(flatten)]
        mode: ModeArgs,

        #[command(flatten)]
        emit: EmitArgs,
    },
}

/// Mode selection shared by every assembling command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ModeArgs {
    /// Build mode (falls back to NODE_ENV, then development)
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,
}

impl ModeArgs {
    /// Resolve the mode once: explicit flag first, then `NODE_ENV`.
    pub fn resolve(&self) -> Mode {
        self.resolve_with(std::env::var("NODE_ENV").ok().as_deref())
    }

    fn resolve_with(&self, env: Option<&str>) -> Mode {
        self.mode.unwrap_or_else(|| Mode::from_env_value(env))
    }
}

/// Output arguments for commands that write the bundler config.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EmitArgs {
    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}
