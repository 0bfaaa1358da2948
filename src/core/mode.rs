//! Build mode selection for production/development configs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which bundler configuration to assemble.
///
/// Resolved once at the process boundary (`--mode` or `NODE_ENV`) and
/// passed down by value; nothing below the CLI inspects the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Minified output, no dev server.
    Production,
    /// Source maps, dev server with history rewrites.
    #[default]
    Development,
}

impl Mode {
    /// Map a loose mode string to a `Mode`.
    ///
    /// Only the exact string `production` selects production. Anything
    /// else, including misspellings such as `prodution`, is development.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    #[inline]
    pub const fn is_dev(self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_value_production() {
        assert_eq!(Mode::from_env_value(Some("production")), Mode::Production);
    }

    #[test]
    fn test_from_env_value_fallbacks() {
        assert_eq!(Mode::from_env_value(None), Mode::Development);
        assert_eq!(Mode::from_env_value(Some("development")), Mode::Development);
        assert_eq!(Mode::from_env_value(Some("prodution")), Mode::Development);
        assert_eq!(Mode::from_env_value(Some("Production")), Mode::Development);
        assert_eq!(Mode::from_env_value(Some("")), Mode::Development);
    }

    #[test]
    fn test_mode_predicates() {
        assert!(!Mode::Production.is_dev());
        assert!(Mode::Development.is_dev());
        assert_eq!(Mode::default(), Mode::Development);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Production.to_string(), "production");
        assert_eq!(Mode::Development.to_string(), "development");
    }
}
