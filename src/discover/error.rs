//! Discovery error types.

use thiserror::Error;

/// Errors that abort page discovery.
///
/// Discovery fails closed: any unreadable path or malformed pattern stops
/// the whole pass, and the caller keeps whatever config it had before.
#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("invalid glob pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("cannot read `{}` during discovery", .0.path().display())]
    Walk(#[from] glob::GlobError),

    #[error("invalid rewrite pattern for page `{key}`")]
    Rewrite {
        key: String,
        #[source]
        source: regex::Error,
    },
}
