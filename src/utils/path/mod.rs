//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects beyond
//! `normalize_path`'s canonicalize attempt.

pub mod fs;

pub use fs::{lexical_normalize, normalize_path, to_slash};
