//! Content hashing using FxHash.
//!
//! Used by watch mode to tell whether a rebuilt bundler config differs
//! from the one already written, and whether `pagepack.toml` changed.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_deterministic() {
        assert_eq!(compute("entry"), compute("entry"));
        assert_eq!(compute(b"entry".as_slice()), compute("entry"));
    }

    #[test]
    fn test_compute_differs() {
        assert_ne!(compute("home/index"), compute("about/index"));
    }
}
