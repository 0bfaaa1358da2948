//! Glob expansion under a base directory.
//!
//! Thin wrapper over the `glob` crate that keeps paths relative to the
//! project root and filters by entry kind.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use super::DiscoverError;

/// What kind of filesystem entry to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    fn accepts(self, path: &Path) -> bool {
        match self {
            Self::File => path.is_file(),
            Self::Dir => path.is_dir(),
        }
    }
}

/// Dotfiles and dot-directories are not matched by wildcards.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand `pattern` relative to `dir`, returning paths relative to `base`.
///
/// `dir` must live under `base`. Results come back in glob order, which
/// is sorted by path within each directory level. Any unreadable entry
/// aborts the expansion.
pub fn expand(
    base: &Path,
    dir: &Path,
    pattern: &str,
    kind: EntryKind,
) -> Result<Vec<PathBuf>, DiscoverError> {
    let full = format!(
        "{}/{}",
        Pattern::escape(&dir.to_string_lossy()),
        pattern.trim_start_matches("./")
    );

    let paths = glob::glob_with(&full, MATCH_OPTIONS).map_err(|source| DiscoverError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut results = Vec::new();
    for entry in paths {
        let path = entry?;
        if !kind.accepts(&path) {
            continue;
        }
        let relative = path.strip_prefix(base).map(Path::to_path_buf).unwrap_or(path);
        results.push(relative);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_tree(files: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for file in files {
            let path = temp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        temp
    }

    #[test]
    fn test_expand_files_relative_to_base() {
        let temp = make_tree(&[
            "src/pages/home/index.js",
            "src/pages/about/index.js",
            "src/pages/about/index.html",
        ]);
        let base = temp.path();
        let found = expand(base, &base.join("src/pages"), "**/*.js", EntryKind::File).unwrap();

        assert_eq!(
            found,
            vec![
                PathBuf::from("src/pages/about/index.js"),
                PathBuf::from("src/pages/home/index.js"),
            ]
        );
    }

    #[test]
    fn test_expand_skips_dotfiles() {
        let temp = make_tree(&["src/pages/.cache/index.js", "src/pages/home/index.js"]);
        let base = temp.path();
        let found = expand(base, &base.join("src/pages"), "**/*.js", EntryKind::File).unwrap();
        assert_eq!(found, vec![PathBuf::from("src/pages/home/index.js")]);
    }

    #[test]
    fn test_expand_dirs() {
        let temp = make_tree(&["src/pages/home/index.html", "src/pages/shop/cart/index.html"]);
        let base = temp.path();
        let found = expand(base, &base.join("src/pages"), "**", EntryKind::Dir).unwrap();

        assert!(found.contains(&PathBuf::from("src/pages/home")));
        assert!(found.contains(&PathBuf::from("src/pages/shop")));
        assert!(found.contains(&PathBuf::from("src/pages/shop/cart")));
        assert!(found.iter().all(|p| !p.extension().is_some_and(|e| e == "html")));
    }

    #[test]
    fn test_expand_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let found = expand(base, &base.join("src/pages"), "**/*.js", EntryKind::File).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_expand_invalid_pattern() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let err = expand(base, base, "**/[*.js", EntryKind::File).unwrap_err();
        assert!(matches!(err, DiscoverError::Pattern { .. }));
    }
}
