//! Page discovery.
//!
//! Scans the page root for entry scripts, page templates and page
//! directories, and turns them into the three inputs of the bundler
//! config:
//!
//! ```text
//! src/pages/**/*.js    ──► EntryMap        (key -> script, plus `vendors`)
//! src/pages/**/*.html  ──► PageDescriptor  (one per template)
//! src/pages/**/        ──► RewriteTable    (development only)
//! ```
//!
//! A pass reads the filesystem once and returns a fresh [`Discovery`];
//! nothing is cached between passes.

mod entry;
mod error;
mod key;
mod page;
mod rewrite;
mod walk;

pub use entry::{EntryMap, VENDORS};
pub use error::DiscoverError;
pub use key::PageKey;
pub use page::{Inject, PageDescriptor};
pub use rewrite::RewriteTable;

use page::build_descriptors;
use walk::{EntryKind, expand};

use std::path::Path;

use crate::config::ProjectConfig;
use crate::core::Mode;
use crate::debug;
use crate::utils::path::to_slash;

/// Result of one discovery pass.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub entries: EntryMap,
    pub pages: Vec<PageDescriptor>,
    /// Present in development mode only.
    pub rewrites: Option<RewriteTable>,
}

impl Discovery {
    /// Run discovery for the given project and mode.
    pub fn scan(config: &ProjectConfig, mode: Mode) -> Result<Self, DiscoverError> {
        let base = config.get_root();
        let page_root = config.page_root();
        let prefix = key_prefix(&config.pages.root);

        let scripts = expand(base, &page_root, &config.pages.scripts, EntryKind::File)?;
        let mut entries = EntryMap::from_scripts(&scripts, &prefix);
        entries.set_vendors(&config.pages.vendors);

        let templates = expand(base, &page_root, &config.pages.templates, EntryKind::File)?;
        let pages = build_descriptors(&templates, &prefix, &entries);

        let rewrites = if mode.is_dev() {
            let dirs = page_dirs(base, &page_root)?;
            Some(RewriteTable::build(&dirs, &config.pages.home)?)
        } else {
            None
        };

        debug!(
            "discover";
            "{} scripts, {} templates, {} rewrites ({mode})",
            scripts.len(),
            templates.len(),
            rewrites.as_ref().map_or(0, RewriteTable::len)
        );

        Ok(Self {
            entries,
            pages,
            rewrites,
        })
    }

    /// Keys of every entry, `vendors` included, in insertion order.
    pub fn chunk_names(&self) -> Vec<String> {
        self.entries.keys().map(ToString::to_string).collect()
    }
}

/// Prefix stripped from discovered paths: the page root plus a separator.
fn key_prefix(page_root: &Path) -> String {
    let root = to_slash(page_root);
    if root.is_empty() || root.ends_with('/') {
        root
    } else {
        format!("{root}/")
    }
}

/// Page directory keys under `page_root`, the page root itself excluded.
fn page_dirs(base: &Path, page_root: &Path) -> Result<Vec<PageKey>, DiscoverError> {
    let root_rel = page_root.strip_prefix(base).unwrap_or(page_root);
    let prefix = key_prefix(root_rel);

    let dirs = expand(base, page_root, "**", EntryKind::Dir)?;
    Ok(dirs
        .iter()
        .filter(|dir| dir.strip_prefix(root_rel).is_ok_and(|rel| !rel.as_os_str().is_empty()))
        .map(|dir| PageKey::from_dir(dir, &prefix))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_project(files: &[&str]) -> (TempDir, ProjectConfig) {
        let temp = TempDir::new().unwrap();
        for file in files {
            let path = temp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        let config = test_config_at(temp.path());
        (temp, config)
    }

    #[test]
    fn test_key_prefix() {
        assert_eq!(key_prefix(Path::new("src/pages")), "src/pages/");
        assert_eq!(key_prefix(Path::new("src/pages/")), "src/pages/");
        assert_eq!(key_prefix(Path::new("")), "");
    }

    #[test]
    fn test_home_about_example() {
        let (_temp, config) = make_project(&[
            "src/pages/home/index.html",
            "src/pages/about/index.html",
            "src/pages/home/index.js",
        ]);
        let found = Discovery::scan(&config, Mode::Development).unwrap();

        // entries
        let keys: Vec<_> = found.entries.keys().map(PageKey::as_str).collect();
        assert_eq!(keys, vec!["home/index", "vendors"]);
        assert!(!found.entries.contains("about/index"));
        assert_eq!(found.entries.get("vendors"), Some(["vue".to_string()].as_slice()));

        // descriptors
        let home = found.pages.iter().find(|p| p.key.as_str() == "home/index").unwrap();
        assert_eq!(home.inject, Inject::Body);
        assert_eq!(home.chunks, vec!["vendors", "home/index"]);
        let about = found.pages.iter().find(|p| p.key.as_str() == "about/index").unwrap();
        assert_eq!(about.inject, Inject::Disabled);

        // rewrites
        let rewrites = found.rewrites.unwrap();
        let rules: Vec<_> = rewrites
            .rules()
            .iter()
            .map(|r| (r.from.as_str(), r.to.as_str()))
            .collect();
        assert_eq!(
            rules,
            vec![
                ("^/about", "/pages/about/index.html"),
                ("^/home", "/pages/home/index.html"),
                ("^/$", "/pages/home/index.html"),
            ]
        );
    }

    #[test]
    fn test_production_has_no_rewrites() {
        let (_temp, config) = make_project(&["src/pages/home/index.html"]);
        let found = Discovery::scan(&config, Mode::Production).unwrap();
        assert!(found.rewrites.is_none());
    }

    #[test]
    fn test_empty_project() {
        let (_temp, config) = make_project(&[]);
        let found = Discovery::scan(&config, Mode::Development).unwrap();

        assert_eq!(found.entries.len(), 1);
        assert!(found.entries.contains(VENDORS));
        assert!(found.pages.is_empty());
        // only the home rule
        assert_eq!(found.rewrites.unwrap().len(), 1);
    }

    #[test]
    fn test_page_root_never_gets_a_rule() {
        let (_temp, config) = make_project(&["src/pages/index.html", "src/pages/shop/cart/index.html"]);
        let found = Discovery::scan(&config, Mode::Development).unwrap();

        let rewrites = found.rewrites.unwrap();
        let froms: Vec<_> = rewrites.rules().iter().map(|r| r.from.as_str()).collect();
        assert_eq!(froms, vec!["^/shop", "^/shop/cart", "^/$"]);
    }

    #[test]
    fn test_nested_page_root() {
        let (_temp, mut config) = make_project(&["web/views/blog/post.js", "web/views/blog/post.html"]);
        config.pages.root = PathBuf::from("web/views");
        config.pages.home = "blog".into();
        let found = Discovery::scan(&config, Mode::Development).unwrap();

        assert!(found.entries.contains("blog/post"));
        assert_eq!(found.pages[0].template, "./web/views/blog/post.html");
        assert_eq!(found.pages[0].filename, "pages/blog/post.html");
        assert_eq!(
            found.rewrites.unwrap().resolve("/").map(|r| r.to.clone()),
            Some("/pages/blog/index.html".to_string())
        );
    }

    #[test]
    fn test_chunk_names_include_vendors() {
        let (_temp, config) = make_project(&["src/pages/a.js", "src/pages/b.js"]);
        let found = Discovery::scan(&config, Mode::Production).unwrap();
        assert_eq!(found.chunk_names(), vec!["a", "b", "vendors"]);
    }

    #[test]
    fn test_custom_vendors() {
        let (_temp, mut config) = make_project(&[]);
        config.pages.vendors = vec!["vue".into(), "axios".into()];
        let found = Discovery::scan(&config, Mode::Production).unwrap();
        assert_eq!(
            found.entries.get(VENDORS),
            Some(["vue".to_string(), "axios".to_string()].as_slice())
        );
    }
}
