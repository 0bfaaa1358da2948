//! `pagepack pages`: show what discovery found.

use anyhow::Result;
use serde::Serialize;

use crate::config::ProjectConfig;
use crate::core::Mode;
use crate::discover::{Discovery, EntryMap, PageDescriptor, PageKey, RewriteTable};
use crate::log;

use super::write_output;

/// Discovery result as printed by `pages`.
///
/// Page options are the same ones handed to the html-page plugin, with the
/// page key added in front.
#[derive(Serialize)]
struct Listing<'a> {
    entries: &'a EntryMap,
    pages: Vec<PageRow<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rewrites: Option<&'a RewriteTable>,
}

#[derive(Serialize)]
struct PageRow<'a> {
    key: &'a PageKey,
    #[serde(flatten)]
    page: &'a PageDescriptor,
}

impl<'a> Listing<'a> {
    fn new(found: &'a Discovery) -> Self {
        Self {
            entries: &found.entries,
            pages: found
                .pages
                .iter()
                .map(|page| PageRow {
                    key: &page.key,
                    page,
                })
                .collect(),
            rewrites: found.rewrites.as_ref(),
        }
    }

    fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

pub fn list_pages(config: &ProjectConfig, mode: Mode, pretty: bool) -> Result<()> {
    let found = Discovery::scan(config, mode)?;

    write_output(&Listing::new(&found).to_json(pretty)?, None)?;

    log!("discover"; "{}", summary(&found));
    Ok(())
}

/// One-line count of what was discovered.
fn summary(found: &Discovery) -> String {
    let injected = found.pages.iter().filter(|p| p.is_injected()).count();
    let mut line = format!(
        "{} entries, {} pages ({} with scripts)",
        found.entries.len(),
        found.pages.len(),
        injected
    );
    if let Some(rewrites) = &found.rewrites {
        line.push_str(&format!(", {} rewrites", rewrites.len()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> (TempDir, ProjectConfig) {
        let temp = TempDir::new().unwrap();
        for file in ["src/pages/home/index.js", "src/pages/home/index.html", "src/pages/about/index.html"] {
            let path = temp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        let config = test_config_at(temp.path());
        (temp, config)
    }

    #[test]
    fn test_summary() {
        let (_temp, config) = sample();

        let dev = Discovery::scan(&config, Mode::Development).unwrap();
        assert_eq!(summary(&dev), "2 entries, 2 pages (1 with scripts), 3 rewrites");

        let prod = Discovery::scan(&config, Mode::Production).unwrap();
        assert_eq!(summary(&prod), "2 entries, 2 pages (1 with scripts)");
    }

    #[test]
    fn test_listing_shows_page_keys() {
        let (_temp, config) = sample();
        let found = Discovery::scan(&config, Mode::Development).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&Listing::new(&found).to_json(false).unwrap()).unwrap();

        let pages = value["pages"].as_array().unwrap();
        let home = pages.iter().find(|p| p["key"] == "home/index").unwrap();
        assert_eq!(home["filename"], "pages/home/index.html");
        assert_eq!(home["inject"], "body");
        let about = pages.iter().find(|p| p["key"] == "about/index").unwrap();
        assert_eq!(about["inject"], false);

        // key comes first, then the plugin options
        let fields: Vec<_> = home.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(fields[..2], ["key", "filename"]);

        assert_eq!(value["entries"]["home/index"], serde_json::json!(["./src/pages/home/index.js"]));
        assert_eq!(value["rewrites"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_listing_omits_rewrites_in_production() {
        let (_temp, config) = sample();
        let found = Discovery::scan(&config, Mode::Production).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&Listing::new(&found).to_json(true).unwrap()).unwrap();
        assert!(value.get("rewrites").is_none());
    }

    #[test]
    fn test_plugin_options_carry_no_key() {
        let (_temp, config) = sample();
        let found = Discovery::scan(&config, Mode::Development).unwrap();
        for page in &found.pages {
            let options = serde_json::to_value(page).unwrap();
            assert!(options.get("key").is_none());
        }
    }
}
