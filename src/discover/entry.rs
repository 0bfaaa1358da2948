//! Entry-point map: page key -> script file.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::PageKey;
use crate::utils::path::to_slash;

/// Reserved entry holding modules shared by every page.
pub const VENDORS: &str = "vendors";

/// Insertion-ordered map from page key to its entry modules.
///
/// Re-inserting an existing key replaces the value but keeps the key's
/// original position, so the serialized order matches discovery order.
#[derive(Debug, Clone, Default)]
pub struct EntryMap {
    entries: Vec<(PageKey, Vec<String>)>,
    index: FxHashMap<PageKey, usize>,
}

impl EntryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from discovered script paths (relative to the project root).
    ///
    /// Later paths win when two scripts map to the same key.
    pub fn from_scripts<P: AsRef<Path>>(scripts: &[P], prefix: &str) -> Self {
        let mut map = Self::new();
        for script in scripts {
            let script = script.as_ref();
            let key = PageKey::from_file(script, prefix);
            map.insert(key, vec![format!("./{}", to_slash(script))]);
        }
        map
    }

    /// Insert or replace an entry. Returns the replaced value.
    pub fn insert(&mut self, key: PageKey, modules: Vec<String>) -> Option<Vec<String>> {
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, modules));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, modules));
        None
    }

    /// Set the reserved `vendors` entry.
    pub fn set_vendors(&mut self, modules: &[String]) {
        self.insert(PageKey::new(VENDORS), modules.to_vec());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &PageKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.index.get(key).map(|&i| self.entries[i].1.as_slice())
    }
}

impl Serialize for EntryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, modules) in &self.entries {
            map.serialize_entry(key, modules)?;
        }
        map.end()
    }
}
