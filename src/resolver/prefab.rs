//! Physical facts about building prefabs, keyed by building name

use crate::core::error::Result;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read-only geometry facts of one prefab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefabFacts {
    /// Width in grid cells
    pub width: u32,
    /// Length in grid cells
    pub length: u32,
    /// Whether the prefab contains network segments (paths, roads, ...)
    #[serde(default)]
    pub has_network_paths: bool,
}

impl PrefabFacts {
    pub fn new(width: u32, length: u32) -> Self {
        Self {
            width,
            length,
            has_network_paths: false,
        }
    }

    pub fn with_network_paths(mut self) -> Self {
        self.has_network_paths = true;
        self
    }
}

/// Lookup of prefab facts by building name
#[derive(Debug, Clone, Default)]
pub struct PrefabCatalog {
    prefabs: AHashMap<String, PrefabFacts>,
}

impl PrefabCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, facts: PrefabFacts) {
        self.prefabs.insert(name.into(), facts);
    }

    pub fn get(&self, name: &str) -> Option<&PrefabFacts> {
        self.prefabs.get(name)
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }

    /// Load prefab facts from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse prefab facts from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlPrefabs = toml::from_str(content)?;

        let mut catalog = Self::new();
        for prefab in toml_data.prefabs {
            catalog.insert(
                prefab.name,
                PrefabFacts {
                    width: prefab.width,
                    length: prefab.length,
                    has_network_paths: prefab.has_network_paths,
                },
            );
        }
        Ok(catalog)
    }
}

/// TOML representation of a prefab facts file
#[derive(Debug, Deserialize)]
struct TomlPrefabs {
    #[serde(default)]
    prefabs: Vec<TomlPrefab>,
}

#[derive(Debug, Deserialize)]
struct TomlPrefab {
    name: String,
    width: u32,
    length: u32,
    #[serde(default)]
    has_network_paths: bool,
}
