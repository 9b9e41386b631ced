//! Settings sources and their precedence layers

use crate::settings::schema::{RawBuilding, RicoDefinition};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where a settings file comes from.
///
/// Ordering is precedence: a `Local` entry overrides an `Author` entry of the
/// same building, which overrides a `Mod` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsLayer {
    /// The player's own override file
    Local,
    /// Shipped by the asset author next to the asset package
    Author,
    /// Bundled with the mod itself
    Mod,
}

impl SettingsLayer {
    pub fn is_local(&self) -> bool {
        matches!(self, SettingsLayer::Local)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsLayer::Local => "local",
            SettingsLayer::Author => "author",
            SettingsLayer::Mod => "mod",
        }
    }
}

impl fmt::Display for SettingsLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one settings source in the findings report
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId {
    pub layer: SettingsLayer,
    /// Package name or file path
    pub name: String,
}

impl SourceId {
    pub fn new(layer: SettingsLayer, name: impl Into<String>) -> Self {
        Self {
            layer,
            name: name.into(),
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self::new(SettingsLayer::Local, name)
    }

    pub fn author(name: impl Into<String>) -> Self {
        Self::new(SettingsLayer::Author, name)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} settings '{}'", self.layer, self.name)
    }
}

/// A settings file located on disk but not yet read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSource {
    pub id: SourceId,
    pub path: PathBuf,
}

/// One deserialized settings source
#[derive(Debug, Clone)]
pub struct SettingsSource {
    pub id: SourceId,
    pub path: Option<PathBuf>,
    pub buildings: Vec<RawBuilding>,
}

impl SettingsSource {
    pub fn new(id: SourceId, buildings: Vec<RawBuilding>) -> Self {
        Self {
            id,
            path: None,
            buildings,
        }
    }

    pub fn from_definition(id: SourceId, definition: RicoDefinition) -> Self {
        Self::new(id, definition.buildings.items)
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}
