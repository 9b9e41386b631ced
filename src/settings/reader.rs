//! Read settings files and locate them on disk

use crate::core::config::RicoConfig;
use crate::core::error::{Result, RicoError};
use crate::settings::schema::RicoDefinition;
use crate::settings::source::{DiscoveredSource, SettingsLayer, SettingsSource, SourceId};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Deserialize a settings document.
///
/// Fails only when the document itself is unreadable; bad attribute values
/// are left for the validator.
pub fn parse_definition(source_name: &str, xml: &str) -> Result<RicoDefinition> {
    quick_xml::de::from_str(xml).map_err(|e| RicoError::XmlError {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// Read and deserialize one discovered settings file
pub fn load_source(discovered: &DiscoveredSource) -> Result<SettingsSource> {
    let content = fs::read_to_string(&discovered.path)?;
    let definition = parse_definition(&discovered.id.name, &content)?;

    if definition.is_empty() {
        tracing::info!("no parseable buildings in {}", discovered.id);
    } else {
        tracing::debug!(
            "read {} building entries from {}",
            definition.buildings.items.len(),
            discovered.id
        );
    }

    Ok(SettingsSource::from_definition(discovered.id.clone(), definition)
        .with_path(discovered.path.clone()))
}

/// Where settings files are looked for
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPaths<'a> {
    /// The player's local override file
    pub local: Option<&'a Path>,
    /// Directory searched recursively for author settings files
    pub assets: Option<&'a Path>,
    /// Settings file bundled with the mod
    pub mod_settings: Option<&'a Path>,
}

/// Locate the local override file, every author settings file and the mod's
/// own settings file, in that order.
///
/// Author files are searched for recursively under the asset directory by
/// `config.definition_file_name`; each file is reported once and in sorted path
/// order. An author source is named after the directory holding the file,
/// relative to the asset directory, so same-named packages in different
/// folders stay apart.
pub fn discover_sources(paths: SearchPaths<'_>, config: &RicoConfig) -> Result<Vec<DiscoveredSource>> {
    let mut sources = Vec::new();

    if let Some(path) = paths.local {
        push_if_file(&mut sources, SettingsLayer::Local, path);
    }

    if let Some(root) = paths.assets {
        let mut found = BTreeSet::new();
        collect_definition_files(root, &config.definition_file_name, &mut found)?;

        for path in found {
            sources.push(DiscoveredSource {
                id: SourceId::new(SettingsLayer::Author, package_name(root, &path)),
                path,
            });
        }
    }

    if let Some(path) = paths.mod_settings {
        push_if_file(&mut sources, SettingsLayer::Mod, path);
    }

    tracing::info!("discovered {} settings sources", sources.len());
    Ok(sources)
}

fn push_if_file(sources: &mut Vec<DiscoveredSource>, layer: SettingsLayer, path: &Path) {
    if path.is_file() {
        sources.push(DiscoveredSource {
            id: SourceId::new(layer, path.display().to_string()),
            path: path.to_path_buf(),
        });
    } else {
        tracing::info!("no {} settings file at {}", layer, path.display());
    }
}

/// Package directory of `path` relative to `root`, with `/` separators
fn package_name(root: &Path, path: &Path) -> String {
    let dir = path.parent().unwrap_or(root);
    let relative: Vec<_> = dir
        .strip_prefix(root)
        .unwrap_or(dir)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if relative.is_empty() {
        root.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string())
    } else {
        relative.join("/")
    }
}

fn collect_definition_files(
    dir: &Path,
    file_name: &str,
    found: &mut BTreeSet<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let entry_path = entry.path();

        if entry_path.is_dir() {
            collect_definition_files(&entry_path, file_name, found)?;
        } else if entry_path.file_name().map_or(false, |name| name == file_name) {
            found.insert(entry_path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<PloppableRICODefinition xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Buildings>
    <RICOBuilding name="Corner Shop" service="commercial" sub-service="low" level="2" workplaces="8" />
    <RICOBuilding name="Tower" service="residential" sub-service="high" level="abc" homes="-4" growable="true" />
  </Buildings>
</PloppableRICODefinition>
"#;

    #[test]
    fn test_parse_definition_keeps_raw_values() {
        let definition = parse_definition("sample", SAMPLE).unwrap();
        let buildings = &definition.buildings.items;

        assert_eq!(buildings.len(), 2);
        assert_eq!(buildings[0].name.as_deref(), Some("Corner Shop"));
        assert_eq!(buildings[0].workplaces.as_deref(), Some("8"));
        assert_eq!(buildings[0].homes, None);

        // Garbage survives deserialization untouched
        assert_eq!(buildings[1].level.as_deref(), Some("abc"));
        assert_eq!(buildings[1].homes.as_deref(), Some("-4"));
        assert_eq!(buildings[1].growable.as_deref(), Some("true"));
    }

    #[test]
    fn test_parse_empty_definition() {
        let definition =
            parse_definition("empty", "<PloppableRICODefinition><Buildings/></PloppableRICODefinition>")
                .unwrap();
        assert!(definition.is_empty());

        let definition = parse_definition("bare", "<PloppableRICODefinition/>").unwrap();
        assert!(definition.is_empty());
    }

    #[test]
    fn test_parse_malformed_definition() {
        let result = parse_definition("broken", "<PloppableRICODefinition><Buildings>");
        match result {
            Err(RicoError::XmlError { source_name, .. }) => assert_eq!(source_name, "broken"),
            other => panic!("Expected XmlError, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_sources() {
        let dir = tempdir().unwrap();
        let config = RicoConfig::default();

        let local = dir.path().join("LocalRICOSettings.xml");
        fs::write(&local, SAMPLE).unwrap();
        let bundled = dir.path().join("bundled.xml");
        fs::write(&bundled, SAMPLE).unwrap();

        let assets = dir.path().join("assets");
        for package in ["b_pack", "a_pack/nested"] {
            let package_dir = assets.join(package);
            fs::create_dir_all(&package_dir).unwrap();
            fs::write(package_dir.join("PloppableRICODefinition.xml"), SAMPLE).unwrap();
        }
        fs::write(assets.join("b_pack").join("readme.txt"), "ignored").unwrap();

        let paths = SearchPaths {
            local: Some(&local),
            assets: Some(&assets),
            mod_settings: Some(&bundled),
        };
        let sources = discover_sources(paths, &config).unwrap();

        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0].id.layer, SettingsLayer::Local);
        assert_eq!(sources[1].id, SourceId::author("a_pack/nested"));
        assert_eq!(sources[2].id, SourceId::author("b_pack"));
        assert_eq!(sources[3].id.layer, SettingsLayer::Mod);
        assert_eq!(sources[3].path, bundled);
    }

    #[test]
    fn test_same_named_packages_get_distinct_sources() {
        let dir = tempdir().unwrap();
        for owner in ["alice", "bob"] {
            let package_dir = dir.path().join(owner).join("pack");
            fs::create_dir_all(&package_dir).unwrap();
            fs::write(package_dir.join("PloppableRICODefinition.xml"), SAMPLE).unwrap();
        }

        let paths = SearchPaths {
            assets: Some(dir.path()),
            ..SearchPaths::default()
        };
        let sources = discover_sources(paths, &RicoConfig::default()).unwrap();

        let ids: Vec<_> = sources.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![SourceId::author("alice/pack"), SourceId::author("bob/pack")]);
    }

    #[test]
    fn test_definition_at_asset_root_uses_root_name() {
        let dir = tempdir().unwrap();
        let assets = dir.path().join("workshop");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("PloppableRICODefinition.xml"), SAMPLE).unwrap();

        let paths = SearchPaths {
            assets: Some(&assets),
            ..SearchPaths::default()
        };
        let sources = discover_sources(paths, &RicoConfig::default()).unwrap();

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].id, SourceId::author("workshop"));
    }

    #[test]
    fn test_discover_without_local_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("LocalRICOSettings.xml");

        let paths = SearchPaths {
            local: Some(&missing),
            mod_settings: Some(&missing),
            ..SearchPaths::default()
        };
        let sources = discover_sources(paths, &RicoConfig::default()).unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_load_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("PloppableRICODefinition.xml");
        fs::write(&path, SAMPLE).unwrap();

        let discovered = DiscoveredSource {
            id: SourceId::author("pack"),
            path: path.clone(),
        };
        let source = load_source(&discovered).unwrap();

        assert_eq!(source.id, SourceId::author("pack"));
        assert_eq!(source.path, Some(path));
        assert_eq!(source.buildings.len(), 2);
    }
}
