//! Settings files: XML schema, reading, writing and discovery

pub mod reader;
pub mod schema;
pub mod source;
pub mod writer;

pub use reader::{discover_sources, load_source, parse_definition, SearchPaths};
pub use schema::{BuildingList, RawBuilding, RicoDefinition};
pub use source::{DiscoveredSource, SettingsLayer, SettingsSource, SourceId};
pub use writer::{save_definition, write_definition};
