//! Write settings files back to XML

use crate::core::error::{Result, RicoError};
use crate::settings::schema::RicoDefinition;
use std::path::Path;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Serialize a definition to an XML document string
pub fn write_definition(definition: &RicoDefinition) -> Result<String> {
    let body = quick_xml::se::to_string(definition).map_err(|e| RicoError::XmlError {
        source_name: "PloppableRICODefinition".to_string(),
        message: e.to_string(),
    })?;
    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}

/// Serialize a definition and write it to `path`, replacing any existing file
pub fn save_definition(path: &Path, definition: &RicoDefinition) -> Result<()> {
    let xml = write_definition(definition)?;
    std::fs::write(path, xml)?;
    tracing::info!(
        "saved {} building entries to {}",
        definition.buildings.items.len(),
        path.display()
    );
    Ok(())
}
