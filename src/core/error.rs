use thiserror::Error;

/// Failures of the I/O and deserialization layer.
///
/// Validation and resolution never produce these; malformed building
/// entries become findings instead.
#[derive(Error, Debug)]
pub enum RicoError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML error in {source_name}: {message}")]
    XmlError { source_name: String, message: String },

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RicoError>;
