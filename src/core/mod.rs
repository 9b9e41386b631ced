pub mod config;
pub mod error;
pub mod types;

pub use config::{Capabilities, RicoConfig};
pub use error::{Result, RicoError};
pub use types::{PlacementMode, Service, SubService};
