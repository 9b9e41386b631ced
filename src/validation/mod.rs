//! Descriptor validation

pub mod descriptor;
pub mod validator;

pub use descriptor::BuildingDescriptor;
pub use validator::{SourceValidation, Validation, Validator};
