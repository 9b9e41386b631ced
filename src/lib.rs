//! Ploppable RICO - settings validation and behavior resolution for ploppable buildings

pub mod core;
pub mod diagnostics;
pub mod pipeline;
pub mod resolver;
pub mod settings;
pub mod validation;
