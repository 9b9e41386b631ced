//! Conversion pipeline tying settings, validation and resolution together

pub mod conversion;

pub use conversion::{ConversionPipeline, ConversionRun};
