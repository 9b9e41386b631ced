//! Findings raised by validation and resolution, and the report that collects them

pub mod finding;
pub mod report;

pub use finding::{Finding, FindingKind, Severity};
pub use report::{route, Channel, FindingsReport, ReportEntry};
