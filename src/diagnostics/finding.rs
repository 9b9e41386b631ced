//! Individual diagnostics raised while validating and resolving buildings

use serde::Serialize;
use std::fmt;

/// How bad a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The building entry is unusable and is discarded
    Fatal,
    /// A default was substituted and processing continued
    NonFatal,
}

/// Which rule produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    MissingName,
    UnrecognizedService,
    DuplicateName,
    InvalidSubService,
    NonCanonicalToken,
    LevelOutOfRange,
    NegativeValue,
    UnparsableValue,
    TooLargeForGrowable,
    HasNetworkPaths,
    SubServiceFallback,
    NoMatchingClass,
    SourceUnreadable,
    NoBuildings,
}

impl FindingKind {
    /// Informational kinds only ever go to the background log
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            FindingKind::TooLargeForGrowable | FindingKind::HasNetworkPaths | FindingKind::NoBuildings
        )
    }
}

/// One diagnostic about a building or a settings source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    /// Building name, or the source name for source-level findings
    pub subject: String,
    pub message: String,
}

impl Finding {
    pub fn fatal(kind: FindingKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn non_fatal(
        kind: FindingKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::NonFatal,
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Fatal => "error",
            Severity::NonFatal => "warning",
        };
        write!(f, "{} '{}': {}", label, self.subject, self.message)
    }
}
