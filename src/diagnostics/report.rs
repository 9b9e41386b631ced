//! Findings report partitioned by settings source
//!
//! Findings are merged per source, never overwritten, and each entry is
//! tagged with the channel it is surfaced on: shown to the player, or only
//! written to the background log.

use crate::diagnostics::finding::Finding;
use crate::settings::source::{SettingsLayer, SourceId};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Where a finding is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Shown directly to the player
    User,
    /// Background diagnostic log only
    Log,
}

/// Decide the channel of a building finding.
///
/// Fatal findings always reach the player. Non-fatal findings reach the
/// player only for enabled buildings in the local settings file; the author
/// of other settings is not the one reading them.
pub fn route(finding: &Finding, layer: SettingsLayer, rico_enabled: bool) -> Channel {
    if finding.is_fatal() {
        return Channel::User;
    }
    if finding.kind.is_informational() {
        return Channel::Log;
    }
    if layer.is_local() && rico_enabled {
        Channel::User
    } else {
        Channel::Log
    }
}

/// A finding together with its channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub finding: Finding,
    pub channel: Channel,
}

/// All findings of a run, grouped by source
#[derive(Debug, Clone, Default)]
pub struct FindingsReport {
    sources: BTreeMap<SourceId, Vec<ReportEntry>>,
}

impl FindingsReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one finding under `source`
    pub fn record(&mut self, source: &SourceId, finding: Finding, channel: Channel) {
        self.sources
            .entry(source.clone())
            .or_default()
            .push(ReportEntry { finding, channel });
    }

    /// Append findings of one building, routing each one
    pub fn record_building(
        &mut self,
        source: &SourceId,
        findings: impl IntoIterator<Item = Finding>,
        rico_enabled: bool,
    ) {
        for finding in findings {
            let channel = route(&finding, source.layer, rico_enabled);
            self.record(source, finding, channel);
        }
    }

    /// Merge another report into this one, appending per source
    pub fn merge(&mut self, other: FindingsReport) {
        for (source, entries) in other.sources {
            self.sources.entry(source).or_default().extend(entries);
        }
    }

    /// Entries recorded for one source, in recording order
    pub fn entries(&self, source: &SourceId) -> &[ReportEntry] {
        self.sources.get(source).map(|e| e.as_slice()).unwrap_or(&[])
    }

    /// Findings recorded for one source
    pub fn findings(&self, source: &SourceId) -> impl Iterator<Item = &Finding> {
        self.entries(source).iter().map(|e| &e.finding)
    }

    /// Every finding about a given building, across sources
    pub fn findings_for(&self, subject: &str) -> Vec<&Finding> {
        self.iter()
            .map(|(_, entry)| &entry.finding)
            .filter(|f| f.subject == subject)
            .collect()
    }

    /// Sources that have at least one finding
    pub fn sources(&self) -> impl Iterator<Item = &SourceId> {
        self.sources.keys()
    }

    /// All entries, grouped by source in source order
    pub fn iter(&self) -> impl Iterator<Item = (&SourceId, &ReportEntry)> {
        self.sources
            .iter()
            .flat_map(|(source, entries)| entries.iter().map(move |e| (source, e)))
    }

    pub fn len(&self) -> usize {
        self.sources.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fatal_count(&self) -> usize {
        self.iter().filter(|(_, e)| e.finding.is_fatal()).count()
    }

    pub fn has_user_findings(&self) -> bool {
        self.iter().any(|(_, e)| e.channel == Channel::User)
    }

    /// Player-facing text, one block per source
    pub fn user_text(&self) -> String {
        let mut text = String::new();
        for (source, entries) in &self.sources {
            let user: Vec<_> = entries.iter().filter(|e| e.channel == Channel::User).collect();
            if user.is_empty() {
                continue;
            }
            let _ = writeln!(text, "Problems found in {}:", source);
            for entry in user {
                let _ = writeln!(text, "  {}", entry.finding);
            }
        }
        text
    }

    /// Write the log-channel findings through `tracing`
    pub fn emit_log(&self) {
        for (source, entry) in self.iter() {
            if entry.channel != Channel::Log {
                continue;
            }
            if entry.finding.kind.is_informational() {
                tracing::info!("{}: {}", source, entry.finding);
            } else {
                tracing::warn!("{}: {}", source, entry.finding);
            }
        }
    }
}

/// Serialized as a list of `{ source, entries }` so map keys stay plain strings
impl Serialize for FindingsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct SourceEntries<'a> {
            source: &'a SourceId,
            entries: &'a [ReportEntry],
        }

        let mut seq = serializer.serialize_seq(Some(self.sources.len()))?;
        for (source, entries) in &self.sources {
            seq.serialize_element(&SourceEntries { source, entries })?;
        }
        seq.end()
    }
}
