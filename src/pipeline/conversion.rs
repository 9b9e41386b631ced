//! Conversion pipeline - orchestrates loading, validation and resolution
//!
//! raw settings -> validation -> layer precedence -> resolution -> report
//!
//! Uses rayon to validate many sources in parallel; validation holds no
//! shared state, so sources are independent.

use crate::core::config::RicoConfig;
use crate::diagnostics::finding::{Finding, FindingKind};
use crate::diagnostics::report::{route, Channel, FindingsReport};
use crate::resolver::behavior::ResolvedBehavior;
use crate::resolver::prefab::PrefabCatalog;
use crate::resolver::resolve::Resolver;
use crate::settings::reader::load_source;
use crate::settings::source::{DiscoveredSource, SettingsSource, SourceId};
use crate::validation::descriptor::BuildingDescriptor;
use crate::validation::validator::{SourceValidation, Validator};
use rayon::prelude::*;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Everything a conversion run produced
#[derive(Debug, Clone, Default)]
pub struct ConversionRun {
    /// Resolved behaviors, sorted by building name
    pub behaviors: Vec<ResolvedBehavior>,
    /// Buildings whose effective entry is disabled
    pub disabled: Vec<String>,
    pub report: FindingsReport,
}

impl ConversionRun {
    pub fn behavior(&self, name: &str) -> Option<&ResolvedBehavior> {
        self.behaviors.iter().find(|b| b.name == name)
    }
}

/// Runs settings sources through validation and resolution
pub struct ConversionPipeline<'a> {
    config: &'a RicoConfig,
    prefabs: &'a PrefabCatalog,
    resolver: Resolver,
}

impl<'a> ConversionPipeline<'a> {
    pub fn new(config: &'a RicoConfig, prefabs: &'a PrefabCatalog) -> Self {
        Self {
            config,
            prefabs,
            resolver: Resolver::new(config),
        }
    }

    /// Replace the resolver, e.g. to run with different capabilities
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Read discovered settings files.
    ///
    /// A file that cannot be read or deserialized is reported to the player
    /// and left out; the other files are unaffected.
    pub fn load_sources(&self, discovered: &[DiscoveredSource]) -> (Vec<SettingsSource>, FindingsReport) {
        let mut sources = Vec::with_capacity(discovered.len());
        let mut report = FindingsReport::new();

        for entry in discovered {
            match load_source(entry) {
                Ok(source) => sources.push(source),
                Err(e) => {
                    tracing::warn!("failed to read {}: {}", entry.id, e);
                    report.record(
                        &entry.id,
                        Finding::fatal(
                            FindingKind::SourceUnreadable,
                            &entry.id.name,
                            format!(
                                "unexpected error while deserializing {} settings file {} ({})",
                                entry.id.layer, entry.id.name, e
                            ),
                        ),
                        Channel::User,
                    );
                }
            }
        }

        (sources, report)
    }

    /// Load discovered files, then convert them
    pub fn run_discovered(&self, discovered: &[DiscoveredSource]) -> ConversionRun {
        let (sources, load_report) = self.load_sources(discovered);
        let mut run = self.run(&sources);

        let mut report = load_report;
        report.merge(std::mem::take(&mut run.report));
        run.report = report;
        run
    }

    /// Convert already deserialized sources
    pub fn run(&self, sources: &[SettingsSource]) -> ConversionRun {
        let validations = self.validate_all(sources);

        let mut report = FindingsReport::new();
        let mut effective: BTreeMap<String, (&SourceId, &BuildingDescriptor)> = BTreeMap::new();

        for validation in &validations {
            let source = &validation.source;

            for finding in &validation.source_findings {
                report.record(source, finding.clone(), route(finding, source.layer, false));
            }

            for building in &validation.buildings {
                report.record_building(source, building.findings.iter().cloned(), building.rico_enabled());

                if let Some(descriptor) = &building.descriptor {
                    select_effective(&mut effective, source, descriptor);
                }
            }
        }

        let mut behaviors = Vec::new();
        let mut disabled = Vec::new();

        for (name, (source, descriptor)) in &effective {
            if !descriptor.rico_enabled {
                disabled.push(name.clone());
            }

            let resolution = self.resolver.resolve(descriptor, self.prefabs.get(name));
            report.record_building(source, resolution.findings, descriptor.rico_enabled);

            if let Some(behavior) = resolution.behavior {
                behaviors.push(behavior);
            }
        }

        tracing::info!(
            "converted {} buildings from {} sources ({} disabled, {} findings)",
            behaviors.len(),
            sources.len(),
            disabled.len(),
            report.len()
        );

        ConversionRun {
            behaviors,
            disabled,
            report,
        }
    }

    fn validate_all(&self, sources: &[SettingsSource]) -> Vec<SourceValidation> {
        let validator = Validator::new(self.config);

        if sources.len() >= self.config.parallel_threshold {
            sources
                .par_iter()
                .map(|source| validator.validate_source(source))
                .collect()
        } else {
            sources
                .iter()
                .map(|source| validator.validate_source(source))
                .collect()
        }
    }
}

/// Keep the entry from the highest-precedence layer; within a layer the first source wins
fn select_effective<'s>(
    effective: &mut BTreeMap<String, (&'s SourceId, &'s BuildingDescriptor)>,
    source: &'s SourceId,
    descriptor: &'s BuildingDescriptor,
) {
    match effective.entry(descriptor.name.clone()) {
        Entry::Vacant(slot) => {
            slot.insert((source, descriptor));
        }
        Entry::Occupied(mut slot) => {
            let (current, _) = *slot.get();
            if source.layer < current.layer {
                tracing::debug!("'{}' from {} overrides {}", descriptor.name, source, current);
                slot.insert((source, descriptor));
            } else {
                tracing::debug!("'{}' from {} is overridden by {}", descriptor.name, source, current);
            }
        }
    }
}
