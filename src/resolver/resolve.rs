//! Map a validated descriptor onto a behavior variant and item class.
//!
//! Evaluation order is fixed:
//! 1. disabled or discarded entries resolve to nothing
//! 2. growable downgrade (size, then network paths)
//! 3. service dispatch picks the variant and class label
//! 4. parameters are copied from the descriptor
//! 5. placement follows the final growable flag
//!
//! Resolution is a pure function of its inputs and never fails; anomalies
//! come back as findings.

use crate::core::config::{Capabilities, RicoConfig};
use crate::core::types::{PlacementMode, Service, SubService};
use crate::diagnostics::finding::{Finding, FindingKind};
use crate::resolver::behavior::{BehaviorParameters, BehaviorVariant, ResolvedBehavior, ResourceImport};
use crate::resolver::prefab::PrefabFacts;
use crate::validation::descriptor::BuildingDescriptor;
use crate::validation::validator::Validation;

/// Class label shared by every dummy building
pub const BEAUTIFICATION_CLASS: &str = "Beautification Item";

/// Fallback class when a commercial specialisation is unavailable
pub const LOW_COMMERCIAL_FALLBACK: &str = "Low Commercial - Level1";

/// Outcome of resolving one descriptor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    pub behavior: Option<ResolvedBehavior>,
    pub findings: Vec<Finding>,
}

impl Resolution {
    fn skipped() -> Self {
        Self::default()
    }
}

/// Resolves descriptors against prefab facts and available capabilities
#[derive(Debug, Clone)]
pub struct Resolver {
    max_growable_width: u32,
    max_growable_length: u32,
    ploppable_construction_time: u32,
    capabilities: Capabilities,
}

impl Resolver {
    pub fn new(config: &RicoConfig) -> Self {
        Self {
            max_growable_width: config.max_growable_width,
            max_growable_length: config.max_growable_length,
            ploppable_construction_time: config.ploppable_construction_time,
            capabilities: config.capabilities,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Resolve the outcome of validation; discarded entries resolve to nothing
    pub fn resolve_validated(
        &self,
        validation: &Validation,
        facts: Option<&PrefabFacts>,
    ) -> Resolution {
        match &validation.descriptor {
            Some(descriptor) => self.resolve(descriptor, facts),
            None => Resolution::skipped(),
        }
    }

    /// Resolve one descriptor.
    ///
    /// Missing prefab facts skip the growable downgrade checks.
    pub fn resolve(&self, descriptor: &BuildingDescriptor, facts: Option<&PrefabFacts>) -> Resolution {
        if !descriptor.rico_enabled {
            tracing::debug!("'{}' is not enabled; skipping", descriptor.name);
            return Resolution::skipped();
        }

        let mut findings = Vec::new();
        let mut growable = descriptor.growable;

        if growable {
            if let Some(facts) = facts {
                growable = self.check_growable(descriptor, facts, &mut findings);
            }
        }

        let mut incoming_resource = None;
        let class_label = match descriptor.service {
            Service::Dummy => {
                growable = false;
                Some(BEAUTIFICATION_CLASS.to_string())
            }
            Service::Residential => Some(self.residential_class(descriptor, &mut findings)),
            Service::Office => Some(self.office_class(descriptor)),
            Service::Industrial => Some(industrial_class(descriptor)),
            Service::Extractor => extractor_class(descriptor),
            Service::Commercial => Some(self.commercial_class(
                descriptor,
                &mut findings,
                &mut incoming_resource,
            )),
        };

        let Some(class_label) = class_label else {
            findings.push(Finding::non_fatal(
                FindingKind::NoMatchingClass,
                &descriptor.name,
                format!(
                    "extractor building {} has unrecognized industry '{}'; no behavior assigned",
                    descriptor.name,
                    descriptor.authored_token()
                ),
            ));
            return Resolution {
                behavior: None,
                findings,
            };
        };

        let variant = BehaviorVariant::for_service(descriptor.service, growable);
        let parameters = self.parameters(descriptor, variant, incoming_resource);

        tracing::debug!(
            "resolved '{}' to {} with class '{}'",
            descriptor.name,
            variant,
            class_label
        );

        Resolution {
            behavior: Some(ResolvedBehavior {
                name: descriptor.name.clone(),
                variant,
                class_label,
                parameters,
                growable,
                placement: PlacementMode::from_growable(growable),
            }),
            findings,
        }
    }

    /// Apply the growable limits; both checks run independently
    fn check_growable(
        &self,
        descriptor: &BuildingDescriptor,
        facts: &PrefabFacts,
        findings: &mut Vec<Finding>,
    ) -> bool {
        let mut growable = true;

        if facts.width > self.max_growable_width || facts.length > self.max_growable_length {
            growable = false;
            findings.push(Finding::non_fatal(
                FindingKind::TooLargeForGrowable,
                &descriptor.name,
                format!(
                    "building '{}' can't be growable because it is too big ({}x{}, limit {}x{})",
                    descriptor.name,
                    facts.width,
                    facts.length,
                    self.max_growable_width,
                    self.max_growable_length
                ),
            ));
        }

        if facts.has_network_paths {
            growable = false;
            findings.push(Finding::non_fatal(
                FindingKind::HasNetworkPaths,
                &descriptor.name,
                format!(
                    "building '{}' can't be growable because it contains network assets",
                    descriptor.name
                ),
            ));
        }

        growable
    }

    fn residential_class(
        &self,
        descriptor: &BuildingDescriptor,
        findings: &mut Vec<Finding>,
    ) -> String {
        let level = descriptor.level;
        let eco = self.capabilities.eco_specialization;

        match descriptor.sub_service {
            Some(SubService::LowEco) if eco => format!("Low Residential Eco - Level{}", level),
            Some(SubService::LowEco) => format!("Low Residential - Level{}", level),
            Some(SubService::HighEco) if eco => format!("High Residential Eco - Level{}", level),
            Some(SubService::HighEco) | Some(SubService::High) => {
                format!("High Residential - Level{}", level)
            }
            _ => {
                if !descriptor.authored_as(SubService::Low) {
                    findings.push(fallback_finding(descriptor, "Residential", "low residential"));
                }
                format!("Low Residential - Level{}", level)
            }
        }
    }

    fn office_class(&self, descriptor: &BuildingDescriptor) -> String {
        match descriptor.sub_service {
            Some(SubService::HighTech) if self.capabilities.eco_specialization => {
                "Office - Hightech".to_string()
            }
            // Without the IT cluster, high tech offices become plain level 3 offices
            Some(SubService::HighTech) => "Office - Level3".to_string(),
            _ => format!("Office - Level{}", descriptor.level),
        }
    }

    fn commercial_class(
        &self,
        descriptor: &BuildingDescriptor,
        findings: &mut Vec<Finding>,
        incoming_resource: &mut Option<ResourceImport>,
    ) -> String {
        let level = descriptor.level;
        let Capabilities {
            eco_specialization,
            tourism_leisure,
        } = self.capabilities;

        match descriptor.sub_service {
            Some(SubService::Eco) if eco_specialization => {
                // Eco commercial only imports food
                *incoming_resource = Some(ResourceImport::Food);
                "Eco Commercial".to_string()
            }
            Some(SubService::Tourist) if tourism_leisure => "Tourist Commercial - Land".to_string(),
            Some(SubService::Leisure) if tourism_leisure => "Leisure Commercial".to_string(),
            Some(SubService::Eco | SubService::Tourist | SubService::Leisure) => {
                LOW_COMMERCIAL_FALLBACK.to_string()
            }
            Some(SubService::High) => format!("High Commercial - Level{}", level),
            _ => {
                if !descriptor.authored_as(SubService::Low) {
                    findings.push(fallback_finding(descriptor, "Commercial", "low commercial"));
                }
                format!("Low Commercial - Level{}", level)
            }
        }
    }

    fn parameters(
        &self,
        descriptor: &BuildingDescriptor,
        variant: BehaviorVariant,
        incoming_resource: Option<ResourceImport>,
    ) -> BehaviorParameters {
        let service = descriptor.service;
        let pollutes = matches!(service, Service::Industrial | Service::Extractor);

        BehaviorParameters {
            construction_cost: descriptor.construction_cost,
            home_count: (service == Service::Residential).then_some(descriptor.home_count),
            workplace_count: (service.is_private() && service != Service::Residential)
                .then_some(descriptor.workplace_count),
            pollution_enabled: pollutes.then_some(descriptor.pollution_enabled),
            incoming_resource,
            construction_time: (variant.is_private() && !variant.is_growable())
                .then_some(self.ploppable_construction_time),
        }
    }
}

fn industrial_class(descriptor: &BuildingDescriptor) -> String {
    match descriptor.sub_service.and_then(|s| s.industry_label()) {
        Some(industry) => format!("{} - Processing", industry),
        None => format!("Industrial - Level{}", descriptor.level),
    }
}

/// Extractors have no generic class, so an unknown industry yields nothing
fn extractor_class(descriptor: &BuildingDescriptor) -> Option<String> {
    descriptor
        .sub_service
        .and_then(|s| s.industry_label())
        .map(|industry| format!("{} - Extractor", industry))
}

fn fallback_finding(descriptor: &BuildingDescriptor, kind: &str, fallback: &str) -> Finding {
    Finding::non_fatal(
        FindingKind::SubServiceFallback,
        &descriptor.name,
        format!(
            "{} building {} has invalid sub-service '{}'; reverting to {}",
            kind,
            descriptor.name,
            descriptor.authored_token(),
            fallback
        ),
    )
}
