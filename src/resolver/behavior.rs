//! Resolved behavior: what an apply step attaches to a building prefab

use crate::core::types::{PlacementMode, Service};
use serde::Serialize;
use std::fmt;

/// Closed set of behavior variants.
///
/// Each private service has a ploppable (player-placed) and a growable
/// (zoning-spawned) form; dummies only exist ploppable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BehaviorVariant {
    Dummy,
    PloppableResidential,
    GrowableResidential,
    PloppableOffice,
    GrowableOffice,
    PloppableIndustrial,
    GrowableIndustrial,
    PloppableExtractor,
    GrowableExtractor,
    PloppableCommercial,
    GrowableCommercial,
}

impl BehaviorVariant {
    /// Variant for a service in its growable or ploppable form
    pub fn for_service(service: Service, growable: bool) -> Self {
        match (service, growable) {
            (Service::Dummy, _) => BehaviorVariant::Dummy,
            (Service::Residential, false) => BehaviorVariant::PloppableResidential,
            (Service::Residential, true) => BehaviorVariant::GrowableResidential,
            (Service::Office, false) => BehaviorVariant::PloppableOffice,
            (Service::Office, true) => BehaviorVariant::GrowableOffice,
            (Service::Industrial, false) => BehaviorVariant::PloppableIndustrial,
            (Service::Industrial, true) => BehaviorVariant::GrowableIndustrial,
            (Service::Extractor, false) => BehaviorVariant::PloppableExtractor,
            (Service::Extractor, true) => BehaviorVariant::GrowableExtractor,
            (Service::Commercial, false) => BehaviorVariant::PloppableCommercial,
            (Service::Commercial, true) => BehaviorVariant::GrowableCommercial,
        }
    }

    pub fn service(&self) -> Service {
        match self {
            BehaviorVariant::Dummy => Service::Dummy,
            BehaviorVariant::PloppableResidential | BehaviorVariant::GrowableResidential => {
                Service::Residential
            }
            BehaviorVariant::PloppableOffice | BehaviorVariant::GrowableOffice => Service::Office,
            BehaviorVariant::PloppableIndustrial | BehaviorVariant::GrowableIndustrial => {
                Service::Industrial
            }
            BehaviorVariant::PloppableExtractor | BehaviorVariant::GrowableExtractor => {
                Service::Extractor
            }
            BehaviorVariant::PloppableCommercial | BehaviorVariant::GrowableCommercial => {
                Service::Commercial
            }
        }
    }

    pub fn is_growable(&self) -> bool {
        matches!(
            self,
            BehaviorVariant::GrowableResidential
                | BehaviorVariant::GrowableOffice
                | BehaviorVariant::GrowableIndustrial
                | BehaviorVariant::GrowableExtractor
                | BehaviorVariant::GrowableCommercial
        )
    }

    /// Private building behaviors go through a construction phase
    pub fn is_private(&self) -> bool {
        self.service().is_private()
    }
}

impl fmt::Display for BehaviorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Goods a commercial building imports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceImport {
    Food,
}

/// Parameters copied onto the behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehaviorParameters {
    pub construction_cost: u32,
    /// Residential only
    pub home_count: Option<u32>,
    /// Office, industrial, extractor and commercial
    pub workplace_count: Option<u32>,
    /// Industrial and extractor only
    pub pollution_enabled: Option<bool>,
    /// Overrides the default imported goods
    pub incoming_resource: Option<ResourceImport>,
    /// Fixed construction time for ploppable private buildings
    pub construction_time: Option<u32>,
}

/// Decision for one building
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBehavior {
    pub name: String,
    pub variant: BehaviorVariant,
    /// Item class the building joins, e.g. "High Residential Eco - Level3"
    pub class_label: String,
    pub parameters: BehaviorParameters,
    /// Final growable flag after size and network checks
    pub growable: bool,
    pub placement: PlacementMode,
}
