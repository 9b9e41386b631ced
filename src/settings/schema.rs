//! XML schema of `PloppableRICODefinition` settings files.
//!
//! Every building attribute is read as an optional string so that a bad value
//! in one entry never fails the whole document. Typed interpretation is the
//! validator's job.
//!
//! ```xml
//! <PloppableRICODefinition>
//!   <Buildings>
//!     <RICOBuilding name="Tower" service="residential" sub-service="high"
//!                   level="3" homes="40" growable="false" />
//!   </Buildings>
//! </PloppableRICODefinition>
//! ```

use serde::{Deserialize, Serialize};

/// Root element of a settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "PloppableRICODefinition")]
pub struct RicoDefinition {
    #[serde(rename = "Buildings", default)]
    pub buildings: BuildingList,
}

impl RicoDefinition {
    pub fn new(buildings: Vec<RawBuilding>) -> Self {
        Self {
            buildings: BuildingList { items: buildings },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.items.is_empty()
    }
}

/// `<Buildings>` wrapper element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingList {
    #[serde(rename = "RICOBuilding", default)]
    pub items: Vec<RawBuilding>,
}

/// A single `<RICOBuilding>` entry exactly as authored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBuilding {
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@service", default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(rename = "@sub-service", default, skip_serializing_if = "Option::is_none")]
    pub sub_service: Option<String>,
    #[serde(rename = "@level", default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(rename = "@growable", default, skip_serializing_if = "Option::is_none")]
    pub growable: Option<String>,
    #[serde(rename = "@homes", default, skip_serializing_if = "Option::is_none")]
    pub homes: Option<String>,
    #[serde(rename = "@workplaces", default, skip_serializing_if = "Option::is_none")]
    pub workplaces: Option<String>,
    #[serde(rename = "@construction-cost", default, skip_serializing_if = "Option::is_none")]
    pub construction_cost: Option<String>,
    #[serde(rename = "@pollution-enabled", default, skip_serializing_if = "Option::is_none")]
    pub pollution_enabled: Option<String>,
    #[serde(rename = "@enable-rico", default, skip_serializing_if = "Option::is_none")]
    pub enable_rico: Option<String>,
}

impl RawBuilding {
    /// Start an entry with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_sub_service(mut self, sub_service: impl Into<String>) -> Self {
        self.sub_service = Some(sub_service.into());
        self
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level.to_string());
        self
    }

    pub fn with_growable(mut self, growable: bool) -> Self {
        self.growable = Some(growable.to_string());
        self
    }

    pub fn with_homes(mut self, homes: i64) -> Self {
        self.homes = Some(homes.to_string());
        self
    }

    pub fn with_workplaces(mut self, workplaces: i64) -> Self {
        self.workplaces = Some(workplaces.to_string());
        self
    }

    pub fn with_construction_cost(mut self, cost: i64) -> Self {
        self.construction_cost = Some(cost.to_string());
        self
    }

    pub fn with_pollution(mut self, enabled: bool) -> Self {
        self.pollution_enabled = Some(enabled.to_string());
        self
    }

    pub fn with_rico_enabled(mut self, enabled: bool) -> Self {
        self.enable_rico = Some(enabled.to_string());
        self
    }
}
