//! Core vocabulary shared by the validator and the resolver

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Top-level service category of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Dummy,
    Residential,
    Office,
    Industrial,
    Extractor,
    Commercial,
}

impl Service {
    pub const ALL: [Service; 6] = [
        Service::Dummy,
        Service::Residential,
        Service::Office,
        Service::Industrial,
        Service::Extractor,
        Service::Commercial,
    ];

    /// Parse a settings-file token (case-insensitive, surrounding whitespace ignored)
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "dummy" => Some(Service::Dummy),
            "residential" => Some(Service::Residential),
            "office" => Some(Service::Office),
            "industrial" => Some(Service::Industrial),
            "extractor" => Some(Service::Extractor),
            "commercial" => Some(Service::Commercial),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Dummy => "dummy",
            Service::Residential => "residential",
            Service::Office => "office",
            Service::Industrial => "industrial",
            Service::Extractor => "extractor",
            Service::Commercial => "commercial",
        }
    }

    /// Sub-services this service accepts. Empty means the sub-service is not checked.
    pub fn sub_services(&self) -> &'static [SubService] {
        match self {
            Service::Dummy => &[],
            Service::Residential => &[
                SubService::Low,
                SubService::High,
                SubService::LowEco,
                SubService::HighEco,
            ],
            Service::Office => &[SubService::Generic, SubService::HighTech],
            Service::Industrial => &[
                SubService::Generic,
                SubService::Farming,
                SubService::Forest,
                SubService::Oil,
                SubService::Ore,
            ],
            Service::Extractor => &SubService::INDUSTRIES,
            Service::Commercial => &[
                SubService::Low,
                SubService::High,
                SubService::Eco,
                SubService::Tourist,
                SubService::Leisure,
            ],
        }
    }

    /// Sub-service substituted for an invalid one.
    ///
    /// Extractors have no generic form, so there is nothing to fall back to.
    pub fn default_sub_service(&self) -> Option<SubService> {
        match self {
            Service::Dummy | Service::Office | Service::Industrial => Some(SubService::Generic),
            Service::Residential | Service::Commercial => Some(SubService::Low),
            Service::Extractor => None,
        }
    }

    /// Whether `sub_service` is valid for this service
    pub fn accepts(&self, sub_service: SubService) -> bool {
        let valid = self.sub_services();
        valid.is_empty() || valid.contains(&sub_service)
    }

    /// Valid levels for a service/sub-service pair
    pub fn level_range(&self, sub_service: Option<SubService>) -> RangeInclusive<u8> {
        match (self, sub_service) {
            (Service::Residential, _) => 1..=5,
            (Service::Commercial, Some(SubService::Low | SubService::High)) => 1..=3,
            (Service::Office, Some(SubService::Generic)) => 1..=3,
            (Service::Industrial, Some(SubService::Generic)) => 1..=3,
            _ => 1..=1,
        }
    }

    /// Private buildings (everything except dummies) run a construction phase
    pub fn is_private(&self) -> bool {
        !matches!(self, Service::Dummy)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finer classification within a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubService {
    #[serde(rename = "generic")]
    Generic,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "low eco")]
    LowEco,
    #[serde(rename = "high eco")]
    HighEco,
    #[serde(rename = "high tech")]
    HighTech,
    #[serde(rename = "eco")]
    Eco,
    #[serde(rename = "tourist")]
    Tourist,
    #[serde(rename = "leisure")]
    Leisure,
    #[serde(rename = "farming")]
    Farming,
    #[serde(rename = "forest")]
    Forest,
    #[serde(rename = "oil")]
    Oil,
    #[serde(rename = "ore")]
    Ore,
}

impl SubService {
    /// Natural-resource industries shared by industrial and extractor buildings
    pub const INDUSTRIES: [SubService; 4] = [
        SubService::Farming,
        SubService::Forest,
        SubService::Oil,
        SubService::Ore,
    ];

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "generic" | "none" => Some(SubService::Generic),
            "low" => Some(SubService::Low),
            "high" => Some(SubService::High),
            "low eco" => Some(SubService::LowEco),
            "high eco" => Some(SubService::HighEco),
            "high tech" => Some(SubService::HighTech),
            "eco" => Some(SubService::Eco),
            "tourist" => Some(SubService::Tourist),
            "leisure" => Some(SubService::Leisure),
            "farming" => Some(SubService::Farming),
            "forest" => Some(SubService::Forest),
            "oil" => Some(SubService::Oil),
            "ore" => Some(SubService::Ore),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubService::Generic => "generic",
            SubService::Low => "low",
            SubService::High => "high",
            SubService::LowEco => "low eco",
            SubService::HighEco => "high eco",
            SubService::HighTech => "high tech",
            SubService::Eco => "eco",
            SubService::Tourist => "tourist",
            SubService::Leisure => "leisure",
            SubService::Farming => "farming",
            SubService::Forest => "forest",
            SubService::Oil => "oil",
            SubService::Ore => "ore",
        }
    }

    /// Whether `token` is spelled exactly as settings files write it.
    ///
    /// `none` is the generic token office buildings use.
    pub fn is_canonical_token(&self, token: &str) -> bool {
        token == self.as_str() || (*self == SubService::Generic && token == "none")
    }

    pub fn is_industry(&self) -> bool {
        Self::INDUSTRIES.contains(self)
    }

    /// Industry name as it appears in item-class labels ("Forest", "Oil", ...)
    pub fn industry_label(&self) -> Option<&'static str> {
        match self {
            SubService::Farming => Some("Farming"),
            SubService::Forest => Some("Forest"),
            SubService::Oil => Some("Oil"),
            SubService::Ore => Some("Ore"),
            _ => None,
        }
    }
}

impl fmt::Display for SubService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a converted building reaches the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// Spawned by zoning growth
    Automatic,
    /// Placed by the player
    Manual,
}

impl PlacementMode {
    pub fn from_growable(growable: bool) -> Self {
        if growable {
            PlacementMode::Automatic
        } else {
            PlacementMode::Manual
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_parse_is_case_insensitive() {
        assert_eq!(Service::parse("Residential"), Some(Service::Residential));
        assert_eq!(Service::parse(" office "), Some(Service::Office));
        assert_eq!(Service::parse(""), None);
        assert_eq!(Service::parse("monument"), None);
    }

    #[test]
    fn test_sub_service_tokens() {
        for service in Service::ALL {
            for sub in service.sub_services() {
                assert_eq!(SubService::parse(sub.as_str()), Some(*sub));
            }
        }
        assert_eq!(SubService::parse("none"), Some(SubService::Generic));
        assert_eq!(SubService::parse("bogus"), None);
    }

    #[test]
    fn test_default_sub_service_is_accepted() {
        for service in Service::ALL {
            if let Some(default) = service.default_sub_service() {
                assert!(service.accepts(default), "{} default must be valid", service);
            }
        }
        assert_eq!(Service::Extractor.default_sub_service(), None);
    }

    #[test]
    fn test_level_ranges() {
        assert_eq!(Service::Residential.level_range(Some(SubService::HighEco)), 1..=5);
        assert_eq!(Service::Commercial.level_range(Some(SubService::High)), 1..=3);
        assert_eq!(Service::Commercial.level_range(Some(SubService::Tourist)), 1..=1);
        assert_eq!(Service::Office.level_range(Some(SubService::HighTech)), 1..=1);
        assert_eq!(Service::Industrial.level_range(Some(SubService::Oil)), 1..=1);
        assert_eq!(Service::Extractor.level_range(None), 1..=1);
    }

    #[test]
    fn test_placement_from_growable() {
        assert_eq!(PlacementMode::from_growable(true), PlacementMode::Automatic);
        assert_eq!(PlacementMode::from_growable(false), PlacementMode::Manual);
    }
}
