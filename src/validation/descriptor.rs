//! Validated building descriptor

use crate::core::types::{Service, SubService};
use serde::Serialize;

/// A building entry after validation.
///
/// Every field holds a usable value; problems found on the way were turned
/// into findings and replaced with defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildingDescriptor {
    pub name: String,
    pub service: Service,
    /// Cleaned sub-service. `None` only for an extractor with an unknown industry.
    pub sub_service: Option<SubService>,
    /// Sub-service token as written in the settings file, if any
    pub authored_sub_service: Option<String>,
    pub level: u8,
    pub growable: bool,
    pub home_count: u32,
    pub workplace_count: u32,
    pub construction_cost: u32,
    pub pollution_enabled: bool,
    /// Whether this entry is active at all
    pub rico_enabled: bool,
}

impl BuildingDescriptor {
    /// A minimal enabled descriptor with the service's default sub-service
    pub fn new(name: impl Into<String>, service: Service) -> Self {
        Self {
            name: name.into(),
            service,
            sub_service: service.default_sub_service(),
            authored_sub_service: None,
            level: 1,
            growable: false,
            home_count: 0,
            workplace_count: 0,
            construction_cost: 10,
            pollution_enabled: true,
            rico_enabled: true,
        }
    }

    /// Set the sub-service as if it had been authored that way
    pub fn with_sub_service(mut self, sub_service: SubService) -> Self {
        self.sub_service = Some(sub_service);
        self.authored_sub_service = Some(sub_service.as_str().to_string());
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_growable(mut self, growable: bool) -> Self {
        self.growable = growable;
        self
    }

    /// Sub-service token to quote in messages
    pub fn authored_token(&self) -> &str {
        self.authored_sub_service
            .as_deref()
            .or_else(|| self.sub_service.map(|s| s.as_str()))
            .unwrap_or("")
    }

    /// Whether the authored sub-service is exactly the token of `expected`.
    ///
    /// An entry with no sub-service attribute counts as its service default.
    pub fn authored_as(&self, expected: SubService) -> bool {
        match &self.authored_sub_service {
            Some(token) => token == expected.as_str(),
            None => self.service.default_sub_service() == Some(expected),
        }
    }
}
