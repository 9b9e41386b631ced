//! Turn raw settings entries into validated descriptors plus findings.
//!
//! Validation is total: malformed input never returns an error. Each rule
//! that fires appends exactly one finding, and rules are checked
//! independently so several may fire for one entry. Any fatal finding
//! discards the descriptor while keeping every finding collected.

use crate::core::config::RicoConfig;
use crate::core::types::{Service, SubService};
use crate::diagnostics::finding::{Finding, FindingKind};
use crate::settings::schema::RawBuilding;
use crate::settings::source::{SettingsSource, SourceId};
use crate::validation::descriptor::BuildingDescriptor;
use ahash::AHashSet;

const UNNAMED: &str = "(unnamed building)";

/// Outcome of validating one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// `None` when a fatal finding fired
    pub descriptor: Option<BuildingDescriptor>,
    pub findings: Vec<Finding>,
}

impl Validation {
    pub fn is_discarded(&self) -> bool {
        self.descriptor.is_none()
    }

    pub fn has_fatal(&self) -> bool {
        self.findings.iter().any(Finding::is_fatal)
    }

    /// Whether the entry is active; discarded entries count as inactive
    pub fn rico_enabled(&self) -> bool {
        self.descriptor.as_ref().map_or(false, |d| d.rico_enabled)
    }
}

/// Outcome of validating every entry of one source
#[derive(Debug, Clone)]
pub struct SourceValidation {
    pub source: SourceId,
    /// One result per entry, in file order
    pub buildings: Vec<Validation>,
    /// Findings about the source as a whole
    pub source_findings: Vec<Finding>,
}

impl SourceValidation {
    /// Descriptors that survived validation
    pub fn descriptors(&self) -> impl Iterator<Item = &BuildingDescriptor> {
        self.buildings.iter().filter_map(|v| v.descriptor.as_ref())
    }
}

/// Validates raw entries against the service vocabulary
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    config: &'a RicoConfig,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a RicoConfig) -> Self {
        Self { config }
    }

    /// Validate one entry
    pub fn validate(&self, raw: &RawBuilding) -> Validation {
        let mut findings = Vec::new();

        let name = raw
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if name.is_none() {
            findings.push(Finding::fatal(
                FindingKind::MissingName,
                UNNAMED,
                "building has no name",
            ));
        }
        let subject = name.clone().unwrap_or_else(|| UNNAMED.to_string());

        let service_token = raw.service.as_deref().unwrap_or("");
        let service = Service::parse(service_token);
        if service.is_none() {
            findings.push(Finding::fatal(
                FindingKind::UnrecognizedService,
                &subject,
                format!("unrecognized service '{}'", service_token.trim()),
            ));
        }
        if let Some(service) = service {
            if service_token != service.as_str() {
                findings.push(non_canonical_finding("service", service_token, service.as_str(), &subject));
            }
        }

        let authored_sub_service = raw.sub_service.clone();
        let sub_service = service.and_then(|service| {
            check_sub_service(service, authored_sub_service.as_deref(), &subject, &mut findings)
        });

        let level = parse_integer(raw.level.as_deref(), "level", 1, &subject, &mut findings);
        let level = match service {
            Some(service) => clamp_level(level, service, sub_service, &subject, &mut findings),
            None => level.clamp(1, u8::MAX as i64) as u8,
        };

        let home_count = parse_count(raw.homes.as_deref(), "homes", 0, &subject, &mut findings);
        let workplace_count =
            parse_count(raw.workplaces.as_deref(), "workplaces", 0, &subject, &mut findings);
        let construction_cost = parse_count(
            raw.construction_cost.as_deref(),
            "construction-cost",
            self.config.default_construction_cost,
            &subject,
            &mut findings,
        );

        let growable = parse_flag(raw.growable.as_deref(), "growable", false, &subject, &mut findings);
        let pollution_enabled = parse_flag(
            raw.pollution_enabled.as_deref(),
            "pollution-enabled",
            true,
            &subject,
            &mut findings,
        );
        let rico_enabled =
            parse_flag(raw.enable_rico.as_deref(), "enable-rico", true, &subject, &mut findings);

        let descriptor = match (name, service) {
            (Some(name), Some(service)) if !findings.iter().any(Finding::is_fatal) => {
                Some(BuildingDescriptor {
                    name,
                    service,
                    sub_service,
                    authored_sub_service,
                    level,
                    growable,
                    home_count,
                    workplace_count,
                    construction_cost,
                    pollution_enabled,
                    rico_enabled,
                })
            }
            _ => None,
        };

        if descriptor.is_none() {
            tracing::debug!("discarding building '{}' after fatal findings", subject);
        }

        Validation {
            descriptor,
            findings,
        }
    }

    /// Validate every entry of a source.
    ///
    /// Names are unique within a source: the first entry with a name wins and
    /// later entries with the same name are discarded.
    pub fn validate_source(&self, source: &SettingsSource) -> SourceValidation {
        let mut source_findings = Vec::new();
        if source.buildings.is_empty() {
            source_findings.push(Finding::non_fatal(
                FindingKind::NoBuildings,
                &source.id.name,
                format!("no parseable buildings in {}", source.id),
            ));
        }

        let mut seen = AHashSet::new();
        let buildings = source
            .buildings
            .iter()
            .map(|raw| {
                let mut validation = self.validate(raw);
                if let Some(descriptor) = &validation.descriptor {
                    if !seen.insert(descriptor.name.clone()) {
                        validation.findings.push(Finding::fatal(
                            FindingKind::DuplicateName,
                            &descriptor.name,
                            format!("duplicate entry for '{}' in {}; ignoring it", descriptor.name, source.id),
                        ));
                        validation.descriptor = None;
                    }
                }
                validation
            })
            .collect();

        SourceValidation {
            source: source.id.clone(),
            buildings,
            source_findings,
        }
    }
}

fn check_sub_service(
    service: Service,
    authored: Option<&str>,
    subject: &str,
    findings: &mut Vec<Finding>,
) -> Option<SubService> {
    let token = match authored {
        Some(token) if !token.trim().is_empty() => token,
        _ => return service.default_sub_service(),
    };

    let parsed = SubService::parse(token);
    if service == Service::Dummy {
        // Dummies ignore their sub-service
        return Some(parsed.unwrap_or(SubService::Generic));
    }

    match parsed {
        Some(sub_service) if service.accepts(sub_service) => {
            if !sub_service.is_canonical_token(token) {
                findings.push(non_canonical_finding("sub-service", token, sub_service.as_str(), subject));
            }
            Some(sub_service)
        }
        _ => {
            let default = service.default_sub_service();
            let message = match default {
                Some(default) => format!(
                    "invalid sub-service '{}' for {}; using '{}'",
                    token, service, default
                ),
                None => format!(
                    "invalid sub-service '{}' for {}; no default exists",
                    token, service
                ),
            };
            findings.push(Finding::non_fatal(
                FindingKind::InvalidSubService,
                subject,
                message,
            ));
            default
        }
    }
}

fn non_canonical_finding(field: &str, token: &str, canonical: &str, subject: &str) -> Finding {
    Finding::non_fatal(
        FindingKind::NonCanonicalToken,
        subject,
        format!("{} '{}' should be written '{}'; reading it as '{}'", field, token, canonical, canonical),
    )
}

fn clamp_level(
    level: i64,
    service: Service,
    sub_service: Option<SubService>,
    subject: &str,
    findings: &mut Vec<Finding>,
) -> u8 {
    let range = service.level_range(sub_service);
    let (min, max) = (*range.start() as i64, *range.end() as i64);
    if level < min || level > max {
        let clamped = level.clamp(min, max);
        findings.push(Finding::non_fatal(
            FindingKind::LevelOutOfRange,
            subject,
            format!(
                "level {} is outside {}..={} for {}; using {}",
                level, min, max, service, clamped
            ),
        ));
        clamped as u8
    } else {
        level as u8
    }
}

fn parse_integer(
    value: Option<&str>,
    field: &str,
    default: i64,
    subject: &str,
    findings: &mut Vec<Finding>,
) -> i64 {
    let Some(value) = value.map(str::trim) else {
        return default;
    };
    match value.parse::<i64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            findings.push(Finding::non_fatal(
                FindingKind::UnparsableValue,
                subject,
                format!("{} '{}' is not a number; using {}", field, value, default),
            ));
            default
        }
    }
}

fn parse_count(
    value: Option<&str>,
    field: &str,
    default: u32,
    subject: &str,
    findings: &mut Vec<Finding>,
) -> u32 {
    let parsed = parse_integer(value, field, default as i64, subject, findings);
    if parsed < 0 {
        findings.push(Finding::non_fatal(
            FindingKind::NegativeValue,
            subject,
            format!("{} {} is negative; using 0", field, parsed),
        ));
        return 0;
    }
    u32::try_from(parsed).unwrap_or(u32::MAX)
}

fn parse_flag(
    value: Option<&str>,
    field: &str,
    default: bool,
    subject: &str,
    findings: &mut Vec<Finding>,
) -> bool {
    let Some(value) = value.map(str::trim) else {
        return default;
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => true,
        "false" | "0" => false,
        _ => {
            findings.push(Finding::non_fatal(
                FindingKind::UnparsableValue,
                subject,
                format!("{} '{}' is not true or false; using {}", field, value, default),
            ));
            default
        }
    }
}
