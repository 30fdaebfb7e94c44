//! # Core Type Definitions
//!
//! This module contains all core types for the readiness engine:
//! - Entity classification (`EntityType`, `SetupStep`)
//! - Presence signals (`DataPresence`)
//! - Output values (`Progress`)
//! - Error types (`ReadinessError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Are plain values with no interior state
//! - Implement `Ord` where a stable ordering is meaningful

use crate::primitives::{
    MAX_PROGRESS, PLANNING_ENTITY_TAG, PLANNING_TAB_COUNT, ROLLUP_ENTITY_TAG, ROLLUP_TAB_COUNT,
};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// ENTITY TYPE
// =============================================================================

/// Kind of business unit whose setup completeness is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Three-step setup: Countries/Currencies, Period Setup, Modules.
    #[serde(rename = "Planning Entity")]
    Planning,
    /// Two-step setup: Countries/Currencies, Period Setup.
    #[serde(rename = "Rollup Entity")]
    Rollup,
}

impl EntityType {
    /// Resolve a raw tag, treating anything that is not the Rollup tag as Planning.
    ///
    /// This mirrors how the rule table branches: only `Rollup Entity` takes the
    /// two-step path, every other tag (including unknown ones) takes the
    /// three-step path.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag == ROLLUP_ENTITY_TAG {
            EntityType::Rollup
        } else {
            EntityType::Planning
        }
    }

    /// The tag string used by the host data layer.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            EntityType::Planning => PLANNING_ENTITY_TAG,
            EntityType::Rollup => ROLLUP_ENTITY_TAG,
        }
    }

    /// Number of setup tabs shown for this entity type.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        match self {
            EntityType::Planning => PLANNING_TAB_COUNT,
            EntityType::Rollup => ROLLUP_TAB_COUNT,
        }
    }

    /// Ordered setup steps for this entity type.
    #[must_use]
    pub fn steps(&self) -> &'static [SetupStep] {
        match self {
            EntityType::Planning => &[
                SetupStep::CountriesAndCurrencies,
                SetupStep::PeriodSetup,
                SetupStep::Modules,
            ],
            EntityType::Rollup => &[SetupStep::CountriesAndCurrencies, SetupStep::PeriodSetup],
        }
    }

    /// Every progress value the rule table can produce for this entity type.
    #[must_use]
    pub fn allowed_progress(&self) -> &'static [Progress] {
        match self {
            EntityType::Planning => &[
                Progress::None,
                Progress::OneThird,
                Progress::TwoThirds,
                Progress::Complete,
            ],
            EntityType::Rollup => &[Progress::None, Progress::Half, Progress::Complete],
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Strict parsing: unknown tags are an error.
impl FromStr for EntityType {
    type Err = ReadinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PLANNING_ENTITY_TAG => Ok(EntityType::Planning),
            ROLLUP_ENTITY_TAG => Ok(EntityType::Rollup),
            other => Err(ReadinessError::UnknownEntityType(other.to_string())),
        }
    }
}

// =============================================================================
// SETUP STEP
// =============================================================================

/// One tab of the entity setup wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SetupStep {
    CountriesAndCurrencies,
    PeriodSetup,
    Modules,
}

impl SetupStep {
    /// Human-readable tab label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SetupStep::CountriesAndCurrencies => "Countries & Currencies",
            SetupStep::PeriodSetup => "Period Setup",
            SetupStep::Modules => "Modules",
        }
    }

    /// Whether the presence triple reports this step as filled in.
    #[must_use]
    pub fn is_present(&self, presence: &DataPresence) -> bool {
        match self {
            SetupStep::CountriesAndCurrencies => presence.has_countries_and_currencies,
            SetupStep::PeriodSetup => presence.has_period_setup,
            SetupStep::Modules => presence.has_modules,
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// DATA PRESENCE
// =============================================================================

/// The three presence signals extracted from an entity's raw configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPresence {
    pub has_countries_and_currencies: bool,
    pub has_period_setup: bool,
    pub has_modules: bool,
}

impl DataPresence {
    /// Build a presence triple from explicit flags.
    #[must_use]
    pub const fn new(
        has_countries_and_currencies: bool,
        has_period_setup: bool,
        has_modules: bool,
    ) -> Self {
        Self {
            has_countries_and_currencies,
            has_period_setup,
            has_modules,
        }
    }

    /// All eight possible triples, in a fixed order.
    #[must_use]
    pub fn all() -> [DataPresence; 8] {
        let mut out = [DataPresence::default(); 8];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = DataPresence::new(i & 0b100 != 0, i & 0b010 != 0, i & 0b001 != 0);
        }
        out
    }
}

// =============================================================================
// PROGRESS
// =============================================================================

/// Discrete readiness indicator surfaced to presentation layers.
///
/// The rule table only ever produces these five values. Percentages are
/// stored as fixed-point tenths of a percent; the `f64` view is a literal
/// lookup, not a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Progress {
    /// 0%
    #[default]
    None,
    /// 33.3% (Planning, first of three steps)
    OneThird,
    /// 50% (Rollup, first of two steps)
    Half,
    /// 66.6% (Planning, two of three steps)
    TwoThirds,
    /// 100%
    Complete,
}

impl Progress {
    /// Percentage in tenths of a percent (`333` is 33.3%).
    #[must_use]
    pub const fn tenths(self) -> u16 {
        match self {
            Progress::None => 0,
            Progress::OneThird => 333,
            Progress::Half => 500,
            Progress::TwoThirds => 666,
            Progress::Complete => 1000,
        }
    }

    /// Whole-percent view, truncated (`OneThird` is 33).
    #[must_use]
    pub const fn whole_percent(self) -> u8 {
        (self.tenths() / 10) as u8
    }

    /// Percentage as presented to the UI.
    #[must_use]
    pub const fn as_percent(self) -> f64 {
        match self {
            Progress::None => 0.0,
            Progress::OneThird => 33.3,
            Progress::Half => 50.0,
            Progress::TwoThirds => 66.6,
            Progress::Complete => 100.0,
        }
    }

    /// Reverse lookup from tenths of a percent.
    #[must_use]
    pub const fn from_tenths(tenths: u16) -> Option<Self> {
        match tenths {
            0 => Some(Progress::None),
            333 => Some(Progress::OneThird),
            500 => Some(Progress::Half),
            666 => Some(Progress::TwoThirds),
            1000 => Some(Progress::Complete),
            _ => None,
        }
    }

    /// Check if setup is finished.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.whole_percent() == MAX_PROGRESS
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenths = self.tenths();
        if tenths % 10 == 0 {
            write!(f, "{}%", tenths / 10)
        } else {
            write!(f, "{}.{}%", tenths / 10, tenths % 10)
        }
    }
}

/// Serialized as a plain JSON number (`33.3`), the shape UI consumers expect.
impl Serialize for Progress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_percent())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the readiness engine and its CLI.
///
/// - Presence checks never return these; malformed payloads surface as
///   diagnostics and collapse to "absent"
/// - Use `Result<T, ReadinessError>` for fallible operations
/// - The CORE should never panic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadinessError {
    /// A JSON-encoded payload field could not be parsed.
    #[error("Malformed JSON in {field}: {reason}")]
    MalformedJson { field: &'static str, reason: String },

    /// An entity type tag is not one of the known tags.
    #[error("Unknown entity type: {0:?}")]
    UnknownEntityType(String),

    /// A snapshot document does not have the expected shape.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A report could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tag_is_lenient() {
        assert_eq!(EntityType::from_tag("Rollup Entity"), EntityType::Rollup);
        assert_eq!(EntityType::from_tag("Planning Entity"), EntityType::Planning);
        assert_eq!(EntityType::from_tag("Legal Entity"), EntityType::Planning);
        assert_eq!(EntityType::from_tag(""), EntityType::Planning);
    }

    #[test]
    fn from_str_is_strict() {
        assert_eq!("Rollup Entity".parse::<EntityType>(), Ok(EntityType::Rollup));
        assert_eq!(
            "rollup entity".parse::<EntityType>(),
            Err(ReadinessError::UnknownEntityType("rollup entity".to_string()))
        );
    }

    #[test]
    fn entity_type_serializes_as_tag() {
        let json = serde_json::to_string(&EntityType::Rollup).expect("serialize");
        assert_eq!(json, "\"Rollup Entity\"");
        let back: EntityType = serde_json::from_str("\"Planning Entity\"").expect("deserialize");
        assert_eq!(back, EntityType::Planning);
    }

    #[test]
    fn steps_match_tab_count() {
        for ty in [EntityType::Planning, EntityType::Rollup] {
            assert_eq!(ty.steps().len(), ty.tab_count());
        }
    }

    #[test]
    fn progress_tenths_round_trip() {
        for p in [
            Progress::None,
            Progress::OneThird,
            Progress::Half,
            Progress::TwoThirds,
            Progress::Complete,
        ] {
            assert_eq!(Progress::from_tenths(p.tenths()), Some(p));
        }
        assert_eq!(Progress::from_tenths(334), None);
    }

    #[test]
    fn progress_display() {
        assert_eq!(Progress::None.to_string(), "0%");
        assert_eq!(Progress::OneThird.to_string(), "33.3%");
        assert_eq!(Progress::Half.to_string(), "50%");
        assert_eq!(Progress::TwoThirds.to_string(), "66.6%");
        assert_eq!(Progress::Complete.to_string(), "100%");
    }

    #[test]
    fn progress_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Progress::TwoThirds).expect("ser"), "66.6");
        assert_eq!(serde_json::to_string(&Progress::Complete).expect("ser"), "100.0");
    }

    #[test]
    fn only_complete_is_complete() {
        assert!(Progress::Complete.is_complete());
        assert!(!Progress::TwoThirds.is_complete());
        assert_eq!(Progress::TwoThirds.whole_percent(), 66);
    }

    #[test]
    fn all_presence_triples_are_distinct() {
        let all = DataPresence::all();
        let unique: std::collections::BTreeSet<_> = all
            .iter()
            .map(|p| (p.has_countries_and_currencies, p.has_period_setup, p.has_modules))
            .collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn presence_serializes_camel_case() {
        let json = serde_json::to_value(DataPresence::new(true, false, true)).expect("ser");
        assert_eq!(json["hasCountriesAndCurrencies"], true);
        assert_eq!(json["hasPeriodSetup"], false);
        assert_eq!(json["hasModules"], true);
    }
}
