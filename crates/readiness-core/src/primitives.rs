//! # Innate Primitives
//!
//! Hardcoded constants for the readiness engine.
//!
//! The engine starts with no data but fixed rules.
//! These values are compiled into the binary and are immutable at runtime.

/// Entity type tag for Rollup entities, as written by the host data layer.
pub const ROLLUP_ENTITY_TAG: &str = "Rollup Entity";

/// Entity type tag for Planning entities, as written by the host data layer.
pub const PLANNING_ENTITY_TAG: &str = "Planning Entity";

/// Number of setup tabs for a Rollup entity (Countries/Currencies, Period Setup).
pub const ROLLUP_TAB_COUNT: usize = 2;

/// Number of setup tabs for a Planning entity (adds Modules).
pub const PLANNING_TAB_COUNT: usize = 3;

/// Progress ceiling for every entity type, in whole percent.
pub const MAX_PROGRESS: u8 = 100;

// =============================================================================
// PAYLOAD FIELD KEYS
// =============================================================================

/// Key read from an encoded or wrapped country selection.
pub const SELECTED_COUNTRIES_KEY: &str = "selectedCountries";

/// Fallback key probed on wrapped country selections.
pub const COUNTRIES_KEY: &str = "countries";

/// Key read from an encoded or wrapped currency selection.
pub const SELECTED_CURRENCIES_KEY: &str = "selectedCurrencies";

/// Fallback key probed on wrapped currency selections.
pub const CURRENCIES_KEY: &str = "currencies";

/// Key of the modules list inside an entity record.
pub const MODULES_KEY: &str = "modules";

/// Key of the entity type tag inside an entity record.
pub const ENTITY_TYPE_KEY: &str = "entityType";

/// Financial year sub-record and its required leaf fields.
pub const FINANCIAL_YEAR_KEY: &str = "financialYear";
pub const FINANCIAL_YEAR_FIELDS: [&str; 3] = ["name", "startMonth", "endMonth"];

/// Week setup sub-record and its required leaf fields.
pub const WEEK_SETUP_KEY: &str = "weekSetup";
pub const WEEK_SETUP_FIELDS: [&str; 3] = ["name", "monthForWeekOne", "startingDayOfWeek"];

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of snapshots accepted in one batch.
///
/// Larger batches are rejected before assessment.
pub const MAX_BATCH_LENGTH: usize = 10_000;
