//! # readiness-core
//!
//! The deterministic readiness engine - THE LOGIC.
//!
//! Tracks how far an entity (Planning or Rollup) has progressed through its
//! setup wizard. Raw configuration payloads go in, a discrete progress
//! percentage and presence flags come out.
//!
//! ```text
//! raw payloads ──► detector ──► DataPresence ──► rules ──► Progress
//!                                                  ▲
//!                              metadata ───────────┘ (tab count, ceiling)
//! ```
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is pure: no I/O, no async, no logging, no global state
//! - Never fails on bad payloads; malformed JSON is reported as a diagnostic
//!   and treated as absent
//! - Uses no floating-point arithmetic

// =============================================================================
// MODULES
// =============================================================================

pub mod assessment;
pub mod detector;
pub mod metadata;
pub mod primitives;
pub mod rules;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{DataPresence, EntityType, Progress, ReadinessError, SetupStep};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use assessment::{
    EntitySnapshot, FinancialYear, PeriodSetup, PresenceInspection, ReadinessReport, WeekSetup,
    assess, assess_strict, determine_data_presence, inspect_data_presence,
};
pub use detector::{
    Diagnostics, SelectionKind, SelectionShape, has_countries_and_currencies, has_modules,
    has_period_setup,
};
pub use metadata::{EntityTypeMetadata, get_max_progress, get_tab_count, get_tab_count_for_tag};
pub use rules::{ProgressRuleEngine, calculate_progress};
