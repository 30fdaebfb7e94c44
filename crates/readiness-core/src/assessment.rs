//! # Assessment
//!
//! Orchestration: raw snapshot → presence triple → progress → report.
//!
//! Every call recomputes from scratch. Nothing is cached and no input is
//! mutated, so identical snapshots always produce identical reports.

use crate::detector::{self, Diagnostics};
use crate::metadata::{get_max_progress, get_tab_count};
use crate::primitives::{ENTITY_TYPE_KEY, MODULES_KEY};
use crate::rules::ProgressRuleEngine;
use crate::{DataPresence, EntityType, Progress, ReadinessError, SetupStep};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

// =============================================================================
// DATA PRESENCE
// =============================================================================

/// Presence triple plus the recoverable problems found while computing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceInspection {
    pub presence: DataPresence,
    pub diagnostics: Diagnostics,
}

/// Run all three presence checks, keeping parse diagnostics.
///
/// `entity_data.modules` is the modules source.
#[must_use]
pub fn inspect_data_presence(
    entity_data: &Value,
    period_setup: &Value,
    selected_countries: &Value,
    selected_currencies: &Value,
) -> PresenceInspection {
    let mut diagnostics = Diagnostics::new();

    let has_countries_and_currencies = detector::check_countries_and_currencies(
        selected_countries,
        selected_currencies,
        &mut diagnostics,
    );
    let has_period_setup = detector::has_period_setup(period_setup);
    let modules = entity_data.get(MODULES_KEY).unwrap_or(&Value::Null);
    let has_modules = detector::check_modules(modules, &mut diagnostics);

    PresenceInspection {
        presence: DataPresence::new(has_countries_and_currencies, has_period_setup, has_modules),
        diagnostics,
    }
}

/// Run all three presence checks.
#[must_use]
pub fn determine_data_presence(
    entity_data: &Value,
    period_setup: &Value,
    selected_countries: &Value,
    selected_currencies: &Value,
) -> DataPresence {
    inspect_data_presence(
        entity_data,
        period_setup,
        selected_countries,
        selected_currencies,
    )
    .presence
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// One entity's raw configuration, as a host data layer holds it.
///
/// Every field is optional; missing payloads are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntitySnapshot {
    pub entity_type: Option<String>,
    pub entity_data: Value,
    pub period_setup: Value,
    pub selected_countries: Value,
    pub selected_currencies: Value,
    pub current_tab: Option<usize>,
}

impl EntitySnapshot {
    /// Entity type tag: the top-level field, else `entityData.entityType`.
    #[must_use]
    pub fn entity_tag(&self) -> Option<&str> {
        self.entity_type
            .as_deref()
            .or_else(|| self.entity_data.get(ENTITY_TYPE_KEY).and_then(Value::as_str))
    }

    /// Run the presence checks over this snapshot's payloads.
    #[must_use]
    pub fn inspect(&self) -> PresenceInspection {
        inspect_data_presence(
            &self.entity_data,
            &self.period_setup,
            &self.selected_countries,
            &self.selected_currencies,
        )
    }
}

// =============================================================================
// TYPED PERIOD SETUP
// =============================================================================

/// Financial year definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialYear {
    pub name: String,
    pub start_month: String,
    pub end_month: String,
}

/// Week numbering definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSetup {
    pub name: String,
    pub month_for_week_one: String,
    pub starting_day_of_week: String,
}

/// Typed period setup for hosts that build records in Rust.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSetup {
    pub financial_year: FinancialYear,
    pub week_setup: WeekSetup,
}

impl PeriodSetup {
    /// The raw record shape the detector reads.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "financialYear": {
                "name": self.financial_year.name,
                "startMonth": self.financial_year.start_month,
                "endMonth": self.financial_year.end_month,
            },
            "weekSetup": {
                "name": self.week_setup.name,
                "monthForWeekOne": self.week_setup.month_for_week_one,
                "startingDayOfWeek": self.week_setup.starting_day_of_week,
            }
        })
    }

    /// Check if every field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        detector::has_period_setup(&self.to_value())
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Assessed readiness of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub entity_type: EntityType,
    pub presence: DataPresence,
    pub progress: Progress,
    pub max_progress: u8,
    pub tab_count: usize,
    pub completed_steps: Vec<SetupStep>,
    pub next_step: Option<SetupStep>,
    pub complete: bool,
    pub current_tab: Option<usize>,
    /// Payloads that were malformed and treated as absent.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ReadinessReport {
    /// Build a report for a known entity type.
    #[must_use]
    pub fn build(entity_type: EntityType, snapshot: &EntitySnapshot) -> Self {
        let engine = ProgressRuleEngine::new();
        let PresenceInspection {
            presence,
            diagnostics,
        } = snapshot.inspect();

        let progress = engine.calculate(entity_type, &presence, snapshot.current_tab);

        Self {
            entity_type,
            presence,
            progress,
            max_progress: get_max_progress(entity_type),
            tab_count: get_tab_count(entity_type),
            completed_steps: engine.completed_steps(entity_type, &presence),
            next_step: engine.next_step(entity_type, &presence),
            complete: progress.is_complete(),
            current_tab: snapshot.current_tab,
            warnings: diagnostics
                .into_issues()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Assess a snapshot, treating unknown or missing entity tags as Planning.
#[must_use]
pub fn assess(snapshot: &EntitySnapshot) -> ReadinessReport {
    let entity_type = EntityType::from_tag(snapshot.entity_tag().unwrap_or_default());
    ReadinessReport::build(entity_type, snapshot)
}

/// Assess a snapshot, rejecting unknown or missing entity tags.
pub fn assess_strict(snapshot: &EntitySnapshot) -> Result<ReadinessReport, ReadinessError> {
    let tag = snapshot
        .entity_tag()
        .ok_or_else(|| ReadinessError::InvalidSnapshot("missing entityType".to_string()))?;
    let entity_type: EntityType = tag.parse()?;
    Ok(ReadinessReport::build(entity_type, snapshot))
}

// =============================================================================
// TESTS
// =============================================================================
