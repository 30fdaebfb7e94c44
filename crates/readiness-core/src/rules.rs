//! # Progress Rule Engine
//!
//! Maps an entity type and its presence triple to a discrete progress value.
//!
//! ## Decision Tables
//!
//! Checks run top-down and the first match wins.
//!
//! | Entity  | Countries/Currencies | Period Setup | Modules | Progress |
//! |---------|----------------------|--------------|---------|----------|
//! | Rollup  | yes                  | yes          | (any)   | 100      |
//! | Rollup  | yes                  | no           | (any)   | 50       |
//! | Rollup  | no                   | (any)        | (any)   | 0        |
//! | Planning| yes                  | yes          | yes     | 100      |
//! | Planning| yes                  | yes          | no      | 66.6     |
//! | Planning| yes                  | no           | (any)   | 33.3     |
//! | Planning| no                   | (any)        | (any)   | 0        |
//!
//! Countries/Currencies and Period Setup gate everything after them: a
//! Planning entity with modules but no period setup still reports 33.3 (or 0
//! without countries/currencies).

use crate::{DataPresence, EntityType, Progress, SetupStep};

/// Rule engine - pure function from presence to progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressRuleEngine;

impl ProgressRuleEngine {
    /// Create a new engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Apply the decision table for `entity_type`.
    ///
    /// `current_tab` is what the UI is showing; it is accepted for callers
    /// that pass it through but never changes the result.
    #[must_use]
    pub fn calculate(
        &self,
        entity_type: EntityType,
        presence: &DataPresence,
        _current_tab: Option<usize>,
    ) -> Progress {
        let cc = presence.has_countries_and_currencies;
        let ps = presence.has_period_setup;
        let m = presence.has_modules;

        match entity_type {
            EntityType::Rollup => {
                if cc && ps {
                    Progress::Complete
                } else if cc {
                    Progress::Half
                } else {
                    Progress::None
                }
            }
            EntityType::Planning => {
                if cc && ps && m {
                    Progress::Complete
                } else if cc && ps {
                    Progress::TwoThirds
                } else if cc {
                    Progress::OneThird
                } else {
                    Progress::None
                }
            }
        }
    }

    /// Steps counted toward progress: the leading run of present steps.
    #[must_use]
    pub fn completed_steps(
        &self,
        entity_type: EntityType,
        presence: &DataPresence,
    ) -> Vec<SetupStep> {
        entity_type
            .steps()
            .iter()
            .copied()
            .take_while(|step| step.is_present(presence))
            .collect()
    }

    /// First step still blocking progress, or `None` once complete.
    #[must_use]
    pub fn next_step(&self, entity_type: EntityType, presence: &DataPresence) -> Option<SetupStep> {
        entity_type
            .steps()
            .iter()
            .copied()
            .find(|step| !step.is_present(presence))
    }
}

/// Apply the decision table with a default engine.
#[must_use]
pub fn calculate_progress(
    entity_type: EntityType,
    presence: &DataPresence,
    current_tab: Option<usize>,
) -> Progress {
    ProgressRuleEngine::new().calculate(entity_type, presence, current_tab)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: DataPresence = DataPresence::new(false, false, false);
    const CC: DataPresence = DataPresence::new(true, false, false);
    const CC_PS: DataPresence = DataPresence::new(true, true, false);
    const ALL: DataPresence = DataPresence::new(true, true, true);
    const MODULES_ONLY: DataPresence = DataPresence::new(false, false, true);

    #[test]
    fn rollup_table() {
        assert_eq!(calculate_progress(EntityType::Rollup, &NONE, None), Progress::None);
        assert_eq!(calculate_progress(EntityType::Rollup, &CC, None), Progress::Half);
        assert_eq!(calculate_progress(EntityType::Rollup, &CC_PS, None), Progress::Complete);
    }

    #[test]
    fn rollup_ignores_modules() {
        let cc_m = DataPresence::new(true, false, true);
        assert_eq!(calculate_progress(EntityType::Rollup, &cc_m, None), Progress::Half);
        assert_eq!(calculate_progress(EntityType::Rollup, &ALL, None), Progress::Complete);
        assert_eq!(calculate_progress(EntityType::Rollup, &MODULES_ONLY, None), Progress::None);
    }

    #[test]
    fn planning_table() {
        assert_eq!(calculate_progress(EntityType::Planning, &NONE, None), Progress::None);
        assert_eq!(calculate_progress(EntityType::Planning, &CC, None), Progress::OneThird);
        assert_eq!(calculate_progress(EntityType::Planning, &CC_PS, None), Progress::TwoThirds);
        assert_eq!(calculate_progress(EntityType::Planning, &ALL, None), Progress::Complete);
    }

    #[test]
    fn planning_modules_without_prerequisites_is_zero() {
        assert_eq!(
            calculate_progress(EntityType::Planning, &MODULES_ONLY, None),
            Progress::None
        );
        let cc_m = DataPresence::new(true, false, true);
        assert_eq!(calculate_progress(EntityType::Planning, &cc_m, None), Progress::OneThird);
    }

    #[test]
    fn current_tab_does_not_matter() {
        for tab in [None, Some(0), Some(1), Some(2), Some(99)] {
            assert_eq!(
                calculate_progress(EntityType::Planning, &CC_PS, tab),
                Progress::TwoThirds
            );
        }
    }

    #[test]
    fn completed_steps_agree_with_table() {
        let engine = ProgressRuleEngine::new();
        for ty in [EntityType::Planning, EntityType::Rollup] {
            for presence in DataPresence::all() {
                let done = engine.completed_steps(ty, &presence).len();
                let expected = match (ty, done) {
                    (_, 0) => Progress::None,
                    (EntityType::Rollup, 1) => Progress::Half,
                    (EntityType::Planning, 1) => Progress::OneThird,
                    (EntityType::Planning, 2) => Progress::TwoThirds,
                    _ => Progress::Complete,
                };
                assert_eq!(engine.calculate(ty, &presence, None), expected, "{ty} {presence:?}");
            }
        }
    }

    #[test]
    fn next_step_points_at_first_gap() {
        let engine = ProgressRuleEngine::new();
        assert_eq!(
            engine.next_step(EntityType::Planning, &MODULES_ONLY),
            Some(SetupStep::CountriesAndCurrencies)
        );
        assert_eq!(
            engine.next_step(EntityType::Planning, &CC_PS),
            Some(SetupStep::Modules)
        );
        assert_eq!(engine.next_step(EntityType::Rollup, &CC_PS), None);
        assert_eq!(engine.next_step(EntityType::Planning, &ALL), None);
    }
}
