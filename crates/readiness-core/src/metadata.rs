//! # Entity Type Metadata
//!
//! Static per-type facts used by presentation layers: how many setup tabs to
//! draw and where the progress bar tops out.

use crate::primitives::MAX_PROGRESS;
use crate::{EntityType, SetupStep};
use serde::Serialize;

/// Progress ceiling. 100 for every entity type.
#[must_use]
pub fn get_max_progress(_entity_type: EntityType) -> u8 {
    MAX_PROGRESS
}

/// Number of setup tabs for an entity type.
#[must_use]
pub fn get_tab_count(entity_type: EntityType) -> usize {
    entity_type.tab_count()
}

/// Tab count for a raw tag. Unknown tags count as Planning.
#[must_use]
pub fn get_tab_count_for_tag(tag: &str) -> usize {
    get_tab_count(EntityType::from_tag(tag))
}

/// Everything a presentation layer needs to lay out the setup wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTypeMetadata {
    pub entity_type: EntityType,
    pub tab_count: usize,
    pub max_progress: u8,
    pub steps: Vec<SetupStep>,
}

impl EntityTypeMetadata {
    #[must_use]
    pub fn for_type(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            tab_count: get_tab_count(entity_type),
            max_progress: get_max_progress(entity_type),
            steps: entity_type.steps().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_counts() {
        assert_eq!(get_tab_count_for_tag("Rollup Entity"), 2);
        assert_eq!(get_tab_count_for_tag("Planning Entity"), 3);
        assert_eq!(get_tab_count_for_tag("Something Else"), 3);
    }

    #[test]
    fn max_progress_is_always_100() {
        assert_eq!(get_max_progress(EntityType::Rollup), 100);
        assert_eq!(get_max_progress(EntityType::Planning), 100);
    }

    #[test]
    fn metadata_bundle() {
        let meta = EntityTypeMetadata::for_type(EntityType::Rollup);
        assert_eq!(meta.tab_count, 2);
        assert_eq!(
            meta.steps,
            vec![SetupStep::CountriesAndCurrencies, SetupStep::PeriodSetup]
        );

        let json = serde_json::to_value(&meta).expect("serialize");
        assert_eq!(json["entityType"], "Rollup Entity");
        assert_eq!(json["maxProgress"], 100);
        assert_eq!(json["steps"][1], "periodSetup");
    }
}
