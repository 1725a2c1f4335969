//! 18a: baseline HVAC system selection
use super::{floor_totals, model_entity, uniform_building_area_type, view};
use crate::rule::Rule;
use crate::scope::RuleScope;
use crate::tables::hvac::{is_cold_zone, occupancy_class, size_category, system_pair};
use rmr_core::model::HVAC_SYSTEMS;
use rmr_core::{entity_label, Flag, Stage, Triplet};

const NEUTRALIZED: &[&str] = &["[*].hvac_system_type"];

const CHECK: &str = "hvac_system_type";

/// Every baseline system must be the type the standard selects for the
/// building's occupancy, size and climate zone.
///
/// A mismatch raises the proposed flag, not the baseline one.
pub struct SystemSelection;

impl SystemSelection {
    /// Expected baseline system type derived from the user model
    fn expected_system(&self, triplet: &Triplet, scope: &mut RuleScope) -> Option<&'static str> {
        let user = triplet.user();
        let entity = model_entity(Stage::User);
        let blocks = view(scope, Stage::User, CHECK, user.thermal_blocks())?;

        let building_area_type = match uniform_building_area_type(&blocks) {
            Ok(t) => t,
            Err(reason) => {
                scope.not_checked(&entity, CHECK, reason);
                return None;
            }
        };
        let climate_zone = match user.climate_zone() {
            Some(cz) => cz,
            None => {
                scope.not_checked(&entity, CHECK, "no climate zone");
                return None;
            }
        };

        let (total_area, max_floor) = floor_totals(&blocks);
        let size = size_category(total_area, max_floor);
        let class = occupancy_class(building_area_type);
        let pair = system_pair(class, size)?;
        let cold = is_cold_zone(climate_zone);
        tracing::debug!(
            building_area_type,
            total_area,
            max_floor,
            ?size,
            ?class,
            climate_zone,
            cold,
            "baseline system derived"
        );

        Some(if cold { pair.cold } else { pair.standard })
    }
}

impl Rule for SystemSelection {
    fn code(&self) -> &'static str {
        "18a"
    }

    fn title(&self) -> &'static str {
        "Baseline HVAC system selection"
    }

    fn evaluate(&self, triplet: &Triplet, scope: &mut RuleScope) {
        if let Some(expected) = self.expected_system(triplet, scope) {
            if let Some(systems) = view(scope, Stage::Baseline, CHECK, triplet.baseline().hvac_systems()) {
                for (i, system) in systems.iter().enumerate() {
                    let entity = entity_label(system.id.as_deref(), || format!("{}[{}]", HVAC_SYSTEMS, i));
                    scope.expect_equal(Flag::Proposed, &entity, CHECK, expected, system.hvac_system_type.as_deref());
                }
            }
        }

        scope.expect_unchanged(
            Flag::Baseline,
            HVAC_SYSTEMS,
            NEUTRALIZED,
            triplet.user().get(HVAC_SYSTEMS),
            triplet.baseline().get(HVAC_SYSTEMS),
        );
        scope.expect_unchanged(
            Flag::Proposed,
            HVAC_SYSTEMS,
            &[],
            triplet.user().get(HVAC_SYSTEMS),
            triplet.proposed().get(HVAC_SYSTEMS),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CheckStatus;
    use serde_json::{json, Value};

    fn origin(climate_zone: &str, second_type: &str, system: &str) -> Value {
        json!({
            "climate_zone": climate_zone,
            "thermal_blocks": [
                { "id": "tb-1", "building_area_type": "OFFICE", "conditioned_floor_area": 10000, "floor_number": 1 },
                { "id": "tb-2", "building_area_type": second_type, "conditioned_floor_area": 10000, "floor_number": 2 }
            ],
            "hvac_systems": [{ "id": "sys-1", "hvac_system_type": system }]
        })
    }

    fn run(triplet: &Triplet) -> RuleScope {
        let mut scope = RuleScope::new("18a");
        SystemSelection.evaluate(triplet, &mut scope);
        scope
    }

    #[test]
    fn test_small_cold_office_expects_psz_ac() {
        let triplet = Triplet::from_document(&origin("CZ5A", "OFFICE", "PSZ_AC"), "t").unwrap();
        let scope = run(&triplet);
        assert!(!scope.flags().any());
        assert_eq!(scope.records()[0].status, CheckStatus::Pass);
    }

    #[test]
    fn test_warm_zone_expects_standard_value() {
        let triplet = Triplet::from_document(&origin("CZ2A", "OFFICE", "PSZ_HP"), "t").unwrap();
        assert!(!run(&triplet).flags().any());
    }

    #[test]
    fn test_wrong_system_raises_proposed_flag() {
        let mut triplet = Triplet::from_document(&origin("CZ5A", "OFFICE", "PSZ_AC"), "t").unwrap();
        triplet.model_mut(Stage::Baseline).entry_mut(HVAC_SYSTEMS, 0).unwrap()["hvac_system_type"] = json!("VAV_REHEAT");
        let scope = run(&triplet);
        assert!(scope.flags().proposed_err());
        assert!(!scope.flags().baseline_err());
    }

    #[test]
    fn test_mixed_building_types_not_checked() {
        let triplet = Triplet::from_document(&origin("CZ5A", "RETAIL_STAND_ALONE", "PSZ_HP"), "t").unwrap();
        let scope = run(&triplet);
        assert!(!scope.flags().any());
        assert_eq!(scope.records()[0].status, CheckStatus::NotChecked);
        assert_eq!(scope.records()[0].entity, "user model");
    }
}
