//! 6a: exterior lighting power
use super::view;
use crate::rule::Rule;
use crate::scope::RuleScope;
use crate::tables::lighting::{self, LightingUnit};
use rmr_core::model::EXTERIOR_LIGHTING_AREAS;
use rmr_core::{entity_label, Flag, Stage, Triplet};

const NEUTRALIZED: &[&str] = &["[*].power"];

/// Baseline power of tradable, area-rated lighting areas is area × rate.
/// Linear, per-location and non-tradable allowances are not modeled.
pub struct ExteriorLighting;

impl Rule for ExteriorLighting {
    fn code(&self) -> &'static str {
        "6a"
    }

    fn title(&self) -> &'static str {
        "Exterior lighting power"
    }

    fn evaluate(&self, triplet: &Triplet, scope: &mut RuleScope) {
        let baseline = triplet.baseline();
        if let Some(areas) = view(scope, Stage::Baseline, "power", baseline.exterior_lighting_areas()) {
            for (i, area) in areas.iter().enumerate() {
                let entity = entity_label(area.id.as_deref(), || format!("{}[{}]", EXTERIOR_LIGHTING_AREAS, i));

                let category = match area.lighting_category.as_deref() {
                    Some(category) => category,
                    None => {
                        scope.not_checked(&entity, "power", "no lighting category");
                        continue;
                    }
                };
                let allowance = match lighting::allowance(category) {
                    Some(allowance) => allowance,
                    None => {
                        scope.not_checked(&entity, "power", format!("unknown lighting category {}", category));
                        continue;
                    }
                };
                if !allowance.tradable {
                    scope.not_checked(&entity, "power", format!("{} is non-tradable", category));
                    continue;
                }
                if allowance.unit != LightingUnit::PerArea {
                    scope.not_checked(
                        &entity,
                        "power",
                        format!("{} allowance is rated in {}", category, allowance.unit),
                    );
                    continue;
                }
                let Some(lit_area) = area.area else {
                    scope.not_checked(&entity, "power", "no area");
                    continue;
                };

                scope.expect_equal(Flag::Baseline, &entity, "power", lit_area * allowance.rate, area.power);
            }
        }

        scope.expect_unchanged(
            Flag::Baseline,
            EXTERIOR_LIGHTING_AREAS,
            NEUTRALIZED,
            triplet.user().get(EXTERIOR_LIGHTING_AREAS),
            baseline.get(EXTERIOR_LIGHTING_AREAS),
        );
        scope.expect_unchanged(
            Flag::Proposed,
            EXTERIOR_LIGHTING_AREAS,
            &[],
            triplet.user().get(EXTERIOR_LIGHTING_AREAS),
            triplet.proposed().get(EXTERIOR_LIGHTING_AREAS),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CheckStatus;
    use serde_json::json;

    fn triplet() -> Triplet {
        let origin = json!({
            "climate_zone": "CZ4A",
            "exterior_lighting_areas": [
                { "id": "parking", "lighting_category": "UNCOVERED_PARKING_AREAS", "area": 1000, "power": 150 },
                { "id": "facade", "lighting_category": "BUILDING_FACADES", "area": 400, "power": 99 },
                { "id": "entry", "lighting_category": "MAIN_ENTRIES", "area": 12, "power": 360 }
            ]
        });
        Triplet::from_document(&origin, "lighting").unwrap()
    }

    fn run(triplet: &Triplet) -> RuleScope {
        let mut scope = RuleScope::new("6a");
        ExteriorLighting.evaluate(triplet, &mut scope);
        scope
    }

    #[test]
    fn test_compliant_areas_pass() {
        let scope = run(&triplet());
        assert!(!scope.flags().any());

        let statuses: Vec<_> = scope.records().iter().map(|r| (r.entity.as_str(), r.status)).collect();
        assert!(statuses.contains(&("parking", CheckStatus::Pass)));
        assert!(statuses.contains(&("facade", CheckStatus::NotChecked)));
        assert!(statuses.contains(&("entry", CheckStatus::NotChecked)));
    }

    #[test]
    fn test_wrong_power_raises_baseline() {
        let mut triplet = triplet();
        triplet.model_mut(Stage::Baseline).entry_mut(EXTERIOR_LIGHTING_AREAS, 0).unwrap()["power"] = json!(151);
        let scope = run(&triplet);
        assert!(scope.flags().baseline_err());
        assert!(!scope.flags().proposed_err());
    }

    #[test]
    fn test_unlicensed_baseline_change_breaks_invariant() {
        let mut triplet = triplet();
        triplet.model_mut(Stage::Baseline).entry_mut(EXTERIOR_LIGHTING_AREAS, 1).unwrap()["area"] = json!(500);
        let scope = run(&triplet);
        assert!(scope.flags().baseline_err());
        assert!(scope.records().iter().any(|r| r.status == CheckStatus::Fail && r.check.contains("unchanged")));
    }

    #[test]
    fn test_proposed_power_change_raises_proposed() {
        let mut triplet = triplet();
        triplet.model_mut(Stage::Proposed).entry_mut(EXTERIOR_LIGHTING_AREAS, 0).unwrap()["power"] = json!(120);
        let scope = run(&triplet);
        assert!(scope.flags().proposed_err());
        assert!(!scope.flags().baseline_err());
    }
}
