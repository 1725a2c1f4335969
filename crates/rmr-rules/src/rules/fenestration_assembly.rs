//! 5b: vertical fenestration assembly
use super::{model_entity, view};
use crate::rule::Rule;
use crate::scope::RuleScope;
use crate::tables::envelope::{
    climate_bucket, glazing_requirement, space_conditioning, GlazingRequirement, MAX_FENESTRATION_PERCENTAGE,
};
use rmr_core::model::THERMAL_BLOCKS;
use rmr_core::{entity_label, ExteriorWall, Flag, Stage, Triplet};

const NEUTRALIZED: &[&str] = &[
    "[*].exterior_walls[*].vertical_fenestration_percentage",
    "[*].exterior_walls[*].fenestration_assemblies[*].u_factor",
    "[*].exterior_walls[*].fenestration_assemblies[*].solar_heat_gain_coefficient",
    "[*].exterior_walls[*].fenestration_assemblies[*].visible_transmittance",
];

/// Baseline glazing properties come from the vertical glazing table for the
/// climate zone, space conditioning and wall fenestration percentage.
pub struct FenestrationAssembly;

impl FenestrationAssembly {
    /// `wall_position` is the wall's positional path; id-less assemblies are
    /// labelled under it even when the wall has an id.
    fn check_wall(&self, scope: &mut RuleScope, wall_position: &str, wall: &ExteriorWall, row: &GlazingRequirement) {
        for (i, assembly) in wall.fenestration_assemblies.iter().enumerate() {
            let entity = entity_label(assembly.id.as_deref(), || {
                format!("{}.fenestration_assemblies[{}]", wall_position, i)
            });
            scope.expect_equal(Flag::Baseline, &entity, "u_factor", row.u_factor, assembly.u_factor);
            scope.expect_equal(
                Flag::Baseline,
                &entity,
                "solar_heat_gain_coefficient",
                row.solar_heat_gain_coefficient,
                assembly.solar_heat_gain_coefficient,
            );
            scope.expect_equal(
                Flag::Baseline,
                &entity,
                "visible_transmittance",
                row.visible_transmittance,
                assembly.visible_transmittance,
            );
        }
    }
}

impl Rule for FenestrationAssembly {
    fn code(&self) -> &'static str {
        "5b"
    }

    fn title(&self) -> &'static str {
        "Vertical fenestration assembly"
    }

    fn evaluate(&self, triplet: &Triplet, scope: &mut RuleScope) {
        const CHECK: &str = "glazing";

        let bucket = match triplet.user().climate_zone() {
            None => {
                scope.not_checked(&model_entity(Stage::User), CHECK, "no climate zone");
                None
            }
            Some(cz) => {
                let bucket = climate_bucket(cz);
                if bucket.is_none() {
                    scope.not_checked(&model_entity(Stage::User), CHECK, format!("unknown climate zone {}", cz));
                }
                bucket
            }
        };

        if let Some(bucket) = bucket {
            let blocks = view(scope, Stage::Baseline, CHECK, triplet.baseline().thermal_blocks()).unwrap_or_default();
            for (b, block) in blocks.iter().enumerate() {
                let block_entity = entity_label(block.id.as_deref(), || format!("{}[{}]", THERMAL_BLOCKS, b));
                let Some(building_area_type) = block.building_area_type.as_deref() else {
                    scope.not_checked(&block_entity, CHECK, "no building area type");
                    continue;
                };
                let conditioning = space_conditioning(building_area_type);

                for (w, wall) in block.exterior_walls.iter().enumerate() {
                    let wall_position = format!("{}[{}].exterior_walls[{}]", THERMAL_BLOCKS, b, w);
                    let wall_entity = entity_label(wall.id.as_deref(), || wall_position.clone());
                    let Some(pct) = wall.vertical_fenestration_percentage else {
                        scope.not_checked(&wall_entity, CHECK, "no fenestration percentage");
                        continue;
                    };

                    let pct = pct.min(MAX_FENESTRATION_PERCENTAGE);
                    match glazing_requirement(bucket, conditioning, pct) {
                        Some(row) => self.check_wall(scope, &wall_position, wall, &row),
                        None => scope.not_checked(
                            &wall_entity,
                            CHECK,
                            format!("no glazing row for {}% in zone {} ({:?})", pct, bucket, conditioning),
                        ),
                    }
                }
            }
        }

        scope.expect_unchanged(
            Flag::Baseline,
            THERMAL_BLOCKS,
            NEUTRALIZED,
            triplet.user().get(THERMAL_BLOCKS),
            triplet.baseline().get(THERMAL_BLOCKS),
        );
        scope.expect_unchanged(
            Flag::Proposed,
            THERMAL_BLOCKS,
            &[],
            triplet.user().get(THERMAL_BLOCKS),
            triplet.proposed().get(THERMAL_BLOCKS),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CheckStatus;
    use serde_json::{json, Value};

    fn origin(climate_zone: &str, pct: f64) -> Value {
        json!({
            "climate_zone": climate_zone,
            "thermal_blocks": [{
                "building_area_type": "OFFICE",
                "exterior_walls": [{
                    "area": 1000,
                    "vertical_fenestration_percentage": pct,
                    "fenestration_assemblies": [
                        { "u_factor": 0.57, "solar_heat_gain_coefficient": 0.39, "visible_transmittance": 0.43 }
                    ]
                }]
            }]
        })
    }

    fn run(triplet: &Triplet) -> RuleScope {
        let mut scope = RuleScope::new("5b");
        FenestrationAssembly.evaluate(triplet, &mut scope);
        scope
    }

    #[test]
    fn test_matching_assembly_passes() {
        let triplet = Triplet::from_document(&origin("CZ5A", 31.0), "t").unwrap();
        let scope = run(&triplet);
        assert!(!scope.flags().any());
        assert_eq!(
            scope.records()[0].entity,
            "thermal_blocks[0].exterior_walls[0].fenestration_assemblies[0]"
        );
    }

    #[test]
    fn test_unnamed_assembly_under_named_wall_is_positional() {
        let mut origin = origin("CZ5A", 31.0);
        origin["thermal_blocks"][0]["id"] = json!("block-ground");
        origin["thermal_blocks"][0]["exterior_walls"][0]["id"] = json!("wall-g-north");
        let triplet = Triplet::from_document(&origin, "t").unwrap();
        let scope = run(&triplet);
        assert!(scope
            .records()
            .iter()
            .filter(|r| r.check == "u_factor")
            .all(|r| r.entity == "thermal_blocks[0].exterior_walls[0].fenestration_assemblies[0]"));
        assert_eq!(scope.records()[0].entity, "thermal_blocks[0].exterior_walls[0].fenestration_assemblies[0]");
    }

    #[test]
    fn test_percentage_above_cap_uses_top_row() {
        let triplet = Triplet::from_document(&origin("CZ5A", 65.0), "t").unwrap();
        assert!(!run(&triplet).flags().any());
    }

    #[test]
    fn test_wrong_shgc_raises_baseline() {
        let mut triplet = Triplet::from_document(&origin("CZ5A", 31.0), "t").unwrap();
        let block = triplet.model_mut(Stage::Baseline).entry_mut(THERMAL_BLOCKS, 0).unwrap();
        block["exterior_walls"][0]["fenestration_assemblies"][0]["solar_heat_gain_coefficient"] = json!(0.49);
        let scope = run(&triplet);
        assert!(scope.flags().baseline_err());

        let failed: Vec<_> = scope.records().iter().filter(|r| r.is_failure()).map(|r| r.check.as_str()).collect();
        assert_eq!(failed, vec!["solar_heat_gain_coefficient"]);
    }

    #[test]
    fn test_breakpoint_percentage_not_checked() {
        let triplet = Triplet::from_document(&origin("CZ5A", 20.0), "t").unwrap();
        let scope = run(&triplet);
        assert!(!scope.flags().any());
        assert_eq!(scope.records()[0].status, CheckStatus::NotChecked);
    }

    #[test]
    fn test_unknown_climate_zone_not_checked() {
        let triplet = Triplet::from_document(&origin("CZ9", 31.0), "t").unwrap();
        let scope = run(&triplet);
        assert_eq!(scope.records()[0].status, CheckStatus::NotChecked);
        assert!(!scope.flags().any());
    }
}
