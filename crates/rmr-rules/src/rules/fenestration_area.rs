//! 5a: vertical fenestration area
use super::{floor_totals, model_entity, uniform_building_area_type, view};
use crate::rule::Rule;
use crate::scope::RuleScope;
use crate::tables::envelope::{fenestration_fraction, fenestration_subtype};
use rmr_core::model::THERMAL_BLOCKS;
use rmr_core::{Flag, Stage, ThermalBlock, Triplet};

pub const TOLERANCE: f64 = 0.5;

const NEUTRALIZED: &[&str] = &["[*].exterior_walls[*].vertical_fenestration_percentage"];

const CHECK: &str = "total fenestration area";

/// Baseline fenestration area is the standard's window-to-wall fraction of
/// the user model's gross exterior wall area.
pub struct FenestrationArea;

fn total_wall_area(blocks: &[ThermalBlock]) -> f64 {
    blocks
        .iter()
        .flat_map(|b| &b.exterior_walls)
        .filter_map(|w| w.area)
        .sum()
}

fn total_fenestration_area(blocks: &[ThermalBlock]) -> f64 {
    blocks
        .iter()
        .flat_map(|b| &b.exterior_walls)
        .map(|w| w.fenestration_area())
        .sum()
}

impl FenestrationArea {
    fn expected_area(&self, triplet: &Triplet, scope: &mut RuleScope) -> Option<f64> {
        let entity = model_entity(Stage::User);
        let blocks = view(scope, Stage::User, CHECK, triplet.user().thermal_blocks())?;

        let building_area_type = match uniform_building_area_type(&blocks) {
            Ok(t) => t,
            Err(reason) => {
                scope.not_checked(&entity, CHECK, reason);
                return None;
            }
        };

        let (total_floor_area, _) = floor_totals(&blocks);
        let subtype = fenestration_subtype(building_area_type, total_floor_area);
        let Some(fraction) = fenestration_fraction(&subtype) else {
            scope.not_checked(&entity, CHECK, format!("no fenestration fraction for {}", subtype));
            return None;
        };

        let wall_area = total_wall_area(&blocks);
        tracing::debug!(subtype = %subtype, fraction, wall_area, "fenestration fraction selected");
        Some(fraction * wall_area)
    }
}

impl Rule for FenestrationArea {
    fn code(&self) -> &'static str {
        "5a"
    }

    fn title(&self) -> &'static str {
        "Vertical fenestration area"
    }

    fn evaluate(&self, triplet: &Triplet, scope: &mut RuleScope) {
        if let Some(expected) = self.expected_area(triplet, scope) {
            if let Some(blocks) = view(scope, Stage::Baseline, CHECK, triplet.baseline().thermal_blocks()) {
                let actual = total_fenestration_area(&blocks);
                scope.expect_within(Flag::Baseline, &model_entity(Stage::Baseline), CHECK, expected, Some(actual), TOLERANCE);
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
