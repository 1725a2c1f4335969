//! Rule evaluators
//!
//! | code | rule | mismatch flag |
//! |------|------|---------------|
//! | `6a` | exterior lighting power | baseline |
//! | `18a` | baseline HVAC system selection | proposed |
//! | `19a` | fan power | baseline |
//! | `5a` | vertical fenestration area | baseline |
//! | `5b` | vertical fenestration assembly | baseline |

pub mod exterior_lighting;
pub mod fan_power;
pub mod fenestration_area;
pub mod fenestration_assembly;
pub mod system_selection;

pub use exterior_lighting::ExteriorLighting;
pub use fan_power::FanPower;
pub use fenestration_area::FenestrationArea;
pub use fenestration_assembly::FenestrationAssembly;
pub use system_selection::SystemSelection;

use crate::scope::RuleScope;
use rmr_core::{Stage, ThermalBlock};

/// Entity label for checks that cover a whole model
pub(crate) fn model_entity(stage: Stage) -> String {
    format!("{} model", stage.file_suffix())
}

/// Unwraps a typed view, recording a not-checked entry when the document
/// does not fit it.
pub(crate) fn view<T>(scope: &mut RuleScope, stage: Stage, check: &str, result: rmr_core::Result<Vec<T>>) -> Option<Vec<T>> {
    match result {
        Ok(items) => Some(items),
        Err(e) => {
            scope.not_checked(&model_entity(stage), check, e.to_string());
            None
        }
    }
}

/// The building area type every thermal block shares
pub(crate) fn uniform_building_area_type(blocks: &[ThermalBlock]) -> Result<&str, String> {
    let mut types = blocks.iter().map(|b| b.building_area_type.as_deref());
    let first = match types.next() {
        None => return Err("model has no thermal blocks".to_string()),
        Some(None) => return Err("thermal block without building_area_type".to_string()),
        Some(Some(first)) => first,
    };

    for other in types {
        match other {
            Some(other) if other == first => {}
            Some(other) => return Err(format!("mixed building area types: {}, {}", first, other)),
            None => return Err("thermal block without building_area_type".to_string()),
        }
    }
    Ok(first)
}

/// Sum of conditioned floor area and the highest floor number. Missing
/// values count as zero.
pub(crate) fn floor_totals(blocks: &[ThermalBlock]) -> (f64, i64) {
    let area = blocks.iter().filter_map(|b| b.conditioned_floor_area).sum::<f64>();
    let max_floor = blocks.iter().map(|b| b.floor_number.unwrap_or(0)).max().unwrap_or(0);
    (area, max_floor)
}
