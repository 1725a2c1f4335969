//! Building model documents and typed views
//!
//! A [`BuildingModel`] owns one JSON document whose shape is defined by the
//! external ruleset model report schema. Rules read it through the typed
//! views below; everything else (including fields the views do not name) is
//! only ever compared structurally.

use crate::error::{Result, RmrError};
use crate::stage::{Stage, STAGE_FIELD};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CLIMATE_ZONE: &str = "climate_zone";
pub const EXTERIOR_LIGHTING_AREAS: &str = "exterior_lighting_areas";
pub const THERMAL_BLOCKS: &str = "thermal_blocks";
pub const HVAC_SYSTEMS: &str = "hvac_systems";

/// One stage copy of a ruleset model
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingModel {
    document: Value,
}

impl BuildingModel {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// Copy of `origin` tagged with `stage`.
    ///
    /// The origin must be an object; anything else cannot carry the stage tag.
    pub fn for_stage(origin: &Value, stage: Stage) -> Result<Self> {
        let mut document = origin.clone();
        let object = document
            .as_object_mut()
            .ok_or_else(|| RmrError::Model("origin document must be a JSON object".to_string()))?;
        object.insert(STAGE_FIELD.to_string(), Value::String(stage.as_str().to_string()));
        Ok(Self { document })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Value {
        &mut self.document
    }

    pub fn into_document(self) -> Value {
        self.document
    }

    pub fn stage(&self) -> Option<Stage> {
        self.document.get(STAGE_FIELD).and_then(Value::as_str).and_then(Stage::parse)
    }

    /// Top-level member, if present
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    pub fn climate_zone(&self) -> Option<&str> {
        self.document.get(CLIMATE_ZONE).and_then(Value::as_str)
    }

    pub fn exterior_lighting_areas(&self) -> Result<Vec<ExteriorLightingArea>> {
        self.list(EXTERIOR_LIGHTING_AREAS)
    }

    pub fn thermal_blocks(&self) -> Result<Vec<ThermalBlock>> {
        self.list(THERMAL_BLOCKS)
    }

    pub fn hvac_systems(&self) -> Result<Vec<HvacSystem>> {
        self.list(HVAC_SYSTEMS)
    }

    /// Mutable access to the `index`-th element of a top-level sequence.
    pub fn entry_mut(&mut self, list: &str, index: usize) -> Option<&mut Value> {
        self.document.get_mut(list).and_then(|v| v.get_mut(index))
    }

    fn list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.document.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| RmrError::Model(format!("{}: {}", key, e))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExteriorLightingArea {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub lighting_category: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub power: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermalBlock {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub building_area_type: Option<String>,
    #[serde(default)]
    pub conditioned_floor_area: Option<f64>,
    #[serde(default)]
    pub floor_number: Option<i64>,
    #[serde(default)]
    pub exterior_walls: Vec<ExteriorWall>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExteriorWall {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub vertical_fenestration_percentage: Option<f64>,
    #[serde(default)]
    pub fenestration_assemblies: Vec<FenestrationAssembly>,
}

impl ExteriorWall {
    /// Fenestration area of the wall (area × percentage ÷ 100); missing
    /// inputs count as zero.
    pub fn fenestration_area(&self) -> f64 {
        self.area.unwrap_or(0.0) * self.vertical_fenestration_percentage.unwrap_or(0.0) / 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FenestrationAssembly {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub u_factor: Option<f64>,
    #[serde(default)]
    pub solar_heat_gain_coefficient: Option<f64>,
    #[serde(default)]
    pub visible_transmittance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HvacSystem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub hvac_system_type: Option<String>,
    #[serde(default)]
    pub design_supply_airflow: Option<f64>,
    #[serde(default)]
    pub fan_brake_horsepower: Option<f64>,
    #[serde(default)]
    pub fan_electrical_input: Option<f64>,
}

/// Label for an entity in diagnostics: its id, or its position.
pub fn entity_label(id: Option<&str>, fallback: impl FnOnce() -> String) -> String {
    match id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_for_stage_tags_copy() {
        let origin = json!({ "climate_zone": "CZ4A" });
        let model = BuildingModel::for_stage(&origin, Stage::Proposed).unwrap();
        assert_eq!(model.stage(), Some(Stage::Proposed));
        assert_eq!(model.climate_zone(), Some("CZ4A"));
        assert!(origin.get(STAGE_FIELD).is_none());
    }

    #[test]
    fn test_for_stage_rejects_non_object() {
        assert!(BuildingModel::for_stage(&json!([1, 2]), Stage::User).is_err());
    }

    #[test]
    fn test_views_ignore_unknown_fields() {
        let model = BuildingModel::new(json!({
            "thermal_blocks": [{
                "id": "tb-1",
                "building_area_type": "OFFICE",
                "conditioned_floor_area": 10000,
                "floor_number": 2,
                "zones": ["z1"],
                "exterior_walls": [{ "area": 1000, "vertical_fenestration_percentage": 30 }]
            }]
        }));
        let blocks = model.thermal_blocks().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].floor_number, Some(2));
        assert_eq!(blocks[0].exterior_walls[0].fenestration_area(), 300.0);
    }

    #[test]
    fn test_missing_list_is_empty() {
        let model = BuildingModel::new(json!({}));
        assert!(model.hvac_systems().unwrap().is_empty());
    }

    #[test]
    fn test_mistyped_list_is_model_error() {
        let model = BuildingModel::new(json!({ "hvac_systems": [{ "design_supply_airflow": "lots" }] }));
        assert!(matches!(model.hvac_systems(), Err(RmrError::Model(_))));
    }

    #[test]
    fn test_entity_label_fallback() {
        assert_eq!(entity_label(Some("sys-1"), || "hvac_systems[0]".into()), "sys-1");
        assert_eq!(entity_label(None, || "hvac_systems[0]".into()), "hvac_systems[0]");
    }
}
