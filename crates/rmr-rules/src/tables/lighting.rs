//! Baseline exterior lighting power allowances
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingUnit {
    /// W/ft²
    PerArea,
    /// W/linear ft
    PerLength,
    /// W per location or device
    PerLocation,
}

impl fmt::Display for LightingUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LightingUnit::PerArea => write!(f, "W/ft2"),
            LightingUnit::PerLength => write!(f, "W/ft"),
            LightingUnit::PerLocation => write!(f, "W/location"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingAllowance {
    pub tradable: bool,
    pub rate: f64,
    pub unit: LightingUnit,
}

const fn tradable(rate: f64, unit: LightingUnit) -> LightingAllowance {
    LightingAllowance { tradable: true, rate, unit }
}

const fn non_tradable(rate: f64, unit: LightingUnit) -> LightingAllowance {
    LightingAllowance { tradable: false, rate, unit }
}

static EXTERIOR_LIGHTING: Lazy<HashMap<&'static str, LightingAllowance>> = Lazy::new(|| {
    use LightingUnit::*;
    HashMap::from([
        // Tradable surfaces
        ("UNCOVERED_PARKING_AREAS", tradable(0.15, PerArea)),
        ("WALKWAYS_LESS_THAN_10FT_WIDE", tradable(1.0, PerLength)),
        ("WALKWAYS_10FT_WIDE_OR_GREATER", tradable(0.2, PerArea)),
        ("STAIRWAYS", tradable(1.0, PerArea)),
        ("PEDESTRIAN_TUNNELS", tradable(0.3, PerArea)),
        ("MAIN_ENTRIES", tradable(30.0, PerLength)),
        ("OTHER_DOORS", tradable(20.0, PerLength)),
        ("CANOPIES", tradable(1.25, PerArea)),
        ("OUTDOOR_SALES_OPEN_AREAS", tradable(0.5, PerArea)),
        // Non-tradable surfaces
        ("BUILDING_FACADES", non_tradable(0.2, PerArea)),
        ("ENTRANCES_AND_GATEHOUSE_INSPECTION", non_tradable(1.25, PerArea)),
        ("LOADING_AREAS_FOR_EMERGENCY_VEHICLES", non_tradable(0.5, PerArea)),
        ("ATM", non_tradable(270.0, PerLocation)),
        ("DRIVE_UP_WINDOWS", non_tradable(400.0, PerLocation)),
    ])
});

pub fn allowance(category: &str) -> Option<LightingAllowance> {
    EXTERIOR_LIGHTING.get(category).copied()
}
