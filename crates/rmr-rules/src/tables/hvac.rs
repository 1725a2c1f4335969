//! Baseline HVAC system selection and fan power tables
use super::smallest_at_least;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

/// Size subcategory from total conditioned floor area (ft²) and the highest
/// floor of any thermal block.
pub fn size_category(total_floor_area: f64, max_floor: i64) -> SizeCategory {
    if total_floor_area < 25_000.0 && max_floor <= 3 {
        SizeCategory::Small
    } else if total_floor_area > 150_000.0 || max_floor > 5 {
        SizeCategory::Large
    } else {
        SizeCategory::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OccupancyClass {
    Residential,
    Nonresidential,
}

const RESIDENTIAL_AREA_TYPES: &[&str] = &["MULTIFAMILY", "HOTEL_MOTEL", "DORMITORY"];

pub fn occupancy_class(building_area_type: &str) -> OccupancyClass {
    if RESIDENTIAL_AREA_TYPES.contains(&building_area_type) {
        OccupancyClass::Residential
    } else {
        OccupancyClass::Nonresidential
    }
}

/// Expected baseline system for standard and cold climate zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemPair {
    pub standard: &'static str,
    pub cold: &'static str,
}

static SYSTEM_SELECTION: Lazy<HashMap<(OccupancyClass, SizeCategory), SystemPair>> = Lazy::new(|| {
    use OccupancyClass::*;
    use SizeCategory::*;
    let residential = SystemPair { standard: "PTHP", cold: "PTAC" };
    HashMap::from([
        ((Residential, Small), residential),
        ((Residential, Medium), residential),
        ((Residential, Large), residential),
        ((Nonresidential, Small), SystemPair { standard: "PSZ_HP", cold: "PSZ_AC" }),
        ((Nonresidential, Medium), SystemPair { standard: "PACKAGED_VAV_PFP", cold: "PACKAGED_VAV_REHEAT" }),
        ((Nonresidential, Large), SystemPair { standard: "VAV_PFP", cold: "VAV_REHEAT" }),
    ])
});

pub const COLD_CLIMATE_ZONES: &[&str] = &[
    "CZ3B", "CZ3C", "CZ4A", "CZ4B", "CZ4C", "CZ5A", "CZ5B", "CZ5C", "CZ6A", "CZ6B", "CZ7", "CZ8",
];

pub fn is_cold_zone(climate_zone: &str) -> bool {
    COLD_CLIMATE_ZONES.contains(&climate_zone)
}

pub fn system_pair(class: OccupancyClass, size: SizeCategory) -> Option<SystemPair> {
    SYSTEM_SELECTION.get(&(class, size)).copied()
}

/// How a system's baseline fan power is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FanPowerMethod {
    /// W = coefficient × design supply airflow
    Simple,
    /// Simple method plus a non-mechanical cooling fan. The extra fan is not
    /// modeled yet, so this evaluates exactly like `Simple`.
    SimplePlusNonMechanicalCooling,
    /// bhp = multiplier × airflow; W = bhp × 746 ÷ motor efficiency
    BrakeHorsepower { multiplier: f64 },
}

static FAN_POWER_METHODS: Lazy<HashMap<&'static str, FanPowerMethod>> = Lazy::new(|| {
    use FanPowerMethod::*;
    HashMap::from([
        ("PTAC", Simple),
        ("PTHP", Simple),
        ("PSZ_AC", BrakeHorsepower { multiplier: 0.00094 }),
        ("PSZ_HP", BrakeHorsepower { multiplier: 0.00094 }),
        ("PACKAGED_VAV_REHEAT", BrakeHorsepower { multiplier: 0.0013 }),
        ("PACKAGED_VAV_PFP", BrakeHorsepower { multiplier: 0.0013 }),
        ("VAV_REHEAT", BrakeHorsepower { multiplier: 0.0013 }),
        ("VAV_PFP", BrakeHorsepower { multiplier: 0.0013 }),
        ("HEATING_VENTILATION_GAS", SimplePlusNonMechanicalCooling),
        ("HEATING_VENTILATION_ELECTRIC", SimplePlusNonMechanicalCooling),
    ])
});

pub fn fan_power_method(system_type: &str) -> Option<FanPowerMethod> {
    FAN_POWER_METHODS.get(system_type).copied()
}

/// W per cfm of design supply airflow for the simple method
pub const SIMPLE_FAN_POWER_PER_CFM: f64 = 0.3;

pub const WATTS_PER_HORSEPOWER: f64 = 746.0;

/// Used when the brake horsepower exceeds every tabulated breakpoint
pub const DEFAULT_MOTOR_EFFICIENCY: f64 = 95.0;

/// (motor bhp breakpoint, full-load efficiency %)
pub const MOTOR_EFFICIENCY: &[(f64, f64)] = &[
    (1.0, 82.5),
    (1.5, 84.0),
    (2.0, 84.0),
    (3.0, 87.5),
    (5.0, 87.5),
    (7.5, 89.5),
    (10.0, 89.5),
    (15.0, 91.0),
    (20.0, 91.0),
    (25.0, 92.4),
    (30.0, 92.4),
    (40.0, 93.0),
    (50.0, 93.0),
    (60.0, 93.6),
    (75.0, 94.1),
    (100.0, 94.5),
    (125.0, 94.5),
    (150.0, 95.0),
    (200.0, 95.0),
];

pub fn motor_efficiency(brake_horsepower: f64) -> f64 {
    smallest_at_least(MOTOR_EFFICIENCY, brake_horsepower)
        .copied()
        .unwrap_or(DEFAULT_MOTOR_EFFICIENCY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_thresholds() {
        assert_eq!(size_category(24_999.0, 3), SizeCategory::Small);
        assert_eq!(size_category(25_000.0, 3), SizeCategory::Medium);
        assert_eq!(size_category(10_000.0, 4), SizeCategory::Medium);
        assert_eq!(size_category(150_000.0, 5), SizeCategory::Medium);
        assert_eq!(size_category(150_001.0, 1), SizeCategory::Large);
        assert_eq!(size_category(10_000.0, 6), SizeCategory::Large);
    }

    #[test]
    fn test_small_office_selection() {
        let pair = system_pair(occupancy_class("OFFICE"), SizeCategory::Small).unwrap();
        assert_eq!(pair.cold, "PSZ_AC");
        assert_eq!(pair.standard, "PSZ_HP");
        assert!(is_cold_zone("CZ5A"));
        assert!(!is_cold_zone("CZ2A"));
    }

    #[test]
    fn test_residential_ignores_size() {
        let class = occupancy_class("MULTIFAMILY");
        assert_eq!(class, OccupancyClass::Residential);
        assert_eq!(system_pair(class, SizeCategory::Large).unwrap().cold, "PTAC");
    }

    #[test]
    fn test_motor_efficiency_breakpoints() {
        assert_eq!(motor_efficiency(0.5), 82.5);
        assert_eq!(motor_efficiency(13.0), 91.0);
        assert_eq!(motor_efficiency(15.0), 91.0);
        assert_eq!(motor_efficiency(250.0), DEFAULT_MOTOR_EFFICIENCY);
    }

    #[test]
    fn test_fan_power_methods() {
        assert_eq!(fan_power_method("PTAC"), Some(FanPowerMethod::Simple));
        assert_eq!(
            fan_power_method("VAV_REHEAT"),
            Some(FanPowerMethod::BrakeHorsepower { multiplier: 0.0013 })
        );
        assert_eq!(fan_power_method("CHILLED_BEAM"), None);
    }
}
