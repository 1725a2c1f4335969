//! Baseline envelope tables: window-to-wall fractions and vertical glazing
use super::{find_half_open, find_open, RangeRow};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Office subtypes by total conditioned floor area, `[low, high)` ft²
const OFFICE_BY_FLOOR_AREA: [RangeRow<&str>; 3] = [
    RangeRow::new(0.0, 5_000.0, "OFFICE_SMALL"),
    RangeRow::new(5_000.0, 50_000.0, "OFFICE_MEDIUM"),
    RangeRow::new(50_000.0, f64::INFINITY, "OFFICE_LARGE"),
];

static FENESTRATION_FRACTION: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("GROCERY_STORE", 0.07),
        ("HEALTHCARE_OUTPATIENT", 0.21),
        ("HOSPITAL", 0.27),
        ("OFFICE_SMALL", 0.19),
        ("OFFICE_MEDIUM", 0.31),
        ("OFFICE_LARGE", 0.40),
        ("RESTAURANT_QUICK_SERVICE", 0.34),
        ("RESTAURANT_FULL_SERVICE", 0.24),
        ("RETAIL_STAND_ALONE", 0.11),
        ("RETAIL_STRIP_MALL", 0.20),
        ("SCHOOL_PRIMARY", 0.22),
        ("SCHOOL_SECONDARY_AND_UNIVERSITY", 0.22),
        ("WAREHOUSE_NONREFRIGERATED", 0.06),
    ])
});

/// Refines `OFFICE` by floor area; every other type passes through.
pub fn fenestration_subtype(building_area_type: &str, total_floor_area: f64) -> String {
    if building_area_type == "OFFICE" {
        if let Some(subtype) = find_half_open(&OFFICE_BY_FLOOR_AREA, total_floor_area) {
            return (*subtype).to_string();
        }
    }
    building_area_type.to_string()
}

pub fn fenestration_fraction(subtype: &str) -> Option<f64> {
    FENESTRATION_FRACTION.get(subtype).copied()
}

/// Fenestration percentages above this are evaluated at this value
pub const MAX_FENESTRATION_PERCENTAGE: f64 = 40.0;

static CLIMATE_BUCKETS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("CZ0A", "0-1"),
        ("CZ0B", "0-1"),
        ("CZ1A", "0-1"),
        ("CZ1B", "0-1"),
        ("CZ2A", "2"),
        ("CZ2B", "2"),
        ("CZ3A", "3"),
        ("CZ3B", "3"),
        ("CZ3C", "3"),
        ("CZ4A", "4"),
        ("CZ4B", "4"),
        ("CZ4C", "4"),
        ("CZ5A", "5"),
        ("CZ5B", "5"),
        ("CZ5C", "5"),
        ("CZ6A", "6"),
        ("CZ6B", "6"),
        ("CZ7", "7"),
        ("CZ8", "8"),
    ])
});

pub fn climate_bucket(climate_zone: &str) -> Option<&'static str> {
    CLIMATE_BUCKETS.get(climate_zone).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceConditioning {
    Nonresidential,
    Residential,
    Semiheated,
}

pub fn space_conditioning(building_area_type: &str) -> SpaceConditioning {
    match building_area_type {
        "MULTIFAMILY" | "HOTEL_MOTEL" | "DORMITORY" => SpaceConditioning::Residential,
        "WAREHOUSE_NONREFRIGERATED" => SpaceConditioning::Semiheated,
        _ => SpaceConditioning::Nonresidential,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlazingRequirement {
    pub u_factor: f64,
    pub solar_heat_gain_coefficient: f64,
    pub visible_transmittance: f64,
}

/// Open fenestration-percentage bounds shared by every glazing table.
/// Percentages are clamped to 40 before lookup, so the last row only needs
/// to reach past it.
const GLAZING_BOUNDS: [(f64, f64); 4] = [(0.0, 10.0), (10.0, 20.0), (20.0, 30.0), (30.0, 100.0)];

fn glazing_rows(u: [f64; 4], shgc: [f64; 4], vt: [f64; 4]) -> Vec<RangeRow<GlazingRequirement>> {
    GLAZING_BOUNDS
        .iter()
        .enumerate()
        .map(|(i, &(low, high))| {
            RangeRow::new(
                low,
                high,
                GlazingRequirement {
                    u_factor: u[i],
                    solar_heat_gain_coefficient: shgc[i],
                    visible_transmittance: vt[i],
                },
            )
        })
        .collect()
}

type GlazingTable = HashMap<(&'static str, SpaceConditioning), Vec<RangeRow<GlazingRequirement>>>;

static VERTICAL_GLAZING: Lazy<GlazingTable> = Lazy::new(|| {
    use SpaceConditioning::*;
    let mut table: GlazingTable = HashMap::new();

    let mut add = |bucket: &'static str,
                   conditioning: SpaceConditioning,
                   u: [f64; 4],
                   shgc: [f64; 4],
                   vt: [f64; 4]| {
        table.insert((bucket, conditioning), glazing_rows(u, shgc, vt));
    };

    add("0-1", Nonresidential, [1.22; 4], [0.25; 4], [0.28; 4]);
    add("2", Nonresidential, [1.22; 4], [0.25; 4], [0.28; 4]);
    add("3", Nonresidential, [0.65; 4], [0.25; 4], [0.28; 4]);
    add("4", Nonresidential, [0.57; 4], [0.39; 4], [0.43; 4]);
    add("5", Nonresidential, [0.57; 4], [0.49, 0.39, 0.39, 0.39], [0.54, 0.43, 0.43, 0.43]);
    add("6", Nonresidential, [0.57; 4], [0.49, 0.39, 0.39, 0.39], [0.54, 0.43, 0.43, 0.43]);
    add("7", Nonresidential, [0.57; 4], [0.49; 4], [0.54; 4]);
    add("8", Nonresidential, [0.46; 4], [0.49; 4], [0.54; 4]);

    add("0-1", Residential, [1.22; 4], [0.25; 4], [0.28; 4]);
    add("2", Residential, [1.22; 4], [0.25; 4], [0.28; 4]);
    add("3", Residential, [0.65; 4], [0.25; 4], [0.28; 4]);
    add("4", Residential, [0.57; 4], [0.39; 4], [0.43; 4]);
    add("5", Residential, [0.57; 4], [0.39; 4], [0.43; 4]);
    add("6", Residential, [0.57; 4], [0.39; 4], [0.43; 4]);
    add("7", Residential, [0.57; 4], [0.49; 4], [0.54; 4]);
    add("8", Residential, [0.46; 4], [0.49; 4], [0.54; 4]);

    add("0-1", Semiheated, [1.22; 4], [0.82; 4], [0.90; 4]);
    add("2", Semiheated, [1.22; 4], [0.82; 4], [0.90; 4]);
    add("3", Semiheated, [1.22; 4], [0.82; 4], [0.90; 4]);
    add("4", Semiheated, [1.22; 4], [0.82; 4], [0.90; 4]);
    add("5", Semiheated, [1.22; 4], [0.82; 4], [0.90; 4]);
    add("6", Semiheated, [1.22; 4], [0.82; 4], [0.90; 4]);
    add("7", Semiheated, [0.98; 4], [0.82; 4], [0.90; 4]);
    add("8", Semiheated, [0.98; 4], [0.82; 4], [0.90; 4]);

    table
});

/// Glazing row whose open percentage interval strictly contains
/// `fenestration_percentage`.
pub fn glazing_requirement(
    bucket: &str,
    conditioning: SpaceConditioning,
    fenestration_percentage: f64,
) -> Option<GlazingRequirement> {
    let rows = VERTICAL_GLAZING.get(&(bucket, conditioning))?;
    find_open(rows, fenestration_percentage).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_office_refinement() {
        assert_eq!(fenestration_subtype("OFFICE", 4_999.0), "OFFICE_SMALL");
        assert_eq!(fenestration_subtype("OFFICE", 5_000.0), "OFFICE_MEDIUM");
        assert_eq!(fenestration_subtype("OFFICE", 20_000.0), "OFFICE_MEDIUM");
        assert_eq!(fenestration_subtype("OFFICE", 50_000.0), "OFFICE_LARGE");
        assert_eq!(fenestration_subtype("HOSPITAL", 50_000.0), "HOSPITAL");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(fenestration_fraction("OFFICE_MEDIUM"), Some(0.31));
        assert_eq!(fenestration_fraction("OFFICE"), None);
    }

    #[test]
    fn test_climate_buckets() {
        assert_eq!(climate_bucket("CZ1B"), Some("0-1"));
        assert_eq!(climate_bucket("CZ5A"), Some("5"));
        assert_eq!(climate_bucket("CZ9"), None);
    }

    #[test]
    fn test_space_conditioning() {
        assert_eq!(space_conditioning("OFFICE"), SpaceConditioning::Nonresidential);
        assert_eq!(space_conditioning("DORMITORY"), SpaceConditioning::Residential);
        assert_eq!(space_conditioning("WAREHOUSE_NONREFRIGERATED"), SpaceConditioning::Semiheated);
    }

    #[test]
    fn test_glazing_lookup() {
        let row = glazing_requirement("5", SpaceConditioning::Nonresidential, 31.0).unwrap();
        assert_eq!(row.u_factor, 0.57);
        assert_eq!(row.solar_heat_gain_coefficient, 0.39);
        assert_eq!(row.visible_transmittance, 0.43);

        let low = glazing_requirement("5", SpaceConditioning::Nonresidential, 5.0).unwrap();
        assert_eq!(low.solar_heat_gain_coefficient, 0.49);
    }

    #[test]
    fn test_glazing_breakpoint_matches_nothing() {
        assert!(glazing_requirement("5", SpaceConditioning::Nonresidential, 20.0).is_none());
        assert!(glazing_requirement("5", SpaceConditioning::Nonresidential, 40.0).is_some());
    }
}
