//! 19a: fan power
use super::view;
use crate::rule::Rule;
use crate::scope::RuleScope;
use crate::tables::hvac::{
    fan_power_method, motor_efficiency, FanPowerMethod, SIMPLE_FAN_POWER_PER_CFM, WATTS_PER_HORSEPOWER,
};
use rmr_core::model::HVAC_SYSTEMS;
use rmr_core::{entity_label, Flag, HvacSystem, Stage, Triplet};

pub const TOLERANCE: f64 = 0.5;

const NEUTRALIZED: &[&str] = &[
    "[*].hvac_system_type",
    "[*].fan_brake_horsepower",
    "[*].fan_electrical_input",
];

const BRAKE_HORSEPOWER: &str = "fan_brake_horsepower";
const ELECTRICAL_INPUT: &str = "fan_electrical_input";

/// Baseline fan brake horsepower and electrical input follow from the
/// system type and design supply airflow.
pub struct FanPower;

impl FanPower {
    fn check_system(&self, scope: &mut RuleScope, entity: &str, system: &HvacSystem) {
        let Some(system_type) = system.hvac_system_type.as_deref() else {
            scope.not_checked(entity, ELECTRICAL_INPUT, "no system type");
            return;
        };
        let Some(method) = fan_power_method(system_type) else {
            scope.not_checked(entity, ELECTRICAL_INPUT, format!("no fan power method for {}", system_type));
            return;
        };
        let Some(airflow) = system.design_supply_airflow else {
            scope.not_checked(entity, ELECTRICAL_INPUT, "no design supply airflow");
            return;
        };

        match method {
            FanPowerMethod::Simple | FanPowerMethod::SimplePlusNonMechanicalCooling => {
                if method == FanPowerMethod::SimplePlusNonMechanicalCooling {
                    tracing::debug!(entity, system_type, "non-mechanical cooling fan not modeled, using simple method");
                }
                let expected = SIMPLE_FAN_POWER_PER_CFM * airflow;
                scope.expect_within(Flag::Baseline, entity, ELECTRICAL_INPUT, expected, system.fan_electrical_input, TOLERANCE);
            }
            FanPowerMethod::BrakeHorsepower { multiplier } => {
                let bhp = multiplier * airflow;
                scope.expect_within(Flag::Baseline, entity, BRAKE_HORSEPOWER, bhp, system.fan_brake_horsepower, TOLERANCE);

                let efficiency = motor_efficiency(bhp);
                let expected = bhp * WATTS_PER_HORSEPOWER / (efficiency / 100.0);
                tracing::debug!(entity, bhp, efficiency, expected, "fan electrical input derived");
                scope.expect_within(Flag::Baseline, entity, ELECTRICAL_INPUT, expected, system.fan_electrical_input, TOLERANCE);
            }
        }
    }
}

impl Rule for FanPower {
    fn code(&self) -> &'static str {
        "19a"
    }

    fn title(&self) -> &'static str {
        "Fan power"
    }

    fn evaluate(&self, triplet: &Triplet, scope: &mut RuleScope) {
        if let Some(systems) = view(scope, Stage::Baseline, ELECTRICAL_INPUT, triplet.baseline().hvac_systems()) {
            for (i, system) in systems.iter().enumerate() {
                let entity = entity_label(system.id.as_deref(), || format!("{}[{}]", HVAC_SYSTEMS, i));
                self.check_system(scope, &entity, system);
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
