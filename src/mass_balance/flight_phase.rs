use super::aircraft::AircraftConfig;
use super::calculator::{MassBalanceResult, calculate_mass_balance};
use super::units::Kilograms;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, Serialize, Deserialize)]
pub enum FlightPhase {
    Takeoff,
    Landing,
}

/// Mass & balance of one flight phase, checked against that phase's weight limit.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseResult {
    pub phase: FlightPhase,
    pub result: MassBalanceResult,
    /// MTOW for takeoff, MLW (or MTOW if none is declared) for landing.
    pub weight_limit: Kilograms,
    pub exceeds_weight_limit: bool,
}

impl PhaseResult {
    fn new(phase: FlightPhase, result: MassBalanceResult, weight_limit: Kilograms) -> Self {
        let exceeds_weight_limit = result.total_weight > weight_limit;
        Self { phase, result, weight_limit, exceeds_weight_limit }
    }

    pub fn is_safe(&self) -> bool { self.result.is_within_envelope && !self.exceeds_weight_limit }
}

/// Takeoff and landing evaluation of the same loading.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct FlightEvaluation {
    pub takeoff: PhaseResult,
    pub landing: PhaseResult,
}

impl FlightEvaluation {
    /// Whether both phases are inside the envelope and within their weight limits.
    pub fn is_safe(&self) -> bool { self.takeoff.is_safe() && self.landing.is_safe() }

    pub fn phases(&self) -> [&PhaseResult; 2] { [&self.takeoff, &self.landing] }
}

/// Evaluates a loading at takeoff with `fuel_weight` on board and at landing after
/// burning `burn_weight`.
///
/// Landing fuel never drops below zero. Both phases share `station_weights`.
pub fn evaluate_flight(
    aircraft: &AircraftConfig,
    station_weights: &HashMap<String, Kilograms>,
    fuel_weight: Kilograms,
    burn_weight: Kilograms,
) -> FlightEvaluation {
    let landing_fuel = (fuel_weight - burn_weight).max(Kilograms::ZERO);
    let takeoff = calculate_mass_balance(aircraft, station_weights, fuel_weight);
    let landing = calculate_mass_balance(aircraft, station_weights, landing_fuel);
    FlightEvaluation {
        takeoff: PhaseResult::new(FlightPhase::Takeoff, takeoff, aircraft.max_takeoff_weight),
        landing: PhaseResult::new(FlightPhase::Landing, landing, aircraft.landing_weight_limit()),
    }
}
