use super::aircraft::AircraftConfig;
use super::envelope::is_within_envelope;
use super::station::StationResult;
use super::units::{Inches, KilogramInches, Kilograms};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Loaded weight per station id. Ids the aircraft does not declare are ignored.
pub type StationWeights = HashMap<String, Kilograms>;

/// Weight, moment and CG of one loading, together with its safety verdicts.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassBalanceResult {
    pub total_weight: Kilograms,
    pub total_moment: KilogramInches,
    /// Total moment divided by total weight, or zero for a weightless loading.
    pub cg_position: Inches,
    pub is_within_envelope: bool,
    /// Set if `total_weight` is strictly above the maximum takeoff weight.
    pub exceeds_max_weight: bool,
    /// One entry per declared station, in declaration order.
    pub stations: Vec<StationResult>,
    pub empty_weight: Kilograms,
    pub empty_moment: KilogramInches,
    pub fuel_weight: Kilograms,
    pub fuel_moment: KilogramInches,
}

impl MassBalanceResult {
    /// Whether the loading is inside the envelope and not above the takeoff limit.
    pub fn is_safe(&self) -> bool { self.is_within_envelope && !self.exceeds_max_weight }
}

/// Computes mass & balance for `aircraft` loaded with `station_weights` and `fuel_weight`.
///
/// Stations missing from `station_weights` count as empty. No weight is clamped
/// or rejected, safety verdicts are reported through the result's flags.
///
/// # Arguments
/// - `aircraft`: The airframe's static configuration.
/// - `station_weights`: Loaded weight per station id.
/// - `fuel_weight`: Fuel mass, already converted from volume by the caller.
///
/// # Returns
/// A freshly computed [`MassBalanceResult`]. Identical inputs always produce
/// identical results.
pub fn calculate_mass_balance(
    aircraft: &AircraftConfig,
    station_weights: &HashMap<String, Kilograms>,
    fuel_weight: Kilograms,
) -> MassBalanceResult {
    let empty_moment = aircraft.empty_weight * aircraft.empty_cg;

    let stations: Vec<StationResult> = aircraft
        .stations
        .iter()
        .map(|station| {
            let weight = station_weights.get(&station.id).copied().unwrap_or(Kilograms::ZERO);
            StationResult { station: station.clone(), weight, moment: weight * station.arm }
        })
        .collect();

    let fuel_moment = fuel_weight * aircraft.fuel_arm;

    let total_weight =
        aircraft.empty_weight + stations.iter().map(|s| s.weight).sum::<Kilograms>() + fuel_weight;
    let total_moment =
        empty_moment + stations.iter().map(|s| s.moment).sum::<KilogramInches>() + fuel_moment;
    let cg_position = total_moment.arm_for(total_weight);

    MassBalanceResult {
        total_weight,
        total_moment,
        cg_position,
        is_within_envelope: is_within_envelope(total_weight, cg_position, &aircraft.envelope),
        exceeds_max_weight: total_weight > aircraft.max_takeoff_weight,
        stations,
        empty_weight: aircraft.empty_weight,
        empty_moment,
        fuel_weight,
        fuel_moment,
    }
}
