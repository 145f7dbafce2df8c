use super::aircraft::AircraftConfig;
use super::calculator::StationWeights;
use super::flight_phase::{FlightEvaluation, evaluate_flight};
use super::units::{Kilograms, Liters};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The user-entered loading of one aircraft, as kept by a persistence layer.
///
/// Weights are stored per station, fuel as volume. Nothing here is validated; use
/// [`LoadingInput::clamped`] to bring values into the placarded ranges.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingInput {
    pub registration: String,
    #[serde(default)]
    pub station_weights: StationWeights,
    #[serde(default)]
    pub fuel_volume: Liters,
    /// Planned fuel burn between takeoff and landing.
    #[serde(default)]
    pub fuel_burn: Liters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl LoadingInput {
    /// An empty loading for the aircraft registered as `registration`.
    pub fn new(registration: &str) -> Self {
        Self {
            registration: registration.to_string(),
            station_weights: StationWeights::new(),
            fuel_volume: Liters::ZERO,
            fuel_burn: Liters::ZERO,
            last_updated: None,
        }
    }

    /// Sets the weight on station `id`.
    pub fn with_station(mut self, id: &str, weight: Kilograms) -> Self {
        self.station_weights.insert(id.to_string(), weight);
        self
    }

    pub fn with_fuel(mut self, volume: Liters, burn: Liters) -> Self {
        self.fuel_volume = volume;
        self.fuel_burn = burn;
        self
    }

    /// Stamps the loading with the current time, e.g. right before it is stored.
    pub fn touch(&mut self) { self.last_updated = Some(Utc::now()); }

    /// Whether anything has been loaded at all.
    pub fn has_values(&self) -> bool {
        self.station_weights.values().any(|w| *w > Kilograms::ZERO) || self.fuel_volume > Liters::ZERO
    }

    /// Returns a copy with every value clamped into its admissible range.
    ///
    /// Station weights are limited to `[0, max_weight]` of their station, the fuel
    /// volume to `[0, fuel_capacity]` and the burn to `[0, fuel_volume]`. Weights of
    /// stations the aircraft does not declare are dropped.
    pub fn clamped(&self, aircraft: &AircraftConfig) -> Self {
        let station_weights = aircraft
            .stations
            .iter()
            .filter_map(|station| {
                let weight = *self.station_weights.get(&station.id)?;
                Some((station.id.clone(), weight.max(Kilograms::ZERO).min(station.max_weight)))
            })
            .collect();
        let fuel_volume = self.fuel_volume.max(Liters::ZERO).min(aircraft.fuel_capacity);
        Self {
            registration: self.registration.clone(),
            station_weights,
            fuel_volume,
            fuel_burn: self.fuel_burn.max(Liters::ZERO).min(fuel_volume),
            last_updated: self.last_updated,
        }
    }

    /// Fuel mass at takeoff.
    pub fn fuel_weight(&self, aircraft: &AircraftConfig) -> Kilograms {
        aircraft.fuel_weight(self.fuel_volume)
    }

    /// Fuel mass burned until landing.
    pub fn burn_weight(&self, aircraft: &AircraftConfig) -> Kilograms {
        aircraft.fuel_weight(self.fuel_burn)
    }

    /// Evaluates takeoff and landing for this loading exactly as entered.
    pub fn evaluate(&self, aircraft: &AircraftConfig) -> FlightEvaluation {
        evaluate_flight(
            aircraft,
            &self.station_weights,
            self.fuel_weight(aircraft),
            self.burn_weight(aircraft),
        )
    }
}
