use super::envelope::{Envelope, EnvelopeError};
use super::station::Station;
use super::units::{
    Inches, KilogramInches, Kilograms, KilogramsPerLiter, Liters, MassUnit, Pounds,
    PoundsPerGallon, UsGallons, VolumeUnit,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

/// Aircraft types with shared station layout and envelope.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, Serialize, Deserialize)]
pub enum AircraftModelType {
    #[serde(rename = "tecnam-2002jf")]
    #[strum(serialize = "tecnam-2002jf")]
    Tecnam2002Jf,
    #[serde(rename = "da40-ng")]
    #[strum(serialize = "da40-ng")]
    Da40Ng,
}

/// Fuel grades with their standard densities.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FuelType {
    /// Avgas 100LL.
    #[strum(serialize = "avgas")]
    Avgas,
    /// Jet-A at 15 °C.
    #[strum(serialize = "jet-a")]
    JetA,
}

impl FuelType {
    pub const fn density(self) -> KilogramsPerLiter {
        match self {
            FuelType::Avgas => KilogramsPerLiter::lit("0.72"),
            FuelType::JetA => KilogramsPerLiter::lit("0.8"),
        }
    }

    /// Density in pounds per US gallon as printed in imperial handbooks.
    pub const fn lbs_per_gallon(self) -> PoundsPerGallon {
        match self {
            FuelType::Avgas => PoundsPerGallon::lit("6.0"),
            FuelType::JetA => PoundsPerGallon::lit("6.7"),
        }
    }

    /// Fuel mass of `volume` given in `volume_unit`, expressed in `mass_unit`.
    ///
    /// Metric volumes use [`Self::density`], gallons use [`Self::lbs_per_gallon`].
    /// Mixed pairs convert the mass afterwards. Returns `None` for non-finite or
    /// out-of-range volumes.
    pub fn weight_in(self, volume: f64, volume_unit: VolumeUnit, mass_unit: MassUnit) -> Option<f64> {
        Some(match volume_unit {
            VolumeUnit::Liters => (Liters::from_f64(volume)? * self.density()).in_unit(mass_unit),
            VolumeUnit::Gallons => {
                let pounds: Pounds = UsGallons::from_f64(volume)? * self.lbs_per_gallon();
                match mass_unit {
                    MassUnit::Kg => pounds.to_kilograms().to_f64(),
                    MassUnit::Lbs => pounds.to_f64(),
                }
            }
        })
    }
}

/// Integrity violations in an aircraft configuration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AircraftError {
    Envelope(EnvelopeError),
    /// Two stations share the same id.
    DuplicateStation(String),
    /// A quantity that must not be negative is.
    Negative(&'static str),
    /// The declared landing limit is above the takeoff limit.
    LandingAboveTakeoff,
    /// Loading every point with the takeoff limit would overflow the moment range.
    MomentOutOfRange,
}

impl fmt::Display for AircraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AircraftError::Envelope(e) => write!(f, "{e}"),
            AircraftError::DuplicateStation(id) => write!(f, "station id '{id}' is declared twice"),
            AircraftError::Negative(field) => write!(f, "{field} must not be negative"),
            AircraftError::LandingAboveTakeoff => {
                write!(f, "maxLandingWeight exceeds maxTakeoffWeight")
            }
            AircraftError::MomentOutOfRange => {
                write!(f, "maxTakeoffWeight and arms are too large to compute moments")
            }
        }
    }
}

impl std::error::Error for AircraftError {}

impl From<EnvelopeError> for AircraftError {
    fn from(value: EnvelopeError) -> Self { AircraftError::Envelope(value) }
}

/// Static mass & balance data of one airframe, identified by its registration.
///
/// Values specific to the tail number (empty weight and CG) sit next to values
/// shared by the model type (stations, envelope, limits, fuel system).
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftConfig {
    /// Tail number, e.g. `SE-LRO`.
    pub registration: String,
    /// Display name of the model, e.g. `Tecnam P2002JF`.
    pub model: String,
    pub model_type: AircraftModelType,
    pub manufacturer: String,
    /// Basic empty weight from the weighing report.
    pub empty_weight: Kilograms,
    #[serde(rename = "emptyCG")]
    pub empty_cg: Inches,
    pub stations: Vec<Station>,
    pub envelope: Envelope,
    pub max_takeoff_weight: Kilograms,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_landing_weight: Option<Kilograms>,
    pub fuel_capacity: Liters,
    pub fuel_arm: Inches,
    pub fuel_type: FuelType,
    pub fuel_density: KilogramsPerLiter,
    #[serde(default)]
    pub default_unit: MassUnit,
}

impl AircraftConfig {
    /// Looks up a station by its id.
    pub fn station(&self, id: &str) -> Option<&Station> { self.stations.iter().find(|s| s.id == id) }

    /// The landing weight limit, which is the takeoff limit unless a separate one is declared.
    pub fn landing_weight_limit(&self) -> Kilograms {
        self.max_landing_weight.unwrap_or(self.max_takeoff_weight)
    }

    /// Converts a fuel volume into a mass using this aircraft's fuel density.
    pub fn fuel_weight(&self, volume: Liters) -> Kilograms { volume * self.fuel_density }

    /// Checks the integrity rules the envelope type cannot express on its own.
    ///
    /// # Errors
    /// Returns the first violated rule as [`AircraftError`].
    pub fn validate(&self) -> Result<(), AircraftError> {
        if let Some(id) = self.stations.iter().map(|s| s.id.as_str()).duplicates().next() {
            return Err(AircraftError::DuplicateStation(id.to_string()));
        }
        let negative_field = [
            ("emptyWeight", self.empty_weight < Kilograms::ZERO),
            ("maxTakeoffWeight", self.max_takeoff_weight < Kilograms::ZERO),
            ("fuelCapacity", self.fuel_capacity < Liters::ZERO),
            ("fuelDensity", self.fuel_density < KilogramsPerLiter::ZERO),
            ("station maxWeight", self.stations.iter().any(|s| s.max_weight < Kilograms::ZERO)),
        ]
        .into_iter()
        .find_map(|(field, negative)| negative.then_some(field));
        if let Some(field) = negative_field {
            return Err(AircraftError::Negative(field));
        }
        if self.max_landing_weight.is_some_and(|mlw| mlw > self.max_takeoff_weight) {
            return Err(AircraftError::LandingAboveTakeoff);
        }
        if self.moment_bound().is_none() {
            return Err(AircraftError::MomentOutOfRange);
        }
        Ok(())
    }

    /// Upper bound of the total moment when the empty aircraft, every station and
    /// the fuel each carried the full takeoff limit at the most extreme arm.
    /// `None` if that bound does not fit into [`KilogramInches`].
    fn moment_bound(&self) -> Option<KilogramInches> {
        let extreme_arm = self
            .stations
            .iter()
            .map(|s| s.arm)
            .chain([self.empty_cg, self.fuel_arm])
            .map(Inches::abs)
            .max()
            .unwrap_or(Inches::ZERO);
        let per_point = self.max_takeoff_weight * extreme_arm;
        (0..self.stations.len() + 2).try_fold(KilogramInches::ZERO, |acc, _| acc.checked_add(per_point))
    }
}
