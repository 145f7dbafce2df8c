use super::units::{Inches, KilogramInches, Kilograms};
use serde::{Deserialize, Serialize};

/// A fixed loading point of an aircraft, e.g. a seat row or a baggage compartment.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Stable identifier used as key for station weights.
    pub id: String,
    pub name: String,
    pub arm: Inches,
    /// Placarded ceiling for this station. Advisory only, the engine never enforces it.
    pub max_weight: Kilograms,
}

impl Station {
    pub fn new(id: &str, name: &str, arm: Inches, max_weight: Kilograms) -> Self {
        Self { id: id.to_string(), name: name.to_string(), arm, max_weight }
    }

    /// Whether `weight` is above the placarded ceiling of this station.
    pub fn is_overloaded(&self, weight: Kilograms) -> bool { weight > self.max_weight }
}

/// The contribution of one station to a mass & balance result.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct StationResult {
    pub station: Station,
    pub weight: Kilograms,
    pub moment: KilogramInches,
}
