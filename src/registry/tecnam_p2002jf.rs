//! Tecnam P2002JF reference data. Weights in kg, arms in inches from the datum.

use crate::fatal;
use crate::mass_balance::units::{Inches, Kilograms, Liters, MassUnit};
use crate::mass_balance::{
    AircraftConfig, AircraftModelType, CgEnvelopePoint, Envelope, FuelType, Station,
};
use std::sync::LazyLock;

// Forward limit 26% MAC (1693 mm), aft limit 32.5% MAC (1782 mm).
static ENVELOPE: LazyLock<Envelope> = LazyLock::new(|| {
    let band = |weight| CgEnvelopePoint::new(weight, Inches::lit("66.65"), Inches::lit("70.16"));
    Envelope::new(vec![
        band(Kilograms::lit("580")),
        band(Kilograms::lit("600")),
        band(Kilograms::lit("620")),
    ])
    .unwrap_or_else(|e| fatal!("Tecnam P2002JF envelope is corrupt: {e}"))
});

fn stations() -> Vec<Station> {
    vec![
        Station::new("pilot", "Pilot", Inches::lit("70.87"), Kilograms::lit("120")),
        Station::new("copilot", "Co-Pilot", Inches::lit("70.87"), Kilograms::lit("120")),
        Station::new("baggage", "Baggage", Inches::lit("88.98"), Kilograms::lit("20")),
    ]
}

fn airframe(registration: &str, empty_weight: Kilograms, empty_cg: Inches) -> AircraftConfig {
    AircraftConfig {
        registration: registration.to_string(),
        model: "Tecnam P2002JF".to_string(),
        model_type: AircraftModelType::Tecnam2002Jf,
        manufacturer: "Tecnam".to_string(),
        empty_weight,
        empty_cg,
        stations: stations(),
        envelope: ENVELOPE.clone(),
        max_takeoff_weight: Kilograms::lit("620"),
        max_landing_weight: None,
        fuel_capacity: Liters::lit("100"),
        fuel_arm: Inches::lit("60.24"),
        fuel_type: FuelType::Avgas,
        fuel_density: FuelType::Avgas.density(),
        default_unit: MassUnit::Kg,
    }
}

/// SE-LRO, empty CG 1.726 m.
pub(super) fn se_lro() -> AircraftConfig {
    airframe("SE-LRO", Kilograms::lit("381"), Inches::lit("67.95"))
}

/// SE-LJO, empty CG 1.705 m.
pub(super) fn se_ljo() -> AircraftConfig {
    airframe("SE-LJO", Kilograms::lit("371"), Inches::lit("67.13"))
}
