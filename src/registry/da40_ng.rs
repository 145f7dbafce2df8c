//! Diamond DA40 NG reference data. Weights in kg, arms in inches from the datum.

use crate::fatal;
use crate::mass_balance::units::{Inches, Kilograms, Liters, MassUnit};
use crate::mass_balance::{
    AircraftConfig, AircraftModelType, CgEnvelopePoint, Envelope, FuelType, Station,
};
use std::sync::LazyLock;

// Forward limit moves from 2.400 m to 2.469 m above 1080 kg, aft limit stays at 2.530 m.
static ENVELOPE: LazyLock<Envelope> = LazyLock::new(|| {
    Envelope::new(vec![
        CgEnvelopePoint::new(Kilograms::lit("940"), Inches::lit("94.49"), Inches::lit("99.61")),
        CgEnvelopePoint::new(Kilograms::lit("1080"), Inches::lit("94.49"), Inches::lit("99.61")),
        CgEnvelopePoint::new(Kilograms::lit("1310"), Inches::lit("97.20"), Inches::lit("99.61")),
    ])
    .unwrap_or_else(|e| fatal!("DA40 NG envelope is corrupt: {e}"))
});

fn stations() -> Vec<Station> {
    vec![
        Station::new("frontSeats", "Front Seats", Inches::lit("91.73"), Kilograms::lit("240")),
        Station::new("rearSeats", "Rear Seats", Inches::lit("127.95"), Kilograms::lit("240")),
        Station::new("baggageStandard", "Baggage (Standard)", Inches::lit("143.70"), Kilograms::lit("20")),
        Station::new("baggageExtForward", "Baggage Ext (Forward)", Inches::lit("153.15"), Kilograms::lit("20")),
        Station::new("baggageExtAft", "Baggage Ext (Aft)", Inches::lit("178.74"), Kilograms::lit("20")),
    ]
}

fn airframe(registration: &str, empty_weight: Kilograms, empty_cg: Inches) -> AircraftConfig {
    AircraftConfig {
        registration: registration.to_string(),
        model: "Diamond DA40 NG".to_string(),
        model_type: AircraftModelType::Da40Ng,
        manufacturer: "Diamond".to_string(),
        empty_weight,
        empty_cg,
        stations: stations(),
        envelope: ENVELOPE.clone(),
        max_takeoff_weight: Kilograms::lit("1310"),
        max_landing_weight: None,
        fuel_capacity: Liters::lit("155.2"),
        fuel_arm: Inches::lit("103.54"),
        fuel_type: FuelType::JetA,
        fuel_density: FuelType::JetA.density(),
        default_unit: MassUnit::Kg,
    }
}

/// LN-FTM, empty moment 2180.8 kgm.
pub(super) fn ln_ftm() -> AircraftConfig {
    airframe("LN-FTM", Kilograms::lit("900"), Inches::lit("95.39"))
}

/// LN-FTS, empty moment 2262.3 kgm.
pub(super) fn ln_fts() -> AircraftConfig {
    airframe("LN-FTS", Kilograms::lit("929.3"), Inches::lit("95.83"))
}
