use super::units::{
    Inches, KilogramInches, Kilograms, Liters, MassUnit, VolumeUnit, convert_weight,
    format_moment, format_volume, format_weight,
};
use super::{
    AircraftConfig, AircraftError, CgBand, CgEnvelopePoint, Envelope, EnvelopeError, FlightPhase,
    FuelType, LoadingInput, StationWeights, calculate_mass_balance, evaluate_flight,
    is_within_envelope,
};
use crate::registry::AircraftRegistry;
use fixed::types::I32F32;
use rand::Rng;

fn aircraft(registration: &str) -> AircraftConfig {
    AircraftRegistry::builtin().by_registration(registration).unwrap().clone()
}

fn da40_envelope() -> Envelope { aircraft("LN-FTM").envelope }

fn weights(entries: &[(&str, &str)]) -> StationWeights {
    entries.iter().map(|(id, kg)| ((*id).to_string(), Kilograms::lit(kg))).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
}

#[test]
fn test_envelope_below_range_uses_first_band() {
    let envelope = da40_envelope();
    assert!(is_within_envelope(Kilograms::lit("500"), Inches::lit("95"), &envelope));
    assert!(!is_within_envelope(Kilograms::lit("500"), Inches::lit("94"), &envelope));
    assert!(!is_within_envelope(Kilograms::lit("500"), Inches::lit("99.62"), &envelope));
    assert_eq!(envelope.band_at(Kilograms::ZERO), Some(envelope.first().band()));
}

#[test]
fn test_envelope_above_range_is_always_outside() {
    let envelope = da40_envelope();
    let heavy = Kilograms::lit("1310.001");
    assert_eq!(envelope.band_at(heavy), None);
    for cg in ["0", "94.49", "97.20", "98.5", "99.61", "150"] {
        assert!(!is_within_envelope(heavy, Inches::lit(cg), &envelope), "cg {cg} accepted");
    }
}

#[test]
fn test_envelope_exact_at_breakpoints() {
    let envelope = da40_envelope();
    let expected = [
        ("940", "94.49", "99.61"),
        ("1080", "94.49", "99.61"),
        ("1310", "97.20", "99.61"),
    ];
    for (weight, min, max) in expected {
        assert_eq!(
            envelope.band_at(Kilograms::lit(weight)),
            Some(CgBand { min: Inches::lit(min), max: Inches::lit(max) }),
            "band at {weight} kg"
        );
    }
}

#[test]
fn test_envelope_interpolates_linearly() {
    let envelope = da40_envelope();
    let band = envelope.band_at(Kilograms::lit("1195")).unwrap();
    assert_close(band.min.to_f64(), 94.49 + 0.5 * (97.20 - 94.49));
    assert_close(band.max.to_f64(), 99.61);

    let band = envelope.band_at(Kilograms::lit("1010")).unwrap();
    assert_close(band.min.to_f64(), 94.49);
}

#[test]
fn test_envelope_bounds_are_inclusive() {
    let envelope = da40_envelope();
    let weight = Kilograms::lit("1310");
    assert!(is_within_envelope(weight, Inches::lit("97.20"), &envelope));
    assert!(is_within_envelope(weight, Inches::lit("99.61"), &envelope));
    assert!(!is_within_envelope(weight, Inches::lit("97.19"), &envelope));
}

#[test]
fn test_interpolated_bounds_are_inclusive() {
    let envelope = da40_envelope();
    let weight = Kilograms::lit("1195");
    let band = envelope.band_at(weight).unwrap();
    let just_forward = Inches::from_fixed(band.min.fixed() - I32F32::DELTA);
    let just_aft = Inches::from_fixed(band.max.fixed() + I32F32::DELTA);
    assert!(is_within_envelope(weight, band.min, &envelope));
    assert!(is_within_envelope(weight, band.max, &envelope));
    assert!(!is_within_envelope(weight, just_forward, &envelope));
    assert!(!is_within_envelope(weight, just_aft, &envelope));
}

#[test]
fn test_single_point_envelope() {
    let point = CgEnvelopePoint::new(Kilograms::lit("600"), Inches::lit("66"), Inches::lit("70"));
    let envelope = Envelope::new(vec![point]).unwrap();
    assert!(envelope.contains(Kilograms::lit("600"), Inches::lit("68")));
    assert!(envelope.contains(Kilograms::lit("300"), Inches::lit("66")));
    assert!(!envelope.contains(Kilograms::lit("600.5"), Inches::lit("68")));
}

#[test]
fn test_envelope_rejects_malformed_tables() {
    let p = |w: &str, min: &str, max: &str| {
        CgEnvelopePoint::new(Kilograms::lit(w), Inches::lit(min), Inches::lit(max))
    };
    assert_eq!(Envelope::new(Vec::new()), Err(EnvelopeError::Empty));
    assert_eq!(
        Envelope::new(vec![p("580", "66", "70"), p("580", "66", "70"), p("620", "66", "70")]),
        Err(EnvelopeError::DuplicateWeight { index: 1, weight: Kilograms::lit("580") })
    );
    assert_eq!(
        Envelope::new(vec![p("600", "66", "70"), p("580", "66", "70")]),
        Err(EnvelopeError::Unsorted { index: 1 })
    );
    assert_eq!(
        Envelope::new(vec![p("580", "66", "70"), p("600", "71", "70")]),
        Err(EnvelopeError::InvertedBand { index: 1 })
    );
}

#[test]
fn test_se_lro_scenario() {
    let se_lro = aircraft("SE-LRO");
    let fuel = se_lro.fuel_weight(Liters::lit("50"));
    assert_close(fuel.to_f64(), 36.0);

    let loading = weights(&[("pilot", "75"), ("copilot", "75"), ("baggage", "10")]);
    let result = calculate_mass_balance(&se_lro, &loading, fuel);

    let expected_moment = 381.0 * 67.95 + 75.0 * 70.87 + 75.0 * 70.87 + 10.0 * 88.98 + 36.0 * 60.24;
    assert_close(result.total_weight.to_f64(), 577.0);
    assert!((result.total_moment.to_f64() - expected_moment).abs() < 1e-4);
    assert!((result.cg_position.to_f64() - expected_moment / 577.0).abs() < 1e-6);
    assert!(!result.exceeds_max_weight);
    // 577 kg is below the first breakpoint at 580 kg, so the 66.65..70.16 band applies.
    assert!(result.cg_position > Inches::lit("66.65") && result.cg_position < Inches::lit("70.16"));
    assert!(result.is_within_envelope);
    assert!(result.is_safe());

    let ids: Vec<&str> = result.stations.iter().map(|s| s.station.id.as_str()).collect();
    assert_eq!(ids, ["pilot", "copilot", "baggage"]);
    assert_eq!(result.stations[2].moment, Kilograms::lit("10") * Inches::lit("88.98"));
}

#[test]
fn test_zero_loading_reproduces_empty_cg() {
    for ac in AircraftRegistry::builtin().iter() {
        let result = calculate_mass_balance(ac, &StationWeights::new(), Kilograms::ZERO);
        assert_eq!(result.total_weight, ac.empty_weight, "{}", ac.registration);
        assert_eq!(result.cg_position, ac.empty_cg, "{}", ac.registration);
        assert_eq!(result.total_moment, result.empty_moment);
        assert!(result.stations.iter().all(|s| s.weight.is_zero() && s.moment.is_zero()));
    }
}

#[test]
fn test_empty_cg_exact_for_fractional_weights() {
    let mut ac = aircraft("LN-FTS");
    for weight in ["929.3", "381.7", "1000.1", "777.77", "12.3", "0.001"] {
        for cg in ["95.83", "67.95", "94.49", "-12.34"] {
            ac.empty_weight = Kilograms::lit(weight);
            ac.empty_cg = Inches::lit(cg);
            let result = calculate_mass_balance(&ac, &StationWeights::new(), Kilograms::ZERO);
            assert_eq!(result.cg_position, ac.empty_cg, "{weight} kg at {cg} in");
        }
    }
}

#[test]
fn test_cg_on_forward_limit_is_inside() {
    let mut ac = aircraft("LN-FTS");
    ac.empty_cg = ac.envelope.first().cg_min;
    let result = calculate_mass_balance(&ac, &StationWeights::new(), Kilograms::ZERO);
    assert_eq!(result.cg_position, Inches::lit("94.49"));
    assert!(result.is_within_envelope);
}

#[test]
fn test_weightless_aircraft_has_zero_cg() {
    let mut ac = aircraft("SE-LRO");
    ac.empty_weight = Kilograms::ZERO;
    let result = calculate_mass_balance(&ac, &StationWeights::new(), Kilograms::ZERO);
    assert!(result.total_weight.is_zero());
    assert_eq!(result.cg_position, Inches::ZERO);
    assert!(!result.exceeds_max_weight);
}

#[test]
fn test_calculation_is_idempotent() {
    let ac = aircraft("LN-FTS");
    let loading = weights(&[("frontSeats", "160.5"), ("rearSeats", "80"), ("baggageExtAft", "7.3")]);
    let fuel = ac.fuel_weight(Liters::lit("120"));
    let first = calculate_mass_balance(&ac, &loading, fuel);
    let second = calculate_mass_balance(&ac, &loading, fuel);
    assert_eq!(first, second);
    assert_eq!(first.cg_position.fixed().to_bits(), second.cg_position.fixed().to_bits());
}

#[test]
fn test_sums_hold_for_random_loadings() {
    let mut rng = rand::rng();
    let ac = aircraft("LN-FTM");
    for _ in 0..200 {
        let loading: StationWeights = ac
            .stations
            .iter()
            .map(|s| (s.id.clone(), Kilograms::from_f64(rng.random_range(0.0..260.0)).unwrap()))
            .collect();
        let fuel = Kilograms::from_f64(rng.random_range(0.0..130.0)).unwrap();
        let result = calculate_mass_balance(&ac, &loading, fuel);

        let station_weight: Kilograms = result.stations.iter().map(|s| s.weight).sum();
        let station_moment: KilogramInches = result.stations.iter().map(|s| s.moment).sum();
        assert_eq!(result.total_weight, ac.empty_weight + station_weight + fuel);
        assert_eq!(result.total_moment, result.empty_moment + station_moment + result.fuel_moment);
        assert_eq!(result.fuel_moment, fuel * ac.fuel_arm);
        assert_eq!(result.cg_position, result.total_moment.arm_for(result.total_weight));
        assert_eq!(result.exceeds_max_weight, result.total_weight > ac.max_takeoff_weight);
    }
}

/// Reference band at `weight` in plain floating point.
fn reference_band(envelope: &Envelope, weight: f64) -> Option<(f64, f64)> {
    let points = envelope.points();
    if weight <= points[0].weight.to_f64() {
        return Some((points[0].cg_min.to_f64(), points[0].cg_max.to_f64()));
    }
    points.windows(2).find_map(|pair| {
        let (lower, upper) = (&pair[0], &pair[1]);
        let (w0, w1) = (lower.weight.to_f64(), upper.weight.to_f64());
        (w0 <= weight && weight <= w1).then(|| {
            let t = (weight - w0) / (w1 - w0);
            let lerp = |a: Inches, b: Inches| a.to_f64() + t * (b.to_f64() - a.to_f64());
            (lerp(lower.cg_min, upper.cg_min), lerp(lower.cg_max, upper.cg_max))
        })
    })
}

#[test]
fn test_random_loadings_match_floating_point() {
    let mut rng = rand::rng();
    let registry = AircraftRegistry::builtin();
    let fleet = registry.iter().collect::<Vec<_>>();
    for _ in 0..500 {
        let ac = fleet[rng.random_range(0..fleet.len())];
        let mut loading = StationWeights::new();
        for station in &ac.stations {
            if rng.random_bool(0.8) {
                let kg = Kilograms::from_f64(rng.random_range(0.0..150.0)).unwrap();
                loading.insert(station.id.clone(), kg);
            }
        }
        let fuel = Kilograms::from_f64(rng.random_range(0.0..130.0)).unwrap();
        let result = calculate_mass_balance(ac, &loading, fuel);

        let mut weight = ac.empty_weight.to_f64() + fuel.to_f64();
        let mut moment = ac.empty_weight.to_f64() * ac.empty_cg.to_f64()
            + fuel.to_f64() * ac.fuel_arm.to_f64();
        for station in &ac.stations {
            let kg = loading.get(&station.id).map_or(0.0, |w| w.to_f64());
            weight += kg;
            moment += kg * station.arm.to_f64();
        }
        let cg = moment / weight;

        assert!((result.total_weight.to_f64() - weight).abs() < 1e-9);
        assert!((result.total_moment.to_f64() - moment).abs() < 1e-6);
        assert!((result.cg_position.to_f64() - cg).abs() < 1e-8, "{} vs {cg}", result.cg_position);
        assert_eq!(result.exceeds_max_weight, weight > ac.max_takeoff_weight.to_f64());

        let inside = reference_band(&ac.envelope, weight).map(|(min, max)| (cg - min).min(max - cg));
        match inside {
            Some(margin) if margin.abs() > 1e-6 => assert_eq!(result.is_within_envelope, margin > 0.0),
            Some(_) => {}
            None => assert!(!result.is_within_envelope),
        }
    }
}

#[test]
fn test_max_weight_boundary_is_strict() {
    let ac = aircraft("SE-LRO");
    let loading = weights(&[("pilot", "120"), ("copilot", "100"), ("baggage", "19")]);
    let at_limit = calculate_mass_balance(&ac, &loading, Kilograms::ZERO);
    assert_eq!(at_limit.total_weight, ac.max_takeoff_weight);
    assert!(!at_limit.exceeds_max_weight);

    let over = calculate_mass_balance(&ac, &loading, Kilograms::lit("0.001"));
    assert!(over.exceeds_max_weight);
    assert!(!over.is_within_envelope);
}

#[test]
fn test_station_weights_are_taken_as_given() {
    let ac = aircraft("SE-LRO");
    let loading = weights(&[("pilot", "-10"), ("baggage", "35"), ("cargoPod", "500")]);
    let result = calculate_mass_balance(&ac, &loading, Kilograms::ZERO);
    // Negative and above-placard weights pass through, unknown stations are ignored.
    assert_eq!(result.total_weight, Kilograms::lit("406"));
    assert_eq!(result.stations[0].weight, Kilograms::lit("-10"));
    assert_eq!(result.stations[1].weight, Kilograms::ZERO);
    assert!(result.stations[2].station.is_overloaded(result.stations[2].weight));
}

#[test]
fn test_flight_evaluation_burns_fuel_for_landing() {
    let ac = aircraft("LN-FTM");
    let loading = weights(&[("frontSeats", "170"), ("rearSeats", "90")]);
    let fuel = ac.fuel_weight(Liters::lit("140"));
    let burn = ac.fuel_weight(Liters::lit("60"));
    let evaluation = evaluate_flight(&ac, &loading, fuel, burn);

    assert_eq!(evaluation.takeoff.phase, FlightPhase::Takeoff);
    assert_eq!(evaluation.landing.phase, FlightPhase::Landing);
    assert_eq!(evaluation.takeoff.result, calculate_mass_balance(&ac, &loading, fuel));
    assert_eq!(evaluation.landing.result, calculate_mass_balance(&ac, &loading, fuel - burn));
    assert_eq!(evaluation.takeoff.weight_limit, ac.max_takeoff_weight);
    // No separate landing limit is declared for the DA40 NG.
    assert_eq!(evaluation.landing.weight_limit, ac.max_takeoff_weight);
    assert!(evaluation.landing.result.total_weight < evaluation.takeoff.result.total_weight);
}

#[test]
fn test_landing_fuel_never_negative() {
    let ac = aircraft("SE-LRO");
    let evaluation =
        evaluate_flight(&ac, &StationWeights::new(), Kilograms::lit("20"), Kilograms::lit("50"));
    assert_eq!(evaluation.landing.result.fuel_weight, Kilograms::ZERO);
    assert_eq!(evaluation.landing.result.total_weight, ac.empty_weight);
}

#[test]
fn test_landing_checked_against_landing_limit() {
    let mut ac = aircraft("SE-LRO");
    ac.max_landing_weight = Some(Kilograms::lit("580"));
    let loading = weights(&[("pilot", "90"), ("copilot", "90")]);
    let evaluation = evaluate_flight(&ac, &loading, Kilograms::lit("50"), Kilograms::lit("20"));

    assert_eq!(evaluation.takeoff.result.total_weight, Kilograms::lit("611"));
    assert!(!evaluation.takeoff.exceeds_weight_limit);
    assert_eq!(evaluation.landing.result.total_weight, Kilograms::lit("591"));
    assert!(evaluation.landing.exceeds_weight_limit);
    assert!(!evaluation.landing.result.exceeds_max_weight);
    assert!(!evaluation.is_safe());
}

#[test]
fn test_loading_input_clamps_to_placards() {
    let ac = aircraft("SE-LRO");
    let loading = LoadingInput::new("SE-LRO")
        .with_station("pilot", Kilograms::lit("130"))
        .with_station("copilot", Kilograms::lit("-5"))
        .with_station("baggage", Kilograms::lit("12"))
        .with_station("cargoPod", Kilograms::lit("40"))
        .with_fuel(Liters::lit("120"), Liters::lit("150"));
    let clamped = loading.clamped(&ac);

    assert_eq!(clamped.station_weights, weights(&[("pilot", "120"), ("copilot", "0"), ("baggage", "12")]));
    assert_eq!(clamped.fuel_volume, Liters::lit("100"));
    assert_eq!(clamped.fuel_burn, Liters::lit("100"));
    assert_eq!(clamped.registration, "SE-LRO");
}

#[test]
fn test_loading_input_evaluation() {
    let ac = aircraft("SE-LJO");
    let empty = LoadingInput::new("SE-LJO");
    assert!(!empty.has_values());

    let loading = empty.with_station("pilot", Kilograms::lit("80")).with_fuel(Liters::lit("60"), Liters::lit("25"));
    assert!(loading.has_values());
    assert_close(loading.fuel_weight(&ac).to_f64(), 60.0 * 0.72);

    let evaluation = loading.evaluate(&ac);
    assert_eq!(evaluation.takeoff.result.fuel_weight, loading.fuel_weight(&ac));
    assert_eq!(
        evaluation.landing.result.fuel_weight,
        loading.fuel_weight(&ac) - loading.burn_weight(&ac)
    );
}

#[test]
fn test_loading_input_reads_stored_json() {
    let stored = r#"{
        "registration": "LN-FTS",
        "stationWeights": { "frontSeats": 150, "baggageStandard": 12.5 },
        "fuelVolume": 100,
        "fuelBurn": 35,
        "lastUpdated": "2025-03-01T10:15:00Z"
    }"#;
    let mut loading: LoadingInput = serde_json::from_str(stored).unwrap();
    assert_eq!(loading.station_weights, weights(&[("frontSeats", "150"), ("baggageStandard", "12.5")]));
    assert_eq!(loading.fuel_burn, Liters::lit("35"));
    let stored_at = loading.last_updated.unwrap();
    loading.touch();
    assert!(loading.last_updated.unwrap() > stored_at);

    let rejected = r#"{ "registration": "LN-FTS", "fuelVolume": 1e12 }"#;
    assert!(serde_json::from_str::<LoadingInput>(rejected).is_err());
}

#[test]
fn test_unit_conversions_and_formatting() {
    let kg = Kilograms::lit("100");
    assert_close(kg.to_pounds().to_f64(), 220.462);
    assert!((kg.to_pounds().to_kilograms().to_f64() - 100.0).abs() < 1e-6);
    assert_close(Liters::lit("100").to_us_gallons().to_f64(), 26.4172);
    assert!((convert_weight(220.462, MassUnit::Lbs, MassUnit::Kg).unwrap() - 100.0).abs() < 1e-6);
    assert_eq!(convert_weight(f64::NAN, MassUnit::Kg, MassUnit::Lbs), None);

    assert_eq!(format_weight(Kilograms::lit("75"), MassUnit::Kg), "75.0 kg");
    assert_eq!(format_weight(Kilograms::lit("100"), MassUnit::Lbs), "220.5 lbs");
    assert_eq!(format_volume(Liters::lit("50"), VolumeUnit::Liters), "50.0 L");
    assert_eq!(Inches::lit("68.5925").to_string(), "68.59 in");
    assert_eq!(format!("{:>10}", Kilograms::lit("5")), "    5.0 kg");
}

#[test]
fn test_fuel_weight_by_unit() {
    let close = |actual: Option<f64>, expected: f64| assert_close(actual.unwrap(), expected);
    close(FuelType::Avgas.weight_in(50.0, VolumeUnit::Liters, MassUnit::Kg), 36.0);
    close(FuelType::Avgas.weight_in(50.0, VolumeUnit::Liters, MassUnit::Lbs), 36.0 * 2.20462);
    close(FuelType::Avgas.weight_in(10.0, VolumeUnit::Gallons, MassUnit::Lbs), 60.0);
    close(FuelType::Avgas.weight_in(10.0, VolumeUnit::Gallons, MassUnit::Kg), 60.0 / 2.20462);
    close(FuelType::JetA.weight_in(10.0, VolumeUnit::Gallons, MassUnit::Lbs), 67.0);
    close(FuelType::JetA.weight_in(100.0, VolumeUnit::Liters, MassUnit::Kg), 80.0);
    assert_eq!(FuelType::JetA.weight_in(f64::INFINITY, VolumeUnit::Gallons, MassUnit::Kg), None);

    let gallons = Liters::from_unit(26.4172, VolumeUnit::Gallons).unwrap();
    assert!((gallons.to_f64() - 100.0).abs() < 1e-4);
    assert!((gallons.to_us_gallons().to_liters().to_f64() - gallons.to_f64()).abs() < 1e-6);
}

#[test]
fn test_moment_formatting() {
    let moment = Kilograms::lit("100") * Inches::lit("70");
    assert_eq!(moment.to_string(), "7000.0 kg·in");
    assert_eq!(format_moment(moment, MassUnit::Kg), "7000.0 kg·in");
    assert_eq!(format_moment(moment, MassUnit::Lbs), "15432.3 lbs·in");
}

#[test]
fn test_reject_moment_overflow() {
    let mut ac = aircraft("SE-LRO");
    assert_eq!(ac.validate(), Ok(()));
    ac.max_takeoff_weight = Kilograms::lit("2000000000");
    ac.stations[2].arm = Inches::lit("-2000000000");
    assert_eq!(ac.validate(), Err(AircraftError::MomentOutOfRange));
}

#[test]
fn test_quantities_saturate() {
    let huge = Kilograms::from_f64(2.0e9).unwrap();
    let moment = huge * Inches::lit("1000");
    assert!(moment > KilogramInches::ZERO);
    assert_eq!(huge + huge, Kilograms::from_fixed(fixed::types::I32F32::MAX));
    assert_eq!(Kilograms::from_f64(1.0e12), None);
}
