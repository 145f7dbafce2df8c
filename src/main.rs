mod cli;

use crate::cli::{Cli, CliError, Command, LoadingRequest};
use clap::Parser;
use loadsheet::units::{
    KilogramInches, Kilograms, MassUnit, VolumeUnit, format_moment, format_volume, format_weight,
};
use loadsheet::{
    AircraftConfig, AircraftRegistry, FlightEvaluation, LoadingInput, PhaseResult, error, event,
    info, log, warn,
};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let registry = match load_registry(cli.aircraft_file.as_deref()) {
        Ok(registry) => registry,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    match &cli.command {
        Command::List => {
            print_registry(&registry);
            ExitCode::SUCCESS
        }
        Command::Eval(request) => match evaluate(&registry, request) {
            Ok(evaluation) if evaluation.is_safe() => ExitCode::SUCCESS,
            Ok(_) => ExitCode::from(1),
            Err(e) => {
                error!("{e}");
                ExitCode::from(2)
            }
        },
    }
}

/// Built-in airframes plus the optional aircraft file.
fn load_registry(aircraft_file: Option<&Path>) -> Result<AircraftRegistry, CliError> {
    let mut registry = AircraftRegistry::builtin();
    if let Some(path) = aircraft_file {
        registry.merge(AircraftRegistry::from_file(path)?)?;
    }
    event!("Registry holds {} aircraft", registry.len());
    Ok(registry)
}

fn print_registry(registry: &AircraftRegistry) {
    for model_type in registry.model_types() {
        info!("{} ({model_type})", registry.model_display_name(model_type));
        for ac in registry.by_model(model_type) {
            let unit = ac.default_unit;
            // Imperial handbooks quote fuel in gallons at a per-grade lbs/gal density.
            let volume_unit = match unit {
                MassUnit::Kg => VolumeUnit::Liters,
                MassUnit::Lbs => VolumeUnit::Gallons,
            };
            let full_tanks = ac
                .fuel_type
                .weight_in(ac.fuel_capacity.in_unit(volume_unit), volume_unit, unit)
                .unwrap_or_default();
            log!(
                "  {}  empty {} @ {}  MTOW {}  fuel {} {} ({full_tanks:.1} {unit})",
                ac.registration,
                format_weight(ac.empty_weight, unit),
                ac.empty_cg,
                format_weight(ac.max_takeoff_weight, unit),
                format_volume(ac.fuel_capacity, volume_unit),
                ac.fuel_type
            );
        }
    }
}

fn evaluate(registry: &AircraftRegistry, request: &LoadingRequest) -> Result<FlightEvaluation, CliError> {
    let aircraft = registry
        .by_registration(&request.registration)
        .ok_or_else(|| CliError::UnknownAircraft(request.registration.clone()))?;

    let mut loading = LoadingInput::new(&aircraft.registration)
        .with_fuel(request.fuel_volume(), request.burn_volume());
    for (id, weight) in &request.stations {
        let Some(station) = aircraft.station(id) else {
            return Err(CliError::UnknownStation {
                registration: aircraft.registration.clone(),
                station: id.clone(),
            });
        };
        if station.is_overloaded(*weight) {
            warn!("{} carries {weight}, placarded maximum is {}", station.name, station.max_weight);
        }
        loading = loading.with_station(id, *weight);
    }
    if loading.fuel_volume > aircraft.fuel_capacity {
        warn!("Fuel {} exceeds tank capacity {}", loading.fuel_volume, aircraft.fuel_capacity);
    }
    if loading.fuel_burn > loading.fuel_volume {
        warn!("Burn {} exceeds fuel on board, landing with empty tanks", loading.fuel_burn);
    }
    if !loading.has_values() {
        warn!("Nothing loaded, evaluating the empty aircraft");
    }

    let evaluation = loading.evaluate(aircraft);
    print_loadsheet(aircraft, &loading, &evaluation, request.unit.unwrap_or(aircraft.default_unit));
    Ok(evaluation)
}

fn print_loadsheet(
    aircraft: &AircraftConfig,
    loading: &LoadingInput,
    evaluation: &FlightEvaluation,
    unit: MassUnit,
) {
    info!("{} {} ({})", aircraft.manufacturer, aircraft.model, aircraft.registration);
    log!(
        "Fuel {} ({}), burn {}",
        format_volume(loading.fuel_volume, VolumeUnit::Liters),
        format_volume(loading.fuel_volume, VolumeUnit::Gallons),
        format_volume(loading.fuel_burn, VolumeUnit::Liters)
    );
    for phase in evaluation.phases() {
        print_phase(phase, unit);
    }
    if evaluation.is_safe() {
        info!("Loading is within limits");
    } else {
        error!("Loading is OUT OF LIMITS");
    }
}

fn print_phase(phase: &PhaseResult, unit: MassUnit) {
    let result = &phase.result;
    let row = |name: &str, weight: Kilograms, moment: KilogramInches| {
        log!("  {name:<24}{:>12}{:>16}", format_weight(weight, unit), format_moment(moment, unit));
    };
    info!("{}", phase.phase);
    row("Empty aircraft", result.empty_weight, result.empty_moment);
    for station in &result.stations {
        row(&station.station.name, station.weight, station.moment);
    }
    row("Fuel", result.fuel_weight, result.fuel_moment);
    row("Total", result.total_weight, result.total_moment);
    log!("  CG {}", result.cg_position);
    if !result.is_within_envelope {
        warn!("  CG outside envelope at {}", format_weight(result.total_weight, unit));
    }
    if phase.exceeds_weight_limit {
        warn!(
            "  {} exceeds limit of {}",
            format_weight(result.total_weight, unit),
            format_weight(phase.weight_limit, unit)
        );
    }
}
