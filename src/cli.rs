use clap::{Args, Parser, Subcommand};
use loadsheet::ConfigError;
use loadsheet::units::{Kilograms, Liters, MassUnit, VolumeUnit};
use std::fmt;
use std::path::PathBuf;

/// Environment variable naming an additional JSON aircraft file.
pub const AIRCRAFT_FILE_ENV: &str = "LOADSHEET_AIRCRAFT_FILE";

/// Aircraft mass & balance loadsheets.
///
/// Exits with 0 when every phase is within limits, 1 when a phase is out of
/// limits and 2 on usage or configuration errors.
#[derive(Parser, Debug)]
#[command(name = "loadsheet", version, about)]
pub struct Cli {
    /// JSON array of additional aircraft configurations.
    #[arg(long, global = true, env = AIRCRAFT_FILE_ENV, value_name = "FILE")]
    pub aircraft_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List the known aircraft grouped by model
    List,
    /// Print the takeoff and landing loadsheet of one aircraft
    Eval(LoadingRequest),
}

/// A loading as typed on the command line, before it is checked against an aircraft.
#[derive(Args, Debug, PartialEq)]
pub struct LoadingRequest {
    /// Registration of the aircraft, e.g. SE-LRO
    #[arg(value_parser = parse_registration)]
    pub registration: String,

    /// Weight per station in kg
    #[arg(value_name = "STATION=KG", value_parser = parse_station)]
    pub stations: Vec<(String, Kilograms)>,

    /// Fuel on board at takeoff
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = parse_volume)]
    pub fuel: f64,

    /// Fuel burned until landing
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = parse_volume)]
    pub burn: f64,

    /// Unit of --fuel and --burn
    #[arg(long, default_value = "L", value_name = "L|gal")]
    pub volume_unit: VolumeUnit,

    /// Unit of printed masses and moments, defaults to the aircraft's
    #[arg(long, value_name = "kg|lbs")]
    pub unit: Option<MassUnit>,
}

impl LoadingRequest {
    pub fn fuel_volume(&self) -> Liters { self.volume(self.fuel) }

    pub fn burn_volume(&self) -> Liters { self.volume(self.burn) }

    fn volume(&self, amount: f64) -> Liters {
        // `parse_volume` only admits amounts within range.
        Liters::from_unit(amount, self.volume_unit).unwrap_or(Liters::ZERO)
    }
}

#[derive(Debug)]
pub enum CliError {
    UnknownAircraft(String),
    UnknownStation { registration: String, station: String },
    Config(ConfigError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::UnknownAircraft(reg) => write!(f, "no aircraft registered as {reg}"),
            CliError::UnknownStation { registration, station } => {
                write!(f, "{registration} has no station '{station}'")
            }
            CliError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self { CliError::Config(value) }
}

fn parse_registration(value: &str) -> Result<String, String> { Ok(value.trim().to_uppercase()) }

/// Parses a finite, non-negative number representable as `T`.
fn parse_non_negative<T: TryFrom<f64>>(value: &str) -> Result<T, String> {
    let number: f64 = value.trim().parse().map_err(|_| format!("'{value}' is not a number"))?;
    if number < 0.0 {
        return Err(format!("{number} must not be negative"));
    }
    T::try_from(number).map_err(|_| format!("{number} is out of range"))
}

fn parse_volume(value: &str) -> Result<f64, String> {
    parse_non_negative::<Liters>(value).map(f64::from)
}

fn parse_station(arg: &str) -> Result<(String, Kilograms), String> {
    let (station, weight) =
        arg.split_once('=').ok_or_else(|| format!("expected <station>=<kg>, got '{arg}'"))?;
    Ok((station.to_string(), parse_non_negative(weight)?))
}
