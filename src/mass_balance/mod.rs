mod aircraft;
mod calculator;
mod envelope;
mod flight_phase;
mod loading;
mod station;
pub mod units;
#[cfg(test)]
mod tests;

pub use aircraft::{AircraftConfig, AircraftError, AircraftModelType, FuelType};
pub use calculator::{MassBalanceResult, StationWeights, calculate_mass_balance};
pub use envelope::{CgBand, CgEnvelopePoint, Envelope, EnvelopeError, is_within_envelope};
pub use flight_phase::{FlightEvaluation, FlightPhase, PhaseResult, evaluate_flight};
pub use loading::LoadingInput;
pub use station::{Station, StationResult};
