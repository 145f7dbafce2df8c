//! Aircraft mass & balance.
//!
//! Given an airframe's static configuration, the weight loaded on each station and
//! the fuel on board, [`calculate_mass_balance`] derives total weight, moment and
//! CG and checks them against the CG envelope and the maximum takeoff weight.
//! [`evaluate_flight`] repeats that for takeoff and landing fuel.
//!
//! All computations are pure functions on immutable inputs using unit-tagged
//! fixed-point quantities from [`units`].

#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]

pub use chrono;

mod common;
pub mod logger;
mod mass_balance;
pub mod registry;

pub use mass_balance::units;
pub use mass_balance::{
    AircraftConfig, AircraftError, AircraftModelType, CgBand, CgEnvelopePoint, Envelope,
    EnvelopeError, FlightEvaluation, FlightPhase, FuelType, LoadingInput, MassBalanceResult,
    PhaseResult, Station, StationResult, StationWeights, calculate_mass_balance, evaluate_flight,
    is_within_envelope,
};
pub use registry::{AircraftRegistry, ConfigError};
