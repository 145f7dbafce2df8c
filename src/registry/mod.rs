//! Lookup of aircraft configurations by registration.
//!
//! The registry starts out with the built-in reference airframes and can be
//! extended with configurations read from a JSON file. Every configuration is
//! validated when it enters the registry, so lookups only ever return airframes
//! whose envelope and stations are well formed.

mod da40_ng;
mod tecnam_p2002jf;

use crate::mass_balance::{AircraftConfig, AircraftError, AircraftModelType};
use crate::{event, info};
use itertools::Itertools;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static BUILTIN: LazyLock<AircraftRegistry> = LazyLock::new(|| AircraftRegistry {
    aircraft: vec![
        tecnam_p2002jf::se_lro(),
        tecnam_p2002jf::se_ljo(),
        da40_ng::ln_ftm(),
        da40_ng::ln_fts(),
    ],
});

/// Failures while loading aircraft configurations.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidAircraft { registration: String, source: AircraftError },
    DuplicateRegistration(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read aircraft file: {e}"),
            ConfigError::Parse(e) => write!(f, "could not parse aircraft file: {e}"),
            ConfigError::InvalidAircraft { registration, source } => {
                write!(f, "aircraft {registration} is misconfigured: {source}")
            }
            ConfigError::DuplicateRegistration(registration) => {
                write!(f, "aircraft {registration} is registered twice")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidAircraft { source, .. } => Some(source),
            ConfigError::DuplicateRegistration(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self { ConfigError::Io(value) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self { ConfigError::Parse(value) }
}

/// An ordered collection of validated aircraft configurations with unique registrations.
#[derive(Debug, Clone, Default)]
pub struct AircraftRegistry {
    aircraft: Vec<AircraftConfig>,
}

impl AircraftRegistry {
    /// The reference airframes shipped with this crate.
    pub fn builtin() -> Self { BUILTIN.clone() }

    /// Builds a registry from externally supplied configurations.
    ///
    /// # Errors
    /// Fails on the first configuration that does not validate and on repeated
    /// registrations.
    pub fn new(aircraft: Vec<AircraftConfig>) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for config in aircraft {
            registry.insert(config)?;
        }
        Ok(registry)
    }

    /// Parses a JSON array of aircraft configurations.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON, including envelopes whose
    /// breakpoints are empty, unsorted or duplicated, and the errors of [`Self::new`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Reads and parses the aircraft file at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as [`Self::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let registry = Self::from_json(&std::fs::read_to_string(path)?)?;
        info!("Loaded {} aircraft from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Adds a single configuration after validating it.
    ///
    /// # Errors
    /// Fails if the configuration is invalid or its registration is already known.
    pub fn insert(&mut self, config: AircraftConfig) -> Result<(), ConfigError> {
        config.validate().map_err(|source| ConfigError::InvalidAircraft {
            registration: config.registration.clone(),
            source,
        })?;
        if self.by_registration(&config.registration).is_some() {
            return Err(ConfigError::DuplicateRegistration(config.registration));
        }
        event!("Registered {} ({})", config.registration, config.model);
        self.aircraft.push(config);
        Ok(())
    }

    /// Moves all configurations of `other` into this registry.
    ///
    /// # Errors
    /// Fails on the first registration present in both registries. Configurations
    /// before it have already been added.
    pub fn merge(&mut self, other: AircraftRegistry) -> Result<(), ConfigError> {
        other.aircraft.into_iter().try_for_each(|config| self.insert(config))
    }

    pub fn by_registration(&self, registration: &str) -> Option<&AircraftConfig> {
        self.aircraft.iter().find(|ac| ac.registration == registration)
    }

    pub fn by_model(&self, model_type: AircraftModelType) -> impl Iterator<Item = &AircraftConfig> {
        self.aircraft.iter().filter(move |ac| ac.model_type == model_type)
    }

    /// All model types present, in order of first appearance.
    pub fn model_types(&self) -> Vec<AircraftModelType> {
        self.aircraft.iter().map(|ac| ac.model_type).unique().collect()
    }

    /// The model name of the first airframe of `model_type`, or the type identifier
    /// if the registry holds none.
    pub fn model_display_name(&self, model_type: AircraftModelType) -> String {
        self.by_model(model_type)
            .next()
            .map_or_else(|| model_type.to_string(), |ac| ac.model.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AircraftConfig> { self.aircraft.iter() }

    pub fn len(&self) -> usize { self.aircraft.len() }

    pub fn is_empty(&self) -> bool { self.aircraft.is_empty() }
}
