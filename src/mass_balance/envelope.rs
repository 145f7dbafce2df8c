use super::units::{Inches, Kilograms};
use crate::common::math::{lerp_fixed32, normalize_fixed32};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One breakpoint of the certified CG-versus-weight curve.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CgEnvelopePoint {
    pub weight: Kilograms,
    /// Forward CG limit at `weight`.
    pub cg_min: Inches,
    /// Aft CG limit at `weight`.
    pub cg_max: Inches,
}

impl CgEnvelopePoint {
    pub const fn new(weight: Kilograms, cg_min: Inches, cg_max: Inches) -> Self {
        Self { weight, cg_min, cg_max }
    }

    pub fn band(&self) -> CgBand { CgBand { min: self.cg_min, max: self.cg_max } }
}

/// An inclusive range of admissible CG positions at one gross weight.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct CgBand {
    pub min: Inches,
    pub max: Inches,
}

impl CgBand {
    pub fn contains(&self, cg: Inches) -> bool { self.min <= cg && cg <= self.max }
}

/// Configuration defects detected while building an [`Envelope`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum EnvelopeError {
    /// The breakpoint list is empty.
    Empty,
    /// Breakpoint `index` is lighter than its predecessor.
    Unsorted { index: usize },
    /// Breakpoint `index` repeats the weight of its predecessor, which leaves the
    /// interpolation between both undefined.
    DuplicateWeight { index: usize, weight: Kilograms },
    /// Breakpoint `index` has its forward limit aft of its aft limit.
    InvertedBand { index: usize },
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::Empty => write!(f, "CG envelope has no breakpoints"),
            EnvelopeError::Unsorted { index } => {
                write!(f, "CG envelope breakpoint {index} is not sorted ascending by weight")
            }
            EnvelopeError::DuplicateWeight { index, weight } => {
                write!(f, "CG envelope breakpoint {index} repeats weight {weight}")
            }
            EnvelopeError::InvertedBand { index } => {
                write!(f, "CG envelope breakpoint {index} has cgMin greater than cgMax")
            }
        }
    }
}

impl std::error::Error for EnvelopeError {}

/// A validated, weight-ascending sequence of CG breakpoints.
///
/// Construction guarantees at least one point, strictly ascending weights and
/// `cg_min <= cg_max` everywhere, so evaluation never divides by zero.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<CgEnvelopePoint>", into = "Vec<CgEnvelopePoint>")]
pub struct Envelope {
    points: Vec<CgEnvelopePoint>,
}

impl Envelope {
    /// Validates `points` into an envelope.
    ///
    /// # Errors
    /// Returns the first [`EnvelopeError`] found, scanning from the lightest point.
    pub fn new(points: Vec<CgEnvelopePoint>) -> Result<Self, EnvelopeError> {
        if points.is_empty() {
            return Err(EnvelopeError::Empty);
        }
        if let Some(index) = points.iter().position(|p| p.cg_min > p.cg_max) {
            return Err(EnvelopeError::InvertedBand { index });
        }
        for (index, (lower, upper)) in points.iter().tuple_windows().enumerate() {
            if upper.weight == lower.weight {
                return Err(EnvelopeError::DuplicateWeight { index: index + 1, weight: upper.weight });
            }
            if upper.weight < lower.weight {
                return Err(EnvelopeError::Unsorted { index: index + 1 });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[CgEnvelopePoint] { &self.points }

    /// The lightest breakpoint.
    pub fn first(&self) -> &CgEnvelopePoint { &self.points[0] }

    /// The heaviest breakpoint, which also marks the top of the table.
    pub fn last(&self) -> &CgEnvelopePoint { &self.points[self.points.len() - 1] }

    /// Computes the admissible CG band at `weight`.
    ///
    /// Below the lightest breakpoint its band applies unchanged. Above the heaviest
    /// breakpoint there is no band. In between, both limits are interpolated
    /// linearly between the enclosing breakpoints; at a breakpoint the result is
    /// that breakpoint's band exactly.
    ///
    /// # Returns
    /// - `Some(band)` if `weight` is covered by the table.
    /// - `None` if `weight` is heavier than the heaviest breakpoint.
    pub fn band_at(&self, weight: Kilograms) -> Option<CgBand> {
        let first = self.first();
        if weight <= first.weight {
            return Some(first.band());
        }
        if weight > self.last().weight {
            return None;
        }
        let (lower, upper) = self
            .points
            .iter()
            .tuple_windows()
            .find(|(lower, upper)| lower.weight <= weight && weight <= upper.weight)?;
        let ratio = normalize_fixed32(weight.fixed(), lower.weight.fixed(), upper.weight.fixed())?;
        Some(CgBand {
            min: Inches::from_fixed(lerp_fixed32(lower.cg_min.fixed(), upper.cg_min.fixed(), ratio)),
            max: Inches::from_fixed(lerp_fixed32(lower.cg_max.fixed(), upper.cg_max.fixed(), ratio)),
        })
    }

    /// Checks whether the loading point `(weight, cg)` lies inside the envelope.
    pub fn contains(&self, weight: Kilograms, cg: Inches) -> bool {
        self.band_at(weight).is_some_and(|band| band.contains(cg))
    }
}

impl TryFrom<Vec<CgEnvelopePoint>> for Envelope {
    type Error = EnvelopeError;

    fn try_from(points: Vec<CgEnvelopePoint>) -> Result<Self, Self::Error> { Self::new(points) }
}

impl From<Envelope> for Vec<CgEnvelopePoint> {
    fn from(envelope: Envelope) -> Self { envelope.points }
}

/// Decides whether a gross weight and CG position lie inside `envelope`.
///
/// Weights below the table use the lightest breakpoint's band, weights above the
/// table are always outside, and bounds are inclusive at both ends.
pub fn is_within_envelope(weight: Kilograms, cg: Inches, envelope: &Envelope) -> bool {
    envelope.contains(weight, cg)
}
