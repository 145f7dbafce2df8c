//! Unit-tagged fixed-point quantities.
//!
//! Every physical value handled by the engine carries its unit in the type, so a
//! mass can never be added to an arm or a volume used where a mass is expected.
//! Mixing units only happens through the explicit operators below
//! (`Kilograms * Inches = KilogramInches`, `Liters * KilogramsPerLiter = Kilograms`)
//! and the conversion methods for imperial display units.
//!
//! Masses, arms and volumes are `I32F32`. Moments are kept in `I64F64`, which holds
//! the product of any two `I32F32` values without rounding, so a CG obtained by
//! dividing a sum of moments by its weight is exact whenever the quotient is
//! representable. Arithmetic saturates instead of panicking; aircraft whose moments
//! could reach the saturation bound are rejected by `AircraftConfig::validate`.

use fixed::types::{I32F32, I64F64};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use strum_macros::{Display, EnumString};

/// Pounds per kilogram.
const LBS_PER_KG: I32F32 = I32F32::lit("2.20462");
/// US gallons per liter.
const GALLONS_PER_LITER: I32F32 = I32F32::lit("0.264172");

/// Error produced when a floating-point number cannot be represented as a quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityError {
    value: f64,
}

impl QuantityError {
    /// The rejected input.
    pub fn value(&self) -> f64 { self.value }
}

impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a finite quantity within the supported range", self.value)
    }
}

impl std::error::Error for QuantityError {}

macro_rules! quantity {
    ($(#[$meta:meta])* $name:ident($repr:ty), $display:literal) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default, Serialize, Deserialize)]
        #[serde(try_from = "f64", into = "f64")]
        pub struct $name($repr);

        impl $name {
            pub const ZERO: Self = Self(<$repr>::ZERO);

            /// Wraps a raw fixed-point value.
            pub const fn from_fixed(value: $repr) -> Self { Self(value) }

            /// Parses a decimal literal at compile time, e.g. for reference data tables.
            ///
            /// # Panics
            /// Panics if `src` is not a valid decimal number within range.
            pub const fn lit(src: &str) -> Self { Self(<$repr>::lit(src)) }

            /// Converts from `f64`, returning `None` for non-finite or out-of-range values.
            pub fn from_f64(value: f64) -> Option<Self> {
                <$repr>::checked_from_num(value).map(Self)
            }

            /// The underlying fixed-point value.
            pub const fn fixed(self) -> $repr { self.0 }

            pub fn to_f64(self) -> f64 { self.0.to_num::<f64>() }

            pub fn is_zero(self) -> bool { self.0 == <$repr>::ZERO }

            pub fn abs(self) -> Self { Self(self.0.saturating_abs()) }

            /// Adds without saturating, `None` on overflow.
            pub fn checked_add(self, rhs: Self) -> Option<Self> { self.0.checked_add(rhs.0).map(Self) }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self { Self(self.0.saturating_add(rhs.0)) }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self { Self(self.0.saturating_sub(rhs.0)) }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self { Self(self.0.saturating_neg()) }
        }

        impl Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self { iter.fold(Self::ZERO, Add::add) }
        }

        impl<'a> Sum<&'a $name> for $name {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.copied().fold(Self::ZERO, Add::add)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = QuantityError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::from_f64(value).ok_or(QuantityError { value })
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self { value.to_f64() }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&format!($display, self.to_f64()))
            }
        }
    };
}

quantity!(
    /// A mass in kilograms.
    Kilograms(I32F32),
    "{:.1} kg"
);
quantity!(
    /// A mass in pounds, used for display only.
    Pounds(I32F32),
    "{:.1} lbs"
);
quantity!(
    /// A signed distance from the reference datum in inches.
    Inches(I32F32),
    "{:.2} in"
);
quantity!(
    /// A moment about the reference datum (mass times arm).
    KilogramInches(I64F64),
    "{:.1} kg·in"
);
quantity!(
    /// A fuel volume in liters.
    Liters(I32F32),
    "{:.1} L"
);
quantity!(
    /// A fuel volume in US gallons, used for display only.
    UsGallons(I32F32),
    "{:.1} gal"
);
quantity!(
    /// A fuel density.
    KilogramsPerLiter(I32F32),
    "{:.2} kg/L"
);
quantity!(
    /// A fuel density in imperial handbook units.
    PoundsPerGallon(I32F32),
    "{:.1} lbs/gal"
);

impl Mul<Inches> for Kilograms {
    type Output = KilogramInches;

    fn mul(self, arm: Inches) -> KilogramInches {
        KilogramInches(self.0.to_num::<I64F64>().saturating_mul(arm.0.to_num::<I64F64>()))
    }
}

impl Mul<KilogramsPerLiter> for Liters {
    type Output = Kilograms;

    fn mul(self, density: KilogramsPerLiter) -> Kilograms {
        Kilograms(self.0.saturating_mul(density.0))
    }
}

impl Mul<PoundsPerGallon> for UsGallons {
    type Output = Pounds;

    fn mul(self, density: PoundsPerGallon) -> Pounds { Pounds(self.0.saturating_mul(density.0)) }
}

impl KilogramInches {
    /// The arm at which `weight` produces this moment, i.e. the center of gravity.
    ///
    /// Returns [`Inches::ZERO`] for a zero weight. The quotient is truncated only
    /// when it is not representable as `I32F32`.
    pub fn arm_for(self, weight: Kilograms) -> Inches {
        if weight.is_zero() {
            Inches::ZERO
        } else {
            Inches(I32F32::saturating_from_num(self.0.saturating_div(weight.0.to_num::<I64F64>())))
        }
    }

    /// Converts into the given display unit, i.e. kg·in or lb·in.
    pub fn in_unit(self, unit: MassUnit) -> f64 {
        match unit {
            MassUnit::Kg => self.to_f64(),
            MassUnit::Lbs => self.0.saturating_mul(LBS_PER_KG.to_num::<I64F64>()).to_num::<f64>(),
        }
    }
}

impl Kilograms {
    pub fn to_pounds(self) -> Pounds { Pounds(self.0.saturating_mul(LBS_PER_KG)) }

    /// Converts into the given display unit.
    pub fn in_unit(self, unit: MassUnit) -> f64 {
        match unit {
            MassUnit::Kg => self.to_f64(),
            MassUnit::Lbs => self.to_pounds().to_f64(),
        }
    }

    /// Interprets `value` as a mass in `unit`.
    pub fn from_unit(value: f64, unit: MassUnit) -> Option<Self> {
        match unit {
            MassUnit::Kg => Self::from_f64(value),
            MassUnit::Lbs => Pounds::from_f64(value).map(Pounds::to_kilograms),
        }
    }
}

impl Pounds {
    pub fn to_kilograms(self) -> Kilograms { Kilograms(self.0.saturating_div(LBS_PER_KG)) }
}

impl Liters {
    pub fn to_us_gallons(self) -> UsGallons { UsGallons(self.0.saturating_mul(GALLONS_PER_LITER)) }

    /// Converts into the given display unit.
    pub fn in_unit(self, unit: VolumeUnit) -> f64 {
        match unit {
            VolumeUnit::Liters => self.to_f64(),
            VolumeUnit::Gallons => self.to_us_gallons().to_f64(),
        }
    }

    /// Interprets `value` as a volume in `unit`.
    pub fn from_unit(value: f64, unit: VolumeUnit) -> Option<Self> {
        match unit {
            VolumeUnit::Liters => Self::from_f64(value),
            VolumeUnit::Gallons => UsGallons::from_f64(value).map(UsGallons::to_liters),
        }
    }
}

impl UsGallons {
    pub fn to_liters(self) -> Liters { Liters(self.0.saturating_div(GALLONS_PER_LITER)) }
}

/// Unit in which masses are presented to a user.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    #[default]
    #[strum(serialize = "kg")]
    Kg,
    #[strum(serialize = "lbs")]
    Lbs,
}

/// Unit in which fuel volumes are presented to a user.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    #[default]
    #[strum(serialize = "L")]
    Liters,
    #[strum(serialize = "gal")]
    Gallons,
}

/// Converts a bare mass value between display units.
pub fn convert_weight(weight: f64, from: MassUnit, to: MassUnit) -> Option<f64> {
    Kilograms::from_unit(weight, from).map(|kg| kg.in_unit(to))
}

/// Formats a mass in the requested unit with one decimal, e.g. `"75.0 kg"`.
pub fn format_weight(weight: Kilograms, unit: MassUnit) -> String {
    format!("{:.1} {unit}", weight.in_unit(unit))
}

/// Formats a moment with one decimal in kg·in or lb·in, matching `unit`.
pub fn format_moment(moment: KilogramInches, unit: MassUnit) -> String {
    format!("{:.1} {unit}·in", moment.in_unit(unit))
}

/// Formats a fuel volume in the requested unit with one decimal, e.g. `"50.0 L"`.
pub fn format_volume(volume: Liters, unit: VolumeUnit) -> String {
    format!("{:.1} {unit}", volume.in_unit(unit))
}
