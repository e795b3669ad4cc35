//! pf_core: core types, package-mass parsing and rounding helpers.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! workspace (`pf_algo`, `pf_io`, `pf_report`, `pf_cli`).
//!
//! - Identifier tokens: `PetId`, `ProductId`
//! - Inputs: `Pet` (with `Species`), `Product` (with `Category`), `Purchase`
//! - Policy domain: `AllocationPolicy`
//! - Outputs: `PetAllocation`, `MultiPetCalculation`
//! - Numeric helpers: half-up rounding, whole grams, leading-decimal parsing
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for boundary parsing of core tokens.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidToken,
        UnknownPolicy,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::UnknownPolicy => {
                    write!(f, "unknown allocation policy (expected split-by-need | equal | manual)")
                }
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod rounding {
    //! Half-up rounding helpers.
    //!
    //! Every helper maps non-finite input to `0.0` so callers never observe
    //! NaN or infinity in engine outputs.

    /// Round to the nearest integer, halves towards +∞ (`floor(x + 0.5)`).
    #[inline]
    pub fn round_half_up(x: f64) -> f64 {
        if !x.is_finite() {
            return 0.0;
        }
        (x + 0.5).floor()
    }

    /// Round to one decimal place, halves towards +∞.
    #[inline]
    pub fn round_1dp(x: f64) -> f64 {
        round_half_up(x * 10.0) / 10.0
    }

    /// Nearest whole gram, clamped at zero.
    #[inline]
    pub fn whole_grams(x: f64) -> u64 {
        let r = round_half_up(x);
        if r <= 0.0 {
            0
        } else {
            r as u64
        }
    }

    /// Whole days elapsed for a (non-negative) day estimate.
    #[inline]
    pub fn floor_days(days: f64) -> i64 {
        if !days.is_finite() || days <= 0.0 {
            0
        } else {
            days.floor() as i64
        }
    }

    /// `num / den` with a zero (or non-finite) denominator mapped to `0.0`.
    #[inline]
    pub fn ratio_or_zero(num: f64, den: f64) -> f64 {
        if !den.is_finite() || den <= 0.0 || !num.is_finite() {
            return 0.0;
        }
        num / den
    }
}

pub mod entities;
pub mod ids;
pub mod mass;
pub mod outcome;
pub mod variables;

pub use entities::{Category, Pet, Product, Purchase, Species};
pub use ids::{PetId, ProductId};
pub use outcome::{MultiPetCalculation, PetAllocation};
pub use variables::{AllocationPolicy, ManualAllocations};
