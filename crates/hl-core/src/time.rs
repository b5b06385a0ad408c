//! Virtual time model.
//!
//! # Design
//!
//! Virtual time is a real number, independent of wall-clock time.  Service
//! times in the model are fractional (a fatigue point adds half a unit to
//! the harvest time), so an integer tick would force rounding into every
//! formula.  `SimTime` instead wraps an `f64` and restores the properties an
//! event queue needs:
//!
//! - it is always finite and non-negative (NaN cannot enter),
//! - `-0.0` is normalised to `0.0`,
//! - it is `Ord`, via `f64::total_cmp`, so it can key a `BTreeMap`.
//!
//! Sums of the model's default constants (multiples of 0.5) are exact in
//! binary floating point, so equal-time ties in tests are genuine ties.

use std::cmp::Ordering;
use std::fmt;

use crate::{HlError, HlResult};

/// A point in virtual time.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Validate and wrap `t`.
    ///
    /// Fails with [`HlError::InvalidTime`] for NaN, infinite, or negative
    /// values.
    pub fn new(t: f64) -> HlResult<SimTime> {
        if t.is_finite() && t >= 0.0 {
            // `+ 0.0` turns -0.0 into 0.0 so total_cmp sees one zero.
            Ok(SimTime(t + 0.0))
        } else {
            Err(HlError::InvalidTime(t))
        }
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// `self + delay`, or `None` if `delay` is negative, NaN, or the sum
    /// overflows to infinity.
    pub fn checked_add(self, delay: f64) -> Option<SimTime> {
        if !(delay >= 0.0) {
            return None;
        }
        SimTime::new(self.0 + delay).ok()
    }

    /// Virtual time elapsed from `earlier` to `self` (negative if `earlier`
    /// is actually later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl TryFrom<f64> for SimTime {
    type Error = HlError;
    fn try_from(t: f64) -> HlResult<SimTime> {
        SimTime::new(t)
    }
}

impl From<SimTime> for f64 {
    #[inline]
    fn from(t: SimTime) -> f64 {
        t.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2}", self.0)
    }
}
