//! Travel-time models shared by workers and drones.
//!
//! Every travel leg in the model is a straight line.  A leg's duration is
//! either a fixed constant (the no-geometry variant: the layout only affects
//! rendered positions) or the leg's Euclidean length divided by a speed.

use crate::Location;

/// How long a straight-line leg takes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TravelTime {
    /// Every leg takes this many time units regardless of distance.
    Fixed(f64),
    /// Leg duration = distance / speed (distance units per time unit).
    Speed(f64),
}

impl TravelTime {
    /// Duration of the leg `from → to`.
    #[inline]
    pub fn duration(self, from: Location, to: Location) -> f64 {
        match self {
            TravelTime::Fixed(t) => t,
            TravelTime::Speed(v) => from.distance_to(to) / v,
        }
    }

    /// `Some(reason)` if the parameter is out of range.
    pub(crate) fn problem(self) -> Option<&'static str> {
        match self {
            TravelTime::Fixed(t) if !t.is_finite() || t < 0.0 => {
                Some("fixed travel time must be finite and >= 0")
            }
            TravelTime::Speed(v) if !v.is_finite() || v <= 0.0 => {
                Some("travel speed must be finite and > 0")
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for TravelTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelTime::Fixed(t) => write!(f, "fixed {t}"),
            TravelTime::Speed(v) => write!(f, "speed {v}"),
        }
    }
}
