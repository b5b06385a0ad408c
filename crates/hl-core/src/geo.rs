//! Planar coordinate type.
//!
//! The field is modelled as a flat Cartesian plane in arbitrary distance
//! units; travel models convert distances into virtual time.

/// An immutable point in the field.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(self, other: Location) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point `frac` of the way from `self` to `other`.  `frac` is clamped to
    /// `[0, 1]` so callers sampling slightly outside a travel window never
    /// overshoot the endpoint.
    #[inline]
    pub fn lerp(self, other: Location, frac: f64) -> Location {
        let t = frac.clamp(0.0, 1.0);
        Location {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Location {
        Location { x: self.x + dx, y: self.y + dy }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
