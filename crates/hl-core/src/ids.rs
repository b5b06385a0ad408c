//! Strongly typed identifier wrappers.
//!
//! Worker and drone IDs double as indices into the actor `Vec`s owned by the
//! simulation, so they are dense and start at zero.  The inner integer is
//! `pub`; prefer `.index()` when indexing.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$tag` is the short prefix used by `Display` (`W3`, `D0`, `B17`).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a field worker.
    pub struct WorkerId(u32) => "W";
}

typed_id! {
    /// Index of a drone.
    pub struct DroneId(u32) => "D";
}

typed_id! {
    /// Sequence number of a harvested box, unique within one run and
    /// allocated in creation order.
    pub struct BoxId(u64) => "B";
}
