//! Path lengths with an explicit "unreachable" value.
//!
//! [`Distance`] replaces the "large integer stands for infinity" convention.
//! Adding anything to [`Distance::Unreachable`] stays unreachable, and finite
//! sums use checked arithmetic, so two "infinities" can never wrap into a
//! small number.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::queue::Priority;

/// Integer stand-in for "no path" in the legacy integer views
/// ([`Distance::as_legacy`] and
/// [`DistanceMatrix::to_legacy_matrix`](crate::paths::DistanceMatrix::to_legacy_matrix)).
pub const INFINITY_SENTINEL: u32 = 19_999_999;

/// Queue priority of an unreachable vertex: one above the largest finite
/// distance.
const UNREACHABLE_PRIORITY: Priority = 1 << 32;

/// Length of a shortest directed path in hops.
///
/// Every finite distance orders before [`Distance::Unreachable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distance {
    Finite(u32),
    Unreachable,
}

impl Distance {
    pub const ZERO: Self = Self::Finite(0);
    pub const ONE: Self = Self::Finite(1);

    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// The hop count, or `None` when unreachable.
    #[must_use]
    pub const fn finite(self) -> Option<u32> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Unreachable => None,
        }
    }

    /// One more hop than `self`.
    #[must_use]
    pub fn successor(self) -> Self {
        self + Self::ONE
    }

    /// Integer view with [`INFINITY_SENTINEL`] for unreachable.
    #[must_use]
    pub const fn as_legacy(self) -> u32 {
        match self {
            Self::Finite(d) => d,
            Self::Unreachable => INFINITY_SENTINEL,
        }
    }

    /// Queue priority for this distance. Unreachable vertices queue behind
    /// every finite one.
    #[must_use]
    pub fn as_priority(self) -> Priority {
        match self {
            Self::Finite(d) => Priority::from(d),
            Self::Unreachable => UNREACHABLE_PRIORITY,
        }
    }
}

impl Add for Distance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => {
                a.checked_add(b).map_or(Self::Unreachable, Self::Finite)
            }
            _ => Self::Unreachable,
        }
    }
}

impl PartialEq<u32> for Distance {
    fn eq(&self, other: &u32) -> bool {
        self.finite() == Some(*other)
    }
}

impl PartialOrd<u32> for Distance {
    fn partial_cmp(&self, other: &u32) -> Option<Ordering> {
        Some(self.cmp(&Self::Finite(*other)))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{d}"),
            Self::Unreachable => write!(f, "∞"),
        }
    }
}

/// Serialized as the hop count, or `null` when unreachable.
impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.finite().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<u32>::deserialize(deserializer)?.map_or(Self::Unreachable, Self::Finite))
    }
}
