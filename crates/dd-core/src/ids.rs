//! Strongly typed order identifier.
//!
//! `OrderId` is `Copy + Ord + Hash` so it can key the identity map and take
//! part in index tie-breaks without ceremony.  Ids come straight from the
//! command stream, so negative values are legal.

use std::fmt;

/// Identifier of a delivery order, unique among *active* orders only.
///
/// Ids of cancelled or delivered orders may be reused by later commands.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    #[inline(always)]
    fn from(raw: i64) -> Self {
        OrderId(raw)
    }
}
