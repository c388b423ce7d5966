//! Node identifiers for mesh topologies.

use std::fmt;

/// Opaque identifier for a mesh node.
///
/// Mesh radios address each other by a 32-bit node number, conventionally
/// rendered as `!` followed by eight lowercase hex digits.
///
/// # Examples
/// ```
/// use meshcut_core::NodeId;
///
/// let id = NodeId::new(0x0a1b_2c3d);
/// assert_eq!(id.get(), 0x0a1b_2c3d);
/// assert_eq!(id.to_string(), "!0a1b2c3d");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u32);

impl NodeId {
    /// Wraps a raw node number.
    #[must_use]
    #[rustfmt::skip]
    pub const fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw node number.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> u32 { self.0 }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{:08x}", self.0)
    }
}
