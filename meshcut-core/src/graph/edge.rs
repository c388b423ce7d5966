//! Canonical undirected edge keys.

use std::fmt;

use crate::node::NodeId;

/// An undirected edge in canonical form (`low < high`).
///
/// # Examples
/// ```
/// use meshcut_core::{EdgeKey, NodeId};
///
/// let a = NodeId::new(7);
/// let b = NodeId::new(3);
/// let key = EdgeKey::new(a, b).expect("distinct endpoints");
/// assert_eq!(key.low(), b);
/// assert_eq!(key.high(), a);
/// assert_eq!(key, EdgeKey::new(b, a).expect("distinct endpoints"));
/// assert!(EdgeKey::new(a, a).is_none());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    /// Builds the canonical key for `a`–`b`, or `None` for a self-pair.
    #[must_use]
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        (a != b).then(|| Self::canonical(a, b))
    }

    /// Canonicalises without the self-pair check. Callers guarantee `a != b`.
    pub(crate) fn canonical(a: NodeId, b: NodeId) -> Self {
        if a < b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Returns the smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn low(&self) -> NodeId { self.low }

    /// Returns the larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn high(&self) -> NodeId { self.high }

    /// Returns both endpoints as `(low, high)`.
    #[must_use]
    #[rustfmt::skip]
    pub fn endpoints(&self) -> (NodeId, NodeId) { (self.low, self.high) }

    /// Returns `true` when `node` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, node: NodeId) -> bool {
        self.low == node || self.high == node
    }

    /// Returns the endpoint opposite `node`, if `node` is an endpoint.
    #[must_use]
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if node == self.low {
            Some(self.high)
        } else if node == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.low, self.high)
    }
}
