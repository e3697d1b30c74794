//! Strongly typed node identifier.
//!
//! Node ids are dense and assigned in creation order starting at **1**.  The
//! inner value is a `NonZeroU32`, so id 0 can never name a real node and
//! `Option<NodeId>` costs no extra space: `None` is the "no node" /
//! "no predecessor" marker wherever one is needed.
//!
//! Storage is still a plain `Vec` indexed from 0; use [`NodeId::index`] and
//! [`NodeId::from_index`] to convert.

use std::fmt;
use std::num::NonZeroU32;

/// Identity of a graph node.  Max ~4.3 billion nodes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Wrap a raw id.  Returns `None` for the reserved value 0.
    #[inline]
    pub fn new(raw: u32) -> Option<NodeId> {
        NonZeroU32::new(raw).map(NodeId)
    }

    /// The id of the node stored at `index` (0-based), i.e. `index + 1`.
    #[inline]
    pub fn from_index(index: usize) -> NodeId {
        NodeId(NonZeroU32::MIN.saturating_add(index as u32))
    }

    /// Position of this node in 0-based storage.
    #[inline(always)]
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// The raw id (always ≥ 1).
    #[inline(always)]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<NodeId> for u32 {
    #[inline(always)]
    fn from(id: NodeId) -> u32 {
        id.0.get()
    }
}
