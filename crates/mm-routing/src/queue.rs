//! Indexed min-priority working set.
//!
//! Holds `(metric, NodeId)` pairs ordered by metric then id.  Node ids are
//! unique, so no two entries compare equal and extraction order is fully
//! deterministic.  A node's key can be changed in place (remove, then
//! reinsert), which a plain `BinaryHeap` cannot do.

use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use mm_core::NodeId;

pub struct WorkingSet {
    entries: BTreeSet<(OrderedFloat<f64>, NodeId)>,
    /// Current key of each member; `None` once the node has left the set.
    keys:    Vec<Option<OrderedFloat<f64>>>,
}

impl WorkingSet {
    /// A set containing every node, keyed by `metrics[node.index()]`.
    pub fn with_metrics(metrics: impl ExactSizeIterator<Item = f64>) -> Self {
        let mut entries = BTreeSet::new();
        let mut keys = Vec::with_capacity(metrics.len());
        for (i, m) in metrics.enumerate() {
            let key = OrderedFloat(m);
            entries.insert((key, NodeId::from_index(i)));
            keys.push(Some(key));
        }
        Self { entries, keys }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` while `node` has not been extracted.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.keys.get(node.index()).is_some_and(Option::is_some)
    }

    /// Remove and return the entry with the smallest `(metric, id)`.
    pub fn pop_min(&mut self) -> Option<(f64, NodeId)> {
        let (key, node) = self.entries.pop_first()?;
        self.keys[node.index()] = None;
        Some((key.0, node))
    }

    /// Move `node` to `metric`.  No-op if `node` already left the set.
    pub fn reposition(&mut self, node: NodeId, metric: f64) {
        let Some(Some(old)) = self.keys.get(node.index()).copied() else { return };
        let key = OrderedFloat(metric);
        self.entries.remove(&(old, node));
        self.entries.insert((key, node));
        self.keys[node.index()] = Some(key);
    }
}
