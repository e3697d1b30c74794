//! Coordinate graph and its deduplicating builder.
//!
//! # Data layout
//!
//! The finished graph uses **Compressed Sparse Row (CSR)** format for
//! outgoing arcs.  Given a `NodeId n`, its arcs occupy
//!
//! ```text
//! arc_to[ node_out_start[n.index()] .. node_out_start[n.index() + 1] ]
//! ```
//!
//! Arc arrays (`arc_to`, `arc_km`, `arc_mode`) are sorted by
//! source node with a stable sort, so each node's arcs keep the order in
//! which they were ingested and every search over the graph is
//! deterministic.
//!
//! # Weights
//!
//! An arc stores its geometric length and its [`Mode`].  Objective-specific
//! weights (fare, travel minutes) are derived from those two values by the
//! router, so one graph answers every kind of query.

use std::collections::HashMap;

use mm_core::{CoordKey, Coordinate, Mode, NodeId};

// ── ArcRef ────────────────────────────────────────────────────────────────────

/// One outgoing arc as seen by a search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcRef {
    pub to:          NodeId,
    pub distance_km: f64,
    pub mode:        Mode,
}

// ── CoordinateGraph ───────────────────────────────────────────────────────────

/// Read-only multimodal graph in CSR format plus the coordinate index.
///
/// Do not construct directly; use [`GraphBuilder`].
pub struct CoordinateGraph {
    /// Position of each node.  Indexed by `NodeId::index()`.
    pub node_pos: Vec<Coordinate>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Destination node of each arc.
    pub arc_to: Vec<NodeId>,

    /// Great-circle length of each arc, km.
    pub arc_km: Vec<f64>,

    /// Travel mode of each arc.
    pub arc_mode: Vec<Mode>,

    coord_index: HashMap<CoordKey, NodeId>,
}

impl CoordinateGraph {
    /// A graph with no nodes.  Every query against it has no path.
    pub fn empty() -> Self {
        GraphBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arc_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `true` if `node` names a node of this graph.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    #[inline]
    pub fn node_pos(&self, node: NodeId) -> Coordinate {
        self.node_pos[node.index()]
    }

    /// All node positions, indexed by `NodeId::index()`.
    pub fn positions(&self) -> &[Coordinate] {
        &self.node_pos
    }

    /// Node whose coordinate is exactly `coord`, if any.
    pub fn node_at(&self, coord: Coordinate) -> Option<NodeId> {
        self.coord_index.get(&coord.key()).copied()
    }

    /// Outgoing arcs of `node`, in ingestion order.
    #[inline]
    pub fn out_arcs(&self, node: NodeId) -> impl Iterator<Item = ArcRef> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(move |i| ArcRef {
            to:          self.arc_to[i],
            distance_km: self.arc_km[i],
            mode:        self.arc_mode[i],
        })
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Mode of the directed arc `from → to`.
    ///
    /// When several datasets contributed an arc between the same pair, the
    /// one ingested last wins.
    pub fn mode_between(&self, from: NodeId, to: NodeId) -> Option<Mode> {
        if !self.contains(from) {
            return None;
        }
        self.out_arcs(from)
            .filter(|a| a.to == to)
            .last()
            .map(|a| a.mode)
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`CoordinateGraph`] incrementally, then call [`build`](Self::build).
///
/// The builder owns the node list, the coordinate → id index and the arcs.
/// It is passed by `&mut` into every dataset ingestion and endpoint
/// attachment, so several datasets can share nodes wherever their
/// coordinates coincide exactly.
///
/// # Example
///
/// ```
/// use mm_core::{Coordinate, Mode};
/// use mm_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let a = b.get_or_create_node(Coordinate::new(90.40, 23.80));
/// let c = b.get_or_create_node(Coordinate::new(90.41, 23.80));
/// b.add_segment(a, c, Mode::Car);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.arc_count(), 2); // both directions
/// ```
pub struct GraphBuilder {
    nodes:       Vec<Coordinate>,
    coord_index: HashMap<CoordKey, NodeId>,
    raw_arcs:    Vec<RawArc>,
}

struct RawArc {
    from:        NodeId,
    to:          NodeId,
    distance_km: f64,
    mode:        Mode,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes:       Vec::new(),
            coord_index: HashMap::new(),
            raw_arcs:    Vec::new(),
        }
    }

    /// Node whose coordinate is exactly `coord`, if any.
    #[inline]
    pub fn node_at(&self, coord: Coordinate) -> Option<NodeId> {
        self.coord_index.get(&coord.key()).copied()
    }

    /// Return the node at `coord`, creating it (next sequential id) if absent.
    pub fn get_or_create_node(&mut self, coord: Coordinate) -> NodeId {
        if let Some(id) = self.node_at(coord) {
            return id;
        }
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(coord);
        self.coord_index.insert(coord.key(), id);
        id
    }

    /// Add one **directed** arc.
    pub fn add_directed_arc(&mut self, from: NodeId, to: NodeId, distance_km: f64, mode: Mode) {
        self.raw_arcs.push(RawArc { from, to, distance_km, mode });
    }

    /// Add both directions of an undirected segment, weighted by the
    /// great-circle distance between its endpoints.  Returns that distance.
    pub fn add_segment(&mut self, a: NodeId, b: NodeId, mode: Mode) -> f64 {
        let km = self.node_pos(a).distance_km(self.node_pos(b));
        self.add_segment_with_length(a, b, km, mode);
        km
    }

    /// Like [`add_segment`](Self::add_segment) with an explicit length.
    pub fn add_segment_with_length(&mut self, a: NodeId, b: NodeId, distance_km: f64, mode: Mode) {
        self.add_directed_arc(a, b, distance_km, mode);
        self.add_directed_arc(b, a, distance_km, mode);
    }

    #[inline]
    pub fn node_pos(&self, id: NodeId) -> Coordinate {
        self.nodes[id.index()]
    }

    /// All node positions created so far, indexed by `NodeId::index()`.
    pub fn positions(&self) -> &[Coordinate] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn arc_count(&self) -> usize { self.raw_arcs.len() }

    /// Consume the builder and produce a [`CoordinateGraph`].
    ///
    /// Time complexity: O(A log A) for the arc sort, A = arcs.
    pub fn build(self) -> CoordinateGraph {
        let node_count = self.nodes.len();
        let arc_count  = self.raw_arcs.len();

        let mut raw = self.raw_arcs;
        raw.sort_by_key(|a| a.from);

        let arc_to:   Vec<NodeId> = raw.iter().map(|a| a.to).collect();
        let arc_km:   Vec<f64>    = raw.iter().map(|a| a.distance_km).collect();
        let arc_mode: Vec<Mode>   = raw.iter().map(|a| a.mode).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for a in &raw {
            node_out_start[a.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, arc_count);

        log::debug!("graph built: {node_count} nodes, {arc_count} arcs");

        CoordinateGraph {
            node_pos: self.nodes,
            node_out_start,
            arc_to,
            arc_km,
            arc_mode,
            coord_index: self.coord_index,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
