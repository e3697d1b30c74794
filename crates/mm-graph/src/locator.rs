//! Snapping query coordinates onto the graph.
//!
//! A query endpoint that is not exactly a graph node becomes a new node
//! joined to its nearest existing node by a Walk **connector** segment.  The
//! connector carries its geometric length like any other arc; what it costs
//! (nothing for fares, walking minutes for the fastest-arrival query,
//! kilometres for the shortest-distance query) follows from the Walk mode.
//!
//! # Pluggability
//!
//! The nearest-node search sits behind [`NodeLocator`].  [`LinearScan`] is
//! exact and O(V) per endpoint, which is fine at city scale.
//! [`RTreeLocator`] answers from an R-tree (via `rstar`) built once over the
//! dataset nodes, for graphs where the scan gets slow.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use mm_core::geo::EARTH_RADIUS_KM;
use mm_core::{distance_km, Coordinate, Mode, NodeId};

use crate::network::GraphBuilder;

// ── Locator trait ─────────────────────────────────────────────────────────────

/// Nearest-node search over a set of node positions.
pub trait NodeLocator {
    /// The node nearest to `query` by great-circle distance, skipping
    /// `exclude`, together with that distance in km.
    ///
    /// `positions` is indexed by `NodeId::index()`.  Returns `None` only if
    /// no eligible node exists.
    fn nearest(
        &self,
        positions: &[Coordinate],
        query:     Coordinate,
        exclude:   Option<NodeId>,
    ) -> Option<(NodeId, f64)>;
}

// ── LinearScan ────────────────────────────────────────────────────────────────

/// Exhaustive scan.  Ties keep the lowest id.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearScan;

impl NodeLocator for LinearScan {
    fn nearest(
        &self,
        positions: &[Coordinate],
        query:     Coordinate,
        exclude:   Option<NodeId>,
    ) -> Option<(NodeId, f64)> {
        let mut best: Option<(NodeId, f64)> = None;
        for (i, &pos) in positions.iter().enumerate() {
            let id = NodeId::from_index(i);
            if Some(id) == exclude {
                continue;
            }
            let d = distance_km(query, pos);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((id, d));
            }
        }
        best
    }
}

// ── RTreeLocator ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a node projected onto a local plane (km).
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree backed locator.
///
/// Positions are projected equirectangularly around the mean latitude of the
/// indexed nodes.  The planar nearest neighbours are re-ranked by haversine
/// distance, so the answer matches [`LinearScan`] except in pathological
/// near-ties far from the reference latitude.
///
/// The tree is a snapshot: nodes created after [`RTreeLocator::new`] (the
/// query endpoints themselves) are not indexed.
pub struct RTreeLocator {
    tree:       RTree<NodeEntry>,
    cos_ref:    f64,
    candidates: usize,
}

impl RTreeLocator {
    /// Planar candidates re-ranked by haversine distance per query.
    pub const DEFAULT_CANDIDATES: usize = 8;

    /// Bulk-load the index over `positions`.
    pub fn new(positions: &[Coordinate]) -> Self {
        let cos_ref = if positions.is_empty() {
            1.0
        } else {
            let mean_lat = positions.iter().map(|p| p.lat).sum::<f64>() / positions.len() as f64;
            mean_lat.to_radians().cos()
        };

        let entries: Vec<NodeEntry> = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: project(pos, cos_ref),
                id:    NodeId::from_index(i),
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            cos_ref,
            candidates: Self::DEFAULT_CANDIDATES,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl NodeLocator for RTreeLocator {
    fn nearest(
        &self,
        positions: &[Coordinate],
        query:     Coordinate,
        exclude:   Option<NodeId>,
    ) -> Option<(NodeId, f64)> {
        self.tree
            .nearest_neighbor_iter(&project(query, self.cos_ref))
            .filter(|e| Some(e.id) != exclude && e.id.index() < positions.len())
            .take(self.candidates)
            .map(|e| (e.id, distance_km(query, positions[e.id.index()])))
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
    }
}

fn project(pos: Coordinate, cos_ref: f64) -> [f64; 2] {
    [
        pos.lon.to_radians() * cos_ref * EARTH_RADIUS_KM,
        pos.lat.to_radians() * EARTH_RADIUS_KM,
    ]
}

// ── Endpoint attachment ───────────────────────────────────────────────────────

/// The Walk segment joining a new endpoint node to the network.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connector {
    /// Existing node the endpoint was snapped to.
    pub to:          NodeId,
    /// Straight-line length of the connector, km.
    pub distance_km: f64,
}

/// How a query coordinate was placed in the graph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attachment {
    /// Node that represents the query coordinate.
    pub node:      NodeId,
    /// `true` if the node was created for this query.
    pub created:   bool,
    /// Connector added for a created node; `None` for an exact match or when
    /// the graph had no other node to snap to.
    pub connector: Option<Connector>,
}

/// Place `coord` in the graph.
///
/// An exact coordinate match reuses the existing node and adds nothing.
/// Otherwise a node is created and, if any node other than `exclude` exists,
/// connected to the nearest one with a Walk segment.
pub fn attach_endpoint<L: NodeLocator + ?Sized>(
    builder: &mut GraphBuilder,
    locator: &L,
    coord:   Coordinate,
    exclude: Option<NodeId>,
) -> Attachment {
    if let Some(node) = builder.node_at(coord) {
        log::debug!("{coord} matches {node} exactly");
        return Attachment { node, created: false, connector: None };
    }

    let nearest = locator.nearest(builder.positions(), coord, exclude);
    let node = builder.get_or_create_node(coord);

    let connector = nearest.map(|(to, distance_km)| {
        builder.add_segment_with_length(node, to, distance_km, Mode::Walk);
        log::debug!("{coord} snapped to {to} ({distance_km:.4} km walk)");
        Connector { to, distance_km }
    });
    if connector.is_none() {
        log::warn!("{coord} has no node to snap to; it stays isolated");
    }

    Attachment { node, created: true, connector }
}

/// Attach both query endpoints.
///
/// When the source had to be created, the destination never snaps onto it.
pub fn attach_query<L: NodeLocator + ?Sized>(
    builder:     &mut GraphBuilder,
    locator:     &L,
    source:      Coordinate,
    destination: Coordinate,
) -> (Attachment, Attachment) {
    let src = attach_endpoint(builder, locator, source, None);
    let exclude = src.created.then_some(src.node);
    let dst = attach_endpoint(builder, locator, destination, exclude);
    (src, dst)
}
