//! Route reconstruction from a finished search.

use mm_core::{distance_km, Coordinate, Mode, NodeId, RoutingConfig};
use mm_graph::CoordinateGraph;

use crate::objective::Objective;
use crate::router::SearchTree;

/// One hop of a route.
#[derive(Clone, Debug, PartialEq)]
pub struct Leg {
    pub from:         NodeId,
    pub to:           NodeId,
    pub mode:         Mode,
    pub distance_km:  f64,
    /// Increase of the search metric across this leg (km, Tk, or minutes
    /// including waiting).
    pub contribution: f64,
    /// Fare for this leg at the configured per-km rate.
    pub fare:         f64,
    /// Clock minutes when the leg starts moving (after any wait).
    pub board_at:     Option<f64>,
    /// Clock minutes at `to`.
    pub arrive_at:    Option<f64>,
    /// Minutes waited at `from` for a departure.
    pub waiting:      f64,
}

/// An ordered source → destination route.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub objective: Objective,
    /// Node ids in travel order, source first.
    pub nodes:     Vec<NodeId>,
    pub legs:      Vec<Leg>,
    /// Total metric from source to destination (km, Tk, or minutes).
    pub total:     f64,
    /// Clock minutes at the source (timed objectives).
    pub depart:    Option<f64>,
    /// Clock minutes at the destination (timed objectives).
    pub arrival:   Option<f64>,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.legs.is_empty()
    }

    /// Door-to-door minutes for the timed objectives.
    pub fn duration_minutes(&self) -> Option<f64> {
        Some(self.arrival? - self.depart?)
    }

    pub fn distance_km(&self) -> f64 {
        self.legs.iter().map(|l| l.distance_km).sum()
    }

    pub fn fare(&self) -> f64 {
        self.legs.iter().map(|l| l.fare).sum()
    }

    /// Node positions in travel order, for overlays.
    pub fn coordinates(&self, graph: &CoordinateGraph) -> Vec<Coordinate> {
        self.nodes.iter().map(|&n| graph.node_pos(n)).collect()
    }
}

/// Package the route to `destination` from a finished search.
///
/// Returns `None` when the destination was never reached, which is distinct
/// from a zero-leg route to the source itself.
pub fn reconstruct(
    tree:        &SearchTree,
    graph:       &CoordinateGraph,
    config:      &RoutingConfig,
    destination: NodeId,
) -> Option<Route> {
    let nodes = tree.path_to(destination)?;
    let timed = tree.objective.tracks_time();

    let legs = nodes
        .windows(2)
        .map(|hop| {
            let (from, to) = (hop[0], hop[1]);
            let start = tree.label(from);
            let end = tree.label(to);
            // Every reached node but the source records its arc mode.
            let mode = end.via.unwrap_or(Mode::Walk);
            let km = graph
                .out_arcs(from)
                .find(|a| a.to == to && a.mode == mode)
                .map_or_else(|| distance_km(graph.node_pos(from), graph.node_pos(to)), |a| a.distance_km);

            Leg {
                from,
                to,
                mode,
                distance_km:  km,
                contribution: end.metric - start.metric,
                fare:         km * config.fares.per_km(mode),
                board_at:     timed.then(|| start.arrival + end.waiting),
                arrive_at:    timed.then_some(end.arrival),
                waiting:      end.waiting,
            }
        })
        .collect();

    let source = tree.label(tree.source);
    let dest = tree.label(destination);
    Some(Route {
        objective: tree.objective,
        nodes,
        legs,
        total:     dest.metric - source.metric,
        depart:    timed.then_some(source.arrival),
        arrival:   timed.then_some(dest.arrival),
    })
}
