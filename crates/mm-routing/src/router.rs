//! Routing trait and the schedule-aware Dijkstra engine.
//!
//! # Pluggability
//!
//! Applications call routing through the [`Router`] trait, so a different
//! search (A*, a spatially pruned variant) can be swapped in without
//! touching the callers.  [`RoutingEngine`] is the default: one Dijkstra
//! parameterised by an [`Objective`].
//!
//! # Schedule rules
//!
//! For the timed objectives each label also carries a simulated clock time.
//! Relaxing arc `v → u` of mode `m`, where `prev` is the mode `v` was
//! reached by (none at the source):
//!
//! 1. `m` is *boarded* when `m != prev`.
//! 2. Boarding a scheduled mode (metro, bus) waits for the next departure
//!    slot; continuing on the same service never waits again.
//! 3. Boarding any vehicle must happen inside the service window, else the
//!    arc is skipped for this relaxation.
//!
//! Arrival times are not wrapped at midnight, so a traveller still on the
//! road after 24:00 can no longer board anything.

use mm_core::{wait_for_departure, Mode, NodeId, RoutingConfig};
use mm_graph::{ArcRef, CoordinateGraph};

use crate::objective::Objective;
use crate::path::{reconstruct, Route};
use crate::queue::WorkingSet;
use crate::{RoutingError, RoutingResult};

// ── Labels ────────────────────────────────────────────────────────────────────

/// Per-node scratch state of one search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Label {
    /// Distance, cost, or clock arrival, depending on the objective.
    /// `+∞` while unreached.
    pub metric:      f64,
    /// Node this one was reached from; `None` at the source and while
    /// unreached.
    pub predecessor: Option<NodeId>,
    /// Mode of the arc that reached this node.
    pub via:         Option<Mode>,
    /// Simulated clock minutes on arrival (timed objectives only, else `+∞`).
    pub arrival:     f64,
    /// Minutes spent waiting for a departure before the arc into this node.
    pub waiting:     f64,
}

impl Label {
    pub const UNREACHED: Label = Label {
        metric:      f64::INFINITY,
        predecessor: None,
        via:         None,
        arrival:     f64::INFINITY,
        waiting:     0.0,
    };

    #[inline]
    pub fn is_reached(&self) -> bool {
        self.metric.is_finite()
    }
}

// ── SearchTree ────────────────────────────────────────────────────────────────

/// The finalized labels of one single-source search.
///
/// Owned by the caller; nothing is shared with later searches.
#[derive(Clone, Debug)]
pub struct SearchTree {
    pub objective: Objective,
    pub source:    NodeId,
    /// Clock minutes at the source (timed objectives).
    pub depart:    f64,
    labels:        Vec<Label>,
    settled:       Vec<NodeId>,
}

impl SearchTree {
    #[inline]
    pub fn label(&self, node: NodeId) -> &Label {
        &self.labels[node.index()]
    }

    #[inline]
    pub fn metric(&self, node: NodeId) -> f64 {
        self.labels[node.index()].metric
    }

    #[inline]
    pub fn is_reached(&self, node: NodeId) -> bool {
        self.labels.get(node.index()).is_some_and(Label::is_reached)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Every node in the order it left the working set.
    pub fn settle_order(&self) -> &[NodeId] {
        &self.settled
    }

    /// Node ids from the source to `destination`, or `None` if unreachable.
    pub fn path_to(&self, destination: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reached(destination) {
            return None;
        }
        let mut path = vec![destination];
        let mut cur = destination;
        while let Some(prev) = self.labels[cur.index()].predecessor {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        Some(path)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync`: a built graph is read-only and
/// may be searched from several threads, each search owning its labels.
pub trait Router: Send + Sync {
    /// Best route from `from` to `to`, leaving at clock minute `depart`.
    ///
    /// Returns `Ok(None)` when `to` is unreachable; `from == to` is a
    /// zero-leg route, not `None`.
    fn route(
        &self,
        graph:  &CoordinateGraph,
        from:   NodeId,
        to:     NodeId,
        depart: f64,
    ) -> RoutingResult<Option<Route>>;
}

// ── RoutingEngine ─────────────────────────────────────────────────────────────

/// Constrained Dijkstra over a [`CoordinateGraph`].
#[derive(Clone, Debug)]
pub struct RoutingEngine {
    objective: Objective,
    config:    RoutingConfig,
}

/// Result of relaxing one arc.
struct Step {
    metric:  f64,
    arrival: f64,
    waiting: f64,
}

impl RoutingEngine {
    /// # Errors
    ///
    /// [`RoutingError::Config`] if `config` fails validation.
    pub fn new(objective: Objective, config: RoutingConfig) -> RoutingResult<Self> {
        config.validate()?;
        Ok(Self { objective, config })
    }

    /// Engine with the default configuration.
    pub fn with_defaults(objective: Objective) -> Self {
        Self { objective, config: RoutingConfig::default() }
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Run a full single-source search from `source`.
    ///
    /// `depart` is the clock time at the source in minutes; the untimed
    /// objectives ignore it.  Runs in O((V + E) log V).
    pub fn search(
        &self,
        graph:  &CoordinateGraph,
        source: NodeId,
        depart: f64,
    ) -> RoutingResult<SearchTree> {
        if !graph.contains(source) {
            return Err(RoutingError::NodeNotFound(source));
        }

        let timed = self.objective.tracks_time();
        let mut labels = vec![Label::UNREACHED; graph.node_count()];
        {
            let src = &mut labels[source.index()];
            src.metric = match self.objective {
                Objective::ScheduledFastest => depart,
                _ => 0.0,
            };
            if timed {
                src.arrival = depart;
            }
        }

        let mut queue = WorkingSet::with_metrics(labels.iter().map(|l| l.metric));
        let mut settled = Vec::with_capacity(labels.len());
        let mut relaxed = 0usize;

        while let Some((metric, v)) = queue.pop_min() {
            settled.push(v);
            // Everything left is unreached; nothing can improve through it.
            if metric.is_infinite() {
                continue;
            }

            let here = labels[v.index()];
            let slot_wait = if timed {
                wait_for_departure(here.arrival, self.config.departure_interval_min)
            } else {
                0.0
            };

            for arc in graph.out_arcs(v) {
                let u = arc.to;
                if !queue.contains(u) {
                    continue;
                }
                let Some(step) = self.step(&here, arc, slot_wait) else {
                    continue;
                };
                if step.metric < labels[u.index()].metric {
                    labels[u.index()] = Label {
                        metric:      step.metric,
                        predecessor: Some(v),
                        via:         Some(arc.mode),
                        arrival:     step.arrival,
                        waiting:     step.waiting,
                    };
                    queue.reposition(u, step.metric);
                    relaxed += 1;
                }
            }
        }

        log::debug!(
            "{} search from {source}: {} nodes settled, {relaxed} improvements",
            self.objective,
            settled.len(),
        );

        Ok(SearchTree {
            objective: self.objective,
            source,
            depart,
            labels,
            settled,
        })
    }

    /// Candidate label for `u` via `arc` out of a node labelled `here`, or
    /// `None` if the arc cannot be boarded at that time.
    #[inline]
    fn step(&self, here: &Label, arc: ArcRef, slot_wait: f64) -> Option<Step> {
        let weight = self.objective.edge_weight(arc.mode, arc.distance_km, &self.config);

        if !self.objective.tracks_time() {
            return Some(Step {
                metric:  here.metric + weight,
                arrival: f64::INFINITY,
                waiting: 0.0,
            });
        }

        let boarding = here.via != Some(arc.mode);
        let waiting = if boarding && arc.mode.is_scheduled() { slot_wait } else { 0.0 };

        if self.objective.enforces_schedule()
            && boarding
            && arc.mode.is_motorized()
            && !self.config.service_window.contains(here.arrival + waiting)
        {
            return None;
        }

        let travel = self.config.travel_minutes(arc.mode, arc.distance_km);
        let arrival = here.arrival + travel + waiting;
        let metric = match self.objective {
            Objective::ScheduledFastest => arrival,
            _ => here.metric + weight,
        };
        Some(Step { metric, arrival, waiting })
    }

    /// Reconstruct the route to `destination` from a finished search.
    pub fn reconstruct(
        &self,
        tree:        &SearchTree,
        graph:       &CoordinateGraph,
        destination: NodeId,
    ) -> Option<Route> {
        reconstruct(tree, graph, &self.config, destination)
    }
}

impl Router for RoutingEngine {
    fn route(
        &self,
        graph:  &CoordinateGraph,
        from:   NodeId,
        to:     NodeId,
        depart: f64,
    ) -> RoutingResult<Option<Route>> {
        if !graph.contains(to) {
            return Err(RoutingError::NodeNotFound(to));
        }
        let tree = self.search(graph, from, depart)?;
        Ok(self.reconstruct(&tree, graph, to))
    }
}
