//! Unit tests for mm-routing.
//!
//! Graphs are hand-built with explicit segment lengths so every expected
//! metric can be worked out by hand: at the default 30 km/h a vehicle
//! covers 1 km in 2 min, a walker at 2 km/h needs 30 min.

#[cfg(test)]
mod helpers {
    use mm_core::{Coordinate, Mode, NodeId};
    use mm_graph::{CoordinateGraph, GraphBuilder};

    /// `n` nodes laid out along a parallel, joined by `segments`
    /// `(a, b, km, mode)` given as 0-based node positions.
    pub fn graph(n: usize, segments: &[(usize, usize, f64, Mode)]) -> (CoordinateGraph, Vec<NodeId>) {
        let mut b = GraphBuilder::new();
        let ids: Vec<NodeId> = (0..n)
            .map(|i| b.get_or_create_node(Coordinate::new(90.0 + i as f64 * 0.01, 23.8)))
            .collect();
        for &(x, y, km, mode) in segments {
            b.add_segment_with_length(ids[x], ids[y], km, mode);
        }
        (b.build(), ids)
    }

    /// Five car junctions:
    ///
    /// ```text
    ///   0 ── 1 ── 2
    ///   │         │
    ///   3 ─────── 4
    /// ```
    ///
    /// 0→1→2→4 is 3 km by car; 0→3→4 is 6 km.
    pub fn grid() -> (CoordinateGraph, Vec<NodeId>) {
        graph(
            5,
            &[
                (0, 1, 1.0, Mode::Car),
                (1, 2, 1.0, Mode::Car),
                (2, 4, 1.0, Mode::Car),
                (0, 3, 5.0, Mode::Car),
                (3, 4, 1.0, Mode::Car),
            ],
        )
    }

    pub fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }
}

// ── Working set ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use mm_core::NodeId;

    use crate::WorkingSet;

    #[test]
    fn pops_by_metric_then_id() {
        let mut q = WorkingSet::with_metrics([3.0, 1.0, f64::INFINITY, 1.0].into_iter());
        assert_eq!(q.len(), 4);
        assert_eq!(q.pop_min(), Some((1.0, NodeId::from_index(1))));
        assert_eq!(q.pop_min(), Some((1.0, NodeId::from_index(3))));
        assert_eq!(q.pop_min(), Some((3.0, NodeId::from_index(0))));
        assert_eq!(q.pop_min().map(|(_, n)| n), Some(NodeId::from_index(2)));
        assert!(q.pop_min().is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn reposition_moves_entry() {
        let mut q = WorkingSet::with_metrics([0.0, f64::INFINITY, f64::INFINITY].into_iter());
        let n2 = NodeId::from_index(2);
        q.reposition(n2, 5.0);
        q.reposition(n2, 2.0);
        assert_eq!(q.len(), 3);
        q.pop_min();
        assert_eq!(q.pop_min(), Some((2.0, n2)));
    }

    #[test]
    fn extracted_nodes_leave_the_set() {
        let mut q = WorkingSet::with_metrics([0.0, 1.0].into_iter());
        let n0 = NodeId::from_index(0);
        assert!(q.contains(n0));
        q.pop_min();
        assert!(!q.contains(n0));
        // Repositioning a finalized node is ignored.
        q.reposition(n0, -1.0);
        assert_eq!(q.len(), 1);
        assert!(!q.contains(NodeId::from_index(7)));
    }
}

// ── Distance & cost ───────────────────────────────────────────────────────────

#[cfg(test)]
mod untimed {
    use mm_core::{distance_km, Coordinate, Mode, NodeId};
    use mm_graph::GraphBuilder;

    use super::helpers::{close, graph, grid};
    use crate::{Objective, Router, RoutingEngine, RoutingError};

    #[test]
    fn single_segment_distance() {
        let a = Coordinate::new(90.3950, 23.8759);
        let z = Coordinate::new(90.4012, 23.8701);
        let mut b = GraphBuilder::new();
        let na = b.get_or_create_node(a);
        let nz = b.get_or_create_node(z);
        b.add_segment(na, nz, Mode::Car);
        let net = b.build();

        let route = RoutingEngine::with_defaults(Objective::Distance)
            .route(&net, na, nz, 0.0)
            .unwrap()
            .unwrap();
        assert_eq!(route.nodes, vec![na, nz]);
        assert_eq!(route.legs.len(), 1);
        assert!(close(route.total, distance_km(a, z)));
        assert_eq!(route.legs[0].mode, Mode::Car);
        assert!(route.legs[0].board_at.is_none());
    }

    #[test]
    fn grid_shortest_path() {
        let (net, n) = grid();
        let route = RoutingEngine::with_defaults(Objective::Distance)
            .route(&net, n[0], n[4], 0.0)
            .unwrap()
            .unwrap();
        assert_eq!(route.nodes, vec![n[0], n[1], n[2], n[4]]);
        assert!(close(route.total, 3.0));
    }

    #[test]
    fn unreachable_is_none_not_error() {
        // Two islands: 0–1 and 2–3.
        let (net, n) = graph(4, &[(0, 1, 1.0, Mode::Car), (2, 3, 1.0, Mode::Metro)]);
        for objective in Objective::ALL {
            let engine = RoutingEngine::with_defaults(objective);
            let route = engine.route(&net, n[0], n[3], 480.0).unwrap();
            assert!(route.is_none(), "{objective}");
            let tree = engine.search(&net, n[0], 480.0).unwrap();
            assert!(!tree.is_reached(n[2]));
            assert!(tree.metric(n[3]).is_infinite());
            assert!(tree.path_to(n[3]).is_none());
        }
    }

    #[test]
    fn same_node_is_zero_leg_route() {
        let (net, n) = grid();
        let route = RoutingEngine::with_defaults(Objective::Cost)
            .route(&net, n[2], n[2], 0.0)
            .unwrap()
            .unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.total, 0.0);
        assert_eq!(route.nodes, vec![n[2]]);
    }

    #[test]
    fn cost_prefers_cheap_modes() {
        // 0→1 by car: 2 km × 20 = 40 Tk.  0→2→1 by metro: 6 km × 5 = 30 Tk.
        let (net, n) = graph(
            3,
            &[(0, 1, 2.0, Mode::Car), (0, 2, 3.0, Mode::Metro), (2, 1, 3.0, Mode::Metro)],
        );
        let cost = RoutingEngine::with_defaults(Objective::Cost)
            .route(&net, n[0], n[1], 0.0)
            .unwrap()
            .unwrap();
        assert_eq!(cost.nodes, vec![n[0], n[2], n[1]]);
        assert!(close(cost.total, 30.0));
        assert!(close(cost.fare(), 30.0));

        let dist = RoutingEngine::with_defaults(Objective::Distance)
            .route(&net, n[0], n[1], 0.0)
            .unwrap()
            .unwrap();
        assert_eq!(dist.nodes, vec![n[0], n[1]]);
        assert!(close(dist.fare(), 40.0));
    }

    #[test]
    fn walking_is_free() {
        let (net, n) = graph(3, &[(0, 1, 0.7, Mode::Walk), (1, 2, 2.0, Mode::BikolpoBus)]);
        let route = RoutingEngine::with_defaults(Objective::Cost)
            .route(&net, n[0], n[2], 0.0)
            .unwrap()
            .unwrap();
        assert!(close(route.legs[0].contribution, 0.0));
        assert!(close(route.total, 14.0));
    }

    #[test]
    fn settle_order_is_monotone() {
        let (net, n) = graph(
            7,
            &[
                (0, 1, 4.0, Mode::Car),
                (0, 2, 1.0, Mode::Metro),
                (2, 1, 1.5, Mode::UttaraBus),
                (1, 3, 0.5, Mode::Walk),
                (2, 4, 7.0, Mode::Car),
                (3, 4, 0.2, Mode::Metro),
                (5, 6, 1.0, Mode::Car),
            ],
        );
        for objective in [Objective::Distance, Objective::Cost] {
            let tree = RoutingEngine::with_defaults(objective).search(&net, n[0], 0.0).unwrap();
            let metrics: Vec<f64> = tree
                .settle_order()
                .iter()
                .map(|&v| tree.metric(v))
                .collect();
            assert_eq!(metrics.len(), 7);
            assert!(metrics.windows(2).all(|w| w[0] <= w[1]), "{objective}: {metrics:?}");
        }
    }

    #[test]
    fn total_is_sum_of_contributions() {
        let (net, n) = grid();
        for objective in [Objective::Distance, Objective::Cost] {
            let route = RoutingEngine::with_defaults(objective)
                .route(&net, n[3], n[1], 0.0)
                .unwrap()
                .unwrap();
            let sum: f64 = route.legs.iter().map(|l| l.contribution).sum();
            assert!(close(route.total, sum), "{objective}");
        }
    }

    #[test]
    fn repeated_search_is_identical() {
        let (net, n) = grid();
        let engine = RoutingEngine::with_defaults(Objective::Cost);
        let first = engine.search(&net, n[0], 0.0).unwrap();
        let second = engine.search(&net, n[0], 0.0).unwrap();
        assert_eq!(first.labels(), second.labels());
        assert_eq!(first.settle_order(), second.settle_order());
        assert_eq!(
            engine.reconstruct(&first, &net, n[4]),
            engine.reconstruct(&second, &net, n[4])
        );
    }

    #[test]
    fn unknown_nodes_are_errors() {
        let (net, n) = grid();
        let bogus = NodeId::from_index(99);
        let engine = RoutingEngine::with_defaults(Objective::Distance);
        assert!(matches!(engine.search(&net, bogus, 0.0), Err(RoutingError::NodeNotFound(_))));
        assert!(matches!(engine.route(&net, n[0], bogus, 0.0), Err(RoutingError::NodeNotFound(_))));
    }
}

// ── Schedule-aware objectives ─────────────────────────────────────────────────

#[cfg(test)]
mod scheduled {
    use mm_core::{Mode, RoutingConfig};

    use super::helpers::{close, graph};
    use crate::{Objective, Router, RoutingEngine};

    fn engine(objective: Objective) -> RoutingEngine {
        RoutingEngine::with_defaults(objective)
    }

    #[test]
    fn boarding_before_service_opens_is_rejected() {
        // Car has no departure slots, so it boards exactly at the arrival time.
        let (net, n) = graph(2, &[(0, 1, 3.0, Mode::Car)]);
        let e = engine(Objective::ScheduledCost);
        assert!(!e.search(&net, n[0], 359.0).unwrap().is_reached(n[1]));
        assert!(e.search(&net, n[0], 360.0).unwrap().is_reached(n[1]));
        assert!(e.search(&net, n[0], 1_380.0).unwrap().is_reached(n[1]));
        assert!(!e.search(&net, n[0], 1_381.0).unwrap().is_reached(n[1]));
    }

    #[test]
    fn metro_window_boundary_without_slot_wait() {
        let (net, n) = graph(2, &[(0, 1, 3.0, Mode::Metro)]);
        let config = RoutingConfig { departure_interval_min: 1.0, ..RoutingConfig::default() };
        let e = RoutingEngine::new(Objective::ScheduledCost, config).unwrap();
        assert!(!e.search(&net, n[0], 359.0).unwrap().is_reached(n[1]));
        assert!(e.search(&net, n[0], 360.0).unwrap().is_reached(n[1]));
    }

    #[test]
    fn slot_wait_counts_toward_the_window() {
        let (net, n) = graph(2, &[(0, 1, 3.0, Mode::Metro)]);
        let e = engine(Objective::ScheduledCost);
        // 359 waits one minute for the 360 departure.
        let tree = e.search(&net, n[0], 359.0).unwrap();
        assert!(tree.is_reached(n[1]));
        assert!(close(tree.label(n[1]).waiting, 1.0));
        // 1378 waits for 1380; 1381 would have to wait until 1395.
        assert!(e.search(&net, n[0], 1_378.0).unwrap().is_reached(n[1]));
        assert!(!e.search(&net, n[0], 1_381.0).unwrap().is_reached(n[1]));
    }

    #[test]
    fn waiting_is_quantized() {
        // 1.5 km of metro = 3 min.
        let (net, n) = graph(2, &[(0, 1, 1.5, Mode::Metro)]);
        let e = engine(Objective::ScheduledFastest);

        let on_slot = e.search(&net, n[0], 105.0 + 360.0).unwrap();
        assert!(close(on_slot.label(n[1]).waiting, 0.0));
        assert!(close(on_slot.label(n[1]).arrival, 468.0));

        // Two minutes past a slot: wait for the next one, 13 min later.
        let off_slot = e.search(&net, n[0], 107.0 + 360.0).unwrap();
        assert!(close(off_slot.label(n[1]).waiting, 13.0));
        assert!(close(off_slot.label(n[1]).arrival, 483.0));
        assert!(close(off_slot.metric(n[1]), 483.0));
    }

    #[test]
    fn staying_on_board_never_waits_twice() {
        // 0 →metro→ 1 →metro→ 2, each hop 1.5 km = 3 min.
        let (net, n) = graph(3, &[(0, 1, 1.5, Mode::Metro), (1, 2, 1.5, Mode::Metro)]);
        let route = engine(Objective::ScheduledFastest)
            .route(&net, n[0], n[2], 467.0)
            .unwrap()
            .unwrap();
        // Wait 13 at the source, none at node 1 (arrival 483 is off-slot).
        assert!(close(route.legs[0].waiting, 13.0));
        assert!(close(route.legs[1].waiting, 0.0));
        assert_eq!(route.arrival, Some(486.0));
    }

    #[test]
    fn switching_lines_waits_again() {
        let (net, n) = graph(3, &[(0, 1, 1.5, Mode::Metro), (1, 2, 1.5, Mode::UttaraBus)]);
        let route = engine(Objective::ScheduledFastest)
            .route(&net, n[0], n[2], 467.0)
            .unwrap()
            .unwrap();
        // Arrive 483, next bus at 495.
        assert!(close(route.legs[1].waiting, 12.0));
        assert_eq!(route.legs[1].board_at, Some(495.0));
        assert_eq!(route.arrival, Some(498.0));
    }

    #[test]
    fn fastest_and_cheapest_disagree() {
        // Direct car: 3 km, 6 min, 60 Tk.  Parallel metro: 3 km, 6 min + wait, 15 Tk.
        let (net, n) = graph(3, &[(0, 1, 3.0, Mode::Car), (0, 2, 0.0, Mode::Walk), (2, 1, 3.0, Mode::Metro)]);
        let depart = 467.0;

        let fast = engine(Objective::ScheduledFastest)
            .route(&net, n[0], n[1], depart)
            .unwrap()
            .unwrap();
        assert_eq!(fast.nodes, vec![n[0], n[1]]);
        assert_eq!(fast.arrival, Some(473.0));
        assert_eq!(fast.duration_minutes(), Some(6.0));

        let cheap = engine(Objective::ScheduledCost)
            .route(&net, n[0], n[1], depart)
            .unwrap()
            .unwrap();
        assert_eq!(cheap.nodes, vec![n[0], n[2], n[1]]);
        assert!(close(cheap.total, 15.0));
        // Walk 0 km, wait until 480, ride 6 min.
        assert_eq!(cheap.arrival, Some(486.0));
    }

    #[test]
    fn infeasible_arc_reachable_later_by_another_path() {
        // Direct metro 0→1 would board at 345.  Walking 0.5 km (15 min) to 2
        // and boarding there at 360 works.
        let (net, n) = graph(
            3,
            &[(0, 1, 1.0, Mode::Metro), (0, 2, 0.5, Mode::Walk), (2, 1, 1.0, Mode::Metro)],
        );
        let route = engine(Objective::ScheduledCost)
            .route(&net, n[0], n[1], 340.0)
            .unwrap()
            .unwrap();
        assert_eq!(route.nodes, vec![n[0], n[2], n[1]]);
        assert!(close(route.total, 5.0));
        assert_eq!(route.legs[1].board_at, Some(360.0));
        assert_eq!(route.arrival, Some(362.0));
    }

    #[test]
    fn walking_uses_walk_speed() {
        let (net, n) = graph(2, &[(0, 1, 1.0, Mode::Walk)]);
        let route = engine(Objective::ScheduledFastest)
            .route(&net, n[0], n[1], 100.0)
            .unwrap()
            .unwrap();
        // Walking has no window and no slots: 30 min at 2 km/h.
        assert!(close(route.total, 30.0));
        assert_eq!(route.legs[0].board_at, Some(100.0));
    }

    #[test]
    fn past_midnight_nothing_boards() {
        // Walk 1 km (30 min) from 23:29 then try to board a bus.
        let (net, n) = graph(3, &[(0, 1, 1.0, Mode::Walk), (1, 2, 1.0, Mode::BikolpoBus)]);
        let tree = engine(Objective::ScheduledFastest).search(&net, n[0], 1_409.0).unwrap();
        assert!(tree.is_reached(n[1]));
        assert!(!tree.is_reached(n[2]));
    }

    #[test]
    fn timed_total_matches_contributions() {
        let (net, n) = graph(
            4,
            &[(0, 1, 0.4, Mode::Walk), (1, 2, 2.5, Mode::Metro), (2, 3, 1.2, Mode::UttaraBus)],
        );
        for objective in [Objective::ScheduledCost, Objective::ScheduledFastest] {
            let route = engine(objective).route(&net, n[0], n[3], 500.0).unwrap().unwrap();
            let sum: f64 = route.legs.iter().map(|l| l.contribution).sum();
            assert!(close(route.total, sum), "{objective}");
            assert!(route.legs.iter().all(|l| l.board_at.is_some() && l.arrive_at.is_some()));
        }
    }
}

// ── Objective & configuration ─────────────────────────────────────────────────

#[cfg(test)]
mod objective {
    use mm_core::{Mode, RoutingConfig};

    use crate::{Objective, RoutingEngine};

    #[test]
    fn weights() {
        let cfg = RoutingConfig::default();
        assert_eq!(Objective::Distance.edge_weight(Mode::Car, 2.0, &cfg), 2.0);
        assert_eq!(Objective::Cost.edge_weight(Mode::Car, 2.0, &cfg), 40.0);
        assert_eq!(Objective::ScheduledCost.edge_weight(Mode::Metro, 2.0, &cfg), 10.0);
        assert_eq!(Objective::Cost.edge_weight(Mode::Walk, 2.0, &cfg), 0.0);
        assert_eq!(Objective::ScheduledFastest.edge_weight(Mode::Car, 2.0, &cfg), 4.0);
        assert_eq!(Objective::ScheduledFastest.edge_weight(Mode::Walk, 2.0, &cfg), 60.0);
    }

    #[test]
    fn flags() {
        assert!(!Objective::Distance.tracks_time());
        assert!(!Objective::Cost.enforces_schedule());
        assert!(Objective::ScheduledCost.enforces_schedule());
        assert!(Objective::ScheduledFastest.tracks_time());
    }

    #[test]
    fn parse() {
        for o in Objective::ALL {
            assert_eq!(o.as_str().parse::<Objective>().unwrap(), o);
        }
        assert_eq!("scheduled_cost".parse::<Objective>().unwrap(), Objective::ScheduledCost);
        assert!("cheapest".parse::<Objective>().is_err());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = RoutingConfig { walk_speed_kmh: -2.0, ..RoutingConfig::default() };
        assert!(RoutingEngine::new(Objective::Distance, cfg).is_err());
    }
}
