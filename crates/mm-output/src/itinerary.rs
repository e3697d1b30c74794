//! Human-readable itinerary for the terminal.
//!
//! ```text
//! Cheapest Cost = 47.310000 (Tk)
//!
//! (90.363833,23.834145)  ->  (90.364012,23.832881) (Walk - 0.000000 Tk)
//! (90.364012,23.832881)  ->  (90.365300,23.816600) (Metro - 9.060000 Tk) - 08:15am To 08:20am
//! ```

use std::io::Write;

use mm_core::format_clock;
use mm_graph::CoordinateGraph;
use mm_routing::{Leg, Objective, Route};

use crate::OutputResult;

/// Printed when the destination is unreachable.
pub const NO_PATH: &str = "NO path";

/// The headline line(s) for `route`.
pub fn summary(route: &Route) -> Vec<String> {
    match route.objective {
        Objective::Distance => vec![format!("Shortest Distance = {:.6} (km)", route.total)],
        Objective::Cost | Objective::ScheduledCost => {
            vec![format!("Cheapest Cost = {:.6} (Tk)", route.total)]
        }
        Objective::ScheduledFastest => {
            let hours = route.duration_minutes().unwrap_or(route.total) / 60.0;
            let mut lines = vec![format!("Fastest arrival time = {hours:.6} h")];
            if let Some(arrival) = route.arrival {
                lines.push(format!("Arrived at = {}", format_clock(arrival)));
            }
            lines
        }
    }
}

/// One leg: endpoints, mode, the leg's share of the metric, and for timed
/// objectives the boarding and arrival clock times.
pub fn leg_line(graph: &CoordinateGraph, objective: Objective, leg: &Leg) -> String {
    let from = graph.node_pos(leg.from);
    let to = graph.node_pos(leg.to);
    let mut line = match objective {
        Objective::Distance => {
            format!("{from}  ->  {to} ({} - {:.6} km)", leg.mode, leg.distance_km)
        }
        Objective::Cost | Objective::ScheduledCost => {
            format!("{from}  ->  {to} ({} - {:.6} Tk)", leg.mode, leg.fare)
        }
        Objective::ScheduledFastest => format!("{from}  ->  {to} ({})", leg.mode),
    };
    if let (Some(board), Some(arrive)) = (leg.board_at, leg.arrive_at) {
        line.push_str(&format!(" - {} To {}", format_clock(board), format_clock(arrive)));
    }
    line
}

/// Write the full itinerary of `route` to `w`.
pub fn write_itinerary<W: Write>(w: &mut W, graph: &CoordinateGraph, route: &Route) -> OutputResult<()> {
    for line in summary(route) {
        writeln!(w, "{line}")?;
    }
    writeln!(w)?;
    if route.is_trivial() {
        writeln!(w, "Already at the destination")?;
        return Ok(());
    }
    for leg in &route.legs {
        writeln!(w, "{}", leg_line(graph, route.objective, leg))?;
    }
    Ok(())
}

/// Write the unreachable-destination report.
pub fn write_no_path<W: Write>(w: &mut W) -> OutputResult<()> {
    writeln!(w, "{NO_PATH}")?;
    writeln!(w)?;
    Ok(())
}
