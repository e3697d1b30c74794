//! CSV leg-table backend.
//!
//! One row per leg:
//!
//! | Column         | Meaning                                            |
//! |----------------|----------------------------------------------------|
//! | `route`        | 1-based route number within the file               |
//! | `objective`    | `distance`, `cost`, `scheduled-cost`, `fastest`    |
//! | `leg`          | 1-based leg number within the route                |
//! | `from_lon` …   | leg endpoints in degrees                           |
//! | `mode`         | `walk`, `car`, `metro`, `uttara_bus`, `bikolpo_bus`|
//! | `distance_km`  | leg length                                         |
//! | `fare_tk`      | leg fare at the configured rate                    |
//! | `contribution` | objective metric added by the leg                  |
//! | `waiting_min`  | minutes waited before boarding                     |
//! | `board_at`     | `HH:MMam` boarding time, empty when untimed        |
//! | `arrive_at`    | `HH:MMam` arrival time, empty when untimed         |

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use mm_core::format_clock;
use mm_graph::CoordinateGraph;
use mm_routing::Route;

use crate::OutputResult;
use crate::writer::RouteWriter;

pub const HEADER: [&str; 14] = [
    "route", "objective", "leg",
    "from_lon", "from_lat", "to_lon", "to_lat",
    "mode", "distance_km", "fare_tk", "contribution", "waiting_min",
    "board_at", "arrive_at",
];

/// Writes route legs as CSV rows.
pub struct CsvRouteWriter<W: Write> {
    legs:     Writer<W>,
    routes:   usize,
    finished: bool,
}

impl CsvRouteWriter<File> {
    /// Create (or truncate) the CSV file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvRouteWriter<W> {
    pub fn new(out: W) -> OutputResult<Self> {
        let mut legs = Writer::from_writer(out);
        legs.write_record(HEADER)?;
        Ok(Self { legs, routes: 0, finished: false })
    }
}

impl<W: Write> RouteWriter for CsvRouteWriter<W> {
    fn write_route(&mut self, graph: &CoordinateGraph, route: &Route) -> OutputResult<()> {
        self.routes += 1;
        let clock = |t: Option<f64>| t.map(format_clock).unwrap_or_default();

        for (i, leg) in route.legs.iter().enumerate() {
            let from = graph.node_pos(leg.from);
            let to = graph.node_pos(leg.to);
            self.legs.write_record(&[
                self.routes.to_string(),
                route.objective.to_string(),
                (i + 1).to_string(),
                from.lon.to_string(),
                from.lat.to_string(),
                to.lon.to_string(),
                to.lat.to_string(),
                leg.mode.as_str().to_owned(),
                format!("{:.6}", leg.distance_km),
                format!("{:.2}", leg.fare),
                format!("{:.6}", leg.contribution),
                format!("{:.0}", leg.waiting),
                clock(leg.board_at),
                clock(leg.arrive_at),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.legs.flush()?;
        Ok(())
    }
}
