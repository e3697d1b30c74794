//! KML overlay backend.
//!
//! Writes one KML 2.2 document with a red 4 px line per route, suitable for
//! dropping onto Google My Maps or Google Earth.  Coordinates are emitted as
//! `lon,lat,0` triples in travel order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mm_graph::CoordinateGraph;
use mm_routing::{Objective, Route};

use crate::OutputResult;
use crate::writer::RouteWriter;

/// `aabbggrr`: opaque red.
const LINE_COLOR: &str = "ff0000ff";
const LINE_WIDTH: u32 = 4;

/// Document title for a route of `objective`.
pub fn document_name(objective: Objective) -> &'static str {
    match objective {
        Objective::Distance         => "Shortest Path",
        Objective::Cost             => "Cheapest Path",
        Objective::ScheduledCost    => "Cheapest Path with time",
        Objective::ScheduledFastest => "Fastest Path",
    }
}

/// Writes routes as placemarks of a single KML document.
///
/// The document header is written with the first route, so its title
/// follows that route's objective.
pub struct KmlWriter<W: Write> {
    out:      W,
    routes:   usize,
    finished: bool,
}

impl KmlWriter<BufWriter<File>> {
    /// Create (or truncate) the KML file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> KmlWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, routes: 0, finished: false }
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self, name: &str) -> OutputResult<()> {
        writeln!(self.out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(self.out, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
        writeln!(self.out, "<Document>")?;
        writeln!(self.out, "<name>{name}</name>")?;
        Ok(())
    }
}

impl<W: Write> RouteWriter for KmlWriter<W> {
    fn write_route(&mut self, graph: &CoordinateGraph, route: &Route) -> OutputResult<()> {
        if self.routes == 0 {
            self.write_header(document_name(route.objective))?;
        }
        self.routes += 1;

        let out = &mut self.out;
        writeln!(out, "<Placemark>")?;
        writeln!(out, "<name>Route {}</name>", self.routes)?;
        writeln!(out, "<Style>")?;
        writeln!(out, "<LineStyle>")?;
        writeln!(out, "<color>{LINE_COLOR}</color>")?;
        writeln!(out, "<width>{LINE_WIDTH}</width>")?;
        writeln!(out, "</LineStyle>")?;
        writeln!(out, "</Style>")?;
        writeln!(out, "<LineString>")?;
        writeln!(out, "<tessellate>1</tessellate>")?;
        writeln!(out, "<coordinates>")?;
        for c in route.coordinates(graph) {
            writeln!(out, "{},{},0", c.lon, c.lat)?;
        }
        writeln!(out, "</coordinates>")?;
        writeln!(out, "</LineString>")?;
        writeln!(out, "</Placemark>")?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if self.routes == 0 {
            self.write_header("Route")?;
        }
        writeln!(self.out, "</Document>")?;
        writeln!(self.out, "</kml>")?;
        self.out.flush()?;
        log::debug!("KML: {} route(s) written", self.routes);
        Ok(())
    }
}
