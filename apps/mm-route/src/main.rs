//! mm-route — multimodal route planner for Dhaka.
//!
//! Builds one coordinate graph from the road, metro and bus datasets, snaps
//! the query endpoints onto it, and prints the best route for the chosen
//! objective.  Optionally exports the route as KML and CSV.
//!
//! ```text
//! $ echo "90.3639 23.8341 90.4126 23.7283 8:10am" | mm-route fastest --kml route.kml
//! ```

mod cli;
mod query;

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use mm_core::{format_clock, RoutingConfig};
use mm_graph::{
    attach_query, load_datasets, Attachment, GraphBuilder, LinearScan, NodeLocator, RTreeLocator,
};
use mm_output::{write_itinerary, write_no_path, CsvRouteWriter, KmlWriter, RouteWriter};
use mm_routing::{Router, RoutingEngine};

use cli::{Cli, LocatorKind};
use query::parse_query;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .target(env_logger::Target::Stderr)
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RoutingConfig::default(),
    };
    let engine = RoutingEngine::new(cli.objective, config)?;
    let timed = cli.objective.tracks_time();

    // ── 1. Query ──────────────────────────────────────────────────────────────
    let input = io::read_to_string(io::stdin()).context("reading query from stdin")?;
    let query = parse_query(&input, timed)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Source Longitude = {}", query.source.lon)?;
    writeln!(out, "Source Latitude = {}", query.source.lat)?;
    writeln!(out, "Destination Longitude = {}", query.destination.lon)?;
    writeln!(out, "Destination Latitude = {}", query.destination.lat)?;
    if timed {
        writeln!(out, "Departure = {}", format_clock(query.depart))?;
    }
    writeln!(out)?;

    // ── 2. Graph ──────────────────────────────────────────────────────────────
    let t0 = Instant::now();
    let mut builder = GraphBuilder::new();
    let report = load_datasets(&mut builder, &cli.dataset_specs());
    if !report.any_loaded() {
        log::warn!("no dataset could be loaded; only the query points are in the graph");
    }
    log::info!(
        "graph: {} nodes, {} arcs from {} dataset(s) in {:.1?}",
        builder.node_count(),
        builder.arc_count(),
        report.loaded.len(),
        t0.elapsed(),
    );

    // ── 3. Snap endpoints ─────────────────────────────────────────────────────
    let locator: Box<dyn NodeLocator> = match cli.locator {
        LocatorKind::Linear => Box::new(LinearScan),
        LocatorKind::Rtree => Box::new(RTreeLocator::new(builder.positions())),
    };
    let (src, dst) = attach_query(&mut builder, locator.as_ref(), query.source, query.destination);
    log_attachment("source", &src);
    log_attachment("destination", &dst);
    let graph = builder.build();

    // ── 4. Route ──────────────────────────────────────────────────────────────
    let t1 = Instant::now();
    let route = engine.route(&graph, src.node, dst.node, query.depart)?;
    log::info!("{} search finished in {:.1?}", engine.objective(), t1.elapsed());

    let Some(route) = route else {
        write_no_path(&mut out)?;
        return Ok(());
    };
    write_itinerary(&mut out, &graph, &route)?;

    // ── 5. Export ─────────────────────────────────────────────────────────────
    if let Some(path) = &cli.kml {
        let mut w = KmlWriter::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        w.write_route(&graph, &route)?;
        w.finish()?;
        writeln!(out, "KML written to {}", path.display())?;
    }
    if let Some(path) = &cli.csv {
        let mut w = CsvRouteWriter::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        w.write_route(&graph, &route)?;
        w.finish()?;
        writeln!(out, "CSV written to {}", path.display())?;
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<RoutingConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: RoutingConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    log::info!("config loaded from {}", path.display());
    Ok(config)
}

fn log_attachment(role: &str, a: &Attachment) {
    match (a.created, a.connector) {
        (false, _) => log::info!("{role} is network node {}", a.node),
        (true, Some(c)) => log::info!("{role} snapped to {} with a {:.3} km walk", c.to, c.distance_km),
        (true, None) => log::warn!("{role} could not be snapped to the network"),
    }
}
