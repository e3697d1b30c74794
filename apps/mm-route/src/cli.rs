//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use mm_core::Mode;
use mm_graph::DatasetSpec;
use mm_routing::Objective;

pub const ROAD_FILE:        &str = "Roadmap-Dhaka.csv";
pub const METRO_FILE:       &str = "Routemap-DhakaMetroRail.csv";
pub const UTTARA_BUS_FILE:  &str = "Routemap-UttaraBus.csv";
pub const BIKOLPO_BUS_FILE: &str = "Routemap-BikolpoBus.csv";

#[derive(Parser, Debug)]
#[command(name = "mm-route")]
#[command(about = "Multimodal route planner over Dhaka road, metro and bus networks")]
#[command(long_about = "Reads a query from stdin and prints the best route:
  <src_lon> <src_lat> <dst_lon> <dst_lat>            # distance, cost
  <src_lon> <src_lat> <dst_lon> <dst_lat> <H:MMam>   # scheduled-cost, fastest

Objectives:
  distance        shortest road distance (road network)
  cost            cheapest fare (road + metro)
  scheduled-cost  cheapest fare honouring departures and service hours (all networks)
  fastest         earliest arrival honouring departures and service hours (all networks)")]
pub struct Cli {
    /// distance | cost | scheduled-cost | fastest
    pub objective: Objective,

    /// Dataset to load as MODE=PATH (repeatable; replaces the defaults).
    /// MODE is one of car, metro, uttara_bus, bikolpo_bus.
    #[arg(long = "dataset", value_name = "MODE=PATH", value_parser = parse_dataset)]
    pub datasets: Vec<DatasetSpec>,

    /// Directory holding the default dataset files.
    #[arg(long, default_value = "..")]
    pub data_dir: PathBuf,

    /// Nearest-node search used to snap query points.
    #[arg(long, value_enum, default_value_t = LocatorKind::Linear)]
    pub locator: LocatorKind,

    /// Write the route as a KML overlay.
    #[arg(long, value_name = "FILE")]
    pub kml: Option<PathBuf>,

    /// Write the route legs as CSV.
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// JSON file overriding speeds, fares, departure interval or service hours.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LocatorKind {
    /// Exact scan over every node.
    Linear,
    /// R-tree candidates re-ranked by great-circle distance.
    Rtree,
}

impl Cli {
    /// The datasets to load: the explicit `--dataset` list, or the standard
    /// files under `--data-dir` for the objective.
    pub fn dataset_specs(&self) -> Vec<DatasetSpec> {
        if self.datasets.is_empty() {
            default_datasets(self.objective, &self.data_dir)
        } else {
            self.datasets.clone()
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Standard networks for each objective, in load order.
pub fn default_datasets(objective: Objective, dir: &Path) -> Vec<DatasetSpec> {
    let mut specs = vec![DatasetSpec::road(dir.join(ROAD_FILE))];
    if objective != Objective::Distance {
        specs.push(DatasetSpec::metro(dir.join(METRO_FILE)));
    }
    if objective.tracks_time() {
        specs.push(DatasetSpec::uttara_bus(dir.join(UTTARA_BUS_FILE)));
        specs.push(DatasetSpec::bikolpo_bus(dir.join(BIKOLPO_BUS_FILE)));
    }
    specs
}

fn parse_dataset(s: &str) -> Result<DatasetSpec, String> {
    let (mode, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected MODE=PATH, got {s:?}"))?;
    let mode: Mode = mode.parse().map_err(|e| format!("{e}"))?;
    if mode == Mode::Walk {
        return Err("walk segments are generated, not loaded".to_owned());
    }
    if path.is_empty() {
        return Err(format!("empty path in {s:?}"));
    }
    Ok(DatasetSpec::for_mode(path, mode))
}
