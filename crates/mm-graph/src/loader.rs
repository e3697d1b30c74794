//! Travel-corridor dataset loader.
//!
//! # File format
//!
//! One corridor (road, metro line, bus route) per line, comma-delimited,
//! whitespace around fields ignored, no header row.  Two layouts exist:
//!
//! ```text
//! Corridor:     Name, Lon, Lat, Lon, Lat, ..., Lon, Lat, Name1, Name2
//! RoadNetwork:  Name, Lon, Lat, Lon, Lat, ..., Lon, Lat
//! ```
//!
//! In the `RoadNetwork` layout the final coordinate pair is a dangling
//! artefact of the export and is dropped.
//!
//! Each consecutive pair of coordinates on a line becomes one undirected
//! segment of the dataset's [`Mode`].  Coordinates shared with nodes created
//! by earlier lines or earlier datasets are merged into the same node.
//!
//! # Failure policy
//!
//! - A record whose coordinate fields are not numbers is skipped (logged at
//!   `warn`) and counted in [`DatasetStats::skipped_lines`].
//! - [`load_datasets`] skips a file that cannot be opened and carries on
//!   with the rest; the graph simply has less coverage.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use mm_core::{Coordinate, Mode};

use crate::network::GraphBuilder;
use crate::{GraphError, GraphResult};

// ── Dataset description ───────────────────────────────────────────────────────

/// Column layout of a dataset file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DatasetLayout {
    /// `Name, coords…, Name1, Name2`
    Corridor,
    /// `Name, coords…` with a dangling final pair.
    RoadNetwork,
}

/// One dataset file to ingest.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSpec {
    pub path:   PathBuf,
    pub mode:   Mode,
    pub layout: DatasetLayout,
}

impl DatasetSpec {
    pub fn new(path: impl Into<PathBuf>, mode: Mode, layout: DatasetLayout) -> Self {
        Self { path: path.into(), mode, layout }
    }

    /// Road network file, travelled by car.
    pub fn road(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Mode::Car, DatasetLayout::RoadNetwork)
    }

    pub fn metro(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Mode::Metro, DatasetLayout::Corridor)
    }

    pub fn uttara_bus(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Mode::UttaraBus, DatasetLayout::Corridor)
    }

    pub fn bikolpo_bus(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Mode::BikolpoBus, DatasetLayout::Corridor)
    }

    /// The conventional description of a dataset of `mode`: roads use the
    /// `RoadNetwork` layout, every other corridor the `Corridor` layout.
    pub fn for_mode(path: impl Into<PathBuf>, mode: Mode) -> Self {
        let layout = match mode {
            Mode::Car => DatasetLayout::RoadNetwork,
            _         => DatasetLayout::Corridor,
        };
        Self::new(path, mode, layout)
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Counters for one ingested dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetStats {
    /// Records read, including skipped ones.
    pub lines:         usize,
    /// Undirected segments added.
    pub segments:      usize,
    /// New nodes created by this dataset.
    pub nodes_created: usize,
    /// Records dropped because a coordinate did not parse.
    pub skipped_lines: usize,
}

/// Outcome of [`load_datasets`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Datasets ingested, with their counters.
    pub loaded:  Vec<(DatasetSpec, DatasetStats)>,
    /// Datasets that could not be read, with the reason.
    pub skipped: Vec<(DatasetSpec, GraphError)>,
}

impl LoadReport {
    /// `true` if at least one dataset was ingested.
    pub fn any_loaded(&self) -> bool {
        !self.loaded.is_empty()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Ingest every dataset in order, skipping the ones that cannot be read.
pub fn load_datasets(builder: &mut GraphBuilder, specs: &[DatasetSpec]) -> LoadReport {
    let mut report = LoadReport::default();
    for spec in specs {
        match load_dataset(builder, spec) {
            Ok(stats) => {
                log::info!(
                    "loaded {} ({}): {} segments, {} new nodes",
                    spec.path.display(),
                    spec.mode.as_str(),
                    stats.segments,
                    stats.nodes_created,
                );
                report.loaded.push((spec.clone(), stats));
            }
            Err(e) => {
                log::warn!("skipping dataset: {e}");
                report.skipped.push((spec.clone(), e));
            }
        }
    }
    report
}

/// Ingest one dataset file.
///
/// # Errors
///
/// [`GraphError::DatasetUnavailable`] if the file cannot be opened; I/O
/// errors while reading propagate as [`GraphError::Csv`].
pub fn load_dataset(builder: &mut GraphBuilder, spec: &DatasetSpec) -> GraphResult<DatasetStats> {
    let file = open(&spec.path)?;
    load_dataset_reader(builder, file, spec.mode, spec.layout)
}

/// Like [`load_dataset`] but accepts any `Read` source.
pub fn load_dataset_reader<R: Read>(
    builder: &mut GraphBuilder,
    reader:  R,
    mode:    Mode,
    layout:  DatasetLayout,
) -> GraphResult<DatasetStats> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let nodes_before = builder.node_count();
    let mut stats = DatasetStats::default();

    for result in csv_reader.records() {
        stats.lines += 1;
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("dataset record {} unreadable: {e}", stats.lines);
                stats.skipped_lines += 1;
                continue;
            }
        };

        let coords = match polyline(&record, layout) {
            Ok(c) => c,
            Err(field) => {
                log::warn!(
                    "dataset record {} ({:?}): bad coordinate {field:?}, line skipped",
                    stats.lines,
                    record.get(0).unwrap_or(""),
                );
                stats.skipped_lines += 1;
                continue;
            }
        };

        for pair in coords.windows(2) {
            let a = builder.get_or_create_node(pair[0]);
            let b = builder.get_or_create_node(pair[1]);
            builder.add_segment(a, b, mode);
            stats.segments += 1;
        }
    }

    stats.nodes_created = builder.node_count() - nodes_before;
    Ok(stats)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open(path: &Path) -> GraphResult<File> {
    File::open(path).map_err(|source| GraphError::DatasetUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Extract the coordinate sequence of one record.  Returns the offending
/// field on a parse failure.
fn polyline(record: &StringRecord, layout: DatasetLayout) -> Result<Vec<Coordinate>, String> {
    let fields: Vec<&str> = record.iter().collect();

    let coord_fields: &[&str] = match layout {
        DatasetLayout::Corridor if fields.len() >= 3 => &fields[1..fields.len() - 2],
        DatasetLayout::RoadNetwork if !fields.is_empty() => &fields[1..],
        _ => &[],
    };

    let mut coords = coord_fields
        .chunks_exact(2)
        .map(|pair| Ok(Coordinate::new(number(pair[0])?, number(pair[1])?)))
        .collect::<Result<Vec<_>, String>>()?;

    if layout == DatasetLayout::RoadNetwork {
        coords.pop();
    }
    Ok(coords)
}

fn number(field: &str) -> Result<f64, String> {
    field.parse::<f64>().map_err(|_| field.to_owned())
}
