//! `mm-graph` — multimodal coordinate graph, dataset loading, and snapping.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`network`] | `CoordinateGraph` (CSR), `GraphBuilder` (dedup by coordinate)  |
//! | [`loader`]  | `DatasetSpec`, `load_dataset`, `load_datasets`                 |
//! | [`locator`] | `NodeLocator` trait, `LinearScan`, `RTreeLocator`, attachment  |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                                 |
//!
//! # Lifecycle
//!
//! ```text
//! GraphBuilder ──load_datasets──▶ GraphBuilder ──attach_query──▶ GraphBuilder ──build──▶ CoordinateGraph
//! ```
//!
//! The built graph is read-only and may be shared by any number of searches.

pub mod error;
pub mod loader;
pub mod locator;
pub mod network;


pub use error::{GraphError, GraphResult};
pub use loader::{
    load_dataset, load_dataset_reader, load_datasets, DatasetLayout, DatasetSpec, DatasetStats,
    LoadReport,
};
pub use locator::{
    attach_endpoint, attach_query, Attachment, Connector, LinearScan, NodeLocator, RTreeLocator,
};
pub use network::{ArcRef, CoordinateGraph, GraphBuilder};
