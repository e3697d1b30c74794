//! Graph-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by `mm-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("cannot open dataset {path}: {source}")]
    DatasetUnavailable {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
