//! Routing error type.
//!
//! An unreachable destination is **not** an error: `route` returns
//! `Ok(None)` for it.

use thiserror::Error;

use mm_core::{CoreError, NodeId};

/// Errors produced by `mm-routing`.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
