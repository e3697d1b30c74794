//! `mm-routing` — schedule-aware shortest paths over a `CoordinateGraph`.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`objective`] | `Objective` (distance, cost, scheduled cost, fastest)     |
//! | [`router`]    | `Router` trait, `RoutingEngine`, `SearchTree`, `Label`    |
//! | [`path`]      | `Route`, `Leg`, `reconstruct`                             |
//! | [`queue`]     | `WorkingSet` indexed priority queue                       |
//! | [`error`]     | `RoutingError`, `RoutingResult<T>`                        |
//!
//! # Usage
//!
//! ```rust,ignore
//! let engine = RoutingEngine::new(Objective::ScheduledFastest, config)?;
//! match engine.route(&graph, src, dst, parse_clock("8:10am"))? {
//!     Some(route) => println!("{} legs, {:.1} min", route.legs.len(), route.total),
//!     None => println!("NO path"),
//! }
//! ```

pub mod error;
pub mod objective;
pub mod path;
pub mod queue;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{RoutingError, RoutingResult};
pub use objective::Objective;
pub use path::{reconstruct, Leg, Route};
pub use queue::WorkingSet;
pub use router::{Label, Router, RoutingEngine, SearchTree};
