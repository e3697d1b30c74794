//! `mm-core` — foundational types for the `mm` multimodal router.
//!
//! This crate is a dependency of every other `mm-*` crate.  It has no `mm-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`ids`]    | `NodeId`                                                    |
//! | [`geo`]    | `Coordinate`, `CoordKey`, haversine `distance_km`           |
//! | [`time`]   | 12-hour clock codec, departure-slot quantization            |
//! | [`mode`]   | `Mode` enum                                                 |
//! | [`config`] | `RoutingConfig`, `FareTable`, `ServiceWindow`               |
//! | [`error`]  | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `Mode` and the config.   |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FareTable, RoutingConfig, ServiceWindow};
pub use error::{CoreError, CoreResult};
pub use geo::{distance_km, CoordKey, Coordinate};
pub use ids::NodeId;
pub use mode::Mode;
pub use time::{format_clock, parse_clock, wait_for_departure, MINUTES_PER_DAY};
