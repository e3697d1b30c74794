//! `mm-output` — route exporters for the `mm` multimodal router.
//!
//! | Module        | Output                                                  |
//! |---------------|---------------------------------------------------------|
//! | [`itinerary`] | Terminal itinerary: summary line plus one line per leg  |
//! | [`kml`]       | KML 2.2 overlay, one red line per route                 |
//! | [`csv`]       | CSV leg table                                           |
//!
//! The file backends implement [`RouteWriter`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use mm_output::{write_itinerary, KmlWriter, RouteWriter};
//!
//! write_itinerary(&mut std::io::stdout().lock(), &graph, &route)?;
//! let mut kml = KmlWriter::create(Path::new("route.kml"))?;
//! kml.write_route(&graph, &route)?;
//! kml.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod itinerary;
pub mod kml;
pub mod writer;


pub use self::csv::CsvRouteWriter;
pub use error::{OutputError, OutputResult};
pub use itinerary::{write_itinerary, write_no_path, NO_PATH};
pub use kml::KmlWriter;
pub use writer::RouteWriter;
