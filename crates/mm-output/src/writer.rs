//! The `RouteWriter` trait implemented by the file exporters.

use mm_graph::CoordinateGraph;
use mm_routing::Route;

use crate::OutputResult;

/// Trait implemented by the KML and CSV writers.
///
/// A writer may receive several routes before [`finish`](Self::finish);
/// each becomes its own placemark or block of rows.
pub trait RouteWriter {
    /// Append one route.  `graph` resolves node ids to coordinates.
    fn write_route(&mut self, graph: &CoordinateGraph, route: &Route) -> OutputResult<()>;

    /// Flush and close the underlying output.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
