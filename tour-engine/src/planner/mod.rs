//! Tour planning over the trail network.
//!
//! The engine owns a directed multigraph of waypoints and tracks, built
//! once by the document loader. Planning a tour runs a minimum-duration
//! path search for every consecutive waypoint pair of the request and
//! stitches the traversed edges into a single result.

mod engine;
mod graph;
mod search;

pub use engine::{PlanError, PlanningEngine};
pub use graph::TourGraph;
