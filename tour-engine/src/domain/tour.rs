//! Planned tour result types.
//!
//! A `PlannedTour` is the output of a planning query: the traversed edges
//! in order, the aggregated map geometry, the total walking time, and a
//! generated narrative description. It is built fresh per query and owned
//! solely by the caller.

use chrono::Duration;
use serde::{Serialize, Serializer};

use crate::domain::point::MapPoint;
use crate::domain::waypoint::WaypointId;

fn serialize_minutes<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(d.num_minutes())
}

/// One traversed edge of a planned tour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourEntry {
    /// Id of the waypoint this entry starts at.
    pub from: WaypointId,
    /// Id of the waypoint this entry ends at.
    pub to: WaypointId,
    /// Walking time for this entry.
    #[serde(rename = "duration_mins", serialize_with = "serialize_minutes")]
    pub duration: Duration,
    /// Offset into the tour's `map_points` where this entry's geometry
    /// begins; it runs until the next entry's offset (or the end of the
    /// list for the last entry).
    pub track_start_index: usize,
    /// Reserved; not computed yet and always `0.0`.
    pub distance_km: f64,
}

/// A fully assembled tour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTour {
    /// Traversed edges, in walking order.
    pub entries: Vec<TourEntry>,
    /// Concatenated geometry of all traversed edges, in walking order.
    pub map_points: Vec<MapPoint>,
    /// Sum of all entry durations.
    #[serde(rename = "total_duration_mins", serialize_with = "serialize_minutes")]
    pub total_duration: Duration,
    /// Narrative text built from waypoint and track descriptions.
    pub description: String,
}
