//! Track types.
//!
//! A `TrackInfo` is a directed edge of the trail network: a walkable
//! connection from one waypoint to another with a duration and the map
//! geometry to draw it. A two-way trail is stored as two independent
//! `TrackInfo` values, one per direction.

use chrono::Duration;

use crate::domain::point::MapPoint;
use crate::domain::waypoint::WaypointIdx;

/// Index of a track within the graph's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackIdx(pub usize);

impl std::fmt::Display for TrackIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for TrackIdx {
    fn from(value: usize) -> Self {
        TrackIdx(value)
    }
}

impl From<TrackIdx> for usize {
    fn from(value: TrackIdx) -> Self {
        value.0
    }
}

/// A directed edge of the trail network.
///
/// Endpoints are arena handles into the owning graph. `points` runs in
/// walking direction, so the reverse edge of a two-way trail carries the
/// same geometry reversed. The loader only admits tracks with at least
/// one map point.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    /// Waypoint the track starts at.
    pub from: WaypointIdx,
    /// Waypoint the track ends at.
    pub to: WaypointIdx,
    /// Optional description shown when the track is part of a tour.
    pub description: String,
    /// Walking time in this direction.
    pub duration: Duration,
    /// Geometry in walking order.
    pub points: Vec<MapPoint>,
}

impl TrackInfo {
    pub fn new(
        from: WaypointIdx,
        to: WaypointIdx,
        description: String,
        duration: Duration,
        points: Vec<MapPoint>,
    ) -> Self {
        Self {
            from,
            to,
            description,
            duration,
            points,
        }
    }
}
