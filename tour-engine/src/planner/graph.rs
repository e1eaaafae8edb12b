//! Directed multigraph of the trail network.
//!
//! Vertices and edges live in dense arenas and are addressed by index
//! handles. A hash index maps waypoint ids to their handles, so lookups
//! during loading (find-or-create) and planning (request resolution) are
//! constant time. Parallel edges between the same ordered pair of
//! vertices are allowed; alternate routes are simply extra edges.

use std::collections::HashMap;

use crate::domain::{TrackIdx, TrackInfo, WaypointId, WaypointIdx, WaypointInfo};

/// The trail network graph.
///
/// Handles returned by this graph are only meaningful for this graph;
/// the accessors index the arenas directly.
#[derive(Debug, Clone, Default)]
pub struct TourGraph {
    waypoints: Vec<WaypointInfo>,
    tracks: Vec<TrackInfo>,
    /// Outgoing edge handles per vertex, parallel to `waypoints`.
    outgoing: Vec<Vec<TrackIdx>>,
    index: HashMap<WaypointId, WaypointIdx>,
}

impl TourGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and indexes its id.
    ///
    /// The graph does not deduplicate: adding a second waypoint with an
    /// already-present id appends a new vertex and re-points the id index
    /// at it, leaving the old vertex reachable only through existing
    /// handles.
    pub fn add_waypoint(&mut self, info: WaypointInfo) -> WaypointIdx {
        let idx = WaypointIdx(self.waypoints.len());
        self.index.insert(info.id.clone(), idx);
        self.waypoints.push(info);
        self.outgoing.push(Vec::new());
        idx
    }

    /// Returns the handle for an id, creating an intermediate waypoint
    /// with an empty description when the id is not present yet.
    pub fn find_or_create(&mut self, id: &WaypointId) -> WaypointIdx {
        match self.index.get(id.as_str()) {
            Some(&idx) => idx,
            None => self.add_waypoint(WaypointInfo::intermediate(id.clone())),
        }
    }

    /// Adds a directed edge. Both endpoint handles must come from this
    /// graph.
    pub fn add_track(&mut self, track: TrackInfo) -> TrackIdx {
        let idx = TrackIdx(self.tracks.len());
        self.outgoing[track.from.0].push(idx);
        self.tracks.push(track);
        idx
    }

    /// Looks up a vertex handle by waypoint id.
    pub fn find_idx(&self, id: &str) -> Option<WaypointIdx> {
        self.index.get(id).copied()
    }

    /// Looks up a vertex by waypoint id.
    pub fn find_waypoint(&self, id: &str) -> Option<&WaypointInfo> {
        self.find_idx(id).map(|idx| &self.waypoints[idx.0])
    }

    pub fn waypoint(&self, idx: WaypointIdx) -> &WaypointInfo {
        &self.waypoints[idx.0]
    }

    pub fn track(&self, idx: TrackIdx) -> &TrackInfo {
        &self.tracks[idx.0]
    }

    /// Handles of the edges leaving a vertex, in insertion order.
    pub fn outgoing(&self, idx: WaypointIdx) -> &[TrackIdx] {
        &self.outgoing[idx.0]
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::domain::MapPoint;

    fn waypoint_id(s: &str) -> WaypointId {
        // Safe: test ids are non-empty literals.
        WaypointId::parse(s).unwrap()
    }

    fn track(from: WaypointIdx, to: WaypointIdx, minutes: i64) -> TrackInfo {
        TrackInfo::new(
            from,
            to,
            String::new(),
            Duration::minutes(minutes),
            vec![MapPoint::new(0.0, 0.0)],
        )
    }

    #[test]
    fn add_and_find_waypoint() {
        let mut graph = TourGraph::new();
        let idx = graph.add_waypoint(WaypointInfo::new(
            waypoint_id("trail-a"),
            "A nice spot".to_owned(),
        ));

        assert_eq!(graph.find_idx("trail-a"), Some(idx));
        assert_eq!(
            graph.find_waypoint("trail-a").map(|w| w.description.as_str()),
            Some("A nice spot")
        );
        assert_eq!(graph.find_idx("trail-b"), None);
        assert_eq!(graph.waypoint_count(), 1);
    }

    #[test]
    fn find_or_create_reuses_existing() {
        let mut graph = TourGraph::new();
        let id = waypoint_id("trail-a");
        let first = graph.find_or_create(&id);
        let second = graph.find_or_create(&id);

        assert_eq!(first, second);
        assert_eq!(graph.waypoint_count(), 1);
        assert!(graph.waypoint(first).description.is_empty());
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut graph = TourGraph::new();
        let a = graph.find_or_create(&waypoint_id("a"));
        let b = graph.find_or_create(&waypoint_id("b"));

        let short = graph.add_track(track(a, b, 10));
        let long = graph.add_track(track(a, b, 60));

        assert_eq!(graph.track_count(), 2);
        assert_eq!(graph.outgoing(a), &[short, long]);
        assert!(graph.outgoing(b).is_empty());
    }

    #[test]
    fn duplicate_id_repoints_index() {
        let mut graph = TourGraph::new();
        let id = waypoint_id("trail-a");
        let first = graph.add_waypoint(WaypointInfo::new(id.clone(), "old".to_owned()));
        let second = graph.add_waypoint(WaypointInfo::new(id, "new".to_owned()));

        assert_ne!(first, second);
        assert_eq!(graph.waypoint_count(), 2);
        assert_eq!(graph.find_idx("trail-a"), Some(second));
        // The old vertex is still there behind its handle.
        assert_eq!(graph.waypoint(first).description, "old");
    }

    #[test]
    fn outgoing_is_per_vertex() {
        let mut graph = TourGraph::new();
        let a = graph.find_or_create(&waypoint_id("a"));
        let b = graph.find_or_create(&waypoint_id("b"));
        let c = graph.find_or_create(&waypoint_id("c"));

        let ab = graph.add_track(track(a, b, 10));
        let bc = graph.add_track(track(b, c, 10));
        let ba = graph.add_track(track(b, a, 10));

        assert_eq!(graph.outgoing(a), &[ab]);
        assert_eq!(graph.outgoing(b), &[bc, ba]);
        assert!(graph.outgoing(c).is_empty());
    }
}
