//! The planning engine.
//!
//! Owns the trail network graph. The graph is populated once from a tour
//! network document and treated as read-only afterwards; planning queries
//! only take `&self`, so a loaded engine can be shared freely.

use std::io::Read;

use chrono::Duration;
use tracing::{debug, warn};

use crate::domain::{
    MapPoint, PlannedTour, TourEntry, TrackIdx, TrackInfo, WaypointId, WaypointIdx, WaypointInfo,
};
use crate::kml::{self, LoadError};
use crate::planner::graph::TourGraph;
use crate::planner::search::shortest_path;

/// Error from a tour planning query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The request has fewer than two waypoints
    #[error("at least two waypoints required, got {given}")]
    TooFewWaypoints { given: usize },

    /// A requested waypoint id is not in the graph
    #[error("unknown waypoint id {0:?}")]
    UnknownWaypoint(String),
}

/// The tour planning engine.
#[derive(Debug, Clone, Default)]
pub struct PlanningEngine {
    graph: TourGraph,
}

impl PlanningEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the graph from a tour network document.
    ///
    /// Loading is all-or-nothing: on error the graph is left exactly as
    /// it was. Call this once per engine before planning; the loader does
    /// not deduplicate, so a second load appends its declared waypoints
    /// and tracks again instead of replacing them.
    pub fn load_graph<R: Read>(&mut self, mut input: R) -> Result<(), LoadError> {
        let mut xml = String::new();
        input.read_to_string(&mut xml)?;
        let network = kml::parse_network(&xml)?;

        // The document parsed completely, applying it cannot fail.
        for entry in network.waypoints {
            self.add_waypoint(WaypointInfo::new(entry.id, entry.description));
        }
        for entry in network.tracks {
            self.add_track(
                &entry.from,
                &entry.to,
                entry.description,
                entry.duration,
                entry.points,
            );
        }

        debug!(
            waypoints = self.graph.waypoint_count(),
            tracks = self.graph.track_count(),
            "tour network loaded"
        );
        Ok(())
    }

    /// Adds a declared waypoint vertex. This is the loader's callback;
    /// tests use it to build graphs directly.
    pub fn add_waypoint(&mut self, info: WaypointInfo) -> WaypointIdx {
        self.graph.add_waypoint(info)
    }

    /// Adds a directed track edge. Endpoints not present yet are created
    /// as intermediate waypoints with an empty description.
    pub fn add_track(
        &mut self,
        from: &WaypointId,
        to: &WaypointId,
        description: String,
        duration: Duration,
        points: Vec<MapPoint>,
    ) -> TrackIdx {
        let from_idx = self.graph.find_or_create(from);
        let to_idx = self.graph.find_or_create(to);
        self.graph
            .add_track(TrackInfo::new(from_idx, to_idx, description, duration, points))
    }

    /// Returns the waypoint with the given id, if loaded.
    pub fn find_waypoint_info(&self, id: &str) -> Option<&WaypointInfo> {
        self.graph.find_waypoint(id)
    }

    pub fn waypoint_count(&self) -> usize {
        self.graph.waypoint_count()
    }

    pub fn track_count(&self) -> usize {
        self.graph.track_count()
    }

    /// Plans a tour visiting the given waypoints in order.
    ///
    /// At least two waypoint ids are required and every id must resolve
    /// to a loaded waypoint. For each consecutive pair the minimum-
    /// duration path is searched and its edges are stitched into one
    /// result: entries in traversal order, the edges' map points
    /// concatenated, durations summed and the description assembled from
    /// waypoint and track texts.
    ///
    /// A consecutive pair with no connecting path does not fail the
    /// query. The pair contributes no entries, points or duration, so
    /// the tour comes back shorter than requested; a warning is logged
    /// when this happens.
    pub fn plan_tour(&self, waypoint_ids: &[&str]) -> Result<PlannedTour, PlanError> {
        if waypoint_ids.len() < 2 {
            return Err(PlanError::TooFewWaypoints {
                given: waypoint_ids.len(),
            });
        }
        let stops = waypoint_ids
            .iter()
            .map(|&id| {
                self.graph
                    .find_idx(id)
                    .ok_or_else(|| PlanError::UnknownWaypoint(id.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = Vec::new();
        let mut map_points: Vec<MapPoint> = Vec::new();
        let mut total_duration = Duration::zero();
        let mut description = String::new();

        for pair in stops.windows(2) {
            let (source, target) = (pair[0], pair[1]);
            let path = match shortest_path(&self.graph, source, target) {
                Some(path) => path,
                None => {
                    warn!(
                        from = %self.graph.waypoint(source).id,
                        to = %self.graph.waypoint(target).id,
                        "no path between consecutive waypoints, pair contributes nothing"
                    );
                    continue;
                }
            };

            for edge_idx in path {
                let track = self.graph.track(edge_idx);
                let source_info = self.graph.waypoint(track.from);
                let target_info = self.graph.waypoint(track.to);

                entries.push(TourEntry {
                    from: source_info.id.clone(),
                    to: target_info.id.clone(),
                    duration: track.duration,
                    track_start_index: map_points.len(),
                    distance_km: 0.0,
                });
                map_points.extend_from_slice(&track.points);
                push_block(&mut description, &source_info.description);
                push_block(&mut description, &track.description);
                total_duration = total_duration
                    .checked_add(&track.duration)
                    .unwrap_or(Duration::MAX);
            }
        }

        // Safe: validated above that there are at least two stops.
        let end = self.graph.waypoint(*stops.last().unwrap());
        let mut end_block = String::from("Tour end point:");
        if !end.description.trim().is_empty() {
            end_block.push('\n');
            end_block.push_str(end.description.trim());
        }
        push_block(&mut description, &end_block);

        debug!(
            entries = entries.len(),
            points = map_points.len(),
            total_minutes = total_duration.num_minutes(),
            "tour planned"
        );

        Ok(PlannedTour {
            entries,
            map_points,
            total_duration,
            description,
        })
    }
}

/// Appends a text block to the description, blank-line separated. Empty
/// blocks are dropped.
fn push_block(description: &mut String, block: &str) {
    let block = block.trim();
    if block.is_empty() {
        return;
    }
    if !description.is_empty() {
        description.push_str("\n\n");
    }
    description.push_str(block);
}
