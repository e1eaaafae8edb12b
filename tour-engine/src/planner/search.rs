//! Shortest-path search over the trail network.
//!
//! Classic label-setting search (Dijkstra) with edge weight equal to the
//! track duration in minutes. Returns the edge handles of a minimum-
//! weight path; tie-breaking among equal-cost paths is unspecified.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::domain::{TrackIdx, WaypointIdx};
use crate::planner::graph::TourGraph;

/// Finds a minimum-duration path from `source` to `target`.
///
/// Returns the traversed edges in walking order, the empty path when
/// `source == target`, or `None` when `target` is unreachable.
pub(crate) fn shortest_path(
    graph: &TourGraph,
    source: WaypointIdx,
    target: WaypointIdx,
) -> Option<Vec<TrackIdx>> {
    if source == target {
        return Some(Vec::new());
    }

    let n = graph.waypoint_count();
    let mut dist = vec![i64::MAX; n];
    let mut prev: Vec<Option<TrackIdx>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[source.0] = 0;
    heap.push(Reverse((0i64, source.0)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if d > dist[u] {
            // Stale heap entry, already settled cheaper.
            continue;
        }
        if u == target.0 {
            break;
        }
        for &edge_idx in graph.outgoing(WaypointIdx(u)) {
            let track = graph.track(edge_idx);
            let weight = track.duration.num_minutes().max(0);
            let next = d.saturating_add(weight);
            let v = track.to.0;
            if next < dist[v] {
                dist[v] = next;
                prev[v] = Some(edge_idx);
                heap.push(Reverse((next, v)));
            }
        }
    }

    if dist[target.0] == i64::MAX {
        return None;
    }

    // Walk the predecessor chain back to the source. A finite distance
    // guarantees the chain exists and is acyclic.
    let mut path = Vec::new();
    let mut v = target.0;
    while v != source.0 {
        let edge_idx = prev[v]?;
        path.push(edge_idx);
        v = graph.track(edge_idx).from.0;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::domain::{MapPoint, TrackInfo, WaypointId};

    fn graph_with(ids: &[&str]) -> (TourGraph, Vec<WaypointIdx>) {
        let mut graph = TourGraph::new();
        let handles = ids
            .iter()
            .map(|id| graph.find_or_create(&WaypointId::parse(id).unwrap()))
            .collect();
        (graph, handles)
    }

    fn connect(graph: &mut TourGraph, from: WaypointIdx, to: WaypointIdx, minutes: i64) -> TrackIdx {
        graph.add_track(TrackInfo::new(
            from,
            to,
            String::new(),
            Duration::minutes(minutes),
            vec![MapPoint::new(0.0, 0.0)],
        ))
    }

    #[test]
    fn direct_edge() {
        let (mut graph, h) = graph_with(&["a", "b"]);
        let ab = connect(&mut graph, h[0], h[1], 30);

        assert_eq!(shortest_path(&graph, h[0], h[1]), Some(vec![ab]));
    }

    #[test]
    fn same_vertex_is_the_empty_path() {
        let (graph, h) = graph_with(&["a"]);
        assert_eq!(shortest_path(&graph, h[0], h[0]), Some(Vec::new()));
    }

    #[test]
    fn unreachable_is_none() {
        let (mut graph, h) = graph_with(&["a", "b", "c"]);
        connect(&mut graph, h[0], h[1], 30);

        assert_eq!(shortest_path(&graph, h[0], h[2]), None);
    }

    #[test]
    fn edges_are_directed() {
        let (mut graph, h) = graph_with(&["a", "b"]);
        connect(&mut graph, h[0], h[1], 30);

        assert_eq!(shortest_path(&graph, h[1], h[0]), None);
    }

    #[test]
    fn picks_cheaper_parallel_edge() {
        let (mut graph, h) = graph_with(&["a", "b"]);
        connect(&mut graph, h[0], h[1], 60);
        let short = connect(&mut graph, h[0], h[1], 20);

        assert_eq!(shortest_path(&graph, h[0], h[1]), Some(vec![short]));
    }

    #[test]
    fn detour_wins_over_expensive_direct_edge() {
        let (mut graph, h) = graph_with(&["a", "b", "c"]);
        connect(&mut graph, h[0], h[2], 120);
        let ab = connect(&mut graph, h[0], h[1], 30);
        let bc = connect(&mut graph, h[1], h[2], 30);

        assert_eq!(shortest_path(&graph, h[0], h[2]), Some(vec![ab, bc]));
    }

    #[test]
    fn hours_and_minutes_share_one_scale() {
        let (mut graph, h) = graph_with(&["a", "b"]);
        let two_hours = graph.add_track(TrackInfo::new(
            h[0],
            h[1],
            String::new(),
            Duration::hours(2),
            vec![MapPoint::new(0.0, 0.0)],
        ));
        connect(&mut graph, h[0], h[1], 121);

        assert_eq!(shortest_path(&graph, h[0], h[1]), Some(vec![two_hours]));
    }

    #[test]
    fn long_chain() {
        let ids = ["a", "b", "c", "d", "e"];
        let (mut graph, h) = graph_with(&ids);
        let mut edges = Vec::new();
        for pair in h.windows(2) {
            edges.push(connect(&mut graph, pair[0], pair[1], 10));
        }

        assert_eq!(shortest_path(&graph, h[0], h[4]), Some(edges));
    }
}
