//! End-to-end tests over the bundled Spitzingsee network fixture.

use chrono::Duration;
use tour_engine::planner::{PlanError, PlanningEngine};

fn load_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{path}")).unwrap()
}

fn loaded_engine() -> PlanningEngine {
    let xml = load_fixture("tour_network.kml");
    let mut engine = PlanningEngine::new();
    engine.load_graph(xml.as_bytes()).unwrap();
    engine
}

#[test]
fn fixture_loads_with_expected_counts() {
    let engine = loaded_engine();

    // Four declared waypoints (the id-less Parkplatz placemark is
    // skipped) plus the auto-created Taubensteinhaus endpoint.
    assert_eq!(engine.waypoint_count(), 5);
    // Three bidirectional folders and two one-way folders.
    assert_eq!(engine.track_count(), 8);
}

#[test]
fn loading_is_deterministic() {
    let first = loaded_engine();
    let second = loaded_engine();

    assert_eq!(first.waypoint_count(), second.waypoint_count());
    assert_eq!(first.track_count(), second.track_count());
}

#[test]
fn find_waypoint_info_after_load() {
    let engine = loaded_engine();

    let rauhkopf = engine.find_waypoint_info("trail-rauhkopf").unwrap();
    assert_eq!(rauhkopf.id.as_str(), "trail-rauhkopf");
    assert!(rauhkopf.description.starts_with("Rauhkopf summit"));

    // Track endpoints never declared as waypoints exist as intermediates.
    let hut = engine.find_waypoint_info("trail-taubensteinhaus").unwrap();
    assert!(hut.description.is_empty());

    assert!(engine.find_waypoint_info("trail-xyz123").is_none());
}

#[test]
fn plans_station_to_summit() {
    let engine = loaded_engine();
    let tour = engine
        .plan_tour(&["trail-bahnhof-neuhaus", "trail-rauhkopf"])
        .unwrap();

    // Saddle ridge route (90m + 60m) beats the lake variant (90+20+75).
    assert_eq!(tour.entries.len(), 2);
    assert_eq!(tour.entries[0].from.as_str(), "trail-bahnhof-neuhaus");
    assert_eq!(tour.entries[0].to.as_str(), "trail-spitzingsattel");
    assert_eq!(tour.entries[1].to.as_str(), "trail-rauhkopf");
    assert_eq!(tour.total_duration, Duration::minutes(150));

    assert_eq!(tour.entries[0].track_start_index, 0);
    assert_eq!(tour.entries[1].track_start_index, 5);
    assert_eq!(tour.map_points.len(), 10);

    assert!(!tour.description.is_empty());
    assert!(tour.description.starts_with("Bahnhof Neuhaus."));
    assert!(tour.description.contains("Spitzingsattel, 1129 m."));
    assert!(tour.description.contains("Ridge route straight to the Rauhkopf"));
    assert!(tour.description.contains("Tour end point:\nRauhkopf summit"));
}

#[test]
fn total_duration_matches_entry_sum() {
    let engine = loaded_engine();
    let tour = engine
        .plan_tour(&[
            "trail-bahnhof-neuhaus",
            "trail-rauhkopf",
            "trail-bahnhof-neuhaus",
        ])
        .unwrap();

    assert_eq!(tour.entries.len(), 5);
    let sum = tour
        .entries
        .iter()
        .fold(Duration::zero(), |acc, e| acc + e.duration);
    assert_eq!(tour.total_duration, sum);
    assert_eq!(tour.total_duration, Duration::minutes(285));
}

#[test]
fn reverse_edges_carry_the_descent() {
    let engine = loaded_engine();
    let tour = engine
        .plan_tour(&["trail-rauhkopf", "trail-bahnhof-neuhaus"])
        .unwrap();

    // The direct ridge route is one-way, so the descent goes via the
    // lake on the synthesized reverse edges: 50m + 25m + 60m.
    assert_eq!(tour.entries.len(), 3);
    assert_eq!(tour.entries[0].to.as_str(), "trail-spitzingsee");
    assert_eq!(tour.total_duration, Duration::minutes(135));

    // Reverse geometry starts at the summit.
    assert_eq!(tour.map_points[0].lon, 11.873);
    assert_eq!(tour.map_points[0].lat, 47.655);
    assert_eq!(tour.map_points[0].alt, Some(1689.0));

    // Start indices are the running point count: 4, then 3, then 5.
    assert_eq!(tour.entries[0].track_start_index, 0);
    assert_eq!(tour.entries[1].track_start_index, 4);
    assert_eq!(tour.entries[2].track_start_index, 7);
    assert_eq!(tour.map_points.len(), 12);
}

#[test]
fn plans_through_an_intermediate_endpoint() {
    let engine = loaded_engine();
    let tour = engine
        .plan_tour(&["trail-spitzingsee", "trail-taubensteinhaus"])
        .unwrap();

    assert_eq!(tour.entries.len(), 2);
    assert_eq!(tour.total_duration, Duration::minutes(115));
    assert_eq!(tour.map_points.len(), 7);
    assert!(tour.description.contains("Tour end point:"));
}

#[test]
fn single_waypoint_fails() {
    let engine = loaded_engine();
    let err = engine.plan_tour(&["trail-bahnhof-neuhaus"]).unwrap_err();

    assert_eq!(err, PlanError::TooFewWaypoints { given: 1 });
    assert!(err.to_string().contains("at least two waypoints"));
}

#[test]
fn unknown_waypoint_fails_naming_it() {
    let engine = loaded_engine();
    let err = engine
        .plan_tour(&["trail-bahnhof-neuhaus", "trail-xyz123"])
        .unwrap_err();

    assert_eq!(err, PlanError::UnknownWaypoint("trail-xyz123".to_owned()));
    assert!(err.to_string().contains("trail-xyz123"));
}

#[test]
fn tour_serializes_for_transport() {
    let engine = loaded_engine();
    let tour = engine
        .plan_tour(&["trail-bahnhof-neuhaus", "trail-rauhkopf"])
        .unwrap();

    let json = serde_json::to_value(&tour).unwrap();
    assert_eq!(json["total_duration_mins"], 150);
    assert_eq!(json["entries"][0]["from"], "trail-bahnhof-neuhaus");
    assert_eq!(json["entries"][0]["duration_mins"], 90);
    assert_eq!(json["entries"][1]["track_start_index"], 5);
    assert_eq!(json["map_points"].as_array().unwrap().len(), 10);
}
