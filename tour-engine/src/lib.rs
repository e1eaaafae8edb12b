//! Tour planning engine for trail networks.
//!
//! Loads an annotated KML document describing waypoints and walking
//! tracks into a directed multigraph, then answers planning queries:
//! given an ordered list of waypoint ids, the engine stitches the
//! minimum-duration paths between consecutive waypoints into one tour
//! with map geometry, total duration and a narrative description.

pub mod domain;
pub mod kml;
pub mod planner;
