//! Domain types for the tour planner.
//!
//! This module contains the core domain model types that represent a
//! validated trail network. Identifiers and durations enforce their
//! invariants at construction time, so code that receives these types
//! can trust their validity.

mod duration;
mod point;
mod tour;
mod track;
mod waypoint;

pub use duration::{InvalidDuration, parse_duration};
pub use point::MapPoint;
pub use tour::{PlannedTour, TourEntry};
pub use track::{TrackIdx, TrackInfo};
pub use waypoint::{InvalidWaypointId, WaypointId, WaypointIdx, WaypointInfo};
