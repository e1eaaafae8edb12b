//! Tour network document handling.
//!
//! The tour network ships as a KML file with a small line-oriented
//! microformat embedded in description elements. This module reads the
//! KML, runs the microformat over the relevant descriptions and produces
//! the waypoint and track entries the planning engine's graph is built
//! from.

mod document;
mod error;
mod loader;
mod microformat;

pub use document::{KmlDocument, KmlFolder, KmlPlacemark};
pub use error::LoadError;
pub use loader::{NetworkSpec, TrackEntry, WaypointEntry, parse_network};
pub use microformat::{FieldKey, FieldMap};
