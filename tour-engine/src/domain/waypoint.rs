//! Waypoint types.
//!
//! A `WaypointInfo` is a vertex of the trail network: a named point of
//! interest that tours can start at, pass through, or end at. Waypoints
//! are identified by a stable string id and addressed inside the graph by
//! a dense `WaypointIdx` handle.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid waypoint id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid waypoint id: {reason}")]
pub struct InvalidWaypointId {
    reason: &'static str,
}

/// A validated waypoint identifier.
///
/// Ids come from the `ID` / `FROM` / `TO` fields of the tour network
/// document and from planning requests. Any non-empty string is a valid
/// id; surrounding whitespace is not part of the identity and is trimmed
/// at construction.
///
/// # Examples
///
/// ```
/// use tour_engine::domain::WaypointId;
///
/// let id = WaypointId::parse("trail-rauhkopf").unwrap();
/// assert_eq!(id.as_str(), "trail-rauhkopf");
///
/// // Whitespace is trimmed
/// let id = WaypointId::parse("  trail-rauhkopf\n").unwrap();
/// assert_eq!(id.as_str(), "trail-rauhkopf");
///
/// // Empty and whitespace-only ids are rejected
/// assert!(WaypointId::parse("").is_err());
/// assert!(WaypointId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WaypointId(String);

impl WaypointId {
    /// Parse a waypoint id from a string.
    ///
    /// The input must contain at least one non-whitespace character.
    pub fn parse(s: &str) -> Result<Self, InvalidWaypointId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidWaypointId {
                reason: "must not be empty",
            });
        }

        Ok(WaypointId(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for WaypointId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WaypointId({})", self.0)
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index of a waypoint within the graph's vertex arena.
///
/// Edges reference their endpoints through this handle rather than by id
/// string or pointer, so the graph stays cheap to clone around and free of
/// self-references.
///
/// # Examples
///
/// ```
/// use tour_engine::domain::WaypointIdx;
///
/// let idx = WaypointIdx(0);
/// assert_eq!(idx.0, 0);
///
/// // WaypointIdx is Copy, so it's cheap to pass around
/// let idx2 = idx;
/// assert_eq!(idx, idx2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaypointIdx(pub usize);

impl fmt::Display for WaypointIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for WaypointIdx {
    fn from(value: usize) -> Self {
        WaypointIdx(value)
    }
}

impl From<WaypointIdx> for usize {
    fn from(value: WaypointIdx) -> Self {
        value.0
    }
}

/// A vertex of the trail network.
///
/// Waypoints declared in the document's waypoints section carry a
/// description; waypoints that only ever appear as track endpoints are
/// auto-created with an empty description and act as pass-through nodes
/// with no user-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointInfo {
    /// Stable identifier, unique within a loaded graph.
    pub id: WaypointId,
    /// Optional multi-line description; empty for auto-created waypoints.
    pub description: String,
}

impl WaypointInfo {
    /// Creates a waypoint with a description.
    pub fn new(id: WaypointId, description: String) -> Self {
        Self { id, description }
    }

    /// Creates an intermediate waypoint with no user-facing description.
    pub fn intermediate(id: WaypointId) -> Self {
        Self {
            id,
            description: String::new(),
        }
    }
}
