//! Tour network document loader.
//!
//! Translates a KML document into waypoint and track entries ready to be
//! applied to the planning engine's graph. Parsing is all-or-nothing: the
//! first structural problem aborts with an error and nothing is returned,
//! so a failed load can never leave a half-populated graph behind.
//!
//! The document must contain two top-level sections, matched by folder
//! name: the waypoints section (named `Waypoints` or `Wegpunkte`) and the
//! tracks section (named `Tracks`). Matching is case-sensitive and the
//! first folder with a matching name wins.

use chrono::Duration;
use tracing::{debug, warn};

use crate::domain::{MapPoint, WaypointId, parse_duration};
use crate::kml::document::{KmlDocument, KmlFolder, KmlPlacemark};
use crate::kml::error::LoadError;
use crate::kml::microformat::{FieldKey, FieldMap};

const WAYPOINT_SECTIONS: [&str; 2] = ["Waypoints", "Wegpunkte"];
const TRACKS_SECTION: [&str; 1] = ["Tracks"];

/// A waypoint entry parsed from the waypoints section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointEntry {
    pub id: WaypointId,
    pub description: String,
}

/// A directed track entry parsed from the tracks section.
///
/// A bidirectional track folder produces two of these, the synthesized
/// reverse entry with endpoints swapped and points reversed.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackEntry {
    pub from: WaypointId,
    pub to: WaypointId,
    pub description: String,
    pub duration: Duration,
    pub points: Vec<MapPoint>,
}

/// Everything a valid tour network document describes.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSpec {
    pub waypoints: Vec<WaypointEntry>,
    pub tracks: Vec<TrackEntry>,
}

/// Parses a tour network document.
pub fn parse_network(xml: &str) -> Result<NetworkSpec, LoadError> {
    let document = KmlDocument::parse(xml)?;

    let waypoint_folder = find_section(&document, &WAYPOINT_SECTIONS)
        .ok_or(LoadError::MissingSection("waypoints"))?;
    let tracks_folder =
        find_section(&document, &TRACKS_SECTION).ok_or(LoadError::MissingSection("tracks"))?;

    let waypoints = parse_waypoints(waypoint_folder);
    let mut tracks = Vec::new();
    for sub in &tracks_folder.folders {
        tracks.extend(parse_track_folder(sub)?);
    }

    debug!(
        waypoints = waypoints.len(),
        tracks = tracks.len(),
        "parsed tour network document"
    );

    Ok(NetworkSpec { waypoints, tracks })
}

fn find_section<'a>(document: &'a KmlDocument, names: &[&str]) -> Option<&'a KmlFolder> {
    document
        .folders
        .iter()
        .find(|folder| names.contains(&folder.name.trim()))
}

/// Waypoint entries come from the section's placemarks. A placemark whose
/// description has no usable `ID` field is skipped, not an error.
fn parse_waypoints(folder: &KmlFolder) -> Vec<WaypointEntry> {
    let mut entries = Vec::new();

    for placemark in &folder.placemarks {
        let fields = FieldMap::parse(&placemark.description);
        let id = match fields.get(FieldKey::Id).map(WaypointId::parse) {
            Some(Ok(id)) => id,
            _ => {
                warn!(
                    placemark = %placemark.name,
                    "skipping waypoint placemark without a usable ID field"
                );
                continue;
            }
        };
        entries.push(WaypointEntry {
            id,
            description: fields.get(FieldKey::Desc).unwrap_or("").to_owned(),
        });
    }

    entries
}

/// One track sub-folder yields one entry, or two when `REVDESC` asks for
/// the reverse direction. The folder's own description carries the
/// fields; the geometry comes from the first placemark inside it.
fn parse_track_folder(folder: &KmlFolder) -> Result<Vec<TrackEntry>, LoadError> {
    let name = folder.name.trim();
    let fields = FieldMap::parse(&folder.description);

    let from = require_id(&fields, FieldKey::From, name)?;
    let to = require_id(&fields, FieldKey::To, name)?;
    let duration = require_duration(&fields, FieldKey::Duration, name)?;
    let description = fields.get(FieldKey::Desc).unwrap_or("").to_owned();

    let points = first_placemark(folder)
        .map(|placemark| placemark.points.clone())
        .unwrap_or_default();
    if points.is_empty() {
        return Err(LoadError::MissingGeometry {
            folder: name.to_owned(),
        });
    }

    let mut entries = vec![TrackEntry {
        from: from.clone(),
        to: to.clone(),
        description,
        duration,
        points: points.clone(),
    }];

    if let Some(rev_description) = fields.get(FieldKey::RevDesc) {
        let rev_duration = require_duration(&fields, FieldKey::RevDuration, name)?;
        let mut rev_points = points;
        rev_points.reverse();
        entries.push(TrackEntry {
            from: to,
            to: from,
            description: rev_description.to_owned(),
            duration: rev_duration,
            points: rev_points,
        });
    }

    Ok(entries)
}

/// First placemark inside a folder, depth-first.
fn first_placemark(folder: &KmlFolder) -> Option<&KmlPlacemark> {
    if let Some(placemark) = folder.placemarks.first() {
        return Some(placemark);
    }
    folder.folders.iter().find_map(first_placemark)
}

fn require_id(fields: &FieldMap, key: FieldKey, folder: &str) -> Result<WaypointId, LoadError> {
    fields
        .get(key)
        .and_then(|value| WaypointId::parse(value).ok())
        .ok_or_else(|| LoadError::MissingField {
            folder: folder.to_owned(),
            field: key,
        })
}

fn require_duration(fields: &FieldMap, key: FieldKey, folder: &str) -> Result<Duration, LoadError> {
    let value = fields.get(key).ok_or_else(|| LoadError::MissingField {
        folder: folder.to_owned(),
        field: key,
    })?;
    let duration = parse_duration(value).map_err(|e| LoadError::InvalidDuration {
        folder: folder.to_owned(),
        field: key,
        value: value.to_owned(),
        reason: e.to_string(),
    })?;
    if duration <= Duration::zero() {
        return Err(LoadError::InvalidDuration {
            folder: folder.to_owned(),
            field: key,
            value: value.to_owned(),
            reason: "must be positive".to_owned(),
        });
    }
    Ok(duration)
}
