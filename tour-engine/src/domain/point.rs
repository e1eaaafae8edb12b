//! Geographic coordinates.

use serde::Serialize;

/// A point on the map in WGS84 coordinates.
///
/// KML stores coordinates as `longitude,latitude[,altitude]`. Altitude is
/// carried when the document provides it; planning ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Altitude in metres, when the source tuple had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
}

impl MapPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            alt: None,
        }
    }
}
