//! Loader error types.

use crate::kml::microformat::FieldKey;

/// Errors that can occur while loading a tour network document.
///
/// Loading is all-or-nothing: any of these aborts the whole load and
/// leaves the engine's graph untouched.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading the input stream failed
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML
    #[error("malformed KML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A required top-level section is absent
    #[error("document has no {0} section")]
    MissingSection(&'static str),

    /// A track folder lacks a required field
    #[error("track folder {folder:?} is missing the {field} field")]
    MissingField { folder: String, field: FieldKey },

    /// A duration field does not parse or is not positive
    #[error("track folder {folder:?} has invalid {field} value {value:?}: {reason}")]
    InvalidDuration {
        folder: String,
        field: FieldKey,
        value: String,
        reason: String,
    },

    /// A track folder's first placemark carries no usable geometry
    #[error("track folder {folder:?} has no map points")]
    MissingGeometry { folder: String },
}
