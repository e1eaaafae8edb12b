//! KML document reading.
//!
//! Reads the subset of KML the tour network format uses: folders with
//! names and descriptions, placemarks, and the geometry kinds that carry
//! map points. Everything else in the document is skipped. Namespace
//! prefixes are ignored, so `gx:Track` and `Track` read the same.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::domain::MapPoint;

/// A parsed KML document, reduced to its folder tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KmlDocument {
    /// Folders directly under `<kml>` / `<Document>`.
    pub folders: Vec<KmlFolder>,
}

/// A `<Folder>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KmlFolder {
    pub name: String,
    /// Raw text of the folder's own `<description>`, newlines preserved.
    pub description: String,
    pub folders: Vec<KmlFolder>,
    pub placemarks: Vec<KmlPlacemark>,
}

/// A `<Placemark>` element with its geometry flattened to map points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KmlPlacemark {
    pub name: String,
    pub description: String,
    /// Points of the placemark's geometry, in document order. Supported
    /// kinds are `LineString`, `gx:Track`, `gx:MultiTrack` (tracks
    /// concatenated) and `MultiGeometry` (recursively flattened); any
    /// other kind contributes no points.
    pub points: Vec<MapPoint>,
}

impl KmlDocument {
    /// Parses a KML string into the folder tree.
    pub fn parse(xml: &str) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        let mut document = KmlDocument::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"kml" | b"Document" => {}
                    b"Folder" => document.folders.push(parse_folder(&mut reader)?),
                    _ => {
                        reader.read_to_end(e.name())?;
                    }
                },
                Event::Empty(e) => {
                    if e.local_name().as_ref() == b"Folder" {
                        document.folders.push(KmlFolder::default());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(document)
    }
}

/// Parse a `<Folder>` and its children. Called after the start tag.
fn parse_folder<'a>(reader: &mut Reader<&'a [u8]>) -> Result<KmlFolder, quick_xml::Error> {
    let mut folder = KmlFolder::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"name" => folder.name = read_text_owned(reader, &e)?,
                b"description" => folder.description = read_text_owned(reader, &e)?,
                b"Folder" => folder.folders.push(parse_folder(reader)?),
                b"Placemark" => folder.placemarks.push(parse_placemark(reader)?),
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"Folder" => folder.folders.push(KmlFolder::default()),
                b"Placemark" => folder.placemarks.push(KmlPlacemark::default()),
                _ => {}
            },
            Event::End(e) if e.local_name().as_ref() == b"Folder" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(folder)
}

/// Parse a `<Placemark>` and its children. Called after the start tag.
fn parse_placemark<'a>(reader: &mut Reader<&'a [u8]>) -> Result<KmlPlacemark, quick_xml::Error> {
    let mut placemark = KmlPlacemark::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"name" => placemark.name = read_text_owned(reader, &e)?,
                b"description" => placemark.description = read_text_owned(reader, &e)?,
                _ => {
                    let mut points = parse_geometry(reader, &e)?;
                    placemark.points.append(&mut points);
                }
            },
            Event::End(e) if e.local_name().as_ref() == b"Placemark" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(placemark)
}

/// Parse one geometry element, flattening it to points. Unsupported
/// geometry kinds are skipped whole and contribute nothing.
fn parse_geometry<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'a>,
) -> Result<Vec<MapPoint>, quick_xml::Error> {
    match start.local_name().as_ref() {
        b"LineString" => parse_line_string(reader, start),
        b"Track" => parse_track(reader, start),
        b"MultiTrack" => parse_multi_track(reader, start),
        b"MultiGeometry" => parse_multi_geometry(reader, start),
        _ => {
            reader.read_to_end(start.name())?;
            Ok(Vec::new())
        }
    }
}

/// `<LineString>`: points come from one `<coordinates>` child holding
/// whitespace-separated `lon,lat[,alt]` tuples.
fn parse_line_string<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'a>,
) -> Result<Vec<MapPoint>, quick_xml::Error> {
    let end_name = start.name().0.to_vec();
    let mut points = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"coordinates" {
                    let text = read_text_owned(reader, &e)?;
                    points.extend(parse_coordinates_text(&text));
                } else {
                    reader.read_to_end(e.name())?;
                }
            }
            Event::End(e) if e.name().0 == end_name.as_slice() => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(points)
}

/// `<gx:Track>`: one point per `<gx:coord>` child, `lon lat [alt]`.
fn parse_track<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'a>,
) -> Result<Vec<MapPoint>, quick_xml::Error> {
    let end_name = start.name().0.to_vec();
    let mut points = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"coord" {
                    let text = read_text_owned(reader, &e)?;
                    if let Some(point) = parse_coord_text(&text) {
                        points.push(point);
                    }
                } else {
                    reader.read_to_end(e.name())?;
                }
            }
            Event::End(e) if e.name().0 == end_name.as_slice() => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(points)
}

/// `<gx:MultiTrack>`: contained tracks concatenated in document order.
fn parse_multi_track<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'a>,
) -> Result<Vec<MapPoint>, quick_xml::Error> {
    let end_name = start.name().0.to_vec();
    let mut points = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"Track" {
                    points.extend(parse_track(reader, &e)?);
                } else {
                    reader.read_to_end(e.name())?;
                }
            }
            Event::End(e) if e.name().0 == end_name.as_slice() => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(points)
}

/// `<MultiGeometry>`: nested geometries recursively flattened.
fn parse_multi_geometry<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'a>,
) -> Result<Vec<MapPoint>, quick_xml::Error> {
    let end_name = start.name().0.to_vec();
    let mut points = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => points.extend(parse_geometry(reader, &e)?),
            Event::End(e) if e.name().0 == end_name.as_slice() => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(points)
}

/// Parses `<coordinates>` text: whitespace-separated `lon,lat[,alt]`
/// tuples. Malformed tuples are dropped.
fn parse_coordinates_text(text: &str) -> Vec<MapPoint> {
    let mut points = Vec::new();
    for tuple in text.split_whitespace() {
        let mut parts = tuple.split(',');
        let lon = parts.next().and_then(|s| s.parse::<f64>().ok());
        let lat = parts.next().and_then(|s| s.parse::<f64>().ok());
        let alt = parts.next().and_then(|s| s.parse::<f64>().ok());
        if let (Some(lon), Some(lat)) = (lon, lat) {
            points.push(MapPoint { lon, lat, alt });
        }
    }
    points
}

/// Parses `<gx:coord>` text: `lon lat [alt]`, space-separated.
fn parse_coord_text(text: &str) -> Option<MapPoint> {
    let mut parts = text.split_whitespace();
    let lon = parts.next()?.parse::<f64>().ok()?;
    let lat = parts.next()?.parse::<f64>().ok()?;
    let alt = parts.next().and_then(|s| s.parse::<f64>().ok());
    Some(MapPoint { lon, lat, alt })
}

/// Collects an element's text content into an owned String, joining
/// plain text, CDATA sections and resolved entity references.
fn read_text_owned<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'_>,
) -> Result<String, quick_xml::Error> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let raw = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                text.push_str(raw);
            }
            Event::CData(e) => {
                let s = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                text.push_str(s);
            }
            Event::GeneralRef(e) => {
                // Character references (&#60; &#x3C;) resolve directly;
                // the predefined entities are mapped by name.
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                } else {
                    let name = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                    match name {
                        "amp" => text.push('&'),
                        "lt" => text.push('<'),
                        "gt" => text.push('>'),
                        "quot" => text.push('"'),
                        "apos" => text.push('\''),
                        _ => {}
                    }
                }
            }
            Event::End(e) if e.name().0 == end_name.as_slice() => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
