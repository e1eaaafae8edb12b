//! Line-oriented microformat embedded in KML description text.
//!
//! Waypoint and track metadata is encoded inside `<description>` elements
//! as `KEY: value` lines. A line starting with a known key begins a new
//! field; every following line that does not start a field is appended to
//! the current field's text, newline-joined. This allows multi-line
//! descriptions without any escaping. Lines before the first key are
//! ignored, and a repeated key replaces the earlier value.

use std::collections::HashMap;
use std::fmt;

/// The closed set of keys the microformat recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Id,
    Desc,
    From,
    To,
    RevDesc,
    Duration,
    RevDuration,
}

impl FieldKey {
    const ALL: [FieldKey; 7] = [
        FieldKey::Id,
        FieldKey::Desc,
        FieldKey::From,
        FieldKey::To,
        FieldKey::RevDesc,
        FieldKey::Duration,
        FieldKey::RevDuration,
    ];

    /// The label as written in the document, without the colon.
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Id => "ID",
            FieldKey::Desc => "DESC",
            FieldKey::From => "FROM",
            FieldKey::To => "TO",
            FieldKey::RevDesc => "REVDESC",
            FieldKey::Duration => "DURATION",
            FieldKey::RevDuration => "REVDURATION",
        }
    }

    /// Matches a trimmed line against `LABEL:`, returning the key and the
    /// rest of the line after the colon.
    fn match_line(line: &str) -> Option<(FieldKey, &str)> {
        for key in FieldKey::ALL {
            let label = key.label();
            if line.len() > label.len()
                && line.starts_with(label)
                && line.as_bytes()[label.len()] == b':'
            {
                return Some((key, &line[label.len() + 1..]));
            }
        }
        None
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsed microformat fields of one description text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: HashMap<FieldKey, String>,
}

impl FieldMap {
    /// Runs the line state machine over a description text.
    ///
    /// # Examples
    ///
    /// ```
    /// use tour_engine::kml::{FieldKey, FieldMap};
    ///
    /// let fields = FieldMap::parse("ID: trail-rauhkopf\nDESC: Up the saddle,\nthen steeply.");
    /// assert_eq!(fields.get(FieldKey::Id), Some("trail-rauhkopf"));
    /// assert_eq!(fields.get(FieldKey::Desc), Some("Up the saddle,\nthen steeply."));
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut fields = HashMap::new();
        let mut current: Option<(FieldKey, String)> = None;

        for line in text.lines() {
            let line = line.trim();
            if let Some((key, rest)) = FieldKey::match_line(line) {
                if let Some((prev, buf)) = current.take() {
                    commit(&mut fields, prev, buf);
                }
                current = Some((key, rest.trim().to_owned()));
            } else if let Some((_, buf)) = current.as_mut() {
                if !buf.is_empty() {
                    buf.push('\n');
                }
                buf.push_str(line);
            }
            // Lines before the first key carry no field and are dropped.
        }
        if let Some((key, buf)) = current {
            commit(&mut fields, key, buf);
        }

        FieldMap { fields }
    }

    /// Returns the text of a field, if the key appeared.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn commit(fields: &mut HashMap<FieldKey, String>, key: FieldKey, mut buf: String) {
    buf.truncate(buf.trim_end().len());
    fields.insert(key, buf);
}
