//! Deterministic JSON rendering of an extracted outline.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use stratum_extract::Outline;

/// Renders `outline` as pretty-printed JSON with four-space indentation
/// and object keys in lexicographic order, so identical outlines always
/// produce byte-identical output.
pub fn to_json(outline: &Outline) -> Result<String, serde_json::Error> {
    // Going through `Value` sorts every object's keys.
    let value = serde_json::to_value(outline)?;
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(serde::ser::Error::custom)
}
