//! Frame normalisation for heterogeneous snapshot input.
//!
//! Hosts hand frames over in several encodings: a JSON array of frame
//! objects, a newline-delimited JSON string, or a wrapper object carrying a
//! `frames` array. Everything here degrades to an empty result instead of
//! erroring; a malformed line or an unrecognised shape is simply not a
//! frame.

use serde_json::{Map, Value};

/// One entity's identity and component bag within a single frame.
///
/// The component bag borrows from the frame it was read from; frames are
/// not retained beyond trace extraction.
#[derive(Debug, Clone)]
pub struct FrameEntity<'a> {
    /// Stable identifier used for cross-frame continuity.
    pub id: String,
    /// Display name, falling back to the identifier.
    pub name: String,
    /// Raw component payloads keyed by component-type name, when present.
    pub components: Option<&'a Map<String, Value>>,
}

/// Normalises raw frame input into an ordered sequence of frame objects.
///
/// Accepts an array of frames, an NDJSON string, or an object exposing a
/// `frames` array. Any other shape yields an empty sequence.
#[must_use]
pub fn normalize_frames(raw: &Value) -> Vec<Value> {
    match raw {
        Value::Array(frames) => frames.clone(),
        Value::String(text) => parse_ndjson(text),
        Value::Object(map) => match map.get("frames") {
            Some(Value::Array(frames)) => frames.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Parses newline-delimited JSON, one frame per non-empty line.
///
/// Malformed lines are skipped silently; this is deliberate ingestion
/// policy, not error swallowing to be tightened later.
#[must_use]
pub fn parse_ndjson(text: &str) -> Vec<Value> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

/// Encodes a frame sequence as newline-delimited JSON, one frame per line.
#[must_use]
pub fn to_ndjson(frames: &[Value]) -> String {
    frames
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads a frame's timestamp from its `tick` or `time` field.
#[must_use]
pub fn frame_tick(frame: &Value) -> Option<f64> {
    frame
        .get("tick")
        .and_then(Value::as_f64)
        .or_else(|| frame.get("time").and_then(Value::as_f64))
}

/// Extracts the entities of a frame in encounter order.
///
/// Supports both encodings produced by simulation hosts: a map from entity
/// id to component bag, and an array of records carrying explicit
/// `id`/`name`/`components` fields.
#[must_use]
pub fn frame_entities(frame: &Value) -> Vec<FrameEntity<'_>> {
    match frame.get("entities") {
        Some(Value::Array(list)) => list
            .iter()
            .map(|ent| {
                let id = first_string(ent, &["id", "entityId", "name"]).unwrap_or_default();
                let name = first_string(ent, &["name", "label", "id"])
                    .unwrap_or_else(|| id.clone());
                FrameEntity {
                    id,
                    name,
                    components: ent.get("components").and_then(Value::as_object),
                }
            })
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(id, comps)| FrameEntity {
                id: id.clone(),
                name: id.clone(),
                components: comps.as_object(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Returns the first of `keys` holding a string (or numeric) value.
fn first_string(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match record.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
