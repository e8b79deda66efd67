//! Trace types and the batch trace builder.
//!
//! A trace is the extracted single-axis position history of one tracked
//! entity. The batch builder walks a normalised frame sequence once,
//! applying entity selection and axis extraction per frame while carrying
//! the chosen entity and axis forward for continuity. Streaming
//! accumulation lives in [`crate::tracker`].

use serde::Serialize;
use serde_json::Value;

use crate::axis::{extract_position_axes, pick_axis, Axis};
use crate::frames::{frame_entities, frame_tick, normalize_frames};
use crate::selector::select_entity;

/// One scalar observation of the tracked axis at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Frame timestamp the value was observed at.
    pub time: f64,
    /// Position reading along the tracked axis.
    pub value: f64,
    /// Entity the reading came from, when known.
    #[serde(rename = "entityId", skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl Sample {
    /// Convenience constructor for a sample without entity attribution.
    #[must_use]
    pub const fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            entity_id: None,
        }
    }
}

/// The extracted position history of one entity along one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    /// Axis the samples were read from.
    pub axis: Axis,
    /// Entity the trace follows.
    pub entity_id: String,
    /// Display name of the tracked entity, when one was seen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Time-ordered observations; insertion order is time order.
    pub samples: Vec<Sample>,
}

/// Extracts a ball trace from raw batch input.
///
/// The input may be any shape [`normalize_frames`] accepts. Frames where
/// entity selection or axis extraction fails are skipped without aborting
/// the trace; a missing timestamp falls back to the frame index. Returns
/// `None` when fewer than two usable samples exist, signalling "no usable
/// signal" rather than an error.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "Frame indices are far below the f64 integer bound."
)]
pub fn extract_trace(raw: &Value) -> Option<Trace> {
    let frames = normalize_frames(raw);
    let mut chosen_id: Option<String> = None;
    let mut chosen_name: Option<String> = None;
    let mut axis_picked: Option<Axis> = None;
    let mut samples = Vec::new();

    for (index, frame) in frames.iter().enumerate() {
        let entities = frame_entities(frame);
        let Some(ball) = select_entity(chosen_id.as_deref(), &entities) else {
            continue;
        };
        chosen_id = Some(ball.id.clone());
        chosen_name = Some(ball.name.clone());
        let axes = extract_position_axes(ball.components);
        let Some(axis) = pick_axis(axis_picked, &axes) else {
            continue;
        };
        axis_picked = Some(axis);
        let Some(value) = axes.get(axis) else {
            continue;
        };
        let time = frame_tick(frame).unwrap_or(index as f64);
        samples.push(Sample {
            time,
            value,
            entity_id: chosen_id.clone(),
        });
    }

    if samples.len() < 2 {
        return None;
    }
    Some(Trace {
        axis: axis_picked?,
        entity_id: chosen_id?,
        name: chosen_name,
        samples,
    })
}
