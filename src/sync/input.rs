//! Ingest system draining pending frame components into the tracker.

use bevy::prelude::*;
use log::debug;
use serde_json::Value;

use crate::components::FramePayload;
use crate::frames::{frame_entities, frame_tick};

use super::VerifierState;

/// Consumes every pending [`FramePayload`] in the world.
///
/// Payloads are removed from their entities after being read, so a frame
/// is never reprocessed on a later pass. The batch is sorted by tick
/// (missing ticks sort as zero) before being folded into the tracker, so
/// out-of-order delivery within one pass cannot scramble the trace.
pub fn ingest_frames_system(
    mut commands: Commands,
    mut state: ResMut<VerifierState>,
    pending: Query<(Entity, &FramePayload)>,
) {
    let mut frames: Vec<(Entity, Value)> = pending
        .iter()
        .map(|(entity, payload)| (entity, payload.0.clone()))
        .collect();
    state.frames_seen = frames.len();
    for (entity, _) in &frames {
        commands.entity(*entity).remove::<FramePayload>();
    }
    if frames.is_empty() {
        return;
    }
    frames.sort_by(|a, b| sort_tick(&a.1).total_cmp(&sort_tick(&b.1)));

    if let Some((_, last)) = frames.last() {
        state.entities_in_last_frame = frame_entities(last).len();
    }
    for (_, frame) in &frames {
        state.tracker.fold_frame(frame);
    }
    debug!(
        "ingested {} frame(s); {} sample(s) retained",
        frames.len(),
        state.tracker.sample_count()
    );
}

fn sort_tick(frame: &Value) -> f64 {
    frame_tick(frame).unwrap_or(0.0)
}
