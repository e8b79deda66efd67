//! ECS component types exchanged with the host world.
//!
//! The host attaches [`FramePayload`] to entities to deliver snapshots;
//! the verifier publishes [`TraceRecord`], [`VerdictRecord`], and
//! [`VerifierDiagnostics`] back into the world each pass.

use bevy::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::trace::Trace;
use crate::verdict::Verdict;

/// One pending simulation frame, encoded as an opaque JSON payload.
///
/// The verifier consumes and removes this component, so a frame is never
/// processed twice.
#[derive(Component, Debug, Clone, Serialize)]
pub struct FramePayload(pub Value);

/// The published trace record; `None` means no usable signal was found.
#[derive(Component, Debug, Clone, Serialize)]
pub struct TraceRecord(pub Option<Trace>);

/// The published verdict record, replaced in full every pass.
#[derive(Component, Debug, Clone, Serialize)]
pub struct VerdictRecord(pub Verdict);

/// Observability counters published alongside the verdict.
#[derive(Component, Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifierDiagnostics {
    /// Frame components seen by the last ingest pass.
    pub frames_seen: usize,
    /// Samples currently retained by the tracker.
    pub sample_count: usize,
    /// Last tick folded into the tracker.
    pub last_tick: f64,
    /// Entity count of the most recent frame.
    pub entities_in_last_frame: usize,
}
