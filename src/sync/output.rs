//! Publish system writing trace and verdict records back into the world.

use bevy::prelude::*;
use log::debug;

use crate::components::{TraceRecord, VerdictRecord, VerifierDiagnostics};

use super::VerifierState;

/// Recomputes the verdict and publishes the records.
///
/// The verdict is always rebuilt in full from the current tracker state,
/// never patched. Records land on a dedicated result entity, created
/// lazily on the first pass, and `insert` replaces whatever the previous
/// pass left there.
pub fn publish_verdict_system(mut commands: Commands, mut state: ResMut<VerifierState>) {
    let trace = state.tracker.current_trace();
    let verdict = state.tracker.verdict();
    let diagnostics = VerifierDiagnostics {
        frames_seen: state.frames_seen,
        sample_count: state.tracker.sample_count(),
        last_tick: state.tracker.last_tick(),
        entities_in_last_frame: state.entities_in_last_frame,
    };
    let result = state
        .result_entity
        .unwrap_or_else(|| commands.spawn_empty().id());
    state.result_entity = Some(result);
    if let Some(reason) = verdict.message.as_deref() {
        debug!("verdict deferred: {reason}");
    }
    commands
        .entity(result)
        .insert((TraceRecord(trace), VerdictRecord(verdict), diagnostics));
}
