//! Bevy plugin wiring the verifier systems into the schedule.

use bevy::prelude::*;

use crate::constants::DEFAULT_FRAME_LIMIT;

use super::{ingest_frames_system, publish_verdict_system, VerifierState};

/// Plugin installing the streaming ball-drop verifier.
///
/// Each `Update` pass drains pending frame components, folds them into the
/// tracker, and republishes the trace and verdict records.
pub struct BallDropPlugin {
    /// Maximum number of samples retained by the tracker.
    pub frame_limit: usize,
}

impl Default for BallDropPlugin {
    fn default() -> Self {
        Self {
            frame_limit: DEFAULT_FRAME_LIMIT,
        }
    }
}

impl Plugin for BallDropPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(VerifierState::new(self.frame_limit));
        app.add_systems(
            Update,
            (ingest_frames_system, publish_verdict_system).chain(),
        );
    }
}
