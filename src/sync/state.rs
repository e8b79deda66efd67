//! State resource backing the streaming verifier.

use bevy::prelude::*;

use crate::constants::DEFAULT_FRAME_LIMIT;
use crate::tracker::TrackerState;

/// Resource owning the tracker and the result entity.
///
/// Bevy's exclusive resource access guarantees at most one evaluation pass
/// mutates the tracker at a time.
#[derive(Resource)]
pub struct VerifierState {
    pub(crate) tracker: TrackerState,
    /// Entity the trace and verdict records are published onto. Created
    /// lazily on the first publish pass.
    pub(crate) result_entity: Option<Entity>,
    pub(crate) frames_seen: usize,
    pub(crate) entities_in_last_frame: usize,
}

impl Default for VerifierState {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_LIMIT)
    }
}

impl VerifierState {
    /// Creates a verifier state with the given sample window bound.
    #[must_use]
    pub const fn new(frame_limit: usize) -> Self {
        Self {
            tracker: TrackerState::new(frame_limit),
            result_entity: None,
            frames_seen: 0,
            entities_in_last_frame: 0,
        }
    }

    /// Read access to the underlying tracker.
    #[must_use]
    pub const fn tracker(&self) -> &TrackerState {
        &self.tracker
    }

    /// Entity carrying the published records, once one exists.
    #[must_use]
    pub const fn result_entity(&self) -> Option<Entity> {
        self.result_entity
    }
}
