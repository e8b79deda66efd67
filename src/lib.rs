//! Plausibility oracle for simulated ball-drop trajectories.
//!
//! Given per-tick world snapshots from a host-controlled simulation, the
//! crate locates the falling ball, extracts its vertical position history,
//! and classifies the trajectory against three criteria: a detected
//! release, a sustained descent, and a sustained negative acceleration.
//! The pipeline is deliberately tolerant: component naming and shape are
//! not known up front, and every input, however degenerate, produces a
//! well-formed verdict rather than an error.

pub mod axis;
pub mod components;
pub mod constants;
pub mod frames;
pub mod logging;
pub mod selector;
pub mod sim;
pub mod sync;
pub mod trace;
pub mod tracker;
pub mod verdict;

pub use constants::*;

// Re-export commonly used items
pub use axis::{extract_position_axes, pick_axis, Axis, AxisSet};
pub use components::{FramePayload, TraceRecord, VerdictRecord, VerifierDiagnostics};
pub use frames::{frame_entities, frame_tick, normalize_frames, parse_ndjson, to_ndjson};
pub use logging::init as init_logging;
pub use selector::select_entity;
pub use sim::{run_ball_drop, DropConfig, DropSimulationPlugin};
pub use sync::{ingest_frames_system, publish_verdict_system, BallDropPlugin, VerifierState};
pub use trace::{extract_trace, Sample, Trace};
pub use tracker::TrackerState;
pub use verdict::{evaluate, evaluate_samples, Verdict};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use plummet::prelude::*;
    //! ```

    pub use crate::axis::Axis;
    pub use crate::components::{FramePayload, TraceRecord, VerdictRecord};
    pub use crate::sync::BallDropPlugin;
    pub use crate::trace::{extract_trace, Sample, Trace};
    pub use crate::tracker::TrackerState;
    pub use crate::verdict::{evaluate_samples, Verdict};
}
