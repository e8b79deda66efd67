//! Tuning constants shared across the trace and verdict pipeline.
//!
//! The tolerance factors are range-proportional: a trajectory with a larger
//! vertical span tolerates proportionally larger step noise.

/// Maximum number of samples retained by a streaming tracker.
pub const DEFAULT_FRAME_LIMIT: usize = 200;
/// Smallest tolerance applied to position and velocity comparisons.
pub const TOLERANCE_FLOOR: f64 = 1e-6;
/// Fraction of the observed position span treated as step noise.
pub const POSITION_TOLERANCE_FACTOR: f64 = 0.01;
/// Fraction of the observed velocity span treated as step noise.
pub const VELOCITY_TOLERANCE_FACTOR: f64 = 0.05;
/// Upward steps tolerated per downward step before descent dominance fails.
pub const DESCENT_NOISE_DIVISOR: f64 = 5.0;
/// Positive accelerations tolerated per negative one before the gravity
/// check fails.
pub const ACCEL_NOISE_DIVISOR: f64 = 4.0;

/// Substring that marks an entity as the tracked ball.
pub const BALL_NAME_HINT: &str = "ball";

/// Component-type name fragments that strongly suggest positional data.
pub const POSITION_HINTS: [&str; 8] = [
    "position",
    "transform",
    "translation",
    "location",
    "pose",
    "spatial",
    "coords",
    "coordinate",
];

/// Component-type name fragment given a weak positional weight.
pub const VELOCITY_HINT: &str = "velocity";

/// Default spawn height for the demo simulation.
pub const DEFAULT_HEIGHT: f64 = 10.0;
/// Default gravitational acceleration for the demo simulation.
pub const DEFAULT_GRAVITY: f64 = -9.81;
/// Default integration step for the demo simulation.
pub const DEFAULT_DT: f64 = 0.1;
