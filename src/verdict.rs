//! Trajectory classification: release, descent dominance, and sustained
//! negative acceleration.
//!
//! The verdict is a pure function of the sample sequence. It is recomputed
//! in full on every evaluation, never patched incrementally, and it fails
//! closed: any input too short to classify yields a well-formed negative
//! verdict with a reason string rather than an error.

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::constants::{
    ACCEL_NOISE_DIVISOR, DESCENT_NOISE_DIVISOR, POSITION_TOLERANCE_FACTOR, TOLERANCE_FLOOR,
    VELOCITY_TOLERANCE_FACTOR,
};
use crate::trace::{Sample, Trace};

/// Classified positional steps over the post-release window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DescentTally {
    /// Steps moving clearly downward.
    pub down: usize,
    /// Steps moving clearly upward.
    pub up: usize,
    /// Steps within tolerance of no motion.
    pub flat: usize,
}

/// Classified velocity-delta steps over the post-release window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccelTally {
    /// Velocity deltas clearly below zero.
    pub negative: usize,
    /// Velocity deltas clearly above zero.
    pub positive: usize,
}

/// Adaptive noise thresholds derived from the observed ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tolerances {
    /// Positional step noise threshold.
    pub pos_tol: f64,
    /// Velocity step noise threshold.
    pub vel_tol: f64,
}

/// Structured pass/fail classification of a trace.
///
/// Raw counts and tolerances are included so a caller can audit why a
/// verdict failed, not just read the boolean.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Overall result: release, descent, and acceleration all hold.
    pub ok: bool,
    /// Whether a release event was detected.
    pub release_ok: bool,
    /// Whether downward motion dominates after release.
    pub descent_ok: bool,
    /// Whether negative acceleration dominates after release.
    pub accel_ok: bool,
    /// Index of the first clearly-downward velocity sample.
    pub release_index: Option<usize>,
    /// Positional step counts.
    pub descent: DescentTally,
    /// Velocity-delta step counts.
    pub accel: AccelTally,
    /// Thresholds the counts were classified against.
    pub tolerances: Tolerances,
    /// Number of samples evaluated.
    pub sample_count: usize,
    /// Smallest observed value.
    pub min_value: f64,
    /// Largest observed value.
    pub max_value: f64,
    /// Observed value range.
    pub span: f64,
    /// Human-readable reason when the verdict failed early.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Verdict {
    /// Builds the fail-closed verdict for sequences too short to classify.
    fn insufficient(sample_count: usize) -> Self {
        Self {
            ok: false,
            release_ok: false,
            descent_ok: false,
            accel_ok: false,
            release_index: None,
            descent: DescentTally::default(),
            accel: AccelTally::default(),
            tolerances: Tolerances::default(),
            sample_count,
            min_value: 0.0,
            max_value: 0.0,
            span: 0.0,
            message: Some("insufficient samples".to_owned()),
        }
    }
}

/// Minimum number of samples for velocity-based classification.
const MIN_SAMPLES: usize = 3;

/// Evaluates a trace's sample sequence.
#[must_use]
pub fn evaluate(trace: &Trace) -> Verdict {
    evaluate_samples(&trace.samples)
}

/// Classifies a sample sequence against the three drop criteria.
///
/// Velocities are per-step deltas divided by the time delta, with a zero
/// delta treated as 1 (explicit edge-case policy rather than a division
/// guard to revisit). Tolerances scale with the observed position and
/// velocity ranges. The release index is the first velocity clearly below
/// zero; step tallies run from one sample past it, or from the second
/// sample when no release was found.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "Tally counts stay far below the f64 integer bound."
)]
#[expect(
    clippy::float_cmp,
    reason = "A time delta of exactly zero maps to 1; nearby values divide normally."
)]
pub fn evaluate_samples(samples: &[Sample]) -> Verdict {
    if samples.len() < MIN_SAMPLES {
        return Verdict::insufficient(samples.len());
    }

    let velocities: Vec<f64> = samples
        .iter()
        .zip(samples.iter().skip(1))
        .map(|(prev, next)| {
            let raw_dt = next.time - prev.time;
            let dt = if raw_dt == 0.0 { 1.0 } else { raw_dt };
            (next.value - prev.value) / dt
        })
        .collect();

    let (min_value, max_value, value_span) = value_range(samples.iter().map(|s| s.value));
    let (_, _, velocity_span) = value_range(velocities.iter().copied());
    let tolerances = Tolerances {
        pos_tol: TOLERANCE_FLOOR.max(value_span * POSITION_TOLERANCE_FACTOR),
        vel_tol: TOLERANCE_FLOOR.max(velocity_span * VELOCITY_TOLERANCE_FACTOR),
    };

    let release_index = velocities.iter().position(|&v| v < -tolerances.vel_tol);
    let window_start = release_index.unwrap_or(0);

    let mut descent = DescentTally::default();
    for (prev, next) in samples
        .iter()
        .zip(samples.iter().skip(1))
        .skip(window_start)
    {
        let delta = next.value - prev.value;
        if delta < -tolerances.pos_tol {
            descent.down += 1;
        } else if delta > tolerances.pos_tol {
            descent.up += 1;
        } else {
            descent.flat += 1;
        }
    }

    let mut accel = AccelTally::default();
    for (prev, next) in velocities
        .iter()
        .zip(velocities.iter().skip(1))
        .skip(window_start)
    {
        let delta = next - prev;
        if delta < -tolerances.vel_tol {
            accel.negative += 1;
        } else if delta > tolerances.vel_tol {
            accel.positive += 1;
        }
    }

    let release_ok = release_index.is_some();
    let descent_ok = descent.down > 0
        && (descent.up as f64) <= (descent.down as f64 / DESCENT_NOISE_DIVISOR).max(1.0);
    let accel_ok = accel.negative > 0
        && (accel.positive as f64) <= (accel.negative as f64 / ACCEL_NOISE_DIVISOR).max(1.0);

    Verdict {
        ok: release_ok && descent_ok && accel_ok,
        release_ok,
        descent_ok,
        accel_ok,
        release_index,
        descent,
        accel,
        tolerances,
        sample_count: samples.len(),
        min_value,
        max_value,
        span: value_span,
        message: None,
    }
}

/// Computes `(min, max, span)` over a value sequence using a total float
/// order; an empty sequence collapses to zeroes.
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64, f64) {
    let mut min = OrderedFloat(f64::INFINITY);
    let mut max = OrderedFloat(f64::NEG_INFINITY);
    let mut seen = false;
    for value in values {
        seen = true;
        let wrapped = OrderedFloat(value);
        min = min.min(wrapped);
        max = max.max(wrapped);
    }
    if !seen {
        return (0.0, 0.0, 0.0);
    }
    (
        min.into_inner(),
        max.into_inner(),
        (max - min).into_inner(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn samples_from(points: &[(f64, f64)]) -> Vec<Sample> {
        points.iter().map(|&(t, v)| Sample::new(t, v)).collect()
    }

    #[rstest]
    #[case(&[])]
    #[case(&[(0.0, 10.0)])]
    #[case(&[(0.0, 10.0), (1.0, 9.0)])]
    fn short_sequences_fail_closed(#[case] points: &[(f64, f64)]) {
        let verdict = evaluate_samples(&samples_from(points));
        assert!(!verdict.ok);
        assert!(!verdict.release_ok);
        assert!(!verdict.descent_ok);
        assert!(!verdict.accel_ok);
        assert_eq!(verdict.message.as_deref(), Some("insufficient samples"));
    }

    #[rstest]
    fn accelerating_descent_passes_all_criteria() {
        let samples = samples_from(&[
            (0.0, 10.0),
            (1.0, 9.5),
            (2.0, 8.6),
            (3.0, 7.3),
            (4.0, 5.6),
            (5.0, 3.5),
        ]);
        let verdict = evaluate_samples(&samples);
        assert!(verdict.ok);
        assert!(verdict.release_ok);
        assert!(verdict.descent_ok);
        assert!(verdict.accel_ok);
        assert_eq!(verdict.release_index, Some(0));
        assert_eq!(verdict.descent.down, 5);
        assert_eq!(verdict.descent.up, 0);
        assert_eq!(verdict.accel.negative, 4);
        assert_eq!(verdict.accel.positive, 0);
        assert_relative_eq!(verdict.tolerances.pos_tol, 0.065);
        assert_relative_eq!(verdict.tolerances.vel_tol, 0.08);
        assert_relative_eq!(verdict.span, 6.5);
    }

    #[rstest]
    fn flat_sequence_never_releases() {
        let samples = samples_from(&[(0.0, 5.0), (1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]);
        let verdict = evaluate_samples(&samples);
        assert!(!verdict.release_ok);
        assert!(!verdict.ok);
        assert_eq!(verdict.release_index, None);
        assert_eq!(verdict.descent.flat, 3);
        assert_eq!(verdict.descent.down, 0);
    }

    #[rstest]
    fn single_up_tick_among_many_down_keeps_descent_dominance() {
        let samples = samples_from(&[
            (0.0, 10.0),
            (1.0, 8.7),
            (2.0, 7.2),
            (3.0, 5.5),
            (4.0, 5.9),
            (5.0, 4.0),
            (6.0, 2.0),
            (7.0, 0.5),
        ]);
        let verdict = evaluate_samples(&samples);
        assert_eq!(verdict.descent.down, 6);
        assert_eq!(verdict.descent.up, 1);
        assert!(verdict.descent_ok);
        assert!(verdict.release_ok);
    }

    #[rstest]
    fn evaluation_is_idempotent() {
        let samples = samples_from(&[(0.0, 10.0), (1.0, 9.0), (2.0, 7.0), (3.0, 4.0)]);
        assert_eq!(evaluate_samples(&samples), evaluate_samples(&samples));
    }

    #[rstest]
    fn zero_time_delta_divides_by_one() {
        let samples = samples_from(&[(0.0, 10.0), (0.0, 9.0), (1.0, 7.0), (2.0, 4.0)]);
        let verdict = evaluate_samples(&samples);
        // The first step's dt is zero, so its velocity is the raw delta.
        assert!(verdict.release_ok);
        assert!(verdict.tolerances.vel_tol.is_finite());
        assert!(verdict.ok);
    }

    #[rstest]
    fn audit_fields_describe_the_observed_range() {
        let samples = samples_from(&[(0.0, 3.0), (1.0, 9.0), (2.0, 1.0)]);
        let verdict = evaluate_samples(&samples);
        assert_relative_eq!(verdict.min_value, 1.0);
        assert_relative_eq!(verdict.max_value, 9.0);
        assert_relative_eq!(verdict.span, 8.0);
        assert_eq!(verdict.sample_count, 3);
    }

    #[rstest]
    fn late_release_shifts_the_tally_window() {
        // Rises first, then falls; the tallies start after the release.
        let samples = samples_from(&[
            (0.0, 5.0),
            (1.0, 6.0),
            (2.0, 7.0),
            (3.0, 5.0),
            (4.0, 2.5),
            (5.0, 0.0),
        ]);
        let verdict = evaluate_samples(&samples);
        assert_eq!(verdict.release_index, Some(2));
        assert_eq!(verdict.descent.up, 0);
        assert_eq!(verdict.descent.down, 3);
    }
}
