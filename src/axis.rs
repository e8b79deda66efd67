//! Vertical-axis inference over duck-typed component payloads.
//!
//! Component naming is supplied by the simulation and carries no schema
//! guarantee, so spatial data is recovered by scanning every payload for
//! plausible axis readings and ranking the candidates by how strongly the
//! component-type name hints at position. Resolution is score plus a
//! stable encounter-order tie-break; no payload shape is special-cased by
//! source type.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::{POSITION_HINTS, VELOCITY_HINT};

/// The spatial axis a trace reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal `x` axis.
    X,
    /// Vertical `y` axis (preferred).
    Y,
    /// Depth `z` axis.
    Z,
    /// Explicit `height` field, treated as its own axis.
    Height,
}

impl Axis {
    /// Axes tried, in order, when no previously selected axis survives.
    const PRIORITY: [Self; 3] = [Self::Y, Self::Height, Self::Z];
}

/// Axis readings recovered from a single component payload.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisSet {
    /// `x` reading, when the payload exposes one.
    pub x: Option<f64>,
    /// `y` reading, when the payload exposes one.
    pub y: Option<f64>,
    /// `z` reading, when the payload exposes one.
    pub z: Option<f64>,
    /// `height` reading, when the payload exposes one.
    pub height: Option<f64>,
}

impl AxisSet {
    /// Returns the reading for `axis`, if present.
    #[must_use]
    pub const fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::Height => self.height,
        }
    }

    /// Whether no axis carries a reading.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none() && self.height.is_none()
    }
}

/// Recovers axis readings from one component payload.
///
/// Sequences map elements 0/1/2 to x/y/z when numeric; keyed structures
/// contribute any case-insensitive `x`/`y`/`z`/`height` key holding a
/// number. Everything else yields an empty set.
#[must_use]
pub fn axes_from_value(payload: &Value) -> AxisSet {
    match payload {
        Value::Array(items) => {
            let mut nums = items.iter().map(Value::as_f64);
            AxisSet {
                x: nums.next().flatten(),
                y: nums.next().flatten(),
                z: nums.next().flatten(),
                height: None,
            }
        }
        Value::Object(map) => {
            let mut axes = AxisSet::default();
            for (key, value) in map {
                let Some(number) = value.as_f64() else {
                    continue;
                };
                match key.to_lowercase().as_str() {
                    "x" => axes.x = Some(number),
                    "y" => axes.y = Some(number),
                    "z" => axes.z = Some(number),
                    "height" => axes.height = Some(number),
                    _ => {}
                }
            }
            axes
        }
        _ => AxisSet::default(),
    }
}

/// Ranks a component-type name's claim to carry positional data.
fn hint_weight(component_type: &str) -> u8 {
    let lowered = component_type.to_lowercase();
    if POSITION_HINTS.iter().any(|hint| lowered.contains(hint)) {
        2
    } else if lowered.contains(VELOCITY_HINT) {
        1
    } else {
        0
    }
}

/// Picks the winning axis-set from an entity's component bag.
///
/// Every payload that yields at least one reading becomes a candidate
/// weighted by [`hint_weight`]; the highest weight wins and ties keep the
/// first-encountered candidate. An empty bag, or one with no spatial data
/// at all, yields an empty set rather than an error.
#[must_use]
pub fn extract_position_axes(components: Option<&Map<String, Value>>) -> AxisSet {
    let mut best: Option<(u8, AxisSet)> = None;
    for (component_type, payload) in components.into_iter().flatten() {
        let axes = axes_from_value(payload);
        if axes.is_empty() {
            continue;
        }
        let weight = hint_weight(component_type);
        // Strictly-greater keeps encounter order on equal weights.
        if best.is_none_or(|(best_weight, _)| weight > best_weight) {
            best = Some((weight, axes));
        }
    }
    best.map_or_else(AxisSet::default, |(_, axes)| axes)
}

/// Chooses which axis of the winning set to sample.
///
/// Continuity comes first: a previously selected axis that is still present
/// keeps reporting, so a later frame growing a `height` field cannot steal
/// the trace from `y`. Otherwise the fixed priority `y`, `height`, `z`
/// applies; a set exposing none of those selects nothing and the frame's
/// sample is dropped.
#[must_use]
pub fn pick_axis(current: Option<Axis>, axes: &AxisSet) -> Option<Axis> {
    if let Some(axis) = current {
        if axes.get(axis).is_some() {
            return Some(axis);
        }
    }
    Axis::PRIORITY.into_iter().find(|axis| axes.get(*axis).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object payload")
    }

    #[rstest]
    fn arrays_map_leading_elements_to_xyz() {
        let axes = axes_from_value(&json!([1.0, 2.0, 3.0, 4.0]));
        assert_relative_eq!(axes.x.expect("x"), 1.0);
        assert_relative_eq!(axes.y.expect("y"), 2.0);
        assert_relative_eq!(axes.z.expect("z"), 3.0);
        assert!(axes.height.is_none());
    }

    #[rstest]
    fn short_or_non_numeric_arrays_degrade_per_element() {
        let axes = axes_from_value(&json!(["north", 5.0]));
        assert!(axes.x.is_none());
        assert_relative_eq!(axes.y.expect("y"), 5.0);
        assert!(axes.z.is_none());
    }

    #[rstest]
    fn keyed_payloads_match_case_insensitively() {
        let axes = axes_from_value(&json!({ "X": 1.5, "Height": 7.0, "label": "ball" }));
        assert_relative_eq!(axes.x.expect("x"), 1.5);
        assert_relative_eq!(axes.height.expect("height"), 7.0);
        assert!(axes.y.is_none());
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!("5,4,3"))]
    #[case(json!({ "vx": true }))]
    fn spatially_silent_payloads_yield_empty_sets(#[case] payload: Value) {
        assert!(axes_from_value(&payload).is_empty());
    }

    #[rstest]
    fn position_hint_outranks_unhinted_component() {
        let components = bag(json!({
            "sprite": { "y": 99.0 },
            "world_transform": { "y": 4.0 },
        }));
        let axes = extract_position_axes(Some(&components));
        assert_relative_eq!(axes.y.expect("y"), 4.0);
    }

    #[rstest]
    fn velocity_hint_outranks_unhinted_component() {
        let components = bag(json!({
            "tint": { "y": 1.0 },
            "velocity": { "y": -3.0 },
        }));
        let axes = extract_position_axes(Some(&components));
        assert_relative_eq!(axes.y.expect("y"), -3.0);
    }

    #[rstest]
    fn equal_weights_keep_the_first_candidate() {
        let components = bag(json!({
            "position": { "y": 10.0 },
            "pose": { "y": 20.0 },
        }));
        let axes = extract_position_axes(Some(&components));
        assert_relative_eq!(axes.y.expect("y"), 10.0);
    }

    #[rstest]
    fn missing_bag_is_not_an_error() {
        assert!(extract_position_axes(None).is_empty());
    }

    #[rstest]
    fn axis_priority_prefers_y_then_height_then_z() {
        let all = AxisSet {
            x: Some(0.0),
            y: Some(1.0),
            z: Some(2.0),
            height: Some(3.0),
        };
        assert_eq!(pick_axis(None, &all), Some(Axis::Y));
        let no_y = AxisSet { y: None, ..all };
        assert_eq!(pick_axis(None, &no_y), Some(Axis::Height));
        let only_xz = AxisSet {
            y: None,
            height: None,
            ..all
        };
        assert_eq!(pick_axis(None, &only_xz), Some(Axis::Z));
        let only_x = AxisSet {
            x: Some(0.0),
            ..AxisSet::default()
        };
        assert_eq!(pick_axis(None, &only_x), None);
    }

    #[rstest]
    fn continuity_keeps_the_previous_axis() {
        let axes = AxisSet {
            y: Some(5.0),
            height: Some(6.0),
            ..AxisSet::default()
        };
        assert_eq!(pick_axis(Some(Axis::Y), &axes), Some(Axis::Y));
    }

    #[rstest]
    fn continuity_yields_when_the_axis_disappears() {
        let axes = AxisSet {
            height: Some(6.0),
            ..AxisSet::default()
        };
        assert_eq!(pick_axis(Some(Axis::Y), &axes), Some(Axis::Height));
    }
}
