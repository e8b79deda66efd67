//! Minimal falling-ball simulation used to exercise the verifier end to
//! end.
//!
//! This is deliberately trivial physics: per-step Euler integration of one
//! vertical axis. The ECS plugin feeds [`FramePayload`] frames to the
//! streaming verifier inside the same world; [`run_ball_drop`] produces
//! the equivalent frame batch without an ECS for batch-mode callers and
//! tests.

use bevy::prelude::*;
use serde_json::{json, Map, Value};

use crate::components::FramePayload;
use crate::constants::{DEFAULT_DT, DEFAULT_GRAVITY, DEFAULT_HEIGHT};

/// Vertical position of a simulated body.
#[derive(Component, Debug)]
pub struct VerticalPosition {
    /// Height above the ground plane.
    pub y: f64,
}

/// Vertical velocity of a simulated body.
#[derive(Component, Debug, Default)]
pub struct VerticalVelocity {
    /// Signed vertical speed, negative is downward.
    pub y: f64,
}

/// Constant gravitational acceleration applied to a body.
#[derive(Component, Debug)]
pub struct GravityPull {
    /// Signed vertical acceleration.
    pub y: f64,
}

/// Identifier a body is reported under in snapshot frames.
#[derive(Component, Debug)]
pub struct SimId(pub String);

/// Simulation clock advanced once per step.
#[derive(Resource, Debug, Default)]
pub struct SimClock {
    /// Completed integration steps.
    pub step: usize,
    /// Elapsed simulation time.
    pub time: f64,
}

/// Parameters of a ball-drop run.
#[derive(Resource, Debug, Clone)]
pub struct DropConfig {
    /// Integration steps for batch runs.
    pub steps: usize,
    /// Time advanced per step.
    pub dt: f64,
    /// Spawn height of the ball.
    pub initial_height: f64,
    /// Vertical velocity at spawn.
    pub initial_velocity: f64,
    /// Gravitational acceleration.
    pub gravity: f64,
    /// Steps the ball is held in place before gravity applies.
    pub hold_steps: usize,
    /// Whether the gravity component appears in snapshots.
    pub include_gravity: bool,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            steps: 100,
            dt: DEFAULT_DT,
            initial_height: DEFAULT_HEIGHT,
            initial_velocity: 0.0,
            gravity: DEFAULT_GRAVITY,
            hold_steps: 0,
            include_gravity: true,
        }
    }
}

fn spawn_ball_system(mut commands: Commands, config: Res<DropConfig>) {
    commands.spawn((
        SimId("ball".to_owned()),
        VerticalPosition {
            y: config.initial_height,
        },
        VerticalVelocity {
            y: config.initial_velocity,
        },
        GravityPull { y: config.gravity },
    ));
}

/// Encodes the current world state as one frame and hands it to the
/// verifier as a pending [`FramePayload`].
fn snapshot_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    config: Res<DropConfig>,
    bodies: Query<(
        &SimId,
        &VerticalPosition,
        &VerticalVelocity,
        Option<&GravityPull>,
    )>,
) {
    let mut entities = Map::new();
    for (id, position, velocity, gravity) in &bodies {
        let mut components = Map::new();
        components.insert("position".to_owned(), json!({ "y": position.y }));
        components.insert("velocity".to_owned(), json!({ "y": velocity.y }));
        if config.include_gravity {
            if let Some(pull) = gravity {
                components.insert("gravity".to_owned(), json!({ "y": pull.y }));
            }
        }
        entities.insert(id.0.clone(), Value::Object(components));
    }
    commands.spawn(FramePayload(json!({
        "tick": clock.time,
        "entities": entities,
    })));
}

fn gravity_system(
    clock: Res<SimClock>,
    config: Res<DropConfig>,
    mut bodies: Query<(&mut VerticalVelocity, &GravityPull)>,
) {
    if clock.step < config.hold_steps {
        return;
    }
    for (mut velocity, pull) in &mut bodies {
        velocity.y += pull.y * config.dt;
    }
}

fn motion_system(
    config: Res<DropConfig>,
    mut bodies: Query<(&mut VerticalPosition, &VerticalVelocity)>,
) {
    for (mut position, velocity) in &mut bodies {
        position.y += velocity.y * config.dt;
    }
}

fn advance_clock_system(config: Res<DropConfig>, mut clock: ResMut<SimClock>) {
    clock.step += 1;
    clock.time += config.dt;
}

/// Plugin running the drop simulation and emitting snapshot frames.
#[derive(Default)]
pub struct DropSimulationPlugin {
    /// Run parameters; `steps` is ignored in ECS mode, the schedule drives
    /// the step count.
    pub config: DropConfig,
}

impl Plugin for DropSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());
        app.init_resource::<SimClock>();
        app.add_systems(Startup, spawn_ball_system);
        app.add_systems(
            Update,
            (
                snapshot_system,
                gravity_system,
                motion_system,
                advance_clock_system,
            )
                .chain(),
        );
    }
}

/// Runs a complete ball drop without an ECS, returning `steps + 1` frames
/// (the initial state plus one per step) in the array-entity encoding.
#[must_use]
pub fn run_ball_drop(config: &DropConfig) -> Vec<Value> {
    let mut y = config.initial_height;
    let mut vy = config.initial_velocity;
    let mut time = 0.0;
    let mut frames = Vec::with_capacity(config.steps + 1);
    frames.push(snapshot_frame(time, y, vy, config));
    for step in 0..config.steps {
        if step >= config.hold_steps {
            vy += config.gravity * config.dt;
        }
        y += vy * config.dt;
        time += config.dt;
        frames.push(snapshot_frame(time, y, vy, config));
    }
    frames
}

fn snapshot_frame(time: f64, y: f64, vy: f64, config: &DropConfig) -> Value {
    let mut components = Map::new();
    components.insert("position".to_owned(), json!({ "y": y }));
    components.insert("velocity".to_owned(), json!({ "y": vy }));
    if config.include_gravity {
        components.insert("gravity".to_owned(), json!({ "y": config.gravity }));
    }
    json!({
        "time": time,
        "entities": [
            { "id": "ball", "name": "ball", "components": components },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    use crate::frames::frame_tick;
    use crate::trace::extract_trace;
    use crate::verdict::evaluate;

    #[rstest]
    fn batch_run_emits_initial_frame_plus_one_per_step() {
        let config = DropConfig {
            steps: 10,
            ..DropConfig::default()
        };
        let frames = run_ball_drop(&config);
        assert_eq!(frames.len(), 11);
        assert_relative_eq!(frame_tick(frames.first().expect("frame")).expect("time"), 0.0);
        assert_relative_eq!(
            frame_tick(frames.last().expect("frame")).expect("time"),
            1.0,
            epsilon = 1e-9
        );
    }

    #[rstest]
    fn simulated_drop_satisfies_the_verdict() {
        // Short run: with constant gravity the velocity span grows with the
        // window, and past ~20 steps the adaptive tolerance swallows the
        // per-step delta.
        let frames = run_ball_drop(&DropConfig {
            steps: 15,
            ..DropConfig::default()
        });
        let trace = extract_trace(&serde_json::Value::Array(frames)).expect("trace");
        let verdict = evaluate(&trace);
        assert!(verdict.ok, "verdict failed: {verdict:?}");
    }

    #[rstest]
    fn held_ball_releases_late() {
        let frames = run_ball_drop(&DropConfig {
            steps: 20,
            hold_steps: 8,
            ..DropConfig::default()
        });
        let trace = extract_trace(&serde_json::Value::Array(frames)).expect("trace");
        let verdict = evaluate(&trace);
        assert!(verdict.release_ok);
        assert!(verdict.release_index.expect("release index") > 0);
    }

    #[rstest]
    fn gravity_component_can_be_left_out_of_snapshots() {
        let frames = run_ball_drop(&DropConfig {
            steps: 2,
            include_gravity: false,
            ..DropConfig::default()
        });
        let first = frames.first().expect("frame");
        let entities = crate::frames::frame_entities(first);
        let ball = entities.first().expect("ball");
        let bag = ball.components.expect("components");
        assert!(bag.get("gravity").is_none());
        assert!(bag.get("position").is_some());
    }
}
