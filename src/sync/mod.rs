//! Host integration: streaming verification inside a Bevy world.
//!
//! The host delivers frames by attaching [`crate::components::FramePayload`]
//! to entities; each schedule pass the ingest system drains and removes
//! them, and the publish system replaces the trace and verdict records on
//! a dedicated result entity.

mod input;
mod output;
mod plugin;
mod state;

pub use input::ingest_frames_system;
pub use output::publish_verdict_system;
pub use plugin::BallDropPlugin;
pub use state::VerifierState;
