//! Guardians of the Glow - a two-player cooperative touch game
//!
//! One player taps to spawn sparks, the other drags to herd them into a
//! lantern whose target color keeps changing.
//!
//! Core modules:
//! - `sim`: Simulation (input classification, physics, gravity, lantern, collisions)
//! - `feedback`: Audio/haptic cue planning for the presentation layer
//! - `settings`: Player preferences

pub mod feedback;
pub mod settings;
pub mod sim;

pub use feedback::{Cue, CueSink, FeedbackError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Spark collision radius (pixels)
    pub const SPARK_RADIUS: f32 = 15.0;
    /// Spark speed cap (pixels/s), applied at the end of each physics step
    pub const SPARK_MAX_SPEED: f32 = 200.0;
    /// Brownian drift scale: each velocity axis gains `(u - 0.5) * DRIFT * dt`
    pub const SPARK_DRIFT: f32 = 200.0;
    /// Spawn speed is uniform in [MIN, MIN + RANGE)
    pub const SPARK_SPAWN_SPEED_MIN: f32 = 50.0;
    pub const SPARK_SPAWN_SPEED_RANGE: f32 = 50.0;

    /// Lantern defaults
    pub const LANTERN_RADIUS: f32 = 60.0;
    pub const LANTERN_MAX_ENERGY: f32 = 100.0;
    /// Energy lost per second
    pub const LANTERN_DECAY_RATE: f32 = 5.0;
    /// Milliseconds between target color changes
    pub const COLOR_CHANGE_INTERVAL_MS: f32 = 10_000.0;

    /// Absorption effects
    pub const SPARK_ENERGY_VALUE: f32 = 10.0;
    pub const SPARK_SCORE_VALUE: u64 = 10;
    pub const WRONG_COLOR_PENALTY: f32 = 15.0;

    /// Drag gravity well
    pub const GRAVITY_RADIUS: f32 = 150.0;
    pub const GRAVITY_STRENGTH: f32 = 0.5;
    /// Sparks this close to the finger feel no pull
    pub const GRAVITY_DEAD_ZONE: f32 = 10.0;
    pub const GRAVITY_SCALE: f32 = 1000.0;

    /// Movement (pixels) beyond which a touch becomes a drag
    pub const TAP_THRESHOLD: f32 = 10.0;

    /// Largest frame delta handed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Display palette
    pub const COLOR_CYAN: &str = "#00FFFF";
    pub const COLOR_MAGENTA: &str = "#FF00FF";
    pub const COLOR_LIME: &str = "#00FF00";
    pub const COLOR_LANTERN_BG: &str = "#222222";
    pub const COLOR_BG: &str = "#000000";
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector from `from` toward `to`, with the distance between them.
/// Returns `None` when the points coincide.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 {
        Some((delta / dist, dist))
    } else {
        None
    }
}

/// Center of a screen of the given size
#[inline]
pub fn screen_center(size: Vec2) -> Vec2 {
    size * 0.5
}
