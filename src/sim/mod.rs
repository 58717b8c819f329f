//! Simulation module
//!
//! All gameplay logic lives here. Rules for this module:
//! - Every per-frame step takes state by reference and returns a new value
//! - All randomness comes through `RandomSource`
//! - Stable iteration order (sparks in spawn order, contacts by id)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod field;
pub mod input;
pub mod lantern;
pub mod physics;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{check_collisions, overlaps};
pub use field::{apply_gravity, pull_strength};
pub use input::{ContactId, InputClassifier, InputKind, PlayerInput};
pub use lantern::{clamp_energy, pick_new_color, update_lantern};
pub use physics::{clamp_speed, update_physics};
pub use rng::{RandomSource, ScriptedRandom, SimRng};
pub use state::{
    GameEvent, GamePhase, GameState, InputSnapshot, LanternState, Spark, SparkColor, SparkId,
};
pub use tick::{Session, TickInput, TickOutput, clamp_frame_dt, tick};
