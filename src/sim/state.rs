//! Game state and core simulation types
//!
//! One `GameState` is live per session. It is replaced wholesale when a new
//! session starts.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::{ContactId, PlayerInput};
use super::rng::RandomSource;
use crate::consts::*;
use crate::screen_center;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start overlay is showing
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Session finished
    Ended,
}

/// Spark / lantern colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SparkColor {
    Cyan,
    Magenta,
    Lime,
}

impl SparkColor {
    pub const ALL: [SparkColor; 3] = [SparkColor::Cyan, SparkColor::Magenta, SparkColor::Lime];

    /// Uniform pick from the three colors
    pub fn random(rng: &mut impl RandomSource) -> Self {
        Self::ALL[rng.next_index(Self::ALL.len())]
    }

    /// The color after this one in cycle order
    pub fn next(self) -> Self {
        match self {
            SparkColor::Cyan => SparkColor::Magenta,
            SparkColor::Magenta => SparkColor::Lime,
            SparkColor::Lime => SparkColor::Cyan,
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            SparkColor::Cyan => COLOR_CYAN,
            SparkColor::Magenta => COLOR_MAGENTA,
            SparkColor::Lime => COLOR_LIME,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SparkColor::Cyan => "CYAN",
            SparkColor::Magenta => "MAGENTA",
            SparkColor::Lime => "LIME",
        }
    }
}

/// Opaque spark identifier, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SparkId(pub u32);

/// A light particle spawned by a tap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spark {
    pub id: SparkId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: SparkColor,
    pub radius: f32,
    /// Wall-clock spawn time (ms)
    pub spawn_time: f64,
}

impl Spark {
    /// Create a spark at `pos` with a random heading, speed and color
    pub fn spawn(id: SparkId, pos: Vec2, rng: &mut impl RandomSource, now_ms: f64) -> Self {
        let angle = rng.next_unit() * std::f32::consts::TAU;
        let speed = SPARK_SPAWN_SPEED_MIN + rng.next_unit() * SPARK_SPAWN_SPEED_RANGE;
        Self {
            id,
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color: SparkColor::random(rng),
            radius: SPARK_RADIUS,
            spawn_time: now_ms,
        }
    }
}

/// The stationary collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanternState {
    pub pos: Vec2,
    pub radius: f32,
    pub target_color: SparkColor,
    /// Energy reserve in [0, LANTERN_MAX_ENERGY]
    pub energy: f32,
    /// Milliseconds accumulated since the last color change
    pub time_since_color_change: f32,
}

impl LanternState {
    /// Fresh lantern centered on a screen of the given size
    pub fn new(screen_size: Vec2) -> Self {
        Self {
            pos: screen_center(screen_size),
            radius: LANTERN_RADIUS,
            target_color: SparkColor::Cyan,
            energy: LANTERN_MAX_ENERGY,
            time_since_color_change: 0.0,
        }
    }

    /// Energy as a fraction of the maximum (0-1)
    pub fn charge(&self) -> f32 {
        self.energy / LANTERN_MAX_ENERGY
    }
}

/// Something that happened during a frame, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SparkSpawned { id: SparkId, pos: Vec2, color: SparkColor },
    SparkAbsorbed { id: SparkId, color: SparkColor, success: bool },
    TargetColorChanged { from: SparkColor, to: SparkColor },
}

/// Active touch contacts keyed by contact id
pub type InputSnapshot = BTreeMap<ContactId, PlayerInput>;

/// Complete game state for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Active sparks in spawn order
    pub sparks: Vec<Spark>,
    pub lantern: LanternState,
    /// Contacts as of the current frame
    pub inputs: InputSnapshot,
    pub score: u64,
    /// Seconds of gameplay
    pub time_elapsed: f32,
    pub screen_size: Vec2,
    /// Next spark id
    next_id: u32,
}

impl GameState {
    /// Create a new game state for a screen of the given size
    pub fn new(screen_size: Vec2) -> Self {
        Self {
            phase: GamePhase::Menu,
            sparks: Vec::new(),
            lantern: LanternState::new(screen_size),
            inputs: InputSnapshot::new(),
            score: 0,
            time_elapsed: 0.0,
            screen_size,
            next_id: 1,
        }
    }

    /// Allocate a new spark ID
    pub fn next_spark_id(&mut self) -> SparkId {
        let id = SparkId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a spark at `pos` and return a copy of it
    pub fn spawn_spark(&mut self, pos: Vec2, rng: &mut impl RandomSource, now_ms: f64) -> Spark {
        let id = self.next_spark_id();
        let spark = Spark::spawn(id, pos, rng, now_ms);
        self.sparks.push(spark.clone());
        spark
    }

    /// Apply a new screen size; the lantern stays centered
    pub fn resize(&mut self, screen_size: Vec2) {
        self.screen_size = screen_size;
        self.lantern.pos = screen_center(screen_size);
    }
}
