//! Per-frame simulation step and session orchestration
//!
//! `tick` advances a `GameState` by one display frame without touching the
//! caller's copy. `Session` owns the live state and is the only writer: touch
//! handlers feed its classifier, spawn requests are queued, and everything is
//! applied in a fixed order when the next frame runs.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use super::collision::check_collisions;
use super::field::apply_gravity;
use super::input::{ContactId, InputClassifier};
use super::lantern::update_lantern;
use super::physics::update_physics;
use super::rng::{RandomSource, SimRng};
use super::state::{GameEvent, GamePhase, GameState, InputSnapshot, Spark};
use crate::consts::MAX_FRAME_DT;
use crate::settings::Settings;

/// Everything the outside world contributes to one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Contacts as of this frame
    pub inputs: InputSnapshot,
    /// Positions of taps that landed since the last frame
    pub spawns: Vec<Vec2>,
    /// Wall-clock time (ms), stamped on new sparks
    pub now_ms: f64,
    /// Pause toggle
    pub pause: bool,
}

/// Result of one frame
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Clamp a raw frame delta (seconds) to what the simulation accepts
#[inline]
pub fn clamp_frame_dt(raw: f32) -> f32 {
    if raw.is_nan() || raw <= 0.0 {
        0.0
    } else {
        raw.min(MAX_FRAME_DT)
    }
}

/// Advance the game by one frame of `dt` seconds.
///
/// `dt` must already be clamped (see `clamp_frame_dt`). Order within the
/// frame: inputs and spawns, physics, gravity, lantern, collisions.
pub fn tick(
    state: &GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut impl RandomSource,
    mut on_absorbed: impl FnMut(&Spark, bool),
) -> TickOutput {
    let mut next = state.clone();
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match next.phase {
            GamePhase::Playing => {
                next.phase = GamePhase::Paused;
                return TickOutput { state: next, events };
            }
            GamePhase::Paused => next.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if next.phase != GamePhase::Playing {
        return TickOutput { state: next, events };
    }

    // 1. Inputs
    next.inputs = input.inputs.clone();
    for &pos in &input.spawns {
        let spark = next.spawn_spark(pos, rng, input.now_ms);
        events.push(GameEvent::SparkSpawned {
            id: spark.id,
            pos: spark.pos,
            color: spark.color,
        });
    }

    // 2. Physics
    next.sparks = update_physics(&next.sparks, dt, next.screen_size, rng);
    next.sparks = apply_gravity(&next.sparks, &next.inputs, dt);

    // 3. Lantern
    let from = next.lantern.target_color;
    next.lantern = update_lantern(&next.lantern, dt, rng);
    if next.lantern.target_color != from {
        events.push(GameEvent::TargetColorChanged {
            from,
            to: next.lantern.target_color,
        });
    }

    // 4. Collisions
    let mut next = check_collisions(&next, |spark, success| {
        events.push(GameEvent::SparkAbsorbed {
            id: spark.id,
            color: spark.color,
            success,
        });
        on_absorbed(spark, success);
    });

    next.time_elapsed += dt;

    TickOutput { state: next, events }
}

/// Hook invoked once per absorbed spark
pub type AbsorbCallback = Box<dyn FnMut(&Spark, bool)>;

/// A play session: owns the live state and drives it frame by frame
pub struct Session<R: RandomSource = SimRng> {
    state: GameState,
    classifier: InputClassifier,
    /// Taps waiting for the next frame
    spawn_queue: Rc<RefCell<Vec<Vec2>>>,
    rng: R,
    last_frame_ms: Option<f64>,
    pause_requested: bool,
    on_absorbed: Option<AbsorbCallback>,
    events: Vec<GameEvent>,
}

impl Session<SimRng> {
    /// Session seeded from settings, or randomly when no seed is set
    pub fn from_settings(screen_size: Vec2, settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Session seed {}", seed);
        Self::new(screen_size, SimRng::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Create a session showing the menu
    pub fn new(screen_size: Vec2, rng: R) -> Self {
        let spawn_queue: Rc<RefCell<Vec<Vec2>>> = Rc::new(RefCell::new(Vec::new()));
        let queue = spawn_queue.clone();
        let classifier = InputClassifier::new(move |pos| queue.borrow_mut().push(pos));

        Self {
            state: GameState::new(screen_size),
            classifier,
            spawn_queue,
            rng,
            last_frame_ms: None,
            pause_requested: false,
            on_absorbed: None,
            events: Vec::new(),
        }
    }

    /// Register the absorption hook (audio, haptics, effects)
    pub fn set_on_absorbed(&mut self, hook: impl FnMut(&Spark, bool) + 'static) {
        self.on_absorbed = Some(Box::new(hook));
    }

    /// Begin a fresh session
    pub fn start(&mut self, now_ms: f64) {
        let mut state = GameState::new(self.state.screen_size);
        state.phase = GamePhase::Playing;
        self.state = state;
        self.spawn_queue.borrow_mut().clear();
        self.pause_requested = false;
        self.last_frame_ms = Some(now_ms);
        self.classifier.detach();
        self.classifier.attach();
        log::info!(
            "Session started ({}x{})",
            self.state.screen_size.x,
            self.state.screen_size.y
        );
    }

    /// Return to the menu
    pub fn stop(&mut self) {
        self.leave(GamePhase::Menu);
    }

    /// Finish the session, keeping the final state for display
    pub fn end(&mut self) {
        self.leave(GamePhase::Ended);
    }

    fn leave(&mut self, phase: GamePhase) {
        self.state.phase = phase;
        self.state.inputs.clear();
        self.classifier.detach();
        self.spawn_queue.borrow_mut().clear();
        self.last_frame_ms = None;
        log::info!(
            "Session {:?} (score {}, {:.1}s)",
            phase,
            self.state.score,
            self.state.time_elapsed
        );
    }

    /// Request a pause toggle at the next frame
    pub fn toggle_pause(&mut self) {
        self.pause_requested = !self.pause_requested;
    }

    /// The display changed size
    pub fn resize(&mut self, screen_size: Vec2) {
        self.state.resize(screen_size);
    }

    pub fn contact_start(&mut self, id: ContactId, pos: Vec2, now_ms: f64) {
        self.classifier.contact_start(id, pos, now_ms);
    }

    pub fn contact_move(&mut self, id: ContactId, pos: Vec2) {
        self.classifier.contact_move(id, pos);
    }

    pub fn contact_end(&mut self, id: ContactId) {
        self.classifier.contact_end(id);
    }

    pub fn contact_cancel(&mut self, id: ContactId) {
        self.classifier.contact_cancel(id);
    }

    /// Run one display frame at wall-clock `now_ms`. Returns this frame's events.
    pub fn frame(&mut self, now_ms: f64) -> &[GameEvent] {
        let raw_dt = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        let dt = clamp_frame_dt(raw_dt);

        let input = TickInput {
            inputs: self.classifier.snapshot().clone(),
            spawns: std::mem::take(&mut *self.spawn_queue.borrow_mut()),
            now_ms,
            pause: std::mem::take(&mut self.pause_requested),
        };

        let hook = &mut self.on_absorbed;
        let output = tick(&self.state, &input, dt, &mut self.rng, |spark, success| {
            if let Some(hook) = hook.as_mut() {
                hook(spark, success);
            }
        });

        self.state = output.state;
        self.events = output.events;
        &self.events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn classifier(&self) -> &InputClassifier {
        &self.classifier
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }
}
