//! Touch input classification
//!
//! Every contact starts as a tap (the toddler's spawn gesture). Once it has
//! wandered more than `TAP_THRESHOLD` pixels from where it started it is
//! promoted to a drag (the parent's gravity well) for the rest of its life.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::InputSnapshot;
use crate::consts::TAP_THRESHOLD;
use crate::distance;

/// Stable per-contact identifier from the device layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContactId(pub i64);

/// Gesture classification of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Tap,
    Drag,
}

/// One active touch/pointer contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub id: ContactId,
    pub kind: InputKind,
    /// Current position
    pub pos: Vec2,
    /// Where the contact began (never changes)
    pub start_pos: Vec2,
    /// Wall-clock start time (ms)
    pub start_time: f64,
    pub is_active: bool,
}

impl PlayerInput {
    /// True for contacts that pull sparks
    pub fn is_gravity_well(&self) -> bool {
        self.kind == InputKind::Drag && self.is_active
    }
}

/// Callback fired when a new contact lands
pub type SpawnCallback = Box<dyn FnMut(Vec2)>;

/// Tracks live contacts and classifies them as taps or drags
pub struct InputClassifier {
    inputs: InputSnapshot,
    on_spawn: SpawnCallback,
    attached: bool,
}

impl std::fmt::Debug for InputClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputClassifier")
            .field("inputs", &self.inputs)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl InputClassifier {
    /// Create a detached classifier with the given spawn callback
    pub fn new(on_spawn: impl FnMut(Vec2) + 'static) -> Self {
        Self {
            inputs: InputSnapshot::new(),
            on_spawn: Box::new(on_spawn),
            attached: false,
        }
    }

    /// Start accepting contact events
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop accepting contact events and forget tracked contacts
    pub fn detach(&mut self) {
        if self.attached {
            log::debug!("Input detached ({} contacts dropped)", self.inputs.len());
        }
        self.attached = false;
        self.inputs.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// A contact touched down. Registers it as a tap and fires the spawn callback.
    pub fn contact_start(&mut self, id: ContactId, pos: Vec2, now_ms: f64) {
        if !self.attached {
            return;
        }
        self.inputs.insert(
            id,
            PlayerInput {
                id,
                kind: InputKind::Tap,
                pos,
                start_pos: pos,
                start_time: now_ms,
                is_active: true,
            },
        );
        (self.on_spawn)(pos);
    }

    /// A contact moved. Promotes it to a drag once past the tap threshold.
    pub fn contact_move(&mut self, id: ContactId, pos: Vec2) {
        if !self.attached {
            return;
        }
        let Some(input) = self.inputs.get_mut(&id) else {
            return;
        };

        input.pos = pos;

        if input.kind == InputKind::Tap && distance(input.start_pos, pos) > TAP_THRESHOLD {
            input.kind = InputKind::Drag;
            log::debug!("Contact {} promoted to drag", id.0);
        }
    }

    /// A contact lifted. Unknown ids are ignored.
    pub fn contact_end(&mut self, id: ContactId) {
        if !self.attached {
            return;
        }
        self.inputs.remove(&id);
    }

    /// A contact was cancelled by the platform
    pub fn contact_cancel(&mut self, id: ContactId) {
        self.contact_end(id);
    }

    /// Live contacts for this frame
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.inputs
    }

    pub fn get(&self, id: ContactId) -> Option<&PlayerInput> {
        self.inputs.get(&id)
    }
}
