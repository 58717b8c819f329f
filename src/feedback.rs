//! Audio and haptic feedback planning
//!
//! Turns simulation events into procedural sound and vibration cues. The
//! cues are plain data; a `CueSink` owned by the platform layer plays them.
//! Sink failures are logged and dropped so they never reach the frame loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{GameEvent, RandomSource};

/// C major pentatonic, C4 through C6 (Hz)
pub const PENTATONIC: [f32; 11] = [
    261.63, 293.66, 329.63, 392.00, 440.00, 523.25, 587.33, 659.25, 783.99, 880.00, 1046.50,
];

/// Vibration length on a successful absorption (ms)
pub const SUCCESS_VIBRATION_MS: u32 = 50;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Spark appeared under a tap
    Spawn,
    /// Spark matched the lantern
    Collect,
    /// Spark had the wrong color
    Miss,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// A single feedback action for the platform layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cue {
    /// Oscillator with a linear attack to `peak_gain` and exponential release
    Tone {
        effect: SoundEffect,
        frequency: f32,
        waveform: Waveform,
        peak_gain: f32,
        /// Seconds to reach peak
        attack: f32,
        /// Seconds until the oscillator stops
        duration: f32,
    },
    Vibrate { ms: u32 },
}

/// Failure reported by a platform sink
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),
    #[error("haptics unavailable: {0}")]
    HapticsUnavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

/// Something that can play cues (Web Audio, a native mixer, a log)
pub trait CueSink {
    fn emit(&mut self, cue: &Cue) -> Result<(), FeedbackError>;
}

/// Cues for one event under the given settings
pub fn cues_for(event: &GameEvent, settings: &Settings, rng: &mut impl RandomSource) -> Vec<Cue> {
    let vol = settings.effective_volume();
    let mut cues = Vec::new();

    match event {
        GameEvent::SparkSpawned { .. } => {
            let frequency = PENTATONIC[rng.next_index(PENTATONIC.len())];
            if vol > 0.0 {
                cues.push(Cue::Tone {
                    effect: SoundEffect::Spawn,
                    frequency,
                    waveform: Waveform::Sine,
                    peak_gain: 0.5 * vol,
                    attack: 0.05,
                    duration: 0.6,
                });
            }
        }
        GameEvent::SparkAbsorbed { success: true, .. } => {
            if vol > 0.0 {
                cues.push(Cue::Tone {
                    effect: SoundEffect::Collect,
                    frequency: 1046.50,
                    waveform: Waveform::Triangle,
                    peak_gain: 0.3 * vol,
                    attack: 0.1,
                    duration: 0.5,
                });
            }
            if settings.haptics {
                cues.push(Cue::Vibrate {
                    ms: SUCCESS_VIBRATION_MS,
                });
            }
        }
        GameEvent::SparkAbsorbed { success: false, .. } => {
            if vol > 0.0 {
                cues.push(Cue::Tone {
                    effect: SoundEffect::Miss,
                    frequency: 261.63,
                    waveform: Waveform::Sine,
                    peak_gain: 0.2 * vol,
                    attack: 0.1,
                    duration: 0.5,
                });
            }
        }
        GameEvent::TargetColorChanged { .. } => {}
    }

    cues
}

/// Play cues on `sink`, logging and discarding any failure.
/// Returns how many cues were played.
pub fn dispatch(sink: &mut dyn CueSink, cues: &[Cue]) -> usize {
    let mut played = 0;
    for cue in cues {
        match sink.emit(cue) {
            Ok(()) => played += 1,
            Err(e) => log::warn!("Feedback dropped: {}", e),
        }
    }
    played
}

/// Sink that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: usize,
}

impl CueSink for LogSink {
    fn emit(&mut self, cue: &Cue) -> Result<(), FeedbackError> {
        log::debug!("cue {:?}", cue);
        self.played += 1;
        Ok(())
    }
}
