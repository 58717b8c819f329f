//! Player preferences
//!
//! Gameplay tuning is fixed in `consts`; these only affect feedback and
//! reproducibility. Stored as JSON by whatever shell hosts the game.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Haptics ===
    /// Vibrate on successful absorption
    pub haptics: bool,

    // === Simulation ===
    /// Fixed RNG seed for reproducible sessions (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.3,
            sfx_volume: 1.0,
            muted: false,
            haptics: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Gain applied to every sound effect
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"seed": 7, "haptics": false}"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.haptics);
        assert_eq!(settings.master_volume, Settings::default().master_volume);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            muted: true,
            seed: Some(42),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        assert!((settings.effective_volume() - 0.25).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
