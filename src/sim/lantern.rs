//! Lantern energy decay and target color cycle

use super::rng::RandomSource;
use super::state::{LanternState, SparkColor};
use crate::consts::{COLOR_CHANGE_INTERVAL_MS, LANTERN_DECAY_RATE, LANTERN_MAX_ENERGY};

/// Re-rolls allowed before falling back to the next color in cycle order
const MAX_COLOR_REROLLS: usize = 32;

/// Clamp an energy value into the lantern's range
#[inline]
pub fn clamp_energy(energy: f32) -> f32 {
    energy.clamp(0.0, LANTERN_MAX_ENERGY)
}

/// Decay energy and advance the color timer by `dt` seconds
pub fn update_lantern(lantern: &LanternState, dt: f32, rng: &mut impl RandomSource) -> LanternState {
    let mut next = lantern.clone();

    next.energy = clamp_energy(lantern.energy - LANTERN_DECAY_RATE * dt);

    next.time_since_color_change += dt * 1000.0;
    if next.time_since_color_change > COLOR_CHANGE_INTERVAL_MS {
        next.time_since_color_change = 0.0;
        next.target_color = pick_new_color(lantern.target_color, rng);
        log::debug!(
            "Lantern color {} -> {}",
            lantern.target_color.as_str(),
            next.target_color.as_str()
        );
    }

    next
}

/// Uniform pick among the colors other than `current`
pub fn pick_new_color(current: SparkColor, rng: &mut impl RandomSource) -> SparkColor {
    for _ in 0..MAX_COLOR_REROLLS {
        let color = SparkColor::random(rng);
        if color != current {
            return color;
        }
    }
    // A degenerate source kept repeating the current color
    current.next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, SimRng};
    use glam::Vec2;
    use proptest::prelude::*;

    fn lantern(energy: f32) -> LanternState {
        LanternState {
            energy,
            ..LanternState::new(Vec2::new(1000.0, 1000.0))
        }
    }

    #[test]
    fn test_energy_decays() {
        let out = update_lantern(&lantern(50.0), 1.0, &mut SimRng::new(1));
        assert!((out.energy - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_energy_floors_at_zero() {
        let out = update_lantern(&lantern(0.2), 0.1, &mut SimRng::new(1));
        assert_eq!(out.energy, 0.0);
    }

    #[test]
    fn test_energy_clamped_to_max() {
        let out = update_lantern(&lantern(140.0), 0.0, &mut SimRng::new(1));
        assert_eq!(out.energy, LANTERN_MAX_ENERGY);
    }

    #[test]
    fn test_timer_accumulates_without_change() {
        let out = update_lantern(&lantern(50.0), 0.1, &mut SimRng::new(1));
        assert!((out.time_since_color_change - 100.0).abs() < 1e-3);
        assert_eq!(out.target_color, SparkColor::Cyan);
    }

    #[test]
    fn test_exact_interval_does_not_change() {
        let mut l = lantern(50.0);
        l.time_since_color_change = COLOR_CHANGE_INTERVAL_MS;
        let out = update_lantern(&l, 0.0, &mut SimRng::new(1));
        assert_eq!(out.target_color, SparkColor::Cyan);
    }

    #[test]
    fn test_color_changes_after_interval() {
        let mut l = lantern(50.0);
        l.time_since_color_change = 9_950.0;
        // first draw is Cyan again (rejected), second is Lime
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        let out = update_lantern(&l, 0.1, &mut rng);
        assert_eq!(out.target_color, SparkColor::Lime);
        assert_eq!(out.time_since_color_change, 0.0);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_degenerate_source_still_changes() {
        let mut rng = ScriptedRandom::constant(0.0);
        assert_eq!(pick_new_color(SparkColor::Cyan, &mut rng), SparkColor::Magenta);
    }

    proptest! {
        #[test]
        fn prop_color_always_changes(seed in any::<u64>(), start in 0usize..3) {
            let mut l = lantern(50.0);
            l.target_color = SparkColor::ALL[start];
            l.time_since_color_change = COLOR_CHANGE_INTERVAL_MS + 1.0;
            let out = update_lantern(&l, 0.016, &mut SimRng::new(seed));
            prop_assert_ne!(out.target_color, l.target_color);
        }

        #[test]
        fn prop_energy_in_range(energy in -50.0f32..200.0, dt in 0.0f32..0.1) {
            let out = update_lantern(&lantern(energy), dt, &mut SimRng::new(9));
            prop_assert!((0.0..=LANTERN_MAX_ENERGY).contains(&out.energy));
        }
    }
}
