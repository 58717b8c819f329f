//! Spark/lantern absorption
//!
//! A spark overlapping the lantern is absorbed: matching colors feed the
//! lantern and score, mismatches drain it.

use glam::Vec2;

use super::lantern::clamp_energy;
use super::state::{GameState, LanternState, Spark};
use crate::consts::{SPARK_ENERGY_VALUE, SPARK_SCORE_VALUE, WRONG_COLOR_PENALTY};
use crate::distance;

/// True if the spark overlaps the lantern
#[inline]
pub fn overlaps(spark_pos: Vec2, spark_radius: f32, lantern: &LanternState) -> bool {
    distance(spark_pos, lantern.pos) < lantern.radius + spark_radius
}

/// Absorb every spark touching the lantern.
///
/// `on_absorbed` fires once per absorbed spark, in collection order, with
/// whether its color matched the lantern's target. Energy is clamped once
/// after all absorptions are applied.
pub fn check_collisions(state: &GameState, mut on_absorbed: impl FnMut(&Spark, bool)) -> GameState {
    let mut energy = state.lantern.energy;
    let mut score = state.score;
    let mut remaining = Vec::with_capacity(state.sparks.len());

    for spark in &state.sparks {
        if !overlaps(spark.pos, spark.radius, &state.lantern) {
            remaining.push(spark.clone());
            continue;
        }

        let success = spark.color == state.lantern.target_color;
        on_absorbed(spark, success);

        if success {
            energy += SPARK_ENERGY_VALUE;
            score += SPARK_SCORE_VALUE;
        } else {
            energy -= WRONG_COLOR_PENALTY;
        }
    }

    let mut next = state.clone();
    next.sparks = remaining;
    next.lantern.energy = clamp_energy(energy);
    next.score = score;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LANTERN_MAX_ENERGY;
    use crate::sim::state::{GamePhase, SparkColor, SparkId};
    use proptest::prelude::*;

    fn spark(id: u32, pos: Vec2, color: SparkColor) -> Spark {
        Spark {
            id: SparkId(id),
            pos,
            vel: Vec2::ZERO,
            color,
            radius: 10.0,
            spawn_time: 0.0,
        }
    }

    fn state_with(sparks: Vec<Spark>, energy: f32) -> GameState {
        let mut state = GameState::new(Vec2::new(1000.0, 1000.0));
        state.phase = GamePhase::Playing;
        state.sparks = sparks;
        state.lantern.pos = Vec2::new(500.0, 500.0);
        state.lantern.radius = 50.0;
        state.lantern.energy = energy;
        state.lantern.target_color = SparkColor::Cyan;
        state
    }

    #[test]
    fn test_correct_color_absorbed() {
        let s = spark(1, Vec2::new(500.0, 500.0), SparkColor::Cyan);
        let state = state_with(vec![s.clone()], 50.0);

        let mut calls = Vec::new();
        let out = check_collisions(&state, |spark, success| calls.push((spark.clone(), success)));

        assert_eq!(calls, vec![(s, true)]);
        assert!(out.sparks.is_empty());
        assert_eq!(out.lantern.energy, 60.0);
        assert_eq!(out.score, 10);
    }

    #[test]
    fn test_wrong_color_penalized() {
        let s = spark(1, Vec2::new(500.0, 500.0), SparkColor::Magenta);
        let state = state_with(vec![s.clone()], 50.0);

        let mut calls = Vec::new();
        let out = check_collisions(&state, |spark, success| calls.push((spark.clone(), success)));

        assert_eq!(calls, vec![(s, false)]);
        assert!(out.sparks.is_empty());
        assert_eq!(out.lantern.energy, 35.0);
        assert_eq!(out.score, 0);
    }

    #[test]
    fn test_input_state_untouched() {
        let state = state_with(vec![spark(1, Vec2::new(500.0, 500.0), SparkColor::Cyan)], 50.0);
        let before = state.clone();
        let _ = check_collisions(&state, |_, _| {});
        assert_eq!(state, before);
    }

    #[test]
    fn test_non_overlapping_kept_in_order() {
        let far_a = spark(1, Vec2::new(100.0, 100.0), SparkColor::Lime);
        let near = spark(2, Vec2::new(530.0, 500.0), SparkColor::Cyan);
        let far_b = spark(3, Vec2::new(900.0, 900.0), SparkColor::Magenta);
        // exactly touching is not an overlap
        let edge = spark(4, Vec2::new(560.0, 500.0), SparkColor::Cyan);
        let state = state_with(vec![far_a.clone(), near, far_b.clone(), edge.clone()], 50.0);

        let mut count = 0;
        let out = check_collisions(&state, |_, _| count += 1);

        assert_eq!(count, 1);
        assert_eq!(out.sparks, vec![far_a, far_b, edge]);
    }

    #[test]
    fn test_bulk_absorption_clamps_once() {
        // 50 + 6*10 overshoots, -15 brings it back to 95 before the clamp
        let mut sparks: Vec<_> = (0..6)
            .map(|i| spark(i, Vec2::new(500.0, 500.0), SparkColor::Cyan))
            .collect();
        sparks.push(spark(6, Vec2::new(500.0, 500.0), SparkColor::Lime));
        let out = check_collisions(&state_with(sparks, 50.0), |_, _| {});
        assert_eq!(out.lantern.energy, 95.0);
        assert_eq!(out.score, 60);

        let sparks: Vec<_> = (0..8)
            .map(|i| spark(i, Vec2::new(500.0, 500.0), SparkColor::Cyan))
            .collect();
        let out = check_collisions(&state_with(sparks, 50.0), |_, _| {});
        assert_eq!(out.lantern.energy, LANTERN_MAX_ENERGY);
    }

    #[test]
    fn test_energy_floor() {
        let sparks = vec![
            spark(1, Vec2::new(500.0, 500.0), SparkColor::Lime),
            spark(2, Vec2::new(500.0, 500.0), SparkColor::Magenta),
        ];
        let out = check_collisions(&state_with(sparks, 20.0), |_, _| {});
        assert_eq!(out.lantern.energy, 0.0);
    }

    proptest! {
        #[test]
        fn prop_energy_stays_in_range(
            energy in 0.0f32..=100.0,
            colors in prop::collection::vec(0usize..3, 0..30),
        ) {
            let sparks = colors
                .iter()
                .enumerate()
                .map(|(i, &c)| spark(i as u32, Vec2::new(500.0, 500.0), SparkColor::ALL[c]))
                .collect();
            let out = check_collisions(&state_with(sparks, energy), |_, _| {});
            prop_assert!((0.0..=LANTERN_MAX_ENERGY).contains(&out.lantern.energy));
            prop_assert!(out.sparks.is_empty());
        }
    }
}
