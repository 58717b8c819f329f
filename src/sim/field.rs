//! Gravity wells from drag contacts
//!
//! Each active drag pulls sparks within `GRAVITY_RADIUS` toward the finger
//! with a linear falloff. Multiple drags add up.

use super::state::{InputSnapshot, Spark};
use crate::consts::{GRAVITY_DEAD_ZONE, GRAVITY_RADIUS, GRAVITY_SCALE, GRAVITY_STRENGTH};
use crate::direction_to;

/// Velocity added this frame at distance `dist` from a well (zero outside the band)
#[inline]
pub fn pull_strength(dist: f32, dt: f32) -> f32 {
    if dist > GRAVITY_DEAD_ZONE && dist < GRAVITY_RADIUS {
        GRAVITY_STRENGTH * (1.0 - dist / GRAVITY_RADIUS) * GRAVITY_SCALE * dt
    } else {
        0.0
    }
}

/// Pull sparks toward every active drag contact
pub fn apply_gravity(sparks: &[Spark], inputs: &InputSnapshot, dt: f32) -> Vec<Spark> {
    let wells: Vec<_> = inputs
        .values()
        .filter(|input| input.is_gravity_well())
        .map(|input| input.pos)
        .collect();

    if wells.is_empty() {
        return sparks.to_vec();
    }

    sparks
        .iter()
        .map(|spark| {
            let mut vel = spark.vel;
            for &well in &wells {
                if let Some((dir, dist)) = direction_to(spark.pos, well) {
                    vel += dir * pull_strength(dist, dt);
                }
            }
            Spark { vel, ..spark.clone() }
        })
        .collect()
}
