//! Spark motion
//!
//! Explicit Euler integration with per-axis wall reflection, random drift
//! and a speed cap. Gravity from drag contacts is applied separately, after
//! this step, and is only capped on the following frame.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::Spark;
use crate::consts::{SPARK_DRIFT, SPARK_MAX_SPEED};

/// Advance every spark by `dt` seconds inside a `screen_size` box
pub fn update_physics(
    sparks: &[Spark],
    dt: f32,
    screen_size: Vec2,
    rng: &mut impl RandomSource,
) -> Vec<Spark> {
    sparks
        .iter()
        .map(|spark| step_spark(spark, dt, screen_size, rng))
        .collect()
}

fn step_spark(spark: &Spark, dt: f32, screen_size: Vec2, rng: &mut impl RandomSource) -> Spark {
    let mut pos = spark.pos + spark.vel * dt;
    let mut vel = spark.vel;

    let (x, vx) = reflect_axis(pos.x, vel.x, spark.radius, screen_size.x);
    let (y, vy) = reflect_axis(pos.y, vel.y, spark.radius, screen_size.y);
    pos = Vec2::new(x, y);
    vel = Vec2::new(vx, vy);

    // Brownian drift
    vel.x += (rng.next_unit() - 0.5) * SPARK_DRIFT * dt;
    vel.y += (rng.next_unit() - 0.5) * SPARK_DRIFT * dt;

    Spark {
        pos,
        vel: clamp_speed(vel, SPARK_MAX_SPEED),
        ..spark.clone()
    }
}

/// Keep one coordinate inside `[radius, extent - radius]`, bouncing off the edge
#[inline]
fn reflect_axis(mut p: f32, mut v: f32, radius: f32, extent: f32) -> (f32, f32) {
    if p < radius {
        p = radius;
        v = -v;
    }
    if p > extent - radius {
        p = extent - radius;
        v = -v;
    }
    (p, v)
}

/// Rescale `vel` to `max` if it is faster, keeping its direction
#[inline]
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max {
        vel / speed * max
    } else {
        vel
    }
}
