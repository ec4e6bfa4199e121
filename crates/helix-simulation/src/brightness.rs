//! Twinkle: an independent brightness random walk per particle
//!
//! Each frame a handful of particles get a freshly rolled brightness
//! velocity, then every particle drifts and bounces off the
//! `[INTENSITY_MIN, INTENSITY_MAX]` band. Only the brightness buffers are
//! touched; they are what the color alpha reports.

use helix_physics::constants::*;
use helix_physics::{BrightnessMut, ParticleSet};
use rand::Rng;

/// How many particles get re-kicked per frame
pub fn kick_count(particle_count: usize) -> usize {
    if particle_count == 0 {
        return 0;
    }
    ((particle_count as f32 * INTENSITY_KICK_FRACTION) as usize).max(1)
}

/// Brightness velocity in `[-INTENSITY_KICK_SPEED, INTENSITY_KICK_SPEED]`
fn kick_velocity<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let speed = rng.random::<f32>() * INTENSITY_KICK_SPEED;
    if rng.random::<bool>() {
        speed
    } else {
        -speed
    }
}

/// Move `intensity` by `velocity * dt`, reflecting off the band edges.
///
/// Returns the new `(intensity, velocity)`; at an edge the velocity keeps its
/// magnitude and points back into the band.
#[inline]
pub fn reflect_step(intensity: f32, velocity: f32, dt: f32) -> (f32, f32) {
    let next = intensity + velocity * dt;
    if next > INTENSITY_MAX {
        (INTENSITY_MAX, -velocity.abs())
    } else if next < INTENSITY_MIN {
        (INTENSITY_MIN, velocity.abs())
    } else {
        (next, velocity)
    }
}

/// Advance the brightness of every particle in `set` by `dt`
pub fn oscillate<R: Rng + ?Sized>(set: &mut ParticleSet, rng: &mut R, dt: f32) {
    let count = set.len();
    let BrightnessMut {
        intensities,
        intensity_velocities,
    } = set.brightness_mut();

    for _ in 0..kick_count(count) {
        let index = rng.random_range(0..count);
        intensity_velocities[index] = kick_velocity(rng);
    }

    for (intensity, velocity) in intensities.iter_mut().zip(intensity_velocities.iter_mut()) {
        let (next, next_velocity) = reflect_step(*intensity, *velocity, dt);
        *intensity = next;
        *velocity = next_velocity;
    }
}
