//! One-time construction of the helix particle field
//!
//! Two populations share one set: `helix_count` strand particles first, then
//! `rung_group_count * particles_per_rung` rung particles. The shape is fixed
//! by the config; only jitter, phase delays, alpha and mass come from `rng`.

use crate::error::Result;
use crate::params::HelixConfig;
use glam::{Vec3, Vec4};
use helix_physics::constants::*;
use helix_physics::{ParticleSeed, ParticleSet};
use rand::Rng;

/// The two strand colors in linear RGB
#[derive(Debug, Clone, Copy)]
struct Palette {
    blue: Vec3,
    magenta: Vec3,
}

impl Palette {
    fn new() -> Self {
        Self {
            blue: hex_to_linear(STRAND_BLUE),
            magenta: hex_to_linear(STRAND_MAGENTA),
        }
    }

    fn blue<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec4 {
        self.blue.extend(BLUE_ALPHA_MAX * rng.random::<f32>())
    }

    fn magenta<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec4 {
        self.magenta.extend(MAGENTA_ALPHA_MAX * rng.random::<f32>())
    }
}

/// Decode `0xRRGGBB` and convert from sRGB to linear
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Starting brightness for a freshly colored particle.
///
/// A zero alpha falls back to full brightness, and the result is brought
/// into the oscillator's band so the bound holds from the first frame.
fn initial_intensity(alpha: f32) -> f32 {
    let alpha = if alpha == 0.0 { 1.0 } else { alpha };
    alpha.clamp(INTENSITY_MIN, INTENSITY_MAX)
}

/// Signed unit-interval sample in `[-1, 1)`
fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * 2.0 - 1.0
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f32) -> Vec3 {
    Vec3::new(
        signed_unit(rng) * amplitude,
        signed_unit(rng) * amplitude,
        signed_unit(rng) * amplitude,
    )
}

/// Build the full particle field described by `config`
pub fn build<R: Rng + ?Sized>(config: &HelixConfig, rng: &mut R) -> Result<ParticleSet> {
    config.validate()?;

    // validate() already rejected overflow
    let total = config.particle_count().unwrap_or_default();
    let mut set = ParticleSet::with_capacity(total);
    let palette = Palette::new();

    build_strands(config, &palette, rng, &mut set);
    build_rungs(config, &palette, rng, &mut set);

    log::info!(
        "Built helix field: {} particles ({} strand, {} rung in {} groups)",
        set.len(),
        config.helix_count,
        config.rung_particle_count().unwrap_or_default(),
        config.rung_group_count
    );

    Ok(set)
}

fn sample_mass<R: Rng + ?Sized>(config: &HelixConfig, rng: &mut R) -> f32 {
    config.mass_min + rng.random::<f32>() * (config.mass_max - config.mass_min)
}

fn seed<R: Rng + ?Sized>(
    config: &HelixConfig,
    rng: &mut R,
    base_position: Vec3,
    base_angle: f32,
    base_radius: f32,
    color: Vec4,
) -> ParticleSeed {
    let intensity = initial_intensity(color.w);
    ParticleSeed {
        base_position,
        base_angle,
        base_radius,
        phase_delay: (rng.random::<f32>() * 360.0).to_radians(),
        mass: sample_mass(config, rng),
        color: color.truncate().extend(intensity),
        intensity_velocity: signed_unit(rng) * INTENSITY_INITIAL_SPEED,
    }
}

/// Two interleaved strands: odd indices sit half a turn behind even ones
fn build_strands<R: Rng + ?Sized>(
    config: &HelixConfig,
    palette: &Palette,
    rng: &mut R,
    set: &mut ParticleSet,
) {
    let count = config.helix_count;
    let half_length = config.half_length();
    let rotation = config.effective_rotation_degrees();

    for i in 0..count {
        let t = i as f32 / count as f32;

        let amplitude = rng.random::<f32>() * HELIX_JITTER_FACTOR * HELIX_JITTER_SCALE;
        let base_position =
            Vec3::new((t * 2.0 - 1.0) * half_length, 0.0, 0.0) + jitter(rng, amplitude);

        let strand_offset = if i % 2 == 1 { 180.0 } else { 0.0 };
        let base_angle = (t * rotation + strand_offset).to_radians();

        let color = if i % 2 == 0 {
            palette.blue(rng)
        } else {
            palette.magenta(rng)
        };

        set.push(seed(config, rng, base_position, base_angle, HELIX_RADIUS, color));
    }
}

/// Radial cross-sections spanning both strands, colored as a braid
fn build_rungs<R: Rng + ?Sized>(
    config: &HelixConfig,
    palette: &Palette,
    rng: &mut R,
    set: &mut ParticleSet,
) {
    let groups = config.rung_group_count;
    let per_rung = config.particles_per_rung;
    let half_length = config.half_length();
    let rotation = config.effective_rotation_degrees();

    for j in 0..groups {
        let t = j as f32 / groups as f32;
        let x = (t * 2.0 - 1.0) * half_length;
        let base_angle = (t * rotation).to_radians();
        let even_group = j % 2 == 0;

        for k in 0..per_rung {
            let base_position = Vec3::new(x, 0.0, 0.0) + jitter(rng, RUNG_JITTER);
            let base_radius = ((k as f32 / per_rung as f32) * 2.0 - 1.0) * HELIX_RADIUS;

            let left_half = (k as f32) < per_rung as f32 / 2.0;
            let color = if left_half == even_group {
                palette.magenta(rng)
            } else {
                palette.blue(rng)
            };

            set.push(seed(config, rng, base_position, base_angle, base_radius, color));
        }
    }
}
