//! Construction and runtime parameters

use crate::error::{Result, SimulationError};
use glam::Vec3;
use helix_physics::constants::*;
use helix_physics::RepulsionField;

/// Runtime tuning read by the integrator each frame.
///
/// Copied as a snapshot at the start of every step, so host writes between
/// frames never race with the per-particle pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    pub spring_stiffness: f32,
    pub damping: f32,
    pub repulsion_strength: f32,
    pub repulsion_center: Vec3,
    /// 0 disables repulsion
    pub repulsion_radius: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            spring_stiffness: SPRING_STIFFNESS,
            damping: DAMPING,
            repulsion_strength: REPULSION_STRENGTH,
            repulsion_center: Vec3::ZERO,
            repulsion_radius: 0.0,
        }
    }
}

impl SimulationParams {
    pub fn repulsion_field(&self) -> RepulsionField {
        RepulsionField {
            center: self.repulsion_center,
            radius: self.repulsion_radius,
            strength: self.repulsion_strength,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_non_negative("spring_stiffness", self.spring_stiffness)?;
        check_non_negative("damping", self.damping)?;
        check_non_negative("repulsion_strength", self.repulsion_strength)?;
        check_non_negative("repulsion_radius", self.repulsion_radius)?;
        if !self.repulsion_center.is_finite() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "repulsion_center must be finite, got {}",
                self.repulsion_center
            )));
        }
        Ok(())
    }
}

/// Shape of the particle field plus the initial runtime parameters
#[derive(Clone, Debug, PartialEq)]
pub struct HelixConfig {
    /// Particles on the two interleaved strands
    pub helix_count: usize,
    /// Rung cross-sections along the length
    pub rung_group_count: usize,
    pub particles_per_rung: usize,
    /// Scales both the length and the twist of the helix
    pub length_scale: f32,
    /// Twist along the full length before `length_scale` is applied
    pub total_rotation_degrees: f32,
    pub mass_min: f32,
    pub mass_max: f32,
    pub params: SimulationParams,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            helix_count: HELIX_COUNT,
            rung_group_count: RUNG_GROUP_COUNT,
            particles_per_rung: PARTICLES_PER_RUNG,
            length_scale: LENGTH_SCALE,
            total_rotation_degrees: TOTAL_ROTATION_DEGREES,
            mass_min: MASS_MIN,
            mass_max: MASS_MAX,
            params: SimulationParams::default(),
        }
    }
}

impl HelixConfig {
    /// Half length of the field along x
    pub fn half_length(&self) -> f32 {
        BASE_HALF_LENGTH * self.length_scale
    }

    /// Twist actually swept along the length, in degrees
    pub fn effective_rotation_degrees(&self) -> f32 {
        self.total_rotation_degrees * self.length_scale
    }

    pub fn rung_particle_count(&self) -> Option<usize> {
        self.rung_group_count.checked_mul(self.particles_per_rung)
    }

    /// Total particle count, `None` on overflow
    pub fn particle_count(&self) -> Option<usize> {
        self.rung_particle_count()?.checked_add(self.helix_count)
    }

    pub fn validate(&self) -> Result<()> {
        if self.particle_count().is_none() {
            return Err(SimulationError::InvalidConfiguration(
                "particle count overflows usize".to_string(),
            ));
        }
        if !(self.length_scale.is_finite() && self.length_scale > 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "length_scale must be positive and finite, got {}",
                self.length_scale
            )));
        }
        if !self.total_rotation_degrees.is_finite() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "total_rotation_degrees must be finite, got {}",
                self.total_rotation_degrees
            )));
        }
        if !(self.mass_min.is_finite() && self.mass_min > 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "mass_min must be positive and finite, got {}",
                self.mass_min
            )));
        }
        if !(self.mass_max.is_finite() && self.mass_max >= self.mass_min) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "mass_max must be finite and at least mass_min ({}), got {}",
                self.mass_min, self.mass_max
            )));
        }
        self.params.validate()
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidConfiguration(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}
