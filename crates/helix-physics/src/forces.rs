//! Per-particle force terms
//!
//! Pure functions of a single particle's state; the integrator evaluates them
//! independently for every particle.

use crate::constants::*;
use glam::Vec3;
use std::f64::consts::TAU;

/// Time-dependent terms shared by every particle in a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePhase {
    /// Wobble phase (radians, reduced to `[0, 2π)`)
    pub wobble: f32,
    /// Helix rotation (radians, reduced to `[0, 2π)`)
    pub rotation: f32,
}

impl TimePhase {
    /// Derive the frame phases from the accumulated (already slowed) time.
    ///
    /// Reduction happens in f64 so long sessions don't lose precision.
    pub fn from_elapsed(elapsed: f64) -> Self {
        Self {
            wobble: (elapsed * WOBBLE_FREQUENCY).rem_euclid(TAU) as f32,
            rotation: (elapsed * ROTATION_SPEED).rem_euclid(TAU) as f32,
        }
    }
}

/// Where a particle is being pulled to this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalTarget {
    pub position: Vec3,
    /// Rotated angle along the helix
    pub angle: f32,
    /// Radius including this frame's wobble
    pub radius: f32,
}

/// Point on the rotating, breathing helix that a particle springs toward
pub fn orbital_target(
    base_position: Vec3,
    base_angle: f32,
    base_radius: f32,
    phase_delay: f32,
    time: TimePhase,
) -> OrbitalTarget {
    let wobble = (time.wobble + phase_delay).sin() * WOBBLE_AMPLITUDE;
    let angle = base_angle + time.rotation;
    let radius = base_radius + wobble;

    let (sin, cos) = angle.sin_cos();
    let position = base_position
        + Vec3::new(
            wobble,
            sin * ORBIT_SQUASH * radius,
            cos * ORBIT_SQUASH * radius,
        );

    OrbitalTarget {
        position,
        angle,
        radius,
    }
}

/// Hooke spring toward the target
#[inline]
pub fn spring_force(target: Vec3, position: Vec3, stiffness: f32) -> Vec3 {
    (target - position) * stiffness
}

/// Movable spherical push-out field (pointer interaction)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepulsionField {
    pub center: Vec3,
    /// 0 disables the field
    pub radius: f32,
    pub strength: f32,
}

impl RepulsionField {
    pub fn is_active(&self) -> bool {
        self.radius > 0.0
    }
}

/// Repulsion from the field on a particle at `position`
///
/// Inside the radius the push is `d * strength * (radius - |d|) / |d|`, which
/// vanishes at the boundary. A particle sitting on the center (|d|² at or
/// below [`REPULSION_MIN_DIST_SQ`]) gets a fixed `+y` kick of
/// `strength * radius` instead. That kick is a hand-tuned special case, not a
/// physical limit of the falloff above.
pub fn repulsion_force(position: Vec3, field: &RepulsionField) -> Vec3 {
    if !field.is_active() {
        return Vec3::ZERO;
    }

    let d = position - field.center;
    let dist_sq = d.length_squared();

    if dist_sq <= REPULSION_MIN_DIST_SQ {
        return Vec3::new(0.0, field.strength * field.radius, 0.0);
    }

    if dist_sq < field.radius * field.radius {
        let dist = dist_sq.sqrt();
        let inside = field.radius - dist;
        if inside > 0.0 {
            return d * (field.strength * inside / dist);
        }
    }

    Vec3::ZERO
}

/// Multiplicative velocity damping for a step of `dt`, floored at zero
#[inline]
pub fn damping_factor(damping: f32, dt: f32) -> f32 {
    (1.0 - damping * dt).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(radius: f32) -> RepulsionField {
        RepulsionField {
            center: Vec3::ZERO,
            radius,
            strength: REPULSION_STRENGTH,
        }
    }

    #[test]
    fn test_target_at_time_zero() {
        let time = TimePhase::from_elapsed(0.0);
        let target = orbital_target(Vec3::new(5.0, 0.0, 0.0), 0.0, HELIX_RADIUS, 0.0, time);

        // sin(0) = 0: no wobble, angle 0 puts the target on +z
        assert_eq!(target.angle, 0.0);
        assert_eq!(target.radius, HELIX_RADIUS);
        assert!((target.position - Vec3::new(5.0, 0.0, ORBIT_SQUASH * HELIX_RADIUS)).length() < 1e-5);
    }

    #[test]
    fn test_time_phase_wraps() {
        let t = TimePhase::from_elapsed(1.0e7);
        assert!((0.0..std::f32::consts::TAU).contains(&t.wobble));
        assert!((0.0..std::f32::consts::TAU).contains(&t.rotation));
    }

    #[test]
    fn test_spring_points_to_target() {
        let f = spring_force(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, SPRING_STIFFNESS);
        assert_eq!(f, Vec3::new(SPRING_STIFFNESS, 0.0, 0.0));
    }

    #[test]
    fn test_repulsion_disabled() {
        let f = repulsion_force(Vec3::new(0.1, 0.0, 0.0), &field(0.0));
        assert_eq!(f, Vec3::ZERO);
    }

    #[test]
    fn test_repulsion_pushes_outward_and_fades() {
        let near = repulsion_force(Vec3::new(1.0, 0.0, 0.0), &field(10.0));
        let far = repulsion_force(Vec3::new(9.0, 0.0, 0.0), &field(10.0));
        let outside = repulsion_force(Vec3::new(11.0, 0.0, 0.0), &field(10.0));

        assert!(near.x > far.x);
        assert!(far.x > 0.0);
        assert_eq!(outside, Vec3::ZERO);
        // Exactly on the boundary contributes nothing
        assert_eq!(repulsion_force(Vec3::new(10.0, 0.0, 0.0), &field(10.0)), Vec3::ZERO);
    }

    #[test]
    fn test_repulsion_singularity_kicks_up() {
        let f = repulsion_force(Vec3::ZERO, &field(22.0));
        assert_eq!(f, Vec3::new(0.0, REPULSION_STRENGTH * 22.0, 0.0));
        assert!(f.is_finite());
    }

    #[test]
    fn test_repulsion_just_inside_kick_threshold() {
        // |d|² = 9e-6, under REPULSION_MIN_DIST_SQ: still the upward kick
        let position = Vec3::new(0.003, 0.0, 0.0);
        assert!(position.length_squared() <= REPULSION_MIN_DIST_SQ);

        let f = repulsion_force(position, &field(22.0));
        assert_eq!(f, Vec3::new(0.0, REPULSION_STRENGTH * 22.0, 0.0));
    }

    #[test]
    fn test_repulsion_just_outside_kick_threshold() {
        // |d|² = 1.6e-5, over REPULSION_MIN_DIST_SQ: ordinary radial push
        let position = Vec3::new(0.004, 0.0, 0.0);
        assert!(position.length_squared() > REPULSION_MIN_DIST_SQ);

        let f = repulsion_force(position, &field(22.0));
        assert!(f.is_finite());
        assert_eq!(f.y, 0.0);
        assert_eq!(f.z, 0.0);
        let expected = REPULSION_STRENGTH * (22.0 - 0.004);
        assert!((f.x - expected).abs() < 1e-2, "got {}, expected {expected}", f.x);
    }

    #[test]
    fn test_damping_factor_floors_at_zero() {
        assert_eq!(damping_factor(DAMPING, 10.0), 0.0);
        assert!((damping_factor(DAMPING, 0.1) - 0.78).abs() < 1e-6);
    }
}
