//! Spring-damper integrator
//!
//! Semi-implicit Euler over every particle: spring toward the orbital target,
//! optional repulsion, `a = F / m`, damp the velocity, then move. Particles
//! don't interact, so the pass runs in parallel over the buffers.

use crate::params::SimulationParams;
use glam::Vec3;
use helix_physics::{
    damping_factor, orbital_target, repulsion_force, spring_force, KinematicsMut, OrbitalTarget,
    ParticleSet, RepulsionField, TimePhase,
};
use rayon::prelude::*;

/// Read-only inputs for one integration pass
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs {
    pub time: TimePhase,
    pub dt: f32,
    pub spring_stiffness: f32,
    pub damping: f32,
    pub repulsion: RepulsionField,
}

impl FrameInputs {
    pub fn new(params: &SimulationParams, time: TimePhase, dt: f32) -> Self {
        Self {
            time,
            dt,
            spring_stiffness: params.spring_stiffness,
            damping: params.damping,
            repulsion: params.repulsion_field(),
        }
    }
}

/// Result of advancing one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleUpdate {
    pub position: Vec3,
    pub velocity: Vec3,
    pub target: OrbitalTarget,
}

/// Advance a single particle by `inputs.dt`
#[inline]
pub fn advance_particle(
    target: OrbitalTarget,
    position: Vec3,
    velocity: Vec3,
    mass: f32,
    inputs: &FrameInputs,
) -> ParticleUpdate {
    let force = spring_force(target.position, position, inputs.spring_stiffness)
        + repulsion_force(position, &inputs.repulsion);

    let acceleration = force / mass;
    let velocity =
        (velocity + acceleration * inputs.dt) * damping_factor(inputs.damping, inputs.dt);

    ParticleUpdate {
        position: position + velocity * inputs.dt,
        velocity,
        target,
    }
}

/// Advance every particle in `set`
pub fn integrate(set: &mut ParticleSet, inputs: FrameInputs) {
    let KinematicsMut {
        base_positions,
        base_angles,
        base_radii,
        phase_delays,
        masses,
        positions,
        velocities,
        angles,
        radii,
    } = set.kinematics_mut();

    positions
        .par_iter_mut()
        .zip(velocities.par_iter_mut())
        .zip(angles.par_iter_mut())
        .zip(radii.par_iter_mut())
        .enumerate()
        .for_each(|(i, (((position, velocity), angle), radius))| {
            let target = orbital_target(
                base_positions[i],
                base_angles[i],
                base_radii[i],
                phase_delays[i],
                inputs.time,
            );
            let update = advance_particle(target, *position, *velocity, masses[i], &inputs);

            *position = update.position;
            *velocity = update.velocity;
            *angle = update.target.angle;
            *radius = update.target.radius;
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use helix_physics::constants::*;
    use helix_physics::ParticleSeed;

    fn inputs(dt: f32) -> FrameInputs {
        FrameInputs::new(&SimulationParams::default(), TimePhase::from_elapsed(0.0), dt)
    }

    fn target_at(position: Vec3) -> OrbitalTarget {
        OrbitalTarget {
            position,
            angle: 0.0,
            radius: HELIX_RADIUS,
        }
    }

    #[test]
    fn test_at_rest_on_target_stays_put() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let update = advance_particle(target_at(p), p, Vec3::ZERO, 1.0, &inputs(1.0 / 60.0));
        assert_eq!(update.position, p);
        assert_eq!(update.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_heavier_particles_accelerate_less() {
        let target = target_at(Vec3::new(1.0, 0.0, 0.0));
        let light = advance_particle(target, Vec3::ZERO, Vec3::ZERO, 0.7, &inputs(0.01));
        let heavy = advance_particle(target, Vec3::ZERO, Vec3::ZERO, 1.3, &inputs(0.01));
        assert!(light.velocity.x > heavy.velocity.x);
        assert!(heavy.velocity.x > 0.0);
    }

    #[test]
    fn test_huge_dt_is_fully_damped() {
        let target = target_at(Vec3::new(100.0, 0.0, 0.0));
        let update = advance_particle(target, Vec3::ZERO, Vec3::splat(5.0), 1.0, &inputs(10.0));
        assert_eq!(update.velocity, Vec3::ZERO);
        assert_eq!(update.position, Vec3::ZERO);
    }

    #[test]
    fn test_integrate_records_angle_and_radius() {
        let mut set = ParticleSet::with_capacity(1);
        set.push(ParticleSeed {
            base_position: Vec3::ZERO,
            base_angle: 0.25,
            base_radius: HELIX_RADIUS,
            phase_delay: std::f32::consts::FRAC_PI_2,
            mass: 1.0,
            color: Vec4::ONE,
            intensity_velocity: 0.0,
        });

        let time = TimePhase {
            wobble: 0.0,
            rotation: 0.5,
        };
        integrate(
            &mut set,
            FrameInputs::new(&SimulationParams::default(), time, 1.0 / 60.0),
        );

        assert!((set.angle_of(0).unwrap() - 0.75).abs() < 1e-6);
        // sin(π/2) * 0.5 wobble on top of the nominal radius
        assert!((set.dynamic_radius_of(0).unwrap() - (HELIX_RADIUS + 0.5)).abs() < 1e-5);
        assert_ne!(set.position_of(0), Some(Vec3::ZERO));
    }
}
