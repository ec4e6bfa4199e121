//! Frame-driven helix simulation
//!
//! Owns the particle set, the runtime parameters, the accumulated time and
//! the RNG used for brightness kicks. The host calls [`HelixSimulation::step`]
//! once per rendered frame and may change the repulsion field between frames.

use crate::brightness::oscillate;
use crate::builder::build;
use crate::error::{Result, SimulationError};
use crate::integrator::{integrate, FrameInputs};
use crate::params::{HelixConfig, SimulationParams};
use glam::{Vec3, Vec4};
use helix_physics::constants::TIME_SCALE;
use helix_physics::{ParticleSet, TimePhase};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Read-only summary for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    pub particle_count: usize,
    /// Accumulated (slowed) simulation time
    pub elapsed: f64,
    pub kinetic_energy: f32,
    pub max_speed: f32,
    pub mean_intensity: f32,
}

pub struct HelixSimulation {
    particles: ParticleSet,
    params: SimulationParams,
    elapsed: f64,
    rng: StdRng,
}

impl HelixSimulation {
    /// Build a simulation seeded from the thread RNG
    pub fn new(config: &HelixConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Build a reproducible simulation
    pub fn with_seed(config: &HelixConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Build from an explicit generator; it drives both construction and
    /// the per-frame brightness kicks.
    pub fn with_rng(config: &HelixConfig, mut rng: StdRng) -> Result<Self> {
        let particles = build(config, &mut rng)?;
        Self::from_particles(particles, config.params, rng)
    }

    /// Wrap an already built set.
    ///
    /// Rejects invalid params and any particle whose mass is not positive and
    /// finite, so every later `step` divides by a usable mass.
    pub fn from_particles(
        particles: ParticleSet,
        params: SimulationParams,
        rng: StdRng,
    ) -> Result<Self> {
        params.validate()?;
        if let Some((index, mass)) = particles
            .masses()
            .iter()
            .enumerate()
            .find(|(_, m)| !(m.is_finite() && **m > 0.0))
        {
            log::warn!("Rejected particle {index} with mass {mass}");
            return Err(SimulationError::InvalidConfiguration(format!(
                "particle {index} has mass {mass}, expected positive and finite"
            )));
        }

        Ok(Self {
            particles,
            params,
            elapsed: 0.0,
            rng,
        })
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` is rejected and nothing changes.
    pub fn step(&mut self, dt: f32) -> Result<()> {
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("Rejected time step {dt}");
            return Err(SimulationError::InvalidTimeStep(dt));
        }

        self.elapsed += f64::from(dt) * TIME_SCALE;
        let inputs = FrameInputs::new(&self.params, TimePhase::from_elapsed(self.elapsed), dt);

        oscillate(&mut self.particles, &mut self.rng, dt);
        integrate(&mut self.particles, inputs);

        log::trace!("Stepped {} particles, dt={dt:.5}", self.particles.len());
        Ok(())
    }

    pub fn set_repulsion_center(&mut self, center: Vec3) -> Result<()> {
        self.update_params(SimulationParams {
            repulsion_center: center,
            ..self.params
        })
    }

    /// 0 disables repulsion
    pub fn set_repulsion_radius(&mut self, radius: f32) -> Result<()> {
        self.update_params(SimulationParams {
            repulsion_radius: radius,
            ..self.params
        })
    }

    /// Replace the runtime parameters; invalid ones leave the old block in place.
    pub fn update_params(&mut self, params: SimulationParams) -> Result<()> {
        if let Err(err) = params.validate() {
            log::warn!("Ignoring parameter update: {err}");
            return Err(err);
        }
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Accumulated simulation time (wall time scaled by `TIME_SCALE`)
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn position_of(&self, index: usize) -> Option<Vec3> {
        self.particles.position_of(index)
    }

    pub fn color_of(&self, index: usize) -> Option<Vec4> {
        self.particles.color_of(index)
    }

    pub fn for_each_particle<F>(&self, f: F)
    where
        F: FnMut(usize, Vec3, Vec4),
    {
        self.particles.for_each_particle(f);
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let particles = &self.particles;
        let mut kinetic_energy = 0.0;
        let mut max_speed: f32 = 0.0;

        for (velocity, mass) in particles.velocities().iter().zip(particles.masses()) {
            let speed_sq = velocity.length_squared();
            kinetic_energy += 0.5 * mass * speed_sq;
            max_speed = max_speed.max(speed_sq.sqrt());
        }

        let mean_intensity = if particles.is_empty() {
            0.0
        } else {
            particles.intensities().iter().sum::<f32>() / particles.len() as f32
        };

        Diagnostics {
            particle_count: particles.len(),
            elapsed: self.elapsed,
            kinetic_energy,
            max_speed,
            mean_intensity,
        }
    }
}
