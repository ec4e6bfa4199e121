//! Struct-of-arrays particle storage
//!
//! Every per-particle field lives in its own contiguous buffer indexed by
//! particle id. The set is built once and never grows or shrinks after
//! construction; mutable state is only reachable through the split borrows
//! [`ParticleSet::kinematics_mut`] and [`ParticleSet::brightness_mut`], which
//! hand out disjoint slices so motion and brightness can be updated
//! independently. RGB is fixed at construction; the alpha channel reported by
//! [`ParticleSet::color_of`] is the live brightness.

use glam::{Vec3, Vec4};

/// Immutable construction data for a single particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSeed {
    /// Anchor point on the idealized helix/rung lattice
    pub base_position: Vec3,
    /// Angular phase along the helix (radians)
    pub base_angle: f32,
    /// Nominal orbit radius
    pub base_radius: f32,
    /// Individual oscillation offset (radians)
    pub phase_delay: f32,
    /// Must be positive
    pub mass: f32,
    /// Linear RGB plus starting brightness in `w`
    pub color: Vec4,
    /// Starting brightness velocity
    pub intensity_velocity: f32,
}

/// All particles of the helix field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSet {
    // Immutable after construction
    base_positions: Vec<Vec3>,
    base_angles: Vec<f32>,
    base_radii: Vec<f32>,
    phase_delays: Vec<f32>,
    masses: Vec<f32>,

    // Integrator state
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    angles: Vec<f32>,
    radii: Vec<f32>,

    // Linear RGB, immutable after construction
    rgb: Vec<Vec3>,

    // Oscillator state (doubles as the color alpha)
    intensities: Vec<f32>,
    intensity_velocities: Vec<f32>,
}

/// Mutable view over the motion buffers, plus read access to the anchors
pub struct KinematicsMut<'a> {
    pub base_positions: &'a [Vec3],
    pub base_angles: &'a [f32],
    pub base_radii: &'a [f32],
    pub phase_delays: &'a [f32],
    pub masses: &'a [f32],
    pub positions: &'a mut [Vec3],
    pub velocities: &'a mut [Vec3],
    pub angles: &'a mut [f32],
    pub radii: &'a mut [f32],
}

/// Mutable view over the brightness buffers
pub struct BrightnessMut<'a> {
    pub intensities: &'a mut [f32],
    pub intensity_velocities: &'a mut [f32],
}

impl ParticleSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            base_positions: Vec::with_capacity(capacity),
            base_angles: Vec::with_capacity(capacity),
            base_radii: Vec::with_capacity(capacity),
            phase_delays: Vec::with_capacity(capacity),
            masses: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
            velocities: Vec::with_capacity(capacity),
            angles: Vec::with_capacity(capacity),
            radii: Vec::with_capacity(capacity),
            rgb: Vec::with_capacity(capacity),
            intensities: Vec::with_capacity(capacity),
            intensity_velocities: Vec::with_capacity(capacity),
        }
    }

    /// Append a particle at rest on its anchor point.
    ///
    /// The brightness starts at `seed.color.w`.
    /// Masses are stored as given; `HelixSimulation::from_particles` rejects
    /// sets containing a non-positive or non-finite one.
    pub fn push(&mut self, seed: ParticleSeed) {
        self.base_positions.push(seed.base_position);
        self.base_angles.push(seed.base_angle);
        self.base_radii.push(seed.base_radius);
        self.phase_delays.push(seed.phase_delay);
        self.masses.push(seed.mass);

        self.positions.push(seed.base_position);
        self.velocities.push(Vec3::ZERO);
        self.angles.push(seed.base_angle);
        self.radii.push(seed.base_radius);

        self.rgb.push(seed.color.truncate());
        self.intensities.push(seed.color.w);
        self.intensity_velocities.push(seed.intensity_velocity);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current (rendered) position
    pub fn position_of(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    /// Linear RGB with brightness in alpha
    pub fn color_of(&self, index: usize) -> Option<Vec4> {
        let rgb = self.rgb.get(index)?;
        let alpha = self.intensities.get(index)?;
        Some(rgb.extend(*alpha))
    }

    pub fn velocity_of(&self, index: usize) -> Option<Vec3> {
        self.velocities.get(index).copied()
    }

    pub fn mass_of(&self, index: usize) -> Option<f32> {
        self.masses.get(index).copied()
    }

    pub fn intensity_of(&self, index: usize) -> Option<f32> {
        self.intensities.get(index).copied()
    }

    pub fn intensity_velocity_of(&self, index: usize) -> Option<f32> {
        self.intensity_velocities.get(index).copied()
    }

    pub fn base_position_of(&self, index: usize) -> Option<Vec3> {
        self.base_positions.get(index).copied()
    }

    pub fn base_angle_of(&self, index: usize) -> Option<f32> {
        self.base_angles.get(index).copied()
    }

    pub fn base_radius_of(&self, index: usize) -> Option<f32> {
        self.base_radii.get(index).copied()
    }

    pub fn phase_delay_of(&self, index: usize) -> Option<f32> {
        self.phase_delays.get(index).copied()
    }

    /// Rotated angle from the most recent step
    pub fn angle_of(&self, index: usize) -> Option<f32> {
        self.angles.get(index).copied()
    }

    /// Wobbling radius from the most recent step
    pub fn dynamic_radius_of(&self, index: usize) -> Option<f32> {
        self.radii.get(index).copied()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Linear RGB per particle (no brightness)
    pub fn rgb(&self) -> &[Vec3] {
        &self.rgb
    }

    pub fn masses(&self) -> &[f32] {
        &self.masses
    }

    pub fn intensities(&self) -> &[f32] {
        &self.intensities
    }

    /// Visit every particle exactly once, in index order.
    pub fn for_each_particle<F>(&self, mut f: F)
    where
        F: FnMut(usize, Vec3, Vec4),
    {
        let colors = self.rgb.iter().zip(&self.intensities);
        for (index, (position, (rgb, alpha))) in self.positions.iter().zip(colors).enumerate() {
            f(index, *position, rgb.extend(*alpha));
        }
    }

    pub fn kinematics_mut(&mut self) -> KinematicsMut<'_> {
        KinematicsMut {
            base_positions: &self.base_positions,
            base_angles: &self.base_angles,
            base_radii: &self.base_radii,
            phase_delays: &self.phase_delays,
            masses: &self.masses,
            positions: &mut self.positions,
            velocities: &mut self.velocities,
            angles: &mut self.angles,
            radii: &mut self.radii,
        }
    }

    pub fn brightness_mut(&mut self) -> BrightnessMut<'_> {
        BrightnessMut {
            intensities: &mut self.intensities,
            intensity_velocities: &mut self.intensity_velocities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(x: f32) -> ParticleSeed {
        ParticleSeed {
            base_position: Vec3::new(x, 1.0, -1.0),
            base_angle: 0.5,
            base_radius: 18.0,
            phase_delay: 1.0,
            mass: 1.1,
            color: Vec4::new(0.1, 0.2, 0.3, 0.4),
            intensity_velocity: -0.25,
        }
    }

    #[test]
    fn test_push_starts_at_rest_on_anchor() {
        let mut set = ParticleSet::with_capacity(2);
        set.push(seed(3.0));

        assert_eq!(set.len(), 1);
        assert_eq!(set.position_of(0), Some(Vec3::new(3.0, 1.0, -1.0)));
        assert_eq!(set.velocity_of(0), Some(Vec3::ZERO));
        assert_eq!(set.intensity_of(0), Some(0.4));
        assert_eq!(set.intensity_velocity_of(0), Some(-0.25));
        assert_eq!(set.angle_of(0), Some(0.5));
        assert_eq!(set.dynamic_radius_of(0), Some(18.0));
    }

    #[test]
    fn test_out_of_range_accessors() {
        let set = ParticleSet::default();
        assert!(set.is_empty());
        assert_eq!(set.position_of(0), None);
        assert_eq!(set.color_of(7), None);
    }

    #[test]
    fn test_for_each_visits_every_particle_once() {
        let mut set = ParticleSet::with_capacity(5);
        for i in 0..5 {
            set.push(seed(i as f32));
        }

        let mut seen = Vec::new();
        set.for_each_particle(|index, position, _| {
            assert_eq!(position.x, index as f32);
            seen.push(index);
        });
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_brightness_writes_only_reach_alpha() {
        let mut set = ParticleSet::with_capacity(1);
        set.push(seed(0.0));

        set.brightness_mut().intensities[0] = 1.5;

        assert_eq!(set.color_of(0), Some(Vec4::new(0.1, 0.2, 0.3, 1.5)));
        assert_eq!(set.rgb(), &[Vec3::new(0.1, 0.2, 0.3)]);
        set.for_each_particle(|_, _, color| assert_eq!(color.w, 1.5));
    }
}
