//! Per-instance records for uploading the field to a GPU instance buffer

use bytemuck::{Pod, Zeroable};
use helix_physics::ParticleSet;

/// Radius of each rendered sphere
pub const PARTICLE_SCALE: f32 = 0.36;

/// GPU-compatible instance record
/// Aligned for WGSL struct compatibility (32 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub position: [f32; 3],
    pub scale: f32,
    /// Linear RGB, emissive brightness in alpha
    pub color: [f32; 4],
}

/// Refill `out` with one record per particle, in particle order
pub fn write_instances(particles: &ParticleSet, out: &mut Vec<InstanceData>) {
    out.clear();
    out.reserve(particles.len());
    particles.for_each_particle(|_, position, color| {
        out.push(InstanceData {
            position: position.to_array(),
            scale: PARTICLE_SCALE,
            color: color.to_array(),
        });
    });
}

pub fn instance_bytes(instances: &[InstanceData]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
