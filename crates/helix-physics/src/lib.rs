//! # Helix Physics
//!
//! Particle storage and the per-particle force terms behind the double helix
//! background: a spring toward a rotating helical target and an optional
//! pointer-driven repulsion field.

pub mod constants;
pub mod forces;
pub mod particle;

pub use constants::*;
pub use forces::*;
pub use particle::*;
