//! # Helix View
//!
//! Render-side helpers for the helix field: GPU instance records, the scene
//! camera, and pointer-to-repulsion-center picking.

pub mod camera;
pub mod instance;

pub use camera::*;
pub use instance::*;
