//! # Helix Simulation
//!
//! Builds the double helix particle field and advances it frame by frame:
//! a spring-damper integrator pulling particles toward a rotating helix and an
//! independent brightness random walk.

pub mod brightness;
pub mod builder;
pub mod error;
pub mod integrator;
pub mod params;
pub mod simulation;

pub use builder::build;
pub use error::SimulationError;
pub use params::*;
pub use simulation::*;
