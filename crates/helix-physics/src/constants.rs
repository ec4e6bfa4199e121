//! Constants for the double helix particle field
//!
//! Lengths are in scene units (the helix is ~170 units long at the default
//! length scale), times in seconds, angles in degrees unless noted.

/// Default number of particles on the two helix strands
pub const HELIX_COUNT: usize = 10_000;

/// Default number of rung cross-sections
pub const RUNG_GROUP_COUNT: usize = 30;

/// Default number of particles per rung
pub const PARTICLES_PER_RUNG: usize = 150;

/// Default scale applied to the helix length (and its twist)
pub const LENGTH_SCALE: f32 = 0.75;

/// Half length of the helix before `LENGTH_SCALE` is applied
pub const BASE_HALF_LENGTH: f32 = 115.0;

/// Default twist along the full length, before `LENGTH_SCALE` is applied
pub const TOTAL_ROTATION_DEGREES: f32 = 900.0;

/// Nominal orbit radius of strand particles; rungs span `-HELIX_RADIUS..HELIX_RADIUS`
pub const HELIX_RADIUS: f32 = 18.0;

/// Upper bound of the per-particle jitter amplitude factor for strand particles
pub const HELIX_JITTER_FACTOR: f32 = 0.7;

/// Multiplier applied on top of `HELIX_JITTER_FACTOR` (max jitter 2.8 units per axis)
pub const HELIX_JITTER_SCALE: f32 = 4.0;

/// Max jitter per axis for rung particles
pub const RUNG_JITTER: f32 = 0.01;

/// Particle mass range
pub const MASS_MIN: f32 = 0.7;
pub const MASS_MAX: f32 = 1.3;

// Integrator defaults
/// Spring constant pulling particles toward their orbital target
pub const SPRING_STIFFNESS: f32 = 8.0;

/// Linear velocity damping per second
pub const DAMPING: f32 = 2.2;

/// Strength of the pointer repulsion field
pub const REPULSION_STRENGTH: f32 = 20.0;

/// Squared distance below which a particle counts as sitting on the repulsion center
pub const REPULSION_MIN_DIST_SQ: f32 = 1e-5;

// Time scaling
/// Wall-clock seconds are slowed down by this factor before accumulating
pub const TIME_SCALE: f64 = 0.4;

/// Multiplier turning accumulated time into the wobble phase
pub const WOBBLE_FREQUENCY: f64 = 4.0;

/// Multiplier turning accumulated time into helix rotation (radians)
pub const ROTATION_SPEED: f64 = 0.4;

/// Amplitude of the per-particle wobble
pub const WOBBLE_AMPLITUDE: f32 = 0.5;

/// The orbital radius is squashed by this factor when projected onto y/z
pub const ORBIT_SQUASH: f32 = 0.7;

// Brightness random walk
pub const INTENSITY_MIN: f32 = 0.2;
pub const INTENSITY_MAX: f32 = 1.8;

/// Fraction of particles that get a new brightness velocity each frame
pub const INTENSITY_KICK_FRACTION: f32 = 0.002;

/// Max magnitude of a re-rolled brightness velocity (units per second)
pub const INTENSITY_KICK_SPEED: f32 = 1.0;

/// Max magnitude of the initial brightness velocity
pub const INTENSITY_INITIAL_SPEED: f32 = 0.6;

// Palette (sRGB hex, converted to linear at build time)
/// Light blue strand
pub const STRAND_BLUE: u32 = 0x66ccff;

/// Magenta strand
pub const STRAND_MAGENTA: u32 = 0xd60486;

/// Max starting alpha of blue particles
pub const BLUE_ALPHA_MAX: f32 = 0.3;

/// Max starting alpha of magenta particles
pub const MAGENTA_ALPHA_MAX: f32 = 0.6;
