//! Double Helix Background
//!
//! Headless host loop for the helix particle field: paces frames to 60 Hz,
//! steps the simulation by the measured wall-clock delta, drives the
//! repulsion field from a synthetic pointer and refreshes the instance buffer
//! a renderer would upload.
//!
//! Usage: `helix-particles [frames] [seed]`

use glam::Vec2;
use helix_physics::constants::*;
use helix_simulation::{HelixConfig, HelixSimulation, SimulationError};
use helix_view::{pointer_to_plane, screen_to_ndc, write_instances, Camera, InstanceData};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const DEFAULT_FRAMES: usize = 600;
/// Target pacing; each step still uses the measured delta
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
const SCREEN_WIDTH: u32 = 1920;
const SCREEN_HEIGHT: u32 = 1080;

/// Repulsion radius around the pointer hit point
const POINTER_REPULSION_RADIUS: f32 = 22.0;

/// Park the repulsion field off to the side until the pointer moves
const IDLE_REPULSION_CENTER: glam::Vec3 = glam::Vec3::new(500.0, 0.0, 0.0);

/// Log every this many frames
const LOG_INTERVAL: usize = 60;

struct Args {
    frames: usize,
    seed: Option<u64>,
}

fn parse_args() -> Args {
    let mut args = std::env::args().skip(1);
    let frames = match args.next().map(|s| s.parse::<usize>()) {
        Some(Ok(frames)) => frames,
        Some(Err(err)) => {
            log::warn!("Invalid frame count ({err}), using {DEFAULT_FRAMES}");
            DEFAULT_FRAMES
        }
        None => DEFAULT_FRAMES,
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => Some(seed),
        Some(Err(err)) => {
            log::warn!("Invalid seed ({err}), seeding from the OS");
            None
        }
        None => None,
    };
    Args { frames, seed }
}

/// Synthetic pointer tracing a slow figure across the screen
fn pointer_at(time: f32) -> Vec2 {
    let w = SCREEN_WIDTH as f32;
    let h = SCREEN_HEIGHT as f32;
    Vec2::new(
        w * (0.5 + 0.45 * (time * 0.7).sin()),
        h * (0.5 + 0.3 * (time * 1.3).sin()),
    )
}

/// Seconds between two frames, `None` when no time has passed
fn frame_delta(previous: Instant, now: Instant) -> Option<f32> {
    let dt = now.saturating_duration_since(previous).as_secs_f32();
    (dt > 0.0).then_some(dt)
}

fn run(args: &Args) -> Result<(), SimulationError> {
    let config = HelixConfig::default();
    let mut simulation = match args.seed {
        Some(seed) => HelixSimulation::with_seed(&config, seed)?,
        None => HelixSimulation::new(&config)?,
    };
    log::info!("✓ Simulation initialized");
    log::info!(
        "  {} particles, twist {:.0}°, half length {:.2}",
        simulation.particle_count(),
        config.effective_rotation_degrees(),
        config.half_length()
    );

    simulation.set_repulsion_radius(POINTER_REPULSION_RADIUS)?;
    simulation.set_repulsion_center(IDLE_REPULSION_CENTER)?;

    let camera = Camera::scene(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut instances: Vec<InstanceData> = Vec::with_capacity(simulation.particle_count());
    let mut frame_times: VecDeque<f32> = VecDeque::with_capacity(100);

    let mut last_frame_time = Instant::now();
    let mut wall_time = 0.0_f32;

    for frame in 0..args.frames {
        // Pace to the display rate, then step by the time that really passed
        let deadline = last_frame_time + FRAME_INTERVAL;
        if let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            std::thread::sleep(remaining);
        }
        let now = Instant::now();
        let Some(dt) = frame_delta(last_frame_time, now) else {
            log::debug!("Skipping frame {frame} with zero delta");
            continue;
        };
        last_frame_time = now;
        wall_time += dt;

        // The pointer only starts moving after the first second
        if wall_time >= 1.0 {
            let pointer = pointer_at(wall_time);
            let ndc = screen_to_ndc(pointer.x, pointer.y, SCREEN_WIDTH, SCREEN_HEIGHT);
            if let Some(hit) = pointer_to_plane(&camera, ndc) {
                simulation.set_repulsion_center(hit)?;
            }
        }

        let step_start = Instant::now();
        simulation.step(dt)?;
        write_instances(simulation.particles(), &mut instances);

        let step_time = step_start.elapsed().as_secs_f32() * 1000.0;
        frame_times.push_back(step_time);
        if frame_times.len() > 100 {
            frame_times.pop_front();
        }

        if (frame + 1) % LOG_INTERVAL == 0 {
            let avg_frame_time = frame_times.iter().sum::<f32>() / frame_times.len() as f32;
            let stats = simulation.diagnostics();
            log::info!(
                "frame {:>5} | step {:.2} ms | t {:.2} s | KE {:.1} | max speed {:.2} | mean intensity {:.3}",
                frame + 1,
                avg_frame_time,
                wall_time,
                stats.kinetic_energy,
                stats.max_speed,
                stats.mean_intensity
            );
            log::debug!(
                "  repulsion center {} (radius {}), elapsed {:.3}",
                simulation.params().repulsion_center,
                simulation.params().repulsion_radius,
                stats.elapsed
            );
        }
    }

    let stats = simulation.diagnostics();
    log::info!(
        "✓ Ran {} frames ({} instance bytes per upload), intensity band [{INTENSITY_MIN}, {INTENSITY_MAX}], mean {:.3}",
        args.frames,
        helix_view::instance_bytes(&instances).len(),
        stats.mean_intensity
    );

    Ok(())
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting double helix particle field...");

    let args = parse_args();
    if let Err(err) = run(&args) {
        log::error!("Simulation failed: {err}");
        std::process::exit(1);
    }
}
