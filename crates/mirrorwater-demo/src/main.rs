//! Headless demo that drives a water reflection through a simulated frame loop.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p mirrorwater-demo -- --frames 240 --height 2.5`.

mod headless;

use std::process::ExitCode;

use clap::Parser;
use glam::Vec3;
use mirrorwater_config::{CliArgs, Config, default_config_dir};
use mirrorwater_reflect::{Camera, FrustumOutline, ReflectionError, WaterReflection};
use tracing::{error, info, warn};

use crate::headless::HeadlessHost;

/// Mesh ids present in the demo scene.
const SCENE_MESHES: [u64; 3] = [1, 2, 3];

/// Frames per tide step.
const TIDE_PERIOD: u32 = 60;

/// Height gained per tide step, in meters.
const TIDE_STEP: f32 = 0.25;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    if let Err(e) = config.apply_cli_overrides(&args) {
        eprintln!("Ignoring CLI override: {e}");
    }

    let log_dir = config_dir.join("logs");
    mirrorwater_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(config, args.frames) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("water reflection demo failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut config: Config, frames: u32) -> Result<(), ReflectionError> {
    if config.water.positions.is_empty() {
        config.water.positions = vec![
            [-20.0, 0.0, -20.0],
            [-20.0, 0.0, 20.0],
            [20.0, 0.0, 20.0],
            [20.0, 0.0, -20.0],
        ];
        info!("No water boundary configured, using a 40 m square pool");
    }
    if config.water.reflectables.is_empty() {
        config.water.reflectables = SCENE_MESHES.to_vec();
    }

    let mut host = HeadlessHost::with_meshes(SCENE_MESHES);
    run_scene(&mut host, &config, frames, TIDE_STEP)
}

/// Build, activate and drive a water reflection, disposing it on every exit
/// path once it exists.
fn run_scene(
    host: &mut HeadlessHost,
    config: &Config,
    frames: u32,
    tide_step: f32,
) -> Result<(), ReflectionError> {
    let mut water = WaterReflection::new(host, config.water.clone())?;
    let result = water
        .activate(host)
        .and_then(|()| simulate(&mut water, host, config, frames, tide_step));

    if let Err(e) = &result {
        warn!("simulation stopped early: {e}");
    }
    info!(
        frames = host.frames_rendered,
        objects = water.clip_manager().len(),
        "simulation finished"
    );

    water.dispose(host);
    info!(
        clip_planes = host.live_clip_planes(),
        targets = host.live_targets(),
        hooks_bound = host.hooks_bound,
        "host resources after dispose"
    );
    result
}

fn simulate(
    water: &mut WaterReflection,
    host: &mut HeadlessHost,
    config: &Config,
    frames: u32,
    tide_step: f32,
) -> Result<(), ReflectionError> {
    let base_height = config.water.height;
    for frame in 0..frames {
        if frame > 0 && frame % TIDE_PERIOD == 0 {
            let tide = (frame / TIDE_PERIOD) as f32 * tide_step;
            water.set_height(host, base_height + tide)?;
            info!(frame, height = water.plane().height(), "tide moved");
        }

        let live = orbit_camera(frame);
        let reflected = water.on_frame(host, &live)?;

        if config.debug.show_frustum {
            let outline = FrustumOutline::from_camera(&reflected);
            info!(frame, center = %outline.center(), "reflected frustum");
        }
    }
    Ok(())
}

/// Camera circling the pool at a fixed altitude, looking at its center.
fn orbit_camera(frame: u32) -> Camera {
    let angle = frame as f32 * 0.02;
    let eye = Vec3::new(angle.cos() * 35.0, 8.0, angle.sin() * 35.0);
    Camera::look_at(eye, Vec3::ZERO, Vec3::Y)
}
