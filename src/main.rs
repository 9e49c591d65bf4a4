//! Extinguished entry point
//!
//! There is no window yet: the native binary runs the simulation headless
//! with a scripted pilot and writes the last frame to a PNG.
//!
//! Usage: `extinguished [frames] [output.png]`

use std::path::PathBuf;
use std::process::ExitCode;

use extinguished::Settings;
use extinguished::assets::{AssetLibrary, resolve_dir};
use extinguished::gfx::Surface;
use extinguished::sim::{FrameInput, World, render, tick};

const DEFAULT_FRAMES: u64 = 600;
const DEFAULT_OUTPUT: &str = "frame.png";

/// Scripted input: keep turning clockwise, fire in bursts
fn autopilot(frame: u64) -> FrameInput {
    FrameInput {
        pushing: frame % 120 < 40,
        rotate: 1.0,
        ..Default::default()
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Extinguished (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames = match args.next().map(|a| a.parse::<u64>()) {
        None => DEFAULT_FRAMES,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("invalid frame count: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let settings = Settings::load();
    let image_dir = resolve_dir(&settings.image_dir);
    let assets = match AssetLibrary::load(&image_dir) {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("Failed to load assets: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dt = settings.frame_dt();
    let screen_size = settings.screen_size.as_uvec2();
    let mut world = World::new(settings, &assets);
    let mut screen = Surface::new(screen_size.x, screen_size.y);

    let mut bounces = 0;
    for frame in 0..frames {
        let contacts = tick(&mut world, &autopilot(frame), dt);
        bounces += contacts.bounces;
        if frame % 120 == 0 {
            log::info!(
                "frame {}: pos {} vel {} smoke {}",
                frame,
                world.player.pos,
                world.player.vel,
                world.smoke.len()
            );
        }
    }
    log::info!("Simulated {} frames, {} obstacle bounces", frames, bounces);

    render(&mut world, &mut screen);
    if let Err(e) = screen.save_png(&output) {
        log::error!("Failed to write {}: {}", output.display(), e);
        return ExitCode::FAILURE;
    }
    log::info!("Wrote {}", output.display());
    ExitCode::SUCCESS
}
