//! Bouncing particles on a software framebuffer.
//!
//! Simulation and drawing run on separate tick-rate limited cadences. Keys:
//! `Space` respawns the particles, `B` picks a random background, `Esc` quits.

mod particles;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use ember_engine::device::GpuInit;
use ember_engine::driver::{EventQueue, LoopConfig, LoopDriver};
use ember_engine::logging::{init_logging, LoggingConfig};
use ember_engine::present::HeadlessSurface;
use ember_engine::random::SeededRandom;
use ember_engine::time::{Duration, Instant, ManualClock, MonotonicClock, TimeUnit};
use ember_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use scene::Scene;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bouncing particles on a software framebuffer")]
struct Args {
    /// Simulation updates per second
    #[arg(long, default_value_t = 30)]
    update_rate: u64,
    /// Framebuffer redraws per second
    #[arg(long, default_value_t = 30)]
    render_rate: u64,
    /// Number of particles
    #[arg(long, default_value_t = 100)]
    particles: usize,
    /// Seed for the random source; entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Initial window width (logical pixels)
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Initial window height (logical pixels)
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Events handled per loop iteration before the rest waits
    #[arg(long, default_value_t = ember_engine::driver::DEFAULT_MAX_EVENTS_PER_ITERATION)]
    max_events: usize,
    /// Present without waiting for vblank
    #[arg(long)]
    no_vsync: bool,
    /// Run this many iterations without a window; the clock advances 1ms per iteration
    #[arg(long)]
    headless_frames: Option<u64>,
    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &args.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    let result = match args.headless_frames {
        Some(frames) => run_headless(&args, frames),
        None => run_windowed(&args),
    };

    if let Err(e) = &result {
        log::error!("fatal: {e:#}");
    }
    result
}

fn random_source(args: &Args) -> SeededRandom {
    match args.seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    }
}

fn loop_config(args: &Args) -> LoopConfig {
    LoopConfig {
        max_events_per_iteration: args.max_events,
    }
}

fn run_windowed(args: &Args) -> Result<()> {
    let mut driver = LoopDriver::<Scene, _, MonotonicClock>::new(loop_config(args))?;
    scene::install(&mut driver, args.update_rate, args.render_rate)?;

    let config = RuntimeConfig {
        title: "ember particles".to_string(),
        initial_size: LogicalSize::new(f64::from(args.width), f64::from(args.height)),
        ..RuntimeConfig::default()
    };
    let gpu_init = if args.no_vsync {
        GpuInit::default().without_vsync()
    } else {
        GpuInit::default()
    };

    log::info!(
        "starting: {} particles, update {}/s, render {}/s",
        args.particles,
        args.update_rate,
        args.render_rate
    );
    Runtime::run(
        config,
        gpu_init,
        driver,
        Scene::new(args.particles, random_source(args)),
    )
}

/// Deterministic run on a simulated clock; useful without a display.
fn run_headless(args: &Args, frames: u64) -> Result<()> {
    let clock = ManualClock::starting_at(Instant::of(1, TimeUnit::Seconds));
    let mut driver = LoopDriver::with_clock(loop_config(args), clock.clone())?;
    scene::install(&mut driver, args.update_rate, args.render_rate)?;

    let mut state = Scene::new(args.particles, random_source(args));
    let mut queue = EventQueue::new();
    let mut surface = HeadlessSurface::new(args.width, args.height);

    for _ in 0..frames {
        driver
            .run_iteration(&mut state, &mut queue, &mut surface)
            .context("headless iteration failed")?;
        clock.advance(Duration::of(1, TimeUnit::Milliseconds));
    }

    let lit = surface
        .last_frame()
        .chunks_exact(4)
        .filter(|px| px[..3] != [0, 0, 0])
        .count();
    log::info!(
        "headless run: {frames} iterations, {} updates, {} renders, {} presents, {lit} lit pixels",
        state.updates,
        state.renders,
        surface.presented()
    );
    Ok(())
}

