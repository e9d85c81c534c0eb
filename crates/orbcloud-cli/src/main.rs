mod cli;
mod error;
mod logging;
mod sink;

use crate::cli::{Cli, Mode};
use crate::error::Result;
use crate::sink::ProgressSink;
use clap::Parser;
use orbcloud::engine::config::AnimationConfig;
use orbcloud::engine::error::EngineError;
use orbcloud::engine::events::EventReporter;
use orbcloud::workflows::{Pipeline, start_animation};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\nError: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, &cli.log_file)?;

    info!("orbcloud v{} starting up", env!("CARGO_PKG_VERSION"));
    debug!("full CLI arguments parsed: {:?}", &cli);

    let mut builder = AnimationConfig::builder().fps(cli.fps).speed(cli.speed);
    if let Some(cutoff) = cli.mask_cutoff {
        builder = builder.mask_cutoff(cutoff);
    }
    let config = builder.build()?;

    let (n_radial, n_angular) = cli.dims;
    let pipeline = Pipeline::from_specs(cli.states.iter().copied(), n_radial, n_angular)?;

    let (sink, delivered) = ProgressSink::new(cli.frames);
    match cli.mode {
        Mode::Scatter => {
            let source = pipeline.into_scatter().with_mask_cutoff(config.mask_cutoff);
            if let Some(period) = source.beat_period() {
                info!(period, "superposition beat period in simulated seconds");
            }
            run_stream(
                move |i| Ok(source.value_at(config.simulated_time(i))),
                config,
                cli.frames,
                sink,
                delivered,
            )
        }
        Mode::Volume => {
            let source = pipeline.into_volume().with_mask_cutoff(config.mask_cutoff);
            let (nx, ny, nz) = source.dims().shape();
            info!(nx, ny, nz, "volume voxel resolution");
            run_stream(
                move |i| Ok(source.value_at(config.simulated_time(i))),
                config,
                cli.frames,
                sink,
                delivered,
            )
        }
    }
}

/// Drive one animation stream to completion: wait until the sink has seen the
/// requested number of frames, then tear the stream down and report.
fn run_stream<T, F>(
    frame_fn: F,
    config: AnimationConfig,
    frames: u64,
    sink: ProgressSink,
    delivered: Arc<AtomicU64>,
) -> Result<()>
where
    T: Send + 'static,
    F: Fn(u64) -> std::result::Result<T, EngineError> + Send + 'static,
{
    let handle = start_animation(frame_fn, config, sink, EventReporter::new())?;

    while delivered.load(Ordering::SeqCst) < frames {
        std::thread::sleep(Duration::from_millis(10));
    }

    let rate = handle.frame_rate();
    for e in handle.take_errors() {
        warn!("skipped frame: {e}");
    }
    handle.abort();

    info!(
        frames,
        target_fps = config.fps,
        measured_fps = rate,
        "stream finished"
    );
    println!("Delivered {frames} frames at {rate:.1} fps (target {:.1} fps).", config.fps);
    Ok(())
}
