//! The supervisor: one-shot sequential setup, then a bounded animated run.
//!
//! Setup walks surface → GPU context → effect pipeline in order; any failure
//! before the clock starts aborts the run with a context-chained error.
//! Once the shared frame state exists, the display clock animates it from
//! its own thread while this thread sits in a cancellable run window. A
//! missing display signal is the one non-fatal setup outcome: the overlay
//! keeps the primed static frame and the run still completes normally.

use std::sync::Arc;

use anyhow::{Context, Result};
use frameclock::{ClockError, FrameClock, RefreshRate, RunWindow};
use renderer::{
    EffectPipeline, FrameState, GpuContext, GpuState, OverlayConfig, OverlayWindow, SurfaceBounds,
};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use crate::cli::{parse_run_duration, parse_surface_size, Cli};
use crate::defaults;

pub fn initialise_tracing() {
    let default_filter =
        "warn,glowlay=info,renderer=info,frameclock=info,naga=error,wgpu=error,wgpu_core=error,wgpu_hal=error,winit=error";
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let surface_size = cli
        .size
        .as_deref()
        .map(parse_surface_size)
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(defaults::SURFACE_SIZE);
    let run_duration = cli
        .duration
        .map(parse_run_duration)
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(defaults::RUN_DURATION);
    let config = OverlayConfig {
        surface_size,
        effect: cli.effect,
        antialiasing: cli.antialias,
    };

    tracing::info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        effect = %config.effect,
        duration_secs = run_duration.as_secs_f64(),
        "starting overlay run"
    );

    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let overlay = OverlayWindow::create(&event_loop, config.surface_size)
        .context("overlay surface setup failed")?;
    tracing::debug!("overlay surface ready");

    let gpu_context = GpuContext::new(overlay.window(), overlay.size(), config.antialiasing)
        .context("GPU context setup failed")?;
    tracing::debug!("gpu context ready");

    let pipeline = EffectPipeline::new(&gpu_context, config.effect)
        .context("effect pipeline setup failed")?;
    tracing::debug!(effect = %config.effect, "effect pipeline ready");

    let bounds = SurfaceBounds::new(overlay.size().width, overlay.size().height);
    let state = Arc::new(FrameState::new(bounds, GpuState::new(gpu_context, pipeline)));

    // Prime one frame so the overlay shows content even if the clock never
    // fires.
    state.render(0.0);

    let mut clock = match acquire_clock(&overlay) {
        Ok(clock) => Some(clock),
        Err(err) => {
            tracing::warn!(error = %err, "no display clock; overlay stays static");
            None
        }
    };

    if let Some(clock) = clock.as_mut() {
        let shared = state.clone();
        let started = clock.start(move |tick| {
            let _ = shared.render(tick.seconds() as f32);
        });
        match started {
            Ok(()) => tracing::info!("frame clock running"),
            Err(err) => {
                tracing::warn!(error = %err, "frame clock failed to start; overlay stays static");
            }
        }
    }

    let (window, _cancel) = RunWindow::new(run_duration);
    let outcome = window.wait();
    tracing::debug!(?outcome, "run window closed");

    if let Some(mut clock) = clock {
        clock.stop();
    }
    tracing::info!("overlay run complete");
    Ok(())
}

fn acquire_clock(overlay: &OverlayWindow) -> Result<FrameClock, ClockError> {
    let millihertz = overlay
        .refresh_rate_millihertz()
        .ok_or(ClockError::NoDisplaySignal)?;
    let rate = RefreshRate::from_millihertz(millihertz)?;
    tracing::debug!(hertz = rate.hertz(), "detected display refresh rate");
    Ok(FrameClock::for_display(rate))
}
