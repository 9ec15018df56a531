//! Drives the render step from a synthetic frame clock and checks the
//! per-tick protocol: one submission per tick, constant bounds, and time
//! values that only move forward.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam_channel::unbounded;
use frameclock::{FrameClock, Tick};
use renderer::{FrameSink, FrameState, SurfaceBounds};

#[derive(Clone)]
struct CountingSink {
    frames: Arc<Mutex<Vec<(SurfaceBounds, f32)>>>,
}

impl CountingSink {
    fn new() -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn frames(&self) -> Vec<(SurfaceBounds, f32)> {
        self.frames.lock().unwrap().clone()
    }
}

impl FrameSink for CountingSink {
    fn submit(&mut self, bounds: SurfaceBounds, seconds: f32) -> Result<(), wgpu::SurfaceError> {
        self.frames.lock().unwrap().push((bounds, seconds));
        Ok(())
    }
}

/// Polls `cond` until it holds or `deadline` passes; queued synthetic ticks
/// need draining before the clock is stopped.
fn wait_until(deadline: Duration, mut cond: impl FnMut() -> bool) {
    let start = Instant::now();
    while !cond() && start.elapsed() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn start_loop(sink: CountingSink) -> (FrameClock, crossbeam_channel::Sender<Tick>) {
    let state = Arc::new(FrameState::new(SurfaceBounds::new(400, 400), sink));
    let (tick_tx, tick_rx) = unbounded();
    let mut clock = FrameClock::from_ticks(tick_rx);
    clock
        .start(move |tick: Tick| {
            let _ = state.render(tick.seconds() as f32);
        })
        .unwrap();
    (clock, tick_tx)
}

#[test]
fn sixty_hz_second_renders_one_frame_per_tick() {
    let sink = CountingSink::new();
    let (mut clock, tick_tx) = start_loop(sink.clone());

    // One simulated second at 60 refreshes.
    let frame_nanos = 1_000_000_000u64 / 60;
    for index in 0..60u64 {
        tick_tx
            .send(Tick::from_nanos((index + 1) * frame_nanos))
            .unwrap();
    }
    wait_until(Duration::from_secs(5), || sink.frames().len() == 60);
    clock.stop();

    let frames = sink.frames();
    assert!(
        (59..=61).contains(&frames.len()),
        "expected ~60 frames, got {}",
        frames.len()
    );
    for pair in frames.windows(2) {
        assert!(pair[1].1 > pair[0].1, "frame time regressed");
    }
    assert!(frames
        .iter()
        .all(|(bounds, _)| *bounds == SurfaceBounds::new(400, 400)));
}

#[test]
fn no_frames_render_after_stop() {
    let sink = CountingSink::new();
    let (mut clock, tick_tx) = start_loop(sink.clone());

    tick_tx.send(Tick::from_nanos(16_000_000)).unwrap();
    tick_tx.send(Tick::from_nanos(32_000_000)).unwrap();
    wait_until(Duration::from_secs(5), || sink.frames().len() == 2);
    clock.stop();
    let rendered = sink.frames().len();

    let _ = tick_tx.send(Tick::from_nanos(48_000_000));
    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(sink.frames().len(), rendered);
}

#[test]
fn regressing_ticks_never_reach_the_sink() {
    let sink = CountingSink::new();
    let (mut clock, tick_tx) = start_loop(sink.clone());

    for nanos in [300_000_000u64, 100_000_000, 500_000_000] {
        tick_tx.send(Tick::from_nanos(nanos)).unwrap();
    }
    wait_until(Duration::from_secs(5), || sink.frames().len() == 2);
    clock.stop();

    let times: Vec<f32> = sink.frames().iter().map(|(_, t)| *t).collect();
    assert_eq!(times.len(), 2);
    assert!((times[0] - 0.3).abs() < 1e-6);
    assert!((times[1] - 0.5).abs() < 1e-6);
}
