//! Display-synchronized frame clock.
//!
//! A [`FrameClock`] delivers one [`Tick`] per vertical refresh to a callback
//! running on a dedicated worker thread. The contract the rest of the
//! workspace leans on:
//!
//! * callback invocations are serialized, at most one in flight at a time,
//! * tick timestamps never decrease,
//! * [`FrameClock::stop`] joins the worker, so once it returns no callback is
//!   running and none will start again,
//! * stopping a stopped clock is a no-op.
//!
//! Production clocks come from [`FrameClock::for_display`], which paces ticks
//! off the monitor's reported refresh rate. Tests inject a
//! [`crossbeam_channel`] receiver through [`FrameClock::from_ticks`] and feed
//! synthetic ticks by hand.
//!
//! [`RunWindow`] is the supervisor's side of the lifecycle: a cancellable
//! timed wait that bounds how long the clock runs.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

/// Tick timestamps are expressed in nanoseconds.
pub const TICK_FREQUENCY: u64 = 1_000_000_000;

/// One firing of the clock: a monotonic hardware timestamp plus the fixed
/// frequency that converts it to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Monotonic timestamp in units of `1 / frequency` seconds.
    pub timestamp: u64,
    /// Timestamp units per second.
    pub frequency: u64,
}

impl Tick {
    /// Builds a tick from a nanosecond timestamp.
    pub fn from_nanos(nanos: u64) -> Self {
        Self {
            timestamp: nanos,
            frequency: TICK_FREQUENCY,
        }
    }

    /// Elapsed seconds represented by this tick.
    pub fn seconds(&self) -> f64 {
        self.timestamp as f64 / self.frequency.max(1) as f64
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    #[error("display reports no refresh rate; frame clock unavailable")]
    NoDisplaySignal,
    #[error("frame clock already started")]
    AlreadyStarted,
}

/// Refresh rate of the display backing the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRate {
    millihertz: u32,
}

impl RefreshRate {
    /// Validates a refresh rate reported in millihertz (winit's unit).
    ///
    /// A zero rate means the platform could not provide one and the clock
    /// cannot be acquired.
    pub fn from_millihertz(millihertz: u32) -> Result<Self, ClockError> {
        if millihertz == 0 {
            return Err(ClockError::NoDisplaySignal);
        }
        Ok(Self { millihertz })
    }

    pub fn hertz(&self) -> f64 {
        self.millihertz as f64 / 1000.0
    }

    /// Duration of one refresh period.
    pub fn interval(&self) -> Duration {
        let nanos = 1_000_000_000_000u64 / self.millihertz as u64;
        Duration::from_nanos(nanos.max(1))
    }
}

enum TickStream {
    /// Paced off the display refresh interval; timestamps are measured from
    /// the moment the clock was created.
    Display {
        every: Receiver<Instant>,
        origin: Instant,
    },
    /// Pre-made ticks fed by the caller (synthetic sources, tests).
    External { ticks: Receiver<Tick> },
}

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Periodic callback source bound to one display (or one injected stream).
///
/// Owns a single callback registration: `start` once, `stop` once (or drop).
pub struct FrameClock {
    stream: Option<TickStream>,
    worker: Option<Worker>,
}

impl FrameClock {
    /// Clock paced by the display's refresh interval.
    pub fn for_display(rate: RefreshRate) -> Self {
        let origin = Instant::now();
        let every = crossbeam_channel::tick(rate.interval());
        Self {
            stream: Some(TickStream::Display { every, origin }),
            worker: None,
        }
    }

    /// Clock driven by an external tick channel. Closing the channel ends the
    /// worker as if the display signal disappeared.
    pub fn from_ticks(ticks: Receiver<Tick>) -> Self {
        Self {
            stream: Some(TickStream::External { ticks }),
            worker: None,
        }
    }

    /// Spawns the worker thread and begins delivering ticks to `callback`.
    ///
    /// Returns immediately. Fails if the clock is already running or was
    /// already run to completion; the registration is single-use.
    pub fn start<F>(&mut self, callback: F) -> Result<(), ClockError>
    where
        F: FnMut(Tick) + Send + 'static,
    {
        if self.worker.is_some() {
            return Err(ClockError::AlreadyStarted);
        }
        let stream = self.stream.take().ok_or(ClockError::AlreadyStarted)?;
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("frame-clock".into())
            .spawn(move || run_worker(stream, stop_rx, callback))
            .expect("failed to spawn frame clock thread");
        self.worker = Some(Worker {
            stop: stop_tx,
            handle,
        });
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Halts tick delivery and joins the worker thread.
    ///
    /// When this returns, no callback invocation is in flight and none will
    /// begin. Idempotent.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop.send(());
            if worker.handle.join().is_err() {
                tracing::error!("frame clock worker panicked");
            }
        }
    }
}

impl Drop for FrameClock {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker<F>(stream: TickStream, stop: Receiver<()>, mut callback: F)
where
    F: FnMut(Tick),
{
    let mut last_timestamp: Option<u64> = None;
    loop {
        // A stop that raced in alongside a ready tick wins.
        if stop.try_recv().is_ok() {
            break;
        }
        let tick = match &stream {
            TickStream::Display { every, origin } => crossbeam_channel::select! {
                recv(stop) -> _ => break,
                recv(every) -> at => match at {
                    Ok(at) => Tick::from_nanos(
                        at.saturating_duration_since(*origin).as_nanos() as u64,
                    ),
                    Err(_) => break,
                },
            },
            TickStream::External { ticks } => crossbeam_channel::select! {
                recv(stop) -> _ => break,
                recv(ticks) -> tick => match tick {
                    Ok(tick) => tick,
                    Err(_) => break,
                },
            },
        };
        if let Some(previous) = last_timestamp {
            if tick.timestamp < previous {
                tracing::trace!(
                    timestamp = tick.timestamp,
                    previous,
                    "dropping out-of-order tick"
                );
                continue;
            }
        }
        last_timestamp = Some(tick.timestamp);
        callback(tick);
    }
}

/// How a [`RunWindow`] wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration elapsed.
    Elapsed,
    /// The paired [`CancelHandle`] fired first.
    Cancelled,
}

/// Cancellable bounded wait for the supervisor's `Running` phase.
///
/// Replaces a bare sleep: the wait can be cut short through the
/// [`CancelHandle`] without giving up the stop-then-join sequence that
/// follows it.
pub struct RunWindow {
    cancel: Receiver<()>,
    duration: Duration,
}

/// Fires the early exit of a [`RunWindow`]. Cloneable; any holder may cancel.
#[derive(Clone)]
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    /// Requests an early end of the run window. Safe to call repeatedly.
    pub fn cancel(&self) {
        let _ = self.tx.try_send(());
    }
}

impl RunWindow {
    pub fn new(duration: Duration) -> (Self, CancelHandle) {
        let (tx, rx) = bounded(1);
        (
            Self {
                cancel: rx,
                duration,
            },
            CancelHandle { tx },
        )
    }

    /// Blocks until the duration elapses or the handle cancels.
    pub fn wait(self) -> WaitOutcome {
        let deadline = Instant::now() + self.duration;
        match self.cancel.recv_deadline(deadline) {
            Ok(()) => WaitOutcome::Cancelled,
            Err(RecvTimeoutError::Timeout) => WaitOutcome::Elapsed,
            Err(RecvTimeoutError::Disconnected) => {
                // Every handle was dropped; honour the remaining duration.
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                }
                WaitOutcome::Elapsed
            }
        }
    }
}
