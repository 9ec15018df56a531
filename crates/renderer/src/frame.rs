use std::sync::Mutex;

/// Overlay surface bounds in physical pixels, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceBounds {
    pub width: u32,
    pub height: u32,
}

impl SurfaceBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// `(0, 0, width, height)` as pushed into the uniform block.
    pub fn as_vec4(&self) -> [f32; 4] {
        [0.0, 0.0, self.width as f32, self.height as f32]
    }
}

/// Destination of one frame: push the uniforms, draw, present.
///
/// [`GpuState`](crate::GpuState) is the production sink; tests substitute a
/// recording fake to observe the per-tick protocol without a GPU.
pub trait FrameSink: Send {
    fn submit(&mut self, bounds: SurfaceBounds, seconds: f32) -> Result<(), wgpu::SurfaceError>;
}

/// What became of one tick. Advisory only; the clock never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Presented,
    Dropped,
}

/// The state shared between the supervisor and the clock thread.
///
/// Bounds are written once at construction and only read afterwards; the
/// sink is the single cross-thread mutable resource, so it sits behind a
/// mutex held for the whole tick body. The supervisor stops the clock (join)
/// before tearing anything down, which is why an `Arc<FrameState<_>>` on the
/// clock thread can never observe freed state.
pub struct FrameState<S> {
    bounds: SurfaceBounds,
    sink: Mutex<S>,
}

impl<S: FrameSink> FrameState<S> {
    pub fn new(bounds: SurfaceBounds, sink: S) -> Self {
        Self {
            bounds,
            sink: Mutex::new(sink),
        }
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    /// Renders one frame at `seconds` of elapsed time.
    ///
    /// Exclusive access is acquired before the sink touches the GPU and
    /// released after the frame is presented; the acquire/release pair is
    /// balanced on every path out. A failed submission drops the frame, no
    /// retry, the next tick starts clean.
    pub fn render(&self, seconds: f32) -> TickOutcome {
        let Ok(mut sink) = self.sink.lock() else {
            // A previous tick panicked mid-frame; skip until torn down.
            return TickOutcome::Dropped;
        };
        match sink.submit(self.bounds, seconds) {
            Ok(()) => TickOutcome::Presented,
            Err(err) => {
                tracing::debug!(error = %err, "dropping frame after surface error");
                TickOutcome::Dropped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSink {
        frames: Vec<(SurfaceBounds, f32)>,
        fail_next: bool,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                frames: Vec::new(),
                fail_next: false,
            }
        }
    }

    impl FrameSink for RecordingSink {
        fn submit(
            &mut self,
            bounds: SurfaceBounds,
            seconds: f32,
        ) -> Result<(), wgpu::SurfaceError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(wgpu::SurfaceError::Lost);
            }
            self.frames.push((bounds, seconds));
            Ok(())
        }
    }

    #[test]
    fn bounds_encode_as_origin_plus_extent() {
        let bounds = SurfaceBounds::new(400, 300);
        assert_eq!(bounds.as_vec4(), [0.0, 0.0, 400.0, 300.0]);
    }

    #[test]
    fn zero_bounds_are_clamped() {
        let bounds = SurfaceBounds::new(0, 0);
        assert_eq!((bounds.width, bounds.height), (1, 1));
    }

    #[test]
    fn render_submits_exactly_once_per_call() {
        let state = FrameState::new(SurfaceBounds::new(400, 400), RecordingSink::new());
        assert_eq!(state.render(0.5), TickOutcome::Presented);
        assert_eq!(state.render(1.0), TickOutcome::Presented);
        let sink = state.sink.lock().unwrap();
        assert_eq!(sink.frames.len(), 2);
        assert_eq!(sink.frames[0].1, 0.5);
        assert_eq!(sink.frames[1].1, 1.0);
    }

    #[test]
    fn render_pushes_constant_bounds_every_frame() {
        let state = FrameState::new(SurfaceBounds::new(640, 480), RecordingSink::new());
        for step in 0..4 {
            state.render(step as f32 * 0.016);
        }
        let sink = state.sink.lock().unwrap();
        assert!(sink
            .frames
            .iter()
            .all(|(bounds, _)| *bounds == SurfaceBounds::new(640, 480)));
    }

    #[test]
    fn failed_submission_drops_the_frame_and_recovers() {
        let mut sink = RecordingSink::new();
        sink.fail_next = true;
        let state = FrameState::new(SurfaceBounds::new(400, 400), sink);
        assert_eq!(state.render(0.1), TickOutcome::Dropped);
        assert_eq!(state.render(0.2), TickOutcome::Presented);
        assert_eq!(state.sink.lock().unwrap().frames.len(), 1);
    }

    #[test]
    fn lock_is_released_after_every_render() {
        let state = FrameState::new(SurfaceBounds::new(400, 400), RecordingSink::new());
        state.render(0.1);
        assert!(state.sink.try_lock().is_ok());
        let mut failing = RecordingSink::new();
        failing.fail_next = true;
        let state = FrameState::new(SurfaceBounds::new(400, 400), failing);
        state.render(0.1);
        assert!(state.sink.try_lock().is_ok());
    }
}
