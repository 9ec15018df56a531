use std::sync::Arc;

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder, WindowLevel};

/// Borderless, transparent, always-on-top surface that ignores pointer input.
///
/// The window is created on the setup thread and then only read (its raw
/// handles feed surface creation, its monitor feeds refresh-rate detection).
/// It must outlive the GPU surface built on top of it, so the supervisor
/// keeps the `OverlayWindow` alive until after the clock has stopped.
pub struct OverlayWindow {
    window: Arc<Window>,
}

impl OverlayWindow {
    /// Builds the overlay surface at the requested physical size.
    pub fn create(event_loop: &EventLoop<()>, size: (u32, u32)) -> Result<Self> {
        let inner = PhysicalSize::new(size.0.max(1), size.1.max(1));
        let window = WindowBuilder::new()
            .with_title("glowlay")
            .with_inner_size(inner)
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .build(event_loop)
            .context("failed to create overlay window")?;

        // Let clicks fall through to whatever is underneath. Some platforms
        // refuse; the overlay still works, it just swallows input.
        if let Err(err) = window.set_cursor_hittest(false) {
            tracing::warn!(error = %err, "platform rejected click-through hit testing");
        }

        Ok(Self {
            window: Arc::new(window),
        })
    }

    pub fn window(&self) -> &Window {
        self.window.as_ref()
    }

    /// Physical size of the overlay surface.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Refresh rate of the monitor the overlay sits on, in millihertz.
    ///
    /// `None` when the platform cannot name a monitor or the monitor does not
    /// report a rate; the caller treats that as a missing display signal.
    pub fn refresh_rate_millihertz(&self) -> Option<u32> {
        self.window
            .current_monitor()
            .and_then(|monitor| monitor.refresh_rate_millihertz())
    }
}
