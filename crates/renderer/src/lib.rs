//! Renderer crate for glowlay.
//!
//! Glues the transparent overlay window, the `wgpu` pipeline, and the
//! per-tick render step together. The overall flow is:
//!
//! ```text
//!   CLI / glowlay
//!          │ OverlayConfig
//!          ▼
//!   OverlayWindow ──▶ GpuContext ──▶ EffectPipeline ──▶ GpuState
//!                                                          │
//!   frame clock tick ──▶ FrameState::render ──▶ uniforms ──┴─▶ draw + present
//! ```
//!
//! [`GpuState`] owns every GPU resource needed to present a frame; the quad
//! geometry and pipeline never change after setup, so each tick only writes
//! the two-field uniform block and replays the same indexed draw.
//! [`FrameState`] is the piece shared with the clock thread: surface bounds
//! plus a mutex around the frame sink.

mod compile;
mod effects;
mod frame;
mod gpu;
mod types;
mod window;

pub use effects::EffectKind;
pub use frame::{FrameSink, FrameState, SurfaceBounds, TickOutcome};
pub use gpu::{EffectPipeline, GpuContext, GpuState};
pub use types::{Antialiasing, OverlayConfig};
pub use window::OverlayWindow;
