//! GPU plumbing for the overlay: device/surface negotiation, the quad
//! pipeline, the uniform block, and the per-frame render state.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub use context::GpuContext;
pub use pipeline::EffectPipeline;
pub use state::GpuState;
