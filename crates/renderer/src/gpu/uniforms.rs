use bytemuck::{Pod, Zeroable};

use crate::frame::SurfaceBounds;

/// CPU mirror of the shader's `EffectParams` block (std140).
///
/// Two logical uniforms: the surface bounds as `(0, 0, width, height)` and
/// elapsed seconds. The trailing padding keeps the struct at the block's
/// 16-byte-aligned size.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct EffectUniforms {
    bounds: [f32; 4],
    time: f32,
    _padding: [f32; 3],
}

unsafe impl Zeroable for EffectUniforms {}
unsafe impl Pod for EffectUniforms {}

impl EffectUniforms {
    pub fn new(bounds: SurfaceBounds) -> Self {
        Self {
            bounds: bounds.as_vec4(),
            time: 0.0,
            _padding: [0.0; 3],
        }
    }

    /// Sets both per-frame values; called once per tick before upload.
    pub fn set_frame(&mut self, bounds: SurfaceBounds, seconds: f32) {
        self.bounds = bounds.as_vec4();
        self.time = seconds;
    }

    #[cfg(test)]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[cfg(test)]
    pub fn bounds(&self) -> [f32; 4] {
        self.bounds
    }
}
