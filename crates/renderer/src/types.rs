use crate::effects::EffectKind;

/// Anti-aliasing policy for the render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Antialiasing {
    /// Disable MSAA and render directly into the swapchain.
    Off,
    /// Request a specific MSAA sample count (clamped to what the surface
    /// format supports).
    Samples(u32),
}

impl Default for Antialiasing {
    fn default() -> Self {
        Self::Samples(4)
    }
}

/// Immutable configuration passed to the renderer at start-up.
///
/// Mirrors the CLI surface: overlay size in physical pixels, the effect
/// variant to compile, and the anti-aliasing request. The overlay never
/// resizes, so the size recorded here is the size for the whole run.
#[derive(Debug, Clone, Copy)]
pub struct OverlayConfig {
    /// Overlay size in physical pixels.
    pub surface_size: (u32, u32),
    /// Fragment effect rendered every frame.
    pub effect: EffectKind,
    /// Anti-aliasing mode requested by the caller.
    pub antialiasing: Antialiasing,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            surface_size: (400, 400),
            effect: EffectKind::default(),
            antialiasing: Antialiasing::default(),
        }
    }
}
