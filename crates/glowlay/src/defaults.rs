use std::time::Duration;

/// Overlay size when `--size` is not given, in physical pixels.
pub const SURFACE_SIZE: (u32, u32) = (400, 400);

/// Run length when `--duration` is not given.
pub const RUN_DURATION: Duration = Duration::from_secs(5);
