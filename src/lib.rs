//! Emberknight - entity simulation core for a 2D side-scrolling action game
//!
//! The player fights waves of enemies across tile-based levels. Everything
//! gameplay-related lives in `sim`: physics, collision resolution, the
//! animation/behavior state machines, combat, enemy AI, and the level
//! lifecycle controller. Rendering, audio, asset decoding and raw input
//! capture are host concerns; the core exposes read-only sprite views and
//! drains `GameEvent`s for them.

pub mod sim;

pub use sim::level::{LevelData, builtin_levels};
pub use sim::player::InputState;
pub use sim::world::{GameEvent, World};

/// Game configuration constants
pub mod consts {
    /// Side length of a solid collision tile, in pixels
    pub const TILE_SIZE: f32 = 16.0;
    /// Collision maps are flat row-major sequences chunked into rows this wide
    pub const COLLISION_MAP_COLUMNS: usize = 200;

    /// Viewport the camera is clamped against
    pub const VIEWPORT_WIDTH: f32 = 1200.0;
    pub const VIEWPORT_HEIGHT: f32 = 650.0;

    /// Default delay between animation frames, in milliseconds
    pub const FRAME_INTERVAL_MS: f64 = 100.0;
}

/// Horizontal facing as a signed unit factor (+1 right, -1 left)
#[inline]
pub fn facing_sign(facing_right: bool) -> f32 {
    if facing_right { 1.0 } else { -1.0 }
}
