//! Music Visualizer - bouncing balls over rounded platforms
//!
//! Core modules:
//! - `sim`: Ball/platform bodies, physics step, scene loop and camera
//! - `renderer`: Drawing surface abstraction and its concrete targets
//! - `settings`: Render preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use renderer::{Drawable, RenderTarget, Rgb};
pub use settings::{QualityPreset, Settings};
pub use sim::{Camera, MovingBody, Scene, SceneConfig, StaticBody};

/// Visualizer configuration constants
pub mod consts {
    /// Velocity multiplier applied on a bounce (sign flip + 10% loss)
    pub const RESTITUTION: f32 = -0.9;

    /// Longest frame the scene loop will integrate in one step (ms)
    pub const MAX_FRAME_MS: f32 = 100.0;
    /// Frame length used by the headless demo (60 Hz)
    pub const DEMO_FRAME_MS: f32 = 1000.0 / 60.0;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 1000.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Downward acceleration in pixels/s²
    pub const GRAVITY: f32 = 980.0;
    /// Horizontal launch speed range for balls without an explicit speed
    pub const BALL_JITTER_SPEED: f32 = 250.0;

    /// Platform defaults
    pub const PLATFORM_LENGTH: f32 = 100.0;
    pub const PLATFORM_WIDTH: f32 = 20.0;
}

/// Convert milliseconds to seconds
#[inline]
pub fn millis_to_secs(ms: f32) -> f32 {
    ms / 1000.0
}
