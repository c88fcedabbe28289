//! Simulation module
//!
//! Bodies, the physics step, the camera and the scene loop that drives
//! them. Nothing in here knows about a concrete rendering backend.

pub mod camera;
pub mod moving_body;
pub mod scene;
pub mod static_body;

pub use camera::Camera;
pub use moving_body::MovingBody;
pub use scene::{Arena, BallConfig, PlatformConfig, Scene, SceneConfig};
pub use static_body::StaticBody;
