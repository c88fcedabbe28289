//! Rendering module
//!
//! Bodies draw through the `RenderTarget` trait and never hold a surface
//! themselves. Three targets are provided: a command recorder, a triangle
//! mesh builder for GPU upload, and a software raster canvas.

pub mod canvas;
pub mod commands;
pub mod shapes;
pub mod vertex;

pub use canvas::Canvas;
pub use commands::{CommandBuffer, DrawCommand};
pub use shapes::MeshBuilder;
pub use vertex::Vertex;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 24-bit RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA for vertex colors
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha,
        ]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// A 2D drawing surface taking pixel coordinates
pub trait RenderTarget {
    /// Fill a circle centered at `center`
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);

    /// Fill an axis-aligned rectangle with rounded corners
    fn fill_rounded_rect(&mut self, top_left: Vec2, size: Vec2, corner_radius: f32, color: Rgb);
}

/// Anything the scene loop can paint
///
/// `camera_offset` is subtracted from world coordinates before drawing.
pub trait Drawable {
    fn draw(&self, target: &mut dyn RenderTarget, camera_offset: Vec2);
}
