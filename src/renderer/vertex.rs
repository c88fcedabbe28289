//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Default colors for visualizer elements
pub mod colors {
    use crate::renderer::Rgb;

    pub const BACKGROUND: Rgb = Rgb::new(255, 255, 255);
    pub const BALL: Rgb = Rgb::new(220, 40, 90);
    pub const PLATFORM: Rgb = Rgb::new(0, 0, 0);
}
