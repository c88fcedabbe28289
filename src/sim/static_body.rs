//! Fixed capsule-shaped platform

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::{Drawable, RenderTarget, Rgb};

/// A platform drawn as a rectangle with fully rounded short ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticBody {
    center: Vec2,
    /// Horizontal extent
    length: f32,
    /// Vertical extent
    width: f32,
    color: Rgb,
}

impl StaticBody {
    pub fn new(center: Vec2, length: f32, width: f32, color: Rgb) -> Self {
        Self {
            center,
            length,
            width,
            color,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Screen-space top-left corner for the given camera offset
    pub fn top_left(&self, camera_offset: Vec2) -> Vec2 {
        Vec2::new(
            self.center.x - self.length / 2.0 - camera_offset.x,
            self.center.y - self.width / 2.0 - camera_offset.y,
        )
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.length, self.width)
    }

    pub fn corner_radius(&self) -> f32 {
        self.width / 2.0
    }
}

impl Drawable for StaticBody {
    fn draw(&self, target: &mut dyn RenderTarget, camera_offset: Vec2) {
        target.fill_rounded_rect(
            self.top_left(camera_offset),
            self.size(),
            self.corner_radius(),
            self.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandBuffer, DrawCommand};

    fn platform() -> StaticBody {
        StaticBody::new(Vec2::new(100.0, 100.0), 50.0, 20.0, Rgb::BLACK)
    }

    #[test]
    fn test_draw_geometry() {
        let mut buf = CommandBuffer::new();
        platform().draw(&mut buf, Vec2::ZERO);
        assert_eq!(
            buf.commands(),
            &[DrawCommand::RoundedRect {
                top_left: Vec2::new(75.0, 90.0),
                size: Vec2::new(50.0, 20.0),
                corner_radius: 10.0,
                color: Rgb::BLACK,
            }]
        );
    }

    #[test]
    fn test_camera_offset_shifts_corner() {
        let p = platform();
        assert_eq!(p.top_left(Vec2::new(25.0, -10.0)), Vec2::new(50.0, 100.0));
    }

    #[test]
    fn test_draw_twice_is_identical() {
        let p = platform();
        let cam = Vec2::new(3.5, 7.25);
        let mut a = CommandBuffer::new();
        let mut b = CommandBuffer::new();
        p.draw(&mut a, cam);
        p.draw(&mut b, cam);
        assert_eq!(a, b);
        assert_eq!(p, platform());
    }
}
