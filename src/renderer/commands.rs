//! Recorded draw calls
//!
//! `CommandBuffer` stores every primitive in paint order instead of
//! rasterizing it. Useful for inspecting a frame or replaying it onto
//! another target.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{RenderTarget, Rgb};

/// A single recorded primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
    },
    RoundedRect {
        top_left: Vec2,
        size: Vec2,
        corner_radius: f32,
        color: Rgb,
    },
}

/// Ordered list of draw commands for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all commands, keeping the allocation for the next frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Replay the recorded frame onto another target
    pub fn replay(&self, target: &mut dyn RenderTarget) {
        for cmd in &self.commands {
            match *cmd {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => target.fill_circle(center, radius, color),
                DrawCommand::RoundedRect {
                    top_left,
                    size,
                    corner_radius,
                    color,
                } => target.fill_rounded_rect(top_left, size, corner_radius, color),
            }
        }
    }
}

impl RenderTarget for CommandBuffer {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rounded_rect(&mut self, top_left: Vec2, size: Vec2, corner_radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::RoundedRect {
            top_left,
            size,
            corner_radius,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_paint_order() {
        let mut buf = CommandBuffer::new();
        buf.fill_rounded_rect(Vec2::ZERO, Vec2::new(10.0, 4.0), 2.0, Rgb::BLACK);
        buf.fill_circle(Vec2::new(5.0, 5.0), 3.0, Rgb::WHITE);

        assert_eq!(buf.len(), 2);
        assert!(matches!(buf.commands()[0], DrawCommand::RoundedRect { .. }));
        assert!(matches!(buf.commands()[1], DrawCommand::Circle { .. }));
    }

    #[test]
    fn test_replay_reproduces_frame() {
        let mut buf = CommandBuffer::new();
        buf.fill_circle(Vec2::new(1.0, 2.0), 3.0, Rgb::new(1, 2, 3));
        buf.fill_rounded_rect(Vec2::new(4.0, 5.0), Vec2::new(6.0, 2.0), 1.0, Rgb::WHITE);

        let mut copy = CommandBuffer::new();
        buf.replay(&mut copy);
        assert_eq!(buf, copy);

        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_command_json_shape() {
        let cmd = DrawCommand::Circle {
            center: Vec2::new(1.0, 2.0),
            radius: 3.0,
            color: Rgb::new(4, 5, 6),
        };
        let json = serde_json::to_value(cmd).unwrap();
        assert_eq!(json["kind"], "circle");
        assert_eq!(json["color"], serde_json::json!([4, 5, 6]));
    }
}
