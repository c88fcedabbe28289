//! Scrolling camera
//!
//! The camera is just a world-space offset that every body subtracts from
//! its coordinates when drawing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    pub fn new(offset: Vec2) -> Self {
        Self { offset }
    }

    /// Offset that makes the pointer position act as the view anchor
    ///
    /// Moving the pointer away from `anchor` scrolls the view by the same
    /// amount, which is handy for poking at a scene by hand.
    pub fn from_pointer(pointer: Vec2, anchor: Vec2) -> Self {
        Self::new(pointer - anchor)
    }

    /// Ease toward centering `target` in a viewport of the given size
    ///
    /// `smoothing` is the fraction of the remaining distance covered per
    /// call: 1.0 snaps, 0.0 never moves.
    pub fn follow(&mut self, target: Vec2, viewport: Vec2, smoothing: f32) {
        let desired = target - viewport / 2.0;
        let t = smoothing.clamp(0.0, 1.0);
        self.offset += (desired - self.offset) * t;
    }
}
