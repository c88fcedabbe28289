//! Shape generation for 2D primitives
//!
//! Tessellates circles and rounded rectangles into triangle lists, and
//! `MeshBuilder` collects them frame by frame for GPU upload.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;
use super::{RenderTarget, Rgb};
use crate::settings::QualityPreset;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    push_fan(&mut vertices, center, radius, 0.0, 2.0 * PI, segments, color);
    vertices
}

/// Generate vertices for a filled rectangle with rounded corners
///
/// The corner radius is clamped to half the shorter side, so a radius of
/// `height / 2` on a wide rectangle gives a capsule.
pub fn rounded_rect(
    top_left: Vec2,
    size: Vec2,
    corner_radius: f32,
    color: [f32; 4],
    corner_segments: u32,
) -> Vec<Vertex> {
    let Some(r) = fit_corner_radius(top_left, size, corner_radius) else {
        return Vec::new();
    };
    if r <= 0.0 {
        let mut vertices = Vec::with_capacity(6);
        push_quad(&mut vertices, top_left, top_left + size, color);
        return vertices;
    }

    let mut vertices = Vec::with_capacity(18 + (corner_segments * 12) as usize);
    let bottom_right = top_left + size;

    // Full-height middle band, then the two side bands between the corners
    push_quad(
        &mut vertices,
        Vec2::new(top_left.x + r, top_left.y),
        Vec2::new(bottom_right.x - r, bottom_right.y),
        color,
    );
    push_quad(
        &mut vertices,
        Vec2::new(top_left.x, top_left.y + r),
        Vec2::new(top_left.x + r, bottom_right.y - r),
        color,
    );
    push_quad(
        &mut vertices,
        Vec2::new(bottom_right.x - r, top_left.y + r),
        Vec2::new(bottom_right.x, bottom_right.y - r),
        color,
    );

    // Corner fans (y grows downward, angles follow screen space)
    let corners = [
        (Vec2::new(bottom_right.x - r, bottom_right.y - r), 0.0),
        (Vec2::new(top_left.x + r, bottom_right.y - r), FRAC_PI_2),
        (Vec2::new(top_left.x + r, top_left.y + r), PI),
        (Vec2::new(bottom_right.x - r, top_left.y + r), PI + FRAC_PI_2),
    ];
    for (center, start) in corners {
        push_fan(
            &mut vertices,
            center,
            r,
            start,
            FRAC_PI_2,
            corner_segments,
            color,
        );
    }

    vertices
}

/// Corner radius clamped to half the shorter side
///
/// `None` when the rectangle is empty, inverted or not finite.
pub(crate) fn fit_corner_radius(top_left: Vec2, size: Vec2, corner_radius: f32) -> Option<f32> {
    if !(top_left.is_finite() && size.is_finite() && size.x > 0.0 && size.y > 0.0) {
        return None;
    }
    let max_r = size.x.min(size.y) / 2.0;
    Some(corner_radius.min(max_r).max(0.0))
}

fn push_quad(vertices: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    // Two triangles
    vertices.push(Vertex::new(min.x, min.y, color));
    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(min.x, max.y, color));

    vertices.push(Vertex::new(min.x, max.y, color));
    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(max.x, max.y, color));
}

fn push_fan(
    vertices: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    start: f32,
    span: f32,
    segments: u32,
    color: [f32; 4],
) {
    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Render target that accumulates triangles for one frame
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    circle_segments: u32,
    corner_segments: u32,
}

impl MeshBuilder {
    pub fn new(circle_segments: u32, corner_segments: u32) -> Self {
        Self {
            vertices: Vec::new(),
            circle_segments: circle_segments.max(3),
            corner_segments: corner_segments.max(1),
        }
    }

    /// Segment counts taken from the quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self::new(preset.circle_segments(), preset.corner_segments())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Packed vertex data, ready for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl RenderTarget for MeshBuilder {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.vertices.extend(circle(
            center,
            radius,
            color.to_rgba(1.0),
            self.circle_segments,
        ));
    }

    fn fill_rounded_rect(&mut self, top_left: Vec2, size: Vec2, corner_radius: f32, color: Rgb) {
        self.vertices.extend(rounded_rect(
            top_left,
            size,
            corner_radius,
            color.to_rgba(1.0),
            self.corner_segments,
        ));
    }
}
