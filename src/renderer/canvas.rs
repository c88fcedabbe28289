//! Software raster target
//!
//! A pixel is painted when its center lies inside the shape. Anything
//! outside the canvas is clipped silently.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use glam::Vec2;

use super::shapes::fit_corner_radius;
use super::{RenderTarget, Rgb};

/// RGB pixel buffer, row-major, origin top-left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![background; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Count of pixels with exactly this color
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Write the canvas to disk as a PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw: Vec<u8> = self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
        let img = image::RgbImage::from_raw(self.width, self.height, raw)
            .ok_or_else(|| anyhow!("pixel buffer does not match {}x{}", self.width, self.height))?;
        img.save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("Frame saved to {}", path.display());
        Ok(())
    }

    /// Clipped pixel range covering `[min, max]`
    fn span(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn fill_where(&mut self, min: Vec2, max: Vec2, color: Rgb, inside: impl Fn(Vec2) -> bool) {
        let Some((x0, y0, x1, y1)) = self.span(min, max) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if inside(p) {
                    if let Some(i) = self.idx(x, y) {
                        self.pixels[i] = color;
                    }
                }
            }
        }
    }
}

impl RenderTarget for Canvas {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        let r2 = radius * radius;
        let extent = Vec2::splat(radius);
        self.fill_where(center - extent, center + extent, color, |p| {
            p.distance_squared(center) <= r2
        });
    }

    fn fill_rounded_rect(&mut self, top_left: Vec2, size: Vec2, corner_radius: f32, color: Rgb) {
        let Some(r) = fit_corner_radius(top_left, size, corner_radius) else {
            return;
        };
        let bottom_right = top_left + size;
        let inner_min = top_left + Vec2::splat(r);
        let inner_max = bottom_right - Vec2::splat(r);
        self.fill_where(top_left, bottom_right, color, |p| {
            p.distance_squared(p.clamp(inner_min, inner_max)) <= r * r
        });
    }
}
