//! Scene description and frame loop
//!
//! The scene owns every body, works out per-axis boundary collision flags
//! for each ball, steps the physics and draws everything in paint order
//! (platforms under balls).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::moving_body::MovingBody;
use super::static_body::StaticBody;
use crate::consts::*;
use crate::renderer::vertex::colors;
use crate::renderer::{Drawable, RenderTarget, Rgb};
use crate::settings::Settings;

/// Axis-aligned arena the balls bounce inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        }
    }
}

impl Arena {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Per-axis flags for a ball touching an arena edge while moving into it
    ///
    /// A ball already heading away from the wall is not flagged again, which
    /// keeps it from sticking when it overshoots the boundary.
    pub fn collision_flags(&self, ball: &MovingBody) -> (bool, bool) {
        let pos = ball.position();
        let vel = ball.speed();
        let r = ball.radius();

        let hit_x = (pos.x - r <= self.min.x && vel.x < 0.0)
            || (pos.x + r >= self.max.x && vel.x > 0.0);
        let hit_y = (pos.y - r <= self.min.y && vel.y < 0.0)
            || (pos.y + r >= self.max.y && vel.y > 0.0);
        (hit_x, hit_y)
    }
}

fn default_ball_radius() -> f32 {
    BALL_RADIUS
}

fn default_ball_color() -> Rgb {
    colors::BALL
}

fn default_platform_length() -> f32 {
    PLATFORM_LENGTH
}

fn default_platform_width() -> f32 {
    PLATFORM_WIDTH
}

fn default_platform_color() -> Rgb {
    colors::PLATFORM
}

fn default_gravity() -> f32 {
    GRAVITY
}

/// Ball entry in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallConfig {
    pub position: Vec2,
    #[serde(default = "default_ball_radius")]
    pub radius: f32,
    #[serde(default = "default_ball_color")]
    pub color: Rgb,
    /// Initial velocity; a seeded random horizontal speed when omitted
    #[serde(default)]
    pub speed: Option<Vec2>,
}

/// Platform entry in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub center: Vec2,
    #[serde(default = "default_platform_length")]
    pub length: f32,
    #[serde(default = "default_platform_width")]
    pub width: f32,
    #[serde(default = "default_platform_color")]
    pub color: Rgb,
}

/// Everything needed to build a `Scene`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub arena: Arena,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Seed for the launch-speed jitter
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub balls: Vec<BallConfig>,
    #[serde(default)]
    pub platforms: Vec<PlatformConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let center = Arena::default().size() / 2.0;
        Self {
            arena: Arena::default(),
            gravity: GRAVITY,
            seed: 0,
            balls: vec![BallConfig {
                position: Vec2::new(center.x, center.y - 300.0),
                radius: BALL_RADIUS,
                color: colors::BALL,
                speed: None,
            }],
            platforms: vec![PlatformConfig {
                center,
                length: PLATFORM_LENGTH,
                width: PLATFORM_WIDTH,
                color: colors::PLATFORM,
            }],
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON scene description
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid scene JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a scene description from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("failed to load scene {}", path.display()))?;
        log::info!(
            "Loaded scene from {} ({} balls, {} platforms)",
            path.display(),
            config.balls.len(),
            config.platforms.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.gravity.is_finite(), "gravity must be finite");
        ensure!(
            self.arena.min.is_finite() && self.arena.max.is_finite(),
            "arena bounds must be finite"
        );
        ensure!(
            self.arena.min.cmplt(self.arena.max).all(),
            "arena must have positive width and height"
        );
        for (i, ball) in self.balls.iter().enumerate() {
            ensure!(ball.position.is_finite(), "ball {i}: position must be finite");
            ensure!(
                ball.radius.is_finite() && ball.radius > 0.0,
                "ball {i}: radius must be positive"
            );
            if let Some(speed) = ball.speed {
                ensure!(speed.is_finite(), "ball {i}: speed must be finite");
            }
        }
        for (i, platform) in self.platforms.iter().enumerate() {
            ensure!(
                platform.center.is_finite(),
                "platform {i}: center must be finite"
            );
            ensure!(
                platform.length.is_finite() && platform.width.is_finite(),
                "platform {i}: length and width must be finite"
            );
            ensure!(
                platform.length > 0.0 && platform.width > 0.0,
                "platform {i}: length and width must be positive"
            );
        }
        Ok(())
    }
}

/// Camera tracking parameters
#[derive(Debug, Clone, Copy, PartialEq)]
struct Follow {
    viewport: Vec2,
    smoothing: f32,
}

/// A running scene
#[derive(Debug, Clone)]
pub struct Scene {
    arena: Arena,
    balls: Vec<MovingBody>,
    platforms: Vec<StaticBody>,
    camera: Camera,
    follow: Option<Follow>,
    /// Integrated frame counter
    frame: u64,
    elapsed_ms: f64,
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);

        let balls = config
            .balls
            .iter()
            .map(|b| {
                let mut ball = MovingBody::new(b.position, b.radius, b.color, config.gravity);
                let speed = b.speed.unwrap_or_else(|| {
                    Vec2::new(
                        rng.random_range(-BALL_JITTER_SPEED..=BALL_JITTER_SPEED),
                        0.0,
                    )
                });
                ball.set_speed(Some(speed.x), Some(speed.y));
                ball
            })
            .collect();

        let platforms = config
            .platforms
            .iter()
            .map(|p| StaticBody::new(p.center, p.length, p.width, p.color))
            .collect();

        Self {
            arena: config.arena,
            balls,
            platforms,
            camera: Camera::default(),
            follow: None,
            frame: 0,
            elapsed_ms: 0.0,
        }
    }

    /// Apply camera behavior from the render settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.follow = settings.camera_follow.then(|| Follow {
            viewport: settings.viewport(),
            smoothing: settings.camera_smoothing,
        });
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn balls(&self) -> &[MovingBody] {
        &self.balls
    }

    pub fn balls_mut(&mut self) -> &mut [MovingBody] {
        &mut self.balls
    }

    pub fn platforms(&self) -> &[StaticBody] {
        &self.platforms
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Advance every ball by one frame of `dt_millis`
    ///
    /// Returns false when the frame time is unusable (negative or
    /// non-finite) and nothing was integrated. Long frames are clamped to
    /// `MAX_FRAME_MS`.
    pub fn step(&mut self, dt_millis: f32) -> bool {
        if !dt_millis.is_finite() || dt_millis < 0.0 {
            log::warn!("Skipping frame {} with bad frame time {dt_millis}", self.frame);
            return false;
        }
        let dt = dt_millis.min(MAX_FRAME_MS);

        for ball in &mut self.balls {
            let (hit_x, hit_y) = self.arena.collision_flags(ball);
            if hit_x || hit_y {
                log::trace!("Bounce at {:?} (x: {hit_x}, y: {hit_y})", ball.position());
            }
            ball.update(hit_x, hit_y, dt);
        }

        if let (Some(follow), Some(ball)) = (self.follow, self.balls.first()) {
            self.camera
                .follow(ball.position(), follow.viewport, follow.smoothing);
        }

        self.frame += 1;
        self.elapsed_ms += dt as f64;
        log::debug!(
            "Frame {} dt={dt:.2}ms camera={:?}",
            self.frame,
            self.camera.offset
        );
        true
    }

    /// Every body in paint order
    pub fn drawables(&self) -> impl Iterator<Item = &dyn Drawable> {
        let platforms = self.platforms.iter().map(|p| p as &dyn Drawable);
        let balls = self.balls.iter().map(|b| b as &dyn Drawable);
        platforms.chain(balls)
    }

    /// Draw the whole scene through the current camera
    pub fn render(&self, target: &mut dyn RenderTarget) {
        let offset = self.camera.offset;
        for body in self.drawables() {
            body.draw(target, offset);
        }
    }
}
