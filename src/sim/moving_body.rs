//! The bouncing ball
//!
//! Integration is time-based: position picks up the gravity displacement of
//! the current step using the velocity from before the step, then velocity
//! is advanced. Collision flags come from the caller; the body never looks
//! at scene geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::RESTITUTION;
use crate::millis_to_secs;
use crate::renderer::{Drawable, RenderTarget, Rgb};

/// A ball under constant downward gravity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingBody {
    pos: Vec2,
    vel: Vec2,
    gravity: f32,
    radius: f32,
    color: Rgb,
}

impl MovingBody {
    /// Create a ball at rest
    pub fn new(pos: Vec2, radius: f32, color: Rgb, gravity: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            gravity,
            radius,
            color,
        }
    }

    /// Advance the ball by `dt_millis` milliseconds
    ///
    /// Bounces are applied after integration, so a flagged axis reverses the
    /// velocity that the next frame will use. Non-finite input propagates
    /// into the state unchanged.
    pub fn update(&mut self, collided_x: bool, collided_y: bool, dt_millis: f32) {
        let dt = millis_to_secs(dt_millis);

        self.pos.x += self.vel.x * dt;
        self.pos.y += self.vel.y * dt + self.gravity * dt * dt / 2.0;
        self.vel.y += self.gravity * dt;

        if collided_x {
            self.vel.x *= RESTITUTION;
        }
        if collided_y {
            self.vel.y *= RESTITUTION;
        }
    }

    /// Set either coordinate; `None` keeps the current value
    pub fn set_position(&mut self, x: Option<f32>, y: Option<f32>) {
        if let Some(x) = x {
            self.pos.x = x;
        }
        if let Some(y) = y {
            self.pos.y = y;
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Set either velocity component; `None` keeps the current value
    pub fn set_speed(&mut self, x: Option<f32>, y: Option<f32>) {
        if let Some(x) = x {
            self.vel.x = x;
        }
        if let Some(y) = y {
            self.vel.y = y;
        }
    }

    pub fn speed(&self) -> Vec2 {
        self.vel
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

impl Drawable for MovingBody {
    fn draw(&self, target: &mut dyn RenderTarget, camera_offset: Vec2) {
        target.fill_circle(self.pos - camera_offset, self.radius, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandBuffer, DrawCommand};
    use proptest::prelude::*;

    fn ball(gravity: f32) -> MovingBody {
        MovingBody::new(Vec2::new(100.0, 200.0), 10.0, Rgb::new(255, 0, 0), gravity)
    }

    #[test]
    fn test_new_ball_is_at_rest() {
        let b = ball(9.8);
        assert_eq!(b.position(), Vec2::new(100.0, 200.0));
        assert_eq!(b.speed(), Vec2::ZERO);
        assert_eq!(b.gravity(), 9.8);
        assert_eq!(b.radius(), 10.0);
        assert_eq!(b.color(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_gravity_term_uses_pre_step_velocity() {
        let mut b = ball(1000.0);
        b.update(false, false, 1000.0);
        assert!((b.position().y - 700.0).abs() < 1e-3);
        assert!((b.speed().y - 1000.0).abs() < 1e-3);
        assert_eq!(b.position().x, 100.0);
    }

    #[test]
    fn test_horizontal_motion_is_linear() {
        let mut b = ball(0.0);
        b.set_speed(Some(50.0), None);
        b.update(false, false, 500.0);
        assert!((b.position().x - 125.0).abs() < 1e-4);
        assert_eq!(b.speed().x, 50.0);
    }

    #[test]
    fn test_bounce_with_zero_dt() {
        let mut b = ball(0.0);
        b.set_speed(Some(10.0), None);
        b.update(true, false, 0.0);
        assert!((b.speed().x + 9.0).abs() < 1e-5);
        assert_eq!(b.position(), Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_bounce_applies_after_integration() {
        let mut b = ball(1000.0);
        b.set_speed(None, Some(100.0));
        b.update(false, true, 100.0);
        // Moved down with the old velocity, then the new velocity flipped
        assert!((b.position().y - 215.0).abs() < 1e-3);
        assert!((b.speed().y + 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_partial_setters() {
        let mut b = ball(0.0);
        b.set_position(Some(5.0), None);
        assert_eq!(b.position(), Vec2::new(5.0, 200.0));
        b.set_position(None, Some(7.0));
        assert_eq!(b.position(), Vec2::new(5.0, 7.0));
        b.set_position(None, None);
        assert_eq!(b.position(), Vec2::new(5.0, 7.0));

        b.set_speed(None, Some(-3.0));
        assert_eq!(b.speed(), Vec2::new(0.0, -3.0));
        b.set_speed(Some(4.0), None);
        assert_eq!(b.speed(), Vec2::new(4.0, -3.0));
    }

    #[test]
    fn test_non_finite_dt_propagates() {
        let mut b = ball(10.0);
        b.update(false, false, f32::NAN);
        assert!(b.position().y.is_nan());
        assert!(b.speed().y.is_nan());

        let mut b = ball(10.0);
        b.update(false, false, f32::INFINITY);
        assert!(!b.speed().y.is_finite());
    }

    #[test]
    fn test_non_finite_gravity_propagates() {
        let mut b = ball(f32::NAN);
        b.set_speed(Some(5.0), None);
        b.update(false, false, 16.0);
        assert!(b.speed().y.is_nan());
        assert!(b.position().y.is_nan());
        // Horizontal motion never touches gravity
        assert!((b.position().x - 100.08).abs() < 1e-4);
        assert_eq!(b.speed().x, 5.0);

        let mut b = ball(f32::INFINITY);
        b.update(false, false, 16.0);
        assert_eq!(b.speed().y, f32::INFINITY);
    }

    #[test]
    fn test_draw_is_camera_relative_and_pure() {
        let b = ball(0.0);
        let before = b.clone();
        let mut first = CommandBuffer::new();
        let mut second = CommandBuffer::new();
        b.draw(&mut first, Vec2::new(30.0, -20.0));
        b.draw(&mut second, Vec2::new(30.0, -20.0));

        assert_eq!(first, second);
        assert_eq!(b, before);
        assert_eq!(
            first.commands(),
            &[DrawCommand::Circle {
                center: Vec2::new(70.0, 220.0),
                radius: 10.0,
                color: Rgb::new(255, 0, 0),
            }]
        );
    }

    proptest! {
        #[test]
        fn prop_velocity_gains_gravity_times_dt(
            gravity in -2000.0f32..2000.0,
            dt in 0.1f32..100.0,
            vy in -500.0f32..500.0,
        ) {
            let mut b = ball(gravity);
            b.set_speed(None, Some(vy));
            b.update(false, false, dt);
            let expected = vy + gravity * dt / 1000.0;
            prop_assert!((b.speed().y - expected).abs() <= 1e-3 * (1.0 + expected.abs()));
        }

        #[test]
        fn prop_repeated_bounces_shrink_speed(vx in -1000.0f32..1000.0, vy in -1000.0f32..1000.0) {
            let mut b = ball(0.0);
            b.set_speed(Some(vx), Some(vy));
            let mut last = b.speed().length();
            for _ in 0..20 {
                b.update(true, true, 0.0);
                let now = b.speed().length();
                prop_assert!(now <= last);
                last = now;
            }
            prop_assert!(last <= 0.9f32.powi(20) * Vec2::new(vx, vy).length() + 1e-3);
        }
    }
}
