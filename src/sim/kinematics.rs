//! Velocity integration and gravity
//!
//! Plain Euler steps on f32 state. Gravity pulls +y (down) and is capped at
//! a terminal fall speed so collision resolution stays well-conditioned.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::{GRAVITY_ACCEL, MAX_FALL_SPEED};

/// Accelerate `vel` downward, clamped to the terminal fall speed.
#[inline]
pub fn apply_gravity(vel: &mut Vec2, dt: f32) {
    apply_gravity_with(vel, GRAVITY_ACCEL, MAX_FALL_SPEED, dt);
}

/// Gravity with explicit constants, for tuned callers.
#[inline]
pub fn apply_gravity_with(vel: &mut Vec2, accel: f32, max_fall: f32, dt: f32) {
    vel.y += accel * dt;
    if vel.y > max_fall {
        vel.y = max_fall;
    }
}

/// Euler-step `rect` by `vel` over `dt`.
#[inline]
pub fn integrate(rect: &mut Rect, vel: Vec2, dt: f32) {
    rect.x += vel.x * dt;
    rect.y += vel.y * dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_accelerates_downward() {
        let mut vel = Vec2::ZERO;
        apply_gravity(&mut vel, 0.1);
        assert!((vel.y - 100.0).abs() < 0.001);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn gravity_caps_at_terminal_speed() {
        let mut vel = Vec2::new(0.0, 299.0);
        apply_gravity(&mut vel, 1.0);
        assert_eq!(vel.y, MAX_FALL_SPEED);

        // Already at cap: stays there
        apply_gravity(&mut vel, 1.0);
        assert_eq!(vel.y, MAX_FALL_SPEED);
    }

    #[test]
    fn integrate_moves_by_velocity_times_dt() {
        let mut rect = Rect::new(10.0, 20.0, 4.0, 4.0);
        integrate(&mut rect, Vec2::new(100.0, -50.0), 0.5);
        assert!((rect.x - 60.0).abs() < 0.001);
        assert!((rect.y - (-5.0)).abs() < 0.001);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        let mut vel = Vec2::new(5.0, 6.0);
        integrate(&mut rect, vel, 0.0);
        apply_gravity(&mut vel, 0.0);
        assert_eq!(rect, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(vel, Vec2::new(5.0, 6.0));
    }
}
