//! Camera follow with explicit state
//!
//! The follow target and the highest point the player has reached are plain
//! fields reset by the world rebuild - no hidden persistent state behind a
//! follow routine. The view rect feeds orb spawning and enemy placement, so
//! camera state is simulation state, not presentation.

use glam::Vec2;

use super::rect::Rect;

#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space point the view is centered on
    pub target: Vec2,
    view_w: f32,
    view_h: f32,
    /// Smallest (highest on screen) center-Y the player has reached this run
    pub highest_y: f32,
}

impl Camera {
    pub fn new(view_w: f32, view_h: f32, initial_target: Vec2) -> Self {
        Self {
            target: initial_target,
            view_w,
            view_h,
            highest_y: initial_target.y,
        }
    }

    /// Track the focus rect's center. A non-finite position is logged and
    /// skipped for the frame; the position itself is not corrected.
    pub fn follow(&mut self, focus: &Rect) {
        if !focus.x.is_finite() || !focus.y.is_finite() {
            log::error!("player position is not finite, skipping camera follow");
            return;
        }
        self.target = focus.center();
        if self.target.y < self.highest_y {
            self.highest_y = self.target.y;
        }
    }

    /// The world-space rectangle currently visible.
    pub fn view_rect(&self) -> Rect {
        Rect::new(
            self.target.x - self.view_w / 2.0,
            self.target.y - self.view_h / 2.0,
            self.view_w,
            self.view_h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_centers_view_on_focus() {
        let mut cam = Camera::new(600.0, 600.0, Vec2::new(300.0, 300.0));
        cam.follow(&Rect::new(1000.0, 500.0, 64.0, 64.0));
        assert_eq!(cam.target, Vec2::new(1032.0, 532.0));

        let view = cam.view_rect();
        assert_eq!(view.x, 1032.0 - 300.0);
        assert_eq!(view.y, 532.0 - 300.0);
        assert_eq!(view.w, 600.0);
    }

    #[test]
    fn nan_focus_is_skipped_without_correction() {
        let mut cam = Camera::new(600.0, 600.0, Vec2::new(300.0, 300.0));
        cam.follow(&Rect::new(f32::NAN, 500.0, 64.0, 64.0));
        // Target untouched, and still finite
        assert_eq!(cam.target, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn highest_y_only_decreases() {
        let mut cam = Camera::new(600.0, 600.0, Vec2::new(0.0, 500.0));
        cam.follow(&Rect::new(0.0, 100.0, 64.0, 64.0));
        let high = cam.highest_y;
        assert!(high < 500.0);

        // Dropping back down does not move the high-water mark
        cam.follow(&Rect::new(0.0, 400.0, 64.0, 64.0));
        assert_eq!(cam.highest_y, high);
    }
}
