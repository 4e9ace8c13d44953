//! Frame-clock sprite animation
//!
//! An `Animation` owns an immutable frame range into a sprite sheet row plus
//! a runtime cursor driven by a per-frame countdown. Advancement is pure
//! arithmetic on `dt`, so identical tick sequences produce identical frames.

use super::rect::Rect;

/// What happens when the cursor runs past the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loop {
    /// Wrap back to the first frame
    Repeating,
    /// Freeze on the final frame (death/attack animations)
    OneShot,
}

#[derive(Debug, Clone)]
pub struct Animation {
    first: usize,
    last: usize,
    cursor: usize,
    /// Row offset into the sprite sheet
    row: usize,
    frame_w: f32,
    frame_h: f32,
    /// Seconds each frame is shown
    frame_secs: f32,
    /// Countdown until the next frame
    remaining: f32,
    looping: Loop,
}

impl Animation {
    pub fn new(
        first: usize,
        last: usize,
        row: usize,
        frame_w: f32,
        frame_h: f32,
        frame_secs: f32,
        looping: Loop,
    ) -> Self {
        Self {
            first,
            last,
            cursor: first,
            row,
            frame_w,
            frame_h,
            frame_secs,
            remaining: frame_secs,
            looping,
        }
    }

    /// Advance the frame clock by `dt` seconds.
    ///
    /// The countdown only fires when it goes negative, so `advance(0.0)` is
    /// idempotent. Invariant: `cursor` stays within `[first, last]`.
    pub fn advance(&mut self, dt: f32) {
        self.remaining -= dt;
        if self.remaining < 0.0 {
            self.remaining = self.frame_secs;
            self.cursor += 1;
            if self.cursor > self.last {
                self.cursor = match self.looping {
                    Loop::Repeating => self.first,
                    Loop::OneShot => self.last,
                };
            }
        }
    }

    /// Source rectangle in sheet-pixel space for the current frame.
    /// The cursor is taken modulo the frame count defensively.
    pub fn frame_rect(&self) -> Rect {
        let col = self.cursor % (self.last + 1);
        Rect::new(
            col as f32 * self.frame_w,
            self.row as f32 * self.frame_h,
            self.frame_w,
            self.frame_h,
        )
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn last(&self) -> usize {
        self.last
    }
}

/// A per-entity set of animations indexed by the entity's behavior state.
///
/// An out-of-range state index is a reportable but non-fatal condition: it is
/// logged and the lookup yields `None` so the caller skips drawing that
/// entity for the frame. The simulation itself never stops.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    clips: Vec<Animation>,
}

impl AnimationSet {
    pub fn new(clips: Vec<Animation>) -> Self {
        Self { clips }
    }

    /// Advance the clip for `state_index`, if it exists.
    pub fn advance(&mut self, state_index: usize, dt: f32) {
        match self.clips.get_mut(state_index) {
            Some(clip) => clip.advance(dt),
            None => log::error!("invalid animation state index: {state_index}"),
        }
    }

    /// Current sheet-space frame rect for `state_index`.
    pub fn frame_for(&self, state_index: usize) -> Option<Rect> {
        match self.clips.get(state_index) {
            Some(clip) => Some(clip.frame_rect()),
            None => {
                log::error!("invalid animation state index: {state_index}");
                None
            }
        }
    }

    pub fn get(&self, state_index: usize) -> Option<&Animation> {
        self.clips.get(state_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clip(first: usize, last: usize, looping: Loop) -> Animation {
        Animation::new(first, last, 0, 16.0, 16.0, 0.1, looping)
    }

    #[test]
    fn advance_steps_through_frames() {
        let mut anim = clip(0, 3, Loop::Repeating);
        assert_eq!(anim.cursor(), 0);

        // A full frame duration has to elapse (go negative) before stepping
        anim.advance(0.05);
        assert_eq!(anim.cursor(), 0);
        anim.advance(0.06);
        assert_eq!(anim.cursor(), 1);
    }

    #[test]
    fn repeating_wraps_to_first() {
        let mut anim = clip(0, 1, Loop::Repeating);
        anim.advance(0.11);
        assert_eq!(anim.cursor(), 1);
        anim.advance(0.11);
        assert_eq!(anim.cursor(), 0);
    }

    #[test]
    fn oneshot_freezes_on_last_frame() {
        let mut anim = clip(0, 1, Loop::OneShot);
        anim.advance(0.11);
        anim.advance(0.11);
        assert_eq!(anim.cursor(), 1);
        anim.advance(0.11);
        assert_eq!(anim.cursor(), 1);
    }

    #[test]
    fn zero_dt_is_idempotent() {
        let mut anim = clip(0, 3, Loop::Repeating);
        anim.advance(0.05);
        let cursor = anim.cursor();
        for _ in 0..100 {
            anim.advance(0.0);
        }
        assert_eq!(anim.cursor(), cursor);
        // Frame rect unchanged as well
        assert_eq!(anim.frame_rect(), clip_rect_at(cursor));
    }

    fn clip_rect_at(col: usize) -> Rect {
        Rect::new(col as f32 * 16.0, 0.0, 16.0, 16.0)
    }

    #[test]
    fn frame_rect_uses_row_offset() {
        let anim = Animation::new(0, 2, 5, 16.0, 16.0, 0.1, Loop::Repeating);
        assert_eq!(anim.frame_rect(), Rect::new(0.0, 80.0, 16.0, 16.0));
    }

    #[test]
    fn invalid_state_index_yields_none() {
        let set = AnimationSet::new(vec![clip(0, 1, Loop::Repeating)]);
        assert!(set.frame_for(0).is_some());
        assert!(set.frame_for(7).is_none());
    }

    #[test]
    fn set_advance_out_of_range_does_not_panic() {
        let mut set = AnimationSet::new(vec![clip(0, 1, Loop::Repeating)]);
        set.advance(42, 0.1);
        assert_eq!(set.get(0).unwrap().cursor(), 0);
    }

    proptest! {
        #[test]
        fn cursor_stays_in_range(
            last in 0usize..8,
            steps in proptest::collection::vec(0.0f32..0.5, 0..200),
            repeating in proptest::bool::ANY,
        ) {
            let looping = if repeating { Loop::Repeating } else { Loop::OneShot };
            let mut anim = clip(0, last, looping);
            for dt in steps {
                anim.advance(dt);
                prop_assert!(anim.cursor() >= anim.first());
                prop_assert!(anim.cursor() <= anim.last());
            }
        }
    }
}
