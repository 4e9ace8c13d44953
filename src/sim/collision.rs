//! Axis-aligned collision resolution against rectangular obstacles
//!
//! The resolver reconstructs the entity's previous-frame position by
//! subtracting `vel * dt` from the current one - a cheap swept-position
//! approximation rather than true continuous detection, so a fast entity can
//! tunnel through a thin obstacle at low frame rates. That limitation is
//! accepted; substepping in the embedder keeps it out of reach in practice.
//!
//! Classification uses four mutually exclusive predicates evaluated in a
//! fixed priority order: top, then bottom, then left, then right. Only the
//! first match is applied per obstacle per frame. Diagonal approaches can be
//! misclassified by this ordering; the behavior is load-bearing for game
//! feel and is pinned by tests rather than corrected.

use glam::Vec2;

use super::rect::Rect;

/// Which side of the obstacle the entity arrived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Entity landed on the obstacle's top face
    Top,
    /// Entity bumped the obstacle's underside
    Bottom,
    /// Entity hit the obstacle's left face
    Left,
    /// Entity hit the obstacle's right face
    Right,
}

/// Resolve `rect` (moving at `vel` over the last `dt` step) against one
/// obstacle. On contact the rect is snapped flush to the obstacle face and
/// the velocity component into the face is zeroed. Returns the classified
/// side, or `None` when the rects don't overlap or the approach direction
/// can't be classified (deep overlap - left untouched).
pub fn resolve_obstacle(
    rect: &mut Rect,
    vel: &mut Vec2,
    dt: f32,
    obstacle: &Rect,
) -> Option<Contact> {
    if !rect.overlaps(obstacle) {
        return None;
    }

    let prev_x = rect.x - vel.x * dt;
    let prev_y = rect.y - vel.y * dt;

    let from_top = prev_y + rect.h <= obstacle.y;
    let from_bottom = prev_y >= obstacle.bottom();
    let from_left = prev_x + rect.w <= obstacle.x;
    let from_right = prev_x >= obstacle.right();

    if from_top {
        vel.y = 0.0;
        rect.y = obstacle.y - rect.h;
        Some(Contact::Top)
    } else if from_bottom {
        vel.y = 0.0;
        rect.y = obstacle.bottom();
        Some(Contact::Bottom)
    } else if from_left {
        vel.x = 0.0;
        rect.x = obstacle.x - rect.w;
        Some(Contact::Left)
    } else if from_right {
        vel.x = 0.0;
        rect.x = obstacle.right();
        Some(Contact::Right)
    } else {
        None
    }
}
