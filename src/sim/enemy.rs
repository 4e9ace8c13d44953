//! Patrol enemies and the wave spawn scheduler
//!
//! Enemies enter from just outside the camera view, cross the level at a
//! constant horizontal speed, and despawn once far enough outside the level
//! bounds. A timer-driven scheduler adds random batches while the active
//! count sits below the difficulty's cap.

use glam::Vec2;
use rand::Rng;

use super::animation::{Animation, AnimationSet, Loop};
use super::player::Direction;
use super::rect::Rect;
use crate::consts::{ENEMY_SIZE, MAX_SPAWN_BATCH};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Moving = 0,
    Idle = 1,
    Attacking = 2,
}

impl EnemyState {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub rect: Rect,
    pub vel: Vec2,
    pub dir: Direction,
    pub state: EnemyState,
    pub animations: AnimationSet,
}

impl Enemy {
    /// Damage-relevant rect, slightly narrower than the sprite.
    pub fn hitbox(&self) -> Rect {
        self.rect.inset(self.rect.w * 0.2, self.rect.h * 0.1)
    }

    pub fn update(&mut self, dt: f32) {
        self.rect.x += self.vel.x * dt;
    }

    /// Margin-based despawn test against the level bounds.
    pub fn is_outside(&self, level_w: f32, level_h: f32, margin: f32) -> bool {
        self.rect.right() < -margin
            || self.rect.x > level_w + margin
            || self.rect.bottom() < -margin
            || self.rect.y > level_h + margin
    }

    /// Sheet-space frame mirrored by facing, `None` on a bad state index.
    pub fn sprite_frame(&self) -> Option<Rect> {
        let mut frame = self.animations.frame_for(self.state.index())?;
        frame.w *= self.dir.sign();
        Some(frame)
    }
}

/// Place one enemy at a random height inside the view, just outside the
/// view edge opposite its travel direction, at a random speed.
pub fn spawn_enemy(view: &Rect, tuning: &Tuning, rng: &mut impl Rng) -> Enemy {
    let rightward = rng.random_bool(0.5);
    let speed = rng.random_range(tuning.enemy_min_speed..=tuning.enemy_max_speed);
    let max_y = (view.bottom() - ENEMY_SIZE).max(view.y);
    let y = rng.random_range(view.y..=max_y);

    let (x, vel_x, dir) = if rightward {
        (view.x - ENEMY_SIZE, speed, Direction::Right)
    } else {
        (view.right(), -speed, Direction::Left)
    };

    Enemy {
        rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
        vel: Vec2::new(vel_x, 0.0),
        dir,
        state: EnemyState::Moving,
        animations: default_animations(),
    }
}

/// Periodically spawns a batch of 1..=MAX_SPAWN_BATCH enemies while the
/// active count is under `cap`.
#[derive(Debug, Clone)]
pub struct EnemySpawner {
    timer: f32,
    interval: f32,
}

impl EnemySpawner {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            timer: 0.0,
            interval: interval_secs,
        }
    }

    pub fn update(
        &mut self,
        dt: f32,
        view: &Rect,
        enemies: &mut Vec<Enemy>,
        cap: usize,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) {
        self.timer += dt;
        if self.timer < self.interval {
            return;
        }
        self.timer = 0.0;

        if enemies.len() >= cap {
            return;
        }
        let batch = rng.random_range(1..=MAX_SPAWN_BATCH);
        for _ in 0..batch {
            if enemies.len() >= cap {
                break;
            }
            enemies.push(spawn_enemy(view, tuning, rng));
        }
    }
}

/// Frame table for the slime sprite sheet, indexed by `EnemyState`.
fn default_animations() -> AnimationSet {
    AnimationSet::new(vec![
        Animation::new(0, 3, 0, 16.0, 16.0, 0.12, Loop::Repeating), // Moving
        Animation::new(0, 3, 1, 16.0, 16.0, 0.15, Loop::Repeating), // Idle
        Animation::new(0, 2, 2, 16.0, 16.0, 0.1, Loop::OneShot),    // Attacking
    ])
}
