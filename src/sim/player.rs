//! Player controller: movement state machine, variable-height jump,
//! knockback, invulnerability, health and score.
//!
//! State transitions are evaluated in a fixed priority each tick:
//! horizontal input, jump press, jump-hold boost, jump release, then a
//! forced Falling when moving downward, defaulting to Idle when nothing
//! applied. Later writers win, which is exactly the contract the tests pin.

use glam::Vec2;

use super::animation::{Animation, AnimationSet, Loop};
use super::rect::Rect;
use super::state::GameEvent;
use super::tick::TickInput;
use crate::consts::{PLAYER_HEALTH, PLAYER_SIZE};
use crate::tuning::Tuning;

/// Facing, also the sign of horizontal motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Behavior state, doubling as the index into the animation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Dead = 0,
    Running = 1,
    Idle = 2,
    Rolling = 3,
    Jumping = 4,
    Falling = 5,
    Attacking = 6,
}

impl PlayerState {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub dir: Direction,
    pub state: PlayerState,
    pub animations: AnimationSet,
    /// Airborne flag; cleared by a top-face collision contact
    pub jumping: bool,
    jump_time: f32,
    /// Clamped to >= 0
    pub health: i32,
    /// Monotone non-decreasing; +1 per orb
    pub score: u32,
    knockback_vel: f32,
    knockback_left: f32,
    invuln_left: f32,
}

impl Player {
    pub fn spawn(at: Vec2) -> Self {
        Self {
            rect: Rect::new(at.x, at.y, PLAYER_SIZE, PLAYER_SIZE),
            vel: Vec2::ZERO,
            dir: Direction::Right,
            state: PlayerState::Idle,
            animations: default_animations(),
            jumping: false,
            jump_time: 0.0,
            health: PLAYER_HEALTH,
            score: 0,
            knockback_vel: 0.0,
            knockback_left: 0.0,
            invuln_left: 0.0,
        }
    }

    /// Damage-relevant collision rect, narrower than the sprite rect.
    /// The herochar art leaves transparent margins around the body.
    pub fn hitbox(&self) -> Rect {
        self.rect.inset(self.rect.w * 0.25, self.rect.h * 0.125)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_left > 0.0
    }

    pub fn knockback_active(&self) -> bool {
        self.knockback_left > 0.0
    }

    /// Apply one tick of input. Horizontal intent, the jump state machine,
    /// and the behavior-state priority chain all live here; gravity and
    /// collision response are the orchestrator's job.
    pub fn control(
        &mut self,
        input: &TickInput,
        tuning: &Tuning,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        if self.invuln_left > 0.0 {
            self.invuln_left = (self.invuln_left - dt).max(0.0);
        }

        let mut changed = false;

        if self.knockback_left > 0.0 {
            // Knockback replaces movement input entirely until it expires
            self.knockback_left = (self.knockback_left - dt).max(0.0);
            self.vel.x = self.knockback_vel;
            changed = true;
        } else {
            self.vel.x = 0.0;
            if input.left {
                self.vel.x = -tuning.run_speed;
                self.dir = Direction::Left;
                if self.vel.y == 0.0 {
                    self.state = PlayerState::Running;
                    changed = true;
                }
            } else if input.right {
                self.vel.x = tuning.run_speed;
                self.dir = Direction::Right;
                if self.vel.y == 0.0 {
                    self.state = PlayerState::Running;
                    changed = true;
                }
            }

            if input.roll && self.vel.y == 0.0 && self.vel.x != 0.0 {
                self.state = PlayerState::Rolling;
                changed = true;
            }
        }

        if input.jump_pressed && !self.jumping {
            self.jump_time = 0.0;
            self.vel.y = tuning.jump_force;
            self.state = PlayerState::Jumping;
            self.jumping = true;
            changed = true;
            events.push(GameEvent::Jumped);
        }

        // Holding the jump key inside the window boosts for a higher arc
        if input.jump_held && self.jumping {
            self.jump_time += dt;
            if self.jump_time < tuning.max_jump_hold {
                self.vel.y = tuning.jump_boost;
                changed = true;
            }
        }

        // Releasing spends the rest of the window
        if input.jump_released && self.jumping {
            self.jump_time = tuning.max_jump_hold;
            changed = true;
        }

        if self.vel.y > 0.0 {
            self.state = PlayerState::Falling;
            self.jumping = true;
            changed = true;
        }

        if !changed {
            self.state = PlayerState::Idle;
        }
    }

    /// Contact damage while vulnerable: subtract health, knock the player
    /// back opposite their facing, and open the invulnerability window.
    pub fn take_hit(&mut self, damage: i32, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if self.is_invulnerable() || self.health <= 0 {
            return;
        }
        self.health = (self.health - damage).max(0);
        self.knockback_vel = -self.dir.sign() * tuning.knockback_speed;
        self.knockback_left = tuning.knockback_secs;
        self.invuln_left = tuning.invuln_secs;
        events.push(GameEvent::PlayerHit);
        if self.health == 0 {
            self.state = PlayerState::Dead;
        }
    }

    /// Instantly fatal contact (spikes, out-of-bounds).
    pub fn kill(&mut self) {
        self.health = 0;
        self.state = PlayerState::Dead;
    }

    /// Sheet-space frame for the renderer, width sign flipped by facing so
    /// a negative width means "draw mirrored". `None` if the behavior state
    /// has no clip (logged, entity skipped for the frame).
    pub fn sprite_frame(&self) -> Option<Rect> {
        let mut frame = self.animations.frame_for(self.state.index())?;
        frame.w *= self.dir.sign();
        Some(frame)
    }
}

/// Frame table for the herochar sprite sheet, indexed by `PlayerState`.
fn default_animations() -> AnimationSet {
    AnimationSet::new(vec![
        Animation::new(0, 7, 0, 16.0, 16.0, 0.1, Loop::OneShot), // Dead
        Animation::new(0, 5, 1, 16.0, 16.0, 0.1, Loop::Repeating), // Running
        Animation::new(0, 3, 5, 16.0, 16.0, 0.1, Loop::Repeating), // Idle
        Animation::new(0, 2, 9, 16.0, 16.0, 0.1, Loop::Repeating), // Rolling
        Animation::new(0, 2, 7, 16.0, 16.0, 0.1, Loop::Repeating), // Jumping
        Animation::new(0, 2, 6, 16.0, 16.0, 0.1, Loop::Repeating), // Falling
        Animation::new(0, 3, 6, 32.0, 16.0, 0.15, Loop::OneShot), // Attacking
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::spawn(Vec2::new(16.0, 500.0))
    }

    fn tuning() -> Tuning {
        Tuning::default()
    }

    const DT: f32 = 0.01;

    #[test]
    fn jump_press_sets_upward_velocity_and_emits_event() {
        let mut p = player();
        let mut events = Vec::new();
        let input = TickInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        p.control(&input, &tuning(), DT, &mut events);

        assert!(p.vel.y < 0.0);
        assert!(p.jumping);
        assert_eq!(p.state, PlayerState::Jumping);
        assert_eq!(events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn jump_press_while_airborne_is_ignored() {
        let mut p = player();
        p.jumping = true;
        let mut events = Vec::new();
        let input = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        p.control(&input, &tuning(), DT, &mut events);
        assert_eq!(p.vel.y, 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn holding_jump_boosts_until_window_expires() {
        let t = tuning();
        let mut p = player();
        let mut events = Vec::new();
        p.control(
            &TickInput {
                jump_pressed: true,
                jump_held: true,
                ..Default::default()
            },
            &t,
            DT,
            &mut events,
        );

        let hold = TickInput {
            jump_held: true,
            ..Default::default()
        };
        // Well inside the window: boost velocity applies every tick
        p.control(&hold, &t, DT, &mut events);
        assert_eq!(p.vel.y, t.jump_boost);

        // Burn through the rest of the window
        let ticks = (t.max_jump_hold / DT) as usize + 2;
        for _ in 0..ticks {
            p.control(&hold, &t, DT, &mut events);
        }
        p.vel.y = -10.0;
        p.control(&hold, &t, DT, &mut events);
        assert_eq!(p.vel.y, -10.0, "expired window must not boost");
    }

    #[test]
    fn releasing_jump_ends_the_boost_window() {
        let t = tuning();
        let mut p = player();
        let mut events = Vec::new();
        p.control(
            &TickInput {
                jump_pressed: true,
                jump_held: true,
                ..Default::default()
            },
            &t,
            DT,
            &mut events,
        );
        p.control(
            &TickInput {
                jump_released: true,
                ..Default::default()
            },
            &t,
            DT,
            &mut events,
        );

        p.vel.y = -10.0;
        p.control(
            &TickInput {
                jump_held: true,
                ..Default::default()
            },
            &t,
            DT,
            &mut events,
        );
        assert_eq!(p.vel.y, -10.0, "boost must not resume after release");
    }

    #[test]
    fn downward_velocity_forces_falling_state() {
        let mut p = player();
        let mut events = Vec::new();
        p.vel.y = 50.0;
        p.control(
            &TickInput {
                right: true,
                ..Default::default()
            },
            &tuning(),
            DT,
            &mut events,
        );
        assert_eq!(p.state, PlayerState::Falling);
        assert!(p.jumping);
    }

    #[test]
    fn idle_when_no_input_applies() {
        let mut p = player();
        p.state = PlayerState::Running;
        let mut events = Vec::new();
        p.control(&TickInput::default(), &tuning(), DT, &mut events);
        assert_eq!(p.state, PlayerState::Idle);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn knockback_overrides_movement_input_for_exactly_its_duration() {
        let t = tuning();
        let mut p = player();
        let mut events = Vec::new();

        p.dir = Direction::Right;
        p.take_hit(t.contact_damage, &t, &mut events);
        let kb_vel = -t.knockback_speed;

        let push_right = TickInput {
            right: true,
            ..Default::default()
        };

        // 0.3 s at dt=0.1: three ticks fully consumed by knockback
        for _ in 0..3 {
            p.control(&push_right, &t, 0.1, &mut events);
            assert_eq!(p.vel.x, kb_vel, "input must not affect velocity");
        }

        // Window spent: movement input wins again
        p.control(&push_right, &t, 0.1, &mut events);
        assert_eq!(p.vel.x, t.run_speed);
    }

    #[test]
    fn contact_damage_and_invulnerability_scenario() {
        let t = tuning();
        let mut p = player();
        let mut events = Vec::new();

        assert_eq!(p.health, 10);
        p.take_hit(t.contact_damage, &t, &mut events);
        assert_eq!(p.health, 5);
        assert!(p.is_invulnerable());
        assert_eq!(events, vec![GameEvent::PlayerHit]);

        // Second contact inside the window is suppressed
        p.take_hit(t.contact_damage, &t, &mut events);
        assert_eq!(p.health, 5);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn invulnerability_expires_by_timer_not_frames() {
        let t = tuning();
        let mut p = player();
        let mut events = Vec::new();
        p.take_hit(1, &t, &mut events);

        // Many tiny ticks summing to less than the window: still protected
        for _ in 0..50 {
            p.control(&TickInput::default(), &t, t.invuln_secs / 100.0, &mut events);
        }
        assert!(p.is_invulnerable());

        // Push past the window
        for _ in 0..60 {
            p.control(&TickInput::default(), &t, t.invuln_secs / 100.0, &mut events);
        }
        assert!(!p.is_invulnerable());
    }

    #[test]
    fn health_clamps_at_zero_and_sets_dead_state() {
        let t = tuning();
        let mut p = player();
        let mut events = Vec::new();
        p.health = 3;
        p.take_hit(t.contact_damage, &t, &mut events);
        assert_eq!(p.health, 0);
        assert_eq!(p.state, PlayerState::Dead);
    }

    #[test]
    fn sprite_frame_mirrors_when_facing_left() {
        let mut p = player();
        p.dir = Direction::Left;
        let frame = p.sprite_frame().expect("idle clip exists");
        assert!(frame.w < 0.0);
    }

    #[test]
    fn hitbox_is_narrower_than_sprite_rect() {
        let p = player();
        let hb = p.hitbox();
        assert!(hb.w < p.rect.w);
        assert!(hb.h < p.rect.h);
        assert!(hb.x > p.rect.x);
    }
}
