//! Orbfall - a 2D side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, hazards, game state)
//! - `level`: Already-parsed level geometry the simulation consumes
//! - `settings`: Difficulty presets and player preferences
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio output, tile-map parsing, and input polling live outside
//! this crate. An embedder feeds `sim::tick` an input snapshot and `dt`, then
//! reads back entity rectangles, state enums, and drained `GameEvent`s.

pub mod level;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use level::LevelData;
pub use settings::{Difficulty, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// View dimensions in world pixels (the camera's window onto the level)
    pub const VIEW_W: f32 = 600.0;
    pub const VIEW_H: f32 = 600.0;

    /// Gravity acceleration, pixels/s² (+y is down)
    pub const GRAVITY_ACCEL: f32 = 1000.0;
    /// Terminal fall speed, pixels/s
    pub const MAX_FALL_SPEED: f32 = 300.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 64.0;
    pub const RUN_SPEED: f32 = 200.0;
    /// Initial upward velocity on a jump press (negative = up)
    pub const JUMP_FORCE: f32 = -250.0;
    /// Upward velocity applied each tick while the jump key is held
    pub const JUMP_BOOST: f32 = -350.0;
    /// Maximum duration of the jump-hold boost window, seconds
    pub const MAX_JUMP_HOLD: f32 = 0.5;
    pub const PLAYER_HEALTH: i32 = 10;

    /// Horizontal speed applied while knocked back, pixels/s
    pub const KNOCKBACK_SPEED: f32 = 260.0;
    /// Duration a knockback overrides movement input, seconds
    pub const KNOCKBACK_SECS: f32 = 0.3;
    /// Post-hit invulnerability window, seconds
    pub const INVULN_SECS: f32 = 1.0;
    /// Damage per enemy contact
    pub const CONTACT_DAMAGE: i32 = 5;
    /// Falling this far below the level bottom kills the player
    pub const FALL_DEATH_MARGIN: f32 = 100.0;
    /// Falling this far below the highest point reached kills the player
    pub const FALL_BELOW_CAMERA: f32 = 900.0;

    /// Spike oscillation
    pub const SPIKE_TRAVEL: f32 = 48.0;
    pub const SPIKE_MOVE_SECS: f32 = 1.0;
    pub const SPIKE_PAUSE_SECS: f32 = 0.75;
    /// Upper bound of the random extra pause per cycle, seconds
    pub const SPIKE_PAUSE_JITTER: f32 = 0.25;

    /// Time a player may stand on a falling platform before it drops
    pub const PLATFORM_GRACE_SECS: f32 = 0.5;

    /// Orb defaults
    pub const ORB_SIZE: f32 = 12.0;
    pub const ORB_MAX_VALUE: u32 = 500;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 48.0;
    pub const ENEMY_MIN_SPEED: f32 = 60.0;
    pub const ENEMY_MAX_SPEED: f32 = 160.0;
    /// Enemies this far outside level bounds are despawned
    pub const DESPAWN_MARGIN: f32 = 200.0;
    /// Largest number of enemies a single spawn wave may add
    pub const MAX_SPAWN_BATCH: u32 = 5;

    /// Death fade duration gating GAMEPLAY -> GAME_OVER
    pub const DEATH_FADE_SECS: f32 = 1.2;
}

/// Linear interpolation between `a` and `b` by `t` in [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two RGB colors
#[inline]
pub fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp(a[0], b[0], t),
        lerp(a[1], b[1], t),
        lerp(a[2], b[2], t),
    ]
}
