//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collections in spawn order)
//! - No rendering or platform dependencies

pub mod animation;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod hazards;
pub mod kinematics;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use animation::{Animation, AnimationSet, Loop};
pub use camera::Camera;
pub use collision::{Contact, resolve_obstacle};
pub use enemy::{Enemy, EnemySpawner, EnemyState};
pub use hazards::{FallingPlatform, Orb, Spike, SpikePhase, orb_color};
pub use kinematics::{apply_gravity, integrate};
pub use player::{Direction, Player, PlayerState};
pub use rect::Rect;
pub use state::{DeathTransition, GameEvent, GameMode, World};
pub use tick::{TickInput, tick};
