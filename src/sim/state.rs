//! World aggregate and game-flow types
//!
//! Every mutable collection the simulation touches - enemies, spikes,
//! platforms, orbs, the spawned-anchor set, camera, RNG - is owned by one
//! `World` value and rebuilt wholesale on every (re)entry into gameplay.
//! There is no global state to forget to reset.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::collections::HashSet;

use super::camera::Camera;
use super::enemy::{Enemy, EnemySpawner};
use super::hazards::{FallingPlatform, Orb, Spike};
use super::player::Player;
use super::rect::Rect;
use crate::consts::{VIEW_H, VIEW_W};
use crate::level::{LevelData, ObstacleKind};
use crate::settings::Difficulty;
use crate::tuning::Tuning;

/// Top-level game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    Gameplay,
    GameOver,
    Win,
}

/// Discrete notifications for the external audio/UI layers, drained once
/// per frame by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Landed,
    OrbCollected,
    PlayerHit,
    PlayerDied,
    GameWon,
}

/// Timed fade gating GAMEPLAY -> GAME_OVER. Owned by the world, not the
/// player; entering it implicitly cancels in-flight gameplay effects.
#[derive(Debug, Clone)]
pub struct DeathTransition {
    pub active: bool,
    elapsed: f32,
    duration: f32,
}

impl DeathTransition {
    pub fn new(duration: f32) -> Self {
        Self {
            active: false,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.elapsed = 0.0;
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.active {
            self.elapsed += dt;
        }
    }

    /// Fade opacity in [0, 1]
    pub fn alpha(&self) -> f32 {
        if self.active {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn finished(&self) -> bool {
        self.active && self.elapsed >= self.duration
    }
}

/// The complete simulation state for one loaded level.
#[derive(Debug, Clone)]
pub struct World {
    pub mode: GameMode,
    /// Difficulty the current/last run was started with
    pub difficulty: Difficulty,
    /// Highlighted entry on the menu screen
    pub menu_selection: Difficulty,
    pub tuning: Tuning,
    pub tick_count: u64,
    pub level: LevelData,
    /// Derived from the level on rebuild
    pub solids: Vec<Rect>,
    pub orb_anchors: Vec<Rect>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub spikes: Vec<Spike>,
    pub platforms: Vec<FallingPlatform>,
    pub orbs: Vec<Orb>,
    pub spawner: EnemySpawner,
    pub camera: Camera,
    pub death: DeathTransition,
    pub(crate) rng: Pcg32,
    pub(crate) spawned_anchors: HashSet<usize>,
    pub(crate) events: Vec<GameEvent>,
    seed: u64,
    /// Gameplay entries so far; salts the per-run RNG stream
    runs: u64,
}

impl World {
    pub fn new(level: LevelData, seed: u64) -> Self {
        Self::with_tuning(level, seed, Tuning::default())
    }

    pub fn with_tuning(level: LevelData, seed: u64, tuning: Tuning) -> Self {
        let player = Player::spawn(level.player_spawn);
        let camera = Camera::new(VIEW_W, VIEW_H, player.rect.center());
        let difficulty = Difficulty::default();
        let solids = level.rects_of(ObstacleKind::Solid);
        let orb_anchors = level.rects_of(ObstacleKind::OrbAnchor);
        let spikes = build_spikes(&level, &tuning);
        let platforms = build_platforms(&level, &tuning);
        let death = DeathTransition::new(tuning.death_fade_secs);

        Self {
            mode: GameMode::Menu,
            difficulty,
            menu_selection: difficulty,
            tick_count: 0,
            solids,
            orb_anchors,
            player,
            enemies: Vec::new(),
            spikes,
            platforms,
            orbs: Vec::new(),
            spawner: EnemySpawner::new(difficulty.spawn_interval_secs()),
            camera,
            death,
            rng: Pcg32::seed_from_u64(seed),
            spawned_anchors: HashSet::new(),
            events: Vec::new(),
            seed,
            runs: 0,
            level,
            tuning,
        }
    }

    /// Enter gameplay with everything rebuilt to level-initial state.
    pub fn start_gameplay(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.rebuild_level_state();
        self.mode = GameMode::Gameplay;
    }

    /// Reconstruct all per-run state from the level. Called on every entry
    /// to gameplay so nothing survives a restart by accident.
    fn rebuild_level_state(&mut self) {
        self.runs += 1;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.runs));
        self.player = Player::spawn(self.level.player_spawn);
        self.solids = self.level.rects_of(ObstacleKind::Solid);
        self.orb_anchors = self.level.rects_of(ObstacleKind::OrbAnchor);
        self.spikes = build_spikes(&self.level, &self.tuning);
        self.platforms = build_platforms(&self.level, &self.tuning);
        self.enemies.clear();
        self.orbs.clear();
        self.spawned_anchors.clear();
        self.spawner = EnemySpawner::new(self.difficulty.spawn_interval_secs());
        self.camera = Camera::new(VIEW_W, VIEW_H, self.player.rect.center());
        self.death = DeathTransition::new(self.tuning.death_fade_secs);
        self.tick_count = 0;
        self.events.clear();
    }

    pub fn score_goal(&self) -> u32 {
        self.difficulty.score_goal()
    }

    /// Hand the events accumulated since the last drain to the embedder.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

fn build_spikes(level: &LevelData, tuning: &Tuning) -> Vec<Spike> {
    level
        .rects_of(ObstacleKind::SpikeZone)
        .into_iter()
        .map(|r| Spike::new(r, tuning.spike_travel))
        .collect()
}

fn build_platforms(level: &LevelData, tuning: &Tuning) -> Vec<FallingPlatform> {
    level
        .rects_of(ObstacleKind::FallingPlatform)
        .into_iter()
        .map(|r| FallingPlatform::new(r, tuning.platform_grace_secs))
        .collect()
}
