//! Data-driven game balance
//!
//! Every gameplay number a designer might want to touch lives here. The
//! defaults reproduce the shipped feel; a JSON file can override any subset
//! of fields. Values are validated on load so a bad file fails loudly at
//! startup instead of corrupting a run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::consts;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Kinematics
    pub gravity_accel: f32,
    pub max_fall_speed: f32,

    // Player
    pub run_speed: f32,
    pub jump_force: f32,
    pub jump_boost: f32,
    pub max_jump_hold: f32,
    pub knockback_speed: f32,
    pub knockback_secs: f32,
    pub invuln_secs: f32,
    pub contact_damage: i32,

    // Hazards
    pub spike_travel: f32,
    pub spike_move_secs: f32,
    pub spike_pause_secs: f32,
    pub spike_pause_jitter: f32,
    pub platform_grace_secs: f32,

    // Enemies
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,

    // Presentation-adjacent timing the sim owns
    pub death_fade_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity_accel: consts::GRAVITY_ACCEL,
            max_fall_speed: consts::MAX_FALL_SPEED,
            run_speed: consts::RUN_SPEED,
            jump_force: consts::JUMP_FORCE,
            jump_boost: consts::JUMP_BOOST,
            max_jump_hold: consts::MAX_JUMP_HOLD,
            knockback_speed: consts::KNOCKBACK_SPEED,
            knockback_secs: consts::KNOCKBACK_SECS,
            invuln_secs: consts::INVULN_SECS,
            contact_damage: consts::CONTACT_DAMAGE,
            spike_travel: consts::SPIKE_TRAVEL,
            spike_move_secs: consts::SPIKE_MOVE_SECS,
            spike_pause_secs: consts::SPIKE_PAUSE_SECS,
            spike_pause_jitter: consts::SPIKE_PAUSE_JITTER,
            platform_grace_secs: consts::PLATFORM_GRACE_SECS,
            enemy_min_speed: consts::ENEMY_MIN_SPEED,
            enemy_max_speed: consts::ENEMY_MAX_SPEED,
            death_fade_secs: consts::DEATH_FADE_SECS,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), String> {
        if self.gravity_accel <= 0.0 {
            return Err("Tuning validation failed: gravity_accel must be > 0".to_string());
        }
        if self.max_fall_speed <= 0.0 {
            return Err("Tuning validation failed: max_fall_speed must be > 0".to_string());
        }
        if self.run_speed <= 0.0 {
            return Err("Tuning validation failed: run_speed must be > 0".to_string());
        }
        if self.jump_force >= 0.0 || self.jump_boost >= 0.0 {
            // +y is down; an upward impulse must be negative
            return Err("Tuning validation failed: jump forces must be negative".to_string());
        }
        for (name, secs) in [
            ("max_jump_hold", self.max_jump_hold),
            ("knockback_secs", self.knockback_secs),
            ("invuln_secs", self.invuln_secs),
            ("spike_move_secs", self.spike_move_secs),
            ("spike_pause_secs", self.spike_pause_secs),
            ("platform_grace_secs", self.platform_grace_secs),
            ("death_fade_secs", self.death_fade_secs),
        ] {
            if secs <= 0.0 {
                return Err(format!("Tuning validation failed: {name} must be > 0"));
            }
        }
        if self.spike_pause_jitter < 0.0 {
            return Err("Tuning validation failed: spike_pause_jitter must be >= 0".to_string());
        }
        if self.contact_damage <= 0 {
            return Err("Tuning validation failed: contact_damage must be > 0".to_string());
        }
        if self.enemy_min_speed <= 0.0 || self.enemy_max_speed < self.enemy_min_speed {
            return Err(
                "Tuning validation failed: enemy speed range must be positive and ordered"
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// Load a tuning override file. Absent fields keep their defaults.
pub fn load_tuning_from_path(path: &Path) -> Result<Tuning, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let tuning: Tuning = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse tuning JSON {}: {e}", path.display()))?;
    tuning.validate()?;
    Ok(tuning)
}
