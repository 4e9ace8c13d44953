//! Already-parsed level geometry
//!
//! The simulation never reads an authoring format. Whatever editor produced
//! the level, it arrives here as a flat list of axis-aligned rectangles
//! tagged by category, plus pixel bounds and a spawn point. A JSON loader
//! with validation is provided for the harness and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::sim::rect::Rect;

/// What a static rectangle means to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// Blocks movement
    Solid,
    /// Rest position of an oscillating spike; fatal on contact
    SpikeZone,
    /// A platform that drops after being stood on
    FallingPlatform,
    /// Eligible to produce exactly one score orb once visible
    OrbAnchor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StaticObstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    /// Level extent in pixels; (0, 0) is the top-left corner
    pub width: f32,
    pub height: f32,
    pub player_spawn: Vec2,
    pub obstacles: Vec<StaticObstacle>,
}

impl LevelData {
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err("Level validation failed: width and height must be > 0".to_string());
        }
        if self.player_spawn.x < 0.0
            || self.player_spawn.x >= self.width
            || self.player_spawn.y < 0.0
            || self.player_spawn.y >= self.height
        {
            return Err(format!(
                "Level validation failed: player spawn ({}, {}) outside bounds",
                self.player_spawn.x, self.player_spawn.y
            ));
        }
        for (i, o) in self.obstacles.iter().enumerate() {
            if o.rect.w <= 0.0 || o.rect.h <= 0.0 {
                return Err(format!(
                    "Level validation failed: obstacle {i} has non-positive size"
                ));
            }
            if !o.rect.x.is_finite() || !o.rect.y.is_finite() {
                return Err(format!(
                    "Level validation failed: obstacle {i} has non-finite position"
                ));
            }
        }
        Ok(())
    }

    /// All rects carrying the given tag, in authoring order.
    pub fn rects_of(&self, kind: ObstacleKind) -> Vec<Rect> {
        self.obstacles
            .iter()
            .filter(|o| o.kind == kind)
            .map(|o| o.rect)
            .collect()
    }

    /// A handcrafted level used by the headless harness and tests:
    /// a long floor, a staircase of platforms with orb anchors, a spike
    /// pit, and a pair of falling platforms bridging it.
    pub fn demo() -> Self {
        let mut obstacles = vec![
            // Ground, split around the spike pit
            StaticObstacle {
                rect: Rect::new(0.0, 836.0, 1100.0, 64.0),
                kind: ObstacleKind::Solid,
            },
            StaticObstacle {
                rect: Rect::new(1400.0, 836.0, 1000.0, 64.0),
                kind: ObstacleKind::Solid,
            },
            // Staircase
            StaticObstacle {
                rect: Rect::new(300.0, 720.0, 160.0, 24.0),
                kind: ObstacleKind::Solid,
            },
            StaticObstacle {
                rect: Rect::new(560.0, 620.0, 160.0, 24.0),
                kind: ObstacleKind::Solid,
            },
            StaticObstacle {
                rect: Rect::new(820.0, 520.0, 160.0, 24.0),
                kind: ObstacleKind::Solid,
            },
            // Far side perch
            StaticObstacle {
                rect: Rect::new(1700.0, 700.0, 200.0, 24.0),
                kind: ObstacleKind::Solid,
            },
        ];

        // Orb anchors sit on the staircase and the far perch
        for (x, y, w) in [
            (300.0, 720.0, 160.0),
            (560.0, 620.0, 160.0),
            (820.0, 520.0, 160.0),
            (1700.0, 700.0, 200.0),
            (0.0, 836.0, 1100.0),
            (1400.0, 836.0, 1000.0),
        ] {
            obstacles.push(StaticObstacle {
                rect: Rect::new(x, y, w, 16.0),
                kind: ObstacleKind::OrbAnchor,
            });
        }

        // Spikes guarding the pit rim
        obstacles.push(StaticObstacle {
            rect: Rect::new(1036.0, 804.0, 32.0, 32.0),
            kind: ObstacleKind::SpikeZone,
        });
        obstacles.push(StaticObstacle {
            rect: Rect::new(1400.0, 804.0, 32.0, 32.0),
            kind: ObstacleKind::SpikeZone,
        });

        // Falling platforms across the pit
        obstacles.push(StaticObstacle {
            rect: Rect::new(1140.0, 800.0, 96.0, 16.0),
            kind: ObstacleKind::FallingPlatform,
        });
        obstacles.push(StaticObstacle {
            rect: Rect::new(1270.0, 770.0, 96.0, 16.0),
            kind: ObstacleKind::FallingPlatform,
        });

        Self {
            width: 2400.0,
            height: 900.0,
            player_spawn: Vec2::new(16.0, 700.0),
            obstacles,
        }
    }
}

/// Load and validate a level file.
pub fn load_level_from_path(path: &Path) -> Result<LevelData, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let level: LevelData = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", path.display()))?;
    level.validate()?;
    Ok(level)
}
