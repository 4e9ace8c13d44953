//! Timed hazard subsystems: oscillating spikes, falling platforms, and
//! lazily-spawned score orbs.
//!
//! Each hazard is an independent little state machine advanced by `dt`
//! accumulators, never wall-clock callbacks, so runs replay identically for
//! a given seed.

use rand::Rng;
use std::collections::HashSet;

use super::rect::Rect;
use crate::consts::{ORB_MAX_VALUE, ORB_SIZE};
use crate::tuning::Tuning;
use crate::{lerp, lerp_rgb};

/// Where a spike is in its oscillation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikePhase {
    Rising,
    Falling,
    Paused,
}

/// A spike block that oscillates vertically between its rest position and a
/// raised position, pausing at each end. Contact is instantly fatal.
/// Spikes live for the whole level; they are repositioned, never destroyed.
#[derive(Debug, Clone)]
pub struct Spike {
    pub rect: Rect,
    rest_y: f32,
    top_y: f32,
    pub phase: SpikePhase,
    timer: f32,
    /// Pause length for the current cycle, jittered per cycle
    pause_secs: f32,
    resume_rising: bool,
}

impl Spike {
    /// `zone` is the rest rect; the spike travels `travel` pixels upward.
    pub fn new(zone: Rect, travel: f32) -> Self {
        Self {
            rect: zone,
            rest_y: zone.y,
            top_y: zone.y - travel,
            phase: SpikePhase::Rising,
            timer: 0.0,
            pause_secs: 0.0,
            resume_rising: false,
        }
    }

    pub fn update(&mut self, dt: f32, tuning: &Tuning, rng: &mut impl Rng) {
        match self.phase {
            SpikePhase::Rising => {
                self.timer += dt;
                let t = (self.timer / tuning.spike_move_secs).min(1.0);
                self.rect.y = lerp(self.rest_y, self.top_y, t);
                if self.timer >= tuning.spike_move_secs {
                    self.enter_pause(tuning, rng, false);
                }
            }
            SpikePhase::Falling => {
                self.timer += dt;
                let t = (self.timer / tuning.spike_move_secs).min(1.0);
                self.rect.y = lerp(self.top_y, self.rest_y, t);
                if self.timer >= tuning.spike_move_secs {
                    self.enter_pause(tuning, rng, true);
                }
            }
            SpikePhase::Paused => {
                self.timer += dt;
                if self.timer >= self.pause_secs {
                    self.timer = 0.0;
                    self.phase = if self.resume_rising {
                        SpikePhase::Rising
                    } else {
                        SpikePhase::Falling
                    };
                }
            }
        }
    }

    fn enter_pause(&mut self, tuning: &Tuning, rng: &mut impl Rng, resume_rising: bool) {
        self.phase = SpikePhase::Paused;
        self.timer = 0.0;
        self.pause_secs = tuning.spike_pause_secs
            + if tuning.spike_pause_jitter > 0.0 {
                rng.random_range(0.0..=tuning.spike_pause_jitter)
            } else {
                0.0
            };
        self.resume_rising = resume_rising;
    }
}

/// A platform that behaves as solid ground until the player has stood on it
/// for a continuous grace period, then drops in free fall.
#[derive(Debug, Clone)]
pub struct FallingPlatform {
    pub rect: Rect,
    rest: Rect,
    pub vel_y: f32,
    pub falling: bool,
    grace_left: f32,
}

impl FallingPlatform {
    pub fn new(rect: Rect, grace_secs: f32) -> Self {
        Self {
            rect,
            rest: rect,
            vel_y: 0.0,
            falling: false,
            grace_left: grace_secs,
        }
    }

    /// `stood_on` is whether the player resolved a top contact against this
    /// platform during the current tick. Stepping off resets the grace.
    pub fn update(&mut self, dt: f32, stood_on: bool, tuning: &Tuning) {
        if self.falling {
            self.vel_y += tuning.gravity_accel * dt;
            if self.vel_y > tuning.max_fall_speed {
                self.vel_y = tuning.max_fall_speed;
            }
            self.rect.y += self.vel_y * dt;
            return;
        }

        if stood_on {
            self.grace_left -= dt;
            if self.grace_left <= 0.0 {
                self.falling = true;
            }
        } else {
            self.grace_left = tuning.platform_grace_secs;
        }
    }

    pub fn rest_rect(&self) -> Rect {
        self.rest
    }
}

/// A collectible score orb. The randomized value drives only the display
/// color; collection scores a flat +1 regardless.
#[derive(Debug, Clone)]
pub struct Orb {
    pub rect: Rect,
    pub value: u32,
    /// Index of the anchor that produced this orb
    pub anchor: usize,
}

impl Orb {
    pub fn color(&self) -> [f32; 3] {
        orb_color(self.value)
    }
}

/// Blue for low values through red for high ones.
pub fn orb_color(value: u32) -> [f32; 3] {
    const LOW: [f32; 3] = [0.2, 0.4, 1.0];
    const HIGH: [f32; 3] = [1.0, 0.2, 0.15];
    let t = value.saturating_sub(1) as f32 / (ORB_MAX_VALUE - 1) as f32;
    lerp_rgb(LOW, HIGH, t.clamp(0.0, 1.0))
}

/// Spawn orbs for anchors that have entered the view and not yet produced
/// one. The `spawned` set is keyed by anchor index and is only ever cleared
/// by rebuilding the world, so each anchor spawns at most once per run -
/// even after its orb has been collected.
pub fn spawn_orbs(
    anchors: &[Rect],
    view: &Rect,
    spawned: &mut HashSet<usize>,
    orbs: &mut Vec<Orb>,
    rng: &mut impl Rng,
) {
    for (idx, anchor) in anchors.iter().enumerate() {
        if !anchor.overlaps(view) || !spawned.insert(idx) {
            continue;
        }
        let max_x = (anchor.w - ORB_SIZE).max(0.0);
        let x = anchor.x
            + if max_x > 0.0 {
                rng.random_range(0.0..=max_x)
            } else {
                0.0
            };
        orbs.push(Orb {
            rect: Rect::new(x, anchor.y - ORB_SIZE, ORB_SIZE, ORB_SIZE),
            value: rng.random_range(1..=ORB_MAX_VALUE),
            anchor: idx,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn spike_rises_then_pauses_then_falls_back() {
        let t = tuning();
        let mut rng = rng();
        let mut spike = Spike::new(Rect::new(100.0, 400.0, 32.0, 32.0), 48.0);
        assert_eq!(spike.phase, SpikePhase::Rising);

        // Drive through the full rise
        let dt = 0.05;
        let steps = (t.spike_move_secs / dt) as usize + 1;
        for _ in 0..steps {
            spike.update(dt, &t, &mut rng);
        }
        assert_eq!(spike.phase, SpikePhase::Paused);
        assert!((spike.rect.y - 352.0).abs() < 0.001, "parked at raised Y");

        // Wait out the pause (upper bound includes max jitter)
        let pause_steps = ((t.spike_pause_secs + t.spike_pause_jitter) / dt) as usize + 1;
        for _ in 0..pause_steps {
            spike.update(dt, &t, &mut rng);
        }
        assert_eq!(spike.phase, SpikePhase::Falling);
    }

    #[test]
    fn spike_y_stays_within_travel_bounds() {
        let t = tuning();
        let mut rng = rng();
        let mut spike = Spike::new(Rect::new(0.0, 400.0, 32.0, 32.0), 48.0);
        for _ in 0..2000 {
            spike.update(0.013, &t, &mut rng);
            assert!(spike.rect.y >= 352.0 - 0.001);
            assert!(spike.rect.y <= 400.0 + 0.001);
        }
    }

    #[test]
    fn platform_drops_after_continuous_standing() {
        let t = tuning();
        let mut p = FallingPlatform::new(Rect::new(0.0, 300.0, 96.0, 16.0), t.platform_grace_secs);

        let dt = 0.1;
        let steps = (t.platform_grace_secs / dt) as usize + 1;
        for _ in 0..steps {
            p.update(dt, true, &t);
        }
        assert!(p.falling);

        let y_before = p.rect.y;
        p.update(dt, false, &t);
        assert!(p.rect.y > y_before, "free fall once dropped");
    }

    #[test]
    fn stepping_off_resets_the_grace_timer() {
        let t = tuning();
        let mut p = FallingPlatform::new(Rect::new(0.0, 300.0, 96.0, 16.0), t.platform_grace_secs);

        // Stand for most of the grace, step off, stand again
        p.update(t.platform_grace_secs * 0.8, true, &t);
        p.update(0.01, false, &t);
        p.update(t.platform_grace_secs * 0.8, true, &t);
        assert!(!p.falling, "grace must restart after stepping off");

        p.update(t.platform_grace_secs * 0.3, true, &t);
        assert!(p.falling);
    }

    #[test]
    fn orb_spawns_at_most_once_per_anchor() {
        let mut rng = rng();
        let anchors = vec![Rect::new(50.0, 200.0, 96.0, 16.0)];
        let view = Rect::new(0.0, 0.0, 600.0, 600.0);
        let mut spawned = HashSet::new();
        let mut orbs = Vec::new();

        spawn_orbs(&anchors, &view, &mut spawned, &mut orbs, &mut rng);
        assert_eq!(orbs.len(), 1);

        // Repeated checks while the orb exists: no duplicate
        spawn_orbs(&anchors, &view, &mut spawned, &mut orbs, &mut rng);
        assert_eq!(orbs.len(), 1);

        // Even after collection the anchor stays spent
        orbs.clear();
        spawn_orbs(&anchors, &view, &mut spawned, &mut orbs, &mut rng);
        assert!(orbs.is_empty());
    }

    #[test]
    fn orbs_only_spawn_inside_the_view() {
        let mut rng = rng();
        let anchors = vec![
            Rect::new(50.0, 200.0, 96.0, 16.0),
            Rect::new(5000.0, 200.0, 96.0, 16.0),
        ];
        let view = Rect::new(0.0, 0.0, 600.0, 600.0);
        let mut spawned = HashSet::new();
        let mut orbs = Vec::new();

        spawn_orbs(&anchors, &view, &mut spawned, &mut orbs, &mut rng);
        assert_eq!(orbs.len(), 1);
        assert_eq!(orbs[0].anchor, 0);
        assert!(!spawned.contains(&1), "offscreen anchor stays eligible");
    }

    #[test]
    fn spawned_orb_lands_within_anchor_width_with_valid_value() {
        let mut rng = rng();
        let anchor = Rect::new(100.0, 200.0, 96.0, 16.0);
        let view = Rect::new(0.0, 0.0, 600.0, 600.0);
        let mut spawned = HashSet::new();
        let mut orbs = Vec::new();

        spawn_orbs(
            &[anchor],
            &view,
            &mut spawned,
            &mut orbs,
            &mut rng,
        );
        let orb = &orbs[0];
        assert!(orb.rect.x >= anchor.x);
        assert!(orb.rect.right() <= anchor.right() + 0.001);
        assert!((1..=ORB_MAX_VALUE).contains(&orb.value));
    }

    #[test]
    fn orb_color_runs_blue_to_red() {
        let low = orb_color(1);
        let high = orb_color(ORB_MAX_VALUE);
        assert!(low[2] > low[0], "low values read blue");
        assert!(high[0] > high[2], "high values read red");
        assert_eq!(orb_color(1), orb_color(0), "value clamps at the low end");
    }
}
