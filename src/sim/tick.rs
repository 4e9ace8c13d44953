//! Fixed timestep simulation tick
//!
//! One synchronous update per frame, dispatched on the game mode. The
//! gameplay pipeline runs in a fixed order that is part of the crate's
//! contract: player intent, gravity, integration, solid collision, falling
//! platforms, spikes, orbs, enemies, death/win checks, camera, animation.

use super::collision::{Contact, resolve_obstacle};
use super::hazards::spawn_orbs;
use super::kinematics::{apply_gravity_with, integrate};
use super::state::{GameEvent, GameMode, World};
use crate::consts::{DESPAWN_MARGIN, FALL_BELOW_CAMERA, FALL_DEATH_MARGIN};

/// Input snapshot for a single tick. Movement keys are level-triggered;
/// jump press/release, confirm, and the menu keys are edge-triggered and
/// must be true only on the frame the transition happened.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub roll: bool,
    /// Start / restart / select
    pub confirm: bool,
    /// Back to the menu from an end screen
    pub menu: bool,
    pub menu_up: bool,
    pub menu_down: bool,
}

/// Advance the world by one fixed timestep.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    match world.mode {
        GameMode::Menu => menu_tick(world, input),
        GameMode::Gameplay => gameplay_tick(world, input, dt),
        GameMode::GameOver | GameMode::Win => end_screen_tick(world, input),
    }
}

fn menu_tick(world: &mut World, input: &TickInput) {
    if input.menu_down {
        world.menu_selection = world.menu_selection.next();
    }
    if input.menu_up {
        world.menu_selection = world.menu_selection.prev();
    }
    if input.confirm {
        world.start_gameplay(world.menu_selection);
    }
}

fn end_screen_tick(world: &mut World, input: &TickInput) {
    if input.confirm {
        world.start_gameplay(world.difficulty);
    } else if input.menu {
        world.mode = GameMode::Menu;
    }
}

fn gameplay_tick(world: &mut World, input: &TickInput, dt: f32) {
    world.tick_count += 1;

    // While the death fade runs, only the fade and the death animation
    // advance; the fade completing is what flips into GameOver.
    if world.death.active {
        world.death.update(dt);
        let idx = world.player.state.index();
        world.player.animations.advance(idx, dt);
        if world.death.finished() {
            world.mode = GameMode::GameOver;
        }
        return;
    }

    // Win is checked at the top of the tick: a goal reached mid-tick
    // transitions on the next frame's check.
    if world.player.score >= world.score_goal() {
        world.mode = GameMode::Win;
        world.events.push(GameEvent::GameWon);
        return;
    }

    let tuning = world.tuning.clone();

    // Player intent
    world
        .player
        .control(input, &tuning, dt, &mut world.events);

    // Gravity + integration
    apply_gravity_with(
        &mut world.player.vel,
        tuning.gravity_accel,
        tuning.max_fall_speed,
        dt,
    );
    integrate(&mut world.player.rect, world.player.vel, dt);

    let was_airborne = world.player.jumping;
    let mut landed = false;

    // Static solids
    for solid in &world.solids {
        if let Some(Contact::Top) =
            resolve_obstacle(&mut world.player.rect, &mut world.player.vel, dt, solid)
        {
            world.player.jumping = false;
            landed = true;
        }
    }

    // Falling platforms: the same resolver, run independently per platform,
    // then each platform advances knowing whether it was stood on.
    for platform in &mut world.platforms {
        let mut stood_on = false;
        if let Some(Contact::Top) = resolve_obstacle(
            &mut world.player.rect,
            &mut world.player.vel,
            dt,
            &platform.rect,
        ) {
            world.player.jumping = false;
            landed = true;
            stood_on = true;
        }
        platform.update(dt, stood_on, &tuning);
    }

    if landed && was_airborne {
        world.events.push(GameEvent::Landed);
    }

    // Spikes: oscillate, then lethal contact against the hitbox
    let hitbox = world.player.hitbox();
    let mut fatal_contact = false;
    for spike in &mut world.spikes {
        spike.update(dt, &tuning, &mut world.rng);
        if spike.rect.overlaps(&hitbox) {
            fatal_contact = true;
        }
    }

    // Orbs: lazy spawn for visible anchors, then collection
    let view = world.camera.view_rect();
    spawn_orbs(
        &world.orb_anchors,
        &view,
        &mut world.spawned_anchors,
        &mut world.orbs,
        &mut world.rng,
    );
    let player_rect = world.player.rect;
    let before = world.orbs.len();
    world.orbs.retain(|orb| !orb.rect.overlaps(&player_rect));
    for _ in 0..before - world.orbs.len() {
        world.player.score += 1;
        world.events.push(GameEvent::OrbCollected);
    }

    // Enemies: schedule, move, despawn, contact damage
    world.spawner.update(
        dt,
        &view,
        &mut world.enemies,
        world.difficulty.enemy_cap(),
        &tuning,
        &mut world.rng,
    );
    let (level_w, level_h) = (world.level.width, world.level.height);
    for enemy in &mut world.enemies {
        enemy.update(dt);
    }
    world
        .enemies
        .retain(|e| !e.is_outside(level_w, level_h, DESPAWN_MARGIN));

    let hitbox = world.player.hitbox();
    if world
        .enemies
        .iter()
        .any(|e| e.hitbox().overlaps(&hitbox))
    {
        world
            .player
            .take_hit(tuning.contact_damage, &tuning, &mut world.events);
    }

    // Death conditions, each sufficient on its own
    let p_rect = world.player.rect;
    let out_of_bounds = p_rect.right() < 0.0 || p_rect.x > level_w;
    let below_level = p_rect.y > level_h + FALL_DEATH_MARGIN;
    let below_high_water = p_rect.y > world.camera.highest_y + FALL_BELOW_CAMERA;

    if fatal_contact || out_of_bounds || below_level || below_high_water {
        world.player.kill();
    }
    if world.player.health <= 0 {
        start_death(world);
    }

    // Camera follow (skips on a non-finite position, which stays broken)
    world.camera.follow(&world.player.rect);

    // Animation clocks advance last, off the settled behavior states
    let idx = world.player.state.index();
    world.player.animations.advance(idx, dt);
    for enemy in &mut world.enemies {
        let idx = enemy.state.index();
        enemy.animations.advance(idx, dt);
    }
}

fn start_death(world: &mut World) {
    if !world.death.active {
        world.player.kill();
        world.death.start();
        world.events.push(GameEvent::PlayerDied);
    }
}
