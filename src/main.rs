//! Orbfall headless harness
//!
//! Drives the simulation with a scripted input feed at a fixed timestep and
//! logs the events an audio/UI layer would consume. Useful for smoke-testing
//! gameplay tuning without a renderer attached.

use orbfall::consts::{MAX_SUBSTEPS, SIM_DT};
use orbfall::level::{LevelData, load_level_from_path};
use orbfall::settings::Settings;
use orbfall::sim::{GameMode, TickInput, World, tick};

/// Scripted stand-in for a real input device: run right and hop on a
/// regular cadence, confirming through menus.
struct ScriptedInput {
    frame: u64,
}

impl ScriptedInput {
    fn new() -> Self {
        Self { frame: 0 }
    }

    fn next(&mut self, mode: GameMode) -> TickInput {
        self.frame += 1;
        match mode {
            GameMode::Menu | GameMode::GameOver | GameMode::Win => TickInput {
                confirm: true,
                ..Default::default()
            },
            GameMode::Gameplay => {
                let phase = self.frame % 120;
                TickInput {
                    right: true,
                    jump_pressed: phase == 0,
                    jump_held: phase < 30,
                    jump_released: phase == 30,
                    ..Default::default()
                }
            }
        }
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);

    let settings = Settings::load_or_default(std::path::Path::new("settings.json"));
    log::info!(
        "starting headless run: seed={seed} difficulty={}",
        settings.difficulty.as_str()
    );

    // An unloadable level file is fatal at startup; with no file given the
    // built-in demo level runs.
    let level = match std::env::args().nth(2) {
        Some(path) => load_level_from_path(std::path::Path::new(&path)).unwrap_or_else(|e| {
            log::error!("{e}");
            std::process::exit(1);
        }),
        None => LevelData::demo(),
    };
    let mut world = World::new(level, seed);
    world.menu_selection = settings.difficulty;

    let mut script = ScriptedInput::new();
    let mut accumulator = 0.0f32;
    let frame_dt = 1.0 / 60.0;
    let max_frames = 60 * 60; // one simulated minute

    for _ in 0..max_frames {
        accumulator += frame_dt;
        let input = script.next(world.mode);

        let mut substeps = 0;
        let mut input = input;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut world, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;

            // One-shot inputs must not repeat across substeps
            input.jump_pressed = false;
            input.jump_released = false;
            input.confirm = false;
            input.menu = false;
            input.menu_up = false;
            input.menu_down = false;
        }

        for event in world.drain_events() {
            log::info!(
                "t={:.2}s event={event:?} score={}/{} health={}",
                world.tick_count as f32 * SIM_DT,
                world.player.score,
                world.score_goal(),
                world.player.health,
            );
        }

        match world.mode {
            GameMode::GameOver => {
                log::info!("run over: score={}", world.player.score);
                break;
            }
            GameMode::Win => {
                log::info!("run won: score={}", world.player.score);
                break;
            }
            _ => {}
        }
    }

    log::info!(
        "done: mode={:?} ticks={} score={} health={}",
        world.mode,
        world.tick_count,
        world.player.score,
        world.player.health,
    );
}
