//! Rune Breaker - headless native entry point
//!
//! Plays the game on autoplay without a window: clicks Play, lets the demo
//! paddle run until the run ends, and logs how it went. Useful for soak
//! testing the simulation and for exercising the render path.
//!
//! Usage: `rune-breaker [settings.json] [max_frames]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rune_breaker::input::InputState;
use rune_breaker::renderer::DrawList;
use rune_breaker::{FileStorage, Flow, Game, GameMode, Settings, ui};

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Rune Breaker (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(&PathBuf::from(path)),
        None => Settings::default(),
    };
    let max_frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed {}, quality {}", seed, settings.quality.as_str());

    let storage = FileStorage::new(settings.high_score_path.clone());
    let mut game = Game::new(settings, storage, seed);
    let mut input = InputState::new();
    let mut frame_list = DrawList::new();

    input.set_autoplay(true);
    input.pointer_pressed(ui::play_button().center());

    let mut deepest_level = 0;
    let mut frames = 0;
    while frames < max_frames {
        let frame = input.take_frame();
        if game.update(FRAME_DT, &frame) == Flow::Quit {
            break;
        }
        frames += 1;

        if let Some(world) = game.world() {
            deepest_level = deepest_level.max(world.level);
        }

        frame_list.clear();
        game.render(&mut frame_list);

        // Game over lands on the menu, the last level on the win screen
        if matches!(game.mode(), GameMode::Menu | GameMode::Win) {
            break;
        }
    }

    match game.last_run() {
        Some(run) => log::info!(
            "Run finished after {} frames: score {}, level {}, {}{}",
            frames,
            run.score,
            run.level,
            if run.won { "won" } else { "lost" },
            if run.new_high_score { ", new high score" } else { "" }
        ),
        None => log::info!(
            "Stopped after {} frames while still on level {}",
            frames,
            deepest_level
        ),
    }
    log::info!(
        "High score {}, last frame issued {} draw calls",
        game.high_score(),
        frame_list.len()
    );
}
