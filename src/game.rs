//! Top-level game flow
//!
//! [`Game`] owns the current run's [`World`], the high score and the
//! screen the player is on. Each frame it reads one [`FrameInput`],
//! switches screens, steps the simulation while playing and reacts to what
//! the step reports (game over, level complete, victory).

use crate::highscore::{HighScore, ScoreStorage};
use crate::input::FrameInput;
use crate::renderer::{ParticleSystem, Renderer, scene};
use crate::settings::Settings;
use crate::sim::{World, tick};
use crate::ui;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    LevelSelect,
    Playing,
    Paused,
    Win,
}

/// What the driver should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// How the last run ended, for the menu and win screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub won: bool,
    pub new_high_score: bool,
}

pub struct Game<S: ScoreStorage> {
    mode: GameMode,
    world: Option<World>,
    settings: Settings,
    high_score: HighScore<S>,
    /// Highest level the player may pick in level select
    unlocked_level: u32,
    particles: ParticleSystem,
    base_seed: u64,
    runs_started: u64,
    last_run: Option<RunSummary>,
    fps: f32,
}

impl<S: ScoreStorage> Game<S> {
    pub fn new(settings: Settings, storage: S, seed: u64) -> Self {
        let high_score = HighScore::load(storage);
        let particles =
            ParticleSystem::new(settings.max_particles(), settings.trail_density(), seed);
        Self {
            mode: GameMode::Menu,
            world: None,
            settings,
            high_score,
            unlocked_level: 1,
            particles,
            base_seed: seed,
            runs_started: 0,
            last_run: None,
            fps: 0.0,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The run in progress (present while Playing or Paused)
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn storage(&self) -> &S {
        self.high_score.storage()
    }

    pub fn unlocked_level(&self) -> u32 {
        self.unlocked_level
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    /// Smoothed frames per second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, input: &FrameInput) -> Flow {
        if dt > 0.0 {
            let instant = 1.0 / dt;
            self.fps = if self.fps == 0.0 {
                instant
            } else {
                self.fps * 0.9 + instant * 0.1
            };
        }

        let flow = match self.mode {
            GameMode::Menu => self.update_menu(input),
            GameMode::LevelSelect => {
                self.update_level_select(input);
                Flow::Continue
            }
            GameMode::Playing => {
                self.update_playing(dt, input);
                Flow::Continue
            }
            GameMode::Paused => {
                if input.back {
                    self.return_to_menu();
                } else if input.pause {
                    self.set_mode(GameMode::Playing);
                }
                Flow::Continue
            }
            GameMode::Win => {
                let clicked_menu = input.click && ui::continue_button().contains(input.pointer);
                if clicked_menu || input.launch || input.back {
                    self.set_mode(GameMode::Menu);
                }
                Flow::Continue
            }
        };

        if self.mode != GameMode::Paused {
            self.particles.update(dt.clamp(0.0, crate::consts::MAX_FRAME_DT));
        }
        flow
    }

    /// Draw the current screen
    pub fn render(&self, renderer: &mut impl Renderer) {
        scene::draw(self, renderer);
    }

    fn update_menu(&mut self, input: &FrameInput) -> Flow {
        if input.back {
            log::info!("Quit requested from menu");
            return Flow::Quit;
        }
        if input.click {
            if ui::play_button().contains(input.pointer) {
                self.start_run(1);
            } else if ui::levels_button().contains(input.pointer) {
                self.set_mode(GameMode::LevelSelect);
            }
        }
        Flow::Continue
    }

    fn update_level_select(&mut self, input: &FrameInput) {
        if input.back || (input.click && ui::back_button().contains(input.pointer)) {
            self.set_mode(GameMode::Menu);
            return;
        }
        if !input.click {
            return;
        }
        let max_levels = self.settings.tuning.max_levels;
        match ui::level_at(input.pointer, max_levels) {
            Some(level) if level <= self.unlocked_level => self.start_run(level),
            Some(level) => log::debug!("Level {} is locked", level),
            None => {}
        }
    }

    fn update_playing(&mut self, dt: f32, input: &FrameInput) {
        if input.back {
            self.return_to_menu();
            return;
        }
        if input.pause {
            self.set_mode(GameMode::Paused);
            return;
        }

        let Some(world) = self.world.as_mut() else {
            log::warn!("Playing without a world, returning to menu");
            self.set_mode(GameMode::Menu);
            return;
        };

        if input.restart {
            let level = world.level;
            log::info!("Restarting level {}", level);
            self.start_run(level);
            return;
        }

        if input.skip_level {
            log::info!("Skipping level {}", world.level);
            world.clear_bricks();
        }

        let fx = tick(world, &input.tick_input(), dt);
        let score = world.score;
        let level = world.level;
        self.particles.spawn_all(&fx.bursts);

        if fx.game_over() {
            self.finish_run(score, level, false);
            self.set_mode(GameMode::Menu);
        } else if fx.victory() {
            self.unlocked_level = self.settings.tuning.max_levels.max(1);
            self.finish_run(score, level, true);
            self.set_mode(GameMode::Win);
        } else if let Some(next_level) = fx.level_complete() {
            let unlocked = next_level.min(self.settings.tuning.max_levels.max(1));
            if unlocked > self.unlocked_level {
                self.unlocked_level = unlocked;
                log::info!("Unlocked level {}", unlocked);
            }
        }
    }

    /// Begin a fresh run at `level`
    fn start_run(&mut self, level: u32) {
        let seed = self.base_seed.wrapping_add(self.runs_started);
        self.runs_started += 1;
        self.world = Some(World::new(level, self.settings.tuning.clone(), seed));
        self.particles.clear();
        log::info!("Starting run at level {} (seed {})", level, seed);
        self.set_mode(GameMode::Playing);
    }

    fn finish_run(&mut self, score: u64, level: u32, won: bool) {
        let new_high_score = self.high_score.save(score);
        self.last_run = Some(RunSummary {
            score,
            level,
            won,
            new_high_score,
        });
        self.world = None;
        self.particles.clear();
    }

    /// Abandon the run without recording it
    fn return_to_menu(&mut self) {
        self.world = None;
        self.particles.clear();
        self.set_mode(GameMode::Menu);
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            log::info!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}
