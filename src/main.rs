//! Arena Shooter: top-down wave survival
//!
//! Steer with WASD, aim with the mouse, hold the button to shoot. Enemies
//! arrive in growing waves from the edges of the arena; from the second
//! wave on, aircraft make strafing runs. The run ends when health hits zero.
//!
//! Gameplay tuning is read from a RON file: the first command line argument,
//! or `assets/tuning.ron` when present.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;
mod texture;

use std::path::PathBuf;

use macroquad::prelude::*;

use config::{Tuning, DEFAULT_TUNING_PATH};
use game::{Arena, ArenaRenderer, FrameHandler, GameClock, Overlay, Phase, Session};
use input::{action_pressed, Action, InputState, PointerMapping};
use texture::TextureCache;

/// Directory sprite image paths are relative to
const ASSET_DIR: &str = "assets";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Arena Shooter v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        ..Default::default()
    }
}

/// Load tuning, falling back to defaults on any problem.
fn load_tuning() -> Tuning {
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let path = explicit.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_TUNING_PATH));

    if explicit.is_none() && !path.exists() {
        log::info!("no tuning file at {}, using defaults", path.display());
        return Tuning::default();
    }
    match Tuning::load(&path) {
        Ok(tuning) => {
            log::info!("loaded tuning from {}", path.display());
            tuning
        }
        Err(e) => {
            log::warn!("failed to load tuning from {}: {e}, using defaults", path.display());
            Tuning::default()
        }
    }
}

fn viewport_arena() -> Arena {
    Arena::new(screen_width(), screen_height())
}

/// Clock callbacks for one host frame
struct Frame<'a> {
    session: &'a mut Session,
    renderer: &'a mut ArenaRenderer,
    input: InputState,
    overlay: Overlay,
}

impl FrameHandler for Frame<'_> {
    fn update(&mut self, _dt: f64) {
        // The clock was built from the session's fixed_step
        self.session.tick(&self.input);
    }

    fn render(&mut self, frame_dt: f64) {
        self.session.update_camera(frame_dt as f32);
        let snapshot = self.session.snapshot();
        self.renderer.draw_frame(&snapshot, self.overlay);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tuning = load_tuning();
    let mut session = Session::new(tuning.clone(), viewport_arena());
    let mut renderer = ArenaRenderer::new(TextureCache::new(ASSET_DIR));
    let mut clock = GameClock::new(tuning.fixed_step);
    let mut paused = false;

    log::info!("=== Arena Shooter v{} ===", VERSION);
    clock.start(get_time());

    loop {
        let now = get_time();

        // =====================================================================
        // Host controls: pause, restart
        // =====================================================================
        match session.phase() {
            Phase::Playing => {
                if action_pressed(Action::Pause) {
                    paused = !paused;
                    if paused {
                        clock.stop();
                    } else {
                        clock.start(now);
                    }
                }
            }
            Phase::GameOver => {
                if action_pressed(Action::Restart) {
                    log::info!("restarting");
                    session = Session::new(tuning.clone(), viewport_arena());
                    paused = false;
                    clock.start(now);
                }
            }
        }

        session.set_arena(viewport_arena());

        let overlay = match (session.phase(), paused) {
            (Phase::GameOver, _) => Overlay::GameOver,
            (Phase::Playing, true) => Overlay::Paused,
            (Phase::Playing, false) => Overlay::None,
        };
        let mut frame = Frame {
            session: &mut session,
            renderer: &mut renderer,
            input: InputState::sample(PointerMapping::identity()),
            overlay,
        };

        if clock.is_running() {
            clock.frame(now, &mut frame);
        } else {
            // Stopped clock: keep showing the last state
            frame.render(0.0);
        }

        if session.phase() == Phase::GameOver && clock.is_running() {
            clock.stop();
        }

        next_frame().await;
    }
}
