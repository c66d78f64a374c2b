/// Entry point: load config, bring up the terminal, start the input
/// listener and hand everything to the game loop.

mod config;
mod domain;
mod game_loop;
mod sim;
mod ui;

use std::fs::File;
use std::process;

use env_logger::{Env, Target};
use log::info;

use config::{GameConfig, LogConfig};
use game_loop::GameLoop;
use sim::state::SimulationState;
use ui::input::InputChannel;
use ui::surface::Surface;
use ui::terminal::{CrosstermEvents, TerminalSurface};

fn main() {
    let config = GameConfig::load();
    init_logging(&config.log);

    let mut surface = TerminalSurface::new();
    if let Err(e) = surface.init() {
        let _ = surface.shutdown();
        eprintln!("Terminal init failed: {e}");
        process::exit(1);
    }

    let input = match InputChannel::spawn(CrosstermEvents) {
        Ok(input) => input,
        Err(e) => {
            let _ = surface.shutdown();
            eprintln!("Input listener failed to start: {e}");
            process::exit(1);
        }
    };

    let state = SimulationState::from_config(&config);
    info!("starting with {} objects", state.objects.len());

    GameLoop::new(state, surface, input, config).run()
}

/// `RUST_LOG` wins over `[log] level`. With `[log] file` set, records go to
/// that file instead of stderr so they never land on the alternate screen.
fn init_logging(cfg: &LogConfig) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(cfg.level.as_str()));

    if let Some(path) = &cfg.file {
        match File::create(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Warning: could not open log file {}: {e}", path.display()),
        }
    }

    builder.init();
}
