use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use saucer_app::config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE};
use saucer_app::display::{JsonLinesRenderer, LogRenderer, LogScoreDisplay};
use saucer_app::game_loop::{self, Outputs, Session};
use saucer_app::state::{AppState, LoopError};
use saucer_core::commands::PlayerCommand;
use saucer_core::constants::TICK_RATE;
use saucer_core::enums::Variant;

/// Frames a headless run plays when no limit is given (one minute).
const DEFAULT_HEADLESS_FRAMES: u64 = 60 * TICK_RATE as u64;

#[derive(Parser, Debug)]
#[command(name = "saucer")]
#[command(about = "Fly a saucer, abduct cows. Headless runner for the SAUCER simulation")]
struct Cli {
    /// TOML config file (missing file means defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long, value_enum)]
    variant: Option<CliVariant>,
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,
    /// Pace frames at the tick rate on a game-loop thread
    #[arg(long)]
    realtime: bool,
    /// Print every snapshot as a JSON line on stdout
    #[arg(long)]
    json: bool,
    /// Fly with JSON key commands read from stdin instead of the autopilot
    #[arg(long, requires = "realtime")]
    manual: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliVariant {
    Flat,
    Sphere,
}

impl From<CliVariant> for Variant {
    fn from(value: CliVariant) -> Self {
        match value {
            CliVariant::Flat => Variant::Flat,
            CliVariant::Sphere => Variant::Sphere,
        }
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Loop(#[from] LoopError),
    #[error("game loop thread panicked")]
    Panicked,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let config = apply_overrides(AppConfig::load_or_default(&cli.config)?, &cli);
    log::info!(
        "SAUCER: {:?} terrain, seed {}, {} cows per herd",
        config.variant,
        config.seed,
        config.herd_size
    );

    let session = Session::new(config.sim_config(), config.autopilot);
    let mut outputs = Outputs::new(Box::new(LogScoreDisplay))
        .with_renderer(Box::new(LogRenderer::new(TICK_RATE as u64)));
    if config.json {
        outputs = outputs.with_renderer(Box::new(JsonLinesRenderer::new(std::io::stdout())));
    }

    if config.realtime {
        run_realtime(session, outputs, &config)
    } else {
        run_headless(session, outputs, &config);
        Ok(())
    }
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(variant) = cli.variant {
        config.variant = variant.into();
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.frames.is_some() {
        config.frames = cli.frames;
    }
    config.realtime |= cli.realtime;
    config.json |= cli.json;
    if cli.manual {
        config.autopilot = false;
    }
    config
}

fn run_headless(mut session: Session, mut outputs: Outputs, config: &AppConfig) {
    let frames = config.frames.unwrap_or(DEFAULT_HEADLESS_FRAMES);
    if let Some(last) = game_loop::run_headless(&mut session, &mut outputs, frames) {
        let score = session.engine().score_state();
        log::info!(
            "Finished {} frames: {} abducted, {} captured, {} herds respawned",
            last.time.tick,
            score.cows_abducted,
            score.cows_captured,
            score.herds_respawned
        );
    }
}

fn run_realtime(session: Session, outputs: Outputs, config: &AppConfig) -> Result<(), RunError> {
    let state = Arc::new(AppState::new());
    let (tx, handle) =
        game_loop::spawn_game_loop(session, outputs, config.frames, state.latest_snapshot.clone())?;
    state.attach(tx)?;

    if !config.autopilot {
        spawn_stdin_commands(state.clone())?;
    }

    handle.join().map_err(|_| RunError::Panicked)?;
    if let Some(last) = state.snapshot()? {
        log::info!("Stopped after {} frames, score {}", last.time.tick, last.score);
    }
    Ok(())
}

/// Forward one JSON `PlayerCommand` per stdin line to the game loop.
fn spawn_stdin_commands(state: Arc<AppState>) -> Result<(), RunError> {
    std::thread::Builder::new()
        .name("saucer-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<PlayerCommand>(&line) {
                    Ok(command) => {
                        if state.send_command(command).is_err() {
                            break;
                        }
                    }
                    Err(e) => log::warn!("Ignoring input line {line:?}: {e}"),
                }
            }
            // stdin closed: stop the loop too.
            let _ = state.shutdown();
        })
        .map_err(LoopError::from)?;
    Ok(())
}
