//! Game loop: drives the simulation engine one frame at a time and hands
//! each snapshot to the score display and renderers.
//!
//! `run_headless` steps as fast as possible on the calling thread.
//! `spawn_game_loop` moves the session onto its own thread, paces it at the
//! tick rate, takes commands over an `mpsc` channel and publishes the latest
//! snapshot in shared state.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use saucer_core::commands::PlayerCommand;
use saucer_core::constants::{DT, TICK_RATE};
use saucer_core::state::FrameSnapshot;
use saucer_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::display::{FrameRenderer, ScoreDisplay, ScoreSink};
use crate::state::{GameLoopCommand, LoopError};

/// Nominal duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// One session plus its input source.
pub struct Session {
    engine: SimulationEngine,
    pilot: Option<Autopilot>,
    last: Option<FrameSnapshot>,
}

impl Session {
    /// With `autopilot` the built-in pilot flies; otherwise the craft follows
    /// key commands latched by the engine.
    pub fn new(config: SimConfig, autopilot: bool) -> Self {
        Self {
            engine: SimulationEngine::new(config),
            pilot: autopilot.then(Autopilot::new),
            last: None,
        }
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.engine.queue_command(command);
    }

    /// Advance one frame.
    pub fn step(&mut self) -> FrameSnapshot {
        let snapshot = match (self.pilot.as_mut(), self.last.as_ref()) {
            (Some(pilot), Some(last)) => {
                let input = pilot.next_input(last);
                self.engine.update(DT, &input)
            }
            _ => self.engine.tick(),
        };
        self.last = Some(snapshot.clone());
        snapshot
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }
}

/// Where frames go: the score display plus any number of renderers.
pub struct Outputs {
    score: ScoreSink<Box<dyn ScoreDisplay + Send>>,
    renderers: Vec<Box<dyn FrameRenderer + Send>>,
}

impl Outputs {
    pub fn new(display: Box<dyn ScoreDisplay + Send>) -> Self {
        Self {
            score: ScoreSink::new(display),
            renderers: Vec::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn FrameRenderer + Send>) -> Self {
        self.renderers.push(renderer);
        self
    }

    pub fn present(&mut self, snapshot: &FrameSnapshot) {
        self.score.push(snapshot.score);
        for renderer in &mut self.renderers {
            renderer.render(snapshot);
        }
    }
}

/// Run `frames` frames back to back. Returns the last snapshot.
pub fn run_headless(
    session: &mut Session,
    outputs: &mut Outputs,
    frames: u64,
) -> Option<FrameSnapshot> {
    let mut last = None;
    for _ in 0..frames {
        let snapshot = session.step();
        outputs.present(&snapshot);
        last = Some(snapshot);
    }
    last
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle. The loop stops on
/// `Shutdown`, when every sender is dropped, or after `max_frames`.
pub fn spawn_game_loop(
    session: Session,
    outputs: Outputs,
    max_frames: Option<u64>,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), LoopError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("saucer-game-loop".into())
        .spawn(move || {
            run_game_loop(session, outputs, max_frames, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect or the frame limit.
fn run_game_loop(
    mut session: Session,
    mut outputs: Outputs,
    max_frames: Option<u64>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) {
    let mut next_tick_time = Instant::now();
    let mut frames = 0u64;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => session.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    log::info!("Game loop shutting down after {frames} frames");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        if max_frames.is_some_and(|max| frames >= max) {
            return;
        }

        // 2. Advance one frame and hand it out
        let snapshot = session.step();
        frames += 1;
        outputs.present(&snapshot);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
