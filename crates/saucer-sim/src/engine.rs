//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` is the session object: it owns the hecs ECS world,
//! the follow camera, the score and the RNG, applies queued platform
//! commands, runs all systems and produces `FrameSnapshot`s. It never
//! schedules itself; an external driver calls `update` (or `tick`) once per
//! frame.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use saucer_core::commands::PlayerCommand;
use saucer_core::constants::{DEFAULT_VIEWPORT, DT, HERD_SIZE};
use saucer_core::enums::Variant;
use saucer_core::events::GameEvent;
use saucer_core::input::InputState;
use saucer_core::state::FrameSnapshot;
use saucer_core::types::SimTime;

use crate::score::ScoreState;
use crate::systems;
use crate::systems::camera::CameraRig;
use crate::world_setup;

/// Configuration for starting a new session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same input = same session.
    pub seed: u64,
    pub variant: Variant,
    /// Cows per herd batch. Clamped to at least one.
    pub herd_size: usize,
    /// Initial output surface size in pixels.
    pub viewport: (u32, u32),
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            variant: Variant::default(),
            herd_size: HERD_SIZE,
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    variant: Variant,
    herd_size: usize,
    rng: ChaCha8Rng,
    next_cow_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    input: InputState,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    camera: CameraRig,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new session: craft plus a first herd, camera at its opening shot.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut next_cow_id = 0;
        let herd_size = config.herd_size.max(1);

        world_setup::setup_session(
            &mut world,
            &mut rng,
            config.variant,
            herd_size,
            &mut next_cow_id,
        );
        let camera = CameraRig::new(config.variant, &world, config.viewport);
        log::debug!(
            "session started: {:?} terrain, seed {}, {} cows",
            config.variant,
            config.seed,
            herd_size
        );

        Self {
            world,
            time: SimTime::default(),
            variant: config.variant,
            herd_size,
            rng,
            next_cow_id,
            command_queue: VecDeque::new(),
            input: InputState::default(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            camera,
            score: ScoreState::default(),
        }
    }

    /// Queue a platform command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance one fixed step using the input latched from queued key commands.
    pub fn tick(&mut self) -> FrameSnapshot {
        self.process_commands();
        let input = self.input.clone();
        self.update(DT, &input)
    }

    /// Advance the session by one frame of `dt` seconds with the given held controls.
    ///
    /// Order: craft, camera, beam, herd (wander/capture/abduction), removal,
    /// repopulation. The herd is never empty when this returns.
    pub fn update(&mut self, dt: f64, input: &InputState) -> FrameSnapshot {
        self.process_commands();
        self.time.advance(dt);
        self.run_systems(dt, input);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.variant,
            &self.score,
            &self.camera,
            events,
        )
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Cows abducted so far.
    pub fn score(&self) -> u32 {
        self.score.cows_abducted
    }

    /// Full score breakdown.
    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    /// Controls currently latched from key commands.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Number of cows currently alive.
    pub fn herd_count(&self) -> usize {
        systems::repopulate::herd_count(&self.world)
    }

    /// Drop every cow without scoring it (for scripted scenarios).
    #[cfg(test)]
    pub fn clear_herd(&mut self) {
        let cows: Vec<hecs::Entity> = self
            .world
            .query::<&saucer_core::components::Cow>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in cows {
            let _ = self.world.despawn(entity);
        }
    }

    /// Spawn a wandering cow at a fixed ground position (flat scenarios).
    #[cfg(test)]
    pub fn spawn_cow_at(&mut self, x: f64, z: f64, heading: f64) -> hecs::Entity {
        world_setup::spawn_flat_cow(
            &mut self.world,
            glam::DVec3::new(x, saucer_core::constants::COW_GROUND_HEIGHT, z),
            heading,
            &mut self.next_cow_id,
        )
    }

    /// Spawn a wandering cow at a surface address (sphere scenarios).
    #[cfg(test)]
    pub fn spawn_surface_cow_at(
        &mut self,
        coord: saucer_core::types::SurfaceCoord,
        heading: f64,
    ) -> hecs::Entity {
        world_setup::spawn_sphere_cow(&mut self.world, coord, heading, &mut self.next_cow_id)
    }

    /// Teleport the craft over a ground position (flat scenarios).
    #[cfg(test)]
    pub fn place_craft(&mut self, x: f64, z: f64) {
        use saucer_core::components::Craft;
        use saucer_core::types::Position;
        for (_entity, (_craft, pos)) in self.world.query_mut::<(&Craft, &mut Position)>() {
            pos.x = x;
            pos.z = z;
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single platform command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::KeyDown { key } => {
                self.input.process_key(&key, true);
            }
            PlayerCommand::KeyUp { key } => {
                self.input.process_key(&key, false);
            }
            PlayerCommand::Resize { width, height } => {
                self.camera.resize(width, height);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64, input: &InputState) {
        // 1. Craft controller
        systems::craft::run(&mut self.world, input, self.variant);
        // 2. Follow camera
        systems::camera::run(&self.world, &mut self.camera, self.variant);
        // 3. Tractor beam pulse
        systems::beam::run(&mut self.world, self.time.elapsed_secs);
        // 4. Herd: wander, capture, abduction progress
        systems::herd::run(
            &mut self.world,
            &mut self.rng,
            self.variant,
            dt,
            self.time.elapsed_secs,
            &mut self.despawn_buffer,
            &mut self.score,
            &mut self.events,
        );
        // 5. Remove finished abductions, score them
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.score,
            &mut self.events,
        );
        // 6. Refill the herd if it ran dry
        systems::repopulate::run(
            &mut self.world,
            &mut self.rng,
            self.variant,
            self.herd_size,
            &mut self.next_cow_id,
            &mut self.score,
            &mut self.events,
        );
    }
}
