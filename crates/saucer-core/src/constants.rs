//! Simulation constants and tuning parameters.
//!
//! Per-frame quantities are applied once per update regardless of the
//! frame's delta time; only the wander timer consumes real seconds.

/// Fixed-step tick rate (Hz) used by `SimulationEngine::tick`.
pub const TICK_RATE: u32 = 60;

/// Seconds per fixed tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Default number of cows in a freshly spawned herd.
pub const HERD_SIZE: usize = 5;

// --- Craft ---

/// Craft translation per frame while a movement control is held (flat).
pub const CRAFT_SPEED: f64 = 0.2;

/// Craft yaw change per frame while a yaw control is held (radians).
pub const CRAFT_YAW_SPEED: f64 = 0.03;

/// Craft hover height above the flat ground.
pub const CRAFT_HOVER_HEIGHT: f64 = 5.0;

/// Half-extent of the square region the craft and cows are kept in (flat).
pub const ARENA_HALF_EXTENT: f64 = 45.0;

// --- Planet (sphere variant) ---

/// Planet radius.
pub const PLANET_RADIUS: f64 = 30.0;

/// Craft altitude above the planet surface.
pub const CRAFT_SURFACE_ALTITUDE: f64 = 3.0;

/// Cow body offset above the planet surface.
pub const COW_SURFACE_OFFSET: f64 = 0.5;

/// Craft longitude/latitude change per frame while a movement control is held (degrees).
pub const CRAFT_ANGULAR_STEP_DEG: f64 = 0.5;

/// Latitude limit for craft and cows (degrees), keeps clear of the poles.
pub const MAX_LATITUDE_DEG: f64 = 85.0;

// --- Cows ---

/// Cow body height above the flat ground.
pub const COW_GROUND_HEIGHT: f64 = 0.8;

/// Half-width of the square cows are spawned in (flat).
pub const COW_SPAWN_HALF_EXTENT: f64 = 40.0;

/// Cow wander distance per frame (flat).
pub const COW_WANDER_SPEED: f64 = 0.03;

/// Cow wander angular step per frame (sphere, degrees).
pub const COW_WANDER_STEP_DEG: f64 = 0.1;

/// Seconds a cow keeps its heading before picking a new one.
pub const WANDER_INTERVAL_SECS: f64 = 3.0;

/// Planar capture radius (flat).
pub const FLAT_CAPTURE_RADIUS: f64 = 2.0;

/// 3D capture radius (sphere).
pub const SPHERE_CAPTURE_RADIUS: f64 = 5.0;

// --- Abduction ---

/// Abduction progress gained per frame (~50 frames to complete).
pub const ABDUCTION_PROGRESS_STEP: f64 = 0.02;

/// Fraction of the remaining gap to the craft closed per frame.
pub const ABDUCTION_PULL_FRACTION: f64 = 0.1;

/// Height gained per frame by an abducted cow (flat).
pub const ABDUCTION_RISE_SPEED: f64 = 0.1;

/// Abducted cows stop rising this far below the craft (flat).
pub const ABDUCTION_BEAM_DEPTH: f64 = 2.0;

/// Spin applied per frame to an abducted cow (radians).
pub const ABDUCTION_SPIN_SPEED: f64 = 0.1;

/// Amplitude of the abducted cow's tilt wobble (radians).
pub const ABDUCTION_TILT_AMPLITUDE: f64 = 0.2;

// --- Camera ---

/// Height of the follow camera above the craft.
pub const CAMERA_HEIGHT: f64 = 10.0;

/// Distance of the follow camera behind the craft.
pub const CAMERA_DISTANCE: f64 = 15.0;

/// Fraction of the remaining distance the camera covers each frame.
pub const CAMERA_SMOOTHING: f64 = 0.1;

/// The flat camera looks this far below the craft.
pub const CAMERA_LOOK_DROP: f64 = 2.0;

/// Initial camera position (flat).
pub const CAMERA_START: [f64; 3] = [0.0, 15.0, 20.0];

/// Vertical field of view (degrees).
pub const CAMERA_FOV_DEG: f64 = 75.0;

/// Near clip plane.
pub const CAMERA_NEAR: f64 = 0.1;

/// Far clip plane.
pub const CAMERA_FAR: f64 = 1000.0;

// --- Tractor beam (cosmetic) ---

/// Angular frequency of the beam pulse (radians per second).
pub const BEAM_PULSE_RATE: f64 = 3.0;

/// Base and swing of the beam opacity.
pub const BEAM_OPACITY: (f64, f64) = (0.3, 0.1);

/// Base and swing of the beam glow opacity.
pub const BEAM_GLOW_OPACITY: (f64, f64) = (0.1, 0.05);

/// Beam rotation per frame (radians).
pub const BEAM_SPIN: f64 = 0.02;

/// Beam glow rotation per frame (radians).
pub const BEAM_GLOW_SPIN: f64 = -0.01;

// --- Display ---

/// Default viewport size in pixels.
pub const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);
