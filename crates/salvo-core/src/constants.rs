//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Path following ---

/// Distance below which a waypoint counts as reached (units).
pub const WAYPOINT_EPSILON: f64 = 0.1;

// --- Spawning ---

/// Half-width of the uniform spawn jitter on each axis (units).
pub const SPAWN_JITTER: f64 = 0.5;

/// Default wave move speed (units/s).
pub const DEFAULT_MOVE_SPEED: f64 = 5.0;

/// Default base time between spawns within a wave (seconds).
pub const DEFAULT_SPAWN_INTERVAL: f64 = 1.0;

/// Default variance applied around the base spawn interval (seconds).
pub const DEFAULT_SPAWN_VARIANCE: f64 = 0.5;

/// Default floor for a spawn interval (seconds).
pub const DEFAULT_MINIMUM_SPAWN_INTERVAL: f64 = 0.2;

// --- Firing ---

/// Default base time between shots (seconds).
pub const DEFAULT_FIRING_INTERVAL: f64 = 0.2;

/// Default variance of the firing interval (seconds).
pub const DEFAULT_FIRING_VARIANCE: f64 = 0.1;

/// Default floor for the firing interval (seconds).
pub const DEFAULT_MINIMUM_FIRING_INTERVAL: f64 = 0.1;

/// Default projectile speed reported with each shot (units/s).
pub const DEFAULT_PROJECTILE_SPEED: f64 = 10.0;

// --- Health ---

/// Default hit points of an enemy kind.
pub const DEFAULT_MAX_HEALTH: i32 = 100;

/// Default score awarded when an enemy is killed.
pub const DEFAULT_SCORE_VALUE: u32 = 50;

// --- Cleanup ---

/// Margin outside the play bounds before a tracker is retired (units).
pub const OUT_OF_BOUNDS_MARGIN: f64 = 2.0;
