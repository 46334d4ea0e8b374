//! Light-cycle duel - player versus computer on a bounded arena
//!
//! Core modules:
//! - `sim`: Simulation (motion, trails, collisions, round control, opponent AI)
//! - `settings`: Data-driven configuration for the demo runner

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single tick's elapsed time (keeps per-tick travel below trail width)
    pub const MAX_TICK_DT: f32 = 0.05;
    /// Fixed timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Trail geometry
    pub const TRAIL_HALF_WIDTH: f32 = 2.0;
    /// Radius of an agent's head for collision purposes
    pub const COLLISION_RADIUS: f32 = 3.0;
    /// Extra slack added to the head radius
    pub const COLLISION_TOLERANCE: f32 = 1.0;
    /// Reserved inflate term for the collision radius
    pub const COLLISION_INFLATE: f32 = 0.0;

    /// Speed ramp (units per second)
    pub const BASE_SPEED: f32 = 160.0;
    pub const SPEED_STEP: f32 = 12.0;
    /// Seconds of running time between speed increments
    pub const SPEED_STEP_INTERVAL: f32 = 5.0;
    pub const MAX_SPEED: f32 = 280.0;

    /// Spawn distance from the left/right arena edge
    pub const SPAWN_INSET: f32 = 60.0;

    /// Distance the AI travels after a turn before it prefers turning again
    pub const TURN_COOLDOWN_BASE: f32 = 24.0;

    /// Default arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;
}

/// Radius used by every continuous collision test
#[inline]
pub fn collision_radius() -> f32 {
    consts::COLLISION_RADIUS + consts::COLLISION_TOLERANCE + consts::COLLISION_INFLATE
}

/// Side length of one AI grid cell (covers the full collision footprint)
#[inline]
pub fn grid_cell_size() -> f32 {
    2.0 * (consts::TRAIL_HALF_WIDTH + consts::COLLISION_RADIUS + consts::COLLISION_TOLERANCE)
}

/// Distance from `p` to the segment `a..b`, clamping the projection to the segment
#[inline]
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
