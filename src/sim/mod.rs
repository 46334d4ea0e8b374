//! Simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit elapsed time only, no platform clocks
//! - Both agents resolved simultaneously each tick
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod difficulty;
pub mod geometry;
pub mod grid;
pub mod motion;
pub mod state;
pub mod tick;
pub mod trail;

pub use ai::{AiBrain, MoveEvaluation, choose_direction, select_move, territory_differential};
pub use collision::{collides, heads_collide, resolve_collisions};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use geometry::Direction;
pub use grid::{GridAgent, GridCell, OccupancyGrid};
pub use motion::SpeedRamp;
pub use state::{Agent, AgentId, Arena, GameEvent, GameState, RoundOutcome, RoundPhase};
pub use tick::{TickInput, tick};
pub use trail::{Segment, Trail};
