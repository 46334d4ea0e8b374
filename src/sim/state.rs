//! Game state and round control
//!
//! `GameState` is owned by the caller and only mutated by the controller
//! methods below and by `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ai::AiBrain;
use super::difficulty::Difficulty;
use super::geometry::Direction;
use super::motion::SpeedRamp;
use super::trail::Trail;
use crate::consts::*;

/// Which side an agent plays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentId {
    Player,
    Ai,
}

impl AgentId {
    pub fn opponent(self) -> AgentId {
        match self {
            AgentId::Player => AgentId::Ai,
            AgentId::Ai => AgentId::Player,
        }
    }
}

/// Terminal result of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Player survived, AI crashed
    Player,
    /// AI survived, player crashed
    Ai,
    /// Both crashed on the same tick (or met head-on)
    Tie,
}

impl RoundOutcome {
    /// Outcome crediting the survivor when only `loser` crashed
    pub fn won_by_opponent_of(loser: AgentId) -> Self {
        match loser {
            AgentId::Player => RoundOutcome::Ai,
            AgentId::Ai => RoundOutcome::Player,
        }
    }
}

/// Round controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No agents active
    Idle,
    /// Motion, AI and collisions active
    Running,
    /// Frozen, state preserved
    Paused,
    /// Outcome raised, waiting for start/reset
    Ended(RoundOutcome),
}

/// Notifications returned from `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An agent's direction actually changed
    Turn { agent: AgentId, direction: Direction },
    /// The round ended (raised once per round)
    RoundOver(RoundOutcome),
}

/// Rectangular play area anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both sides are finite and positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

/// A light cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub pos: Vec2,
    pub dir: Direction,
    pub trail: Trail,
}

impl Agent {
    /// Agent placed at `pos`, with a fresh degenerate trail
    pub fn spawn(id: AgentId, pos: Vec2, dir: Direction) -> Self {
        Self {
            id,
            pos,
            dir,
            trail: Trail::starting_at(pos),
        }
    }

    /// Inactive placeholder used while the controller is idle
    fn inactive(id: AgentId) -> Self {
        let dir = match id {
            AgentId::Player => Direction::Right,
            AgentId::Ai => Direction::Left,
        };
        Self {
            id,
            pos: Vec2::ZERO,
            dir,
            trail: Trail::default(),
        }
    }

    /// Change direction, starting a new trail segment at the current position.
    ///
    /// Returns false (and changes nothing) when `dir` is the current
    /// direction or its reverse.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if dir == self.dir || dir.is_opposite(self.dir) {
            return false;
        }
        self.dir = dir;
        self.trail.begin_segment(self.pos);
        true
    }

    /// Distance travelled since the last turn (or spawn)
    pub fn distance_since_turn(&self) -> f32 {
        self.trail.open_length()
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub phase: RoundPhase,
    pub difficulty: Difficulty,
    pub player: Agent,
    pub ai: Agent,
    /// Shared speed schedule for both agents
    pub ramp: SpeedRamp,
    /// Decision cadence for the computer opponent
    pub ai_brain: AiBrain,
    /// Decision cadence for the player agent in idle/demo mode
    pub autopilot: AiBrain,
    /// Ticks simulated while running this round
    pub time_ticks: u64,
    /// Rounds started since creation
    pub round: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Arena::default(), Difficulty::default())
    }
}

impl GameState {
    /// Create an idle controller for the given arena
    pub fn new(arena: Arena, difficulty: Difficulty) -> Self {
        Self {
            arena,
            phase: RoundPhase::Idle,
            difficulty,
            player: Agent::inactive(AgentId::Player),
            ai: Agent::inactive(AgentId::Ai),
            ramp: SpeedRamp::default(),
            ai_brain: AiBrain::default(),
            autopilot: AiBrain::default(),
            time_ticks: 0,
            round: 0,
        }
    }

    pub fn agent(&self, id: AgentId) -> &Agent {
        match id {
            AgentId::Player => &self.player,
            AgentId::Ai => &self.ai,
        }
    }

    pub fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        match id {
            AgentId::Player => &mut self.player,
            AgentId::Ai => &mut self.ai,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Outcome of the last round, if it has ended
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            RoundPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Return to idle, discarding all round state
    pub fn reset(&mut self) {
        self.phase = RoundPhase::Idle;
        self.player = Agent::inactive(AgentId::Player);
        self.ai = Agent::inactive(AgentId::Ai);
        self.ramp = SpeedRamp::default();
        self.ai_brain = AiBrain::default();
        self.autopilot = AiBrain::default();
        self.time_ticks = 0;
    }

    /// Spawn both agents on opposite edges facing each other and start running.
    ///
    /// Returns false if the arena has no usable size yet.
    pub fn start_round(&mut self) -> bool {
        if !self.arena.is_valid() {
            log::warn!(
                "Refusing to start round in invalid arena {}x{}",
                self.arena.width,
                self.arena.height
            );
            return false;
        }

        let mid_y = self.arena.height / 2.0;
        let inset = SPAWN_INSET.min(self.arena.width / 4.0);
        self.reset();
        self.player = Agent::spawn(AgentId::Player, Vec2::new(inset, mid_y), Direction::Right);
        self.ai = Agent::spawn(
            AgentId::Ai,
            Vec2::new(self.arena.width - inset, mid_y),
            Direction::Left,
        );
        self.round += 1;
        self.phase = RoundPhase::Running;

        log::info!(
            "Round {} started: arena={}x{}, difficulty={}",
            self.round,
            self.arena.width,
            self.arena.height,
            self.difficulty.as_str()
        );
        true
    }

    pub fn pause(&mut self) {
        if self.phase == RoundPhase::Running {
            self.phase = RoundPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == RoundPhase::Paused {
            self.phase = RoundPhase::Running;
        }
    }

    /// Turn an agent. Ignored unless the round is running, and for
    /// repeated or reversed directions.
    pub fn set_direction(&mut self, id: AgentId, dir: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        self.agent_mut(id).turn(dir)
    }

    /// Swap the opponent profile; applies from the next decision
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty != difficulty {
            log::info!("Difficulty: {} -> {}", self.difficulty.as_str(), difficulty.as_str());
        }
        self.difficulty = difficulty;
    }

    /// Update arena bounds. Non-positive sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let arena = Arena::new(width, height);
        if !arena.is_valid() {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return false;
        }
        self.arena = arena;
        true
    }

    /// Enter the terminal phase. Only the first outcome of a round sticks.
    pub(crate) fn finish(&mut self, outcome: RoundOutcome) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = RoundPhase::Ended(outcome);
        log::info!("Round {} over: {:?} after {} ticks", self.round, outcome, self.time_ticks);
        true
    }
}
