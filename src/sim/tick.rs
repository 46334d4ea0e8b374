//! Simulation tick
//!
//! Advances a running round by one frame: motion, simultaneous collision
//! resolution, then AI decisions on their own cadence.

use super::ai::choose_direction;
use super::collision::resolve_collisions;
use super::geometry::Direction;
use super::motion::{candidate_position, clamp_dt, commit};
use super::state::{AgentId, GameEvent, GameState, RoundPhase};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Requested player heading (from keyboard/touch mapping)
    pub turn: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI steers the player too
    pub idle_mode: bool,
    /// Debug: hold the opponent on its current heading
    pub freeze_ai: bool,
}

/// Advance the game state by `dt` seconds (clamped to `MAX_TICK_DT`)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        match state.phase {
            RoundPhase::Running => state.pause(),
            RoundPhase::Paused => state.resume(),
            _ => {}
        }
    }

    if !state.is_running() {
        return events;
    }

    let dt = clamp_dt(dt);

    if let Some(dir) = input.turn {
        if state.set_direction(AgentId::Player, dir) {
            events.push(GameEvent::Turn {
                agent: AgentId::Player,
                direction: dir,
            });
        }
    }

    state.time_ticks += 1;
    state.ramp.advance(dt);
    let speed = state.ramp.speed();

    // Both candidates come from the same pre-move state.
    let player_next = candidate_position(&state.player, speed, dt);
    let ai_next = candidate_position(&state.ai, speed, dt);
    if let Some(outcome) =
        resolve_collisions(&state.player, player_next, &state.ai, ai_next, &state.arena)
    {
        if state.finish(outcome) {
            events.push(GameEvent::RoundOver(outcome));
        }
        return events;
    }
    commit(&mut state.player, player_next);
    commit(&mut state.ai, ai_next);

    if !input.freeze_ai {
        steer(state, AgentId::Ai, dt, speed, &mut events);
    }
    if input.idle_mode {
        steer(state, AgentId::Player, dt, speed, &mut events);
    }

    events
}

/// Let the decision engine turn `id` when its cadence comes due
fn steer(state: &mut GameState, id: AgentId, dt: f32, speed: f32, events: &mut Vec<GameEvent>) {
    let profile = state.difficulty.profile();
    let brain = match id {
        AgentId::Player => &mut state.autopilot,
        AgentId::Ai => &mut state.ai_brain,
    };
    if !brain.due(dt, profile.decision_interval) {
        return;
    }

    let Some(dir) = choose_direction(
        state.agent(id),
        state.agent(id.opponent()),
        &state.arena,
        speed,
        &profile,
    ) else {
        return;
    };
    if state.agent_mut(id).turn(dir) {
        log::debug!("{:?} turns {:?} at {:?}", id, dir, state.agent(id).pos);
        events.push(GameEvent::Turn { agent: id, direction: dir });
    }
}
