//! Motion model: speed schedule and position integration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Agent;
use crate::consts::*;

/// Step-wise speed schedule shared by both agents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRamp {
    speed: f32,
    /// Running time not yet converted into a speed step
    elapsed: f32,
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self {
            speed: BASE_SPEED,
            elapsed: 0.0,
        }
    }
}

impl SpeedRamp {
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Accumulate running time, applying every full interval that elapsed
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        while self.elapsed >= SPEED_STEP_INTERVAL {
            self.elapsed -= SPEED_STEP_INTERVAL;
            self.speed = (self.speed + SPEED_STEP).min(MAX_SPEED);
        }
    }
}

/// Clamp a frame's elapsed time into `[0, MAX_TICK_DT]`
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_TICK_DT)
}

/// Where `agent` would be after travelling for `dt` at `speed`
#[inline]
pub fn candidate_position(agent: &Agent, speed: f32, dt: f32) -> Vec2 {
    agent.pos + agent.dir.unit() * speed * dt
}

/// Move the agent and drag its open trail segment along
pub fn commit(agent: &mut Agent, pos: Vec2) {
    agent.pos = pos;
    agent.trail.extend_to(pos);
}
