//! Collision detection against arena bounds, trails and the opposing head
//!
//! Every test treats the agent head as a disc of `collision_radius()` and the
//! trail as the zero-width polyline of its segments.

use glam::Vec2;

use super::geometry::distance_to_bounds;
use super::state::{Agent, Arena, RoundOutcome};
use super::trail::Segment;
use crate::{collision_radius, point_segment_distance};

/// Newest own segments ignored by the self-trail test: the one being drawn
/// and the one closed by the most recent turn
pub const SELF_EXCLUDED_SEGMENTS: usize = 2;

/// True if the point is within `radius` of an arena edge (or outside)
#[inline]
pub fn hits_bounds(p: Vec2, arena: &Arena, radius: f32) -> bool {
    distance_to_bounds(p, arena.width, arena.height) <= radius
}

/// True if the point is within `radius` of any of the segments
pub fn hits_segments(p: Vec2, segments: &[Segment], radius: f32) -> bool {
    segments
        .iter()
        .any(|seg| point_segment_distance(p, seg.a, seg.b) <= radius)
}

/// Would `me` crash by moving to `candidate`?
pub fn collides(candidate: Vec2, me: &Agent, other: &Agent, arena: &Arena) -> bool {
    let radius = collision_radius();
    hits_bounds(candidate, arena, radius)
        || hits_segments(candidate, other.trail.segments(), radius)
        || hits_segments(candidate, me.trail.settled(SELF_EXCLUDED_SEGMENTS), radius)
}

/// Head-on contact between the two candidate positions
#[inline]
pub fn heads_collide(a: Vec2, b: Vec2) -> bool {
    a.distance(b) <= 2.0 * collision_radius()
}

/// Resolve a tick from both candidates, evaluated against the same
/// pre-move state so neither agent sees the other's newer trail.
pub fn resolve_collisions(
    player: &Agent,
    player_next: Vec2,
    ai: &Agent,
    ai_next: Vec2,
    arena: &Arena,
) -> Option<RoundOutcome> {
    let head_on = heads_collide(player_next, ai_next);
    let player_hit = collides(player_next, player, ai, arena);
    let ai_hit = collides(ai_next, ai, player, arena);

    match (head_on || (player_hit && ai_hit), player_hit, ai_hit) {
        (true, _, _) => Some(RoundOutcome::Tie),
        (false, true, false) => Some(RoundOutcome::won_by_opponent_of(player.id)),
        (false, false, true) => Some(RoundOutcome::won_by_opponent_of(ai.id)),
        _ => None,
    }
}
