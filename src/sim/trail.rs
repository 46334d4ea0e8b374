//! Trail storage
//!
//! A trail is the chain of straight segments an agent has drawn since the
//! round began. Only the newest segment is open; its end follows the agent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One straight piece of a trail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }
}

/// Connected segments in chronological order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    segments: Vec<Segment>,
}

impl Trail {
    /// Start a trail with a degenerate segment at the spawn point
    pub fn starting_at(origin: Vec2) -> Self {
        Self {
            segments: vec![Segment::new(origin, origin)],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment currently being drawn
    pub fn open_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Move the open segment's end to `pos`
    pub fn extend_to(&mut self, pos: Vec2) {
        match self.segments.last_mut() {
            Some(seg) => seg.b = pos,
            None => self.segments.push(Segment::new(pos, pos)),
        }
    }

    /// Close the open segment at `pos` and begin a new zero-length one there
    pub fn begin_segment(&mut self, pos: Vec2) {
        self.extend_to(pos);
        self.segments.push(Segment::new(pos, pos));
    }

    /// Segments that count for self-collision: all but the `skip_recent` newest
    pub fn settled(&self, skip_recent: usize) -> &[Segment] {
        let end = self.segments.len().saturating_sub(skip_recent);
        &self.segments[..end]
    }

    /// Length drawn since the last turn
    pub fn open_length(&self) -> f32 {
        self.open_segment().map(Segment::length).unwrap_or(0.0)
    }
}
