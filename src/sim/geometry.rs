//! Axis-aligned directions and segment geometry
//!
//! Screen convention: +x to the right, +y downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four directions an agent can travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Unit vector for motion
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Integer step on the grid
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Counter-clockwise quarter turn as seen on screen
    pub fn turn_left(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Clockwise quarter turn as seen on screen
    pub fn turn_right(self) -> Direction {
        self.turn_left().opposite()
    }

    #[inline]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Classify a vector by its dominant axis. Zero or non-finite vectors have no direction.
    pub fn classify(v: Vec2) -> Option<Direction> {
        if !v.is_finite() || v.length_squared() <= f32::EPSILON {
            return None;
        }
        if v.x.abs() >= v.y.abs() {
            Some(if v.x > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if v.y > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}

/// Shortest distance from a point to the nearest edge of a `width` x `height` arena
/// anchored at the origin. Negative when the point is outside.
#[inline]
pub fn distance_to_bounds(p: Vec2, width: f32, height: f32) -> f32 {
    p.x.min(p.y).min(width - p.x).min(height - p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_are_perpendicular() {
        for dir in Direction::ALL {
            assert_eq!(dir.unit().dot(dir.turn_left().unit()), 0.0);
            assert_eq!(dir.unit().dot(dir.turn_right().unit()), 0.0);
            assert_eq!(dir.turn_left().opposite(), dir.turn_right());
            assert_eq!(dir.turn_left().turn_right(), dir);
        }
    }

    #[test]
    fn test_turn_left_from_right_heads_up() {
        assert_eq!(Direction::Right.turn_left(), Direction::Up);
        assert_eq!(Direction::Right.turn_right(), Direction::Down);
    }

    #[test]
    fn test_delta_matches_unit() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(Vec2::new(dx as f32, dy as f32), dir.unit());
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Direction::classify(Vec2::new(3.0, -1.0)), Some(Direction::Right));
        assert_eq!(Direction::classify(Vec2::new(-3.0, 1.0)), Some(Direction::Left));
        assert_eq!(Direction::classify(Vec2::new(0.5, -2.0)), Some(Direction::Up));
        assert_eq!(Direction::classify(Vec2::new(0.0, 2.0)), Some(Direction::Down));
        assert_eq!(Direction::classify(Vec2::ZERO), None);
        assert_eq!(Direction::classify(Vec2::new(f32::NAN, 1.0)), None);
    }

    #[test]
    fn test_distance_to_bounds() {
        assert_eq!(distance_to_bounds(Vec2::new(10.0, 50.0), 800.0, 600.0), 10.0);
        assert_eq!(distance_to_bounds(Vec2::new(400.0, 596.0), 800.0, 600.0), 4.0);
        assert!(distance_to_bounds(Vec2::new(-1.0, 50.0), 800.0, 600.0) < 0.0);
    }
}
