//! Computer opponent
//!
//! On its own cadence the AI rebuilds an occupancy grid from both trails,
//! scores the three non-reversing moves and either keeps its heading or
//! turns. Scoring combines:
//! - territory: cells it would reach before the opponent (two-source BFS)
//! - mobility: legal follow-up moves from the candidate cell
//! - clearance: free straight run ahead of the candidate cell

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::geometry::Direction;
use super::grid::{GridAgent, GridCell, OccupancyGrid};
use super::state::{Agent, Arena};
use crate::consts::{BASE_SPEED, TURN_COOLDOWN_BASE};

/// Candidates with less straight-line room than this are dead ends
pub const MIN_CLEARANCE: u32 = 2;

const TERRITORY_WEIGHT: f32 = 2.5;
const MOBILITY_WEIGHT: f32 = 0.5;
const CLEARANCE_WEIGHT: f32 = 0.3;

/// Decision cadence timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AiBrain {
    timer: f32,
}

impl AiBrain {
    /// Accumulate running time; true when a decision is due.
    ///
    /// The remainder past `interval` carries over so the cadence does not
    /// drift with the frame rate. It is kept below one interval, so a switch
    /// to a shorter interval cannot cause back-to-back decisions.
    pub fn due(&mut self, dt: f32, interval: f32) -> bool {
        self.timer += dt;
        if self.timer >= interval {
            self.timer = (self.timer - interval) % interval;
            true
        } else {
            false
        }
    }

    /// Time accumulated toward the next decision
    pub fn elapsed(&self) -> f32 {
        self.timer
    }
}

/// Score breakdown for one surviving candidate move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveEvaluation {
    pub dir: Direction,
    pub cell: GridCell,
    pub clearance: u32,
    pub territory: i32,
    pub mobility: u32,
    pub score: f32,
}

/// Forward, then left, then right. Never the reverse.
#[inline]
pub fn candidate_directions(dir: Direction) -> [Direction; 3] {
    [dir, dir.turn_left(), dir.turn_right()]
}

/// Free cells in a straight line starting at `from` (inclusive), up to `cap`
pub fn clearance(grid: &OccupancyGrid, from: GridCell, dir: Direction, cap: u32) -> u32 {
    let mut count = 0;
    let mut cell = from;
    while count < cap && grid.is_free(cell) {
        count += 1;
        cell = cell.step(dir);
    }
    count
}

/// Legal next moves for an agent standing on `at`
pub fn mobility(grid: &OccupancyGrid, at: GridAgent) -> u32 {
    candidate_directions(at.dir)
        .iter()
        .filter(|&&d| grid.is_free(at.cell.step(d)))
        .count() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Unreached,
    Mine,
    Theirs,
    Neutral,
}

/// Cells reached first from `mine` minus cells reached first from `theirs`.
///
/// Both sources expand together breadth-first over free cells; a cell
/// reached at the same distance from both sides belongs to neither, and
/// so does everything first reached through it.
pub fn territory_differential(grid: &OccupancyGrid, mine: GridCell, theirs: GridCell) -> i32 {
    let mut owner = vec![Owner::Unreached; grid.len()];
    let mut dist = vec![u32::MAX; grid.len()];
    let mut queue = VecDeque::with_capacity(grid.len());

    for (source, side) in [(mine, Owner::Mine), (theirs, Owner::Theirs)] {
        let Some(i) = grid.index(source) else {
            continue;
        };
        match owner[i] {
            Owner::Unreached => {
                owner[i] = side;
                dist[i] = 0;
                queue.push_back(source);
            }
            _ => owner[i] = Owner::Neutral,
        }
    }

    while let Some(cell) = queue.pop_front() {
        let Some(i) = grid.index(cell) else {
            continue;
        };
        let (side, d) = (owner[i], dist[i]);
        for dir in Direction::ALL {
            let next = cell.step(dir);
            if !grid.is_free(next) {
                continue;
            }
            let Some(j) = grid.index(next) else {
                continue;
            };
            match owner[j] {
                Owner::Unreached => {
                    owner[j] = side;
                    dist[j] = d + 1;
                    queue.push_back(next);
                }
                other if other != side && dist[j] == d + 1 => owner[j] = Owner::Neutral,
                _ => {}
            }
        }
    }

    owner.iter().fold(0, |acc, o| match o {
        Owner::Mine => acc + 1,
        Owner::Theirs => acc - 1,
        _ => acc,
    })
}

/// Score every candidate that is on-grid, unoccupied and not a dead end
pub fn evaluate_moves(
    grid: &OccupancyGrid,
    me: GridAgent,
    opponent: GridCell,
    profile: &DifficultyProfile,
) -> Vec<MoveEvaluation> {
    candidate_directions(me.dir)
        .into_iter()
        .filter_map(|dir| {
            let cell = me.cell.step(dir);
            if !grid.is_free(cell) {
                return None;
            }
            let clearance = clearance(grid, cell, dir, profile.clearance_cells);
            if clearance < MIN_CLEARANCE {
                return None;
            }
            let territory = territory_differential(grid, cell, opponent);
            let mobility = mobility(grid, GridAgent { cell, dir });
            let score = territory as f32 * TERRITORY_WEIGHT
                + mobility as f32 * MOBILITY_WEIGHT
                + clearance as f32 * CLEARANCE_WEIGHT;
            Some(MoveEvaluation {
                dir,
                cell,
                clearance,
                territory,
                mobility,
                score,
            })
        })
        .collect()
}

/// Pick a move on the grid.
///
/// Highest score wins with ties going to the earlier candidate. While the
/// agent is still inside its post-turn cooldown a safe forward move is
/// preferred. `None` means nothing is survivable.
pub fn select_move(
    grid: &OccupancyGrid,
    me: GridAgent,
    opponent: GridCell,
    distance_since_turn: f32,
    cooldown: f32,
    profile: &DifficultyProfile,
) -> Option<MoveEvaluation> {
    let moves = evaluate_moves(grid, me, opponent, profile);
    let mut best: Option<MoveEvaluation> = None;
    for m in &moves {
        if best.is_none_or(|b| m.score > b.score) {
            best = Some(*m);
        }
    }
    let best = best?;

    if best.dir != me.dir && distance_since_turn < cooldown {
        if let Some(forward) = moves.iter().find(|m| m.dir == me.dir) {
            return Some(*forward);
        }
    }
    Some(best)
}

/// Post-turn distance during which going straight is preferred
#[inline]
pub fn turn_cooldown(speed: f32, profile: &DifficultyProfile) -> f32 {
    TURN_COOLDOWN_BASE * (speed / BASE_SPEED) * profile.cooldown_factor
}

/// Decide a new heading for `me`. Returns `None` to keep the current one,
/// either because it is still best or because no move is safe.
pub fn choose_direction(
    me: &Agent,
    opponent: &Agent,
    arena: &Arena,
    speed: f32,
    profile: &DifficultyProfile,
) -> Option<Direction> {
    let grid = OccupancyGrid::from_agents(arena, &[me, opponent]);
    let head = grid.locate(me);
    let opponent_cell = grid.locate(opponent).cell;

    let Some(choice) = select_move(
        &grid,
        head,
        opponent_cell,
        me.distance_since_turn(),
        turn_cooldown(speed, profile),
        profile,
    ) else {
        log::debug!("{:?}: no safe move from {:?}", me.id, head.cell);
        return None;
    };

    log::debug!(
        "{:?}: {:?} score={:.1} territory={} mobility={} clearance={}",
        me.id,
        choice.dir,
        choice.score,
        choice.territory,
        choice.mobility,
        choice.clearance
    );

    (choice.dir != me.dir).then_some(choice.dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::motion::commit;
    use crate::sim::state::{AgentId, GameState};
    use glam::Vec2;
    use proptest::prelude::*;

    fn grid(cols: i32, rows: i32) -> OccupancyGrid {
        OccupancyGrid::for_arena(&Arena::new(cols as f32 * 12.0, rows as f32 * 12.0))
    }

    fn normal() -> DifficultyProfile {
        Difficulty::Normal.profile()
    }

    #[test]
    fn test_candidates_exclude_reverse() {
        for dir in Direction::ALL {
            let c = candidate_directions(dir);
            assert_eq!(c[0], dir);
            assert!(!c.contains(&dir.opposite()));
        }
    }

    #[test]
    fn test_brain_cadence() {
        let mut brain = AiBrain::default();
        assert!(!brain.due(0.04, 0.1));
        assert!(!brain.due(0.04, 0.1));
        assert!(brain.due(0.04, 0.1));
        assert!(!brain.due(0.04, 0.1));
    }

    #[test]
    fn test_brain_cadence_independent_of_frame_rate() {
        for (interval, expected) in [(0.1f32, 30i32), (0.05, 60)] {
            let mut brain = AiBrain::default();
            let decisions = (0..100).filter(|_| brain.due(0.03, interval)).count() as i32;
            assert!(
                (decisions - expected).abs() <= 1,
                "interval {}: {} decisions in 3s",
                interval,
                decisions
            );
        }
    }

    #[test]
    fn test_brain_remainder_stays_below_interval() {
        let mut brain = AiBrain::default();
        for _ in 0..3 {
            assert!(!brain.due(0.05, 0.2));
        }
        // Switching to a much shorter interval fires once, not in a burst.
        assert!(brain.due(0.05, 0.05));
        assert!(brain.elapsed() < 0.05);
        assert!(!brain.due(0.001, 0.05));
    }

    #[test]
    fn test_clearance_stops_at_wall_and_cap() {
        let mut g = grid(10, 10);
        assert_eq!(clearance(&g, GridCell::new(7, 0), Direction::Right, 8), 3);
        assert_eq!(clearance(&g, GridCell::new(0, 0), Direction::Right, 8), 8);
        g.mark(GridCell::new(2, 0));
        assert_eq!(clearance(&g, GridCell::new(0, 0), Direction::Right, 8), 2);
        assert_eq!(clearance(&g, GridCell::new(2, 0), Direction::Right, 8), 0);
    }

    #[test]
    fn test_mobility_counts_legal_moves() {
        let mut g = grid(10, 10);
        let at = GridAgent {
            cell: GridCell::new(5, 5),
            dir: Direction::Up,
        };
        assert_eq!(mobility(&g, at), 3);
        g.mark(GridCell::new(5, 4));
        assert_eq!(mobility(&g, at), 2);
        let corner = GridAgent {
            cell: GridCell::new(0, 0),
            dir: Direction::Up,
        };
        assert_eq!(mobility(&g, corner), 1);
    }

    #[test]
    fn test_territory_symmetric_standoff_is_balanced() {
        let mut g = grid(20, 11);
        let player = GridAgent {
            cell: GridCell::new(4, 5),
            dir: Direction::Right,
        };
        let ai = GridAgent {
            cell: GridCell::new(15, 5),
            dir: Direction::Left,
        };
        g.mark(player.cell);
        g.mark(ai.cell);

        let ai_forward = territory_differential(&g, ai.cell.step(ai.dir), player.cell);
        let player_forward = territory_differential(&g, player.cell.step(player.dir), ai.cell);

        assert_eq!(ai_forward, player_forward);
        assert!(ai_forward.abs() <= g.rows, "differential {} too large", ai_forward);
    }

    #[test]
    fn test_territory_balanced_at_round_start() {
        let mut state = GameState::default();
        assert!(state.start_round());
        let g = OccupancyGrid::from_agents(&state.arena, &[&state.player, &state.ai]);
        let player = g.locate(&state.player);
        let ai = g.locate(&state.ai);

        let ai_forward = territory_differential(&g, ai.cell.step(ai.dir), player.cell);
        let player_forward = territory_differential(&g, player.cell.step(player.dir), ai.cell);

        assert_eq!(ai_forward, player_forward);
        assert!(
            ai_forward.abs() <= 2 * g.rows,
            "differential {} over {} cells",
            ai_forward,
            g.len()
        );
    }

    #[test]
    fn test_territory_same_cell_is_neutral() {
        let g = grid(8, 8);
        let cell = GridCell::new(3, 3);
        assert_eq!(territory_differential(&g, cell, cell), 0);
    }

    #[test]
    fn test_territory_penalizes_enclosed_pocket() {
        let mut g = grid(12, 12);
        // 3x3 pocket in the corner, closed off by a wall.
        for i in 0..4 {
            g.mark(GridCell::new(3, i));
            g.mark(GridCell::new(i, 3));
        }
        let diff = territory_differential(&g, GridCell::new(1, 1), GridCell::new(8, 8));
        assert!(diff < -100, "expected large deficit, got {}", diff);
    }

    #[test]
    fn test_dead_end_forward_is_avoided() {
        let mut g = grid(13, 13);
        let head = GridAgent {
            cell: GridCell::new(6, 6),
            dir: Direction::Up,
        };
        g.mark(head.cell);
        for x in 0..13 {
            g.mark(GridCell::new(x, 4));
        }
        let opponent = GridCell::new(6, 10);
        g.mark(opponent);

        let moves = evaluate_moves(&g, head, opponent, &normal());
        assert!(moves.iter().all(|m| m.dir != Direction::Up));

        // Mirror-image turns tie; the first turn candidate is kept.
        let choice = select_move(&g, head, opponent, 100.0, 0.0, &normal()).unwrap();
        assert_eq!(choice.dir, Direction::Left);
    }

    #[test]
    fn test_no_safe_move_keeps_heading() {
        let mut g = grid(6, 6);
        let head = GridAgent {
            cell: GridCell::new(0, 0),
            dir: Direction::Up,
        };
        g.mark(head.cell);
        g.mark(GridCell::new(1, 0));
        assert!(select_move(&g, head, GridCell::new(5, 5), 0.0, 0.0, &normal()).is_none());
    }

    #[test]
    fn test_cooldown_prefers_forward() {
        let mut g = grid(20, 20);
        let head = GridAgent {
            cell: GridCell::new(10, 10),
            dir: Direction::Right,
        };
        g.mark(head.cell);
        // Opponent close on the right-turn side makes turning attractive.
        let opponent = GridCell::new(10, 16);
        g.mark(opponent);

        let free = select_move(&g, head, opponent, 1000.0, 0.0, &normal()).unwrap();
        let held = select_move(&g, head, opponent, 0.0, 1000.0, &normal()).unwrap();
        assert_eq!(held.dir, Direction::Right);
        if free.dir != Direction::Right {
            assert_ne!(free.dir, held.dir);
        }
    }

    #[test]
    fn test_turn_cooldown_scales() {
        let easy = Difficulty::Easy.profile();
        let hard = Difficulty::Hard.profile();
        assert!(turn_cooldown(BASE_SPEED, &easy) > turn_cooldown(BASE_SPEED, &hard));
        assert!(turn_cooldown(BASE_SPEED * 2.0, &hard) > turn_cooldown(BASE_SPEED, &hard));
        assert_eq!(turn_cooldown(BASE_SPEED, &normal()), TURN_COOLDOWN_BASE);
    }

    #[test]
    fn test_choose_direction_steers_off_wall() {
        let arena = Arena::new(240.0, 240.0);
        // Heading straight into the left wall, one cell away.
        let mut me = Agent::spawn(AgentId::Ai, Vec2::new(30.0, 120.0), Direction::Left);
        commit(&mut me, Vec2::new(18.0, 120.0));
        let opponent = Agent::spawn(AgentId::Player, Vec2::new(200.0, 120.0), Direction::Right);

        let dir = choose_direction(&me, &opponent, &arena, BASE_SPEED, &normal());
        assert!(matches!(dir, Some(Direction::Up) | Some(Direction::Down)));
    }

    #[test]
    fn test_choose_direction_keeps_open_heading() {
        let arena = Arena::new(800.0, 600.0);
        let me = Agent::spawn(AgentId::Ai, Vec2::new(740.0, 300.0), Direction::Left);
        let opponent = Agent::spawn(AgentId::Player, Vec2::new(60.0, 300.0), Direction::Right);
        // Fresh spawn: inside the cooldown, forward is safe.
        assert_eq!(choose_direction(&me, &opponent, &arena, BASE_SPEED, &normal()), None);
    }

    fn occupied_cells() -> impl Strategy<Value = Vec<(i32, i32)>> {
        prop::collection::vec((0i32..15, 0i32..15), 0..80)
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_never_selects_occupied_cell(
            blocked in occupied_cells(),
            hx in 0i32..15, hy in 0i32..15,
            ox in 0i32..15, oy in 0i32..15,
            dir in direction(),
            since_turn in 0.0f32..50.0,
        ) {
            let mut g = grid(15, 15);
            for (x, y) in blocked {
                g.mark(GridCell::new(x, y));
            }
            let head = GridAgent { cell: GridCell::new(hx, hy), dir };
            g.mark(head.cell);
            let opponent = GridCell::new(ox, oy);
            let profile = normal();

            let survivable = candidate_directions(dir).iter().any(|&d| {
                let cell = head.cell.step(d);
                g.is_free(cell) && clearance(&g, cell, d, profile.clearance_cells) >= MIN_CLEARANCE
            });

            match select_move(&g, head, opponent, since_turn, TURN_COOLDOWN_BASE, &profile) {
                Some(m) => {
                    prop_assert!(g.is_free(m.cell));
                    prop_assert_eq!(m.cell, head.cell.step(m.dir));
                    prop_assert_ne!(m.dir, dir.opposite());
                }
                None => prop_assert!(!survivable),
            }
        }
    }
}
