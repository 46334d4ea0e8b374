//! Grid discretization used by the AI
//!
//! The continuous arena is cut into square cells sized to the collision
//! footprint. Trails are rasterized into a dense occupancy grid that is
//! rebuilt from scratch for every decision.

use glam::Vec2;

use super::geometry::Direction;
use super::state::{Agent, Arena};
use super::trail::Segment;
use crate::grid_cell_size;

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `dir`
    #[inline]
    pub fn step(self, dir: Direction) -> GridCell {
        let (dx, dy) = dir.delta();
        GridCell::new(self.x + dx, self.y + dy)
    }
}

/// An agent's head expressed in grid terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridAgent {
    pub cell: GridCell,
    pub dir: Direction,
}

/// Dense occupancy over the arena
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    pub cols: i32,
    pub rows: i32,
    pub cell_size: f32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Empty grid covering the whole arena
    pub fn for_arena(arena: &Arena) -> Self {
        Self::with_cell_size(arena, grid_cell_size())
    }

    pub fn with_cell_size(arena: &Arena, cell_size: f32) -> Self {
        let cols = (arena.width / cell_size).ceil().max(1.0) as i32;
        let rows = (arena.height / cell_size).ceil().max(1.0) as i32;
        Self {
            cols,
            rows,
            cell_size,
            cells: vec![false; (cols * rows) as usize],
        }
    }

    /// Grid with every segment of both agents' trails marked
    pub fn from_agents(arena: &Arena, agents: &[&Agent]) -> Self {
        let mut grid = Self::for_arena(arena);
        for agent in agents {
            for seg in agent.trail.segments() {
                grid.rasterize_segment(seg);
            }
        }
        grid
    }

    /// Cell containing a continuous point
    #[inline]
    pub fn cell_of(&self, p: Vec2) -> GridCell {
        GridCell::new(
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// Grid view of an agent's head
    pub fn locate(&self, agent: &Agent) -> GridAgent {
        GridAgent {
            cell: self.cell_of(agent.pos),
            dir: agent.dir,
        }
    }

    #[inline]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.cols && cell.y < self.rows
    }

    #[inline]
    pub fn index(&self, cell: GridCell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| (cell.y * self.cols + cell.x) as usize)
    }

    /// Number of cells in the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.index(cell).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// In bounds and not covered by any trail
    #[inline]
    pub fn is_free(&self, cell: GridCell) -> bool {
        self.index(cell).map(|i| !self.cells[i]).unwrap_or(false)
    }

    /// Mark a cell; off-grid cells are ignored
    pub fn mark(&mut self, cell: GridCell) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = true;
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Mark every cell the segment passes through.
    ///
    /// Walks cell boundaries in parametric order, so diagonal segments
    /// cover each cell they cross, including corner cells.
    pub fn rasterize_segment(&mut self, seg: &Segment) {
        let start = self.cell_of(seg.a);
        let end = self.cell_of(seg.b);
        let d = seg.b - seg.a;
        let cs = self.cell_size;

        let (step_x, mut t_max_x, t_delta_x) = axis_walk(seg.a.x, d.x, start.x, cs);
        let (step_y, mut t_max_y, t_delta_y) = axis_walk(seg.a.y, d.y, start.y, cs);

        let mut cell = start;
        self.mark(cell);

        let steps = (end.x - start.x).abs() + (end.y - start.y).abs();
        for _ in 0..steps {
            if t_max_x < t_max_y {
                cell.x += step_x;
                t_max_x += t_delta_x;
            } else {
                cell.y += step_y;
                t_max_y += t_delta_y;
            }
            self.mark(cell);
        }
    }
}

/// Step sign, parameter of the first boundary crossing and parameter
/// spacing between crossings along one axis
fn axis_walk(origin: f32, delta: f32, cell: i32, cell_size: f32) -> (i32, f32, f32) {
    if delta > 0.0 {
        let boundary = (cell + 1) as f32 * cell_size;
        (1, (boundary - origin) / delta, cell_size / delta)
    } else if delta < 0.0 {
        let boundary = cell as f32 * cell_size;
        (-1, (boundary - origin) / delta, cell_size / -delta)
    } else {
        (0, f32::INFINITY, f32::INFINITY)
    }
}
