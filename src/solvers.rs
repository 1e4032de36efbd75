use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolveState {
    Searching,
    Found,
    Unreachable,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolveStep {
    /// Moved through an open passage onto a cell not tried before.
    Advanced {
        from: Cartesian2DCoordinate,
        to: Cartesian2DCoordinate,
        direction: CompassPrimary,
    },
    /// The abandoned cell leads nowhere new and was taken off the path.
    Backtracked {
        abandoned: Cartesian2DCoordinate,
        to: Cartesian2DCoordinate,
    },
    Found,
    Unreachable,
}

/// Randomised depth first search through the open passages of a maze.
///
/// Cells tried are flagged `visited_for_solution`, cells on the current path `is_solution_path`,
/// so a renderer can show the search as it goes. On a perfect maze the search always succeeds.
#[derive(Debug)]
pub struct DepthFirstSolver<R: Rng> {
    rng: R,
    destination: Cartesian2DCoordinate,
    path: Vec<Cartesian2DCoordinate>,
    state: SolveState,
}

impl<R: Rng> DepthFirstSolver<R> {
    /// Clears any previous solver marks and starts searching from `start`.
    /// Returns None if either point is off the grid.
    pub fn new(grid: &mut Grid,
               start: Cartesian2DCoordinate,
               destination: Cartesian2DCoordinate,
               rng: R)
               -> Option<DepthFirstSolver<R>> {
        if !grid.is_valid_coordinate(destination) {
            return None;
        }
        grid.clear_solution_marks();
        let start_cell = grid.cell_mut(start)?;
        start_cell.visited_for_solution = true;
        start_cell.is_solution_path = true;

        Some(DepthFirstSolver {
            rng,
            destination,
            path: vec![start],
            state: SolveState::Searching,
        })
    }

    #[inline]
    pub fn state(&self) -> SolveState {
        self.state
    }

    /// The path from the start to the current search position.
    #[inline]
    pub fn path(&self) -> &[Cartesian2DCoordinate] {
        &self.path
    }

    pub fn step(&mut self, grid: &mut Grid) -> SolveStep {
        match self.state {
            SolveState::Found => return SolveStep::Found,
            SolveState::Unreachable => return SolveStep::Unreachable,
            SolveState::Searching => {}
        }

        let current = match self.path.last() {
            Some(coord) => *coord,
            None => return self.give_up(),
        };

        if current == self.destination {
            self.state = SolveState::Found;
            debug!(length = self.path.len(), "found the destination");
            return SolveStep::Found;
        }

        let untried = grid.open_paths(current)
            .into_iter()
            .filter_map(|dir| grid.neighbour_at_direction(current, dir).map(|next| (dir, next)))
            .filter(|(_, next)| grid.cell(*next).map_or(false, |cell| !cell.is_visited_for_solution()))
            .collect::<SmallVec<[(CompassPrimary, Cartesian2DCoordinate); 4]>>();

        if !untried.is_empty() {
            let (direction, next) = untried[self.rng.gen_range(0..untried.len())];
            if let Some(cell) = grid.cell_mut(next) {
                cell.visited_for_solution = true;
                cell.is_solution_path = true;
            }
            self.path.push(next);
            trace!(from = %current, to = %next, "solver advanced");
            return SolveStep::Advanced {
                from: current,
                to: next,
                direction,
            };
        }

        let _ = self.path.pop();
        if let Some(cell) = grid.cell_mut(current) {
            cell.is_solution_path = false;
        }
        match self.path.last() {
            Some(previous) => {
                trace!(abandoned = %current, to = %previous, "solver backtracked");
                SolveStep::Backtracked {
                    abandoned: current,
                    to: *previous,
                }
            }
            None => self.give_up(),
        }
    }

    fn give_up(&mut self) -> SolveStep {
        self.state = SolveState::Unreachable;
        debug!(destination = %self.destination, "destination is unreachable");
        SolveStep::Unreachable
    }
}

/// Search for a route from start to destination, leaving the route marked on the grid.
pub fn depth_first_solve<R: Rng>(grid: &mut Grid,
                                 start: Cartesian2DCoordinate,
                                 destination: Cartesian2DCoordinate,
                                 rng: R)
                                 -> Option<Vec<Cartesian2DCoordinate>> {
    let mut solver = DepthFirstSolver::new(grid, start, destination, rng)?;
    loop {
        match solver.step(grid) {
            SolveStep::Found => return Some(solver.path().to_vec()),
            SolveStep::Unreachable => return None,
            _ => {}
        }
    }
}
