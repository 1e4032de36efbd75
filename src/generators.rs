use rand::Rng;
use tracing::{debug, trace, warn};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, DirectionalNeighbours};
use crate::grid::Grid;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationState {
    Carving,
    Backtracking,
    Done,
}

/// What a single generation step did to the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationStep {
    /// A wall was removed and the unvisited neighbour became the current cell.
    Carved {
        from: Cartesian2DCoordinate,
        to: Cartesian2DCoordinate,
        direction: CompassPrimary,
    },
    /// A dead end was reached and the previous cell on the path became the current cell.
    Backtracked { to: Cartesian2DCoordinate },
    /// Every cell is visited. The grid is no longer touched.
    Finished,
}

/// The recursive backtracker maze generation algorithm, run iteratively one step at a time.
///
/// Starting from the first cell, keep walking to a randomly chosen unvisited neighbour,
/// carving a passage into it. When a cell has no unvisited neighbours step back along the
/// path taken so far until one with unvisited neighbours is found.
/// Every carve joins a visited cell to an unvisited one exactly once, so the result is a spanning
/// tree over the grid: a perfect maze with exactly one route between any two cells.
///
/// The generator owns the traversal state only. The grid is handed in to every step so callers
/// can render it in between.
#[derive(Debug)]
pub struct RecursiveBacktracker<R: Rng> {
    rng: R,
    current: Cartesian2DCoordinate,
    stack: Vec<Cartesian2DCoordinate>,
    state: GenerationState,
    unvisited: usize,
}

impl<R: Rng> RecursiveBacktracker<R> {
    /// Marks the first cell of the grid as visited and starts carving from it.
    pub fn new(grid: &mut Grid, rng: R) -> RecursiveBacktracker<R> {
        let start = grid.first_coordinate();
        let _ = grid.mark_visited(start);

        RecursiveBacktracker {
            rng,
            current: start,
            stack: Vec::with_capacity(grid.size()),
            state: GenerationState::Carving,
            unvisited: grid.unvisited_count(),
        }
    }

    #[inline]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == GenerationState::Done
    }

    /// The cell the carve is currently at. Meaningless once done.
    #[inline]
    pub fn current_cell(&self) -> Cartesian2DCoordinate {
        self.current
    }

    /// The path from the first cell to (but not including) the current cell.
    #[inline]
    pub fn stack(&self) -> &[Cartesian2DCoordinate] {
        &self.stack
    }

    pub fn step(&mut self, grid: &mut Grid) -> GenerationStep {
        if self.state == GenerationState::Done {
            return GenerationStep::Finished;
        }

        // Nothing is left to carve into as soon as the last cell is reached, there is no need to
        // walk the remaining path back to the start.
        if self.unvisited == 0 {
            return self.finish();
        }

        let unvisited_neighbours = grid.adjacent_cells(self.current)
                                       .into_iter()
                                       .filter(|(_, neighbour)| !grid.is_visited(*neighbour))
                                       .collect::<DirectionalNeighbours>();

        if !unvisited_neighbours.is_empty() {

            let sample = self.rng.gen_range(0..unvisited_neighbours.len());
            let (direction, next) = unvisited_neighbours[sample];
            let from = self.current;

            self.stack.push(from);
            grid.remove_wall(from, direction)
                .expect("Adjacent cells are always inside the grid");
            if grid.mark_visited(next) {
                self.unvisited -= 1;
            }
            self.current = next;
            self.state = GenerationState::Carving;

            trace!(from = %from, to = %next, ?direction, remaining = self.unvisited, "carved");
            GenerationStep::Carved {
                from,
                to: next,
                direction,
            }

        } else if let Some(previous) = self.stack.pop() {

            self.current = previous;
            self.state = GenerationState::Backtracking;
            trace!(to = %previous, depth = self.stack.len(), "backtracked");
            GenerationStep::Backtracked { to: previous }

        } else {

            // Back at the start with nowhere to go. The whole grid decides whether we are done.
            if grid.has_unvisited_cells() {
                warn!(unvisited = grid.unvisited_count(),
                      "generation ran out of reachable cells before visiting the whole grid");
            }
            self.finish()
        }
    }

    /// Step until every cell is visited, returning the number of steps taken (the final
    /// `Finished` step included).
    pub fn run_to_completion(&mut self, grid: &mut Grid) -> usize {
        let mut steps = 0;
        loop {
            steps += 1;
            if self.step(grid) == GenerationStep::Finished {
                return steps;
            }
        }
    }

    fn finish(&mut self) -> GenerationStep {
        self.state = GenerationState::Done;
        self.stack.clear();
        debug!("maze generation finished");
        GenerationStep::Finished
    }
}

/// Generate a perfect maze over the whole grid in one go.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: R) {
    let mut generator = RecursiveBacktracker::new(grid, rng);
    let steps = generator.run_to_completion(grid);
    debug!(steps, links = grid.links_count(), "generated maze");
}
