//! One round of the game: watch the maze being carved, then walk out of it.

use rand::Rng;
use tracing::debug;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::config::CanvasLayout;
use crate::errors::*;
use crate::generators::{GenerationStep, RecursiveBacktracker};
use crate::grid::Grid;
use crate::input::{GestureTracker, InputEvent};
use crate::navigation::{MoveOutcome, Navigator};
use crate::pacing::{CancellationToken, PacedOutcome, Pacer};
use crate::renderers::{self, FrameMarkers, RenderSurface};
use crate::solvers;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GamePhase {
    Generating,
    Playing,
    Escaped,
}

pub struct Game<R: Rng> {
    grid: Grid,
    cell_size: u32,
    generator: RecursiveBacktracker<R>,
    navigator: Option<Navigator>,
    gestures: GestureTracker,
}

impl<R: Rng> Game<R> {
    pub fn new(layout: &CanvasLayout, rng: R) -> Result<Game<R>> {
        Ok(Game::with_grid(layout.grid()?, layout.cell_size(), rng))
    }

    /// Start generating over a grid that has every wall standing.
    pub fn with_grid(mut grid: Grid, cell_size: u32, rng: R) -> Game<R> {
        let generator = RecursiveBacktracker::new(&mut grid, rng);
        Game {
            grid,
            cell_size,
            generator,
            navigator: None,
            gestures: GestureTracker::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self.navigator {
            None => GamePhase::Generating,
            Some(ref navigator) if navigator.is_game_over() => GamePhase::Escaped,
            Some(_) => GamePhase::Playing,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    #[inline]
    pub fn navigator(&self) -> Option<&Navigator> {
        self.navigator.as_ref()
    }

    /// Advance generation by one step. Once the maze is finished the player and destination are
    /// placed and further ticks do nothing.
    pub fn tick(&mut self) -> GenerationStep {
        let step = self.generator.step(&mut self.grid);
        if step == GenerationStep::Finished && self.navigator.is_none() {
            let navigator = Navigator::new(&self.grid);
            debug!(player = %navigator.player(),
                   destination = %navigator.destination(),
                   "maze ready, controls enabled");
            self.navigator = Some(navigator);
        }
        step
    }

    /// Generate the rest of the maze without pausing.
    pub fn finish_generation(&mut self) {
        while self.tick() != GenerationStep::Finished {}
    }

    /// Generate the rest of the maze one paced step at a time, repainting after every step.
    pub fn run_generation<S>(&mut self,
                             pacer: &Pacer,
                             cancel: &CancellationToken,
                             surface: &mut S)
                             -> Result<PacedOutcome>
        where S: RenderSurface + ?Sized
    {
        let mut render_error = None;
        let outcome = pacer.run(cancel, || {
            let finished = self.tick() == GenerationStep::Finished;
            if let Err(e) = self.render(&mut *surface) {
                render_error = Some(e);
                return false;
            }
            !finished
        });
        match render_error {
            Some(e) => Err(e),
            None => Ok(outcome),
        }
    }

    /// Input is only acted on once the maze is finished.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<MoveOutcome> {
        if self.navigator.is_none() {
            return None;
        }
        let direction = self.gestures.feed(event)?;
        self.request_move(direction)
    }

    pub fn request_move(&mut self, direction: CompassPrimary) -> Option<MoveOutcome> {
        let grid = &self.grid;
        self.navigator
            .as_mut()
            .map(|navigator| navigator.request_move(grid, direction))
    }

    /// Mark a route from the first cell to the last on the finished maze.
    pub fn solve<S: Rng>(&mut self, rng: S) -> Option<Vec<Cartesian2DCoordinate>> {
        if self.navigator.is_none() {
            return None;
        }
        let (start, end) = (self.grid.first_coordinate(), self.grid.last_coordinate());
        solvers::depth_first_solve(&mut self.grid, start, end, rng)
    }

    pub fn render<S>(&self, surface: &mut S) -> Result<()>
        where S: RenderSurface + ?Sized
    {
        let markers = match self.navigator {
            None if !self.generator.is_done() => {
                FrameMarkers::Carving(self.generator.current_cell())
            }
            None => FrameMarkers::None,
            Some(ref navigator) => {
                FrameMarkers::Playing {
                    player: navigator.player(),
                    destination: navigator.destination(),
                }
            }
        };
        renderers::render_frame(surface, &self.grid, self.cell_size, markers)
    }
}
