use tracing::{debug, info};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;

/// The result of asking the player token to move one cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MoveOutcome {
    Moved(Cartesian2DCoordinate),
    /// A wall is in the way. The player stays put.
    Blocked,
    /// The player reached the destination. Reported exactly once.
    Escaped,
    /// The game is already won, nothing moves any more.
    GameOver,
}

/// Moves the player token around a finished maze.
#[derive(Debug, Clone)]
pub struct Navigator {
    player: Cartesian2DCoordinate,
    destination: Cartesian2DCoordinate,
    escaped: bool,
}

impl Navigator {
    /// Player on the first cell, destination on the last.
    pub fn new(grid: &Grid) -> Navigator {
        Navigator::with_points(grid.first_coordinate(), grid.last_coordinate())
    }

    pub fn with_points(player: Cartesian2DCoordinate,
                       destination: Cartesian2DCoordinate)
                       -> Navigator {
        Navigator {
            player,
            destination,
            escaped: false,
        }
    }

    #[inline]
    pub fn player(&self) -> Cartesian2DCoordinate {
        self.player
    }

    #[inline]
    pub fn destination(&self) -> Cartesian2DCoordinate {
        self.destination
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.escaped
    }

    /// The arrival check runs after every request, moved or not, so a player that starts on
    /// the destination escapes on its first request.
    pub fn request_move(&mut self, grid: &Grid, direction: CompassPrimary) -> MoveOutcome {
        if self.escaped {
            return MoveOutcome::GameOver;
        }

        let moved_to = if grid.is_neighbour_linked(self.player, direction) {
            grid.neighbour_at_direction(self.player, direction)
        } else {
            None
        };

        if let Some(next) = moved_to {
            debug!(from = %self.player, to = %next, ?direction, "player moved");
            self.player = next;
        }

        if self.player == self.destination {
            self.escaped = true;
            info!(at = %self.destination, "You Escaped!!");
            return MoveOutcome::Escaped;
        }

        match moved_to {
            Some(next) => MoveOutcome::Moved(next),
            None => MoveOutcome::Blocked,
        }
    }
}
