use smallvec::SmallVec;
use std::fmt;

use crate::units::{ColumnIndex, RowIndex};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four directions a cell can be left by.
///
/// North is the top of the canvas, South the bottom, East the right and West the left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

/// Every direction in the fixed order neighbours are reported in.
pub const ALL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                 CompassPrimary::East,
                                                 CompassPrimary::South,
                                                 CompassPrimary::West];

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;
pub type DirectionalNeighbours = SmallVec<[(CompassPrimary, Cartesian2DCoordinate); 4]>;

impl CompassPrimary {
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// Creates a new coordinate offset 1 cell away in this direction.
    /// Returns None if the offset would leave the representable (non negative) space,
    /// the grid decides whether the result is actually inside its bounds.
    pub fn offset(self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (coord.x, coord.y);
        match self {
            CompassPrimary::North => y.checked_sub(1).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate { x, y }),
            CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate { x, y }),
        }
    }
}

/// Wall flags of a single cell. `true` means the wall is standing.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Walls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Default for Walls {
    fn default() -> Walls {
        Walls {
            north: true,
            east: true,
            south: true,
            west: true,
        }
    }
}

impl Walls {
    pub fn has_wall(&self, direction: CompassPrimary) -> bool {
        match direction {
            CompassPrimary::North => self.north,
            CompassPrimary::East => self.east,
            CompassPrimary::South => self.south,
            CompassPrimary::West => self.west,
        }
    }

    pub(crate) fn open(&mut self, direction: CompassPrimary) {
        match direction {
            CompassPrimary::North => self.north = false,
            CompassPrimary::East => self.east = false,
            CompassPrimary::South => self.south = false,
            CompassPrimary::West => self.west = false,
        }
    }

    /// Directions with no standing wall.
    pub fn open_directions(&self) -> DirectionSmallVec {
        ALL_DIRECTIONS.iter()
                      .cloned()
                      .filter(|dir| !self.has_wall(*dir))
                      .collect()
    }

    pub fn is_fully_enclosed(&self) -> bool {
        self.north && self.east && self.south && self.west
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    coord: Cartesian2DCoordinate,
    pub(crate) visited: bool,
    pub(crate) visited_for_solution: bool,
    pub(crate) is_solution_path: bool,
    pub(crate) walls: Walls,
}

impl Cell {
    pub fn new(coord: Cartesian2DCoordinate) -> Cell {
        Cell {
            coord,
            visited: false,
            visited_for_solution: false,
            is_solution_path: false,
            walls: Walls::default(),
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coord
    }

    #[inline]
    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn is_visited_for_solution(&self) -> bool {
        self.visited_for_solution
    }

    #[inline]
    pub fn is_solution_path(&self) -> bool {
        self.is_solution_path
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions_pair_up() {
        for dir in ALL_DIRECTIONS.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn offsets_stop_at_zero() {
        let origin = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(CompassPrimary::North.offset(origin), None);
        assert_eq!(CompassPrimary::West.offset(origin), None);
        assert_eq!(CompassPrimary::East.offset(origin), Some(Cartesian2DCoordinate::new(1, 0)));
        assert_eq!(CompassPrimary::South.offset(origin), Some(Cartesian2DCoordinate::new(0, 1)));
    }

    #[test]
    fn new_cells_are_enclosed_and_unvisited() {
        let cell = Cell::new(Cartesian2DCoordinate::new(3, 4));
        assert!(cell.walls().is_fully_enclosed());
        assert!(cell.walls().open_directions().is_empty());
        assert!(!cell.is_visited());
        assert!(!cell.is_visited_for_solution());
        assert!(!cell.is_solution_path());
    }

    #[test]
    fn open_directions_follow_compass_order() {
        let mut walls = Walls::default();
        walls.open(CompassPrimary::West);
        walls.open(CompassPrimary::North);
        assert_eq!(&*walls.open_directions(), &[CompassPrimary::North, CompassPrimary::West]);
        assert!(!walls.is_fully_enclosed());
    }
}
