use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::{ALL_DIRECTIONS, Cartesian2DCoordinate, Cell, CompassPrimary,
                   CoordinateSmallVec, DirectionSmallVec, DirectionalNeighbours};
use crate::errors::*;
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


/// A fixed size rectangle of cells, each starting fully walled in.
///
/// Passages between cells exist wherever the shared wall has been removed. The wall flags on
/// both sides of a passage are always written together so the two cells never disagree.
#[derive(Clone)]
pub struct Grid {
    dimensions: RectGridDimensions,
    cells: Vec<Cell>,
    links_count: usize,
}

// Each passage is reported from its west or north end only.
static FORWARD_DIRECTIONS: [CompassPrimary; 2] = [CompassPrimary::East, CompassPrimary::South];

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    /// The direction leads off the edge of the grid.
    NoNeighbour,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, links: {:?}",
               self.rows(), self.columns(), self.links_count)
    }
}

impl Grid {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let dimensions = RectGridDimensions::new(rows, columns)?;
        let NodesCount(nodes) = dimensions.size();

        let cells = (0..nodes)
            .filter_map(|index| dimensions.index_to_coordinate(index))
            .map(Cell::new)
            .collect();

        Ok(Grid {
            dimensions,
            cells,
            links_count: 0,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    /// Number of open passages (removed wall pairs).
    #[inline]
    pub fn links_count(&self) -> usize {
        self.links_count
    }

    #[inline]
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut Cell> {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    #[inline]
    pub fn cell_at_index(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        self.dimensions.coordinate_to_index(coord)
    }

    #[inline]
    pub fn index_to_coordinate(&self, index: usize) -> Option<Cartesian2DCoordinate> {
        self.dimensions.index_to_coordinate(index)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    /// The cell at linear index 0, top left.
    pub fn first_coordinate(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// The cell at the last linear index, bottom right.
    pub fn last_coordinate(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.columns().0 as u32 - 1, self.rows().0 as u32 - 1)
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        direction.offset(coord).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> smallvec::SmallVec<[Option<Cartesian2DCoordinate>; 4]> {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    /// Cells to the North, East, South or West of a cell, paired with the direction they lie in.
    /// Cells on the boundary simply have fewer entries. Walls are not considered.
    pub fn adjacent_cells(&self, coord: Cartesian2DCoordinate) -> DirectionalNeighbours {
        ALL_DIRECTIONS.iter()
                      .filter_map(|dir| {
                          self.neighbour_at_direction(coord, *dir).map(|neighbour| (*dir, neighbour))
                      })
                      .collect()
    }

    /// Adjacent cell coordinates without their directions.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        self.adjacent_cells(coord).into_iter().map(|(_, neighbour)| neighbour).collect()
    }

    /// Directions that can be travelled from a cell: those with no standing wall.
    /// An invalid coordinate has no open paths.
    pub fn open_paths(&self, coord: Cartesian2DCoordinate) -> DirectionSmallVec {
        self.cell(coord)
            .map(|cell| cell.walls().open_directions())
            .unwrap_or_default()
    }

    /// Cells connected to a cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        self.cell(coord).map(|_| {
            self.adjacent_cells(coord)
                .into_iter()
                .filter(|(dir, _)| self.is_neighbour_linked(coord, *dir))
                .map(|(_, neighbour)| neighbour)
                .collect()
        })
    }

    /// Carve a passage from a cell to its neighbour in the given direction.
    ///
    /// Clears the wall on the cell and the opposite wall on the neighbour. Removing a wall that is
    /// already open leaves it open.
    pub fn remove_wall(&mut self,
                       coord: Cartesian2DCoordinate,
                       direction: CompassPrimary)
                       -> ::std::result::Result<Cartesian2DCoordinate, CellLinkError> {

        let a_index = self.grid_coordinate_to_index(coord)
                          .ok_or(CellLinkError::InvalidGridCoordinate)?;
        let neighbour = self.neighbour_at_direction(coord, direction)
                            .ok_or(CellLinkError::NoNeighbour)?;
        let b_index = self.grid_coordinate_to_index(neighbour)
                          .ok_or(CellLinkError::InvalidGridCoordinate)?;

        if self.cells[a_index].walls.has_wall(direction) {
            self.links_count += 1;
        }
        self.cells[a_index].walls.open(direction);
        self.cells[b_index].walls.open(direction.opposite());

        Ok(neighbour)
    }

    /// Link two adjacent cells. The direction between them is worked out from the coordinates.
    pub fn link(&mut self,
                a: Cartesian2DCoordinate,
                b: Cartesian2DCoordinate)
                -> ::std::result::Result<(), CellLinkError> {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let direction = self.adjacent_cells(a)
                            .into_iter()
                            .find(|(_, neighbour)| *neighbour == b)
                            .map(|(dir, _)| dir)
                            .ok_or(CellLinkError::NoNeighbour)?;
        self.remove_wall(a, direction).map(|_| ())
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        self.adjacent_cells(a)
            .into_iter()
            .any(|(dir, neighbour)| neighbour == b && self.is_neighbour_linked(a, dir))
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction).is_some() &&
        self.cell(coord).map_or(false, |cell| !cell.walls().has_wall(direction))
    }

    /// Marks a cell as visited by the maze generator.
    /// Returns true if the cell was not already visited.
    pub fn mark_visited(&mut self, coord: Cartesian2DCoordinate) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if !cell.visited => {
                cell.visited = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(false, |cell| cell.is_visited())
    }

    /// Scans the whole grid for any cell the generator has not reached yet.
    pub fn has_unvisited_cells(&self) -> bool {
        self.cells.iter().any(|cell| !cell.visited)
    }

    pub fn unvisited_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.visited).count()
    }

    /// Forget any solver state so the maze can be solved again.
    pub fn clear_solution_marks(&mut self) {
        for cell in &mut self.cells {
            cell.visited_for_solution = false;
            cell.is_solution_path = false;
        }
    }

    /// Coordinates on the solver's current path, in row-major order.
    pub fn solution_path_cells(&self) -> Vec<Cartesian2DCoordinate> {
        self.cells
            .iter()
            .filter(|cell| cell.is_solution_path())
            .map(|cell| cell.coordinate())
            .collect()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.dimensions)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.dimensions)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Every passage once, as the (west or north cell, east or south cell) pair.
    pub fn iter_links(&self) -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + '_ {
        self.cells.iter().flat_map(move |cell| {
            let coord = cell.coordinate();
            FORWARD_DIRECTIONS.iter()
                .filter(move |dir| !cell.walls().has_wall(**dir))
                .filter_map(move |dir| self.neighbour_at_direction(coord, *dir))
                .map(move |neighbour| (coord, neighbour))
        })
    }

    /// The passages as an undirected petgraph graph. Node indices are the row-major cell indices
    /// and node weights the cell coordinates.
    pub fn to_graph(&self) -> UnGraph<Cartesian2DCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(max_edges)) = self.dimensions.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, max_edges);
        for cell in &self.cells {
            let _ = graph.add_node(cell.coordinate());
        }
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }
}
