use error_chain::bail;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub struct RectGridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl RectGridDimensions {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<RectGridDimensions> {
        if rows.0 == 0 || columns.0 == 0 {
            bail!(ErrorKind::InvalidGridDimensions(rows.0, columns.0));
        }
        Ok(RectGridDimensions { rows, columns })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// The number of passages in a perfect maze over these dimensions,
    /// and the number of internal walls that could be removed at most.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (rows, columns) = (self.rows.0, self.columns.0);
        let max_edges = rows * (columns - 1) + columns * (rows - 1);
        (self.size(), EdgesCount(max_edges))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.columns.0 && (coord.y as usize) < self.rows.0
    }

    /// Convert a grid coordinate to a one dimensional row-major index in the range 0..size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_coordinate(&self, index: usize) -> Option<Cartesian2DCoordinate> {
        if index < self.size().0 {
            let y = index / self.columns.0;
            let x = index - (y * self.columns.0);
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }
}
