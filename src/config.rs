//! Sizing of the maze from the space available to draw it in.

use error_chain::bail;

use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnsCount, Height, RowsCount, Width};

/// Cells across the canvas when nothing else is asked for.
pub const DEFAULT_DIFFICULTY: u32 = 20;

/// The viewport to fit a square canvas into and how many cells should go across it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct LayoutConfig {
    pub viewport_width: Width,
    pub viewport_height: Height,
    pub difficulty: u32,
}

impl Default for LayoutConfig {
    fn default() -> LayoutConfig {
        LayoutConfig {
            viewport_width: Width(800),
            viewport_height: Height(800),
            difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

/// A square canvas divided into square cells.
///
/// The canvas takes 90% of the smaller viewport side, rounded down. Rounding the cell size down
/// can leave room for a few more cells than the difficulty asked for, and they are used.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CanvasLayout {
    side: u32,
    cell_size: u32,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl LayoutConfig {
    pub fn new(viewport_width: Width, viewport_height: Height, difficulty: u32) -> LayoutConfig {
        LayoutConfig {
            viewport_width,
            viewport_height,
            difficulty,
        }
    }

    pub fn layout(&self) -> Result<CanvasLayout> {
        if self.difficulty == 0 {
            bail!(ErrorKind::InvalidLayout(String::from("the difficulty must be at least 1")));
        }

        let shortest_side = self.viewport_width.0.min(self.viewport_height.0);
        let side = (u64::from(shortest_side) * 9 / 10) as u32;
        let cell_size = side / self.difficulty;
        if cell_size == 0 {
            bail!(ErrorKind::InvalidLayout(format!("a {} pixel canvas cannot fit {} cells across",
                                                   side,
                                                   self.difficulty)));
        }

        let cells_across = (side / cell_size) as usize;
        Ok(CanvasLayout {
            side,
            cell_size,
            rows: RowsCount(cells_across),
            columns: ColumnsCount(cells_across),
        })
    }
}

impl CanvasLayout {
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// A fresh grid with every wall standing, sized for this canvas.
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.rows, self.columns)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn layout(w: u32, h: u32, difficulty: u32) -> Result<CanvasLayout> {
        LayoutConfig::new(Width(w), Height(h), difficulty).layout()
    }

    #[test]
    fn default_layout() {
        let l = LayoutConfig::default().layout().unwrap();
        assert_eq!(l.side(), 720);
        assert_eq!(l.cell_size(), 36);
        assert_eq!(l.rows(), RowsCount(20));
        assert_eq!(l.columns(), ColumnsCount(20));
    }

    #[test]
    fn smaller_viewport_side_wins() {
        let l = layout(1280, 600, 20).unwrap();
        assert_eq!(l.side(), 540);
        assert_eq!(l.cell_size(), 27);
        assert_eq!(l.rows(), RowsCount(20));
    }

    #[test]
    fn rounding_down_the_cell_size_fits_extra_cells() {
        let l = layout(100, 100, 20).unwrap();
        assert_eq!(l.side(), 90);
        assert_eq!(l.cell_size(), 4);
        assert_eq!(l.rows(), RowsCount(22));
        assert_eq!(l.columns(), ColumnsCount(22));

        let g = l.grid().unwrap();
        assert_eq!(g.size(), 22 * 22);
    }

    #[test]
    fn invalid_layouts() {
        match layout(800, 800, 0) {
            Err(Error(ErrorKind::InvalidLayout(_), _)) => {}
            other => panic!("expected an invalid layout, got {:?}", other),
        }
        match layout(10, 10, 20) {
            Err(Error(ErrorKind::InvalidLayout(_), _)) => {}
            other => panic!("expected an invalid layout, got {:?}", other),
        }
        assert!(layout(0, 500, 1).is_err());
    }
}
