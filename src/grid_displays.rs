//! Text rendering of a grid, with optional overlays that fill in the cell bodies.

use std::fmt;

use fnv::FnvHashSet;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;

const CORNER: &str = "+";
const WALL_EW: &str = "---";
const WALL_NS: &str = "|";
const OPEN_EW: &str = "   ";
const OPEN_NS: &str = " ";

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

/// Marks start cells with `S` and end cells with `E`.
#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: Vec<Cartesian2DCoordinate>,
    end_coordinates: Vec<Cartesian2DCoordinate>,
}

impl StartEndPointsDisplay {
    pub fn new(starts: Vec<Cartesian2DCoordinate>,
               ends: Vec<Cartesian2DCoordinate>)
               -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.start_coordinates.contains(&coord) {
            String::from(" S ")
        } else if self.end_coordinates.contains(&coord) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks every cell along a path with a dot.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

/// Layers displays: the first one to put something other than blanks in a cell wins.
pub struct LayeredDisplay<'a> {
    layers: Vec<&'a dyn GridDisplay>,
}

impl<'a> LayeredDisplay<'a> {
    pub fn new(layers: Vec<&'a dyn GridDisplay>) -> LayeredDisplay<'a> {
        LayeredDisplay { layers }
    }
}

impl<'a> GridDisplay for LayeredDisplay<'a> {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        self.layers
            .iter()
            .map(|layer| layer.render_cell_body(coord))
            .find(|body| !body.trim().is_empty())
            .unwrap_or_else(|| String::from("   "))
    }
}

/// A grid paired with an optional overlay, ready for `{}` formatting.
pub struct TextRendering<'a> {
    grid: &'a Grid,
    overlay: Option<&'a dyn GridDisplay>,
}

impl<'a> TextRendering<'a> {
    pub fn new(grid: &'a Grid, overlay: Option<&'a dyn GridDisplay>) -> TextRendering<'a> {
        TextRendering { grid, overlay }
    }
}

impl<'a> fmt::Display for TextRendering<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let grid = self.grid;
        let columns_count = grid.columns().0;

        // The north boundary is always solid, every later line is owned by the row above it.
        let mut output = String::from(CORNER);
        for _ in 0..columns_count {
            output.push_str(WALL_EW);
            output.push_str(CORNER);
        }
        output.push('\n');

        for row in grid.iter_row() {
            let mut middle = String::from(WALL_NS);
            let mut bottom = String::from(CORNER);

            for coord in row {
                let body = self.overlay
                               .map(|overlay| overlay.render_cell_body(coord))
                               .unwrap_or_else(|| String::from("   "));
                middle.push_str(&body);

                let east_open = grid.is_neighbour_linked(coord, CompassPrimary::East);
                middle.push_str(if east_open { OPEN_NS } else { WALL_NS });

                let south_open = grid.is_neighbour_linked(coord, CompassPrimary::South);
                bottom.push_str(if south_open { OPEN_EW } else { WALL_EW });
                bottom.push_str(CORNER);
            }

            output.push_str(&middle);
            output.push('\n');
            output.push_str(&bottom);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&TextRendering::new(self, None), f)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn two_by_two() -> Grid {
        let mut g = Grid::new(RowsCount(2), ColumnsCount(2)).unwrap();
        g.link(gc(0, 0), gc(1, 0)).unwrap();
        g.link(gc(1, 0), gc(1, 1)).unwrap();
        g.link(gc(1, 1), gc(0, 1)).unwrap();
        g
    }

    #[test]
    fn closed_grid_text() {
        let g = Grid::new(RowsCount(1), ColumnsCount(2)).unwrap();
        assert_eq!(format!("{}", g),
                   "+---+---+\n\
                    |   |   |\n\
                    +---+---+\n");
    }

    #[test]
    fn carved_grid_text() {
        let g = two_by_two();
        assert_eq!(format!("{}", g),
                   "+---+---+\n\
                    |       |\n\
                    +---+   +\n\
                    |       |\n\
                    +---+---+\n");
    }

    #[test]
    fn start_end_overlay() {
        let g = two_by_two();
        let points = StartEndPointsDisplay::new(vec![gc(0, 0)], vec![gc(1, 1)]);
        let text = format!("{}", TextRendering::new(&g, Some(&points as &dyn GridDisplay)));
        assert_eq!(text,
                   "+---+---+\n\
                    | S     |\n\
                    +---+   +\n\
                    |     E |\n\
                    +---+---+\n");
    }

    #[test]
    fn layered_overlays_prefer_earlier_layers() {
        let points = StartEndPointsDisplay::new(vec![gc(0, 0)], vec![]);
        let path = PathDisplay::new(&[gc(0, 0), gc(1, 0)]);
        let layered = LayeredDisplay::new(vec![&points as &dyn GridDisplay, &path]);
        assert_eq!(layered.render_cell_body(gc(0, 0)), " S ");
        assert_eq!(layered.render_cell_body(gc(1, 0)), " . ");
        assert_eq!(layered.render_cell_body(gc(1, 1)), "   ");
    }
}
