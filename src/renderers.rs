//! Painting a maze onto a 2D raster surface.

use std::path::Path;

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::Grid;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b, a: 0xff }
    }
}

pub const BLACK: Colour = Colour::rgb(0, 0, 0);
pub const WHITE: Colour = Colour::rgb(0xff, 0xff, 0xff);
pub const GREEN: Colour = Colour::rgb(0, 0x80, 0);
pub const ORANGE: Colour = Colour::rgb(0xff, 0xa5, 0);
pub const RED: Colour = Colour::rgb(0xff, 0, 0);

pub const WALL_COLOUR: Colour = BLACK;
pub const CARVING_COLOUR: Colour = GREEN;
pub const PLAYER_COLOUR: Colour = ORANGE;
pub const DESTINATION_COLOUR: Colour = RED;
pub const SOLUTION_COLOUR: Colour = ORANGE;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> PixelPoint {
        PixelPoint { x, y }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> PixelRect {
        PixelRect { x, y, width, height }
    }
}

/// Anything that can clear a region, draw a line and fill a rectangle.
pub trait RenderSurface {
    fn clear_rect(&mut self, rect: PixelRect) -> Result<()>;
    fn stroke_line(&mut self, from: PixelPoint, to: PixelPoint, colour: Colour) -> Result<()>;
    fn fill_rect(&mut self, rect: PixelRect, colour: Colour) -> Result<()>;
}

/// The cells to pick out on top of the maze walls.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum FrameMarkers {
    None,
    Carving(Cartesian2DCoordinate),
    Playing {
        player: Cartesian2DCoordinate,
        destination: Cartesian2DCoordinate,
    },
}

fn cell_rect(coord: Cartesian2DCoordinate, cell_size: u32) -> PixelRect {
    PixelRect::new((coord.x * cell_size) as i32,
                   (coord.y * cell_size) as i32,
                   cell_size,
                   cell_size)
}

/// Repaint the whole maze: clear, fill solution path cells, draw every standing wall, then the
/// markers for the current phase.
pub fn render_frame<S>(surface: &mut S,
                       grid: &Grid,
                       cell_size: u32,
                       markers: FrameMarkers)
                       -> Result<()>
    where S: RenderSurface + ?Sized
{
    let width = grid.columns().0 as u32 * cell_size;
    let height = grid.rows().0 as u32 * cell_size;
    surface.clear_rect(PixelRect::new(0, 0, width + 1, height + 1))?;

    for cell in grid.cells() {
        if cell.is_solution_path() {
            surface.fill_rect(cell_rect(cell.coordinate(), cell_size), SOLUTION_COLOUR)?;
        }
    }

    let size = cell_size as i32;
    for cell in grid.cells() {
        let PixelRect { x: x1, y: y1, .. } = cell_rect(cell.coordinate(), cell_size);
        let (x2, y2) = (x1 + size, y1 + size);
        let walls = cell.walls();

        if walls.has_wall(CompassPrimary::North) {
            surface.stroke_line(PixelPoint::new(x1, y1), PixelPoint::new(x2, y1), WALL_COLOUR)?;
        }
        if walls.has_wall(CompassPrimary::East) {
            surface.stroke_line(PixelPoint::new(x2, y1), PixelPoint::new(x2, y2), WALL_COLOUR)?;
        }
        if walls.has_wall(CompassPrimary::South) {
            surface.stroke_line(PixelPoint::new(x2, y2), PixelPoint::new(x1, y2), WALL_COLOUR)?;
        }
        if walls.has_wall(CompassPrimary::West) {
            surface.stroke_line(PixelPoint::new(x1, y2), PixelPoint::new(x1, y1), WALL_COLOUR)?;
        }
    }

    match markers {
        FrameMarkers::None => {}
        FrameMarkers::Carving(current) => {
            surface.fill_rect(cell_rect(current, cell_size), CARVING_COLOUR)?;
        }
        FrameMarkers::Playing { player, destination } => {
            surface.fill_rect(cell_rect(destination, cell_size), DESTINATION_COLOUR)?;
            surface.fill_rect(cell_rect(player, cell_size), PLAYER_COLOUR)?;
        }
    }
    Ok(())
}

/// An in memory RGBA raster. Drawing outside the image is clipped.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbaImage,
    background: Colour,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32, background: Colour) -> ImageSurface {
        ImageSurface {
            image: RgbaImage::from_pixel(width, height, to_rgba(background)),
            background,
        }
    }

    /// Big enough for the whole grid with its outer walls.
    pub fn for_grid(grid: &Grid, cell_size: u32) -> ImageSurface {
        let width = grid.columns().0 as u32 * cell_size + 1;
        let height = grid.rows().0 as u32 * cell_size + 1;
        ImageSurface::new(width, height, WHITE)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.image.width() && y < self.image.height() {
            let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
            Some(Colour { r, g, b, a })
        } else {
            None
        }
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        debug!(path = %path.as_ref().display(),
               width = self.image.width(),
               height = self.image.height(),
               "saved maze image");
        Ok(())
    }

    fn put(&mut self, x: i32, y: i32, colour: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, colour);
        }
    }

    fn fill(&mut self, rect: PixelRect, colour: Rgba<u8>) {
        let x_end = rect.x.saturating_add(rect.width as i32);
        let y_end = rect.y.saturating_add(rect.height as i32);
        for y in rect.y.max(0)..y_end.min(self.image.height() as i32) {
            for x in rect.x.max(0)..x_end.min(self.image.width() as i32) {
                self.image.put_pixel(x as u32, y as u32, colour);
            }
        }
    }
}

fn to_rgba(colour: Colour) -> Rgba<u8> {
    Rgba([colour.r, colour.g, colour.b, colour.a])
}

impl RenderSurface for ImageSurface {
    fn clear_rect(&mut self, rect: PixelRect) -> Result<()> {
        let background = to_rgba(self.background);
        self.fill(rect, background);
        Ok(())
    }

    // Bresenham, both end points inclusive.
    fn stroke_line(&mut self, from: PixelPoint, to: PixelPoint, colour: Colour) -> Result<()> {
        let colour = to_rgba(colour);
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let step_x = if from.x < to.x { 1 } else { -1 };
        let step_y = if from.y < to.y { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.put(x, y, colour);
            if x == to.x && y == to.y {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: PixelRect, colour: Colour) -> Result<()> {
        self.fill(rect, to_rgba(colour));
        Ok(())
    }
}


#[cfg(test)]
pub(crate) mod tests {

    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::generators;
    use crate::units::{ColumnsCount, RowsCount};

    #[derive(PartialEq, Clone, Debug)]
    pub(crate) enum DrawCall {
        Clear(PixelRect),
        Line(PixelPoint, PixelPoint, Colour),
        Fill(PixelRect, Colour),
    }

    #[derive(Default, Debug)]
    pub(crate) struct RecordingSurface {
        pub(crate) calls: Vec<DrawCall>,
    }

    impl RenderSurface for RecordingSurface {
        fn clear_rect(&mut self, rect: PixelRect) -> Result<()> {
            self.calls.push(DrawCall::Clear(rect));
            Ok(())
        }

        fn stroke_line(&mut self, from: PixelPoint, to: PixelPoint, colour: Colour) -> Result<()> {
            self.calls.push(DrawCall::Line(from, to, colour));
            Ok(())
        }

        fn fill_rect(&mut self, rect: PixelRect, colour: Colour) -> Result<()> {
            self.calls.push(DrawCall::Fill(rect, colour));
            Ok(())
        }
    }

    impl RecordingSurface {
        pub(crate) fn fills(&self) -> Vec<(PixelRect, Colour)> {
            self.calls
                .iter()
                .filter_map(|call| match *call {
                    DrawCall::Fill(rect, colour) => Some((rect, colour)),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn line_count(&self) -> usize {
            self.calls.iter().filter(|call| matches!(call, DrawCall::Line(..))).count()
        }
    }

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn serpentine_3x3() -> Grid {
        let mut g = Grid::new(RowsCount(3), ColumnsCount(3)).unwrap();
        generators::recursive_backtracker(&mut g, StepRng::new(0, 0));
        g
    }

    #[test]
    fn closed_cell_draws_four_walls() {
        let g = Grid::new(RowsCount(1), ColumnsCount(1)).unwrap();
        let mut surface = RecordingSurface::default();
        render_frame(&mut surface, &g, 10, FrameMarkers::None).unwrap();
        assert_eq!(surface.calls,
                   vec![DrawCall::Clear(PixelRect::new(0, 0, 11, 11)),
                        DrawCall::Line(PixelPoint::new(0, 0), PixelPoint::new(10, 0), BLACK),
                        DrawCall::Line(PixelPoint::new(10, 0), PixelPoint::new(10, 10), BLACK),
                        DrawCall::Line(PixelPoint::new(10, 10), PixelPoint::new(0, 10), BLACK),
                        DrawCall::Line(PixelPoint::new(0, 10), PixelPoint::new(0, 0), BLACK)]);
    }

    #[test]
    fn only_standing_walls_are_drawn() {
        let g = serpentine_3x3();
        let mut surface = RecordingSurface::default();
        render_frame(&mut surface, &g, 10, FrameMarkers::None).unwrap();
        // 9 cells * 4 sides, less both sides of each of the 8 passages.
        assert_eq!(surface.line_count(), 36 - 2 * 8);
        assert!(surface.fills().is_empty());
    }

    #[test]
    fn phase_markers() {
        let g = serpentine_3x3();

        let mut carving = RecordingSurface::default();
        render_frame(&mut carving, &g, 10, FrameMarkers::Carving(gc(1, 2))).unwrap();
        assert_eq!(carving.fills(), vec![(PixelRect::new(10, 20, 10, 10), GREEN)]);
        assert_eq!(carving.calls.last(),
                   Some(&DrawCall::Fill(PixelRect::new(10, 20, 10, 10), GREEN)));

        let mut playing = RecordingSurface::default();
        let markers = FrameMarkers::Playing {
            player: gc(0, 0),
            destination: gc(2, 2),
        };
        render_frame(&mut playing, &g, 10, markers).unwrap();
        assert_eq!(playing.fills(),
                   vec![(PixelRect::new(20, 20, 10, 10), RED),
                        (PixelRect::new(0, 0, 10, 10), ORANGE)]);
    }

    #[test]
    fn solution_cells_are_filled_before_walls() {
        let mut g = serpentine_3x3();
        crate::solvers::depth_first_solve(&mut g, gc(0, 0), gc(2, 2), StepRng::new(0, 0)).unwrap();
        let mut surface = RecordingSurface::default();
        render_frame(&mut surface, &g, 4, FrameMarkers::None).unwrap();

        let fills = surface.fills();
        assert_eq!(fills.len(), 5);
        assert!(fills.iter().all(|&(_, colour)| colour == ORANGE));
        // clear, five fills, then the walls
        assert!(surface.calls[1..6].iter().all(|call| matches!(call, DrawCall::Fill(..))));
    }

    #[test]
    fn image_surface_draws_walls_and_markers() {
        let g = serpentine_3x3();
        let mut surface = ImageSurface::for_grid(&g, 10);
        assert_eq!(surface.image().dimensions(), (31, 31));

        let markers = FrameMarkers::Playing {
            player: gc(0, 0),
            destination: gc(2, 2),
        };
        render_frame(&mut surface, &g, 10, markers).unwrap();

        // Outer boundary corner and the wall under (1, 0).
        assert_eq!(surface.pixel(30, 30), Some(BLACK));
        assert_eq!(surface.pixel(15, 10), Some(BLACK));
        // The open passage between (0, 0) and (1, 0) is not drawn.
        assert_eq!(surface.pixel(5, 5), Some(ORANGE));
        assert_eq!(surface.pixel(10, 5), Some(WHITE));
        assert_eq!(surface.pixel(15, 5), Some(WHITE));
        assert_eq!(surface.pixel(25, 25), Some(RED));
        assert_eq!(surface.pixel(31, 0), None);
    }

    #[test]
    fn diagonal_lines_and_clipping() {
        let mut surface = ImageSurface::new(4, 4, WHITE);
        surface.stroke_line(PixelPoint::new(-2, -2), PixelPoint::new(5, 5), RED).unwrap();
        for i in 0..4 {
            assert_eq!(surface.pixel(i, i), Some(RED));
        }
        assert_eq!(surface.pixel(1, 0), Some(WHITE));

        surface.fill_rect(PixelRect::new(2, 2, 10, 10), GREEN).unwrap();
        assert_eq!(surface.pixel(3, 3), Some(GREEN));
        surface.clear_rect(PixelRect::new(0, 0, 4, 4)).unwrap();
        assert_eq!(surface.pixel(3, 3), Some(WHITE));
    }
}
