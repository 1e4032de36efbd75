//! **maze_escape** generates perfect mazes by randomised depth first carving, draws them as they
//! are carved and lets a player find the way out.

pub mod cells;
pub mod config;
pub mod errors;
pub mod game;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod input;
pub mod navigation;
pub mod pacing;
pub mod pathing;
pub mod renderers;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod solvers;
pub mod units;
