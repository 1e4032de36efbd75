//! An SDL2 window to watch the maze being carved and play it.
//! Needs the native SDL2 libraries, so it is only built with the `sdl` feature.

use std::thread;

use rand::Rng;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::info;

use crate::errors::*;
use crate::game::{Game, GamePhase};
use crate::input::InputEvent;
use crate::navigation::MoveOutcome;
use crate::pacing::{CancellationToken, Pacer};
use crate::renderers::{Colour, PixelPoint, PixelRect, RenderSurface, WHITE};

pub struct SdlSurface {
    canvas: Canvas<Window>,
}

fn sdl_colour(colour: Colour) -> Color {
    Color::RGBA(colour.r, colour.g, colour.b, colour.a)
}

fn sdl_rect(rect: PixelRect) -> Rect {
    Rect::new(rect.x, rect.y, rect.width, rect.height)
}

impl SdlSurface {
    pub fn new(canvas: Canvas<Window>) -> SdlSurface {
        SdlSurface { canvas }
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| Error::from(e.to_string()))
    }
}

impl RenderSurface for SdlSurface {
    fn clear_rect(&mut self, rect: PixelRect) -> Result<()> {
        self.canvas.set_draw_color(sdl_colour(WHITE));
        self.canvas.fill_rect(sdl_rect(rect))?;
        Ok(())
    }

    fn stroke_line(&mut self, from: PixelPoint, to: PixelPoint, colour: Colour) -> Result<()> {
        self.canvas.set_draw_color(sdl_colour(colour));
        self.canvas.draw_line(Point::new(from.x, from.y), Point::new(to.x, to.y))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: PixelRect, colour: Colour) -> Result<()> {
        self.canvas.set_draw_color(sdl_colour(colour));
        self.canvas.fill_rect(sdl_rect(rect))?;
        Ok(())
    }
}

fn key_code_name(keycode: Keycode) -> Option<&'static str> {
    match keycode {
        Keycode::Up => Some("ArrowUp"),
        Keycode::Right => Some("ArrowRight"),
        Keycode::Down => Some("ArrowDown"),
        Keycode::Left => Some("ArrowLeft"),
        Keycode::W => Some("KeyW"),
        Keycode::D => Some("KeyD"),
        Keycode::S => Some("KeyS"),
        Keycode::A => Some("KeyA"),
        _ => None,
    }
}

/// Window events as game input. Mouse drags stand in for touch swipes.
fn input_event(event: &Event, window_side: f32) -> Option<InputEvent> {
    match *event {
        Event::KeyDown { keycode: Some(keycode), .. } => {
            key_code_name(keycode).map(|name| InputEvent::KeyDown(String::from(name)))
        }
        Event::MouseButtonDown { mouse_btn: MouseButton::Left, x, y, .. } => {
            Some(InputEvent::TouchStart { x: f64::from(x), y: f64::from(y) })
        }
        Event::MouseButtonUp { mouse_btn: MouseButton::Left, x, y, .. } => {
            Some(InputEvent::TouchEnd { x: f64::from(x), y: f64::from(y) })
        }
        Event::FingerDown { x, y, .. } => {
            Some(InputEvent::TouchStart {
                x: f64::from(x * window_side),
                y: f64::from(y * window_side),
            })
        }
        Event::FingerUp { x, y, .. } => {
            Some(InputEvent::TouchEnd {
                x: f64::from(x * window_side),
                y: f64::from(y * window_side),
            })
        }
        _ => None,
    }
}

/// Open a window, carve the maze in it at the pacer's speed, then play until the window closes.
/// Closing the window or pressing Escape cancels the run.
pub fn run_window<R: Rng>(mut game: Game<R>, pacer: &Pacer, cancel: &CancellationToken) -> Result<()> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let grid_side = game.grid().columns().0.max(game.grid().rows().0) as u32;
    let window_side = grid_side * game.cell_size() + 1;
    let window = video_subsystem.window("Maze Escape", window_side, window_side)
        .position_centered()
        .build()
        .map_err(|e| Error::from(e.to_string()))?;
    let canvas = window.into_canvas()
        .present_vsync()
        .build()
        .map_err(|e| Error::from(e.to_string()))?;
    let mut surface = SdlSurface::new(canvas);
    let mut events = sdl_context.event_pump()?;

    'running: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } |
                Event::KeyDown { keycode: Some(Keycode::Escape), .. } => cancel.cancel(),
                ref other => {
                    if let Some(input) = input_event(other, window_side as f32) {
                        if game.handle_input(&input) == Some(MoveOutcome::Escaped) {
                            surface.set_title("Maze Escape - You Escaped!!")?;
                        }
                    }
                }
            }
        }
        if cancel.is_cancelled() {
            break 'running;
        }

        if game.phase() == GamePhase::Generating {
            game.tick();
            thread::sleep(pacer.delay());
        }
        game.render(&mut surface)?;
        surface.present();
    }

    info!(phase = ?game.phase(), "window closed");
    Ok(())
}
