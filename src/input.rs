//! Keyboard and touch input mapped onto compass directions.

use std::str::FromStr;

use crate::cells::CompassPrimary;

/// The physical key codes the player can steer with.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum KeyCode {
    ArrowUp,
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    KeyW,
    KeyD,
    KeyS,
    KeyA,
}

impl KeyCode {
    pub fn direction(self) -> CompassPrimary {
        match self {
            KeyCode::ArrowUp | KeyCode::KeyW => CompassPrimary::North,
            KeyCode::ArrowRight | KeyCode::KeyD => CompassPrimary::East,
            KeyCode::ArrowDown | KeyCode::KeyS => CompassPrimary::South,
            KeyCode::ArrowLeft | KeyCode::KeyA => CompassPrimary::West,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct UnknownKeyCode;

impl FromStr for KeyCode {
    type Err = UnknownKeyCode;

    fn from_str(code: &str) -> Result<KeyCode, UnknownKeyCode> {
        match code {
            "ArrowUp" => Ok(KeyCode::ArrowUp),
            "ArrowRight" => Ok(KeyCode::ArrowRight),
            "ArrowDown" => Ok(KeyCode::ArrowDown),
            "ArrowLeft" => Ok(KeyCode::ArrowLeft),
            "KeyW" => Ok(KeyCode::KeyW),
            "KeyD" => Ok(KeyCode::KeyD),
            "KeyS" => Ok(KeyCode::KeyS),
            "KeyA" => Ok(KeyCode::KeyA),
            _ => Err(UnknownKeyCode),
        }
    }
}

/// Direction for a key code, None for keys that do not steer.
pub fn key_direction(code: &str) -> Option<CompassPrimary> {
    code.parse::<KeyCode>().ok().map(KeyCode::direction)
}

/// The dominant axis of a swipe picks the direction. Ties, including no movement at all,
/// count as vertical; y grows downwards.
pub fn swipe_direction(dx: f64, dy: f64) -> CompassPrimary {
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            CompassPrimary::East
        } else {
            CompassPrimary::West
        }
    } else if dy > 0.0 {
        CompassPrimary::South
    } else {
        CompassPrimary::North
    }
}

#[derive(PartialEq, Clone, Debug)]
pub enum InputEvent {
    KeyDown(String),
    TouchStart { x: f64, y: f64 },
    TouchEnd { x: f64, y: f64 },
}

/// Turns raw input events into directions, pairing each touch start with the next touch end.
#[derive(Default, Debug, Clone)]
pub struct GestureTracker {
    touch_start: Option<(f64, f64)>,
}

impl GestureTracker {
    pub fn new() -> GestureTracker {
        GestureTracker::default()
    }

    pub fn feed(&mut self, event: &InputEvent) -> Option<CompassPrimary> {
        match *event {
            InputEvent::KeyDown(ref code) => key_direction(code),
            InputEvent::TouchStart { x, y } => {
                self.touch_start = Some((x, y));
                None
            }
            InputEvent::TouchEnd { x, y } => {
                self.touch_start
                    .take()
                    .map(|(start_x, start_y)| swipe_direction(x - start_x, y - start_y))
            }
        }
    }
}
