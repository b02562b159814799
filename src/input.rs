use tracing::debug;

use crate::grid::Direction;
use crate::session::Phase;

/// Symbolic key names, independent of any windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Char(char),
    Other,
}

impl Key {
    /// Arrow keys and WASD in either case.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Direction::Up),
                's' => Some(Direction::Down),
                'a' => Some(Direction::Left),
                'd' => Some(Direction::Right),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    TouchStart { x: f32, y: f32, at_ms: f64 },
    TouchMove { x: f32, y: f32, at_ms: f64 },
    TouchEnd { x: f32, y: f32, at_ms: f64 },
    Dpad(Direction),
    DpadPause,
    /// Click or tap on the start / game-over overlay.
    OverlayTap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    TogglePause,
    Steer(Direction),
}

#[derive(Debug, Clone, Copy)]
struct TouchOrigin {
    x: f32,
    y: f32,
    at_ms: f64,
}

/// Translates raw events into intents for the game loop.
#[derive(Debug, Clone)]
pub struct InputRouter {
    swipe_threshold: f32,
    touch: Option<TouchOrigin>,
}

impl InputRouter {
    pub fn new(swipe_threshold: f32) -> Self {
        Self { swipe_threshold, touch: None }
    }

    pub fn handle(&mut self, event: InputEvent, phase: Phase) -> Vec<Intent> {
        let idle = matches!(phase, Phase::Idle | Phase::Over);
        match event {
            InputEvent::KeyDown(key) => Self::key(key, phase),
            InputEvent::TouchStart { x, y, at_ms } => {
                self.touch = Some(TouchOrigin { x, y, at_ms });
                Vec::new()
            }
            InputEvent::TouchMove { .. } => Vec::new(),
            InputEvent::TouchEnd { x, y, at_ms } => match self.touch.take() {
                Some(origin) => self.gesture(origin, x, y, at_ms, phase),
                None => Vec::new(),
            },
            InputEvent::Dpad(dir) => match phase {
                Phase::Idle | Phase::Over => vec![Intent::Start, Intent::Steer(dir)],
                Phase::Running => vec![Intent::Steer(dir)],
                Phase::Paused => Vec::new(),
            },
            InputEvent::DpadPause if !idle => vec![Intent::TogglePause],
            InputEvent::OverlayTap if idle => vec![Intent::Start],
            InputEvent::DpadPause | InputEvent::OverlayTap => Vec::new(),
        }
    }

    fn key(key: Key, phase: Phase) -> Vec<Intent> {
        let dir = key.direction();
        if matches!(phase, Phase::Idle | Phase::Over)
            && (matches!(key, Key::Space | Key::Enter) || dir.is_some())
        {
            return vec![Intent::Start];
        }
        if let Key::Char('p' | 'P') = key {
            return match phase {
                Phase::Running | Phase::Paused => vec![Intent::TogglePause],
                _ => Vec::new(),
            };
        }
        dir.map(Intent::Steer).into_iter().collect()
    }

    fn gesture(
        &self,
        origin: TouchOrigin,
        x: f32,
        y: f32,
        at_ms: f64,
        phase: Phase,
    ) -> Vec<Intent> {
        let dx = x - origin.x;
        let dy = y - origin.y;
        let (abs_dx, abs_dy) = (dx.abs(), dy.abs());

        // The start and game-over overlays cover the board: any gesture
        // ending on them starts a game, however far it travelled.
        if matches!(phase, Phase::Idle | Phase::Over) {
            debug!(dx, dy, "overlay touch");
            return vec![Intent::Start];
        }
        if abs_dx < self.swipe_threshold && abs_dy < self.swipe_threshold {
            debug!(dx, dy, held_ms = at_ms - origin.at_ms, "tap");
            return vec![Intent::TogglePause];
        }
        if phase != Phase::Running {
            return Vec::new();
        }

        let dir = if abs_dx > abs_dy {
            if dx > 0.0 { Direction::Right } else { Direction::Left }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        debug!(dx, dy, ?dir, "swipe");
        vec![Intent::Steer(dir)]
    }
}
