use macroquad::prelude::*;
use tracing::debug;

use crate::game::FoodSpawner;
use crate::input::{InputEvent, InputRouter, Key};
use crate::layout::{DpadButton, Layout};
use crate::render::{self, View};
use crate::session::GameLoop;
use crate::store::ScoreStore;

const KEYS: &[(KeyCode, Key)] = &[
    (KeyCode::Up, Key::ArrowUp),
    (KeyCode::Down, Key::ArrowDown),
    (KeyCode::Left, Key::ArrowLeft),
    (KeyCode::Right, Key::ArrowRight),
    (KeyCode::W, Key::Char('w')),
    (KeyCode::A, Key::Char('a')),
    (KeyCode::S, Key::Char('s')),
    (KeyCode::D, Key::Char('d')),
    (KeyCode::P, Key::Char('p')),
    (KeyCode::Space, Key::Space),
    (KeyCode::Enter, Key::Enter),
    (KeyCode::KpEnter, Key::Enter),
];

/// Per-frame glue between macroquad and the game loop.
pub struct App<St, Sp> {
    game: GameLoop<St, Sp>,
    router: InputRouter,
    touch_seen: bool,
    gesture_touch: Option<u64>,
}

impl<St: ScoreStore, Sp: FoodSpawner> App<St, Sp> {
    pub fn new(game: GameLoop<St, Sp>) -> Self {
        // Touches are handled directly; simulated clicks would double them.
        simulate_mouse_with_touch(false);
        let router = InputRouter::new(game.config().swipe_threshold_px);
        Self { game, router, touch_seen: false, gesture_touch: None }
    }

    pub fn frame(&mut self) {
        let now_ms = get_time() * 1000.0;
        let layout = self.layout();

        for event in self.poll(&layout, now_ms) {
            for intent in self.router.handle(event, self.game.phase()) {
                self.game.apply(intent, now_ms);
            }
        }
        self.game.frame(now_ms);

        let view = View {
            state: self.game.state(),
            phase: self.game.phase(),
            high_score: self.game.high_score(),
            touch: self.touch_seen,
        };
        render::draw_frame(&layout, &view);
    }

    fn layout(&self) -> Layout {
        let config = self.game.config();
        Layout::compute(
            screen_width(),
            screen_height(),
            config.grid(),
            config.max_board_px,
            config.touch_controls || self.touch_seen,
        )
    }

    fn poll(&mut self, layout: &Layout, now_ms: f64) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = KEYS
            .iter()
            .filter(|(code, _)| is_key_pressed(*code))
            .map(|(_, key)| InputEvent::KeyDown(*key))
            .collect();

        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            if let Some(button) = layout.dpad_hit(x, y) {
                events.push(dpad_event(button));
            } else if layout.board_contains(x, y) {
                events.push(InputEvent::OverlayTap);
            }
        }

        for touch in touches() {
            if !self.touch_seen {
                debug!("touch input detected, showing d-pad");
                self.touch_seen = true;
            }
            let (x, y) = (touch.position.x, touch.position.y);
            match touch.phase {
                TouchPhase::Started => {
                    if let Some(button) = layout.dpad_hit(x, y) {
                        events.push(dpad_event(button));
                    } else if self.gesture_touch.is_none() && layout.board_contains(x, y) {
                        self.gesture_touch = Some(touch.id);
                        events.push(InputEvent::TouchStart { x, y, at_ms: now_ms });
                    }
                }
                TouchPhase::Moved if self.gesture_touch == Some(touch.id) => {
                    events.push(InputEvent::TouchMove { x, y, at_ms: now_ms });
                }
                TouchPhase::Ended if self.gesture_touch == Some(touch.id) => {
                    self.gesture_touch = None;
                    events.push(InputEvent::TouchEnd { x, y, at_ms: now_ms });
                }
                TouchPhase::Cancelled if self.gesture_touch == Some(touch.id) => {
                    self.gesture_touch = None;
                }
                _ => {}
            }
        }
        events
    }
}

fn dpad_event(button: DpadButton) -> InputEvent {
    match button {
        DpadButton::Arrow(dir) => InputEvent::Dpad(dir),
        DpadButton::Pause => InputEvent::DpadPause,
    }
}
