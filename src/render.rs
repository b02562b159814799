use macroquad::prelude::*;

use crate::game::GameState;
use crate::layout::{DpadButton, Layout, Rect as Area, HUD_HEIGHT};
use crate::session::Phase;

// Palette
const BG: Color = Color::new(0.086, 0.129, 0.243, 1.0); // #16213e
const PAGE_BG: Color = Color::new(0.059, 0.078, 0.161, 1.0);
const GRID_LINE: Color = Color::new(0.102, 0.102, 0.243, 1.0); // #1a1a3e
const SNAKE_HEAD: Color = Color::new(0.0, 1.0, 0.533, 1.0); // #00ff88
const SNAKE_BODY: Color = Color::new(0.0, 0.8, 0.416, 1.0); // #00cc6a
const FOOD: Color = Color::new(1.0, 0.267, 0.4, 1.0); // #ff4466
const FOOD_GLOW: Color = Color::new(1.0, 0.267, 0.4, 0.3);
const TEXT: Color = Color::new(0.92, 0.92, 0.95, 1.0);
const TEXT_MUTED: Color = Color::new(0.6, 0.62, 0.72, 1.0);
const OVERLAY_DIM: Color = Color::new(0.0, 0.0, 0.0, 0.55);
const BUTTON: Color = Color::new(0.16, 0.2, 0.34, 0.9);

/// Read-only snapshot handed to the renderer each frame.
pub struct View<'a> {
    pub state: &'a GameState,
    pub phase: Phase,
    pub high_score: u32,
    pub touch: bool,
}

pub fn draw_frame(layout: &Layout, view: &View) {
    clear_background(PAGE_BG);
    draw_hud(layout, view);
    draw_board(layout, view.state);

    match view.phase {
        Phase::Idle => {
            let hint = if view.touch {
                "Tap to start"
            } else {
                "Press Space or an arrow key to start"
            };
            draw_overlay(layout.board, "SNAKE", hint);
        }
        Phase::Paused => {
            let hint = if view.touch { "Tap to resume" } else { "Press P to resume" };
            draw_overlay(layout.board, "PAUSED", hint);
        }
        Phase::Over => {
            let hint = if view.touch { "Tap to restart" } else { "Press Space to restart" };
            draw_overlay(layout.board, "GAME OVER", hint);
            let line = format!("Score: {}", view.state.score());
            centered(&line, layout.board, layout.board.y + layout.board.h * 0.62, 22.0, TEXT);
        }
        Phase::Running => {}
    }

    if let Some(buttons) = &layout.dpad {
        for (button, r) in buttons {
            draw_dpad_button(*button, *r);
        }
    }
}

fn draw_hud(layout: &Layout, view: &View) {
    let b = layout.board;
    let baseline = HUD_HEIGHT * 0.6;
    draw_text(&format!("Score: {}", view.state.score()), b.x, baseline, 24.0, TEXT);

    let best = format!("Best: {}", view.high_score);
    let m = measure_text(&best, None, 24, 1.0);
    draw_text(&best, b.x + b.w - m.width, baseline, 24.0, SNAKE_BODY);
}

fn draw_board(layout: &Layout, state: &GameState) {
    let b = layout.board;
    draw_rectangle(b.x, b.y, b.w, b.h, BG);

    let grid = state.grid();
    for col in 0..=grid.cols {
        let x = b.x + col as f32 * layout.cell;
        draw_line(x, b.y, x, b.y + grid.rows as f32 * layout.cell, 1.0, GRID_LINE);
    }
    for row in 0..=grid.rows {
        let y = b.y + row as f32 * layout.cell;
        draw_line(b.x, y, b.x + grid.cols as f32 * layout.cell, y, 1.0, GRID_LINE);
    }

    let f = layout.cell_rect(state.food());
    let (fx, fy) = (f.x + f.w * 0.5, f.y + f.h * 0.5);
    draw_circle(fx, fy, layout.cell * 0.8, FOOD_GLOW);
    draw_circle(fx, fy, layout.cell * 0.4, FOOD);

    // Tail first so the head ends up on top.
    for (i, seg) in state.snake().iter().enumerate().rev() {
        let head = i == 0;
        let (pad, radius, color) =
            if head { (1.0, 4.0, SNAKE_HEAD) } else { (2.0, 3.0, SNAKE_BODY) };
        let r = layout.cell_rect(*seg);
        let pad = layout.scale(pad);
        draw_round_rect(
            Area { x: r.x + pad, y: r.y + pad, w: r.w - 2.0 * pad, h: r.h - 2.0 * pad },
            layout.scale(radius),
            color,
        );
    }
}

fn draw_round_rect(r: Area, radius: f32, color: Color) {
    let rad = radius.min(r.w * 0.5).min(r.h * 0.5).max(0.0);
    draw_rectangle(r.x + rad, r.y, r.w - 2.0 * rad, r.h, color);
    draw_rectangle(r.x, r.y + rad, r.w, r.h - 2.0 * rad, color);
    for (cx, cy) in [
        (r.x + rad, r.y + rad),
        (r.x + r.w - rad, r.y + rad),
        (r.x + rad, r.y + r.h - rad),
        (r.x + r.w - rad, r.y + r.h - rad),
    ] {
        draw_circle(cx, cy, rad, color);
    }
}

fn draw_overlay(board: Area, title: &str, hint: &str) {
    draw_rectangle(board.x, board.y, board.w, board.h, OVERLAY_DIM);
    let mid = board.y + board.h * 0.42;
    centered(title, board, mid, 40.0, SNAKE_HEAD);
    centered(hint, board, mid + 36.0, 18.0, TEXT_MUTED);
}

fn centered(text: &str, area: Area, baseline: f32, size: f32, color: Color) {
    let m = measure_text(text, None, size as u16, 1.0);
    draw_text(text, area.x + (area.w - m.width) * 0.5, baseline, size, color);
}

fn draw_dpad_button(button: DpadButton, r: Area) {
    let inset = r.w * 0.06;
    let body = Area { x: r.x + inset, y: r.y + inset, w: r.w - 2.0 * inset, h: r.h - 2.0 * inset };
    draw_round_rect(body, body.w * 0.2, BUTTON);

    let (cx, cy, s) = (r.x + r.w * 0.5, r.y + r.h * 0.5, r.w * 0.22);
    match button {
        DpadButton::Arrow(dir) => {
            let (dx, dy) = dir.delta();
            let (dx, dy) = (dx as f32, dy as f32);
            // Tip along the direction, base perpendicular to it.
            let tip = vec2(cx + dx * s, cy + dy * s);
            let a = vec2(cx - dx * s * 0.6 - dy * s, cy - dy * s * 0.6 + dx * s);
            let b = vec2(cx - dx * s * 0.6 + dy * s, cy - dy * s * 0.6 - dx * s);
            draw_triangle(tip, a, b, TEXT);
        }
        DpadButton::Pause => {
            let w = s * 0.45;
            draw_rectangle(cx - s * 0.6, cy - s, w, 2.0 * s, TEXT);
            draw_rectangle(cx + s * 0.6 - w, cy - s, w, 2.0 * s, TEXT);
        }
    }
}

