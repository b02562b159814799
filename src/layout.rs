use crate::grid::{Cell, Direction, Grid};

pub const HUD_HEIGHT: f32 = 56.0;
pub const MIN_BOARD_PX: f32 = 200.0;
const SIDE_MARGIN: f32 = 24.0;
const RESERVED_DESKTOP: f32 = 120.0;
const RESERVED_TOUCH: f32 = 280.0;
const DPAD_GAP: f32 = 16.0;

/// Logical cell size the sprite proportions are defined against.
pub const LOGICAL_CELL: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpadButton {
    Arrow(Direction),
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.w && py < self.y + self.h
    }
}

/// Screen placement of the board and the optional d-pad.
#[derive(Debug, Clone)]
pub struct Layout {
    pub board: Rect,
    pub cell: f32,
    pub dpad: Option<[(DpadButton, Rect); 5]>,
}

impl Layout {
    /// Square board, as large as the screen allows, capped at `max_board`.
    pub fn compute(screen_w: f32, screen_h: f32, grid: Grid, max_board: f32, touch: bool) -> Self {
        let reserved = if touch { RESERVED_TOUCH } else { RESERVED_DESKTOP };
        let side = (screen_w - SIDE_MARGIN)
            .min(max_board)
            .min(screen_h - reserved)
            .floor()
            .max(MIN_BOARD_PX);
        let board = Rect { x: ((screen_w - side) * 0.5).max(0.0), y: HUD_HEIGHT, w: side, h: side };
        let cell = side / grid.cols.max(grid.rows).max(1) as f32;

        let dpad = touch.then(|| {
            let pad = ((screen_h - board.y - side - 2.0 * DPAD_GAP) / 3.0).clamp(36.0, 64.0);
            let cx = board.x + side * 0.5;
            let top = board.y + side + DPAD_GAP;
            let at = |col: f32, row: f32| Rect {
                x: cx + (col - 1.5) * pad,
                y: top + row * pad,
                w: pad,
                h: pad,
            };
            [
                (DpadButton::Arrow(Direction::Up), at(1.0, 0.0)),
                (DpadButton::Arrow(Direction::Left), at(0.0, 1.0)),
                (DpadButton::Pause, at(1.0, 1.0)),
                (DpadButton::Arrow(Direction::Right), at(2.0, 1.0)),
                (DpadButton::Arrow(Direction::Down), at(1.0, 2.0)),
            ]
        });

        Self { board, cell, dpad }
    }

    pub fn board_contains(&self, x: f32, y: f32) -> bool {
        self.board.contains(x, y)
    }

    pub fn dpad_hit(&self, x: f32, y: f32) -> Option<DpadButton> {
        self.dpad.as_ref()?.iter().find(|(_, r)| r.contains(x, y)).map(|(b, _)| *b)
    }

    pub fn cell_rect(&self, c: Cell) -> Rect {
        Rect {
            x: self.board.x + c.x as f32 * self.cell,
            y: self.board.y + c.y as f32 * self.cell,
            w: self.cell,
            h: self.cell,
        }
    }

    /// Converts a length given in logical 20 px cell units to screen pixels.
    pub fn scale(&self, logical: f32) -> f32 {
        logical * self.cell / LOGICAL_CELL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: Grid = Grid::new(20, 20);

    #[test]
    fn test_desktop_board_capped() {
        let l = Layout::compute(1920.0, 1080.0, GRID, 640.0, false);
        assert_eq!(l.board.w, 640.0);
        assert_eq!(l.board.h, 640.0);
        assert_eq!(l.cell, 32.0);
        assert_eq!(l.board.x, 640.0);
        assert!(l.dpad.is_none());
        assert_eq!(l.dpad_hit(960.0, 900.0), None);
    }

    #[test]
    fn test_small_screen_floors_at_minimum() {
        let l = Layout::compute(150.0, 150.0, GRID, 640.0, true);
        assert_eq!(l.board.w, MIN_BOARD_PX);
        assert_eq!(l.cell, 10.0);
    }

    #[test]
    fn test_phone_board_reserves_dpad_space() {
        let l = Layout::compute(400.0, 800.0, GRID, 640.0, true);
        assert_eq!(l.board.w, 376.0);
        let l = Layout::compute(400.0, 500.0, GRID, 640.0, true);
        assert_eq!(l.board.w, 220.0);
    }

    #[test]
    fn test_dpad_hit_testing() {
        let l = Layout::compute(400.0, 800.0, GRID, 640.0, true);
        let buttons = l.dpad.expect("touch layout has a d-pad");
        for (button, rect) in buttons {
            let (mx, my) = (rect.x + rect.w * 0.5, rect.y + rect.h * 0.5);
            assert_eq!(l.dpad_hit(mx, my), Some(button));
            assert!(!l.board_contains(mx, my));
        }
        assert_eq!(l.dpad_hit(0.0, 0.0), None);
    }

    #[test]
    fn test_cell_rect() {
        let l = Layout::compute(1920.0, 1080.0, GRID, 640.0, false);
        let r = l.cell_rect(Cell::new(2, 3));
        assert_eq!(r, Rect { x: 640.0 + 64.0, y: HUD_HEIGHT + 96.0, w: 32.0, h: 32.0 });
        assert!(l.board_contains(r.x + 1.0, r.y + 1.0));
        assert_eq!(l.scale(LOGICAL_CELL), 32.0);
    }
}
