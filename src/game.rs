use std::collections::VecDeque;

use tracing::trace;

use crate::config::GameConfig;
use crate::grid::{Cell, Direction, Grid};

/// Source of candidate food cells.
pub trait FoodSpawner {
    fn pick(&mut self, grid: Grid) -> Cell;
}

/// Uniform picks from macroquad's global generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSpawner;

impl FoodSpawner for RandomSpawner {
    fn pick(&mut self, grid: Grid) -> Cell {
        Cell {
            x: macroquad::rand::gen_range(0, grid.cols),
            y: macroquad::rand::gen_range(0, grid.rows),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Crashed(Collision),
}

/// Everything that changes during one game.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    snake: VecDeque<Cell>,
    direction: Direction,
    next_direction: Direction,
    food: Cell,
    score: u32,
    speed_ms: u32,
}

impl GameState {
    pub fn new(config: &GameConfig, spawner: &mut impl FoodSpawner) -> Self {
        let grid = config.grid();
        Self::with_snake(config, [grid.center()], Direction::Right, spawner)
    }

    /// Builds a state around an explicit body (head first) and heading.
    /// `body` must not be empty.
    pub(crate) fn with_snake(
        config: &GameConfig,
        body: impl IntoIterator<Item = Cell>,
        heading: Direction,
        spawner: &mut impl FoodSpawner,
    ) -> Self {
        let grid = config.grid();
        let snake: VecDeque<Cell> = body.into_iter().collect();
        assert!(!snake.is_empty(), "snake needs at least one cell");
        let food = place_food(grid, &snake, spawner);
        Self {
            grid,
            snake,
            direction: heading,
            next_direction: heading,
            food,
            score: 0,
            speed_ms: config.initial_speed_ms,
        }
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Cell) {
        self.food = food;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Queues `dir` for the next tick unless it reverses the applied heading.
    /// Later requests overwrite earlier ones between ticks.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.direction.is_opposite(dir) {
            return false;
        }
        self.next_direction = dir;
        true
    }

    pub fn tick(&mut self, config: &GameConfig, spawner: &mut impl FoodSpawner) -> TickOutcome {
        self.direction = self.next_direction;
        let new_head = self.head().step(self.direction);

        if !self.grid.contains(new_head) {
            return TickOutcome::Crashed(Collision::Wall);
        }
        if self.snake.contains(&new_head) {
            return TickOutcome::Crashed(Collision::Body);
        }

        self.snake.push_front(new_head);

        if new_head == self.food {
            self.score += 1;
            self.speed_ms = config.speed_for(self.score);
            self.food = place_food(self.grid, &self.snake, spawner);
            trace!(score = self.score, speed_ms = self.speed_ms, "food eaten");
            TickOutcome::Ate
        } else {
            self.snake.pop_back();
            TickOutcome::Moved
        }
    }
}

/// Rejection-samples a cell outside the snake. Does not terminate if the
/// snake covers the whole grid.
fn place_food(grid: Grid, snake: &VecDeque<Cell>, spawner: &mut impl FoodSpawner) -> Cell {
    loop {
        let cell = spawner.pick(grid);
        if !snake.contains(&cell) {
            return cell;
        }
    }
}
