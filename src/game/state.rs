use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use super::action::Direction;
use super::config::BASE_SPEED;
use super::effects::ActiveEffects;
use super::power_up::PowerUp;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold the position back onto a `width` x `height` torus
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Position>,
    /// Direction committed on the most recent tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_back(head);

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for _ in 1..length {
            let prev = body[body.len() - 1];
            body.push_back(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells(cells: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        let body: VecDeque<Position> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if position is occupied by any segment, head and tail included
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    /// Drop the tail segment, never emptying the snake
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// True if any cell appears twice
    pub fn overlaps_itself(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        !self.body.iter().all(|pos| seen.insert(*pos))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Static cosmetic value per cell, regenerated on every reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl DecorationGrid {
    /// All-zero grid
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Build from row-major values; short input is zero-padded
    pub fn from_values(width: usize, height: usize, values: impl IntoIterator<Item = u8>) -> Self {
        let mut cells: Vec<u8> = values.into_iter().take(width * height).collect();
        cells.resize(width * height, 0);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            0
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub power_ups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub level: u32,
    /// Tick rate before effects are applied
    pub base_speed: u32,
    /// Tick rate to schedule the next tick at
    pub current_speed: u32,
    pub steps: u32,
    pub phase: Phase,
    /// Set when food was eaten so the tail survives this tick
    pub grow_pending: bool,
    pub decorations: DecorationGrid,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            power_ups: Vec::new(),
            effects: ActiveEffects::new(),
            grid_width,
            grid_height,
            score: 0,
            level: 1,
            base_speed: BASE_SPEED,
            current_speed: BASE_SPEED,
            steps: 0,
            phase: Phase::Running,
            grow_pending: false,
            decorations: DecorationGrid::blank(grid_width, grid_height),
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    pub fn has_power_up_at(&self, pos: Position) -> bool {
        self.power_ups.iter().any(|p| p.position == pos)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_position_wrapping() {
        assert_eq!(Position::new(10, 3).wrapped(10, 10), Position::new(0, 3));
        assert_eq!(Position::new(-1, 3).wrapped(10, 10), Position::new(9, 3));
        assert_eq!(Position::new(4, -1).wrapped(10, 8), Position::new(4, 7));
        assert_eq!(Position::new(4, 8).wrapped(10, 8), Position::new(4, 0));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_push_and_pop() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 2);
        snake.push_head(Position::new(6, 5));
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.pop_tail(), Some(Position::new(4, 5)));
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_pop_never_empties() {
        let mut snake = Snake::new(Position::new(1, 1), Direction::Up, 1);
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.contains(Position::new(5, 5)));
        assert!(snake.contains(Position::new(3, 5)));
        assert!(!snake.contains(Position::new(10, 10)));
    }

    #[test]
    fn test_overlap_detection() {
        let clean = Snake::new(Position::new(5, 5), Direction::Right, 4);
        assert!(!clean.overlaps_itself());

        let tangled = Snake::from_cells(
            [Position::new(1, 1), Position::new(2, 1), Position::new(1, 1)],
            Direction::Left,
        );
        assert!(tangled.overlaps_itself());
    }

    #[test]
    fn test_decoration_grid_lookup() {
        let grid = DecorationGrid::from_values(3, 2, [1, 2, 3, 4, 5]);
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(2, 0), 3);
        assert_eq!(grid.get(1, 1), 5);
        // Padded and out-of-range cells read as zero
        assert_eq!(grid.get(2, 1), 0);
        assert_eq!(grid.get(7, 7), 0);
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            Position::new(1, 1),
            20,
            20,
        );
        assert_eq!(state.level, 1);
        assert_eq!(state.base_speed, BASE_SPEED);
        assert_eq!(state.phase, Phase::Running);
        assert!(state.power_ups.is_empty());
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
    }
}
