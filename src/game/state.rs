use rand::rngs::ThreadRng;
use rand::Rng;

use super::config::GameConfig;
use super::direction::Direction;

/// A grid coordinate, in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// What ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// The head left the board.
    Wall,
    /// The head ran into the body.
    Body,
}

/// What a single `advance` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Game already over, nothing moved.
    Idle,
    /// The snake moved one cell.
    Moved,
    /// The snake moved onto the food and grew.
    Ate,
    /// The move collided and the game is now over.
    Died(Collision),
}

/// The full state of one play session.
///
/// Created and re-armed by [`reset`](GameState::reset), moved exactly one
/// cell per [`advance`](GameState::advance). Input only ever touches the
/// pending-direction slot, which `advance` consumes once per tick.
pub struct GameState {
    config: GameConfig,
    /// Body cells, head first. Never empty.
    snake: Vec<Cell>,
    /// Direction travelled on the last tick.
    direction: Direction,
    /// Direction requested for the next tick, latest valid request wins.
    pending: Option<Direction>,
    food: Cell,
    score: u32,
    ticks: u32,
    game_over: bool,
    rng: ThreadRng,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let mut state = Self {
            config,
            snake: Vec::new(),
            direction: Direction::Right,
            pending: None,
            food: Cell::new(0, 0),
            score: 0,
            ticks: 0,
            game_over: false,
            rng: rand::thread_rng(),
        };
        state.reset();
        state
    }

    /// Rebuilds the starting position: snake laid out on the top row with
    /// the head rightmost, heading right, fresh food, zero score.
    pub fn reset(&mut self) {
        let length = self.config.initial_length as i32;
        self.snake.clear();
        for i in 0..length {
            self.snake.push(Cell::new(length - 1 - i, 0));
        }
        self.direction = Direction::Right;
        self.pending = None;
        self.score = 0;
        self.ticks = 0;
        self.game_over = false;
        self.food = self.roll_food();
    }

    /// Moves the snake one cell. No-op once the game is over.
    ///
    /// The collision check runs before the food check, so a move that is
    /// both out of bounds and onto food ends the game rather than scoring.
    pub fn advance(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Idle;
        }

        if let Some(requested) = self.pending.take() {
            self.direction = requested;
        }

        let next = self.head().step(self.direction);

        if !self.in_bounds(next) {
            self.game_over = true;
            return TickOutcome::Died(Collision::Wall);
        }
        if self.snake.contains(&next) {
            self.game_over = true;
            return TickOutcome::Died(Collision::Body);
        }

        self.snake.insert(0, next);
        self.ticks += 1;

        if next == self.food {
            self.score += 1;
            self.food = self.roll_food();
            TickOutcome::Ate
        } else {
            self.snake.pop();
            TickOutcome::Moved
        }
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Body cells, head first.
    pub fn cells(&self) -> &[Cell] {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub(crate) fn set_pending(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> Option<Direction> {
        self.pending
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        let size = self.config.grid_size as i32;
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    /// Uniform over the whole board; the roll does not exclude cells the
    /// snake occupies, so food can appear under the body.
    fn roll_food(&mut self) -> Cell {
        let size = self.config.grid_size as i32;
        Cell::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_on_grid(grid_size: usize) -> GameState {
        GameState::new(GameConfig::new(grid_size))
    }

    #[test]
    fn test_cell_step() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.step(Direction::Right), Cell::new(6, 5));
        assert_eq!(cell.step(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.step(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.step(Direction::Down), Cell::new(5, 6));
    }

    #[test]
    fn test_reset_layout() {
        let state = state_on_grid(20);
        assert_eq!(
            state.cells(),
            &[Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)]
        );
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert!(!state.game_over());
    }

    #[test]
    fn test_reset_recovers_from_mid_game() {
        let mut state = state_on_grid(20);
        state.snake = vec![Cell::new(7, 7), Cell::new(6, 7)];
        state.direction = Direction::Down;
        state.pending = Some(Direction::Left);
        state.score = 12;
        state.game_over = true;

        state.reset();

        assert_eq!(
            state.cells(),
            &[Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)]
        );
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.pending(), None);
        assert_eq!(state.score(), 0);
        assert!(!state.game_over());
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut state = state_on_grid(20);
        state.food = Cell::new(10, 10);

        let outcome = state.advance();

        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(
            state.cells(),
            &[Cell::new(3, 0), Cell::new(2, 0), Cell::new(1, 0)]
        );
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = state_on_grid(20);
        state.food = Cell::new(3, 0);

        let outcome = state.advance();

        assert_eq!(outcome, TickOutcome::Ate);
        assert_eq!(state.score(), 1);
        assert_eq!(state.cells().len(), 4);
        assert_eq!(state.head(), Cell::new(3, 0));
        // Fresh food lands somewhere on the board, possibly under the body.
        assert!(state.in_bounds(state.food()));
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut state = state_on_grid(20);
        state.snake = vec![Cell::new(19, 0), Cell::new(18, 0), Cell::new(17, 0)];
        state.food = Cell::new(10, 10);

        let outcome = state.advance();

        assert_eq!(outcome, TickOutcome::Died(Collision::Wall));
        assert!(state.game_over());
        assert_eq!(
            state.cells(),
            &[Cell::new(19, 0), Cell::new(18, 0), Cell::new(17, 0)]
        );
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut state = state_on_grid(20);
        state.snake = vec![
            Cell::new(5, 5),
            Cell::new(4, 5),
            Cell::new(3, 5),
            Cell::new(2, 5),
        ];
        state.direction = Direction::Right;
        state.food = Cell::new(15, 15);

        // Loop back into the third body segment.
        state.advance();
        state.set_pending(Direction::Down);
        state.advance();
        state.set_pending(Direction::Left);
        state.advance();
        state.set_pending(Direction::Up);
        let outcome = state.advance();

        assert_eq!(outcome, TickOutcome::Died(Collision::Body));
        assert!(state.game_over());
        assert_eq!(state.head(), Cell::new(5, 6));
        assert_eq!(state.cells().len(), 4);
    }

    #[test]
    fn test_advance_is_noop_after_game_over() {
        let mut state = state_on_grid(20);
        state.game_over = true;
        let snake_before = state.snake.clone();
        let food_before = state.food;

        let outcome = state.advance();

        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(state.snake, snake_before);
        assert_eq!(state.food, food_before);
        assert_eq!(state.score(), 0);
        assert_eq!(state.ticks(), 0);
    }

    #[test]
    fn test_pending_direction_consumed_once() {
        let mut state = state_on_grid(20);
        state.food = Cell::new(15, 15);
        state.set_pending(Direction::Down);

        state.advance();
        assert_eq!(state.direction(), Direction::Down);
        assert_eq!(state.pending(), None);

        // With the slot empty the snake keeps its heading.
        state.advance();
        assert_eq!(state.direction(), Direction::Down);
        assert_eq!(state.head(), Cell::new(2, 2));
    }

    #[test]
    fn test_collision_beats_food() {
        // Food sits outside the board in the cell the head would enter.
        let mut state = state_on_grid(20);
        state.snake = vec![Cell::new(19, 0), Cell::new(18, 0), Cell::new(17, 0)];
        state.food = Cell::new(20, 0);

        let outcome = state.advance();

        assert_eq!(outcome, TickOutcome::Died(Collision::Wall));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_ticks_count_moves_only() {
        let mut state = state_on_grid(20);
        state.food = Cell::new(10, 10);

        state.advance();
        state.advance();
        assert_eq!(state.ticks(), 2);

        state.game_over = true;
        state.advance();
        assert_eq!(state.ticks(), 2);
    }
}
