use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GameState};

/// What a raw input event asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Request a new travel direction.
    Steer(Direction),
    /// Enter or Space, starts a game from a menu surface.
    Confirm,
    Restart,
    Quit,
    None,
}

/// Normalizes keys and pointer drags into the four-way direction contract.
///
/// Steering writes the pending-direction slot on [`GameState`]; requests
/// that would reverse the snake onto itself are dropped silently, and later
/// valid requests within one tick overwrite earlier ones.
pub struct InputRouter;

impl InputRouter {
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to its action. Unrecognized keys map to `None`.
    pub fn key_action(&self, key: KeyEvent) -> InputAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                InputAction::Steer(Direction::Up)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                InputAction::Steer(Direction::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                InputAction::Steer(Direction::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                InputAction::Steer(Direction::Right)
            }
            KeyCode::Enter | KeyCode::Char(' ') => InputAction::Confirm,
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
            _ => InputAction::None,
        }
    }

    /// Records `candidate` for the next tick unless it would reverse the
    /// direction travelled on the last tick.
    pub fn steer(&self, state: &mut GameState, candidate: Direction) {
        if !candidate.is_opposite(state.direction()) {
            state.set_pending(candidate);
        }
    }

    /// Routes a pointer-drag vector, measured from the snake's head to the
    /// pressed cell, through the same steering contract as keys.
    pub fn swipe(&self, state: &mut GameState, dx: i32, dy: i32) {
        if let Some(direction) = Self::resolve_swipe(dx, dy) {
            self.steer(state, direction);
        }
    }

    /// Picks the dominant axis of a drag vector, then the sign along it.
    /// Ties go to the horizontal axis; a zero vector resolves to nothing.
    pub fn resolve_swipe(dx: i32, dy: i32) -> Option<Direction> {
        if dx == 0 && dy == 0 {
            return None;
        }
        let direction = if dx.abs() >= dy.abs() {
            if dx > 0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(direction)
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}
