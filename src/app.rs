use std::io::{stderr, Stderr};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GameState, TickOutcome};
use crate::input::{InputAction, InputRouter};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// Frames per second for drawing; game logic ticks at its own, slower rate.
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Which surface currently covers the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    GameOver,
}

/// Owns the game state and the surfaces around it, and drives both from a
/// single select loop: logic ticks, render frames, and input events all
/// interleave on one task.
pub struct App {
    state: GameState,
    router: InputRouter,
    stats: SessionStats,
    renderer: Renderer,
    screen: Screen,
    tick_interval: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            state: GameState::new(config),
            router: InputRouter::new(),
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            screen: Screen::Start,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut events = EventStream::new();
        let mut tick_timer = interval(self.tick_interval);
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // The tick timer keeps firing after game over; advance()
                // is a no-op until a restart.
                _ = tick_timer.tick() => {
                    self.tick();
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.screen, &self.state, &self.stats);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = self.router.key_action(key);

        if action == InputAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Start => {
                if action == InputAction::Confirm {
                    self.start_game();
                }
            }
            Screen::Playing => match action {
                InputAction::Steer(direction) => self.router.steer(&mut self.state, direction),
                InputAction::Restart => self.start_game(),
                _ => {}
            },
            Screen::GameOver => {
                if matches!(action, InputAction::Confirm | InputAction::Restart) {
                    self.start_game();
                }
            }
        }
    }

    /// A press on the board steers like a swipe: the drag vector runs from
    /// the snake's head to the pressed cell.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Playing {
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(cell) = self.renderer.cell_at(mouse.column, mouse.row) {
            let head = self.state.head();
            self.router
                .swipe(&mut self.state, cell.x - head.x, cell.y - head.y);
        }
    }

    fn tick(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }

        match self.state.advance() {
            TickOutcome::Died(collision) => {
                self.stats.on_game_over(self.state.score());
                self.screen = Screen::GameOver;
                info!(
                    score = self.state.score(),
                    ?collision,
                    games = self.stats.games_played(),
                    "game over"
                );
            }
            TickOutcome::Ate => {
                debug!(score = self.state.score(), "food eaten");
            }
            TickOutcome::Moved | TickOutcome::Idle => {}
        }
    }

    fn start_game(&mut self) {
        self.state.reset();
        self.stats.on_game_start();
        self.screen = Screen::Playing;
        debug!("game started");
    }

    fn restore_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_starts_on_start_screen() {
        let app = App::new(GameConfig::default());
        assert_eq!(app.screen, Screen::Start);
        assert_eq!(app.state.score(), 0);
    }

    #[test]
    fn test_confirm_starts_game() {
        let mut app = App::new(GameConfig::default());
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.screen, Screen::Playing);
    }

    #[test]
    fn test_steering_ignored_on_start_screen() {
        let mut app = App::new(GameConfig::default());
        app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(app.screen, Screen::Start);
        assert_eq!(app.state.pending(), None);
    }

    #[test]
    fn test_running_into_wall_shows_game_over() {
        // On a 5-cell board the snake starts at x = 2 and meets the wall on
        // the third tick.
        let mut app = App::new(GameConfig::new(5));
        app.start_game();

        for _ in 0..3 {
            app.tick();
        }

        assert_eq!(app.screen, Screen::GameOver);
        assert!(app.state.game_over());
        assert_eq!(app.stats.games_played(), 1);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut app = App::new(GameConfig::new(5));
        app.start_game();
        for _ in 0..3 {
            app.tick();
        }
        assert_eq!(app.screen, Screen::GameOver);

        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));

        assert_eq!(app.screen, Screen::Playing);
        assert_eq!(app.state.score(), 0);
        assert!(!app.state.game_over());
    }

    #[test]
    fn test_ticks_do_nothing_on_menu_screens() {
        let mut app = App::new(GameConfig::default());
        let head = app.state.head();

        app.tick();

        assert_eq!(app.state.head(), head);
        assert_eq!(app.state.ticks(), 0);
    }

    #[test]
    fn test_quit_key_sets_flag() {
        let mut app = App::new(GameConfig::default());
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }
}
