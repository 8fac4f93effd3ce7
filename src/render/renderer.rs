use ratatui::{
    layout::{Alignment, Constraint, Direction as Axis, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::Screen;
use crate::game::{Cell, GameState};
use crate::metrics::SessionStats;

/// Read-only view over the game state: a stats header, the board (or the
/// start / game-over surface in its place), and a controls footer.
pub struct Renderer {
    /// Inner area of the board drawn on the last frame; empty while a menu
    /// surface covers the board. Pointer presses are mapped through this.
    board_area: Rect,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            board_area: Rect::default(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        screen: Screen,
        state: &GameState,
        stats: &SessionStats,
    ) {
        self.board_area = Rect::default();

        let chunks = Layout::default()
            .direction(Axis::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(self.header(state, stats), chunks[0]);

        match screen {
            Screen::Start => {
                let area = centered(chunks[1], 44, 9);
                frame.render_widget(self.start_panel(), area);
            }
            Screen::Playing => {
                let size = state.grid_size() as u16;
                let area = centered(chunks[1], size * 2 + 2, size + 2);
                self.board_area = inner(area);
                frame.render_widget(self.board(state), area);
            }
            Screen::GameOver => {
                let area = centered(chunks[1], 44, 9);
                frame.render_widget(self.game_over_panel(state, stats), area);
            }
        }

        frame.render_widget(self.footer(screen), chunks[2]);
    }

    /// Maps a terminal coordinate to the board cell under it, if the last
    /// frame drew the board there. Cells are two columns wide.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Cell> {
        let area = self.board_area;
        let in_board = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !in_board {
            return None;
        }
        Some(Cell::new(
            i32::from((column - area.x) / 2),
            i32::from(row - area.y),
        ))
    }

    fn board(&self, state: &GameState) -> Paragraph<'_> {
        let size = state.grid_size() as i32;
        let head = state.head();
        let mut lines = Vec::with_capacity(size as usize);

        for y in 0..size {
            let mut spans = Vec::with_capacity(size as usize);
            for x in 0..size {
                let cell = Cell::new(x, y);
                // Food is drawn over the body when a roll lands under it.
                let span = if cell == state.food() {
                    Span::styled("██", Style::default().fg(Color::Red))
                } else if cell == head {
                    Span::styled(
                        "██",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.cells().contains(&cell) {
                    Span::styled("██", Style::default().fg(Color::Green))
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" snake "),
        )
    }

    fn header(&self, state: &GameState, stats: &SessionStats) -> Paragraph<'_> {
        let line = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                stats.high_score().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                stats.games_played().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.clock(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }

    fn start_panel(&self) -> Paragraph<'static> {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Steer with arrows or WASD,",
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                "or click the board to swipe",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn game_over_panel(&self, state: &GameState, stats: &SessionStats) -> Paragraph<'_> {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("High: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    stats.high_score().to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn footer(&self, screen: Screen) -> Paragraph<'static> {
        let line = match screen {
            Screen::Playing => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to steer | click to swipe | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Screen::Start | Screen::GameOver => Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" to play | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// `area` shrunk by its one-cell border.
fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}
