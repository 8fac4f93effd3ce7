use std::time::{Duration, Instant};

/// Per-session play statistics, in memory only.
///
/// The clock runs from game start and freezes on game over, so the
/// scoreboard shows how long the finished game took.
pub struct SessionStats {
    started: Instant,
    finished: Option<Instant>,
    high_score: u32,
    games_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            finished: None,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn on_game_start(&mut self) {
        self.started = Instant::now();
        self.finished = None;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.finished = Some(Instant::now());
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn elapsed(&self) -> Duration {
        let end = self.finished.unwrap_or_else(Instant::now);
        end.duration_since(self.started)
    }

    /// Elapsed time as an `MM:SS` clock.
    pub fn clock(&self) -> String {
        let total_secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
