use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable game parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cells per side of the square board.
    pub grid_size: usize,
    /// Snake length right after a reset.
    pub initial_length: usize,
    /// Logic updates per second.
    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_length: 3,
            ticks_per_second: 10,
        }
    }
}

impl GameConfig {
    /// Configuration with a custom board size.
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Small board used by tests.
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Time between two logic updates.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.ticks_per_second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.ticks_per_second, 10);
    }

    #[test]
    fn test_tick_interval() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(100));

        let slow = GameConfig {
            ticks_per_second: 4,
            ..Default::default()
        };
        assert_eq!(slow.tick_interval(), Duration::from_millis(250));
    }
}
