use std::time::Duration;

use anyhow::{ensure, Result};

/// Rule-set parameters for a game.
///
/// The board margin and the speed curve are configuration rather than
/// constants: both historical rule sets are reachable from here. The default
/// is the classic set (margin 0, 150 ms start, 80 ms floor); `--margin 1`
/// together with a 120/60/3 ms curve gives the stricter two-cell-border set.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Grid width in cells, outer wall included.
    pub width: i16,
    /// Grid height in cells, outer wall included.
    pub height: i16,
    /// Interior rings beyond the outer wall that also count as wall.
    pub margin: i16,
    /// Time per tick at the start of a game.
    pub initial_speed: Duration,
    /// Fastest the difficulty ramp may reach.
    pub speed_floor: Duration,
    /// Speed-up applied on every food eaten.
    pub speed_decrement: Duration,
    /// Fixed RNG seed for food placement; `None` seeds from the OS.
    pub seed: Option<u64>,
}

pub const INITIAL_SNAKE_LENGTH: i16 = 3;
pub const FOOD_SCORE: u32 = 10;

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 50,
            height: 20,
            margin: 0,
            initial_speed: Duration::from_millis(150),
            speed_floor: Duration::from_millis(80),
            speed_decrement: Duration::from_millis(5),
            seed: None,
        }
    }
}

impl Config {
    /// Checks that the grid leaves room for the initial snake and at least
    /// one interior cell for food.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.margin >= 0, "margin must not be negative");

        let interior_w = self.width - 2 * (self.margin + 1);
        let interior_h = self.height - 2 * (self.margin + 1);
        ensure!(
            interior_w >= INITIAL_SNAKE_LENGTH + 2 && interior_h >= 3,
            "board {}x{} with margin {} is too small to play on",
            self.width,
            self.height,
            self.margin,
        );

        ensure!(
            self.speed_floor <= self.initial_speed,
            "speed floor exceeds the initial speed"
        );
        Ok(())
    }

    /// First playable row/column index.
    pub fn interior_min(&self) -> i16 {
        self.margin + 1
    }

    /// Last playable row index.
    pub fn interior_max_row(&self) -> i16 {
        self.height - 2 - self.margin
    }

    /// Last playable column index.
    pub fn interior_max_col(&self) -> i16 {
        self.width - 2 - self.margin
    }
}
