use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::Config;
use crate::game::{Game, Status, TickOutcome};
use crate::term::{Command, Term};

/// Upper bound on how long one pass of the loop waits for input.
const FRAME_BUDGET: Duration = Duration::from_millis(30);

/// Single-threaded driver: polls input, fires `tick()` whenever the current
/// speed interval has elapsed, and keeps the screen in sync. All game
/// mutation happens on this loop.
pub struct App {
    game: Game,
    term: Term,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        Ok(App {
            game: Game::new(config)?,
            term: Term::new(config.width, config.height),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.play();
        // Leave the terminal usable even when the loop errored out
        let restored = self.term.restore();
        result.and(restored)
    }

    fn play(&mut self) -> Result<()> {
        self.term.draw_board(&self.game)?;
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "P to pause, R to restart",
            "Q to quit",
            "",
            "Press any key to begin",
        ])?;
        if self.term.wait_any_key()? {
            return Ok(());
        }
        self.term.draw_board(&self.game)?;

        let mut last_tick = Instant::now();

        loop {
            for command in self.term.poll_commands(FRAME_BUDGET)? {
                match command {
                    Command::Quit => return Ok(()),
                    Command::Steer(dir) => self.game.set_direction(dir),
                    Command::TogglePause => self.toggle_pause(&mut last_tick)?,
                    Command::Reset => {
                        self.game.reset();
                        self.term.draw_board(&self.game)?;
                        last_tick = Instant::now();
                    }
                }
            }

            if self.game.status() == Status::Running && last_tick.elapsed() >= self.game.speed() {
                last_tick = Instant::now();
                let outcome = self.game.tick();
                if outcome == TickOutcome::Died {
                    self.game_over()?;
                } else {
                    self.term.draw_tick(&self.game, outcome)?;
                }
            }
        }
    }

    fn toggle_pause(&mut self, last_tick: &mut Instant) -> Result<()> {
        self.game.toggle_pause();
        match self.game.status() {
            Status::Paused => {
                self.term.show_message(&["Paused", "", "Press P to resume"])?;
            }
            Status::Running => {
                self.term.draw_board(&self.game)?;
                *last_tick = Instant::now();
            }
            Status::GameOver => {}
        }
        Ok(())
    }

    fn game_over(&mut self) -> Result<()> {
        self.term.draw_dead_snake(&self.game)?;

        let score_line = format!(
            "Score: {}   High score: {}",
            self.game.score(),
            self.game.score().max(self.game.high_score()),
        );
        self.term.show_message(&[
            "Game over!",
            &score_line,
            "",
            "Press R to play again,",
            "or Q to quit",
        ])?;
        Ok(())
    }
}
