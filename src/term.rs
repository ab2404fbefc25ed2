use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::game::{Game, TickOutcome};
use crate::snake::{Direction, Position};

const WALL_CHAR: char = '█';
const HEAD_CHAR: char = '●';
const BODY_CHAR: char = '○';
const FOOD_CHAR: char = '★';
const DEAD_CHAR: char = 'X';

const WALL_COLOR: Color = Color::DarkBlue;
const HEAD_COLOR: Color = Color::Green;
const BODY_COLOR: Color = Color::DarkGreen;
const FOOD_COLOR: Color = Color::Yellow;
const DEAD_COLOR: Color = Color::Red;

/// What the player asked for, decoupled from the key map.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Reset,
    Quit,
}

/// Terminal front end: raw-mode setup, key polling, and board drawing.
///
/// The board occupies the top-left `width x height` cells; the score line
/// and the key help sit right below it.
pub struct Term {
    stdout: Stdout,
    width: i16,
    height: i16,
}

impl Term {
    pub fn new(width: i16, height: i16) -> Self {
        Term { stdout: stdout(), width, height }
    }

    pub fn setup(&mut self) -> Result<()> {
        let (cols, rows) = terminal::size().context("could not read the terminal size")?;
        ensure!(
            cols as i16 >= self.width && rows as i16 >= self.height + 2,
            "terminal is {}x{}, but the board needs {}x{}",
            cols,
            rows,
            self.width,
            self.height + 2,
        );

        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Waits up to `wait` for the first key, then drains whatever else is
    /// already queued so held-down keys cannot lag the game.
    pub fn poll_commands(&mut self, wait: Duration) -> Result<Vec<Command>> {
        let mut commands = vec![];
        let mut timeout = wait;

        while poll(timeout)? {
            timeout = Duration::from_millis(0);
            if let Event::Key(ev) = read()? {
                if let Some(cmd) = key_to_command(&ev) {
                    commands.push(cmd);
                }
            }
        }

        Ok(commands)
    }

    /// Blocks until any key is pressed; reports whether it was a quit key.
    pub fn wait_any_key(&mut self) -> Result<bool> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(key_to_command(&ev) == Some(Command::Quit));
            }
        }
    }

    /// Repaints the whole board from the game state.
    pub fn draw_board(&mut self, game: &Game) -> Result<()> {
        execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;

        queue!(self.stdout, SetForegroundColor(WALL_COLOR))?;
        for row in 0..self.height {
            for col in 0..self.width {
                if row == 0 || row == self.height - 1 || col == 0 || col == self.width - 1 {
                    self.put(Position::new(row, col), WALL_CHAR)?;
                }
            }
        }

        queue!(self.stdout, SetForegroundColor(BODY_COLOR))?;
        for pos in game.snake().segments().skip(1) {
            self.put(*pos, BODY_CHAR)?;
        }
        queue!(self.stdout, SetForegroundColor(HEAD_COLOR))?;
        self.put(game.snake().head(), HEAD_CHAR)?;

        queue!(self.stdout, SetForegroundColor(FOOD_COLOR))?;
        self.put(game.food(), FOOD_CHAR)?;
        queue!(self.stdout, ResetColor)?;

        self.draw_score(game)?;
        let help_row = self.height as u16 + 1;
        queue!(
            self.stdout,
            cursor::MoveTo(0, help_row),
            Print("Arrows/WASD move | P pause | R restart | Q quit"),
        )?;

        self.stdout.flush()?;
        Ok(())
    }

    /// Repaints only the cells a tick touched. Falls back to a score
    /// refresh when the snake grew, since the food moved too.
    pub fn draw_tick(&mut self, game: &Game, outcome: TickOutcome) -> Result<()> {
        match outcome {
            TickOutcome::Idle | TickOutcome::Died => return Ok(()),
            TickOutcome::Moved { vacated } => {
                self.put(vacated, ' ')?;
            }
            TickOutcome::Ate => {
                queue!(self.stdout, SetForegroundColor(FOOD_COLOR))?;
                self.put(game.food(), FOOD_CHAR)?;
            }
        }

        // New head, and the old head demoted to a body segment
        queue!(self.stdout, SetForegroundColor(BODY_COLOR))?;
        if let Some(neck) = game.snake().segments().nth(1) {
            self.put(*neck, BODY_CHAR)?;
        }
        queue!(self.stdout, SetForegroundColor(HEAD_COLOR))?;
        self.put(game.snake().head(), HEAD_CHAR)?;
        queue!(self.stdout, ResetColor)?;

        if outcome == TickOutcome::Ate {
            self.draw_score(game)?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    /// Marks the whole snake as dead.
    pub fn draw_dead_snake(&mut self, game: &Game) -> Result<()> {
        queue!(self.stdout, SetForegroundColor(DEAD_COLOR))?;
        for pos in game.snake().segments() {
            self.put(*pos, DEAD_CHAR)?;
        }
        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Draws a centered boxed message over the board. Cleared by the next
    /// `draw_board`.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
        let msg_height = lines.len() + 2;
        let left = (self.width as usize).saturating_sub(msg_width) / 2;
        let top = (self.height as usize).saturating_sub(msg_height) / 2;

        let blank = " ".repeat(msg_width);
        queue!(
            self.stdout,
            cursor::MoveTo(left as u16, top as u16),
            Print(&blank),
        )?;
        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{: ^width$}", line, width = msg_width);
            queue!(
                self.stdout,
                cursor::MoveTo(left as u16, (top + 1 + i) as u16),
                Print(padded),
            )?;
        }
        queue!(
            self.stdout,
            cursor::MoveTo(left as u16, (top + 1 + lines.len()) as u16),
            Print(&blank),
        )?;

        self.stdout.flush()?;
        Ok(())
    }

    fn draw_score(&mut self, game: &Game) -> Result<()> {
        let line = format!(
            "Score: {}   High score: {}   Length: {}",
            game.score(),
            game.high_score(),
            game.snake().len(),
        );
        let score_row = self.height as u16;
        queue!(
            self.stdout,
            cursor::MoveTo(0, score_row),
            terminal::Clear(terminal::ClearType::CurrentLine),
            Print(line),
        )?;
        Ok(())
    }

    fn put(&mut self, pos: Position, ch: char) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.col as u16, pos.row as u16),
            Print(ch),
        )?;
        Ok(())
    }
}

fn key_to_command(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Steer(Direction::Right)),
        KeyCode::Char('p') | KeyCode::Esc => Some(Command::TogglePause),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_map_to_steering() {
        let ev = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(key_to_command(&ev), Some(Command::Steer(Direction::Up)));

        let ev = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(key_to_command(&ev), Some(Command::Steer(Direction::Left)));
    }

    #[test]
    fn ctrl_c_quits_regardless_of_key_map() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_command(&ev), Some(Command::Quit));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let ev = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(key_to_command(&ev), None);
    }
}
