//! Drives a seeded game through a full play / die / reset cycle using only
//! the public core API, checking state at each step.

use std::time::Duration;

use termsnake::config::Config;
use termsnake::game::{Game, Status, TickOutcome};
use termsnake::snake::{Direction, Position};

fn small_board() -> Config {
    Config {
        width: 12,
        height: 8,
        margin: 0,
        initial_speed: Duration::from_millis(150),
        speed_floor: Duration::from_millis(80),
        speed_decrement: Duration::from_millis(5),
        seed: Some(1234),
    }
}

#[test]
fn full_session_with_reset() {
    let mut game = Game::new(small_board()).unwrap();

    // Initial layout: 3 segments centered, heading right
    assert_eq!(game.status(), Status::Running);
    assert_eq!(game.snake().head(), Position::new(4, 6));
    assert_eq!(game.snake().len(), 3);
    assert!(!game.snake().contains(game.food()));

    // Steer and tick, chasing the food greedily. When the food sits exactly
    // behind the head (where the reversal guard blocks the direct turn),
    // sidestep perpendicular to the heading, away from the nearer wall.
    let cfg = small_board();
    let mut ate = 0;
    for _ in 0..200 {
        if game.status() != Status::Running {
            break;
        }
        let head = game.snake().head();
        let food = game.food();
        let heading = game.direction();

        let mut candidates = vec![];
        if food.row < head.row {
            candidates.push(Direction::Up);
        }
        if food.row > head.row {
            candidates.push(Direction::Down);
        }
        if food.col < head.col {
            candidates.push(Direction::Left);
        }
        if food.col > head.col {
            candidates.push(Direction::Right);
        }
        let wanted = candidates
            .into_iter()
            .find(|&d| d != heading.opposite())
            .unwrap_or(match heading {
                Direction::Left | Direction::Right => {
                    if head.row > cfg.height / 2 {
                        Direction::Up
                    } else {
                        Direction::Down
                    }
                }
                Direction::Up | Direction::Down => {
                    if head.col > cfg.width / 2 {
                        Direction::Left
                    } else {
                        Direction::Right
                    }
                }
            });
        game.set_direction(wanted);

        let len_before = game.snake().len();
        let score_before = game.score();
        let speed_before = game.speed();

        match game.tick() {
            TickOutcome::Ate => {
                ate += 1;
                assert_eq!(game.score(), score_before + 10);
                assert_eq!(game.snake().len(), len_before + 1);
                assert!(game.speed() <= speed_before);
                assert!(game.speed() >= game.config().speed_floor);
                assert!(!game.snake().contains(game.food()));
            }
            TickOutcome::Moved { .. } => {
                assert_eq!(game.snake().len(), len_before);
                assert_eq!(game.score(), score_before);
            }
            TickOutcome::Died => {
                assert_eq!(game.status(), Status::GameOver);
            }
            TickOutcome::Idle => unreachable!("loop only ticks while running"),
        }
    }
    assert!(ate >= 2, "the chaser should reach the food at least twice");

    let final_score = game.score();
    assert!(final_score >= 20);

    // A reset keeps only the best score and restores the opening layout
    game.reset();
    assert_eq!(game.status(), Status::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.high_score(), final_score);
    assert_eq!(game.speed(), game.config().initial_speed);
    assert_eq!(game.snake().head(), Position::new(4, 6));
    assert_eq!(game.snake().len(), 3);
}

#[test]
fn identical_seeds_replay_identically() {
    let mut a = Game::new(small_board()).unwrap();
    let mut b = Game::new(small_board()).unwrap();

    for _ in 0..5 {
        assert_eq!(a.food(), b.food());
        a.set_direction(Direction::Down);
        b.set_direction(Direction::Down);
        assert_eq!(a.tick(), b.tick());
        assert_eq!(a.snake().head(), b.snake().head());
    }
}
