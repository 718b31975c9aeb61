//! Wormy integration tests through the public API.

use std::time::Duration;

use arcade_lab::core::{Coord, Direction};
use arcade_lab::games::wormy::{DeathCause, Wormy, WormyConfig, WormyEvent, WormyInput, WormySnapshot};
use arcade_lab::rules::{run_frame, Game, GameStatus, Recorder, Response};

const FRAME: Duration = Duration::from_millis(100);

#[test]
fn test_straight_line_wraps_back_to_start() {
    let config = WormyConfig::default().with_lengths(6, 4);
    let mut game = Wormy::new(config, 17);
    let start = game.player().head().unwrap();

    for _ in 0..32 {
        game.step();
    }

    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.player().head(), Some(start));
}

#[test]
fn test_circling_long_worm_bites_itself() {
    let config = WormyConfig::default().with_lengths(6, 4);
    let mut game = Wormy::new(config, 5);
    let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

    let mut died = None;
    for turn in turns.iter().cycle().take(40) {
        game.turn(*turn);
        let events = game.step();
        if let Some(WormyEvent::Died(cause)) = events.iter().find(|e| matches!(e, WormyEvent::Died(_))) {
            died = Some(*cause);
            break;
        }
    }

    assert_eq!(died, Some(DeathCause::BitSelf));
    assert_eq!(game.status(), GameStatus::GameOver);
}

#[test]
fn test_restart_only_after_game_over() {
    let config = WormyConfig::default().with_lengths(6, 4);
    let mut game = Wormy::new(config, 5);
    assert_eq!(game.handle(WormyInput::Restart), Response::Ignored);

    let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
    for turn in turns.iter().cycle().take(40) {
        game.handle(WormyInput::Turn(*turn));
        game.step();
        if game.is_terminal() {
            break;
        }
    }
    assert!(game.is_terminal());

    // Terminal rounds ignore steering and time
    assert_eq!(game.handle(WormyInput::Turn(Direction::Down)), Response::Ignored);
    assert!(game.tick(Duration::from_secs(1)).is_empty());

    assert_eq!(game.handle(WormyInput::Restart), Response::Accepted);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.player().len(), 6);
    assert_eq!(game.score().total, 0);
    assert_eq!(game.steps(), 0);
}

#[test]
fn test_speed_ramps_on_schedule() {
    let config = WormyConfig::default().with_speed_up_every(Duration::from_secs(1));
    let mut game = Wormy::new(config, 23);
    assert_eq!(game.speed(), 10);

    let mut sink: Recorder<WormySnapshot> = Recorder::new();
    for _ in 0..10 {
        run_frame(&mut game, std::iter::empty::<WormyInput>(), FRAME, &mut sink);
    }

    assert_eq!(game.speed(), 15);
    assert_eq!(game.steps(), 10);
    assert_eq!(sink.frames().len(), 10);
    assert_eq!(sink.last().map(|s| s.speed), Some(15));
}

#[test]
fn test_rival_joins_after_delay() {
    let config = WormyConfig::default().with_rival_delay(Duration::from_millis(500));
    let mut game = Wormy::new(config, 31);

    let mut arrived = false;
    for _ in 0..5 {
        arrived |= game.tick(FRAME).contains(&WormyEvent::RivalArrived);
    }

    assert!(arrived);
    let rival = game.rival().expect("rival should be on the board");
    assert_eq!(rival.len(), 4);
    assert!(rival.body().iter().all(|s| s.within(24, 32)));
}

#[test]
fn test_same_seed_same_game() {
    let inputs = [
        vec![WormyInput::Turn(Direction::Down)],
        vec![],
        vec![WormyInput::Turn(Direction::Left)],
        vec![],
        vec![],
        vec![WormyInput::Turn(Direction::Up)],
    ];

    let play = |seed: u64| {
        let mut game = Wormy::new(WormyConfig::default(), seed);
        let mut sink: Recorder<WormySnapshot> = Recorder::new();
        for _ in 0..50 {
            for frame in &inputs {
                run_frame(&mut game, frame.iter().copied(), FRAME, &mut sink);
            }
        }
        sink.frames().to_vec()
    };

    assert_eq!(play(77), play(77));
    assert_ne!(play(77), play(78));
}

#[test]
fn test_board_stays_on_grid() {
    let mut game = Wormy::new(WormyConfig::default(), 2);
    for i in 0..400 {
        if i % 7 == 0 {
            game.turn(Direction::ALL[i % 4]);
        }
        game.advance(FRAME);
        if game.is_terminal() {
            break;
        }
        let snapshot = game.snapshot();
        let on_grid = |at: &Coord| at.within(24, 32);
        assert!(snapshot.player.iter().all(on_grid));
        assert!(on_grid(&snapshot.red) && on_grid(&snapshot.yellow) && on_grid(&snapshot.blue));
        assert!(snapshot.bonuses.iter().all(|b| on_grid(&b.at)));
    }
}

#[test]
fn test_invalid_config_is_an_error() {
    let config = WormyConfig::default().with_size(8, 8);
    assert!(Wormy::try_new(config, 1).is_err());
}
