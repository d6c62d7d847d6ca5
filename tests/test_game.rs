use term_invaders::capabilities::Capabilities;
use term_invaders::game::{Game, InputState, Step};
use term_invaders::options::Options;
use term_invaders::screen::{OwnerId, Screen};

fn game() -> Game<Vec<u8>> {
    let caps = Capabilities {
        width: 60,
        height: 24,
        has_color: true,
        has_soft_fonts: true,
        has_8bit: false,
    };
    let options = Options {
        mono: false,
        speed: 5,
        yolo: false,
    };
    Game::new(Screen::unpaced(Vec::new(), &caps, &options))
}

#[test]
fn a_level_boots_and_reveals_the_turret() {
    let mut g = game();
    g.reset_level().unwrap();
    let mut input = InputState::default();
    for frame in 0..=200 {
        assert_eq!(g.step(frame, 0, &mut input).unwrap(), Step::Continue);
    }
    // Formation deployed, turret on station, nothing scored yet.
    assert_eq!(g.aliens.remaining(), 55);
    assert_eq!(g.screen.at(22, 5), Some(OwnerId::Turret));
    assert_eq!(g.status.score(), 0);
    assert_eq!(g.status.lives(), 3);
}

#[test]
fn an_unattended_game_descends_to_game_over() {
    let mut g = game();
    g.reset_level().unwrap();
    let mut input = InputState::default();

    let mut saw_drop = false;
    let mut result = Step::Continue;
    let mut frames = 0;
    while result == Step::Continue && frames < 60_000 {
        result = g.step(frames, 0, &mut input).unwrap();
        frames += 1;
        if !saw_drop {
            // The formation starts on row 11; an alien on row 12 proves a
            // boundary sweep reversed and dropped the group with no input.
            saw_drop = (1..=60).any(|x| matches!(g.screen.at(12, x), Some(OwnerId::Alien(_))));
        }
    }
    assert!(saw_drop);
    assert_eq!(result, Step::GameOver);
    assert_eq!(g.status.lives(), 0);
    // Untouched by the player, nothing ever scored.
    assert_eq!(g.status.score(), 0);
}

#[test]
fn clearing_the_formation_ends_the_level() {
    let mut g = game();
    g.reset_level().unwrap();
    let mut input = InputState::default();

    let mut frame = 0;
    for _ in 0..55 {
        assert_eq!(g.step(frame, 0, &mut input).unwrap(), Step::Continue);
        frame += 1;
    }

    // Destroy the formation one alien at a time, letting each 16-frame
    // removal finish so every kill is tallied.
    let mut result = Step::Continue;
    'kills: for id in 0..55 {
        g.aliens.kill(id, &mut g.screen);
        for _ in 0..17 {
            match g.step(frame, 0, &mut input).unwrap() {
                Step::Continue => {}
                other => {
                    result = other;
                    break 'kills;
                }
            }
            frame += 1;
        }
    }
    let mut spare = 0;
    while result == Step::Continue && spare < 300 {
        result = g.step(frame, 0, &mut input).unwrap();
        frame += 1;
        spare += 1;
    }

    assert_eq!(result, Step::LevelCleared);
    assert_eq!(g.aliens.remaining(), 0);
    // 22 front-row aliens at 10, 22 middle at 20, 11 back at 30.
    assert_eq!(g.status.score(), 990);
    assert_eq!(g.status.lives(), 3);
}

#[test]
fn latched_input_moves_and_fires() {
    let mut g = game();
    g.reset_level().unwrap();
    let mut input = InputState::default();
    for frame in 0..=128 {
        g.step(frame, 0, &mut input).unwrap();
    }
    input.right = true;
    input.fire = true;
    g.step(129, 0, &mut input).unwrap();
    // The press was consumed this frame and the turret stepped right.
    assert!(!input.right);
    assert!(!input.fire);
    assert_eq!(g.screen.at(22, 5), None);
    assert_eq!(g.screen.at(22, 8), Some(OwnerId::Turret));
    assert_eq!(g.laser.shots_fired(), 1);
}
