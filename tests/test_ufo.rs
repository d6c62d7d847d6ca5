use term_invaders::capabilities::Capabilities;
use term_invaders::options::Options;
use term_invaders::screen::{OwnerId, Screen};
use term_invaders::ufo::Ufo;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn screen() -> Screen<Vec<u8>> {
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
    Screen::unpaced(Vec::new(), &caps, &options)
}

// Run the clock forward to the first spawn frame with a fixed shot count.
fn spawn(ufo: &mut Ufo, s: &mut Screen<Vec<u8>>, shots: i32) {
    for frame in 0..=2100 {
        assert_eq!(ufo.update(frame, shots, s), 0);
    }
}

#[test]
fn first_spawn_enters_from_the_left_on_even_shots() {
    let mut s = screen();
    let mut u = Ufo::new();
    u.reset();
    spawn(&mut u, &mut s, 0);
    assert_eq!(s.at(2, 4), Some(OwnerId::Ufo));
    assert_eq!(s.at(2, 7), Some(OwnerId::Ufo));
}

#[test]
fn odd_shot_counts_enter_from_the_right() {
    let mut s = screen();
    let mut u = Ufo::new();
    u.reset();
    spawn(&mut u, &mut s, 1);
    assert_eq!(s.at(2, 54), Some(OwnerId::Ufo));
    assert_eq!(s.at(2, 57), Some(OwnerId::Ufo));
}

#[test]
fn moves_every_fifth_frame() {
    let mut s = screen();
    let mut u = Ufo::new();
    u.reset();
    spawn(&mut u, &mut s, 0);
    for frame in 2101..=2104 {
        u.update(frame, 0, &mut s);
        assert_eq!(s.at(2, 4), Some(OwnerId::Ufo));
    }
    u.update(2105, 0, &mut s);
    assert_eq!(s.at(2, 4), None);
    assert_eq!(s.at(2, 8), Some(OwnerId::Ufo));
}

#[test]
fn disable_suppresses_spawning() {
    let mut s = screen();
    let mut u = Ufo::new();
    u.reset();
    u.disable();
    spawn(&mut u, &mut s, 0);
    for x in 1..=60 {
        assert_eq!(s.at(2, x), None);
    }
}

#[test]
fn kill_before_spawn_does_nothing() {
    let mut s = screen();
    let mut u = Ufo::new();
    u.reset();
    u.kill(8);
    spawn(&mut u, &mut s, 8);
    // Still alive and roaming.
    assert_eq!(s.at(2, 4), Some(OwnerId::Ufo));
}

#[test]
fn award_300_at_eight_shots_revealed_21_frames_after_death() {
    let mut s = screen();
    let mut u = Ufo::new();
    u.reset();
    spawn(&mut u, &mut s, 8);
    u.kill(8);

    // Explosion frame: still no points.
    assert_eq!(u.update(2101, 8, &mut s), 0);
    assert_eq!(s.at(2, 4), None);
    for frame in 2102..=2121 {
        assert_eq!(u.update(frame, 8, &mut s), 0);
    }
    // The reveal credits the score, in double-width digits.
    s.flush().unwrap();
    let _ = std::mem::take(s.writer_mut());
    assert_eq!(u.update(2122, 8, &mut s), 300);
    s.flush().unwrap();
    let out = std::mem::take(s.writer_mut());
    assert!(contains(&out, b"300"));
    assert!(contains(&out, b"\x1b#6"));
}

#[test]
fn fifteen_shots_wraps_the_points_table() {
    let mut s = screen();
    let mut u = Ufo::new();
    u.reset();
    spawn(&mut u, &mut s, 15);
    u.kill(15);
    u.update(2101, 15, &mut s);
    for frame in 2102..=2121 {
        u.update(frame, 15, &mut s);
    }
    assert_eq!(u.update(2122, 15, &mut s), 100);
}

#[test]
fn row_resets_and_respawn_is_rescheduled() {
    let mut s = screen();
    let mut u = Ufo::new();
    u.reset();
    spawn(&mut u, &mut s, 8);
    u.kill(8);
    for frame in 2101..=3599 {
        u.update(frame, 8, &mut s);
    }
    // 93 frames after death the row went back to single width; the next
    // scheduled appearance is 1500 frames after the first.
    assert_eq!(s.at(2, 4), None);
    u.update(3600, 8, &mut s);
    assert_eq!(s.at(2, 4), Some(OwnerId::Ufo));
}
