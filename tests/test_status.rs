use term_invaders::capabilities::Capabilities;
use term_invaders::options::Options;
use term_invaders::screen::Screen;
use term_invaders::status::Status;

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

#[test]
fn starts_with_three_lives_and_no_score() {
    let st = Status::new();
    assert_eq!(st.score(), 0);
    assert_eq!(st.lives(), 3);
}

#[test]
fn crossing_1500_grants_exactly_one_life() {
    let mut s = screen();
    let mut st = Status::new();
    st.add_to_score(1500, &mut s);
    assert_eq!(st.lives(), 4);
    st.add_to_score(1500, &mut s);
    assert_eq!(st.lives(), 4);
}

#[test]
fn small_increments_grant_the_life_on_the_crossing() {
    let mut s = screen();
    let mut st = Status::new();
    st.add_to_score(1000, &mut s);
    assert_eq!(st.lives(), 3);
    st.add_to_score(499, &mut s);
    assert_eq!(st.lives(), 3);
    st.add_to_score(1, &mut s);
    assert_eq!(st.lives(), 4);
    st.add_to_score(5000, &mut s);
    assert_eq!(st.lives(), 4);
}

#[test]
fn one_big_jump_is_still_one_life() {
    let mut s = screen();
    let mut st = Status::new();
    st.add_to_score(2000, &mut s);
    assert_eq!(st.lives(), 4);
}

#[test]
fn displayed_score_wraps_at_10000() {
    let mut s = screen();
    let mut st = Status::new();
    st.add_to_score(9999, &mut s);
    s.flush().unwrap();
    let _ = std::mem::take(s.writer_mut());
    st.add_to_score(2347, &mut s);
    assert_eq!(st.score(), 12346);
    s.flush().unwrap();
    let out = std::mem::take(s.writer_mut());
    assert!(contains(&out, b"2346"));
}

#[test]
fn losing_one_life_continues_play() {
    let mut s = screen();
    let mut st = Status::new();
    assert!(!st.lose_life(false, &mut s).unwrap());
    assert_eq!(st.lives(), 2);
}

#[test]
fn losing_all_lives_plays_game_over() {
    let mut s = screen();
    let mut st = Status::new();
    assert!(st.lose_life(true, &mut s).unwrap());
    assert_eq!(st.lives(), 0);
    s.flush().unwrap();
    let out = std::mem::take(s.writer_mut());
    assert!(contains(&out, b"GAME OVER"));
}
