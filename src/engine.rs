//! Frame pacing and input capture.
//!
//! One simulation thread owns all game state and ticks once per fixed frame
//! interval; a second thread does nothing but block on keyboard events and
//! set lightweight shared flags.  Each flag has a single writer and a single
//! reader and tolerates one frame of staleness, so relaxed atomics are all
//! the ordering required.  Frame boundaries busy-wait to the deadline: at
//! 20 ms frames, sleep granularity visibly jitters the animation.

use std::hint;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::capabilities::Capabilities;
use crate::game::{Game, InputState, Step};
use crate::options::Options;
use crate::screen::Screen;

#[derive(Default)]
struct Flags {
    fire: AtomicBool,
    left: AtomicBool,
    right: AtomicBool,
    quit: AtomicBool,
    shutdown: AtomicBool,
}

pub struct Engine<'a> {
    caps: &'a Capabilities,
    options: &'a Options,
}

impl<'a> Engine<'a> {
    pub fn new(caps: &'a Capabilities, options: &'a Options) -> Self {
        Engine { caps, options }
    }

    /// Run one complete game: level after level until the player runs out of
    /// lives or asks to quit.  Returns false when the quit was explicit and
    /// the program should exit rather than start a new game.
    pub fn run(&self) -> io::Result<bool> {
        let flags = Arc::new(Flags::default());
        let input_flags = Arc::clone(&flags);
        let input_thread = thread::spawn(move || input_loop(&input_flags));

        let screen = Screen::new(io::stdout(), self.caps, self.options);
        let mut game = Game::new(screen);

        let frame_len = Duration::from_millis(1000 / self.options.fps() as u64);
        let mut game_over = false;
        let mut level = 0;
        while !flags.quit.load(Ordering::Relaxed) && !game_over {
            let mut input = InputState::default();
            drain(&flags);
            game.reset_level()?;

            let mut frame = 0;
            loop {
                if flags.quit.load(Ordering::Relaxed) {
                    break;
                }
                let frame_end = Instant::now() + frame_len;

                latch(&flags, &mut input);
                match game.step(frame, level, &mut input)? {
                    Step::Continue => {}
                    Step::LevelCleared => break,
                    Step::GameOver => {
                        game_over = true;
                        break;
                    }
                }
                game.screen.flush()?;

                while Instant::now() < frame_end {
                    hint::spin_loop();
                }
                frame += 1;
            }
            level += 1;
        }

        flags.shutdown.store(true, Ordering::Relaxed);
        let _ = input_thread.join();
        Ok(!flags.quit.load(Ordering::Relaxed))
    }
}

/// Fold freshly-pressed keys into the frame's input state, clearing the
/// shared flags.  Presses stay latched in `input` until consumed.
fn latch(flags: &Flags, input: &mut InputState) {
    if flags.fire.swap(false, Ordering::Relaxed) {
        input.fire = true;
    }
    if flags.left.swap(false, Ordering::Relaxed) {
        input.left = true;
    }
    if flags.right.swap(false, Ordering::Relaxed) {
        input.right = true;
    }
}

/// Discard any presses queued up before a level starts.
fn drain(flags: &Flags) {
    let _ = flags.fire.swap(false, Ordering::Relaxed);
    let _ = flags.left.swap(false, Ordering::Relaxed);
    let _ = flags.right.swap(false, Ordering::Relaxed);
}

fn input_loop(flags: &Flags) {
    while !flags.shutdown.load(Ordering::Relaxed) && !flags.quit.load(Ordering::Relaxed) {
        // The poll timeout keeps shutdown cooperative: the simulation thread
        // raises the flag and this loop notices within a tick.
        match event::poll(Duration::from_millis(50)) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(_) => break,
        }
        let Ok(ev) = event::read() else { break };
        if let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = ev
        {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char(' ') => flags.fire.store(true, Ordering::Relaxed),
                KeyCode::Left => flags.left.store(true, Ordering::Relaxed),
                KeyCode::Right => flags.right.store(true, Ordering::Relaxed),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    flags.quit.store(true, Ordering::Relaxed)
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    flags.quit.store(true, Ordering::Relaxed)
                }
                _ => {}
            }
        }
    }
}
