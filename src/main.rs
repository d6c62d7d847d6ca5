use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use term_invaders::capabilities::{check_compatibility, Capabilities};
use term_invaders::engine::Engine;
use term_invaders::options::Options;

const TITLE: &str = "TERM INVADERS";

fn main() -> ExitCode {
    let options = Options::parse();
    let caps = Capabilities::detect();
    if let Err(error) = check_compatibility(&caps, &options) {
        println!("{error}");
        return ExitCode::FAILURE;
    }
    match run(&caps, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(caps: &Capabilities, options: &Options) -> anyhow::Result<()> {
    let mut out = io::stdout();

    enable_raw_mode().context("failed to switch the terminal into raw mode")?;
    // Window title, default attributes, cleared screen, hidden cursor,
    // autowrap off, status line hidden.
    write!(out, "\x1b]21;term_invaders\x1b\\\x1b[m\x1b[2J\x1b[?25l\x1b[?7l\x1b[0$~")?;
    let result = title_banner(&mut out, caps)
        .map_err(anyhow::Error::from)
        .and_then(|()| play(caps, options));

    // Restore the terminal: title cleared, attributes reset, screen cleared,
    // autowrap and cursor back on.
    let _ = write!(out, "\x1b]21;\x1b\\\x1b[m\x1b[H\x1b[J\x1b[?7h\x1b[?25h");
    let _ = out.flush();
    let _ = disable_raw_mode();
    result
}

fn play(caps: &Capabilities, options: &Options) -> anyhow::Result<()> {
    loop {
        let engine = Engine::new(caps, options);
        if !engine.run().context("the game loop failed")? {
            return Ok(());
        }
    }
}

fn title_banner(out: &mut impl Write, caps: &Capabilities) -> io::Result<()> {
    let y = (caps.height + 1) / 2;
    let x = (caps.width - TITLE.len() as i32 * 2 + 2) / 4 + 1;
    write!(out, "\x1b[{y};{x}H\x1b#6{TITLE}")?;
    out.flush()?;
    thread::sleep(Duration::from_secs(3));
    // MLTerm doesn't reset double-width lines correctly, so the banner row
    // is manually restored before the game starts.
    write!(out, "\x1b[2K\x1b#5")?;
    Ok(())
}
