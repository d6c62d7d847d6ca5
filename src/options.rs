//! Command-line surface.

use clap::Parser;

const DEFAULT_SPEED: u32 = 5;

#[derive(Parser, Debug)]
#[command(name = "term_invaders", about = "Space Invaders for DEC-compatible terminals")]
pub struct Options {
    /// No coloring
    #[arg(long)]
    pub mono: bool,

    /// Set initial speed (1 to 10)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SPEED, value_parser = parse_speed)]
    pub speed: u32,

    /// Bypass compatibility checks
    #[arg(long)]
    pub yolo: bool,
}

impl Options {
    pub fn color(&self) -> bool {
        !self.mono
    }

    /// Frame rate: the speed setting scaled by 10, kept within 1 to 100.
    pub fn fps(&self) -> i32 {
        (self.speed.saturating_mul(10) as i32).clamp(1, 100)
    }
}

// A malformed speed silently falls back to the default rather than aborting.
fn parse_speed(value: &str) -> Result<u32, String> {
    Ok(value.parse().unwrap_or(DEFAULT_SPEED))
}
