//! Terminal capability collaborator.
//!
//! The game only ever reads these values; full DA negotiation belongs to the
//! terminal layer, so detection here is the conservative best effort that a
//! startup check needs: real dimensions from the terminal, everything else
//! inferred from the environment.

use thiserror::Error;

use crate::options::Options;
use crate::screen::{HEIGHT, WIDTH};

// Terminal families known to implement DECDLD soft fonts.
const SOFT_FONT_TERMS: [&str; 8] = [
    "vt320", "vt340", "vt382", "vt420", "vt520", "xterm", "mlterm", "wezterm",
];

pub struct Capabilities {
    pub width: i32,
    pub height: i32,
    pub has_color: bool,
    pub has_soft_fonts: bool,
    /// Whether single-byte C1 controls may be sent instead of ESC pairs.
    pub has_8bit: bool,
}

impl Capabilities {
    pub fn detect() -> Self {
        let (width, height) = crossterm::terminal::size()
            .map(|(w, h)| (w as i32, h as i32))
            .unwrap_or((80, 24));
        let term = std::env::var("TERM").unwrap_or_default();
        let has_color = std::env::var_os("COLORTERM").is_some()
            || term.contains("color")
            || term.starts_with("xterm");
        let has_soft_fonts = SOFT_FONT_TERMS.iter().any(|t| term.starts_with(t));
        Capabilities {
            width,
            height,
            has_color,
            has_soft_fonts,
            has_8bit: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum CompatibilityError {
    #[error(
        "term_invaders requires a VT320-compatible terminal or better.\n\
         Try 'term_invaders --yolo' to bypass the compatibility checks."
    )]
    SoftFontsUnsupported,
    #[error("term_invaders requires a minimum screen height of {0}.")]
    ScreenTooShort(i32),
    #[error("term_invaders requires a minimum screen width of {0}.")]
    ScreenTooNarrow(i32),
}

/// Verify the terminal can host the game at all.  Runs before any game state
/// is constructed; a failure is reported to the user and exits cleanly.
pub fn check_compatibility(
    caps: &Capabilities,
    options: &Options,
) -> Result<(), CompatibilityError> {
    if !caps.has_soft_fonts && !options.yolo {
        return Err(CompatibilityError::SoftFontsUnsupported);
    }
    if caps.height < HEIGHT {
        return Err(CompatibilityError::ScreenTooShort(HEIGHT));
    }
    if caps.width < WIDTH {
        return Err(CompatibilityError::ScreenTooNarrow(WIDTH));
    }
    Ok(())
}
