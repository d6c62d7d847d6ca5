//! Occupancy/render surface: all terminal output flows through here.
//!
//! The surface owns a 60×24 grid of owner tags used for collision queries,
//! and turns every write into the cheapest control sequence it can find:
//! cursor motion is emitted as a delta from the last known position, picking
//! between absolute addressing, relative CSI moves, and the one-byte
//! RI / vertical-tab / backspace forms.  Redundant color changes are
//! suppressed, and everything is queued in a buffer that the caller flushes
//! once per frame.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::capabilities::Capabilities;
use crate::options::Options;
use crate::{shields, ufo};

/// Play-field width in columns.
pub const WIDTH: i32 = 60;
/// Play-field height in rows.
pub const HEIGHT: i32 = 24;

/// Foreground colors used by the game.  `Any` leaves the current color
/// untouched.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    Any,
    White,
    Red,
    Green,
}

/// Tag identifying which entity currently occupies a cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OwnerId {
    /// A living alien, by formation index (0–54).
    Alien(usize),
    /// The explosion sprite left while a killed alien is being removed.
    AlienExplosion,
    Missile,
    Turret,
    Shield,
    Ufo,
}

/// The fixed color banding of the play field: the bonus-target row at the
/// top is red, everything from just above the shields down is green.
pub fn color_for_row(y: i32) -> Color {
    if y <= ufo::ROW {
        Color::Red
    } else if y >= shields::ROW - 1 {
        Color::Green
    } else {
        Color::White
    }
}

pub struct Screen<W: Write> {
    out: W,
    using_colors: bool,
    frame_len: Duration,
    paced: bool,
    // C1 controls have one-byte forms on terminals that accept 8-bit input.
    ri: &'static [u8],
    csi: &'static [u8],
    y_indent: i32,
    x_indent: i32,
    last_y: i32,
    last_x: i32,
    last_color: Color,
    ids: Vec<Option<OwnerId>>,
    wide: [bool; HEIGHT as usize],
    buffer: Vec<u8>,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, caps: &Capabilities, options: &Options) -> Self {
        let (ri, csi): (&'static [u8], &'static [u8]) = if caps.has_8bit {
            (&[0x8d], &[0x9b])
        } else {
            (b"\x1bM", b"\x1b[")
        };
        Screen {
            out,
            using_colors: options.color() && caps.has_color,
            frame_len: Duration::from_millis(1000 / options.fps() as u64),
            paced: true,
            ri,
            csi,
            y_indent: ((caps.height - HEIGHT) / 2).max(0),
            x_indent: ((caps.width - WIDTH) / 4 * 2).max(0),
            last_y: -1,
            last_x: -1,
            last_color: Color::Any,
            ids: vec![None; (WIDTH * HEIGHT) as usize],
            wide: [false; HEIGHT as usize],
            buffer: Vec::with_capacity(256),
        }
    }

    /// A surface whose `pause` never sleeps.  Used by automated runs that
    /// drive thousands of frames against an in-memory writer.
    pub fn unpaced(out: W, caps: &Capabilities, options: &Options) -> Self {
        let mut screen = Screen::new(out, caps, options);
        screen.paced = false;
        screen
    }

    /// Forget everything: ownership grid, line widths, cursor and color
    /// caches.  Parks the cursor at the bottom of the play field and erases
    /// everything above it, leaving the status row alone.
    pub fn reset(&mut self) -> io::Result<()> {
        self.ids.fill(None);
        self.wide = [false; HEIGHT as usize];
        self.last_y = -1;
        self.last_x = -1;
        self.last_color = Color::Any;
        self.sgr(Color::White);
        self.push(self.csi);
        self.push_number(self.y_indent + HEIGHT - 1);
        self.push(b";999H");
        self.push(self.csi);
        self.push(b"1J");
        self.pause(1)
    }

    pub fn clear_line(&mut self, y: i32) {
        self.cup(y, 1);
        self.push(self.csi);
        self.push(b"K");
    }

    // DECDWL/DECSWL only exist as 7-bit escapes, so these bypass `csi`.

    pub fn double_width(&mut self, y: i32) {
        self.cup(y, 1);
        self.push(b"\x1b#6");
        self.wide[(y - 1) as usize] = true;
    }

    pub fn single_width(&mut self, y: i32) {
        self.cup(y, 1);
        self.push(b"\x1b#5");
        self.wide[(y - 1) as usize] = false;
    }

    /// Continuation write at the current cursor position.  Leaves the
    /// ownership grid untouched.
    pub fn append(&mut self, c: char) {
        self.push_char(c);
        self.last_x += 1;
    }

    pub fn write_char(&mut self, y: i32, x: i32, c: char, color: Color, id: Option<OwnerId>) {
        let offset = Self::offset(y, x);
        self.sgr(color);
        self.cup(y, x);
        self.push_char(c);
        self.last_x += 1;
        self.ids[offset] = if is_blank(c) { None } else { id };
    }

    pub fn write(&mut self, y: i32, x: i32, text: &str, color: Color, id: Option<OwnerId>) {
        let mut offset = Self::offset(y, x);
        self.sgr(color);
        self.cup(y, x);
        for c in text.chars() {
            self.push_char(c);
            self.last_x += 1;
            self.ids[offset] = if is_blank(c) { None } else { id };
            offset += 1;
        }
    }

    /// Flush the queue and hold the picture for a number of frames.  The
    /// staged reveals (shields, status row, game over) are built on this.
    pub fn pause(&mut self, frames: i32) -> io::Result<()> {
        self.flush()?;
        if self.paced && frames > 0 {
            thread::sleep(self.frame_len * frames as u32);
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            self.out.write_all(&self.buffer)?;
            self.out.flush()?;
            self.buffer.clear();
        }
        Ok(())
    }

    /// Collision query: the owner of a cell, or `None` for empty cells and
    /// anything outside the play field.
    pub fn at(&self, y: i32, x: i32) -> Option<OwnerId> {
        if y < 1 || y > HEIGHT || x < 1 || x > WIDTH {
            return None;
        }
        self.ids[Self::offset(y, x)]
    }

    /// Direct access to the underlying writer, for inspecting emitted bytes.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn sgr(&mut self, color: Color) {
        if self.using_colors && color != Color::Any && color != self.last_color {
            self.last_color = color;
            self.push(self.csi);
            match color {
                Color::White => self.push(b"m"),
                Color::Red => self.push(b"31m"),
                Color::Green => self.push(b"32m"),
                Color::Any => {}
            }
        }
    }

    fn cup(&mut self, y: i32, x: i32) {
        let wide = self.wide[(y - 1) as usize];
        let abs_y = y + self.y_indent;
        let abs_x = x + if wide { self.x_indent >> 1 } else { self.x_indent };
        let unknown = self.last_y == -1 || self.last_x == -1;
        let diff_y = if unknown { 9999 } else { abs_y - self.last_y };
        let diff_x = if unknown { 9999 } else { abs_x - self.last_x };
        if diff_y != 0 || diff_x != 0 {
            if diff_y.abs() > 2 && diff_x.abs() > 2 {
                self.push(self.csi);
                self.push_number(abs_y);
                self.push(b";");
                self.push_number(abs_x);
                self.push(b"H");
            } else {
                // When moving off a double-width row, the vertical step must
                // come first or the horizontal movement may be clamped to the
                // shorter line.  Off a normal row it is the other way round:
                // moving vertically first can clamp the x coordinate on the
                // target row before it gets repositioned.
                let last_y_index = self.last_y - self.y_indent - 1;
                let last_was_wide = last_y_index >= 0
                    && self
                        .wide
                        .get(last_y_index as usize)
                        .copied()
                        .unwrap_or(false);
                if last_was_wide {
                    self.move_y_relative(diff_y);
                    self.move_x_relative(diff_x);
                } else {
                    self.move_x_relative(diff_x);
                    self.move_y_relative(diff_y);
                }
            }
            self.last_y = abs_y;
            self.last_x = abs_x;
        }
    }

    fn move_y_relative(&mut self, diff_y: i32) {
        if diff_y == -1 {
            self.push(self.ri);
        } else if diff_y == -2 {
            self.push(self.ri);
            self.push(self.ri);
        } else if diff_y == 1 {
            self.push(b"\x0b");
        } else if diff_y == 2 {
            self.push(b"\x0b\x0b");
        } else if diff_y > 0 {
            self.push(self.csi);
            self.push_number(diff_y);
            self.push(b"B");
        } else if diff_y < 0 {
            self.push(self.csi);
            self.push_number(-diff_y);
            self.push(b"A");
        }
    }

    fn move_x_relative(&mut self, diff_x: i32) {
        if diff_x == -1 {
            self.push(b"\x08");
        } else if diff_x == -2 {
            self.push(b"\x08\x08");
        } else if diff_x == 1 {
            self.push(self.csi);
            self.push(b"C");
        } else if diff_x > 0 {
            self.push(self.csi);
            self.push_number(diff_x);
            self.push(b"C");
        } else if diff_x < 0 {
            self.push(self.csi);
            self.push_number(-diff_x);
            self.push(b"D");
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn push_char(&mut self, c: char) {
        let mut encoded = [0u8; 4];
        self.buffer
            .extend_from_slice(c.encode_utf8(&mut encoded).as_bytes());
    }

    fn push_number(&mut self, n: i32) {
        self.buffer.extend_from_slice(n.to_string().as_bytes());
    }

    fn offset(y: i32, x: i32) -> usize {
        ((y - 1) * WIDTH + (x - 1)) as usize
    }
}

// The `y` is part of a destroyed shield sprite that is effectively blank for
// the purposes of collision detection.
fn is_blank(c: char) -> bool {
    c == ' ' || c == 'y'
}
