//! The bonus target that periodically crosses the top of the screen.

use std::io::Write;

use crate::screen::{Color, OwnerId, Screen, WIDTH};

/// Row the bonus target travels along.
pub const ROW: i32 = 2;

const UFO_SPRITE: &str = "/JL\\";
const EXPLOSION_SPRITE: &str = "'BP`";

const LEFT_BOUNDARY: i32 = 4;
const RIGHT_BOUNDARY: i32 = WIDTH - 6;

// First appearance around 35 seconds in, then every 25 seconds.
const FIRST_FRAME: i32 = 35 * 60;
const INTERVAL: i32 = 25 * 60;

const POSSIBLE_POINTS: [i32; 15] = [
    100, 50, 50, 100, 150, 100, 100, 50, 300, 100, 100, 100, 50, 150, 100,
];

pub struct Ufo {
    x: i32,
    y: i32,
    x_delta: i32,
    active: bool,
    dead: bool,
    disabled: bool,
    death_frame: i32,
    points_earned: i32,
}

impl Ufo {
    pub fn new() -> Self {
        Ufo {
            x: 0,
            y: 0,
            x_delta: 1,
            active: false,
            dead: false,
            disabled: false,
            death_frame: 0,
            points_earned: 0,
        }
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.dead = false;
        self.disabled = false;
    }

    /// Advance the bonus target and return any points to credit this frame.
    /// Points are only reported at the score reveal, 21 frames after the
    /// kill, never on the kill frame itself.
    pub fn update<W: Write>(&mut self, frame: i32, shots_fired: i32, screen: &mut Screen<W>) -> i32 {
        if self.dead {
            if self.active {
                // The score is revealed in double-width text, so a 3-digit
                // value spans 6 columns and a 2-digit value 4.  The sprite
                // itself is 4 columns wide; when the current column parity
                // would misalign the digits, take one extra step in the
                // direction of travel.
                if (self.points_earned >= 100) != (self.x % 2 == 0) {
                    self.x += self.x_delta;
                }
                screen.clear_line(self.y);
                screen.write(self.y, self.x, EXPLOSION_SPRITE, Color::Red, None);
                self.death_frame = frame;
                self.active = false;
            } else if frame == self.death_frame + 21 {
                screen.clear_line(self.y);
                screen.double_width(self.y);
                let points = self.points_earned.to_string();
                screen.write(self.y, (self.x + 1) / 2, &points, Color::Red, None);
                return self.points_earned;
            } else if frame == self.death_frame + 93 {
                screen.clear_line(self.y);
                screen.single_width(self.y);
                self.dead = false;
            }
        } else if self.active {
            if frame % 5 == 0 {
                self.x += self.x_delta;
                if self.x < LEFT_BOUNDARY || self.x > RIGHT_BOUNDARY {
                    self.active = false;
                    screen.write(self.y, self.x - self.x_delta, "    ", Color::Any, None);
                } else if self.x_delta < 0 {
                    screen.write(self.y, self.x, UFO_SPRITE, Color::Red, Some(OwnerId::Ufo));
                    screen.write_char(self.y, self.x + 4, ' ', Color::Any, None);
                } else {
                    screen.write_char(self.y, self.x - 1, ' ', Color::Any, None);
                    screen.write(self.y, self.x, UFO_SPRITE, Color::Red, Some(OwnerId::Ufo));
                }
            }
        } else if frame >= FIRST_FRAME && (frame - FIRST_FRAME) % INTERVAL == 0 && !self.disabled {
            // Entry side alternates with the number of shots fired so far.
            let left_to_right = shots_fired % 2 == 0;
            self.active = true;
            self.dead = false;
            self.y = ROW;
            self.x = if left_to_right { LEFT_BOUNDARY } else { RIGHT_BOUNDARY };
            self.x_delta = if left_to_right { 1 } else { -1 };
            screen.write(self.y, self.x, UFO_SPRITE, Color::Red, Some(OwnerId::Ufo));
        }
        0
    }

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn kill(&mut self, shots_fired: i32) {
        if self.active && !self.dead {
            let index = (shots_fired % POSSIBLE_POINTS.len() as i32) as usize;
            self.points_earned = POSSIBLE_POINTS[index];
            self.dead = true;
        }
    }
}
