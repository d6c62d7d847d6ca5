//! The player's laser turret and its single outgoing shot.

use std::io::Write;

use crate::screen::{color_for_row, Color, OwnerId, Screen, WIDTH};

/// Row the turret sits on.
pub const ROW: i32 = 22;

const LEFT_BOUNDARY: i32 = 5;
const RIGHT_BOUNDARY: i32 = WIDTH - 5;

const TURRET_SPRITE: &str = "-^=";
const LASER_SPRITES: [char; 3] = ['|', '!', '@'];
const EXPLOSION_SPRITES: [&str; 2] = ["BFP", "QHK"];
const EXPLOSION_FRAME_COUNT: i32 = 55;

pub struct Turret {
    x: i32,
    y: i32,
    dead: bool,
    explosion_frame: i32,
}

impl Turret {
    pub fn new() -> Self {
        Turret {
            x: 0,
            y: 0,
            dead: false,
            explosion_frame: 0,
        }
    }

    pub fn reset(&mut self) {
        self.y = ROW;
        self.x = LEFT_BOUNDARY;
        self.dead = false;
    }

    pub fn reveal<W: Write>(&self, screen: &mut Screen<W>) {
        self.render(screen);
    }

    pub fn move_left<W: Write>(&mut self, screen: &mut Screen<W>) {
        if self.x > LEFT_BOUNDARY {
            self.x -= 1;
            self.render(screen);
            screen.write_char(self.y, self.x + 3, ' ', Color::Any, None);
        }
    }

    pub fn move_right<W: Write>(&mut self, screen: &mut Screen<W>) {
        if self.x + 1 < RIGHT_BOUNDARY {
            screen.write_char(self.y, self.x, ' ', Color::Any, None);
            self.x += 1;
            self.render(screen);
        }
    }

    pub fn hit(&mut self) {
        if !self.dead {
            self.dead = true;
            self.explosion_frame = 0;
        }
    }

    /// Advance the explosion animation by one frame.  Two sprites alternate
    /// every 5 frames; the wreck is erased on the terminating frame, and
    /// only then does this report completion.
    pub fn render_explosion<W: Write>(&mut self, screen: &mut Screen<W>) -> bool {
        if self.explosion_frame % 5 == 0 && self.explosion_frame < EXPLOSION_FRAME_COUNT {
            let sprite = EXPLOSION_SPRITES[(self.explosion_frame / 5 % 2) as usize];
            screen.write(self.y, self.x, sprite, Color::Green, Some(OwnerId::Turret));
        } else if self.explosion_frame == EXPLOSION_FRAME_COUNT {
            screen.write(self.y, self.x, "   ", Color::Any, None);
        }
        let done = self.explosion_frame == EXPLOSION_FRAME_COUNT;
        self.explosion_frame += 1;
        done
    }

    pub fn exploding(&self) -> bool {
        self.dead
    }

    /// Center column of the 3-cell sprite.
    pub fn x(&self) -> i32 {
        self.x + 1
    }

    fn render<W: Write>(&self, screen: &mut Screen<W>) {
        screen.write(self.y, self.x, TURRET_SPRITE, Color::Green, Some(OwnerId::Turret));
    }
}

pub struct Laser {
    x: i32,
    y: i32,
    phase: i32,
    active: bool,
    shots_fired: i32,
}

impl Laser {
    pub fn new() -> Self {
        Laser {
            x: 0,
            y: 0,
            phase: 0,
            active: false,
            shots_fired: 0,
        }
    }

    pub fn reset(&mut self) {
        self.active = false;
    }

    pub fn fire(&mut self, x: i32) {
        if !self.active {
            self.active = true;
            self.x = x;
            self.y = ROW - 1;
            self.phase = 0;
            self.shots_fired += 1;
        }
    }

    /// Advance the shot.  Climbs one row per two updates; an occupied cell
    /// stops the shot and its owner is returned for the caller to route.
    /// Reaching the top row unobstructed plays an 18-frame dissipation.
    pub fn update<W: Write>(&mut self, screen: &mut Screen<W>) -> Option<OwnerId> {
        if !self.active {
            return None;
        }

        if self.y == 1 && self.phase >= 1 {
            if self.phase == 1 || self.phase == 2 {
                let sprite = LASER_SPRITES[self.phase as usize];
                screen.write_char(self.y, self.x, sprite, Color::Red, None);
            } else if self.phase == 17 {
                screen.write_char(self.y, self.x, ' ', Color::Any, None);
            }
            self.phase += 1;
            self.active = self.phase < 18;
            return None;
        }

        let hit_id = screen.at(self.y, self.x);
        if hit_id.is_none() {
            let sprite = LASER_SPRITES[self.phase as usize];
            screen.write_char(self.y, self.x, sprite, color_for_row(self.y), None);
        }
        if self.phase == 0 && screen.at(self.y + 1, self.x).is_none() {
            screen.write_char(self.y + 1, self.x, ' ', Color::Any, None);
        }

        self.y -= self.phase;
        self.phase ^= 1;
        self.active = hit_id.is_none();
        hit_id
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn shots_fired(&self) -> i32 {
        self.shots_fired
    }
}
