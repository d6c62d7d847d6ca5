//! Enemy missiles: a pool of 3 projectile slots with fire-rate throttling.

use std::io::Write;

use crate::screen::{color_for_row, Color, OwnerId, Screen, HEIGHT};

// Sprites are (upper, lower) glyph pairs; the upper cell is only redrawn
// while the missile still owns it, so other entities' erasures win.
const MISSILE_SPRITES: [(char, char); 3] = [('|', '"'), (' ', '$'), (' ', '&')];
const EXPLOSION_SPRITES: [(char, char); 2] = [('|', 'Y'), (' ', '?')];
const GROUND_SPRITES: [(char, char); 2] = [(' ', '.'), (' ', ',')];

#[derive(Clone, Copy, Default)]
struct Instance {
    y: i32,
    x: i32,
    phase: i32,
    active: bool,
}

impl Instance {
    fn reset(&mut self) {
        self.active = false;
    }

    /// Advance one step.  Returns true when the missile terminated this
    /// call, either by hitting something (reported through `on_hit`) or by
    /// finishing the ground-impact dissolve.
    fn update<W, F>(&mut self, screen: &mut Screen<W>, on_hit: &mut F) -> bool
    where
        W: Write,
        F: FnMut(&mut Screen<W>, OwnerId, i32),
    {
        if !self.active {
            return false;
        }

        // Reaching the row above the ground plays a short dissolve instead
        // of moving any further.
        if self.y == HEIGHT - 2 {
            if self.phase == 1 {
                self.render(EXPLOSION_SPRITES[0], screen);
            } else if self.phase == 2 {
                self.render(EXPLOSION_SPRITES[1], screen);
            } else if self.phase == 5 {
                self.render(GROUND_SPRITES[(self.x % 2) as usize], screen);
            }
            self.phase += 1;
            self.active = self.phase < 6;
            return !self.active;
        }

        if let Some(hit_id) = screen.at(self.y + 1, self.x) {
            if hit_id != OwnerId::Missile {
                screen.write_char(self.y, self.x, ' ', Color::Any, None);
                on_hit(screen, hit_id, self.x);
                self.active = false;
                return true;
            }
        }

        self.phase ^= 1;
        if self.phase == 0 {
            self.render(MISSILE_SPRITES[0], screen);
        } else if self.y % 2 == 0 {
            self.render(MISSILE_SPRITES[1], screen);
        } else {
            self.render(MISSILE_SPRITES[2], screen);
        }
        self.y += self.phase;
        false
    }

    fn fire(&mut self, y: i32, x: i32) -> bool {
        if self.active {
            return false;
        }
        self.y = y;
        self.x = x;
        self.phase = 0;
        self.active = true;
        true
    }

    fn render<W: Write>(&self, sprite: (char, char), screen: &mut Screen<W>) {
        if screen.at(self.y, self.x) == Some(OwnerId::Missile) {
            screen.write_char(self.y, self.x, sprite.0, color_for_row(self.y), Some(OwnerId::Missile));
        }
        screen.write_char(self.y + 1, self.x, sprite.1, color_for_row(self.y + 1), Some(OwnerId::Missile));
    }
}

pub struct Missiles {
    missiles: [Instance; 3],
    active_count: i32,
    fire_frame: i32,
    can_fire: bool,
}

impl Missiles {
    pub fn new() -> Self {
        Missiles {
            missiles: [Instance::default(); 3],
            active_count: 0,
            fire_frame: 174,
            can_fire: false,
        }
    }

    pub fn reset(&mut self) {
        self.active_count = 0;
        self.fire_frame = 174;
        self.can_fire = false;
        for missile in &mut self.missiles {
            missile.reset();
        }
    }

    /// Step every active missile, routing hits through `on_hit`, then
    /// recompute the launch gate.  Only 1 missile may be in flight before
    /// frame 2000, up to 3 thereafter; a new launch waits 12 frames after
    /// the pool empties, or 50 frames after the previous launch.
    pub fn update<W, F>(&mut self, frame: i32, screen: &mut Screen<W>, mut on_hit: F)
    where
        W: Write,
        F: FnMut(&mut Screen<W>, OwnerId, i32),
    {
        for missile in &mut self.missiles {
            if missile.update(screen, &mut on_hit) {
                self.active_count -= 1;
                if self.active_count == 0 {
                    self.fire_frame = frame + 12;
                }
            }
        }
        let max_active = if frame < 2000 { 1 } else { 3 };
        self.can_fire = frame >= self.fire_frame && self.active_count < max_active;
        self.fire_frame = self.fire_frame.max(frame);
    }

    pub fn can_fire(&self) -> bool {
        self.can_fire
    }

    pub fn fire(&mut self, y: i32, x: i32) {
        for missile in &mut self.missiles {
            if missile.fire(y, x) {
                self.active_count += 1;
                self.fire_frame += 50;
                break;
            }
        }
    }
}
