//! Per-frame composition of the subsystems.
//!
//! `Game::step` reproduces one fixed-order simulation frame: formation, bonus
//! target, shield reconciliation, enemy missiles, turret/laser, and the hit
//! routing between them.  The frame counter is an explicit parameter and the
//! screen writer is generic, so a whole game can be driven headlessly.

use std::io::{self, Write};

use crate::aliens::{self, Aliens};
use crate::missiles::Missiles;
use crate::screen::{OwnerId, Screen};
use crate::shields::Shields;
use crate::status::Status;
use crate::turret::{Laser, Turret};
use crate::ufo::Ufo;

/// Frame at which the turret appears and the enemy starts firing: the 55
/// formation entry frames plus a breather.
pub const START_FRAME: i32 = aliens::COUNT as i32 + 73;

/// Outcome of one simulation frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    Continue,
    LevelCleared,
    GameOver,
}

/// Input captured since the previous frame.  A press stays latched until
/// the frame that actually consumes it.
#[derive(Clone, Copy, Default, Debug)]
pub struct InputState {
    pub fire: bool,
    pub left: bool,
    pub right: bool,
}

pub struct Game<W: Write> {
    pub screen: Screen<W>,
    pub status: Status,
    pub shields: Shields,
    pub aliens: Aliens,
    pub missiles: Missiles,
    pub turret: Turret,
    pub laser: Laser,
    pub ufo: Ufo,
}

impl<W: Write> Game<W> {
    pub fn new(screen: Screen<W>) -> Self {
        Game {
            screen,
            status: Status::new(),
            shields: Shields::new(),
            aliens: Aliens::new(),
            missiles: Missiles::new(),
            turret: Turret::new(),
            laser: Laser::new(),
            ufo: Ufo::new(),
        }
    }

    pub fn reset_level(&mut self) -> io::Result<()> {
        self.screen.reset()?;
        self.status.reset(&mut self.screen)?;
        self.shields.reset(&mut self.screen)?;
        self.aliens.reset();
        self.missiles.reset();
        self.turret.reset();
        self.laser.reset();
        self.ufo.reset();
        Ok(())
    }

    pub fn step(&mut self, frame: i32, level: i32, input: &mut InputState) -> io::Result<Step> {
        let Game {
            screen,
            status,
            shields,
            aliens,
            missiles,
            turret,
            laser,
            ufo,
        } = self;

        if !aliens.init(frame, level, screen) {
            return Ok(Step::Continue);
        }

        let points = aliens.update(turret, screen);
        status.add_to_score(points, screen);
        if aliens.landed() {
            turret.hit();
        }
        if aliens.remaining() == 0 && !turret.exploding() {
            screen.pause(30)?;
            return Ok(Step::LevelCleared);
        }

        if aliens.remaining() < 8 {
            ufo.disable();
        }
        let points = ufo.update(frame, laser.shots_fired(), screen);
        status.add_to_score(points, screen);

        shields.update(screen);

        if frame >= START_FRAME {
            if frame % 3 == 0 {
                if aliens.can_fire() && missiles.can_fire() && !turret.exploding() {
                    let (y, x) = aliens.fire();
                    missiles.fire(y, x);
                }
                missiles.update(frame, screen, |screen, hit_id, x| match hit_id {
                    OwnerId::Turret => turret.hit(),
                    OwnerId::Shield => shields.hit(true, x, screen),
                    _ => {}
                });
            }

            if turret.exploding() {
                if turret.render_explosion(screen) {
                    if status.lose_life(aliens.landed(), screen)? {
                        return Ok(Step::GameOver);
                    }
                    turret.reset();
                    turret.reveal(screen);
                }
            } else {
                if frame == START_FRAME {
                    turret.reveal(screen);
                } else if input.right {
                    turret.move_right(screen);
                    input.right = false;
                } else if input.left {
                    turret.move_left(screen);
                    input.left = false;
                }

                if input.fire && !aliens.exploding() {
                    laser.fire(turret.x());
                    input.fire = false;
                }
            }

            match laser.update(screen) {
                Some(OwnerId::Shield) => shields.hit(false, laser.x(), screen),
                Some(OwnerId::Ufo) => ufo.kill(laser.shots_fired()),
                Some(OwnerId::Alien(id)) => aliens.kill(id, screen),
                _ => {}
            }
        }

        Ok(Step::Continue)
    }
}
