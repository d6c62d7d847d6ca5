//! Score and lives, rendered on the double-width status row.

use std::io::{self, Write};

use crate::screen::{Color, Screen, WIDTH};

const TURRET_ICON: &str = "sz";

const EXTRA_LIFE_SCORE: i32 = 1500;

const GAME_OVER_ROW: i32 = 2;
const SCORE_ROW: i32 = 24;

pub struct Status {
    score: i32,
    lives: i32,
}

impl Status {
    pub fn new() -> Self {
        Status { score: 0, lives: 3 }
    }

    /// Redraw the status row for a new level: lives, score label and value,
    /// then the ground line revealed in stages.  Score and lives carry over
    /// between levels.
    pub fn reset<W: Write>(&mut self, screen: &mut Screen<W>) -> io::Result<()> {
        // MLTerm doesn't reset double-width lines correctly, so the GAME
        // OVER line is manually restored when a new level starts.
        screen.single_width(GAME_OVER_ROW);
        screen.double_width(SCORE_ROW);
        self.render_lives(false, screen);
        screen.pause(1)?;
        screen.write(SCORE_ROW, 19, "SCORE ", Color::White, None);
        self.render_score(screen);
        screen.pause(1)?;
        screen.write(SCORE_ROW - 1, 1, "", Color::Green, None);
        for i in (0..WIDTH).rev() {
            screen.append('_');
            if i % (WIDTH / 3) == 0 {
                screen.pause(1)?;
            }
        }
        Ok(())
    }

    /// Credit points.  Crossing the extra-life threshold grants exactly one
    /// life, on the crossing itself.
    pub fn add_to_score<W: Write>(&mut self, points: i32, screen: &mut Screen<W>) {
        if points > 0 {
            self.score += points;
            self.render_score(screen);
            if self.score >= EXTRA_LIFE_SCORE && self.score - points < EXTRA_LIFE_SCORE {
                self.lives += 1;
                self.render_lives(false, screen);
            }
        }
    }

    /// Take one life, or all of them when the formation has landed.
    /// Returns true when the game is over.
    pub fn lose_life<W: Write>(&mut self, all: bool, screen: &mut Screen<W>) -> io::Result<bool> {
        self.lives -= if all { self.lives } else { 1 };
        self.render_lives(true, screen);
        if self.lives > 0 {
            screen.pause(128)?;
            Ok(false)
        } else {
            self.render_game_over(screen)?;
            Ok(true)
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    fn render_score<W: Write>(&self, screen: &mut Screen<W>) {
        let score_string = format!("{:04}", self.score % 10000);
        screen.write(SCORE_ROW, 25, &score_string, Color::White, None);
    }

    fn render_lives<W: Write>(&self, decreasing: bool, screen: &mut Screen<W>) {
        screen.write(SCORE_ROW, 3, &self.lives.to_string(), Color::White, None);
        screen.append(' ');
        if decreasing {
            if self.lives > 0 {
                screen.write(SCORE_ROW, 3 + self.lives * 2, "  ", Color::Any, None);
            } else {
                screen.write(SCORE_ROW, 5, "            ", Color::Any, None);
            }
        } else {
            for i in 1..self.lives {
                screen.write(SCORE_ROW, 3 + i * 2, TURRET_ICON, Color::Green, None);
            }
        }
    }

    fn render_game_over<W: Write>(&self, screen: &mut Screen<W>) -> io::Result<()> {
        screen.clear_line(GAME_OVER_ROW);
        screen.double_width(GAME_OVER_ROW);
        screen.write(GAME_OVER_ROW, 11, "", Color::Red, None);
        for c in "GAME OVER".chars() {
            screen.append(c);
            screen.pause(6)?;
        }
        Ok(())
    }
}
