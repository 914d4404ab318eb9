/*
draw.rs

Copyright 2025 Pcpuzzle contributors

This file is part of Pcpuzzle.

Pcpuzzle is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Pcpuzzle is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Pcpuzzle. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Draw the puzzle as text.
//!
//! Colors are drawn as their letter (`R`, `G`, or `B`), painted with ANSI escape sequences when
//! the output is a terminal.

use chrono::{DateTime, Local};
use std::fmt::{Result, Write};
use std::time::Duration;

use crate::clock::{ClockDisplay, GameMode, hms};
use crate::generator::color::Color;
use crate::highscores::HighScores;
use crate::view::{SessionView, TileView};

/// Text renderer.
#[derive(Debug, Copy, Clone, Default)]
pub struct TextRenderer {
    colored: bool,
}

/// Format a duration as `HH:MM:SS`.
fn clock_text(duration: Duration) -> String {
    let (h, m, s) = hms(duration);
    format!("{h:02}:{m:02}:{s:02}")
}

impl TextRenderer {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Paint a face.
    fn face(&self, letters: &str) -> String {
        if !self.colored {
            return letters.to_string();
        }
        let mut out: String = String::new();
        for c in letters.chars() {
            match Color::from_letter(c) {
                Some(color) => {
                    let (r, g, b) = color.rgb();
                    out.push_str(&format!("\x1b[1;38;2;{r};{g};{b}m{c}\x1b[0m"));
                }
                None => out.push(c),
            }
        }
        out
    }

    fn tile(&self, out: &mut String, index: usize, tile: &TileView) -> Result {
        let mark: char = if tile.highlighted { '*' } else { ' ' };
        writeln!(
            out,
            " {mark}{index:>3}  {:>8} / {:<8}  ({:.0}, {:.0})",
            self.face(&tile.top),
            self.face(&tile.bottom),
            tile.position.x,
            tile.position.y
        )
    }

    fn clock(&self, out: &mut String, clock: &ClockDisplay) -> Result {
        match clock {
            ClockDisplay::Elapsed { elapsed, running } => {
                let state: &str = if *running { "" } else { " (stopped)" };
                writeln!(out, "Time: {}{state}", clock_text(*elapsed))
            }
            ClockDisplay::Countdown {
                remaining,
                limit,
                active,
                expired,
            } => {
                let state: &str = if *expired {
                    " TIME IS UP"
                } else if *active {
                    ""
                } else {
                    " (waiting)"
                };
                writeln!(
                    out,
                    "Remaining: {} / {}{state}",
                    clock_text(*remaining),
                    clock_text(*limit)
                )
            }
        }
    }

    /// Draw a full frame.
    pub fn frame(&self, view: &SessionView) -> std::result::Result<String, std::fmt::Error> {
        let mut out: String = String::new();

        write!(out, "Mode: {}   Level: {}", view.mode_label, view.level)?;
        if view.can_raise {
            write!(out, "   [next game is harder]")?;
        }
        if view.can_lower {
            write!(out, "   [lower available]")?;
        }
        writeln!(out)?;
        self.clock(&mut out, &view.clock)?;

        writeln!(out, "Tray (* = suggested):")?;
        for (i, tile) in view.tray.iter().enumerate() {
            self.tile(&mut out, i, tile)?;
        }

        if view.working.is_empty() {
            writeln!(out, "Working area: empty")?;
        } else {
            writeln!(out, "Working area:")?;
            for (i, tile) in view.working.iter().enumerate() {
                self.tile(&mut out, i, tile)?;
            }
            writeln!(out, "   Top:    {}", self.face(&view.top))?;
            writeln!(out, "   Bottom: {}", self.face(&view.bottom))?;
        }

        if let Some(tile) = &view.dragged {
            writeln!(
                out,
                "Dragging {}: {} / {} at ({:.0}, {:.0})",
                tile.id,
                self.face(&tile.top),
                self.face(&tile.bottom),
                tile.position.x,
                tile.position.y
            )?;
        }

        if let Some(win) = &view.win {
            write!(
                out,
                "Solved with {} tiles in {}!",
                win.tiles,
                clock_text(win.time)
            )?;
            if let Some(rank) = win.rank {
                write!(out, " Rank #{rank}.")?;
            }
            writeln!(out)?;
        } else if view.expired {
            writeln!(out, "Time is up. Clear the working area or start a new game.")?;
        }
        Ok(out)
    }

    /// Draw the scoreboards.
    pub fn scores(&self, scores: &HighScores) -> std::result::Result<String, std::fmt::Error> {
        let mut out: String = String::new();
        if scores.is_empty() {
            writeln!(out, "No scores yet.")?;
            return Ok(out);
        }
        for mode in [
            GameMode::Classic,
            GameMode::TimedEasy,
            GameMode::TimedMedium,
            GameMode::TimedHard,
        ] {
            let Some(top) = scores.get_score(mode) else {
                continue;
            };
            writeln!(out, "{mode}")?;
            for (i, score) in top.iter().enumerate() {
                let when: DateTime<Local> = DateTime::from(score.when);
                writeln!(
                    out,
                    "{:>4}. {}  {:>3} tiles  level {:<3} {}",
                    i + 1,
                    clock_text(score.time),
                    score.tiles,
                    score.level,
                    when.format("%Y-%m-%d %H:%M")
                )?;
            }
        }
        Ok(out)
    }
}
