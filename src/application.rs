/*
application.rs

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

//! Run the game in a terminal.
//!
//! A reader thread forwards the lines typed by the player through a channel.
//! The frame loop drains the pending commands, advances the session by the measured (and clamped)
//! frame delta, and redraws the board when something changed.
//!
//! Most commands are translated into pointer events, the same way a graphical front end would
//! report a drag and drop.

use async_channel::{Receiver, Sender, TryRecvError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

use crate::clock::clamp_frame_delta;
use crate::draw::TextRenderer;
use crate::game::{DropOutcome, PuzzleSession};
use crate::layout::{Point, Rect};
use crate::settings::Settings;

const HELP: &str = "\
Commands:
  place N      drag tray tile N into the working area
  take N       drag working tile N out of the working area
  again N      move working tile N to the end of the sequence
  down X Y     press the pointer at X,Y
  move X Y     move the pointer to X,Y
  up X Y       release the pointer at X,Y
  clear        empty the working area
  new          start a new game
  lower        lower the difficulty and start a new game
  mode         switch to the next game mode
  show         draw the board
  json         print the board as JSON
  scores       print the best times
  help         print this help
  quit         leave the game";

/// Player command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    Place(usize),
    Take(usize),
    Again(usize),
    Down(Point),
    Move(Point),
    Up(Point),
    Clear,
    New,
    Lower,
    Mode,
    Show,
    Json,
    Scores,
    Help,
    Quit,
}

/// Errors while reading a command.
#[derive(Debug, PartialEq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument(&'static str),
    BadNumber(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommandError::Unknown(word) => write!(f, "unknown command '{word}'"),
            CommandError::MissingArgument(command) => write!(f, "'{command}' needs more arguments"),
            CommandError::BadNumber(word) => write!(f, "'{word}' is not a valid number"),
        }
    }
}

impl Error for CommandError {}

/// Read the next word of the command as a number.
fn number<'a, T: FromStr>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<T, CommandError> {
    let word: &str = words.next().ok_or(CommandError::MissingArgument(command))?;
    word.parse::<T>()
        .map_err(|_| CommandError::BadNumber(word.to_string()))
}

fn point<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<Point, CommandError> {
    let x: f64 = number(words, command)?;
    let y: f64 = number(words, command)?;
    Ok(Point::new(x, y))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(Command::Show);
        };
        match first.to_lowercase().as_str() {
            "place" | "p" => Ok(Command::Place(number(&mut words, "place")?)),
            "take" | "t" => Ok(Command::Take(number(&mut words, "take")?)),
            "again" | "a" => Ok(Command::Again(number(&mut words, "again")?)),
            "down" => Ok(Command::Down(point(&mut words, "down")?)),
            "move" => Ok(Command::Move(point(&mut words, "move")?)),
            "up" => Ok(Command::Up(point(&mut words, "up")?)),
            "clear" | "c" => Ok(Command::Clear),
            "new" | "n" => Ok(Command::New),
            "lower" | "l" => Ok(Command::Lower),
            "mode" | "m" => Ok(Command::Mode),
            "show" | "s" => Ok(Command::Show),
            "json" => Ok(Command::Json),
            "scores" => Ok(Command::Scores),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(first.to_string())),
        }
    }
}

/// Whether the frame loop keeps going.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front end.
pub struct PcpuzzleApplication {
    session: PuzzleSession,
    renderer: TextRenderer,
    frame_duration: Duration,
    min_frame: Duration,
    max_frame: Duration,

    /// The board must be redrawn at the end of the frame.
    dirty: bool,
}

impl PcpuzzleApplication {
    /// Create a [`PcpuzzleApplication`] object.
    pub fn new(session: PuzzleSession, settings: &Settings, renderer: TextRenderer) -> Self {
        Self {
            session,
            renderer,
            frame_duration: settings.frame_duration(),
            min_frame: settings.min_frame(),
            max_frame: settings.max_frame(),
            dirty: true,
        }
    }

    /// Where tiles are dropped to be placed.
    fn drop_point(&self) -> Point {
        self.session.layout().working_area().center()
    }

    /// Where tiles are dropped to be discarded: just below the working area.
    fn discard_point(&self) -> Point {
        let area: Rect = self.session.layout().working_area();
        let (_, tile_height) = self.session.layout().tile_size();
        Point::new(area.center().x, area.y + area.height + tile_height / 2.0)
    }

    /// Press the pointer at `from` and release it at `to`.
    fn drag_and_drop(&mut self, from: Point, to: Point) -> Option<DropOutcome> {
        self.session.pointer_down(from)?;
        self.session.pointer_move(to);
        self.session.pointer_up(to)
    }

    /// Center of the given tile in the tray, or in the working area.
    fn tile_center(&self, index: usize, in_tray: bool) -> Option<Point> {
        let tile = if in_tray {
            self.session.tray().get(index)
        } else {
            self.session.working().tiles().get(index)
        };
        tile.map(|t| t.bounds().center())
    }

    fn report_drop(&self, outcome: Option<DropOutcome>) {
        match outcome {
            Some(DropOutcome::Placed { won: true }) => println!("Solved!"),
            Some(_) => (),
            None if self.session.is_locked() => println!("Time is up."),
            None => println!("Nothing to drag there."),
        }
    }

    /// Execute a command.
    pub fn handle(&mut self, command: Command) -> Result<Flow, Box<dyn Error>> {
        debug!("Command {command:?}");
        match command {
            Command::Place(index) => match self.tile_center(index, true) {
                Some(from) => {
                    let outcome = self.drag_and_drop(from, self.drop_point());
                    self.report_drop(outcome);
                }
                None => println!("No tile {index} in the tray."),
            },
            Command::Take(index) => match self.tile_center(index, false) {
                Some(from) => {
                    let outcome = self.drag_and_drop(from, self.discard_point());
                    self.report_drop(outcome);
                }
                None => println!("No tile {index} in the working area."),
            },
            Command::Again(index) => match self.tile_center(index, false) {
                Some(from) => {
                    let outcome = self.drag_and_drop(from, self.drop_point());
                    self.report_drop(outcome);
                }
                None => println!("No tile {index} in the working area."),
            },
            Command::Down(p) => {
                if let Some(id) = self.session.pointer_down(p) {
                    println!("Picked tile {id}.");
                }
            }
            Command::Move(p) => {
                self.session.pointer_move(p);
            }
            Command::Up(p) => {
                let outcome = self.session.pointer_up(p);
                if outcome.is_some() {
                    self.report_drop(outcome);
                }
            }
            Command::Clear => self.session.clear_working_area(),
            Command::New => {
                if let Err(e) = self.session.start_new_game() {
                    warn!("Cannot start a new game: {e}");
                    println!("Cannot generate a new tray ({e}). The current puzzle is kept.");
                }
            }
            Command::Lower => match self.session.lower_difficulty() {
                Ok(true) => (),
                Ok(false) => println!("Already at the easiest level."),
                Err(e) => {
                    warn!("Cannot lower the difficulty: {e}");
                    println!("Cannot generate a new tray ({e}). The current puzzle is kept.");
                }
            },
            Command::Mode => {
                if !self.session.toggle_mode() {
                    println!("Drop the tile before changing the mode.");
                }
            }
            Command::Show => (),
            Command::Json => {
                println!("{}", serde_json::to_string_pretty(&self.session.view())?);
                return Ok(Flow::Continue);
            }
            Command::Scores => {
                print!("{}", self.renderer.scores(self.session.scores())?);
                return Ok(Flow::Continue);
            }
            Command::Help => {
                println!("{HELP}");
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        self.dirty = true;
        Ok(Flow::Continue)
    }

    /// Parse and execute a line of input.
    fn execute_line(&mut self, line: &str) -> Result<Flow, Box<dyn Error>> {
        match line.parse::<Command>() {
            Ok(command) => self.handle(command),
            Err(e) => {
                println!("Error: {e}. Type 'help' for the list of commands.");
                Ok(Flow::Continue)
            }
        }
    }

    fn draw(&mut self) -> Result<(), Box<dyn Error>> {
        print!("\n{}", self.renderer.frame(&self.session.view())?);
        self.dirty = false;
        Ok(())
    }

    /// Advance the session by one frame.
    fn frame(&mut self, delta: Duration) -> Result<(), Box<dyn Error>> {
        let delta: Duration = clamp_frame_delta(delta, self.min_frame, self.max_frame);
        if self.session.tick(delta) {
            info!("Countdown expired");
            self.dirty = true;
        }
        if self.dirty {
            self.draw()?;
        }
        Ok(())
    }

    /// Forward the lines of the standard input to the frame loop.
    fn spawn_reader(sender: Sender<String>) {
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if sender.send_blocking(line).is_err() {
                    break;
                }
            }
            debug!("Input reader stopped");
        });
    }

    /// Run the frame loop until the player quits or the input is closed.
    pub fn run(mut self) -> Result<(), Box<dyn Error>> {
        let (sender, receiver): (Sender<String>, Receiver<String>) = async_channel::unbounded();
        Self::spawn_reader(sender);
        println!("Type 'help' for the list of commands.");

        let mut last: Instant = Instant::now();
        loop {
            loop {
                match receiver.try_recv() {
                    Ok(line) => {
                        if self.execute_line(&line)? == Flow::Quit {
                            return Ok(());
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Closed) => {
                        debug!("End of input");
                        return Ok(());
                    }
                }
            }

            let now: Instant = Instant::now();
            self.frame(now - last)?;
            last = now;
            thread::sleep(self.frame_duration.saturating_sub(now.elapsed()));
        }
    }
}
