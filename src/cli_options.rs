/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without options, Pcpuzzle starts an interactive game in the terminal.
//! The `--tray` option only generates trays and prints them, which helps when tuning the
//! difficulty settings.
//!
//! # Examples
//!
//! Print two trays at level 3, using a fixed seed:
//!
//! ```
//! $ pcpuzzle --tray --count 2 --level 3 --seed 42
//! ```
//!
//! Start a game in the hardest timed mode, with custom settings:
//!
//! ```
//! $ pcpuzzle --mode timed-hard --settings ~/pcpuzzle.json
//! ```

use clap::Parser;
use log::{debug, warn};
use std::env;
use std::error::Error;
use std::fmt::Write;
use std::path::PathBuf;

use crate::clock::GameMode;
use crate::config::COPYRIGHT_NOTICE;
use crate::generator::color::letters;
use crate::generator::difficulty::LengthBonus;
use crate::generator::tile_factory::TileFactory;
use crate::settings::Settings;
use crate::tile::Tile;
use crate::view::TileView;

/// Post Correspondence Problem domino puzzle.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Print a generated tray and exit
    #[arg(short, long, default_value_t = false)]
    tray: bool,

    /// Print the trays as JSON
    #[arg(short, long, default_value_t = false, requires = "tray")]
    json: bool,

    /// Number of trays to print
    #[arg(short, long, default_value_t = 1, requires = "tray")]
    count: usize,

    /// Starting difficulty level
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    level: u16,

    /// Game mode
    #[arg(value_enum, short, long, default_value_t = GameMode::Classic)]
    mode: GameMode,

    /// Seed for the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with the game settings
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parameters of the interactive game.
#[derive(Debug)]
pub struct PlayOptions {
    pub settings: Settings,
    pub mode: GameMode,
    pub bonus: LengthBonus,
    pub seed: Option<u64>,
}

impl PlayOptions {
    /// Create the tile factory for these options.
    pub fn factory(&self) -> TileFactory {
        match self.seed {
            Some(seed) => TileFactory::with_seed(&self.settings, seed),
            None => TileFactory::new(&self.settings),
        }
    }
}

/// What to do after processing the options.
#[derive(Debug)]
pub enum Launch {
    /// Exit with the given code.
    Exit(u8),

    /// Start the interactive game.
    Play(PlayOptions),
}

/// Generate trays and render them as text or JSON.
fn tray_listing(options: &PlayOptions, count: usize, json: bool) -> Result<String, Box<dyn Error>> {
    let mut factory: TileFactory = options.factory();
    let mut out: String = String::new();
    let mut trays: Vec<Vec<TileView>> = Vec::with_capacity(count);

    for i in 0..count {
        debug!("Tray {i}");
        let tray: Vec<Tile> = factory.generate_tray(options.settings.tray_size, options.bonus)?;
        if json {
            trays.push(tray.iter().map(TileView::from).collect());
            continue;
        }
        if i > 0 {
            writeln!(out)?;
        }
        for tile in &tray {
            writeln!(out, "{:>8} / {}", letters(tile.top()), letters(tile.bottom()))?;
        }
    }
    if json {
        out = serde_json::to_string_pretty(&trays)?;
        out.push('\n');
    }
    Ok(out)
}

/// Turn the parsed options into a [`Launch`] decision.
fn process(args: Args) -> Launch {
    let settings: Settings = match &args.settings {
        Some(path) => match Settings::load(path) {
            Ok(s) => s,
            Err(e) => {
                warn!("Settings file {path:?}: {e}");
                eprintln!("Cannot load the settings from {}: {e}", path.display());
                return Launch::Exit(1);
            }
        },
        None => Settings::default(),
    };
    debug!("{settings:?}");

    let options = PlayOptions {
        settings,
        mode: args.mode,
        bonus: LengthBonus::level(usize::from(args.level - 1)),
        seed: args.seed,
    };

    if !args.tray {
        return Launch::Play(options);
    }
    match tray_listing(&options, args.count, args.json) {
        Ok(text) => {
            print!("{text}");
            Launch::Exit(0)
        }
        Err(e) => {
            eprintln!("Cannot generate the tray: {e}");
            Launch::Exit(1)
        }
    }
}

/// Parse and process command-line options.
pub fn parse() -> Launch {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    process(args)
}
