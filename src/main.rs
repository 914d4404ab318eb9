/*
main.rs

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

mod application;
mod cli_options;
mod clock;
mod config;
mod draw;
mod game;
mod generator;
mod guidance;
mod highscores;
mod layout;
mod settings;
mod tile;
mod view;
mod working;

use log::error;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use self::application::PcpuzzleApplication;
use cli_options::{Launch, PlayOptions};
use config::{APPLICATION_NAME, VERSION};
use draw::TextRenderer;
use game::PuzzleSession;
use generator::difficulty::DifficultyTracker;

fn main() -> ExitCode {
    let options: PlayOptions = match cli_options::parse() {
        Launch::Exit(ret) => return ExitCode::from(ret),
        Launch::Play(options) => options,
    };

    let session: PuzzleSession = match PuzzleSession::new(
        &options.settings,
        options.factory(),
        DifficultyTracker::with_bonus(options.bonus),
        options.mode,
    ) {
        Ok(session) => session,
        Err(e) => {
            error!("Cannot generate the first tray: {e}");
            eprintln!("Cannot generate the first tray: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{APPLICATION_NAME} {VERSION}");
    let renderer: TextRenderer = TextRenderer::new(io::stdout().is_terminal());
    let app: PcpuzzleApplication = PcpuzzleApplication::new(session, &options.settings, renderer);
    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
