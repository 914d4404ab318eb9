/*
view.rs

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

//! Snapshot of the session for the renderers.
//!
//! [`SessionView`] is rebuilt after each frame from the settled state of a [`PuzzleSession`].
//! It can be serialized to JSON for external renderers.

use serde::Serialize;

use crate::clock::{ClockDisplay, GameMode};
use crate::game::{PuzzleSession, WinRecord};
use crate::generator::color::letters;
use crate::generator::difficulty::LengthBonus;
use crate::layout::Point;
use crate::tile::{Placement, Tile, TileId};

/// Tile as shown to the player.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TileView {
    pub id: TileId,
    pub top: String,
    pub bottom: String,
    pub position: Point,
    pub placement: Placement,
    pub highlighted: bool,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id(),
            top: letters(tile.top()),
            bottom: letters(tile.bottom()),
            position: tile.position,
            placement: tile.placement,
            highlighted: tile.highlighted,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SessionView {
    pub mode: GameMode,
    pub mode_label: String,
    pub level: usize,
    pub bonus: LengthBonus,

    /// The next new game will be harder.
    pub can_raise: bool,

    pub can_lower: bool,
    pub tray: Vec<TileView>,
    pub working: Vec<TileView>,
    pub dragged: Option<TileView>,

    /// Concatenation of the top faces of the working area.
    pub top: String,

    /// Concatenation of the bottom faces of the working area.
    pub bottom: String,

    pub clock: ClockDisplay,
    pub won: bool,
    pub expired: bool,
    pub win: Option<WinRecord>,
}

impl SessionView {
    pub fn new(session: &PuzzleSession) -> Self {
        let (top, bottom) = session.working().concat();
        let difficulty = session.difficulty();
        Self {
            mode: session.mode(),
            mode_label: session.mode().to_string(),
            level: difficulty.level(),
            bonus: difficulty.bonus(),
            can_raise: difficulty.can_raise(),
            can_lower: difficulty.can_lower(),
            tray: session.tray().iter().map(TileView::from).collect(),
            working: session.working().tiles().iter().map(TileView::from).collect(),
            dragged: session.dragged().map(TileView::from),
            top: letters(&top),
            bottom: letters(&bottom),
            clock: session.clock().display(),
            won: session.is_won(),
            expired: session.is_locked(),
            win: session.win().copied(),
        }
    }
}
