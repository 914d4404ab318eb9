/*
working.rs

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

//! Manage the tiles that the player placed in the working area.
//!
//! The order of the sequence is the placement order, from left to right.
//! Tiles are always appended at the end. To move a tile, the player pulls it out of the working
//! area and drops it back, which removes it and then appends it again.

use serde::{Deserialize, Serialize};

use crate::generator::color::Color;
use crate::layout::{Layout, Point};
use crate::tile::{Placement, Tile, TileId};

/// Ordered list of the placed tiles.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct WorkingSequence {
    tiles: Vec<Tile>,
}

impl WorkingSequence {
    /// Create an empty [`WorkingSequence`] object.
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Remove all the tiles.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the tile is in the sequence.
    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.iter().any(|t| t.id() == id)
    }

    /// Return the tiles in placement order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Add a tile at the end of the sequence.
    ///
    /// Return `false` and drop nothing if the tile is already in the sequence.
    pub fn append(&mut self, mut tile: Tile) -> bool {
        if self.contains(tile.id()) {
            return false;
        }
        tile.stop_drag(Placement::InWorkingArea);
        self.tiles.push(tile);
        true
    }

    /// Remove the tile and return it, or None if the tile is not in the sequence.
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let index: usize = self.tiles.iter().position(|t| t.id() == id)?;
        Some(self.tiles.remove(index))
    }

    /// Return the identifier of the topmost tile under the point.
    ///
    /// The last placed tile is drawn on top, so it wins when tiles overlap.
    pub fn tile_at(&self, point: Point) -> Option<TileId> {
        self.tiles
            .iter()
            .rev()
            .find(|t| t.contains_point(point))
            .map(|t| t.id())
    }

    /// Concatenation of all the top faces, and of all the bottom faces.
    pub fn concat(&self) -> (Vec<Color>, Vec<Color>) {
        let mut top: Vec<Color> = Vec::new();
        let mut bottom: Vec<Color> = Vec::new();
        for tile in &self.tiles {
            top.extend_from_slice(tile.top());
            bottom.extend_from_slice(tile.bottom());
        }
        (top, bottom)
    }

    /// Whether the sequence is a solution: both concatenations are equal and not empty.
    pub fn is_winning(&self) -> bool {
        let (top, bottom) = self.concat();
        !top.is_empty() && top == bottom
    }

    /// Move the tiles to their slots, from left to right.
    pub fn reposition(&mut self, layout: &Layout) {
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            tile.position = layout.working_slot(i);
        }
    }
}
