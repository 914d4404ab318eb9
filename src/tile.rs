/*
tile.rs

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

//! Domino tiles.
//!
//! A [`Tile`] carries two independent color sequences: the top face and the bottom face.
//! Tray tiles are templates. When the player drags a tray tile, a new tile is built with
//! [`Tile::clone_for_placement`] and the template stays in the tray.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::generator::color::{Color, letters};
use crate::layout::{Point, Rect};

/// Tile identifier. Unique within a session.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the tile currently is.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    InTray,
    Dragging,
    InWorkingArea,
}

/// Domino tile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tile {
    id: TileId,

    /// Top face.
    top: Vec<Color>,

    /// Bottom face.
    bottom: Vec<Color>,

    pub placement: Placement,

    /// Top-left corner.
    pub position: Point,

    pub width: f64,
    pub height: f64,

    /// Advisory flag set by the guidance pass.
    pub highlighted: bool,

    /// Distance between the pointer and the tile corner while dragging.
    #[serde(skip)]
    grab_offset: Option<(f64, f64)>,
}

impl Tile {
    /// Create a [`Tile`] object in the tray.
    pub fn new(id: TileId, top: Vec<Color>, bottom: Vec<Color>, width: f64, height: f64) -> Self {
        Self {
            id,
            top,
            bottom,
            placement: Placement::InTray,
            position: Point::default(),
            width,
            height,
            highlighted: false,
            grab_offset: None,
        }
    }

    /// Build a new tile with the same faces, size, and position, under a new identifier.
    ///
    /// The copy is not highlighted and is not being dragged yet.
    pub fn clone_for_placement(&self, id: TileId) -> Self {
        Self {
            id,
            top: self.top.clone(),
            bottom: self.bottom.clone(),
            placement: Placement::InTray,
            position: self.position,
            width: self.width,
            height: self.height,
            highlighted: false,
            grab_offset: None,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn top(&self) -> &[Color] {
        &self.top
    }

    pub fn bottom(&self) -> &[Color] {
        &self.bottom
    }

    /// Bounding rectangle at the current position.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Whether the point is inside the tile.
    pub fn contains_point(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Start dragging the tile from the given pointer position.
    pub fn start_drag(&mut self, pointer: Point) {
        self.placement = Placement::Dragging;
        self.grab_offset = Some((pointer.x - self.position.x, pointer.y - self.position.y));
    }

    /// Follow the pointer, keeping the grab offset.
    pub fn update_drag(&mut self, pointer: Point) {
        if let Some((dx, dy)) = self.grab_offset {
            self.position = Point::new(pointer.x - dx, pointer.y - dy);
        }
    }

    /// Stop dragging and set the new placement.
    pub fn stop_drag(&mut self, placement: Placement) {
        self.placement = placement;
        self.grab_offset = None;
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", letters(&self.top), letters(&self.bottom))
    }
}
