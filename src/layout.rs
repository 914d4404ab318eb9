/*
layout.rs

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

//! Board geometry.
//!
//! Positions are only used for hit-testing and rendering. The puzzle logic never depends on them.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Point in board coordinates.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point is inside the rectangle. Borders are inside.
    pub fn contains(&self, point: Point) -> bool {
        self.x <= point.x
            && point.x <= self.x + self.width
            && self.y <= point.y
            && point.y <= self.y + self.height
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Tile slots for the tray and the working area.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    tile_width: f64,
    tile_height: f64,
    tray_origin: Point,
    tray_step: f64,
    working_area: Rect,
    working_margin: f64,
    working_step: f64,
}

impl Layout {
    /// Create a [`Layout`] object from the settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            tile_width: settings.tile_width,
            tile_height: settings.tile_height,
            tray_origin: Point::new(settings.tray_x, settings.tray_y),
            tray_step: settings.tray_step,
            working_area: Rect::new(
                settings.working_x,
                settings.working_y,
                settings.working_width,
                settings.working_height,
            ),
            working_margin: settings.working_margin,
            working_step: settings.working_step,
        }
    }

    /// Tile width and height.
    pub fn tile_size(&self) -> (f64, f64) {
        (self.tile_width, self.tile_height)
    }

    /// Working area rectangle.
    pub fn working_area(&self) -> Rect {
        self.working_area
    }

    /// Position of the given tray slot.
    pub fn tray_slot(&self, index: usize) -> Point {
        Point::new(
            self.tray_origin.x + index as f64 * self.tray_step,
            self.tray_origin.y,
        )
    }

    /// Position of the given working area slot.
    ///
    /// Tiles are laid out left to right and centered vertically in the working area.
    pub fn working_slot(&self, index: usize) -> Point {
        Point::new(
            self.working_area.x + self.working_margin + index as f64 * self.working_step,
            self.working_area.y + (self.working_area.height - self.tile_height) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_borders() {
        let r = Rect::new(10.0, 20.0, 80.0, 160.0);
        assert!(r.contains(Point::new(10.0, 20.0)));
        assert!(r.contains(Point::new(90.0, 180.0)));
        assert!(r.contains(Point::new(50.0, 100.0)));
        assert!(!r.contains(Point::new(9.9, 100.0)));
        assert!(!r.contains(Point::new(50.0, 180.1)));
    }

    #[test]
    fn default_slots() {
        let layout = Layout::new(&Settings::default());
        assert_eq!(layout.tray_slot(0), Point::new(50.0, 100.0));
        assert_eq!(layout.tray_slot(3), Point::new(410.0, 100.0));
        assert_eq!(layout.working_slot(0), Point::new(50.0, 420.0));
        assert_eq!(layout.working_slot(2), Point::new(230.0, 420.0));
        assert!(layout.working_area().contains(layout.working_slot(5)));
    }
}
