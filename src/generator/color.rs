/*
color.rs

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

//! Tile square colors.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Color of a tile square.
///
/// Colors are opaque symbols: the puzzle only compares them.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, FromRepr, Default,
)]
#[repr(u8)]
pub enum Color {
    #[default]
    Red,
    Green,
    Blue,
}

impl Color {
    /// Number of colors.
    pub const COUNT: u8 = 3;

    /// Draw a color uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Color::from_repr(rng.random_range(0..Color::COUNT)).unwrap_or_default()
    }

    /// Single letter used by the text renderer.
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }

    /// Color for a letter of the text renderer.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            _ => None,
        }
    }

    /// RGB components, for renderers that draw actual squares.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Red => (255, 0, 0),
            Color::Green => (0, 255, 0),
            Color::Blue => (0, 0, 255),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Red => write!(f, "RED"),
            Color::Green => write!(f, "GREEN"),
            Color::Blue => write!(f, "BLUE"),
        }
    }
}

/// Render a sequence of colors as letters, such as `RGB`.
pub fn letters(colors: &[Color]) -> String {
    colors.iter().map(|c| c.letter()).collect()
}

/// Build a tile face from its letters. Test helper.
#[cfg(test)]
pub fn face(s: &str) -> Vec<Color> {
    s.chars()
        .map(|c| Color::from_letter(c).unwrap_or_else(|| panic!("unknown color letter {c}")))
        .collect()
}
