/*
generator.rs

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

//! Generate the tiles of a puzzle.
//!
//! A tile has two faces, each a short sequence of [`color::Color`] values.
//! The [`tile_factory::TileFactory`] object draws random faces whose lengths depend on the
//! current [`difficulty::LengthBonus`], and makes sure that no two tiles of a tray share the same
//! pair of faces.
//! If no new pair is found after a bounded number of draws, generation fails with a
//! [`tile_factory::GenerationError`] and the caller keeps its previous tray.
//!
//! The [`difficulty::DifficultyTracker`] object decides the bonus for each new game.

pub mod color;
pub mod difficulty;
pub mod tile_factory;
