/*
tile_factory.rs

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

//! Generate random unique tiles.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use super::color::Color;
use super::difficulty::LengthBonus;
use crate::settings::Settings;
use crate::tile::{Tile, TileId};

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GenerationError {
    /// No new (top, bottom) pair found within the allowed number of draws.
    Exhausted { attempts: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::Exhausted { attempts } => {
                write!(f, "no unique tile found after {attempts} attempts")
            }
        }
    }
}

impl Error for GenerationError {}

/// Pair of faces, as recorded in the uniqueness registry.
type FacePair = (Vec<Color>, Vec<Color>);

/// [`TileFactory`] object.
pub struct TileFactory {
    rng: StdRng,

    /// Pairs already used in the tray being generated.
    /// The registry is cleared each time a new tray is generated.
    registry: HashSet<FacePair>,

    /// Next tile identifier.
    next_id: u64,

    /// Maximum number of draws for one tile.
    max_attempts: usize,

    tile_width: f64,
    tile_height: f64,
}

impl TileFactory {
    /// Create a [`TileFactory`] object seeded from the operating system.
    pub fn new(settings: &Settings) -> Self {
        Self::from_rng(settings, StdRng::from_os_rng())
    }

    /// Create a [`TileFactory`] object with a reproducible sequence of tiles.
    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        Self::from_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn from_rng(settings: &Settings, rng: StdRng) -> Self {
        Self {
            rng,
            registry: HashSet::new(),
            next_id: 0,
            max_attempts: settings.max_attempts.max(1),
            tile_width: settings.tile_width,
            tile_height: settings.tile_height,
        }
    }

    /// Allocate a new tile identifier.
    pub fn next_id(&mut self) -> TileId {
        self.next_id += 1;
        TileId(self.next_id)
    }

    /// Build a tile with the given faces. The registry is not involved.
    pub fn build(&mut self, top: Vec<Color>, bottom: Vec<Color>) -> Tile {
        let id: TileId = self.next_id();
        Tile::new(id, top, bottom, self.tile_width, self.tile_height)
    }

    /// Draw a random face whose length is in the range allowed by the bonus.
    fn random_face(&mut self, bonus: LengthBonus) -> Vec<Color> {
        let (low, high) = bonus.length_range();
        let len: usize = self.rng.random_range(low..=high);
        (0..len).map(|_| Color::random(&mut self.rng)).collect()
    }

    /// Generate a tile whose faces are not in the registry yet, and record them.
    ///
    /// # Errors
    ///
    /// The method returns [`GenerationError::Exhausted`] when no new pair is found after the
    /// maximum number of draws.
    pub fn generate(&mut self, bonus: LengthBonus) -> Result<Tile, GenerationError> {
        for attempt in 1..=self.max_attempts {
            let top: Vec<Color> = self.random_face(bonus);
            let bottom: Vec<Color> = self.random_face(bonus);
            let pair: FacePair = (top, bottom);
            if self.registry.contains(&pair) {
                debug!("    Duplicated pair at attempt {attempt}, drawing again");
                continue;
            }
            self.registry.insert(pair.clone());
            let (top, bottom) = pair;
            return Ok(self.build(top, bottom));
        }
        warn!(
            "Tile generation gave up after {} attempts ({} pairs in use)",
            self.max_attempts,
            self.registry.len()
        );
        Err(GenerationError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    /// Generate a tray of unique tiles.
    ///
    /// The registry is cleared first, so the new tray may repeat a pair from a previous tray.
    pub fn generate_tray(
        &mut self,
        count: usize,
        bonus: LengthBonus,
    ) -> Result<Vec<Tile>, GenerationError> {
        self.registry.clear();
        let mut tray: Vec<Tile> = Vec::with_capacity(count);
        for i in 0..count {
            let tile: Tile = self.generate(bonus)?;
            debug!("Tile {i}: {tile}");
            tray.push(tile);
        }
        Ok(tray)
    }
}
