/*
guidance.rs

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

//! Highlight the tray tiles that are suggested as the next placement.
//!
//! The highlights are recomputed from scratch from the current working sequence every time.
//! They are advisory only: the player can place any tile.

use serde::{Deserialize, Serialize};

use crate::generator::color::Color;
use crate::tile::Tile;
use crate::working::WorkingSequence;

/// Rule that selects the highlighted tray tiles.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HighlightRule {
    /// Every tile when the working area is empty. Otherwise, the tiles whose top face is exactly
    /// the bottom concatenation of the working area.
    #[default]
    ExactBottom,

    /// Every tile when the working area is empty. Otherwise, the tiles that keep one
    /// concatenation a prefix of the other once appended.
    Consistent,
}

/// Whether `a` is a prefix of `b` or `b` a prefix of `a`.
fn prefix_compatible(a: &[Color], b: &[Color]) -> bool {
    let n: usize = a.len().min(b.len());
    a[..n] == b[..n]
}

impl HighlightRule {
    /// Whether the tile is suggested, given the current concatenations of a non-empty working
    /// area.
    fn suggests(self, tile: &Tile, top: &[Color], bottom: &[Color]) -> bool {
        match self {
            HighlightRule::ExactBottom => tile.top() == bottom,
            HighlightRule::Consistent => {
                let new_top: Vec<Color> = [top, tile.top()].concat();
                let new_bottom: Vec<Color> = [bottom, tile.bottom()].concat();
                prefix_compatible(&new_top, &new_bottom)
            }
        }
    }
}

/// Set the `highlighted` flag of every tray tile and return the number of highlighted tiles.
pub fn compute_highlights(
    tray: &mut [Tile],
    working: &WorkingSequence,
    rule: HighlightRule,
) -> usize {
    let (top, bottom) = working.concat();
    let mut count: usize = 0;
    for tile in tray.iter_mut() {
        // Any tile may start the sequence
        tile.highlighted = working.is_empty() || rule.suggests(tile, &top, &bottom);
        if tile.highlighted {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::color::face;
    use crate::tile::TileId;

    fn tile(id: u64, top: &str, bottom: &str) -> Tile {
        Tile::new(TileId(id), face(top), face(bottom), 80.0, 160.0)
    }

    fn tray() -> Vec<Tile> {
        vec![
            tile(1, "R", "RG"),
            tile(2, "RG", "R"),
            tile(3, "G", "GG"),
            tile(4, "RGB", "B"),
            tile(5, "R", "R"),
        ]
    }

    fn highlighted(tray: &[Tile]) -> Vec<u64> {
        tray.iter()
            .filter(|t| t.highlighted)
            .map(|t| t.id().0)
            .collect()
    }

    #[test]
    fn empty_working_area_highlights_everything() {
        let mut tray = tray();
        let n = compute_highlights(&mut tray, &WorkingSequence::new(), HighlightRule::ExactBottom);
        assert_eq!(n, 5);
        assert_eq!(highlighted(&tray), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn exact_bottom_match_only() {
        let mut tray = tray();
        tray.push(tile(6, "GR", "R"));
        tray.push(tile(7, "RB", "G"));
        let mut working = WorkingSequence::new();
        working.append(tile(10, "R", "RG"));

        compute_highlights(&mut tray, &working, HighlightRule::ExactBottom);
        // Only RG matches the bottom RG. R (prefix), RGB (extension), and the same-length GR and
        // RB are not highlighted.
        assert_eq!(highlighted(&tray), vec![2]);
    }

    #[test]
    fn empty_top_faces_do_not_count_as_empty_area() {
        let mut tray = tray();
        tray.push(tile(6, "", "B"));
        let mut working = WorkingSequence::new();
        working.append(tile(10, "", "RG"));

        // The top concatenation is empty but the working area is not
        compute_highlights(&mut tray, &working, HighlightRule::ExactBottom);
        assert_eq!(highlighted(&tray), vec![2]);

        working.clear();
        compute_highlights(&mut tray, &working, HighlightRule::ExactBottom);
        assert_eq!(highlighted(&tray), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn exact_bottom_uses_whole_bottom_concatenation() {
        let mut tray = tray();
        let mut working = WorkingSequence::new();
        working.append(tile(10, "R", "R"));
        working.append(tile(11, "G", "G"));

        compute_highlights(&mut tray, &working, HighlightRule::ExactBottom);
        assert_eq!(highlighted(&tray), vec![2]);
    }

    #[test]
    fn highlights_are_recomputed_not_patched() {
        let mut tray = tray();
        let mut working = WorkingSequence::new();
        working.append(tile(10, "B", "RG"));
        compute_highlights(&mut tray, &working, HighlightRule::ExactBottom);
        assert_eq!(highlighted(&tray), vec![2]);

        // Same state twice: same result
        compute_highlights(&mut tray, &working, HighlightRule::ExactBottom);
        assert_eq!(highlighted(&tray), vec![2]);

        working.clear();
        compute_highlights(&mut tray, &working, HighlightRule::ExactBottom);
        assert_eq!(highlighted(&tray).len(), 5);
    }

    #[test]
    fn consistent_rule_accepts_prefix_moves() {
        let mut tray = tray();
        let mut working = WorkingSequence::new();
        working.append(tile(10, "R", "RG"));

        // top R, bottom RG: appending must keep the two sides prefix-compatible.
        // 1: RR / RGRG   no
        // 2: RRG / RGR   no
        // 3: RG / RGGG   yes
        // 4: RRGB / RGB  no
        // 5: RR / RGR    no
        compute_highlights(&mut tray, &working, HighlightRule::Consistent);
        assert_eq!(highlighted(&tray), vec![3]);
    }

    #[test]
    fn consistent_rule_on_empty_working_area() {
        let mut tray = tray();
        let n = compute_highlights(&mut tray, &WorkingSequence::new(), HighlightRule::Consistent);
        // Any tile may start the sequence, even RGB/B whose faces diverge
        assert_eq!(n, 5);
        assert_eq!(highlighted(&tray), vec![1, 2, 3, 4, 5]);
    }
}
