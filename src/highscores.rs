/*
highscores.rs

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

//! Best times of the running session.
//!
//! The main object, [`HighScores`], maintains a scoreboard for each game mode.
//! Scores only live as long as the process: nothing is written to disk.

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use serde::Serialize;

use crate::clock::GameMode;

/// Number of entries per scoreboard (number of top scores to keep).
const BOARD_SIZE: usize = 10;

/// Object that represent a score.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// How long did it take for solving the puzzle.
    pub time: Duration,

    /// Number of tiles in the solution.
    pub tiles: usize,

    /// Difficulty level of the tray.
    pub level: usize,

    /// Completion timestamp.
    pub when: SystemTime,
}

/// Sorted list of the top scores for a mode.
#[derive(Serialize, Debug, Clone, Default)]
struct ModeScoreBoard {
    top: Vec<Score>,
}

impl ModeScoreBoard {
    /// Add a score to the scoreboard and return the position in the board, or None if the
    /// score does not make it to the board.
    ///
    /// Faster times rank first. For the same time, the shorter solution ranks first.
    /// The returned position starts at 1 (top score).
    fn add_score(&mut self, score: Score) -> Option<usize> {
        let index: usize = self
            .top
            .iter()
            .position(|s| (score.time, score.tiles) < (s.time, s.tiles))
            .unwrap_or(self.top.len());
        if index >= BOARD_SIZE {
            return None;
        }
        self.top.insert(index, score);
        self.top.truncate(BOARD_SIZE);
        Some(index + 1)
    }
}

/// List of the scoreboards for the game modes.
#[derive(Serialize, Debug, Clone, Default)]
pub struct HighScores {
    board: HashMap<GameMode, ModeScoreBoard>,
}

impl HighScores {
    /// Create a [`HighScores`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a score to the scoreboard of the given mode and return the position in the
    /// scoreboard, or None if the score does not make it to the board.
    pub fn add_score(
        &mut self,
        mode: GameMode,
        time: Duration,
        tiles: usize,
        level: usize,
    ) -> Option<usize> {
        self.board.entry(mode).or_default().add_score(Score {
            time,
            tiles,
            level,
            when: SystemTime::now(),
        })
    }

    /// Return the list of [`Score`] for the given mode.
    ///
    /// Return None when the scoreboard is empty.
    pub fn get_score(&self, mode: GameMode) -> Option<&Vec<Score>> {
        self.board
            .get(&mode)
            .map(|b| &b.top)
            .filter(|top| !top.is_empty())
    }

    /// Return whether the list of scoreboard is empty (no scoreboard for any mode)
    pub fn is_empty(&self) -> bool {
        self.board.values().all(|b| b.top.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn ranks_by_time_then_tiles() {
        let mut scores = HighScores::new();
        assert!(scores.is_empty());
        assert_eq!(scores.add_score(GameMode::Classic, secs(30), 3, 1), Some(1));
        assert_eq!(scores.add_score(GameMode::Classic, secs(10), 5, 1), Some(1));
        assert_eq!(scores.add_score(GameMode::Classic, secs(30), 2, 1), Some(2));
        assert_eq!(scores.add_score(GameMode::Classic, secs(60), 1, 1), Some(4));

        let top = scores.get_score(GameMode::Classic).expect("scores");
        let times: Vec<(u64, usize)> = top.iter().map(|s| (s.time.as_secs(), s.tiles)).collect();
        assert_eq!(times, vec![(10, 5), (30, 2), (30, 3), (60, 1)]);
    }

    #[test]
    fn boards_are_per_mode() {
        let mut scores = HighScores::new();
        scores.add_score(GameMode::TimedHard, secs(12), 2, 3);
        assert!(scores.get_score(GameMode::Classic).is_none());
        assert_eq!(scores.get_score(GameMode::TimedHard).map(|v| v.len()), Some(1));
        assert!(!scores.is_empty());
    }

    #[test]
    fn board_is_bounded() {
        let mut scores = HighScores::new();
        for i in 0..BOARD_SIZE as u64 {
            assert!(scores.add_score(GameMode::Classic, secs(10 + i), 1, 1).is_some());
        }
        // Slower than everything on a full board
        assert_eq!(scores.add_score(GameMode::Classic, secs(100), 1, 1), None);
        // Faster than everything: top position, last score dropped
        assert_eq!(scores.add_score(GameMode::Classic, secs(1), 1, 1), Some(1));
        let top = scores.get_score(GameMode::Classic).expect("scores");
        assert_eq!(top.len(), BOARD_SIZE);
        assert_eq!(top.last().map(|s| s.time), Some(secs(18)));
    }
}
