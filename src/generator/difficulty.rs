/*
difficulty.rs

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

//! Difficulty progression.
//!
//! The difficulty is a pair of bonuses that shift the range of tile face lengths.
//! Winning does not raise the difficulty right away: [`DifficultyTracker::on_win_confirmed`] only
//! records that the next new game must be harder, and [`DifficultyTracker::next_game`] consumes
//! that pending raise exactly once.

use log::info;
use serde::{Deserialize, Serialize};

/// Shortest face length at the base level.
pub const BASE_MIN_LEN: usize = 1;

/// Longest face length at the base level.
pub const BASE_MAX_LEN: usize = 3;

/// Shift applied to the face length range.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct LengthBonus {
    pub min: usize,
    pub max: usize,
}

impl LengthBonus {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Bonus for the given level: `level` added to both bounds.
    pub fn level(level: usize) -> Self {
        Self::new(level, level)
    }

    /// Whether this is the easiest setting.
    pub fn is_base(&self) -> bool {
        self.min == 0 && self.max == 0
    }

    /// Inclusive range of face lengths.
    ///
    /// The upper bound never drops below the lower bound.
    pub fn length_range(&self) -> (usize, usize) {
        let low: usize = BASE_MIN_LEN + self.min;
        let high: usize = (BASE_MAX_LEN + self.max).max(low);
        (low, high)
    }
}

/// Track the difficulty across games.
#[derive(Debug, Clone, Default)]
pub struct DifficultyTracker {
    bonus: LengthBonus,

    /// Set by a win, consumed by the next new game.
    raise_pending: bool,
}

impl DifficultyTracker {
    /// Create a [`DifficultyTracker`] object starting at the given bonus.
    pub fn with_bonus(bonus: LengthBonus) -> Self {
        Self {
            bonus,
            raise_pending: false,
        }
    }

    /// Current bonus.
    pub fn bonus(&self) -> LengthBonus {
        self.bonus
    }

    /// Level shown to the player (the lower bonus, starting at 1).
    pub fn level(&self) -> usize {
        self.bonus.min + 1
    }

    /// Whether the next new game will be harder.
    pub fn can_raise(&self) -> bool {
        self.raise_pending
    }

    /// Whether the difficulty can be lowered.
    pub fn can_lower(&self) -> bool {
        !self.bonus.is_base()
    }

    /// Bonus that the next new game will use, without consuming the pending raise.
    pub fn upcoming(&self) -> LengthBonus {
        if self.raise_pending {
            LengthBonus::new(self.bonus.min + 1, self.bonus.max + 1)
        } else {
            self.bonus
        }
    }

    /// Bonus after one lowering step, or None at the easiest level.
    pub fn lowered(&self) -> Option<LengthBonus> {
        if !self.can_lower() {
            return None;
        }
        Some(LengthBonus::new(
            self.bonus.min.saturating_sub(1),
            self.bonus.max.saturating_sub(1),
        ))
    }

    /// Record a win. The raise is applied by the next [`DifficultyTracker::next_game`] call.
    pub fn on_win_confirmed(&mut self) {
        self.raise_pending = true;
    }

    /// Consume the pending raise, if any, and return the bonus for the new game.
    pub fn next_game(&mut self) -> LengthBonus {
        if self.raise_pending {
            self.raise_pending = false;
            self.bonus.min += 1;
            self.bonus.max += 1;
            info!("Difficulty raised to {:?}", self.bonus);
        }
        self.bonus
    }

    /// Lower the difficulty by one step.
    ///
    /// Return whether the difficulty changed. At the easiest level, nothing happens.
    /// A pending raise is dropped.
    pub fn lower(&mut self) -> bool {
        match self.lowered() {
            Some(bonus) => {
                self.bonus = bonus;
                self.raise_pending = false;
                info!("Difficulty lowered to {:?}", self.bonus);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_is_delayed_until_next_game() {
        let mut tracker = DifficultyTracker::default();
        tracker.on_win_confirmed();
        assert_eq!(tracker.bonus(), LengthBonus::new(0, 0));
        assert!(tracker.can_raise());

        assert_eq!(tracker.next_game(), LengthBonus::new(1, 1));
        assert!(!tracker.can_raise());

        // No win in between: no raise
        assert_eq!(tracker.next_game(), LengthBonus::new(1, 1));
    }

    #[test]
    fn several_wins_raise_once() {
        let mut tracker = DifficultyTracker::default();
        tracker.on_win_confirmed();
        tracker.on_win_confirmed();
        assert_eq!(tracker.next_game(), LengthBonus::new(1, 1));
    }

    #[test]
    fn upcoming_does_not_consume() {
        let mut tracker = DifficultyTracker::default();
        tracker.on_win_confirmed();
        assert_eq!(tracker.upcoming(), LengthBonus::new(1, 1));
        assert!(tracker.can_raise());
        assert_eq!(tracker.lowered(), None);
        tracker.next_game();
        assert_eq!(tracker.bonus(), LengthBonus::new(1, 1));
        assert_eq!(tracker.lowered(), Some(LengthBonus::new(0, 0)));
    }

    #[test]
    fn lower_at_floor_is_noop() {
        let mut tracker = DifficultyTracker::default();
        assert!(!tracker.can_lower());
        assert!(!tracker.lower());
        assert_eq!(tracker.bonus(), LengthBonus::new(0, 0));
    }

    #[test]
    fn raise_then_lower_restores_bounds() {
        let mut tracker = DifficultyTracker::with_bonus(LengthBonus::new(2, 2));
        tracker.on_win_confirmed();
        tracker.next_game();
        assert_eq!(tracker.bonus(), LengthBonus::new(3, 3));
        assert!(tracker.lower());
        assert_eq!(tracker.bonus(), LengthBonus::new(2, 2));
    }

    #[test]
    fn lower_drops_pending_raise() {
        let mut tracker = DifficultyTracker::with_bonus(LengthBonus::level(1));
        tracker.on_win_confirmed();
        assert!(tracker.lower());
        assert_eq!(tracker.next_game(), LengthBonus::new(0, 0));
    }

    #[test]
    fn length_range() {
        assert_eq!(LengthBonus::new(0, 0).length_range(), (1, 3));
        assert_eq!(LengthBonus::new(2, 1).length_range(), (3, 4));
        assert_eq!(LengthBonus::new(5, 0).length_range(), (6, 6));
        assert_eq!(DifficultyTracker::with_bonus(LengthBonus::level(2)).level(), 3);
    }
}
