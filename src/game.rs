/*
game.rs

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

//! Manage the status of a puzzle in progress.
//!
//! [`PuzzleSession`] owns the tray, the working sequence, the clock, and the difficulty tracker.
//! The host calls its operations for each input event and calls [`PuzzleSession::tick`] once per
//! frame. The renderer then reads the settled state.
//!
//! Within a frame, input operations come first, then the win check, then the clock tick, and then
//! the highlight pass.
//! When the countdown of a timed game expires, the drag operations are rejected until the player
//! clears the working area, starts a new game, lowers the difficulty, or changes the mode.

use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::time::{Duration, SystemTime};

use crate::clock::{GameMode, SessionClock};
use crate::generator::difficulty::{DifficultyTracker, LengthBonus};
use crate::generator::tile_factory::{GenerationError, TileFactory};
use crate::guidance::{self, HighlightRule};
use crate::highscores::HighScores;
use crate::layout::{Layout, Point};
use crate::settings::Settings;
use crate::tile::{Placement, Tile, TileId};
use crate::view::SessionView;
use crate::working::WorkingSequence;

/// Rejected drag operations. The session state is left unchanged.
#[derive(Debug, PartialEq)]
pub enum DragError {
    /// The tile is not in the tray, in the working area, or being dragged. Stale references from
    /// the host end up here.
    InvalidDragTarget(TileId),

    /// The countdown expired.
    Locked,
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DragError::InvalidDragTarget(id) => write!(f, "tile {id} cannot be dragged"),
            DragError::Locked => write!(f, "time is up"),
        }
    }
}

impl Error for DragError {}

/// Result of a drop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The tile was appended to the working area.
    Placed { won: bool },

    /// A tile pulled out of the working area was dropped outside, and is gone.
    Discarded,

    /// A tray tile was dropped outside the working area. The tray is unchanged.
    Reverted,
}

/// Where the dragged tile comes from.
#[derive(Debug, Copy, Clone, PartialEq)]
enum DragOrigin {
    /// Copy of the given tray tile.
    Tray(TileId),
    WorkingArea,
}

/// Tile being dragged.
#[derive(Debug, Clone)]
struct Drag {
    tile: Tile,
    origin: DragOrigin,
}

impl Drag {
    /// Whether the identifier designates the dragged tile (or the tray tile it was copied from).
    fn matches(&self, id: TileId) -> bool {
        self.tile.id() == id || self.origin == DragOrigin::Tray(id)
    }
}

/// Details of a solved puzzle.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct WinRecord {
    pub mode: GameMode,

    /// Elapsed time (classic) or time used from the countdown (timed).
    pub time: Duration,

    /// Number of tiles in the solution.
    pub tiles: usize,

    pub level: usize,

    /// Position in the scoreboard, if the time made it.
    pub rank: Option<usize>,

    pub when: SystemTime,
}

/// Manage the status of the puzzle in progress.
pub struct PuzzleSession {
    layout: Layout,
    tray_size: usize,
    rule: HighlightRule,
    factory: TileFactory,
    difficulty: DifficultyTracker,
    mode: GameMode,

    /// Generated tiles. They are templates: dragging one drags a copy.
    tray: Vec<Tile>,

    working: WorkingSequence,
    drag: Option<Drag>,
    clock: SessionClock,

    /// Set by the first winning placement, until the working area is cleared.
    win: Option<WinRecord>,

    scores: HighScores,
}

impl PuzzleSession {
    /// Create a [`PuzzleSession`] object and generate its first tray.
    pub fn new(
        settings: &Settings,
        factory: TileFactory,
        difficulty: DifficultyTracker,
        mode: GameMode,
    ) -> Result<Self, GenerationError> {
        let mut session = Self {
            layout: Layout::new(settings),
            tray_size: settings.tray_size,
            rule: settings.highlight_rule,
            factory,
            difficulty,
            mode,
            tray: Vec::new(),
            working: WorkingSequence::new(),
            drag: None,
            clock: SessionClock::new(mode),
            win: None,
            scores: HighScores::new(),
        };
        let bonus: LengthBonus = session.difficulty.bonus();
        let tray: Vec<Tile> = session.factory.generate_tray(session.tray_size, bonus)?;
        session.install_tray(tray);
        Ok(session)
    }

    /// Put the tray tiles back to their slots.
    pub fn place_in_tray(&mut self) {
        for (i, tile) in self.tray.iter_mut().enumerate() {
            tile.position = self.layout.tray_slot(i);
            tile.stop_drag(Placement::InTray);
        }
    }

    /// Replace the tray and start over with an empty working area.
    fn install_tray(&mut self, tray: Vec<Tile>) {
        self.tray = tray;
        self.drag = None;
        self.working.clear();
        self.clock.reset();
        self.win = None;
        self.place_in_tray();
        self.evaluate();
    }

    /// Recompute the highlighted tray tiles.
    fn evaluate(&mut self) {
        guidance::compute_highlights(&mut self.tray, &self.working, self.rule);
    }

    /// Check the working area and record the win the first time the puzzle is solved.
    ///
    /// Return whether the working area is a solution.
    fn check_win(&mut self) -> bool {
        if self.clock.is_expired() || !self.working.is_winning() {
            return false;
        }
        if self.win.is_some() {
            return true;
        }
        let time: Duration = match self.clock.stop_on_win() {
            Some(t) => t,
            None => self.clock.elapsed(),
        };
        let level: usize = self.difficulty.level();
        let tiles: usize = self.working.len();
        let rank: Option<usize> = self.scores.add_score(self.mode, time, tiles, level);
        self.difficulty.on_win_confirmed();
        info!(
            "Puzzle solved in {:.1}s with {tiles} tiles (mode {}, level {level})",
            time.as_secs_f64(),
            self.mode
        );
        self.win = Some(WinRecord {
            mode: self.mode,
            time,
            tiles,
            level,
            rank,
            when: SystemTime::now(),
        });
        true
    }

    /// Whether the drag operations are rejected.
    pub fn is_locked(&self) -> bool {
        self.clock.is_expired()
    }

    /// Start dragging a tile and return the identifier of the dragged tile.
    ///
    /// Dragging a tray tile drags a new copy of it. Dragging a tile of the working area removes
    /// it from the working sequence until it is dropped.
    pub fn begin_drag(&mut self, id: TileId, pointer: Point) -> Result<TileId, DragError> {
        if self.is_locked() {
            return Err(DragError::Locked);
        }
        if self.drag.is_some() {
            return Err(DragError::InvalidDragTarget(id));
        }

        let mut drag: Drag = if let Some(template) = self.tray.iter().find(|t| t.id() == id) {
            let copy_id: TileId = self.factory.next_id();
            Drag {
                tile: template.clone_for_placement(copy_id),
                origin: DragOrigin::Tray(id),
            }
        } else if let Some(tile) = self.working.remove(id) {
            self.working.reposition(&self.layout);
            self.evaluate();
            Drag {
                tile,
                origin: DragOrigin::WorkingArea,
            }
        } else {
            debug!("No tile {id} to drag");
            return Err(DragError::InvalidDragTarget(id));
        };

        drag.tile.start_drag(pointer);
        let dragged: TileId = drag.tile.id();
        debug!("Dragging {} ({:?})", drag.tile, drag.origin);
        self.drag = Some(drag);
        Ok(dragged)
    }

    /// Move the dragged tile with the pointer.
    pub fn update_drag(&mut self, id: TileId, pointer: Point) -> Result<(), DragError> {
        if self.is_locked() {
            return Err(DragError::Locked);
        }
        match self.drag.as_mut() {
            Some(drag) if drag.matches(id) => {
                drag.tile.update_drag(pointer);
                Ok(())
            }
            _ => Err(DragError::InvalidDragTarget(id)),
        }
    }

    /// Drop the dragged tile.
    ///
    /// Inside the working area, the tile is appended to the working sequence, the clock starts if
    /// this is the first placement, and the win condition is checked.
    /// Outside, a tile that came from the working area is discarded and a tray copy is dropped.
    pub fn end_drag(&mut self, id: TileId, drop: Point) -> Result<DropOutcome, DragError> {
        if self.is_locked() {
            return Err(DragError::Locked);
        }
        let mut drag: Drag = match self.drag.take() {
            Some(drag) if drag.matches(id) => drag,
            other => {
                self.drag = other;
                return Err(DragError::InvalidDragTarget(id));
            }
        };
        drag.tile.update_drag(drop);

        let outcome: DropOutcome = if self.layout.working_area().contains(drop) {
            let first: bool = self.working.is_empty();
            debug!("Placing {}", drag.tile);
            self.working.append(drag.tile);
            self.working.reposition(&self.layout);
            if first && self.clock.start() {
                info!("Clock started ({})", self.mode);
            }
            DropOutcome::Placed {
                won: self.check_win(),
            }
        } else {
            match drag.origin {
                DragOrigin::WorkingArea => {
                    debug!("Discarding {}", drag.tile);
                    DropOutcome::Discarded
                }
                DragOrigin::Tray(_) => DropOutcome::Reverted,
            }
        };
        self.evaluate();
        Ok(outcome)
    }

    /// Give up the current drag, as if the tile had not been picked up.
    fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take()
            && drag.origin == DragOrigin::WorkingArea
        {
            self.working.append(drag.tile);
            self.working.reposition(&self.layout);
        }
    }

    /// Pointer pressed: start dragging the tile under the pointer, if any.
    ///
    /// Tray tiles are tested first, then the working area from the topmost tile.
    pub fn pointer_down(&mut self, point: Point) -> Option<TileId> {
        if self.is_locked() || self.drag.is_some() {
            return None;
        }
        let id: TileId = self
            .tray
            .iter()
            .find(|t| t.contains_point(point))
            .map(|t| t.id())
            .or_else(|| self.working.tile_at(point))?;
        self.begin_drag(id, point).ok()
    }

    /// Pointer moved. Return whether a tile follows the pointer.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        match self.drag.as_ref().map(|d| d.tile.id()) {
            Some(id) => self.update_drag(id, point).is_ok(),
            None => false,
        }
    }

    /// Pointer released: drop the dragged tile, if any.
    pub fn pointer_up(&mut self, point: Point) -> Option<DropOutcome> {
        let id: TileId = self.drag.as_ref()?.tile.id();
        self.end_drag(id, point).ok()
    }

    /// Remove every tile from the working area and reset the clock.
    pub fn clear_working_area(&mut self) {
        self.drag = None;
        self.working.clear();
        self.clock.reset();
        self.win = None;
        self.evaluate();
        info!("Working area cleared");
    }

    /// Generate a new tray. The difficulty is raised if the previous puzzle was solved.
    ///
    /// # Errors
    ///
    /// If the tray cannot be generated, the current puzzle is kept and the pending raise is not
    /// consumed.
    pub fn start_new_game(&mut self) -> Result<(), GenerationError> {
        let bonus: LengthBonus = self.difficulty.upcoming();
        let tray: Vec<Tile> = self.factory.generate_tray(self.tray_size, bonus)?;
        self.difficulty.next_game();
        self.install_tray(tray);
        info!("New game (level {}, {})", self.difficulty.level(), self.mode);
        Ok(())
    }

    /// Lower the difficulty and generate a new tray. Return false at the easiest level, where
    /// nothing happens.
    pub fn lower_difficulty(&mut self) -> Result<bool, GenerationError> {
        let Some(bonus) = self.difficulty.lowered() else {
            return Ok(false);
        };
        let tray: Vec<Tile> = self.factory.generate_tray(self.tray_size, bonus)?;
        self.difficulty.lower();
        self.install_tray(tray);
        info!("New game (level {}, {})", self.difficulty.level(), self.mode);
        Ok(true)
    }

    /// Switch to the next game mode.
    pub fn toggle_mode(&mut self) -> bool {
        self.set_mode(self.mode.next())
    }

    /// Switch to the given mode: the working area is cleared and the clock reset.
    ///
    /// Nothing happens while a tile is dragged, or if the mode does not change.
    pub fn set_mode(&mut self, mode: GameMode) -> bool {
        if self.drag.is_some() || mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.clock = SessionClock::new(mode);
        self.working.clear();
        self.win = None;
        self.evaluate();
        info!("Mode set to {mode}");
        true
    }

    /// Advance the session by one frame. Return `true` on the frame where the countdown expires.
    ///
    /// While a tile is dragged, the working sequence is incomplete and the win check waits for
    /// the drop.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.drag.is_none() {
            self.check_win();
        }
        let expired: bool = self.clock.tick(delta);
        if expired {
            self.cancel_drag();
        }
        self.evaluate();
        expired
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tray(&self) -> &[Tile] {
        &self.tray
    }

    pub fn working(&self) -> &WorkingSequence {
        &self.working
    }

    /// Tile being dragged.
    pub fn dragged(&self) -> Option<&Tile> {
        self.drag.as_ref().map(|d| &d.tile)
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> &DifficultyTracker {
        &self.difficulty
    }

    /// Win of the current puzzle.
    pub fn win(&self) -> Option<&WinRecord> {
        self.win.as_ref()
    }

    pub fn is_won(&self) -> bool {
        self.win.is_some()
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Snapshot of the settled state for the renderers.
    pub fn view(&self) -> SessionView {
        SessionView::new(self)
    }

    /// Replace the tray with tiles built from letter faces. Test helper.
    #[cfg(test)]
    pub fn set_tray(&mut self, faces: &[(&str, &str)]) {
        use crate::generator::color::face;
        let tray: Vec<Tile> = faces
            .iter()
            .map(|(top, bottom)| self.factory.build(face(top), face(bottom)))
            .collect();
        self.install_tray(tray);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockDisplay;
    use crate::generator::color::face;

    fn session(mode: GameMode) -> PuzzleSession {
        let settings = Settings::default();
        PuzzleSession::new(
            &settings,
            TileFactory::with_seed(&settings, 42),
            DifficultyTracker::default(),
            mode,
        )
        .expect("session")
    }

    fn drop_point() -> Point {
        Point::new(640.0, 500.0)
    }

    fn outside() -> Point {
        Point::new(640.0, 680.0)
    }

    /// Drag the tray tile at the given index into the working area.
    fn place(s: &mut PuzzleSession, index: usize) -> DropOutcome {
        let id = s.tray()[index].id();
        let start = s.tray()[index].bounds().center();
        let dragged = s.begin_drag(id, start).expect("begin");
        s.update_drag(dragged, drop_point()).expect("update");
        s.end_drag(dragged, drop_point()).expect("end")
    }

    fn highlighted(s: &PuzzleSession) -> Vec<usize> {
        s.tray()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.highlighted)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn new_session_has_laid_out_tray() {
        let s = session(GameMode::Classic);
        assert_eq!(s.tray().len(), 10);
        for (i, tile) in s.tray().iter().enumerate() {
            assert_eq!(tile.position, s.layout().tray_slot(i));
            assert_eq!(tile.placement, Placement::InTray);
            assert!(tile.highlighted);
        }
        assert!(s.working().is_empty());
        assert!(!s.clock().is_running());
    }

    #[test]
    fn order_sensitive_mismatch_does_not_win() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("R", "RG"), ("RG", "R")]);
        assert_eq!(place(&mut s, 0), DropOutcome::Placed { won: false });
        assert_eq!(place(&mut s, 1), DropOutcome::Placed { won: false });
        let (top, bottom) = s.working().concat();
        assert_eq!(top, face("RRG"));
        assert_eq!(bottom, face("RGR"));
        assert!(!s.is_won());
        assert!(s.clock().is_running());
    }

    #[test]
    fn symmetric_tile_wins_immediately() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("B", "B"), ("R", "G")]);
        assert_eq!(place(&mut s, 0), DropOutcome::Placed { won: true });
        assert!(s.is_won());
        assert!(!s.clock().is_running());
        assert!(s.difficulty().can_raise());
        let win = s.win().expect("win record");
        assert_eq!(win.tiles, 1);
        assert_eq!(win.rank, Some(1));
        assert_eq!(win.mode, GameMode::Classic);
    }

    #[test]
    fn tray_template_stays_and_copies_are_distinct() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("R", "RR"), ("RR", "R")]);
        let template = s.tray()[0].id();
        place(&mut s, 0);
        place(&mut s, 0);
        assert_eq!(s.tray().len(), 2);
        assert_eq!(s.tray()[0].id(), template);
        assert_eq!(s.working().len(), 2);
        let ids: Vec<TileId> = s.working().tiles().iter().map(|t| t.id()).collect();
        assert_ne!(ids[0], ids[1]);
        assert!(!ids.contains(&template));
        for (i, tile) in s.working().tiles().iter().enumerate() {
            assert_eq!(tile.position, s.layout().working_slot(i));
            assert_eq!(tile.placement, Placement::InWorkingArea);
        }
    }

    #[test]
    fn highlights_follow_the_bottom_concatenation() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("R", "RG"), ("RG", "R"), ("RGB", "B"), ("G", "G")]);
        assert_eq!(highlighted(&s), vec![0, 1, 2, 3]);
        place(&mut s, 0);
        assert_eq!(highlighted(&s), vec![1]);
        s.clear_working_area();
        assert_eq!(highlighted(&s), vec![0, 1, 2, 3]);
    }

    #[test]
    fn tray_drop_outside_reverts() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("R", "G")]);
        let id = s.tray()[0].id();
        let dragged = s.begin_drag(id, s.tray()[0].bounds().center()).expect("begin");
        assert!(s.dragged().is_some());
        assert_eq!(s.end_drag(dragged, outside()), Ok(DropOutcome::Reverted));
        assert!(s.dragged().is_none());
        assert!(s.working().is_empty());
        assert_eq!(s.tray()[0].position, s.layout().tray_slot(0));
        assert!(!s.clock().is_running());
    }

    #[test]
    fn working_tile_pulled_out_is_discarded() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("R", "G"), ("G", "R")]);
        place(&mut s, 0);
        place(&mut s, 1);
        let first = s.working().tiles()[0].id();
        let start = s.working().tiles()[0].bounds().center();

        s.begin_drag(first, start).expect("begin");
        // Removed for the duration of the drag
        assert_eq!(s.working().len(), 1);
        assert_eq!(s.working().concat(), (face("G"), face("R")));

        assert_eq!(s.end_drag(first, outside()), Ok(DropOutcome::Discarded));
        assert_eq!(s.working().len(), 1);
        assert_eq!(s.working().tiles()[0].position, s.layout().working_slot(0));
    }

    #[test]
    fn repositioning_moves_tile_to_the_end() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("RG", "R"), ("G", "GG"), ("B", "B")]);
        place(&mut s, 1);
        place(&mut s, 0);
        assert!(!s.is_won());

        // Move G/GG after RG/R: RG + G = RGG, R + GG = RGG
        let moved = s.working().tiles()[0].id();
        let start = s.working().tiles()[0].bounds().center();
        s.begin_drag(moved, start).expect("begin");
        assert_eq!(
            s.end_drag(moved, drop_point()),
            Ok(DropOutcome::Placed { won: true })
        );
        assert_eq!(s.working().tiles()[1].id(), moved);
        assert!(s.is_won());
    }

    #[test]
    fn invalid_targets_are_rejected_without_change() {
        let mut s = session(GameMode::Classic);
        let stale = TileId(9999);
        assert_eq!(
            s.begin_drag(stale, drop_point()),
            Err(DragError::InvalidDragTarget(stale))
        );
        assert_eq!(
            s.update_drag(stale, drop_point()),
            Err(DragError::InvalidDragTarget(stale))
        );
        assert_eq!(
            s.end_drag(stale, drop_point()),
            Err(DragError::InvalidDragTarget(stale))
        );

        // A second drag while dragging is rejected, and the first drag survives
        let a = s.tray()[0].id();
        let b = s.tray()[1].id();
        let dragged = s.begin_drag(a, s.tray()[0].bounds().center()).expect("begin");
        assert_eq!(
            s.begin_drag(b, drop_point()),
            Err(DragError::InvalidDragTarget(b))
        );
        assert_eq!(
            s.end_drag(b, drop_point()),
            Err(DragError::InvalidDragTarget(b))
        );
        assert_eq!(s.dragged().map(|t| t.id()), Some(dragged));
        assert!(s.working().is_empty());
    }

    #[test]
    fn pointer_events_drive_drags() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("R", "R"), ("G", "B")]);
        let on_second = s.tray()[1].bounds().center();
        assert!(s.pointer_down(Point::new(5.0, 5.0)).is_none());
        assert!(!s.pointer_move(drop_point()));
        assert!(s.pointer_up(drop_point()).is_none());

        assert!(s.pointer_down(on_second).is_some());
        assert!(s.pointer_move(Point::new(300.0, 450.0)));
        assert_eq!(
            s.pointer_up(drop_point()),
            Some(DropOutcome::Placed { won: false })
        );

        // Pick it again from the working area and throw it away
        let on_placed = s.working().tiles()[0].bounds().center();
        assert!(s.pointer_down(on_placed).is_some());
        assert_eq!(s.pointer_up(outside()), Some(DropOutcome::Discarded));
        assert!(s.working().is_empty());
    }

    #[test]
    fn clear_resets_clock_and_win() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("B", "B")]);
        place(&mut s, 0);
        assert!(s.is_won());
        s.clear_working_area();
        assert!(!s.is_won());
        assert!(s.working().is_empty());
        assert_eq!(
            s.clock().display(),
            ClockDisplay::Elapsed {
                elapsed: Duration::ZERO,
                running: false
            }
        );
        // Clearing an empty area is harmless
        s.clear_working_area();
        assert!(s.working().is_empty());
    }

    #[test]
    fn difficulty_rises_only_after_a_win() {
        let mut s = session(GameMode::Classic);
        s.start_new_game().expect("new game");
        assert_eq!(s.difficulty().bonus(), LengthBonus::new(0, 0));

        s.set_tray(&[("G", "G")]);
        place(&mut s, 0);
        assert!(s.difficulty().can_raise());
        s.start_new_game().expect("new game");
        assert_eq!(s.difficulty().bonus(), LengthBonus::new(1, 1));
        assert!(!s.difficulty().can_raise());
        for tile in s.tray() {
            assert!(tile.top().len() >= 2 && tile.bottom().len() >= 2);
        }
        assert!(!s.is_won());
        assert!(s.working().is_empty());
    }

    #[test]
    fn lowering_difficulty() {
        let mut s = session(GameMode::Classic);
        assert_eq!(s.lower_difficulty(), Ok(false));
        assert_eq!(s.difficulty().bonus(), LengthBonus::new(0, 0));

        s.set_tray(&[("G", "G")]);
        place(&mut s, 0);
        s.start_new_game().expect("new game");
        assert_eq!(s.difficulty().bonus(), LengthBonus::new(1, 1));

        place(&mut s, 0);
        assert_eq!(s.lower_difficulty(), Ok(true));
        assert_eq!(s.difficulty().bonus(), LengthBonus::new(0, 0));
        assert!(s.working().is_empty());
        assert!(!s.clock().is_running());
        assert_eq!(s.tray().len(), 10);
    }

    #[test]
    fn mode_switch_clears_and_resets() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("R", "G"), ("G", "R")]);
        place(&mut s, 0);
        assert!(s.toggle_mode());
        assert_eq!(s.mode(), GameMode::TimedEasy);
        assert!(s.working().is_empty());
        assert_eq!(s.clock().remaining(), Some(Duration::from_secs(120)));
        assert!(!s.clock().is_running());
        assert_eq!(s.tray().len(), 2);

        assert!(!s.set_mode(GameMode::TimedEasy));

        // Ignored mid-drag
        let id = s.tray()[0].id();
        s.begin_drag(id, s.tray()[0].bounds().center()).expect("begin");
        assert!(!s.toggle_mode());
        assert_eq!(s.mode(), GameMode::TimedEasy);
    }

    #[test]
    fn countdown_starts_with_first_placement() {
        let mut s = session(GameMode::TimedHard);
        s.set_tray(&[("R", "G"), ("G", "R")]);
        s.tick(Duration::from_secs(5));
        assert_eq!(s.clock().remaining(), Some(Duration::from_secs(30)));
        place(&mut s, 0);
        assert!(s.clock().is_running());
        s.tick(Duration::from_secs(5));
        assert_eq!(s.clock().remaining(), Some(Duration::from_secs(25)));
    }

    #[test]
    fn expiry_locks_placements() {
        let mut s = session(GameMode::TimedHard);
        s.set_tray(&[("R", "G"), ("G", "R")]);
        place(&mut s, 0);

        let mut expirations = 0;
        for _ in 0..400 {
            if s.tick(Duration::from_millis(100)) {
                expirations += 1;
            }
        }
        assert_eq!(expirations, 1);
        assert!(s.is_locked());
        assert_eq!(s.clock().remaining(), Some(Duration::ZERO));

        let id = s.tray()[1].id();
        assert_eq!(
            s.begin_drag(id, s.tray()[1].bounds().center()),
            Err(DragError::Locked)
        );
        assert!(s.pointer_down(s.tray()[1].bounds().center()).is_none());

        // Control actions still work and unlock
        s.clear_working_area();
        assert!(!s.is_locked());
        assert!(s.begin_drag(id, s.tray()[1].bounds().center()).is_ok());
    }

    #[test]
    fn expiry_cancels_active_drag() {
        let mut s = session(GameMode::TimedHard);
        s.set_tray(&[("R", "G"), ("G", "R")]);
        place(&mut s, 0);
        let placed = s.working().tiles()[0].id();
        s.begin_drag(placed, s.working().tiles()[0].bounds().center())
            .expect("begin");
        assert!(s.working().is_empty());

        assert!(s.tick(Duration::from_secs(31)));
        assert!(s.dragged().is_none());
        assert_eq!(s.working().len(), 1);
        assert_eq!(s.working().tiles()[0].placement, Placement::InWorkingArea);
    }

    #[test]
    fn timed_win_records_used_time() {
        let mut s = session(GameMode::TimedMedium);
        s.set_tray(&[("RG", "R"), ("G", "GG")]);
        place(&mut s, 0);
        s.tick(Duration::from_secs(12));
        assert_eq!(place(&mut s, 1), DropOutcome::Placed { won: true });
        let win = s.win().expect("win");
        assert_eq!(win.time, Duration::from_secs(12));
        assert_eq!(win.tiles, 2);

        // Countdown halted
        s.tick(Duration::from_secs(100));
        assert!(!s.is_locked());
        assert_eq!(s.clock().remaining(), Some(Duration::from_secs(48)));
    }

    #[test]
    fn partial_sequence_during_drag_does_not_win() {
        let mut s = session(GameMode::Classic);
        s.set_tray(&[("RG", "R"), ("B", "G"), ("G", "GG")]);
        for i in 0..3 {
            assert_eq!(place(&mut s, i), DropOutcome::Placed { won: false });
        }

        // Without B/G, the remaining tiles spell RGG on both sides
        let middle = s.working().tiles()[1].id();
        let start = s.working().tiles()[1].bounds().center();
        s.begin_drag(middle, start).expect("begin");
        assert!(s.working().is_winning());
        s.tick(Duration::from_millis(16));
        assert!(!s.is_won());
        assert!(s.clock().is_running());
        assert!(!s.difficulty().can_raise());

        assert_eq!(
            s.end_drag(middle, drop_point()),
            Ok(DropOutcome::Placed { won: false })
        );
        s.tick(Duration::from_millis(16));
        assert!(!s.is_won());
        assert!(s.clock().is_running());
        assert!(s.scores().is_empty());
    }

    #[test]
    fn exhausted_generation_is_reported() {
        let settings = Settings {
            tray_size: 39 * 39 + 1,
            max_attempts: 5,
            ..Settings::default()
        };
        let ret = PuzzleSession::new(
            &settings,
            TileFactory::with_seed(&settings, 1),
            DifficultyTracker::default(),
            GameMode::Classic,
        );
        assert!(matches!(ret, Err(GenerationError::Exhausted { attempts: 5 })));
    }
}
