/*
clock.rs

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

//! Session clock.
//!
//! In classic mode, the clock is a stopwatch that starts with the first placement and stops when
//! the puzzle is solved.
//! In timed mode, the clock counts down from the mode time limit. The countdown is driven by the
//! frame deltas passed to [`SessionClock::tick`], and the session is locked when it reaches zero.
//!
//! ```text
//! Classic:  Idle --start--> Running --win--> Stopped
//! Timed:    NotStarted --start--> Counting --win--> Finished
//!                                     `--zero--> Expired
//! ```
//!
//! [`SessionClock::reset`] goes back to the initial state from any state.

use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use strum_macros::FromRepr;

/// Game mode.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(u8)]
pub enum GameMode {
    #[default]
    Classic,
    TimedEasy,
    TimedMedium,
    TimedHard,
}

impl GameMode {
    /// Countdown duration, or None for the untimed mode.
    pub fn time_limit(self) -> Option<Duration> {
        match self {
            GameMode::Classic => None,
            GameMode::TimedEasy => Some(Duration::from_secs(120)),
            GameMode::TimedMedium => Some(Duration::from_secs(60)),
            GameMode::TimedHard => Some(Duration::from_secs(30)),
        }
    }

    /// Mode that follows in the toggle cycle: classic, then the timed modes from easy to hard.
    pub fn next(self) -> Self {
        GameMode::from_repr(self as u8 + 1).unwrap_or(GameMode::Classic)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameMode::Classic => write!(f, "Classic"),
            GameMode::TimedEasy => write!(f, "Timed (Easy)"),
            GameMode::TimedMedium => write!(f, "Timed (Medium)"),
            GameMode::TimedHard => write!(f, "Timed (Hard)"),
        }
    }
}

/// Classic mode states.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Stopwatch {
    Idle,
    Running { start: Instant },
    Stopped { elapsed: Duration },
}

/// Timed mode states.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Countdown {
    NotStarted,
    Counting { remaining: Duration },

    /// The puzzle was solved before the end of the countdown.
    Finished { used: Duration, remaining: Duration },

    Expired,
}

/// What the renderer shows.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub enum ClockDisplay {
    Elapsed {
        elapsed: Duration,
        running: bool,
    },
    Countdown {
        remaining: Duration,
        limit: Duration,
        active: bool,
        expired: bool,
    },
}

/// Session clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SessionClock {
    Classic(Stopwatch),
    Timed { limit: Duration, state: Countdown },
}

impl SessionClock {
    /// Create a [`SessionClock`] object in the initial state of the given mode.
    pub fn new(mode: GameMode) -> Self {
        match mode.time_limit() {
            None => SessionClock::Classic(Stopwatch::Idle),
            Some(limit) => SessionClock::Timed {
                limit,
                state: Countdown::NotStarted,
            },
        }
    }

    /// Go back to the initial state.
    pub fn reset(&mut self) {
        match self {
            SessionClock::Classic(watch) => *watch = Stopwatch::Idle,
            SessionClock::Timed { state, .. } => *state = Countdown::NotStarted,
        }
    }

    /// Start the stopwatch or the countdown.
    ///
    /// Only the initial state can be started. Return whether the clock started.
    pub fn start(&mut self) -> bool {
        match self {
            SessionClock::Classic(watch @ Stopwatch::Idle) => {
                *watch = Stopwatch::Running {
                    start: Instant::now(),
                };
                true
            }
            SessionClock::Timed {
                limit,
                state: state @ Countdown::NotStarted,
            } => {
                *state = Countdown::Counting { remaining: *limit };
                true
            }
            _ => false,
        }
    }

    /// Stop the clock because the puzzle is solved.
    ///
    /// Return the elapsed time (classic) or the used time (timed), or None if the clock was not
    /// running.
    pub fn stop_on_win(&mut self) -> Option<Duration> {
        match self {
            SessionClock::Classic(watch) => {
                if let Stopwatch::Running { start } = *watch {
                    let elapsed: Duration = start.elapsed();
                    *watch = Stopwatch::Stopped { elapsed };
                    return Some(elapsed);
                }
                None
            }
            SessionClock::Timed { limit, state } => {
                if let Countdown::Counting { remaining } = *state {
                    let used: Duration = limit.saturating_sub(remaining);
                    *state = Countdown::Finished { used, remaining };
                    return Some(used);
                }
                None
            }
        }
    }

    /// Advance the countdown by the frame delta.
    ///
    /// Return `true` only on the tick that makes the countdown expire.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if let SessionClock::Timed { state, .. } = self
            && let Countdown::Counting { remaining } = *state
        {
            let remaining: Duration = remaining.saturating_sub(delta);
            if remaining.is_zero() {
                info!("Time is up");
                *state = Countdown::Expired;
                return true;
            }
            *state = Countdown::Counting { remaining };
        }
        false
    }

    /// Whether the stopwatch or the countdown is running.
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            SessionClock::Classic(Stopwatch::Running { .. })
                | SessionClock::Timed {
                    state: Countdown::Counting { .. },
                    ..
                }
        )
    }

    /// Whether the countdown reached zero.
    pub fn is_expired(&self) -> bool {
        matches!(
            self,
            SessionClock::Timed {
                state: Countdown::Expired,
                ..
            }
        )
    }

    /// Elapsed time in classic mode, time spent in timed mode.
    pub fn elapsed(&self) -> Duration {
        match self {
            SessionClock::Classic(Stopwatch::Idle) => Duration::ZERO,
            SessionClock::Classic(Stopwatch::Running { start }) => start.elapsed(),
            SessionClock::Classic(Stopwatch::Stopped { elapsed }) => *elapsed,
            SessionClock::Timed { limit, state } => match state {
                Countdown::NotStarted => Duration::ZERO,
                Countdown::Counting { remaining } => limit.saturating_sub(*remaining),
                Countdown::Finished { used, .. } => *used,
                Countdown::Expired => *limit,
            },
        }
    }

    /// Remaining time in timed mode.
    pub fn remaining(&self) -> Option<Duration> {
        match self {
            SessionClock::Classic(_) => None,
            SessionClock::Timed { limit, state } => Some(match state {
                Countdown::NotStarted => *limit,
                Countdown::Counting { remaining } | Countdown::Finished { remaining, .. } => {
                    *remaining
                }
                Countdown::Expired => Duration::ZERO,
            }),
        }
    }

    /// Clock state for the renderer.
    pub fn display(&self) -> ClockDisplay {
        match self {
            SessionClock::Classic(_) => ClockDisplay::Elapsed {
                elapsed: self.elapsed(),
                running: self.is_running(),
            },
            SessionClock::Timed { limit, .. } => ClockDisplay::Countdown {
                remaining: self.remaining().unwrap_or_default(),
                limit: *limit,
                active: self.is_running(),
                expired: self.is_expired(),
            },
        }
    }
}

/// Keep a frame delta in a sane range, so that a stalled frame does not drain the countdown.
pub fn clamp_frame_delta(delta: Duration, min: Duration, max: Duration) -> Duration {
    delta.clamp(min, max.max(min))
}

/// Split a duration in hours, minutes, and seconds.
pub fn hms(duration: Duration) -> (u64, u64, u64) {
    let secs: u64 = duration.as_secs();
    (secs / 3600, (secs % 3600) / 60, secs % 60)
}
