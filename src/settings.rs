/*
settings.rs

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

//! Runtime settings.
//!
//! The [`Settings`] object groups the board geometry, the tray size, the frame pacing bounds, and
//! the highlight rule.
//! Every field has a default value, so a settings file only needs to list the values to change.
//! The file is a serialization of the [`Settings`] object in JSON format by using [`serde`].
//!
//! ```json
//! { "tray_size": 6, "highlight_rule": "Consistent" }
//! ```

use log::debug;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::guidance::HighlightRule;

/// Application settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Number of tiles in a freshly generated tray.
    pub tray_size: usize,

    /// Tile width in board units.
    pub tile_width: f64,

    /// Tile height in board units.
    pub tile_height: f64,

    /// Position of the first tray slot.
    pub tray_x: f64,
    pub tray_y: f64,

    /// Horizontal distance between two tray slots.
    pub tray_step: f64,

    /// Working area rectangle.
    pub working_x: f64,
    pub working_y: f64,
    pub working_width: f64,
    pub working_height: f64,

    /// Left margin of the first tile in the working area.
    pub working_margin: f64,

    /// Horizontal distance between two tiles in the working area.
    pub working_step: f64,

    /// Frames per second of the host loop.
    pub frame_rate: u32,

    /// Lower bound of the frame delta passed to the clock, in milliseconds.
    pub min_frame_ms: u64,

    /// Upper bound of the frame delta passed to the clock, in milliseconds.
    pub max_frame_ms: u64,

    /// Maximum number of draws before the tile generator gives up on finding a new pair.
    pub max_attempts: usize,

    /// Rule that decides which tray tiles are highlighted.
    pub highlight_rule: HighlightRule,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tray_size: 10,
            tile_width: 80.0,
            tile_height: 160.0,
            tray_x: 50.0,
            tray_y: 100.0,
            tray_step: 120.0,
            working_x: 0.0,
            working_y: 400.0,
            working_width: 1280.0,
            working_height: 200.0,
            working_margin: 50.0,
            working_step: 90.0,
            frame_rate: 60,
            min_frame_ms: 1,
            max_frame_ms: 100,
            max_attempts: 1000,
            highlight_rule: HighlightRule::default(),
        }
    }
}

impl Settings {
    /// Read the settings from the given JSON file.
    ///
    /// A missing file is not an error: the default settings are returned.
    pub fn load(path: &Path) -> Result<Settings, Box<dyn Error>> {
        let file: File = match File::open(path) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => {
                    debug!("No settings file at {path:?}, using defaults");
                    return Ok(Settings::default());
                }
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let settings: Settings = serde_json::from_reader(reader)?;
        debug!("Settings loaded from {path:?}: {settings:?}");
        Ok(settings)
    }

    /// Frame duration of the host loop.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Lower bound for the frame delta.
    pub fn min_frame(&self) -> Duration {
        Duration::from_millis(self.min_frame_ms)
    }

    /// Upper bound for the frame delta.
    pub fn max_frame(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms.max(self.min_frame_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "tray_size": 4, "highlight_rule": "Consistent" }"#)
                .expect("valid settings");
        assert_eq!(settings.tray_size, 4);
        assert_eq!(settings.highlight_rule, HighlightRule::Consistent);
        assert_eq!(settings.tile_width, 80.0);
        assert_eq!(settings.max_attempts, 1000);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = Path::new("/nonexistent/pcpuzzle/settings.json");
        let settings = Settings::load(path).expect("missing file is not an error");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut path = std::env::temp_dir();
        path.push(format!("pcpuzzle-settings-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").expect("write temp file");
        assert!(Settings::load(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn frame_bounds() {
        let settings = Settings {
            min_frame_ms: 20,
            max_frame_ms: 5,
            ..Settings::default()
        };
        assert_eq!(settings.max_frame(), Duration::from_millis(20));
        assert_eq!(
            Settings::default().frame_duration(),
            Duration::from_secs(1) / 60
        );
    }
}
