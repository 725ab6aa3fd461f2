//! Level data — external difficulty input for the session.
//!
//! Levels are immutable records; the session never writes back to them.
//! Malformed data is a content defect and aborts session setup rather
//! than degrading at runtime.

use std::io;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_SPEED_LEVEL;

/// One level: a run of identical waves with shared difficulty parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub title: String,
    /// Ducks spawned per wave.
    pub ducks: u32,
    /// Number of waves in the level.
    pub waves: u32,
    /// Wave time limit in seconds.
    pub time: f64,
    /// Shots allowed per wave.
    pub bullets: u32,
    /// Flight speed level 0-10.
    pub speed: u8,
    /// Score awarded per kill.
    pub points_per_duck: u32,
}

impl Level {
    /// Kill budget the success ratio is measured against.
    pub fn total_ducks(&self) -> u32 {
        self.ducks * self.waves
    }
}

/// The ordered level sequence for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<Level>,
}

impl LevelSet {
    /// Parse and validate a level set from JSON.
    pub fn from_json(data: &str) -> io::Result<Self> {
        let set: LevelSet = serde_json::from_str(data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        set.validate()?;
        Ok(set)
    }

    /// Reject level data the session cannot run.
    pub fn validate(&self) -> io::Result<()> {
        if self.levels.is_empty() {
            return Err(invalid("level set is empty"));
        }
        for (i, level) in self.levels.iter().enumerate() {
            if level.ducks == 0 || level.waves == 0 || level.bullets == 0 {
                return Err(invalid(&format!(
                    "level {} ({}): ducks, waves, and bullets must be nonzero",
                    i, level.title
                )));
            }
            if level.time <= 0.0 {
                return Err(invalid(&format!(
                    "level {} ({}): time limit must be positive",
                    i, level.title
                )));
            }
            if level.speed > MAX_SPEED_LEVEL {
                return Err(invalid(&format!(
                    "level {} ({}): speed {} exceeds max {}",
                    i, level.title, level.speed, MAX_SPEED_LEVEL
                )));
            }
        }
        Ok(())
    }

    /// The built-in "normal" progression.
    pub fn normal() -> Self {
        let level = |title: &str, ducks, waves, time, bullets, speed, points| Level {
            title: title.to_string(),
            ducks,
            waves,
            time,
            bullets,
            speed,
            points_per_duck: points,
        };

        Self {
            levels: vec![
                level("Open Season", 2, 3, 15.0, 6, 1, 10),
                level("Winged Rush", 3, 4, 14.0, 8, 3, 15),
                level("Feather Storm", 4, 4, 12.0, 10, 5, 20),
                level("Dead Eye", 4, 5, 10.0, 10, 7, 25),
                level("Duck Typhoon", 5, 5, 10.0, 12, 10, 30),
            ],
        }
    }
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}
