use crate::types::exercise::Exercise;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// File the workout configuration is persisted to, next to the executable.
pub const CONFIG_FILE: &str = "setio_workout.json";

/// The editable workout configuration. Saved on every change and loaded once
/// at startup; the sequencer only ever sees it through a `Plan` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    pub exercises: Vec<Exercise>,
    pub sets: u32,
    pub rest_between_exercises: u32,
    pub rest_between_sets: u32,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        WorkoutConfig {
            exercises: vec![
                Exercise::new("Warm Up", 300),
                Exercise::new("Push Ups", 60),
                Exercise::new("Rest", 30),
                Exercise::new("Squats", 60),
            ],
            sets: 3,
            rest_between_exercises: 0,
            rest_between_sets: 0,
        }
    }
}

impl WorkoutConfig {
    /// Save the configuration to a JSON file at the given path.
    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }

    /// Load a configuration from a JSON file at the given path.
    pub fn load_from_file(path: &Path) -> std::io::Result<WorkoutConfig> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }

    /// A missing or unreadable file falls back to the starter plan. Never an
    /// error the user has to deal with.
    pub fn load_or_default(path: &Path) -> WorkoutConfig {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    eprintln!("Could not read {}: {}. Using defaults.", path.display(), err);
                }
                WorkoutConfig::default()
            }
        }
    }
}
