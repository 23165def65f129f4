use crate::types::config::WorkoutConfig;
use crate::types::exercise::Exercise;

/// Immutable-per-run description of the workout: the ordered exercises plus
/// the set count and rest durations. The sequencer takes one of these as a
/// snapshot at start and never reads live editor state.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub exercises: Vec<Exercise>,
    pub sets: u32,
    pub rest_between_exercises: u32,
    pub rest_between_sets: u32,
}

impl Plan {
    pub fn from_config(config: &WorkoutConfig) -> Self {
        Plan {
            exercises: config.exercises.clone(),
            sets: config.sets.max(1),
            rest_between_exercises: config.rest_between_exercises,
            rest_between_sets: config.rest_between_sets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn exercise(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    pub fn exercise_time(&self, index: usize) -> Option<u32> {
        self.exercises.get(index).map(|ex| ex.time)
    }

    /// Sum of exercise durations for a single set. Rests are not included.
    /// Saturates instead of overflowing; durations come from free-form input.
    pub fn set_time(&self) -> u32 {
        self.exercises
            .iter()
            .fold(0u32, |acc, ex| acc.saturating_add(ex.time))
    }

    /// Display estimate for the whole workout. Rest between sets is counted,
    /// rest between exercises is not, matching the setup screen summary.
    pub fn total_time(&self) -> u32 {
        self.set_time()
            .saturating_mul(self.sets)
            .saturating_add(self.rest_between_sets.saturating_mul(self.sets.saturating_sub(1)))
    }
}

impl Default for Plan {
    fn default() -> Self {
        Plan {
            exercises: Vec::new(),
            sets: 1,
            rest_between_exercises: 0,
            rest_between_sets: 0,
        }
    }
}
