/// Why the timer is paused. Quit confirmation is its own pause reason so the
/// confirm/cancel commands can only ever act on a pause they caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    User,
    QuitConfirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Setup,
    Running,
    Paused(PauseReason),
    Finished,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running)
    }
}

/// Live traversal state, owned exclusively by the sequencer. Everything here
/// is reset to defaults on quit, restart, or return to setup.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub timer_state: TimerState,
    pub current_set: u32,
    pub current_exercise_index: usize,
    pub time_remaining: u32,
    pub is_resting_between_sets: bool,
    pub is_resting_between_exercises: bool,
}

impl Progress {
    pub fn new() -> Self {
        Progress {
            timer_state: TimerState::Setup,
            current_set: 1,
            current_exercise_index: 0,
            time_remaining: 0,
            is_resting_between_sets: false,
            is_resting_between_exercises: false,
        }
    }

    pub fn is_resting(&self) -> bool {
        self.is_resting_between_sets || self.is_resting_between_exercises
    }

    pub fn quit_confirm_pending(&self) -> bool {
        self.timer_state == TimerState::Paused(PauseReason::QuitConfirm)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
