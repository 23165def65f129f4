use crate::types::plan::Plan;
use crate::types::progress::{PauseReason, Progress, TimerState};

/// A single timed phase of the workout: an exercise (by plan index), one of
/// the two rest kinds, or the end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Exercise(usize),
    RestBetweenExercises,
    RestBetweenSets,
    Done,
}

/// Read-only view handed to the timer screen after every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot {
    pub timer_state: TimerState,
    pub current_set: u32,
    pub total_sets: u32,
    pub current_segment_label: String,
    pub current_segment_name: String,
    pub time_remaining: u32,
    pub next_segment_label: String,
    pub next_segment_name: String,
    pub next_segment_time: Option<u32>,
    pub quit_confirm_pending: bool,
}

/// The workout state machine. Walks `setup -> running <-> paused -> finished`,
/// driven by one `tick()` per elapsed second plus the explicit commands.
/// Owns a `Plan` snapshot taken at `start()` and the live `Progress`.
pub struct Sequencer {
    plan: Plan,
    progress: Progress,
}

impl Sequencer {
    pub fn new() -> Self {
        Sequencer {
            plan: Plan::default(),
            progress: Progress::new(),
        }
    }

    pub fn state(&self) -> TimerState {
        self.progress.timer_state
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Begin a run from `setup` on the given plan snapshot. A plan with no
    /// exercises leaves the sequencer in `setup`.
    pub fn start(&mut self, plan: Plan) {
        if self.progress.timer_state != TimerState::Setup {
            return;
        }
        let Some(first_time) = plan.exercise_time(0) else {
            return;
        };
        self.plan = plan;
        self.progress = Progress::new();
        self.progress.time_remaining = first_time;
        self.progress.timer_state = TimerState::Running;
    }

    /// One elapsed second. At the 1 -> 0 boundary the segment transition is
    /// applied atomically instead of counting past zero; a zero-duration
    /// segment therefore advances on its first tick rather than hanging.
    pub fn tick(&mut self) {
        if self.progress.timer_state != TimerState::Running {
            return;
        }
        if self.progress.time_remaining > 1 {
            self.progress.time_remaining -= 1;
        } else {
            self.advance();
        }
    }

    pub fn pause(&mut self) {
        if self.progress.timer_state == TimerState::Running {
            self.progress.timer_state = TimerState::Paused(PauseReason::User);
        }
    }

    pub fn resume(&mut self) {
        if self.progress.timer_state == TimerState::Paused(PauseReason::User) {
            self.progress.timer_state = TimerState::Running;
        }
    }

    /// Ask for quit confirmation. Forces a pause so no tick can land while
    /// the dialog is up.
    pub fn request_quit(&mut self) {
        match self.progress.timer_state {
            TimerState::Running | TimerState::Paused(PauseReason::User) => {
                self.progress.timer_state = TimerState::Paused(PauseReason::QuitConfirm);
            }
            _ => {}
        }
    }

    pub fn confirm_quit(&mut self) {
        if self.progress.quit_confirm_pending() {
            self.progress = Progress::new();
        }
    }

    pub fn cancel_quit(&mut self) {
        if self.progress.quit_confirm_pending() {
            self.progress.timer_state = TimerState::Running;
        }
    }

    pub fn restart_after_finish(&mut self) {
        if self.progress.timer_state == TimerState::Finished {
            self.progress = Progress::new();
        }
    }

    /// The segment currently counting down.
    pub fn current_segment(&self) -> Segment {
        if self.progress.timer_state == TimerState::Finished {
            Segment::Done
        } else if self.progress.is_resting_between_sets {
            Segment::RestBetweenSets
        } else if self.progress.is_resting_between_exercises {
            Segment::RestBetweenExercises
        } else {
            Segment::Exercise(self.progress.current_exercise_index)
        }
    }

    /// Pure projection of what `advance()` would do right now. Never mutates
    /// progress; each branch mirrors the corresponding branch of `advance()`.
    pub fn peek_next(&self) -> Segment {
        let p = &self.progress;
        if self.plan.is_empty() || p.timer_state == TimerState::Finished {
            return Segment::Done;
        }
        if p.is_resting_between_sets {
            return match self.plan.exercise_time(0) {
                Some(_) => Segment::Exercise(0),
                None => Segment::Done,
            };
        }
        if p.is_resting_between_exercises {
            return match self.plan.exercise_time(p.current_exercise_index) {
                Some(_) => Segment::Exercise(p.current_exercise_index),
                None => Segment::Done,
            };
        }
        if p.current_exercise_index + 1 < self.plan.exercises.len() {
            return if self.plan.rest_between_exercises > 0 {
                Segment::RestBetweenExercises
            } else {
                Segment::Exercise(p.current_exercise_index + 1)
            };
        }
        if p.current_set < self.plan.sets {
            if self.plan.rest_between_sets > 0 {
                Segment::RestBetweenSets
            } else {
                Segment::Exercise(0)
            }
        } else {
            Segment::Done
        }
    }

    /// Segment boundary transition, invoked exactly once per boundary.
    /// Branches are mutually exclusive and evaluated against the progress as
    /// it was before any mutation. Any missing exercise ends the run instead
    /// of indexing out of range.
    fn advance(&mut self) {
        if self.plan.is_empty() {
            self.finish();
            return;
        }
        if self.progress.is_resting_between_sets {
            // Rest between sets just ended: the new set begins at exercise 0.
            self.progress.is_resting_between_sets = false;
            self.progress.is_resting_between_exercises = false;
            self.load_exercise(0);
        } else if self.progress.is_resting_between_exercises {
            // The index was already moved to the upcoming exercise when this
            // rest began.
            self.progress.is_resting_between_exercises = false;
            self.load_exercise(self.progress.current_exercise_index);
        } else if self.progress.current_exercise_index + 1 < self.plan.exercises.len() {
            let next_index = self.progress.current_exercise_index + 1;
            if self.plan.rest_between_exercises > 0 {
                self.progress.current_exercise_index = next_index;
                self.progress.is_resting_between_exercises = true;
                self.progress.time_remaining = self.plan.rest_between_exercises;
            } else {
                self.load_exercise(next_index);
            }
        } else if self.progress.current_set < self.plan.sets {
            // Last exercise of a non-final set.
            self.progress.current_set += 1;
            if self.plan.rest_between_sets > 0 {
                // The index stays on the last exercise until the rest ends.
                self.progress.is_resting_between_sets = true;
                self.progress.time_remaining = self.plan.rest_between_sets;
            } else {
                self.load_exercise(0);
            }
        } else {
            self.finish();
        }
    }

    fn load_exercise(&mut self, index: usize) {
        match self.plan.exercise_time(index) {
            Some(time) => {
                self.progress.current_exercise_index = index;
                self.progress.time_remaining = time;
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.progress.timer_state = TimerState::Finished;
        self.progress.time_remaining = 0;
        self.progress.is_resting_between_sets = false;
        self.progress.is_resting_between_exercises = false;
    }

    fn segment_name(&self, segment: Segment) -> String {
        match segment {
            Segment::Exercise(index) => self
                .plan
                .exercise(index)
                .map(|ex| ex.name.clone())
                .unwrap_or_default(),
            Segment::RestBetweenExercises => "Rest Between Exercises".to_string(),
            Segment::RestBetweenSets => "Rest Between Sets".to_string(),
            Segment::Done => "Workout Complete".to_string(),
        }
    }

    fn segment_time(&self, segment: Segment) -> Option<u32> {
        match segment {
            Segment::Exercise(index) => self.plan.exercise_time(index),
            Segment::RestBetweenExercises => Some(self.plan.rest_between_exercises),
            Segment::RestBetweenSets => Some(self.plan.rest_between_sets),
            Segment::Done => None,
        }
    }

    /// Everything the timer screen needs, with the lookahead already applied.
    pub fn snapshot(&self) -> DisplaySnapshot {
        let p = &self.progress;
        let current = self.current_segment();
        let next = self.peek_next();
        let is_last_in_set = p.current_exercise_index + 1 >= self.plan.exercises.len();

        let next_segment_label = match next {
            _ if p.is_resting_between_sets => format!("Up Next (Set {})", p.current_set),
            _ if p.is_resting_between_exercises => "Up Next".to_string(),
            Segment::RestBetweenSets => format!("Next (End of Set {})", p.current_set),
            Segment::Exercise(0) if is_last_in_set && !self.plan.exercises.is_empty() => {
                format!("Next (End of Set {})", p.current_set)
            }
            Segment::Done => "After This".to_string(),
            _ => "Next".to_string(),
        };

        DisplaySnapshot {
            timer_state: p.timer_state,
            current_set: p.current_set,
            total_sets: self.plan.sets,
            current_segment_label: if p.is_resting() { "Rest" } else { "Current" }.to_string(),
            current_segment_name: self.segment_name(current),
            time_remaining: p.time_remaining,
            next_segment_label,
            next_segment_name: self.segment_name(next),
            next_segment_time: self.segment_time(next),
            quit_confirm_pending: p.quit_confirm_pending(),
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::exercise::Exercise;

    fn plan(times: &[(&str, u32)], sets: u32, rest_ex: u32, rest_set: u32) -> Plan {
        Plan {
            exercises: times
                .iter()
                .map(|(name, time)| Exercise::new(name, *time))
                .collect(),
            sets,
            rest_between_exercises: rest_ex,
            rest_between_sets: rest_set,
        }
    }

    fn started(plan: Plan) -> Sequencer {
        let mut seq = Sequencer::new();
        seq.start(plan);
        assert_eq!(seq.state(), TimerState::Running);
        seq
    }

    /// Repeatedly advances and records each segment as it becomes current,
    /// starting with the one active now.
    fn trace(seq: &mut Sequencer, limit: usize) -> Vec<Segment> {
        let mut out = vec![seq.current_segment()];
        for _ in 0..limit {
            if seq.state() == TimerState::Finished {
                break;
            }
            seq.advance();
            out.push(seq.current_segment());
        }
        out
    }

    #[test]
    fn test_round_robin_without_rests() {
        let mut seq = started(plan(&[("A", 10), ("B", 20)], 3, 0, 0));
        let segments = trace(&mut seq, 100);

        let exercises: Vec<usize> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Exercise(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(exercises, [0, 1, 0, 1, 0, 1]);
        assert_eq!(segments.last(), Some(&Segment::Done));
        assert_eq!(seq.state(), TimerState::Finished);
    }

    #[test]
    fn test_rest_between_exercises_order() {
        let mut seq = started(plan(&[("A", 10), ("B", 20)], 1, 5, 0));
        assert_eq!(seq.current_segment(), Segment::Exercise(0));
        assert_eq!(seq.progress().time_remaining, 10);

        seq.advance();
        assert_eq!(seq.current_segment(), Segment::RestBetweenExercises);
        assert_eq!(seq.progress().time_remaining, 5);

        seq.advance();
        assert_eq!(seq.current_segment(), Segment::Exercise(1));
        assert_eq!(seq.progress().time_remaining, 20);

        seq.advance();
        assert_eq!(seq.state(), TimerState::Finished);
    }

    #[test]
    fn test_rest_between_sets_order() {
        let mut seq = started(plan(&[("A", 10)], 2, 0, 15));
        assert_eq!(seq.current_segment(), Segment::Exercise(0));

        seq.advance();
        assert_eq!(seq.current_segment(), Segment::RestBetweenSets);
        assert_eq!(seq.progress().time_remaining, 15);
        assert_eq!(seq.progress().current_set, 2);
        // The index is only reset once the rest ends.
        assert_eq!(seq.progress().current_exercise_index, 0);

        seq.advance();
        assert_eq!(seq.current_segment(), Segment::Exercise(0));
        assert_eq!(seq.progress().time_remaining, 10);

        seq.advance();
        assert_eq!(seq.state(), TimerState::Finished);
    }

    #[test]
    fn test_index_parks_on_last_exercise_during_set_rest() {
        let mut seq = started(plan(&[("A", 5), ("B", 5)], 2, 0, 10));
        seq.advance(); // A -> B
        seq.advance(); // B -> rest between sets
        assert_eq!(seq.current_segment(), Segment::RestBetweenSets);
        assert_eq!(seq.progress().current_exercise_index, 1);

        seq.advance(); // rest -> A of set 2
        assert_eq!(seq.progress().current_exercise_index, 0);
        assert_eq!(seq.current_segment(), Segment::Exercise(0));
    }

    #[test]
    fn test_lookahead_matches_advance() {
        let mut seq = started(plan(&[("A", 3), ("B", 4), ("C", 5)], 3, 7, 11));
        for _ in 0..100 {
            if seq.state() == TimerState::Finished {
                break;
            }
            let predicted = seq.peek_next();
            seq.advance();
            assert_eq!(seq.current_segment(), predicted);
        }
        assert_eq!(seq.state(), TimerState::Finished);
    }

    #[test]
    fn test_lookahead_is_side_effect_free() {
        let p = plan(&[("A", 3), ("B", 4)], 2, 5, 9);
        let mut with_peeks = started(p.clone());
        let mut without = started(p);

        let mut left = Vec::new();
        let mut right = Vec::new();
        for _ in 0..50 {
            // Hammer the lookahead on one of the two.
            for _ in 0..3 {
                let _ = with_peeks.peek_next();
                let _ = with_peeks.snapshot();
            }
            with_peeks.advance();
            without.advance();
            left.push(with_peeks.current_segment());
            right.push(without.current_segment());
        }
        assert_eq!(left, right);
    }

    #[test]
    fn test_start_with_empty_plan_is_noop() {
        let mut seq = Sequencer::new();
        seq.start(plan(&[], 3, 5, 5));
        assert_eq!(seq.state(), TimerState::Setup);
        assert_eq!(*seq.progress(), Progress::new());
    }

    #[test]
    fn test_advance_on_empty_plan_finishes() {
        // Not reachable through start(), but advance() must still degrade.
        let mut seq = Sequencer::new();
        seq.progress.timer_state = TimerState::Running;
        seq.advance();
        assert_eq!(seq.state(), TimerState::Finished);
    }

    #[test]
    fn test_missing_exercise_finishes_instead_of_panicking() {
        let mut seq = started(plan(&[("A", 5), ("B", 5)], 1, 3, 0));
        seq.advance(); // into rest, index already at 1
        seq.plan.exercises.truncate(1);
        seq.advance();
        assert_eq!(seq.state(), TimerState::Finished);
        assert_eq!(seq.progress().time_remaining, 0);
    }

    #[test]
    fn test_quit_resets_progress_to_defaults() {
        let mut seq = started(plan(&[("A", 10), ("B", 20)], 2, 5, 5));
        seq.tick();
        seq.tick();
        seq.request_quit();
        assert!(seq.progress().quit_confirm_pending());
        assert_eq!(
            seq.state(),
            TimerState::Paused(PauseReason::QuitConfirm)
        );

        seq.confirm_quit();
        assert_eq!(*seq.progress(), Progress::new());
        assert_eq!(seq.state(), TimerState::Setup);
    }

    #[test]
    fn test_cancel_quit_returns_to_running() {
        let mut seq = started(plan(&[("A", 10)], 1, 0, 0));
        seq.request_quit();
        seq.cancel_quit();
        assert_eq!(seq.state(), TimerState::Running);
        assert!(!seq.progress().quit_confirm_pending());
    }

    #[test]
    fn test_confirm_quit_requires_pending_confirmation() {
        let mut seq = started(plan(&[("A", 10)], 1, 0, 0));
        seq.pause();
        seq.confirm_quit();
        // A plain user pause must not be quittable-through.
        assert_eq!(seq.state(), TimerState::Paused(PauseReason::User));
    }

    #[test]
    fn test_pause_resume_leaves_progress_unchanged() {
        let mut seq = started(plan(&[("A", 10), ("B", 20)], 2, 0, 0));
        seq.tick();
        seq.tick();
        seq.tick();
        let before = seq.progress().clone();

        seq.pause();
        let mut paused = seq.progress().clone();
        assert_eq!(paused.timer_state, TimerState::Paused(PauseReason::User));
        paused.timer_state = before.timer_state;
        assert_eq!(paused, before);

        seq.resume();
        assert_eq!(*seq.progress(), before);
    }

    #[test]
    fn test_ticks_ignored_while_paused() {
        let mut seq = started(plan(&[("A", 10)], 1, 0, 0));
        seq.pause();
        let before = seq.progress().clone();
        for _ in 0..5 {
            seq.tick();
        }
        assert_eq!(*seq.progress(), before);
    }

    #[test]
    fn test_zero_duration_exercise_does_not_hang() {
        let mut seq = started(plan(&[("Instant", 0), ("B", 5)], 1, 0, 0));
        assert_eq!(seq.progress().time_remaining, 0);
        seq.tick();
        assert_eq!(seq.current_segment(), Segment::Exercise(1));
        assert_eq!(seq.progress().time_remaining, 5);
    }

    #[test]
    fn test_restart_after_finish_returns_to_setup() {
        let mut seq = started(plan(&[("A", 1)], 1, 0, 0));
        seq.tick();
        assert_eq!(seq.state(), TimerState::Finished);

        seq.restart_after_finish();
        assert_eq!(seq.state(), TimerState::Setup);
        assert_eq!(*seq.progress(), Progress::new());
    }

    #[test]
    fn test_full_tick_trace_warmup_squats() {
        // Warmup 5s -> Squats 10s -> rest 10s -> Warmup 5s -> Squats 10s,
        // 40 ticks in total.
        let mut seq = started(plan(&[("Warmup", 5), ("Squats", 10)], 2, 0, 10));

        let mut boundaries = vec![(0, seq.current_segment())];
        for n in 1..=40 {
            seq.tick();
            let segment = seq.current_segment();
            if boundaries.last().map(|(_, s)| *s) != Some(segment) {
                boundaries.push((n, segment));
            }
        }
        assert_eq!(
            boundaries,
            [
                (0, Segment::Exercise(0)),
                (5, Segment::Exercise(1)),
                (15, Segment::RestBetweenSets),
                (25, Segment::Exercise(0)),
                (30, Segment::Exercise(1)),
                (40, Segment::Done),
            ]
        );
        assert_eq!(seq.state(), TimerState::Finished);
        // Extra ticks after finish are ignored.
        seq.tick();
        assert_eq!(seq.state(), TimerState::Finished);
    }

    #[test]
    fn test_snapshot_labels() {
        let mut seq = started(plan(&[("A", 10), ("B", 20)], 2, 0, 15));
        let snap = seq.snapshot();
        assert_eq!(snap.current_segment_label, "Current");
        assert_eq!(snap.current_segment_name, "A");
        assert_eq!(snap.next_segment_label, "Next");
        assert_eq!(snap.next_segment_name, "B");
        assert_eq!(snap.next_segment_time, Some(20));
        assert_eq!(snap.current_set, 1);
        assert_eq!(snap.total_sets, 2);
        assert!(!snap.quit_confirm_pending);

        seq.advance(); // now on B, last of set 1
        let snap = seq.snapshot();
        assert_eq!(snap.next_segment_label, "Next (End of Set 1)");
        assert_eq!(snap.next_segment_name, "Rest Between Sets");
        assert_eq!(snap.next_segment_time, Some(15));

        seq.advance(); // resting between sets
        let snap = seq.snapshot();
        assert_eq!(snap.current_segment_label, "Rest");
        assert_eq!(snap.current_segment_name, "Rest Between Sets");
        assert_eq!(snap.next_segment_label, "Up Next (Set 2)");
        assert_eq!(snap.next_segment_name, "A");

        seq.advance(); // A of set 2
        seq.advance(); // B of set 2, last of last set
        let snap = seq.snapshot();
        assert_eq!(snap.next_segment_label, "After This");
        assert_eq!(snap.next_segment_name, "Workout Complete");
        assert_eq!(snap.next_segment_time, None);
    }

    #[test]
    fn test_snapshot_end_of_set_without_set_rest() {
        let mut seq = started(plan(&[("A", 10), ("B", 20)], 2, 0, 0));
        seq.advance(); // on B, last of set 1, no rest configured
        let snap = seq.snapshot();
        assert_eq!(snap.next_segment_label, "Next (End of Set 1)");
        assert_eq!(snap.next_segment_name, "A");
    }

    #[test]
    fn test_start_is_ignored_while_running() {
        let mut seq = started(plan(&[("A", 10)], 1, 0, 0));
        seq.tick();
        let before = seq.progress().clone();
        seq.start(plan(&[("B", 99)], 5, 0, 0));
        assert_eq!(*seq.progress(), before);
    }
}
