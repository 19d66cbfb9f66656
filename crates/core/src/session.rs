use serde::{Deserialize, Serialize};

use crate::model::Exercise;

/// Rest interval inserted between two consecutive exercises, in seconds.
pub const REST_SECONDS: i64 = 10;

//
// ─── TIMING ────────────────────────────────────────────────────────────────────
//

/// Phase durations for one session.
///
/// The active duration comes from the caller and holds for every exercise
/// in the session. The rest interval defaults to [`REST_SECONDS`] and is
/// independent of the active duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    active_secs: i64,
    rest_secs: i64,
}

impl SessionTiming {
    /// Timing with the given active duration and the default rest interval.
    #[must_use]
    pub fn new(active_secs: i64) -> Self {
        Self {
            active_secs,
            rest_secs: REST_SECONDS,
        }
    }

    /// Overrides the rest interval.
    #[must_use]
    pub fn with_rest_secs(mut self, rest_secs: i64) -> Self {
        self.rest_secs = rest_secs;
        self
    }

    #[must_use]
    pub fn active_secs(&self) -> i64 {
        self.active_secs
    }

    #[must_use]
    pub fn rest_secs(&self) -> i64 {
        self.rest_secs
    }
}

//
// ─── PHASES AND TRANSITIONS ────────────────────────────────────────────────────
//

/// Which interval of the session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// The user is performing the current exercise.
    Active,
    /// The breather after the current exercise, before the next one.
    Rest,
}

/// Outcome of completing the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// An exercise other than the last finished; a rest interval begins.
    EnterRest,
    /// Rest ended and the next exercise begins. `completed_count` is the
    /// 1-based value to report: the backend counts an exercise the moment
    /// its active phase starts.
    EnterActive { completed_count: u32 },
    /// The last exercise finished; the session is over. There is no rest
    /// interval after the final exercise.
    Finished,
}

/// Aggregate progress view for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub is_finished: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one run-through of an ordered exercise list.
///
/// The session alternates `Active` and `Rest` phases over the list and
/// never rests after the last exercise. It owns no timer: callers run a
/// [`crate::Countdown`] per phase, call [`Self::complete_phase`] when it
/// fires, and key each countdown activation by [`Self::timer_epoch`].
///
/// Pause is orthogonal to the phase walk. Pausing freezes the caller's
/// countdown but changes neither the phase nor the index, and a phase
/// transition leaves the pause flag as it was.
///
/// # Examples
///
/// ```
/// # use posture_core::session::{ExerciseSession, SessionTiming, Transition};
/// # use posture_core::model::{Exercise, ExerciseId};
/// # use url::Url;
/// let image = Url::parse("https://cdn.example.com/a.png").unwrap();
/// let exercises = vec![
///     Exercise::new(ExerciseId::new(1), "Chin tucks", image.clone(), 1),
///     Exercise::new(ExerciseId::new(2), "Wall slides", image, 2),
/// ];
/// let mut session = ExerciseSession::new(exercises, SessionTiming::new(30));
///
/// assert_eq!(session.complete_phase(), Transition::EnterRest);
/// assert_eq!(
///     session.complete_phase(),
///     Transition::EnterActive { completed_count: 2 },
/// );
/// assert_eq!(session.complete_phase(), Transition::Finished);
/// assert!(session.is_finished());
/// ```
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    exercises: Vec<Exercise>,
    current: usize,
    phase: SessionPhase,
    paused: bool,
    timer_epoch: u64,
    finished: bool,
    timing: SessionTiming,
}

impl ExerciseSession {
    /// Creates a session positioned at the first exercise's active phase.
    ///
    /// An empty exercise list yields a session that is already finished:
    /// there is nothing to time and nothing to report, so callers get a
    /// terminal session instead of an error path.
    #[must_use]
    pub fn new(exercises: Vec<Exercise>, timing: SessionTiming) -> Self {
        let finished = exercises.is_empty();
        Self {
            exercises,
            current: 0,
            phase: SessionPhase::Active,
            paused: false,
            timer_epoch: 0,
            finished,
            timing,
        }
    }

    /// Advances the machine after the current phase's countdown fires.
    ///
    /// Completing the active phase of any exercise but the last yields
    /// `EnterRest`; completing a rest yields `EnterActive` for the next
    /// exercise; completing the last active phase yields `Finished`.
    /// Each transition into a new timed phase bumps [`Self::timer_epoch`].
    ///
    /// Calling this on a finished session yields `Finished` again and
    /// changes nothing.
    pub fn complete_phase(&mut self) -> Transition {
        if self.finished {
            return Transition::Finished;
        }

        match self.phase {
            SessionPhase::Active => {
                if self.current + 1 >= self.exercises.len() {
                    self.finished = true;
                    Transition::Finished
                } else {
                    self.phase = SessionPhase::Rest;
                    self.timer_epoch += 1;
                    Transition::EnterRest
                }
            }
            SessionPhase::Rest => {
                self.current += 1;
                self.phase = SessionPhase::Active;
                self.timer_epoch += 1;
                Transition::EnterActive {
                    completed_count: self.position(),
                }
            }
        }
    }

    /// Marks the session paused. No-op once finished.
    pub fn pause(&mut self) {
        if !self.finished {
            self.paused = true;
        }
    }

    /// Clears the paused flag. No-op once finished.
    pub fn resume(&mut self) {
        if !self.finished {
            self.paused = false;
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Zero-based index of the current exercise. During a rest this is
    /// still the exercise the rest follows.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The exercise the current phase belongs to; `None` once finished.
    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        if self.finished {
            None
        } else {
            self.exercises.get(self.current)
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.exercises.len()
    }

    /// One-based rank of the current exercise, for display and reporting.
    #[must_use]
    pub fn position(&self) -> u32 {
        u32::try_from(self.current + 1).unwrap_or(u32::MAX)
    }

    /// Exercises whose active phase has fully run.
    #[must_use]
    pub fn completed(&self) -> usize {
        if self.finished {
            self.exercises.len()
        } else {
            match self.phase {
                SessionPhase::Active => self.current,
                SessionPhase::Rest => self.current + 1,
            }
        }
    }

    /// Monotonic counter of countdown activations.
    ///
    /// Every transition into a new timed phase increments it, so a caller
    /// holding a countdown for epoch `n` knows to discard it when the
    /// session reports epoch `n + 1`.
    #[must_use]
    pub fn timer_epoch(&self) -> u64 {
        self.timer_epoch
    }

    #[must_use]
    pub fn timing(&self) -> SessionTiming {
        self.timing
    }

    /// Duration of the current phase in seconds.
    #[must_use]
    pub fn phase_seconds(&self) -> i64 {
        match self.phase {
            SessionPhase::Active => self.timing.active_secs(),
            SessionPhase::Rest => self.timing.rest_secs(),
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let completed = self.completed();
        SessionProgress {
            total: self.total(),
            completed,
            remaining: self.total().saturating_sub(completed),
            is_finished: self.finished,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExerciseId;
    use url::Url;

    fn exercise(id: u64) -> Exercise {
        let image = Url::parse("https://cdn.example.com/exercise.png").unwrap();
        Exercise::new(ExerciseId::new(id), format!("exercise {id}"), image, 1)
    }

    fn session_of(count: u64) -> ExerciseSession {
        let exercises = (1..=count).map(exercise).collect();
        ExerciseSession::new(exercises, SessionTiming::new(30))
    }

    #[test]
    fn new_session_starts_at_first_exercise() {
        let session = session_of(3);

        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.position(), 1);
        assert_eq!(session.completed(), 0);
        assert_eq!(session.timer_epoch(), 0);
        assert!(!session.is_finished());
        assert!(!session.is_paused());
        assert_eq!(session.current_exercise().unwrap().id(), ExerciseId::new(1));
    }

    #[test]
    fn empty_list_is_finished_on_arrival() {
        let mut session = ExerciseSession::new(Vec::new(), SessionTiming::new(30));

        assert!(session.is_finished());
        assert!(session.current_exercise().is_none());
        assert_eq!(session.total(), 0);
        assert_eq!(session.completed(), 0);
        assert_eq!(session.complete_phase(), Transition::Finished);

        session.pause();
        assert!(!session.is_paused());
    }

    #[test]
    fn single_exercise_finishes_without_rest() {
        let mut session = session_of(1);

        assert_eq!(session.complete_phase(), Transition::Finished);
        assert!(session.is_finished());
        assert_eq!(session.completed(), 1);
        assert!(session.current_exercise().is_none());
    }

    #[test]
    fn three_exercises_walk_active_rest_pairs() {
        let mut session = session_of(3);

        assert_eq!(session.complete_phase(), Transition::EnterRest);
        assert_eq!(session.phase(), SessionPhase::Rest);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.completed(), 1);

        assert_eq!(
            session.complete_phase(),
            Transition::EnterActive { completed_count: 2 },
        );
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.completed(), 1);

        assert_eq!(session.complete_phase(), Transition::EnterRest);
        assert_eq!(
            session.complete_phase(),
            Transition::EnterActive { completed_count: 3 },
        );
        assert_eq!(session.current_index(), 2);

        // Last exercise: no trailing rest.
        assert_eq!(session.complete_phase(), Transition::Finished);
        assert!(session.is_finished());
        assert_eq!(session.completed(), 3);
    }

    #[test]
    fn finished_session_stays_finished() {
        let mut session = session_of(1);
        assert_eq!(session.complete_phase(), Transition::Finished);

        let epoch = session.timer_epoch();
        assert_eq!(session.complete_phase(), Transition::Finished);
        assert_eq!(session.timer_epoch(), epoch);
        assert_eq!(session.completed(), 1);
    }

    #[test]
    fn timer_epoch_counts_timed_phase_entries() {
        let mut session = session_of(3);
        assert_eq!(session.timer_epoch(), 0);

        session.complete_phase(); // rest 0
        assert_eq!(session.timer_epoch(), 1);
        session.complete_phase(); // active 1
        assert_eq!(session.timer_epoch(), 2);
        session.complete_phase(); // rest 1
        session.complete_phase(); // active 2
        assert_eq!(session.timer_epoch(), 4);

        // Finishing starts no timer and leaves the epoch alone.
        session.complete_phase();
        assert_eq!(session.timer_epoch(), 4);
    }

    #[test]
    fn pause_is_orthogonal_to_transitions() {
        let mut session = session_of(2);

        session.pause();
        assert!(session.is_paused());
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.current_index(), 0);

        // A transition does not clear the pause flag.
        assert_eq!(session.complete_phase(), Transition::EnterRest);
        assert!(session.is_paused());

        session.resume();
        assert!(!session.is_paused());
    }

    #[test]
    fn pause_and_resume_are_ignored_once_finished() {
        let mut session = session_of(1);
        session.complete_phase();

        session.pause();
        assert!(!session.is_paused());
        session.resume();
        assert!(!session.is_paused());
    }

    #[test]
    fn phase_seconds_follow_the_phase() {
        let timing = SessionTiming::new(45).with_rest_secs(7);
        let mut session = ExerciseSession::new(vec![exercise(1), exercise(2)], timing);

        assert_eq!(session.phase_seconds(), 45);
        session.complete_phase();
        assert_eq!(session.phase_seconds(), 7);
    }

    #[test]
    fn default_rest_interval_is_ten_seconds() {
        let timing = SessionTiming::new(30);
        assert_eq!(timing.rest_secs(), REST_SECONDS);
        assert_eq!(timing.active_secs(), 30);
    }

    #[test]
    fn progress_summarizes_the_walk() {
        let mut session = session_of(2);

        let start = session.progress();
        assert_eq!(start.total, 2);
        assert_eq!(start.completed, 0);
        assert_eq!(start.remaining, 2);
        assert!(!start.is_finished);

        session.complete_phase(); // rest after first
        let mid = session.progress();
        assert_eq!(mid.completed, 1);
        assert_eq!(mid.remaining, 1);

        session.complete_phase(); // second active
        session.complete_phase(); // finished
        let done = session.progress();
        assert_eq!(done.completed, 2);
        assert_eq!(done.remaining, 0);
        assert!(done.is_finished);
    }
}
