use serde::Serialize;

use posture_core::model::Exercise;
use posture_core::session::{ExerciseSession, SessionPhase};

/// Point-in-time view of a running session, published over a watch channel
/// for the presentation shell.
///
/// `timer_epoch` identifies the countdown activation the remaining time
/// belongs to; a shell animating its own local tick discards it when a
/// snapshot with a newer epoch arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub exercise_index: usize,
    pub exercise: Option<Exercise>,
    pub total: usize,
    pub remaining_secs: u32,
    pub paused: bool,
    pub timer_epoch: u64,
    pub finished: bool,
}

impl SessionSnapshot {
    /// Captures the session's current state alongside the observed
    /// remaining seconds of its countdown.
    #[must_use]
    pub fn capture(session: &ExerciseSession, remaining_secs: u32) -> Self {
        Self {
            phase: session.phase(),
            exercise_index: session.current_index(),
            exercise: session.current_exercise().cloned(),
            total: session.total(),
            remaining_secs,
            paused: session.is_paused(),
            timer_epoch: session.timer_epoch(),
            finished: session.is_finished(),
        }
    }
}
