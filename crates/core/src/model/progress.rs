use chrono::{DateTime, Utc};

use crate::model::ids::{ProblemId, ProgressId};

/// Completion state of one exercise program.
///
/// The backend creates a record when a session is set up and the client
/// reports completed counts into it; the record is otherwise read-only on
/// this side. `completed` may momentarily trail the session on screen
/// because reports are best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    id: ProgressId,
    problem_id: ProblemId,
    completed: u32,
    total: u32,
    updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(
        id: ProgressId,
        problem_id: ProblemId,
        completed: u32,
        total: u32,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            problem_id,
            completed,
            total,
            updated_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> ProgressId {
        self.id
    }

    #[must_use]
    pub fn problem_id(&self) -> ProblemId {
        self.problem_id
    }

    /// Exercises reported as completed so far.
    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Exercises in the program when the record was created.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy of this record with a new completed count and update instant.
    #[must_use]
    pub fn with_completed(&self, completed: u32, at: DateTime<Utc>) -> Self {
        Self {
            completed,
            updated_at: at,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }

    /// Completion as a whole percentage, clamped to 100.
    ///
    /// An empty program reads as 0 rather than dividing by zero.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let ratio = u64::from(self.completed) * 100 / u64::from(self.total);
        u8::try_from(ratio.min(100)).unwrap_or(100)
    }
}
