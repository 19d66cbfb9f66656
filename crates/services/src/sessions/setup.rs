use std::sync::Arc;

use backend::{ProblemGateway, ProgressGateway};
use posture_core::model::{Exercise, ProblemId, ProgressId};
use posture_core::session::SessionTiming;

use crate::error::SessionSetupError;

/// Everything a session runner needs, fetched and created up front.
#[derive(Debug, Clone)]
pub struct PreparedSession {
    pub exercises: Vec<Exercise>,
    pub progress_id: ProgressId,
    pub timing: SessionTiming,
}

/// Fetches a problem's exercise program and opens the progress record the
/// session will report against.
#[derive(Clone)]
pub struct SessionSetupService {
    problems: Arc<dyn ProblemGateway>,
    progress: Arc<dyn ProgressGateway>,
}

impl SessionSetupService {
    #[must_use]
    pub fn new(problems: Arc<dyn ProblemGateway>, progress: Arc<dyn ProgressGateway>) -> Self {
        Self { problems, progress }
    }

    /// Prepares a session over `problem`'s program with the given active
    /// duration per exercise.
    ///
    /// The program arrives already in session order. An empty program is
    /// not an error here; the runner completes such a session immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionSetupError::Api` when fetching the program or
    /// creating the progress record fails.
    pub async fn begin(
        &self,
        problem: ProblemId,
        active_secs: i64,
    ) -> Result<PreparedSession, SessionSetupError> {
        let exercises = self.problems.exercises_for(problem).await?;
        let total = u32::try_from(exercises.len()).unwrap_or(u32::MAX);
        let record = self.progress.create(problem, total).await?;

        Ok(PreparedSession {
            exercises,
            progress_id: record.id(),
            timing: SessionTiming::new(active_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::InMemoryBackend;
    use posture_core::model::{ExerciseId, UserId};
    use posture_core::session::REST_SECONDS;
    use url::Url;

    fn exercise(id: u64, position: u32) -> Exercise {
        let image = Url::parse("https://cdn.example.com/exercise.png").unwrap();
        Exercise::new(ExerciseId::new(id), format!("exercise {id}"), image, position)
    }

    #[tokio::test]
    async fn begin_creates_a_record_sized_to_the_program() {
        let store = InMemoryBackend::new();
        let problem = ProblemId::new(3);
        store
            .seed_exercises(problem, vec![exercise(1, 1), exercise(2, 2), exercise(3, 3)])
            .unwrap();

        let setup = SessionSetupService::new(Arc::new(store.clone()), Arc::new(store.clone()));
        let prepared = setup.begin(problem, 45).await.unwrap();

        assert_eq!(prepared.exercises.len(), 3);
        assert_eq!(prepared.timing.active_secs(), 45);
        assert_eq!(prepared.timing.rest_secs(), REST_SECONDS);

        let records = store.records_for(UserId::new(1)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), prepared.progress_id);
        assert_eq!(records[0].total(), 3);
        assert_eq!(records[0].completed(), 0);
    }

    #[tokio::test]
    async fn begin_accepts_an_empty_program() {
        let store = InMemoryBackend::new();
        let setup = SessionSetupService::new(Arc::new(store.clone()), Arc::new(store.clone()));

        let prepared = setup.begin(ProblemId::new(8), 30).await.unwrap();
        assert!(prepared.exercises.is_empty());

        let records = store.records_for(UserId::new(1)).await.unwrap();
        assert_eq!(records[0].total(), 0);
    }
}
