use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use posture_core::model::{
    Exercise, Physiotherapist, PostureProblem, Prize, ProblemId, ProgressId, ProgressRecord,
    User, UserId, UserProfile,
};
use reqwest::StatusCode;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by backend gateways.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not signed in or token rejected")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

//
// ─── GATEWAY CONTRACTS ─────────────────────────────────────────────────────────
//

/// Account data for the signed-in user.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Fetch the account the configured token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when no account is signed in.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// Fetch the body measurements attached to an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when the profile was never filled in.
    async fn profile(&self, user: UserId) -> Result<UserProfile, ApiError>;

    /// Fetch the account's prizes, awarded and locked alike.
    async fn prizes(&self, user: UserId) -> Result<Vec<Prize>, ApiError>;
}

/// Posture problems and their exercise programs.
#[async_trait]
pub trait ProblemGateway: Send + Sync {
    /// Problems on file for an account.
    async fn problems_for(&self, user: UserId) -> Result<Vec<PostureProblem>, ApiError>;

    /// The exercise program for a problem, in session order.
    ///
    /// An empty program is a valid answer; sessions over it complete
    /// immediately.
    async fn exercises_for(&self, problem: ProblemId) -> Result<Vec<Exercise>, ApiError>;
}

/// Progress records that sessions report into.
#[async_trait]
pub trait ProgressGateway: Send + Sync {
    /// Open a progress record for a session over `problem`'s program.
    async fn create(&self, problem: ProblemId, total: u32) -> Result<ProgressRecord, ApiError>;

    /// Report a new completed count. The backend keeps the last write.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when the record does not exist.
    async fn update_completed(&self, id: ProgressId, completed: u32) -> Result<(), ApiError>;

    /// Progress records on file for an account.
    async fn records_for(&self, user: UserId) -> Result<Vec<ProgressRecord>, ApiError>;
}

/// Physiotherapist directory.
#[async_trait]
pub trait TherapistGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<Physiotherapist>, ApiError>;
}

/// Posture analysis of camera captures.
#[async_trait]
pub trait DetectionGateway: Send + Sync {
    /// Analyze one capture and return the detected problems.
    async fn detect(&self, image: Vec<u8>) -> Result<Vec<PostureProblem>, ApiError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

/// In-memory implementation of every gateway, for tests and prototyping.
///
/// The store models a single signed-in account: `records_for` answers with
/// every record regardless of the user id, and `detect` replays whatever
/// findings were seeded last.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    user: Arc<Mutex<Option<User>>>,
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
    prizes: Arc<Mutex<HashMap<UserId, Vec<Prize>>>>,
    problems: Arc<Mutex<HashMap<UserId, Vec<PostureProblem>>>>,
    exercises: Arc<Mutex<HashMap<ProblemId, Vec<Exercise>>>>,
    records: Arc<Mutex<Vec<ProgressRecord>>>,
    updates: Arc<Mutex<Vec<(ProgressId, u32)>>>,
    therapists: Arc<Mutex<Vec<Physiotherapist>>>,
    findings: Arc<Mutex<Vec<PostureProblem>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, ApiError> {
    mutex.lock().map_err(|e| ApiError::Unavailable(e.to_string()))
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signs an account in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn seed_user(&self, user: User) -> Result<(), ApiError> {
        *lock(&self.user)? = Some(user);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn seed_profile(&self, profile: UserProfile) -> Result<(), ApiError> {
        lock(&self.profiles)?.insert(profile.user_id(), profile);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn seed_prizes(&self, user: UserId, prizes: Vec<Prize>) -> Result<(), ApiError> {
        lock(&self.prizes)?.insert(user, prizes);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn seed_problems(&self, user: UserId, problems: Vec<PostureProblem>) -> Result<(), ApiError> {
        lock(&self.problems)?.insert(user, problems);
        Ok(())
    }

    /// Seeds a problem's exercise program. The order given here is the
    /// session order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn seed_exercises(&self, problem: ProblemId, exercises: Vec<Exercise>) -> Result<(), ApiError> {
        lock(&self.exercises)?.insert(problem, exercises);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn seed_record(&self, record: ProgressRecord) -> Result<(), ApiError> {
        lock(&self.records)?.push(record);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn seed_therapists(&self, therapists: Vec<Physiotherapist>) -> Result<(), ApiError> {
        *lock(&self.therapists)? = therapists;
        Ok(())
    }

    /// Seeds what the next `detect` calls answer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn seed_findings(&self, findings: Vec<PostureProblem>) -> Result<(), ApiError> {
        *lock(&self.findings)? = findings;
        Ok(())
    }

    /// Every successful `update_completed` call, in order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn recorded_updates(&self) -> Result<Vec<(ProgressId, u32)>, ApiError> {
        Ok(lock(&self.updates)?.clone())
    }
}

#[async_trait]
impl AccountGateway for InMemoryBackend {
    async fn current_user(&self) -> Result<User, ApiError> {
        lock(&self.user)?.clone().ok_or(ApiError::Unauthorized)
    }

    async fn profile(&self, user: UserId) -> Result<UserProfile, ApiError> {
        lock(&self.profiles)?.get(&user).cloned().ok_or(ApiError::NotFound)
    }

    async fn prizes(&self, user: UserId) -> Result<Vec<Prize>, ApiError> {
        Ok(lock(&self.prizes)?.get(&user).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ProblemGateway for InMemoryBackend {
    async fn problems_for(&self, user: UserId) -> Result<Vec<PostureProblem>, ApiError> {
        Ok(lock(&self.problems)?.get(&user).cloned().unwrap_or_default())
    }

    async fn exercises_for(&self, problem: ProblemId) -> Result<Vec<Exercise>, ApiError> {
        Ok(lock(&self.exercises)?.get(&problem).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ProgressGateway for InMemoryBackend {
    async fn create(&self, problem: ProblemId, total: u32) -> Result<ProgressRecord, ApiError> {
        let record = ProgressRecord::new(
            ProgressId::new(Uuid::new_v4()),
            problem,
            0,
            total,
            Utc::now(),
        );
        lock(&self.records)?.push(record.clone());
        Ok(record)
    }

    async fn update_completed(&self, id: ProgressId, completed: u32) -> Result<(), ApiError> {
        let mut records = lock(&self.records)?;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(ApiError::NotFound)?;
        *record = record.with_completed(completed, Utc::now());
        drop(records);

        lock(&self.updates)?.push((id, completed));
        Ok(())
    }

    async fn records_for(&self, _user: UserId) -> Result<Vec<ProgressRecord>, ApiError> {
        Ok(lock(&self.records)?.clone())
    }
}

#[async_trait]
impl TherapistGateway for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Physiotherapist>, ApiError> {
        Ok(lock(&self.therapists)?.clone())
    }
}

#[async_trait]
impl DetectionGateway for InMemoryBackend {
    async fn detect(&self, _image: Vec<u8>) -> Result<Vec<PostureProblem>, ApiError> {
        Ok(lock(&self.findings)?.clone())
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates every gateway behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Backend {
    pub accounts: Arc<dyn AccountGateway>,
    pub problems: Arc<dyn ProblemGateway>,
    pub progress: Arc<dyn ProgressGateway>,
    pub therapists: Arc<dyn TherapistGateway>,
    pub detection: Arc<dyn DetectionGateway>,
}

impl Backend {
    /// Gateways over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(&InMemoryBackend::new())
    }

    /// Gateways over an existing in-memory store, which the caller keeps
    /// for seeding and assertions.
    #[must_use]
    pub fn from_in_memory(store: &InMemoryBackend) -> Self {
        Self {
            accounts: Arc::new(store.clone()),
            problems: Arc::new(store.clone()),
            progress: Arc::new(store.clone()),
            therapists: Arc::new(store.clone()),
            detection: Arc::new(store.clone()),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use posture_core::model::{ExerciseId, Severity};
    use url::Url;

    fn exercise(id: u64, position: u32) -> Exercise {
        let image = Url::parse("https://cdn.example.com/exercise.png").unwrap();
        Exercise::new(ExerciseId::new(id), format!("exercise {id}"), image, position)
    }

    #[tokio::test]
    async fn progress_create_update_round_trip() {
        let store = InMemoryBackend::new();

        let record = store.create(ProblemId::new(1), 3).await.unwrap();
        assert_eq!(record.completed(), 0);
        assert_eq!(record.total(), 3);

        store.update_completed(record.id(), 1).await.unwrap();
        store.update_completed(record.id(), 2).await.unwrap();

        let records = store.records_for(UserId::new(1)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].completed(), 2);

        let updates = store.recorded_updates().unwrap();
        assert_eq!(updates, vec![(record.id(), 1), (record.id(), 2)]);
    }

    #[tokio::test]
    async fn update_of_unknown_record_is_not_found() {
        let store = InMemoryBackend::new();
        let missing = ProgressId::new(Uuid::new_v4());

        let err = store.update_completed(missing, 1).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert!(store.recorded_updates().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_account_reads_unauthorized() {
        let store = InMemoryBackend::new();
        let err = store.current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn seeded_program_comes_back_in_session_order() {
        let store = InMemoryBackend::new();
        let problem = ProblemId::new(4);
        store
            .seed_exercises(problem, vec![exercise(10, 1), exercise(11, 2), exercise(12, 3)])
            .unwrap();

        let program = store.exercises_for(problem).await.unwrap();
        let ids: Vec<_> = program.iter().map(|e| e.id().value()).collect();
        assert_eq!(ids, vec![10, 11, 12]);

        // Unknown problems have an empty program, not an error.
        assert!(store.exercises_for(ProblemId::new(99)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn detect_replays_seeded_findings() {
        let store = InMemoryBackend::new();
        assert!(store.detect(vec![1, 2, 3]).await.unwrap().is_empty());

        let finding = PostureProblem::new(
            ProblemId::new(7),
            "Rounded shoulders",
            "Shoulders roll forward of the midline.",
            Severity::Mild,
            Some(Utc::now()),
        );
        store.seed_findings(vec![finding.clone()]).unwrap();

        let detected = store.detect(vec![1, 2, 3]).await.unwrap();
        assert_eq!(detected, vec![finding]);
    }

    #[tokio::test]
    async fn aggregate_shares_one_store() {
        let store = InMemoryBackend::new();
        let backend = Backend::from_in_memory(&store);

        let record = backend.progress.create(ProblemId::new(2), 5).await.unwrap();
        backend.progress.update_completed(record.id(), 1).await.unwrap();

        assert_eq!(store.recorded_updates().unwrap(), vec![(record.id(), 1)]);
    }
}
