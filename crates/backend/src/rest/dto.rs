use chrono::{DateTime, Utc};
use posture_core::model::{
    Exercise, ExerciseId, Physiotherapist, PostureProblem, Prize, PrizeId, ProblemId,
    ProgressId, ProgressRecord, Severity, TherapistId, User, UserId, UserProfile,
};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::gateway::ApiError;

fn decode<E: core::fmt::Display>(e: E) -> ApiError {
    ApiError::Decode(e.to_string())
}

//
// ─── RESPONSE BODIES ───────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct UserDto {
    pub id: u64,
    pub email: String,
    pub display_name: String,
}

impl UserDto {
    pub(crate) fn into_domain(self) -> User {
        User::new(UserId::new(self.id), self.email, self.display_name)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileDto {
    pub user_id: u64,
    pub full_name: String,
    pub birth_year: Option<i32>,
    pub height_cm: Option<u32>,
    pub weight_kg: Option<f32>,
}

impl ProfileDto {
    pub(crate) fn into_domain(self) -> UserProfile {
        UserProfile::new(
            UserId::new(self.user_id),
            self.full_name,
            self.birth_year,
            self.height_cm,
            self.weight_kg,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrizeDto {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub awarded_at: Option<DateTime<Utc>>,
}

impl PrizeDto {
    pub(crate) fn into_domain(self) -> Prize {
        Prize::new(PrizeId::new(self.id), self.title, self.description, self.awarded_at)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProblemDto {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub severity: String,
    #[serde(default)]
    pub detected_at: Option<DateTime<Utc>>,
}

impl ProblemDto {
    /// # Errors
    ///
    /// Returns `ApiError::Decode` for an unknown severity label.
    pub(crate) fn into_domain(self) -> Result<PostureProblem, ApiError> {
        let severity = Severity::from_label(&self.severity).map_err(decode)?;
        Ok(PostureProblem::new(
            ProblemId::new(self.id),
            self.name,
            self.description,
            severity,
            self.detected_at,
        ))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExerciseDto {
    pub id: u64,
    pub description: String,
    pub image: String,
    pub position: u32,
}

impl ExerciseDto {
    /// # Errors
    ///
    /// Returns `ApiError::Decode` when the image reference is not a URL.
    pub(crate) fn into_domain(self) -> Result<Exercise, ApiError> {
        let image = Url::parse(&self.image).map_err(decode)?;
        Ok(Exercise::new(
            ExerciseId::new(self.id),
            self.description,
            image,
            self.position,
        ))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressDto {
    pub id: Uuid,
    pub problem_id: u64,
    pub completed: u32,
    pub total: u32,
    pub updated_at: DateTime<Utc>,
}

impl ProgressDto {
    pub(crate) fn into_domain(self) -> ProgressRecord {
        ProgressRecord::new(
            ProgressId::new(self.id),
            ProblemId::new(self.problem_id),
            self.completed,
            self.total,
            self.updated_at,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TherapistDto {
    pub id: u64,
    pub full_name: String,
    pub specialty: String,
    pub city: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl TherapistDto {
    pub(crate) fn into_domain(self) -> Physiotherapist {
        Physiotherapist::new(
            TherapistId::new(self.id),
            self.full_name,
            self.specialty,
            self.city,
            self.email,
        )
    }
}

//
// ─── REQUEST BODIES ────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct CreateProgressBody {
    pub problem_id: u64,
    pub total: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateProgressBody {
    pub completed: u32,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
