use async_trait::async_trait;
use posture_core::model::{Exercise, PostureProblem, ProblemId, UserId};

use crate::gateway::{ApiError, ProblemGateway};
use crate::rest::RestBackend;
use crate::rest::dto::{ExerciseDto, ProblemDto};

#[async_trait]
impl ProblemGateway for RestBackend {
    async fn problems_for(&self, user: UserId) -> Result<Vec<PostureProblem>, ApiError> {
        let dtos: Vec<ProblemDto> = self
            .get_json(&format!("users/{}/problems", user.value()))
            .await?;
        dtos.into_iter().map(ProblemDto::into_domain).collect()
    }

    async fn exercises_for(&self, problem: ProblemId) -> Result<Vec<Exercise>, ApiError> {
        let dtos: Vec<ExerciseDto> = self
            .get_json(&format!("problems/{}/exercises", problem.value()))
            .await?;
        let mut exercises = dtos
            .into_iter()
            .map(ExerciseDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        // The wire order is not guaranteed; the position field is.
        exercises.sort_by_key(Exercise::position);
        Ok(exercises)
    }
}
