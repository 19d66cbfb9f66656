use async_trait::async_trait;
use posture_core::model::{ProblemId, ProgressId, ProgressRecord, UserId};

use crate::gateway::{ApiError, ProgressGateway};
use crate::rest::RestBackend;
use crate::rest::dto::{CreateProgressBody, ProgressDto, UpdateProgressBody};

#[async_trait]
impl ProgressGateway for RestBackend {
    async fn create(&self, problem: ProblemId, total: u32) -> Result<ProgressRecord, ApiError> {
        let body = CreateProgressBody {
            problem_id: problem.value(),
            total,
        };
        let dto: ProgressDto = self.post_json("progress", &body).await?;
        Ok(dto.into_domain())
    }

    async fn update_completed(&self, id: ProgressId, completed: u32) -> Result<(), ApiError> {
        let body = UpdateProgressBody { completed };
        self.put_json(&format!("progress/{}", id.value()), &body)
            .await
    }

    async fn records_for(&self, user: UserId) -> Result<Vec<ProgressRecord>, ApiError> {
        let dtos: Vec<ProgressDto> = self
            .get_json(&format!("users/{}/progress", user.value()))
            .await?;
        Ok(dtos.into_iter().map(ProgressDto::into_domain).collect())
    }
}
