use async_trait::async_trait;
use posture_core::model::PostureProblem;

use crate::gateway::{ApiError, DetectionGateway};
use crate::rest::RestBackend;
use crate::rest::dto::ProblemDto;

#[async_trait]
impl DetectionGateway for RestBackend {
    async fn detect(&self, image: Vec<u8>) -> Result<Vec<PostureProblem>, ApiError> {
        let dtos: Vec<ProblemDto> = self.post_octets("detect", image).await?;
        dtos.into_iter().map(ProblemDto::into_domain).collect()
    }
}
