use async_trait::async_trait;
use posture_core::model::Physiotherapist;

use crate::gateway::{ApiError, TherapistGateway};
use crate::rest::RestBackend;
use crate::rest::dto::TherapistDto;

#[async_trait]
impl TherapistGateway for RestBackend {
    async fn list(&self) -> Result<Vec<Physiotherapist>, ApiError> {
        let dtos: Vec<TherapistDto> = self.get_json("physiotherapists").await?;
        Ok(dtos.into_iter().map(TherapistDto::into_domain).collect())
    }
}
