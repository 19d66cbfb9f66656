use async_trait::async_trait;
use posture_core::model::{Prize, User, UserId, UserProfile};

use crate::gateway::{AccountGateway, ApiError};
use crate::rest::RestBackend;
use crate::rest::dto::{PrizeDto, ProfileDto, UserDto};

#[async_trait]
impl AccountGateway for RestBackend {
    async fn current_user(&self) -> Result<User, ApiError> {
        let dto: UserDto = self.get_json("users/me").await?;
        Ok(dto.into_domain())
    }

    async fn profile(&self, user: UserId) -> Result<UserProfile, ApiError> {
        let dto: ProfileDto = self
            .get_json(&format!("users/{}/profile", user.value()))
            .await?;
        Ok(dto.into_domain())
    }

    async fn prizes(&self, user: UserId) -> Result<Vec<Prize>, ApiError> {
        let dtos: Vec<PrizeDto> = self
            .get_json(&format!("users/{}/prizes", user.value()))
            .await?;
        Ok(dtos.into_iter().map(PrizeDto::into_domain).collect())
    }
}
