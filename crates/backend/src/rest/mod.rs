use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::context::ApiContext;
use crate::gateway::{
    AccountGateway, ApiError, Backend, DetectionGateway, ProblemGateway, ProgressGateway,
    TherapistGateway,
};

mod account_api;
mod detection_api;
mod dto;
mod problem_api;
mod progress_api;
mod therapist_api;

/// Every gateway, implemented against the remote REST services.
///
/// One shared `reqwest::Client` serves both base URLs; the bearer token
/// from the [`ApiContext`] is attached to every request.
#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    context: ApiContext,
}

impl RestBackend {
    #[must_use]
    pub fn new(context: ApiContext) -> Self {
        Self {
            client: Client::new(),
            context,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.context.api_base.trim_end_matches('/'), path)
    }

    fn detect_url(&self, path: &str) -> String {
        format!("{}/{}", self.context.detect_base.trim_end_matches('/'), path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.api_url(path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.context.token)
            .send()
            .await?;
        decode_json(check_status(response)?).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.context.token)
            .json(body)
            .send()
            .await?;
        decode_json(check_status(response)?).await
    }

    pub(crate) async fn put_json<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + Sync,
    {
        let url = self.api_url(path);
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.context.token)
            .json(body)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    pub(crate) async fn post_octets<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<T, ApiError> {
        let url = self.detect_url(path);
        debug!("POST {} ({} bytes)", url, body.len());
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.context.token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;
        decode_json(check_status(response)?).await
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!("{} from {}", status, response.url());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        other => Err(ApiError::Status(other)),
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

impl Backend {
    /// Build a `Backend` talking to the remote services in `context`.
    #[must_use]
    pub fn rest(context: ApiContext) -> Self {
        let api = RestBackend::new(context);
        let accounts: Arc<dyn AccountGateway> = Arc::new(api.clone());
        let problems: Arc<dyn ProblemGateway> = Arc::new(api.clone());
        let progress: Arc<dyn ProgressGateway> = Arc::new(api.clone());
        let therapists: Arc<dyn TherapistGateway> = Arc::new(api.clone());
        let detection: Arc<dyn DetectionGateway> = Arc::new(api);
        Self {
            accounts,
            problems,
            progress,
            therapists,
            detection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestBackend>();
    }

    #[test]
    fn base_urls_tolerate_trailing_slashes() {
        let api = RestBackend::new(ApiContext::new(
            "https://api.posturecheck.app/v1/",
            "https://detect.posturecheck.app/",
            "token",
        ));
        assert_eq!(api.api_url("users/me"), "https://api.posturecheck.app/v1/users/me");
        assert_eq!(api.detect_url("detect"), "https://detect.posturecheck.app/detect");
    }
}
