use std::env;

/// Default REST endpoint for account, program, and progress data.
pub const DEFAULT_API_BASE_URL: &str = "https://api.posturecheck.app/v1";

/// Default endpoint for the posture detection service. Detection runs on
/// separate infrastructure, so it carries its own base URL.
pub const DEFAULT_DETECT_BASE_URL: &str = "https://detect.posturecheck.app";

/// Connection settings shared by every remote gateway.
#[derive(Clone, Debug)]
pub struct ApiContext {
    pub api_base: String,
    pub detect_base: String,
    pub token: String,
}

impl ApiContext {
    #[must_use]
    pub fn new(
        api_base: impl Into<String>,
        detect_base: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            detect_base: detect_base.into(),
            token: token.into(),
        }
    }

    /// Builds a context from `POSTURE_API_TOKEN`, `POSTURE_API_BASE_URL`,
    /// and `POSTURE_DETECT_BASE_URL`.
    ///
    /// The token is required; both base URLs fall back to the production
    /// endpoints. Returns `None` when the token is unset or blank, which
    /// callers treat as "not signed in".
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let token = env::var("POSTURE_API_TOKEN").ok()?;
        if token.trim().is_empty() {
            return None;
        }
        let api_base =
            env::var("POSTURE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
        let detect_base =
            env::var("POSTURE_DETECT_BASE_URL").unwrap_or_else(|_| DEFAULT_DETECT_BASE_URL.into());
        Some(Self {
            api_base,
            detect_base,
            token,
        })
    }
}
