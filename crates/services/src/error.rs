//! Shared error types for the services crate.

use thiserror::Error;

use backend::ApiError;

/// Errors emitted by `SessionSetupService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionSetupError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ScanService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    #[error("capture holds no image data")]
    EmptyCapture,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `TherapistDirectory`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DirectoryError {
    #[error(transparent)]
    Api(#[from] ApiError),
}
