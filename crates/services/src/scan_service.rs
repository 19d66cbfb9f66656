//! Posture capture analysis for the scan screen.

use std::sync::Arc;

use backend::DetectionGateway;
use chrono::{DateTime, Utc};
use posture_core::Clock;
use posture_core::model::{PostureProblem, Severity};
use tracing::debug;

use crate::error::ScanError;

/// Findings from one analyzed capture.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub problems: Vec<PostureProblem>,
    pub scanned_at: DateTime<Utc>,
}

impl ScanOutcome {
    /// The most severe finding, or `None` for a clean scan.
    #[must_use]
    pub fn worst_severity(&self) -> Option<Severity> {
        self.problems.iter().map(PostureProblem::severity).max()
    }

    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Sends captured images through the posture detection backend.
#[derive(Clone)]
pub struct ScanService {
    detection: Arc<dyn DetectionGateway>,
    clock: Clock,
}

impl ScanService {
    #[must_use]
    pub fn new(detection: Arc<dyn DetectionGateway>, clock: Clock) -> Self {
        Self { detection, clock }
    }

    /// Analyzes one captured image.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::EmptyCapture`] for a zero-byte capture before
    /// anything goes over the wire, and [`ScanError::Api`] when the
    /// detection call fails.
    pub async fn analyze_capture(&self, image: &[u8]) -> Result<ScanOutcome, ScanError> {
        if image.is_empty() {
            return Err(ScanError::EmptyCapture);
        }
        debug!("analyzing capture of {} bytes", image.len());
        let problems = self.detection.detect(image.to_vec()).await?;
        Ok(ScanOutcome {
            problems,
            scanned_at: self.clock.now(),
        })
    }
}
