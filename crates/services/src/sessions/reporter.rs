use std::sync::Arc;

use backend::ProgressGateway;
use posture_core::model::ProgressId;
use tracing::warn;

/// Best-effort completion reporting.
///
/// Progress updates are a side effect of the session loop, not part of it:
/// a failed report is logged and dropped so the session never stalls or
/// surfaces an error over bookkeeping. The backend keeps the last write,
/// so a lost intermediate count heals on the next report.
#[derive(Clone)]
pub struct ProgressReporter {
    progress: Arc<dyn ProgressGateway>,
}

impl ProgressReporter {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressGateway>) -> Self {
        Self { progress }
    }

    /// Sends one completed-count update and swallows any failure.
    pub async fn report(&self, id: ProgressId, completed: u32) {
        if let Err(err) = self.progress.update_completed(id, completed).await {
            warn!("dropping progress report {} for {}: {}", completed, id, err);
        }
    }

    /// Fire-and-forget variant: spawns the report and returns immediately.
    ///
    /// Dispatches are not sequenced against each other; ordering of
    /// near-simultaneous reports is the backend's last-writer-wins.
    pub fn dispatch(&self, id: ProgressId, completed: u32) {
        let reporter = self.clone();
        tokio::spawn(async move {
            reporter.report(id, completed).await;
        });
    }
}
