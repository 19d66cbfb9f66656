//! One-call load of everything the home screen shows.

use std::sync::Arc;

use backend::{AccountGateway, ProblemGateway, ProgressGateway};
use chrono::{DateTime, Utc};
use posture_core::Clock;
use posture_core::model::{PostureProblem, Prize, ProgressRecord, User, UserProfile};
use tracing::debug;

use crate::error::DashboardError;

/// Snapshot of the signed-in user's state across the backend.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: User,
    pub profile: UserProfile,
    pub problems: Vec<PostureProblem>,
    pub records: Vec<ProgressRecord>,
    pub prizes: Vec<Prize>,
    pub loaded_at: DateTime<Utc>,
}

impl Dashboard {
    /// Completion across every progress record, as a clamped percentage.
    ///
    /// Pools completed and total counts before dividing, so larger
    /// programs weigh more than short ones. No records reads as 0.
    #[must_use]
    pub fn overall_percent(&self) -> u8 {
        let total: u64 = self.records.iter().map(|r| u64::from(r.total())).sum();
        if total == 0 {
            return 0;
        }
        let completed: u64 = self.records.iter().map(|r| u64::from(r.completed())).sum();
        u8::try_from((completed * 100 / total).min(100)).unwrap_or(100)
    }
}

/// Loads the dashboard from the account, problem, and progress gateways.
#[derive(Clone)]
pub struct DashboardService {
    accounts: Arc<dyn AccountGateway>,
    problems: Arc<dyn ProblemGateway>,
    progress: Arc<dyn ProgressGateway>,
    clock: Clock,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        accounts: Arc<dyn AccountGateway>,
        problems: Arc<dyn ProblemGateway>,
        progress: Arc<dyn ProgressGateway>,
        clock: Clock,
    ) -> Self {
        Self {
            accounts,
            problems,
            progress,
            clock,
        }
    }

    /// Fetches the current user, then their dependent resources
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Api`] when any of the fetches fails; the
    /// first failure wins and the rest are cancelled.
    pub async fn load(&self) -> Result<Dashboard, DashboardError> {
        let user = self.accounts.current_user().await?;
        debug!("loading dashboard for user {}", user.id());

        let (profile, problems, records, prizes) = tokio::try_join!(
            self.accounts.profile(user.id()),
            self.problems.problems_for(user.id()),
            self.progress.records_for(user.id()),
            self.accounts.prizes(user.id()),
        )?;

        Ok(Dashboard {
            user,
            profile,
            problems,
            records,
            prizes,
            loaded_at: self.clock.now(),
        })
    }
}
