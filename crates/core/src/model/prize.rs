use chrono::{DateTime, Utc};

use crate::model::ids::PrizeId;

/// An achievement the backend exposes for the account.
///
/// Prizes are earned server-side; the client only displays them and
/// distinguishes awarded from still-locked ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prize {
    id: PrizeId,
    title: String,
    description: String,
    awarded_at: Option<DateTime<Utc>>,
}

impl Prize {
    #[must_use]
    pub fn new(
        id: PrizeId,
        title: impl Into<String>,
        description: impl Into<String>,
        awarded_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            awarded_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> PrizeId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn awarded_at(&self) -> Option<DateTime<Utc>> {
        self.awarded_at
    }

    #[must_use]
    pub fn is_awarded(&self) -> bool {
        self.awarded_at.is_some()
    }
}
