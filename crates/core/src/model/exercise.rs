use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::ids::ExerciseId;

/// A single prescribed exercise within a correction program.
///
/// Exercises are authored on the backend and arrive whole; the client
/// treats them as read-only and never edits or validates their content.
/// The `position` field is the backend's ordering hint: gateways sort by
/// it once on arrival, and an in-memory `Vec<Exercise>` is assumed to
/// already be in session order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    id: ExerciseId,
    description: String,
    image: Url,
    position: u32,
}

impl Exercise {
    #[must_use]
    pub fn new(
        id: ExerciseId,
        description: impl Into<String>,
        image: Url,
        position: u32,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            image,
            position,
        }
    }

    #[must_use]
    pub fn id(&self) -> ExerciseId {
        self.id
    }

    /// Instructional text shown while the exercise is active.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Demonstration image for the exercise.
    #[must_use]
    pub fn image(&self) -> &Url {
        &self.image
    }

    /// Ordering hint from the backend; lower positions come first.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }
}
