mod exercise;
mod ids;
mod prize;
mod problem;
mod profile;
mod progress;
mod therapist;

pub use ids::{
    ExerciseId, ParseIdError, PrizeId, ProblemId, ProgressId, TherapistId, UserId,
};

pub use exercise::Exercise;
pub use prize::Prize;
pub use problem::{PostureProblem, Severity, SeverityError};
pub use profile::{User, UserProfile};
pub use progress::ProgressRecord;
pub use therapist::Physiotherapist;
