mod reporter;
mod runner;
mod setup;
mod snapshot;

// Public API of the session subsystem.
pub use crate::error::SessionSetupError;
pub use reporter::ProgressReporter;
pub use runner::{SessionCommand, SessionHandle, SessionOutcome, SessionRunner};
pub use setup::{PreparedSession, SessionSetupService};
pub use snapshot::SessionSnapshot;
