#![forbid(unsafe_code)]

pub mod dashboard_service;
pub mod directory_service;
pub mod error;
pub mod scan_service;
pub mod sessions;

pub use posture_core::Clock;
pub use sessions as session;

pub use error::{DashboardError, DirectoryError, ScanError, SessionSetupError};

pub use dashboard_service::{Dashboard, DashboardService};
pub use directory_service::TherapistDirectory;
pub use scan_service::{ScanOutcome, ScanService};

pub use sessions::{
    PreparedSession, ProgressReporter, SessionCommand, SessionHandle, SessionOutcome,
    SessionRunner, SessionSetupService, SessionSnapshot,
};
