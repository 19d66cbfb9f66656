use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::ProblemId;

//
// ─── SEVERITY ─────────────────────────────────────────────────────────────────
//

/// Errors that can occur when decoding severity labels.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeverityError {
    #[error("unknown severity label: {0}")]
    UnknownLabel(String),
}

/// Three-level grading of how pronounced a posture problem is.
///
/// Ordering follows severity, so `Ord::max` over a set of findings yields
/// the worst one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Barely noticeable deviation; addressed by routine exercises.
    Mild,
    /// Clear deviation that benefits from a dedicated program.
    Moderate,
    /// Strong deviation; professional follow-up is recommended.
    Severe,
}

impl Severity {
    /// Decodes the wire label used by the detection and REST services.
    ///
    /// # Errors
    ///
    /// Returns `SeverityError::UnknownLabel` for anything other than
    /// `mild`, `moderate`, or `severe`.
    pub fn from_label(label: &str) -> Result<Self, SeverityError> {
        match label {
            "mild" => Ok(Self::Mild),
            "moderate" => Ok(Self::Moderate),
            "severe" => Ok(Self::Severe),
            other => Err(SeverityError::UnknownLabel(other.to_string())),
        }
    }

    /// Wire label for this severity.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

//
// ─── POSTURE PROBLEM ──────────────────────────────────────────────────────────
//

/// A posture problem attributed to the user.
///
/// Problems come from two places: the detection service (fresh findings
/// from a scan, carrying the scan instant) and the REST API (problems
/// already on file for the account).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostureProblem {
    id: ProblemId,
    name: String,
    description: String,
    severity: Severity,
    detected_at: Option<DateTime<Utc>>,
}

impl PostureProblem {
    #[must_use]
    pub fn new(
        id: ProblemId,
        name: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        detected_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            severity,
            detected_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> ProblemId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Instant the problem was detected, when it came from a scan.
    #[must_use]
    pub fn detected_at(&self) -> Option<DateTime<Utc>> {
        self.detected_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trip_works() {
        for severity in [Severity::Mild, Severity::Moderate, Severity::Severe] {
            assert_eq!(Severity::from_label(severity.label()).unwrap(), severity);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = Severity::from_label("catastrophic").unwrap_err();
        assert!(matches!(err, SeverityError::UnknownLabel(label) if label == "catastrophic"));
    }

    #[test]
    fn ordering_ranks_severe_highest() {
        assert!(Severity::Mild < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Severe);
        let worst = [Severity::Moderate, Severity::Severe, Severity::Mild]
            .into_iter()
            .max();
        assert_eq!(worst, Some(Severity::Severe));
    }

    #[test]
    fn problem_creation_works() {
        let problem = PostureProblem::new(
            ProblemId::new(3),
            "Forward head",
            "Head carried ahead of the shoulder line.",
            Severity::Moderate,
            None,
        );
        assert_eq!(problem.id(), ProblemId::new(3));
        assert_eq!(problem.name(), "Forward head");
        assert_eq!(problem.severity(), Severity::Moderate);
        assert!(problem.detected_at().is_none());
    }
}
