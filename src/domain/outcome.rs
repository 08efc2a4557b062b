//! Registration outcomes - one per course per dispatch batch.

use std::fmt;

/// Terminal status of one course's registration attempt loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    /// The endpoint accepted the registration (`OK`), or reported it as
    /// already present (`COURSE_DUPLICATE`, treated as idempotent success).
    Success,
    /// The attempt loop ended without success; carries the last known reason.
    Failure(String),
}

impl RegistrationStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RegistrationStatus::Success)
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            RegistrationStatus::Success => None,
            RegistrationStatus::Failure(reason) => Some(reason),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Success => write!(f, "success"),
            RegistrationStatus::Failure(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Finalized result for one course in one dispatch batch. Read-only once
/// produced by a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub course_id: String,
    pub status: RegistrationStatus,
}

impl RegistrationOutcome {
    pub fn success(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            status: RegistrationStatus::Success,
        }
    }

    pub fn failure(course_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            status: RegistrationStatus::Failure(reason.into()),
        }
    }
}
