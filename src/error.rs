//! Recorder error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Every way a mark or a configuration call can be refused.
///
/// None of these are fatal: a refused mark leaves the log untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("BOOT-001: Invalid event: {reason}")]
    InvalidEvent { reason: String },

    #[error("BOOT-002: Event log is full ({capacity} events), new mark dropped")]
    CapacityExceeded { capacity: usize },

    #[error("BOOT-003: Could not reserve space for {requested} more event(s)")]
    AllocationFailed { requested: usize },

    #[error("BOOT-004: Shared recorder is already initialized")]
    AlreadyInitialized,

    #[error("BOOT-005: Invalid recorder config: {details}")]
    InvalidConfig { details: String },
}

impl RecorderError {
    pub(crate) fn empty_name() -> Self {
        Self::InvalidEvent {
            reason: "event name must not be empty".to_string(),
        }
    }

    pub(crate) fn blank_name() -> Self {
        Self::InvalidEvent {
            reason: "event name must not be whitespace only".to_string(),
        }
    }
}

impl FixSuggestion for RecorderError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            RecorderError::InvalidEvent { .. } => {
                Some("Pass a non-empty identifier such as \"config-loaded\"")
            }
            RecorderError::CapacityExceeded { .. } => {
                Some("Raise the capacity or stop marking inside a loop")
            }
            RecorderError::AllocationFailed { .. } => {
                Some("Set a smaller capacity or a larger initial_capacity")
            }
            RecorderError::AlreadyInitialized => {
                Some("Call configure_shared() before the first mark or shared() access")
            }
            RecorderError::InvalidConfig { .. } => {
                Some("Use a capacity of at least 1 (or none) and a modest initial_capacity")
            }
        }
    }
}
