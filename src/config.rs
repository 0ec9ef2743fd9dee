//! Recorder configuration
//!
//! Controls how much the event log may grow and what happens once it is full.
//! The defaults match normal startup use: a few dozen marks, no ceiling.

use serde::{Deserialize, Serialize};

use crate::error::RecorderError;

/// Slots reserved up front so typical startups never reallocate
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Largest up-front reservation `validate` accepts
pub const MAX_INITIAL_CAPACITY: usize = 1 << 16;

/// What to discard once the ceiling is reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep the earliest history; reject new marks with `CapacityExceeded`
    #[default]
    DropNewest,
    /// Keep the most recent history; evict the oldest event
    DropOldest,
}

/// Event log limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Maximum number of retained events (`None` = unbounded)
    pub capacity: Option<usize>,

    /// Applied when `capacity` is reached
    pub overflow: OverflowPolicy,

    /// Slots reserved when the log is created
    pub initial_capacity: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            overflow: OverflowPolicy::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl RecorderConfig {
    /// No ceiling
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Ceiling of `capacity` events, dropping new marks once full
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            initial_capacity: capacity.min(DEFAULT_INITIAL_CAPACITY),
            ..Self::default()
        }
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Slots to reserve at construction, never above the ceiling
    pub(crate) fn reserve_hint(&self) -> usize {
        match self.capacity {
            Some(cap) => self.initial_capacity.min(cap),
            None => self.initial_capacity,
        }
    }

    /// Reject configurations that could never hold an event or would
    /// reserve an absurd amount of memory up front
    pub fn validate(&self) -> Result<(), RecorderError> {
        if self.capacity == Some(0) {
            return Err(RecorderError::InvalidConfig {
                details: "capacity is 0".to_string(),
            });
        }
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(RecorderError::InvalidConfig {
                details: format!(
                    "initial_capacity {} exceeds {}",
                    self.initial_capacity, MAX_INITIAL_CAPACITY
                ),
            });
        }
        Ok(())
    }
}
