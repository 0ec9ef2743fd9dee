//! Append-only log of early timestamp events
//!
//! - Event: immutable record of name + monotonic instant + sequence
//! - EventLog: thread-safe store with an optional ceiling
//!
//! Sequence numbers are handed out under the same write lock that appends the
//! event, so snapshot order, sequence order and timestamp order always agree.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{trace, warn};

use crate::clock;
use crate::config::{OverflowPolicy, RecorderConfig};
use crate::error::RecorderError;

/// A named moment during startup
///
/// `sequence` gives a total order even when the clock is too coarse to tell
/// two marks apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExportedEvent")]
pub struct Event {
    name: Arc<str>,
    sequence: u64,
    #[serde(skip)]
    timestamp: Instant,
    #[serde(rename = "since_start_ns", serialize_with = "duration_as_nanos")]
    since_start: Duration,
}

impl Event {
    fn new(name: Arc<str>, sequence: u64, timestamp: Instant) -> Self {
        Self {
            name,
            sequence,
            timestamp,
            since_start: clock::since_start(timestamp),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Monotonic instant the event was recorded at
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Offset of `timestamp` from the process start anchor
    pub fn since_start(&self) -> Duration {
        self.since_start
    }
}

fn duration_as_nanos<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

/// Wire form of an `Event`, as produced by `to_json`
#[derive(Deserialize)]
struct ExportedEvent {
    name: Arc<str>,
    sequence: u64,
    since_start_ns: u64,
}

impl From<ExportedEvent> for Event {
    fn from(e: ExportedEvent) -> Self {
        let since_start = Duration::from_nanos(e.since_start_ns);
        // Rebuilt against this process's anchor
        let timestamp = clock::process_start()
            .checked_add(since_start)
            .unwrap_or_else(clock::process_start);
        Self {
            name: e.name,
            sequence: e.sequence,
            timestamp,
            since_start,
        }
    }
}

/// Reject names that would make the timeline unreadable
pub fn validate_name(name: &str) -> Result<(), RecorderError> {
    if name.is_empty() {
        return Err(RecorderError::empty_name());
    }
    if name.trim().is_empty() {
        return Err(RecorderError::blank_name());
    }
    Ok(())
}

struct LogState {
    events: VecDeque<Event>,
    next_sequence: u64,
    dropped: u64,
}

/// Thread-safe, append-only event log
pub struct EventLog {
    state: RwLock<LogState>,
    config: RecorderConfig,
}

impl EventLog {
    /// Create an empty log
    ///
    /// Never fails: if the up-front reservation cannot be made the log starts
    /// with no reserved slots and grows on demand.
    pub fn new(config: RecorderConfig) -> Self {
        let mut events = VecDeque::new();
        let hint = config.reserve_hint();
        if events.try_reserve(hint).is_err() {
            warn!(requested = hint, "early event log reservation failed, starting empty");
        }
        Self {
            state: RwLock::new(LogState {
                events,
                next_sequence: 0,
                dropped: 0,
            }),
            config,
        }
    }

    /// Append an event (thread-safe, returns its sequence number)
    pub fn append(&self, name: &str) -> Result<u64, RecorderError> {
        if let Err(e) = validate_name(name) {
            warn!(error = %e, "early timestamp rejected");
            return Err(e);
        }

        // Allocate the name before taking the lock.
        let name: Arc<str> = Arc::from(name);

        let mut evicted = None;
        let event = {
            let mut state = self.state.write();

            if let Some(capacity) = self.config.capacity {
                if state.events.len() >= capacity {
                    state.dropped += 1;
                    match self.config.overflow {
                        OverflowPolicy::DropNewest => {
                            drop(state);
                            warn!(name = %name, capacity, "early event log full, mark dropped");
                            return Err(RecorderError::CapacityExceeded { capacity });
                        }
                        OverflowPolicy::DropOldest => {
                            evicted = state.events.pop_front();
                        }
                    }
                }
            }

            if state.events.try_reserve(1).is_err() {
                drop(state);
                warn!(name = %name, "early event log could not grow, mark dropped");
                return Err(RecorderError::AllocationFailed { requested: 1 });
            }

            let sequence = state.next_sequence;
            state.next_sequence += 1;
            let event = Event::new(name, sequence, clock::now());
            state.events.push_back(event.clone());
            event
        };

        if let Some(old) = evicted {
            warn!(
                evicted = %old.name,
                evicted_sequence = old.sequence,
                "early event log full, oldest mark evicted"
            );
        }
        trace!(
            name = %event.name,
            sequence = event.sequence,
            since_start_us = u64::try_from(event.since_start.as_micros()).unwrap_or(u64::MAX),
            "early timestamp"
        );

        Ok(event.sequence)
    }

    /// Point-in-time copy of all retained events, in sequence order
    pub fn events(&self) -> Vec<Event> {
        self.state.read().events.iter().cloned().collect()
    }

    /// Most recent event recorded under `name`
    pub fn latest(&self, name: &str) -> Option<Event> {
        self.state
            .read()
            .events
            .iter()
            .rev()
            .find(|e| &*e.name == name)
            .cloned()
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.state.read().events.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks discarded or evicted by the overflow policy
    pub fn dropped(&self) -> u64 {
        self.state.read().dropped
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(RecorderConfig::default())
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("len", &self.len())
            .field("dropped", &self.dropped())
            .finish()
    }
}
