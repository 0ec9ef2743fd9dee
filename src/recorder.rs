//! Process-wide early event recorder
//!
//! `EarlyEventRecorder::shared()` is created on first touch and lives until
//! the process exits. Call sites that run before logging exists only need
//! `EarlyEventRecorder::mark_early_timestamp("name")`; the telemetry layer
//! later reads everything back with `snapshot()`.

use std::fmt::Write as _;

use once_cell::sync::{Lazy, OnceCell};
use serde_json::Value;
use tracing::debug;

use crate::config::RecorderConfig;
use crate::error::RecorderError;
use crate::event_log::{Event, EventLog};

/// Name used by [`EarlyEventRecorder::mark_launch_finished`]
pub const LAUNCH_FINISHED: &str = "application_did_finish_launching";

/// Name used by [`EarlyEventRecorder::mark_became_active`]
pub const BECAME_ACTIVE: &str = "application_did_become_active";

/// Config for the shared recorder; frozen by whichever comes first,
/// `configure_shared` or the first `shared()` access
static SHARED_CONFIG: OnceCell<RecorderConfig> = OnceCell::new();

static SHARED: Lazy<EarlyEventRecorder> = Lazy::new(|| {
    let config = SHARED_CONFIG.get_or_init(RecorderConfig::default).clone();
    EarlyEventRecorder::new(config).unwrap_or_default()
});

/// Ordered recorder of startup timestamp events
#[derive(Debug, Default)]
pub struct EarlyEventRecorder {
    log: EventLog,
}

impl EarlyEventRecorder {
    /// Build a private recorder (the shared one lives behind `shared()`)
    pub fn new(config: RecorderConfig) -> Result<Self, RecorderError> {
        config.validate()?;
        debug!(
            capacity = ?config.capacity,
            overflow = ?config.overflow,
            "early event recorder enabled"
        );
        Ok(Self {
            log: EventLog::new(config),
        })
    }

    /// The process-wide recorder, created on first call
    pub fn shared() -> &'static EarlyEventRecorder {
        &SHARED
    }

    /// Set the shared recorder's config before it is first used
    ///
    /// Returns `AlreadyInitialized` once `shared()` has run or a config has
    /// already been installed.
    pub fn configure_shared(config: RecorderConfig) -> Result<(), RecorderError> {
        config.validate()?;
        SHARED_CONFIG
            .set(config)
            .map_err(|_| RecorderError::AlreadyInitialized)
    }

    /// Mark a timestamp on the shared recorder
    pub fn mark_early_timestamp(name: &str) -> Result<u64, RecorderError> {
        Self::shared().mark_timestamp(name)
    }

    /// Mark a timestamp for a specific event, returning its sequence number
    pub fn mark_timestamp(&self, name: &str) -> Result<u64, RecorderError> {
        self.log.append(name)
    }

    pub fn mark_launch_finished(&self) -> Result<u64, RecorderError> {
        self.mark_timestamp(LAUNCH_FINISHED)
    }

    pub fn mark_became_active(&self) -> Result<u64, RecorderError> {
        self.mark_timestamp(BECAME_ACTIVE)
    }

    /// Consistent copy of every event recorded so far, in sequence order
    pub fn snapshot(&self) -> Vec<Event> {
        self.log.events()
    }

    /// Latest event recorded under `name`
    pub fn timestamp_for(&self, name: &str) -> Option<Event> {
        self.log.latest(name)
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Marks lost to the overflow policy
    pub fn dropped(&self) -> u64 {
        self.log.dropped()
    }

    pub fn config(&self) -> &RecorderConfig {
        self.log.config()
    }

    /// Snapshot as a JSON array for the telemetry pipeline
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.snapshot()).unwrap_or(Value::Null)
    }

    /// Human-readable boot timeline, one `[name] +S.SSSSSSs` line per event
    pub fn report(&self) -> String {
        let events = self.snapshot();
        let mut out = format!("Boot timeline ({} events):\n", events.len());
        for event in &events {
            let _ = writeln!(
                out,
                "[{}] +{:.6}s",
                event.name(),
                event.since_start().as_secs_f64()
            );
        }
        out
    }
}
