//! bootmark - early startup timestamp recorder
//!
//! Captures "this happened now" markers before logging or tracing is set up,
//! then hands them to the telemetry pipeline as an ordered snapshot.
//!
//! ```
//! use bootmark::EarlyEventRecorder;
//!
//! EarlyEventRecorder::mark_early_timestamp("process-start").unwrap();
//! EarlyEventRecorder::mark_early_timestamp("config-loaded").unwrap();
//!
//! let events = EarlyEventRecorder::shared().snapshot();
//! assert_eq!(events[0].name(), "process-start");
//! assert_eq!(events[1].sequence(), 1);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod event_log;
pub mod recorder;

pub use config::{OverflowPolicy, RecorderConfig};
pub use error::{FixSuggestion, RecorderError};
pub use event_log::{Event, EventLog};
pub use recorder::EarlyEventRecorder;
