//! Monotonic clock and process start anchor
//!
//! Every recorded instant comes from `std::time::Instant`, which never moves
//! backwards and ignores wall-clock adjustments (NTP, timezone, DST).
//! Offsets are measured from a lazily captured anchor: the first moment any
//! part of this crate reads the clock.

use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

/// Anchor for all `since_start` offsets
static PROCESS_START: Lazy<Instant> = Lazy::new(Instant::now);

/// Current monotonic instant
#[inline]
pub fn now() -> Instant {
    // Touch the anchor first so it never lands after the instant we return.
    Lazy::force(&PROCESS_START);
    Instant::now()
}

/// The instant the anchor was captured
pub fn process_start() -> Instant {
    *PROCESS_START
}

/// Offset of `instant` from the anchor, zero if it predates it
pub fn since_start(instant: Instant) -> Duration {
    instant.saturating_duration_since(process_start())
}
