//! Shared recorder: configuration installed before first use

use bootmark::{EarlyEventRecorder, OverflowPolicy, RecorderConfig, RecorderError};

#[test]
fn configure_before_first_use_applies_ceiling() {
    // Invalid configs are refused without freezing anything
    assert!(matches!(
        EarlyEventRecorder::configure_shared(RecorderConfig::bounded(0)),
        Err(RecorderError::InvalidConfig { .. })
    ));

    let config = RecorderConfig::bounded(2).with_overflow(OverflowPolicy::DropNewest);
    EarlyEventRecorder::configure_shared(config.clone()).unwrap();

    // Second install loses
    assert_eq!(
        EarlyEventRecorder::configure_shared(RecorderConfig::unbounded()),
        Err(RecorderError::AlreadyInitialized)
    );

    let recorder = EarlyEventRecorder::shared();
    assert_eq!(recorder.config(), &config);

    EarlyEventRecorder::mark_early_timestamp("process-start").unwrap();
    EarlyEventRecorder::mark_early_timestamp("config-loaded").unwrap();
    assert_eq!(
        EarlyEventRecorder::mark_early_timestamp("one-too-many"),
        Err(RecorderError::CapacityExceeded { capacity: 2 })
    );

    let names: Vec<_> = recorder
        .snapshot()
        .iter()
        .map(|e| e.name().to_string())
        .collect();
    assert_eq!(names, ["process-start", "config-loaded"]);
    assert_eq!(recorder.dropped(), 1);
}
