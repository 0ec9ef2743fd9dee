//! Property-based tests for event ordering and overflow rules

use bootmark::{EarlyEventRecorder, OverflowPolicy, RecorderConfig, RecorderError};
use proptest::prelude::*;

prop_compose! {
    /// Mark names, including the empty and blank strings the recorder refuses
    fn arb_name()(name in prop_oneof![
        4 => r"[a-z][a-z0-9_.-]{0,15}",
        1 => Just(String::new()),
        1 => r"[ \t]{1,3}",
    ]) -> String {
        name
    }
}

fn is_valid(name: &str) -> bool {
    !name.trim().is_empty()
}

proptest! {
    /// Property: accepted marks get consecutive sequences, refused ones leave no trace
    #[test]
    fn unbounded_log_keeps_every_valid_mark(names in prop::collection::vec(arb_name(), 0..64)) {
        let recorder = EarlyEventRecorder::default();

        for name in &names {
            let result = recorder.mark_timestamp(name);
            if is_valid(name) {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(
                    matches!(result, Err(RecorderError::InvalidEvent { .. })),
                    "expected InvalidEvent for {:?}",
                    name
                );
            }
        }

        let expected: Vec<&str> = names.iter().map(String::as_str).filter(|n| is_valid(n)).collect();
        let events = recorder.snapshot();
        let recorded: Vec<&str> = events.iter().map(|e| e.name()).collect();
        prop_assert_eq!(recorded, expected);

        for (i, event) in events.iter().enumerate() {
            prop_assert_eq!(event.sequence(), i as u64);
        }
        prop_assert!(events.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
        prop_assert_eq!(recorder.dropped(), 0);
    }

    /// Property: drop-newest keeps the first `capacity` valid marks
    #[test]
    fn drop_newest_keeps_head(
        names in prop::collection::vec(r"[a-z]{1,8}", 0..40),
        capacity in 1usize..16,
    ) {
        let recorder = EarlyEventRecorder::new(RecorderConfig::bounded(capacity)).unwrap();
        for name in &names {
            let _ = recorder.mark_timestamp(name);
        }

        let kept = names.len().min(capacity);
        let recorded: Vec<String> = recorder.snapshot().iter().map(|e| e.name().to_string()).collect();
        prop_assert_eq!(&recorded[..], &names[..kept]);
        prop_assert_eq!(recorder.dropped(), (names.len() - kept) as u64);
    }

    /// Property: drop-oldest keeps the last `capacity` valid marks
    #[test]
    fn drop_oldest_keeps_tail(
        names in prop::collection::vec(r"[a-z]{1,8}", 0..40),
        capacity in 1usize..16,
    ) {
        let config = RecorderConfig::bounded(capacity).with_overflow(OverflowPolicy::DropOldest);
        let recorder = EarlyEventRecorder::new(config).unwrap();
        for name in &names {
            prop_assert!(recorder.mark_timestamp(name).is_ok());
        }

        let start = names.len().saturating_sub(capacity);
        let events = recorder.snapshot();
        let recorded: Vec<String> = events.iter().map(|e| e.name().to_string()).collect();
        prop_assert_eq!(&recorded[..], &names[start..]);

        let seqs: Vec<u64> = events.iter().map(|e| e.sequence()).collect();
        prop_assert_eq!(seqs, (start as u64..names.len() as u64).collect::<Vec<_>>());
    }
}
