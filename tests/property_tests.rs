//! Property-based tests for buffer and registry invariants.
//!
//! Tests validate:
//! 1. A buffer never holds more than its capacity and keeps the newest entries
//! 2. Every mutation advances the version
//! 3. Shrinking the capacity evicts the oldest entries only
//! 4. Sources never share entries

use proptest::prelude::*;
use sourcelog::model::{LogEntry, LogLevel, SourceId};
use sourcelog::state::{LogBuffer, LoggerRegistry};

fn entry(n: usize) -> LogEntry {
    LogEntry::text(LogLevel::Info, format!("m{n}"))
}

fn texts(buffer: &LogBuffer) -> Vec<String> {
    buffer
        .iter()
        .filter_map(|e| e.as_text().map(str::to_string))
        .collect()
}

/// Buffer operation for sequence tests.
#[derive(Debug, Clone)]
enum Op {
    Append,
    Clear,
    Resize(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Append),
        1 => Just(Op::Clear),
        1 => (0i64..20).prop_map(Op::Resize),
    ]
}

// ===== Property 1: Capacity and FIFO eviction =====

proptest! {
    #[test]
    fn buffer_keeps_newest_entries_up_to_capacity(capacity in 1usize..50, count in 0usize..200) {
        let mut buffer = LogBuffer::new(capacity);
        for n in 0..count {
            buffer.append(entry(n));
            prop_assert!(buffer.len() <= capacity);
        }

        let expected: Vec<String> = (count.saturating_sub(capacity)..count)
            .map(|n| format!("m{n}"))
            .collect();
        prop_assert_eq!(texts(&buffer), expected);
    }

    #[test]
    fn read_is_clamped_to_length(capacity in 1usize..30, count in 0usize..60, from in 0usize..80, to in 0usize..80) {
        let mut buffer = LogBuffer::new(capacity);
        for n in 0..count {
            buffer.append(entry(n));
        }

        let read = buffer.read(from, to).count();
        let expected = to.min(buffer.len()).saturating_sub(from.min(to.min(buffer.len())));
        prop_assert_eq!(read, expected);
    }
}

// ===== Property 2: Versions =====

proptest! {
    #[test]
    fn append_and_clear_always_advance_version(ops in prop::collection::vec(op_strategy(), 0..100)) {
        let mut buffer = LogBuffer::new(5);
        let mut n = 0;
        for op in ops {
            let before = buffer.version();
            match op {
                Op::Append => {
                    let after = buffer.append(entry(n));
                    n += 1;
                    prop_assert!(after > before);
                }
                Op::Clear => {
                    let after = buffer.clear();
                    prop_assert!(after > before);
                    prop_assert!(buffer.is_empty());
                }
                Op::Resize(capacity) => {
                    let len = buffer.len();
                    let evicted = buffer.set_capacity(capacity).expect("non-negative capacity");
                    prop_assert_eq!(evicted, len.saturating_sub(capacity as usize));
                    if evicted > 0 {
                        prop_assert!(buffer.version() > before);
                    } else {
                        prop_assert_eq!(buffer.version(), before);
                    }
                }
            }
            prop_assert!(buffer.len() <= buffer.capacity());
        }
    }
}

// ===== Property 3: Capacity changes =====

proptest! {
    #[test]
    fn shrinking_keeps_the_newest_suffix(count in 0usize..40, capacity in 0i64..40) {
        let mut buffer = LogBuffer::new(40);
        for n in 0..count {
            buffer.append(entry(n));
        }
        let before = texts(&buffer);

        buffer.set_capacity(capacity).expect("non-negative capacity");

        let kept = before.len().min(capacity as usize);
        prop_assert_eq!(texts(&buffer), before[before.len() - kept..].to_vec());
    }

    #[test]
    fn negative_capacity_is_rejected_without_change(count in 0usize..10, capacity in i64::MIN..0) {
        let mut buffer = LogBuffer::new(10);
        for n in 0..count {
            buffer.append(entry(n));
        }
        let version = buffer.version();

        prop_assert!(buffer.set_capacity(capacity).is_err());
        prop_assert_eq!(buffer.len(), count);
        prop_assert_eq!(buffer.capacity(), 10);
        prop_assert_eq!(buffer.version(), version);
    }
}

// ===== Property 4: Source isolation =====

proptest! {
    #[test]
    fn sources_are_isolated(targets in prop::collection::vec(0usize..3, 0..60)) {
        let names = ["a", "b", "c"];
        let mut registry = LoggerRegistry::new(1000);
        for (n, &target) in targets.iter().enumerate() {
            registry.log(Some(SourceId::from(names[target])), entry(n));
        }

        for (index, name) in names.iter().enumerate() {
            let expected: Vec<String> = targets
                .iter()
                .enumerate()
                .filter(|(_, t)| **t == index)
                .map(|(n, _)| format!("m{n}"))
                .collect();
            let actual = registry
                .buffer(&Some(SourceId::from(*name)))
                .map(texts)
                .unwrap_or_default();
            prop_assert_eq!(actual, expected);
        }
    }
}
