//! Tests for tracing initialization and the source routing layer.

use super::*;
use crate::model::Payload;
use serial_test::serial;
use std::fs;
use tracing_subscriber::layer::SubscriberExt;

fn capture(f: impl FnOnce()) -> Vec<SourcedEntry> {
    let (tx, rx) = sourced_channel();
    let subscriber = tracing_subscriber::registry().with(SourceLogLayer::new(tx));
    tracing::subscriber::with_default(subscriber, f);
    rx.try_iter().collect()
}

#[test]
fn event_with_source_is_forwarded() {
    // GIVEN a layer with a channel receiver
    // WHEN a sourced INFO event is emitted
    let entries = capture(|| {
        tracing::info!(source = "doc1", "kernel started");
    });

    // THEN one entry arrives for that source
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].source, Some(SourceId::from("doc1")));
    assert_eq!(entries[0].entry.level, LogLevel::Info);
    assert_eq!(entries[0].entry.as_text(), Some("kernel started"));
}

#[test]
fn event_without_source_is_ignored() {
    let entries = capture(|| {
        tracing::info!("internal diagnostic");
    });

    assert!(entries.is_empty());
}

#[test]
fn empty_source_maps_to_null_source() {
    let entries = capture(|| {
        tracing::warn!(source = "", "orphan");
    });

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].source, None);
    assert_eq!(entries[0].entry.level, LogLevel::Warning);
}

#[test]
fn debug_formatted_source_is_unquoted() {
    let name = String::from("doc2");
    let entries = capture(|| {
        tracing::error!(source = ?name, "failed");
    });

    assert_eq!(entries[0].source, Some(SourceId::from("doc2")));
    assert_eq!(entries[0].entry.level, LogLevel::Error);
}

#[test]
fn formatted_messages_are_rendered() {
    let entries = capture(|| {
        tracing::info!(source = "doc1", "value: {}, count: {}", 42, 7);
    });

    assert_eq!(entries[0].entry.as_text(), Some("value: 42, count: 7"));
}

#[test]
fn mime_field_produces_mime_payload() {
    let entries = capture(|| {
        tracing::info!(source = "doc1", mime = "text/markdown", "# Title");
    });

    assert_eq!(
        entries[0].entry.payload,
        Payload::Mime {
            mime_type: "text/markdown".to_string(),
            data: "# Title".to_string(),
        }
    );
    assert_eq!(entries[0].entry.level, LogLevel::Info);
}

#[test]
fn events_keep_emission_order() {
    let entries = capture(|| {
        tracing::info!(source = "doc1", "first");
        tracing::debug!(source = "doc2", "second");
        tracing::error!(source = "doc1", "third");
    });

    let texts: Vec<_> = entries.iter().filter_map(|e| e.entry.as_text()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn entries_capture_timestamp() {
    let before = chrono::Utc::now();
    let entries = capture(|| {
        tracing::warn!(source = "doc1", "timestamped");
    });
    let after = chrono::Utc::now();

    assert!(entries[0].entry.timestamp >= before);
    assert!(entries[0].entry.timestamp <= after);
}

#[test]
fn dropped_receiver_does_not_panic() {
    let (tx, rx) = sourced_channel();
    drop(rx);
    let subscriber = tracing_subscriber::registry().with(SourceLogLayer::new(tx));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(source = "doc1", "this should not panic");
    });
}

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let test_dir = std::env::temp_dir().join("sourcelog_test_logs_create");
    let log_file = test_dir.join("test.log");
    let _ = fs::remove_dir_all(&test_dir);

    // May fail if subscriber already set, which is fine
    let _ = init(&log_file);

    assert!(
        test_dir.exists(),
        "Log directory should be created: {:?}",
        test_dir
    );

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn init_succeeds_when_directory_already_exists() {
    let test_dir = std::env::temp_dir().join("sourcelog_test_logs_exists");
    let log_file = test_dir.join("test.log");
    let _ = fs::create_dir_all(&test_dir);

    let _ = init(&log_file);

    assert!(test_dir.exists());

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
fn init_rejects_path_without_file_name() {
    let result = init(Path::new("/"));

    assert!(matches!(
        result,
        Err(LoggingError::InvalidPath(_)) | Err(LoggingError::DirectoryCreation { .. })
    ));
}

#[test]
fn full_channel_drops_entries_without_blocking() {
    let (tx, rx) = mpsc::sync_channel(2);
    let subscriber = tracing_subscriber::registry().with(SourceLogLayer::new(tx));

    tracing::subscriber::with_default(subscriber, || {
        for n in 0..5 {
            tracing::info!(source = "doc1", "entry {}", n);
        }
    });

    let texts: Vec<String> = rx
        .try_iter()
        .filter_map(|e| e.entry.as_text().map(str::to_string))
        .collect();
    assert_eq!(texts, vec!["entry 0", "entry 1"]);
}

#[test]
fn workbench_diagnostics_do_not_feed_back_into_logs() {
    use crate::config::Settings;
    use crate::shell::{document_source, DocumentShell};
    use crate::workbench::Workbench;

    // GIVEN a flashing workbench whose own tracing runs through the layer
    let (tx, rx) = sourced_channel();
    let subscriber = tracing_subscriber::registry().with(SourceLogLayer::new(tx));
    let mut shell = DocumentShell::with_documents(["doc1", "doc2"]);
    let mut workbench = Workbench::new(document_source);

    tracing::subscriber::with_default(subscriber, || {
        workbench.ready(
            &shell,
            Ok(Settings {
                flash: true,
                ..Settings::default()
            }),
        );
        workbench.open_viewer(&mut shell);
        workbench.log(
            Some(SourceId::from("doc2")),
            LogEntry::text(LogLevel::Info, "only entry"),
        );
        workbench.set_level(Some(SourceId::from("doc2")), LogLevel::Info);

        // WHEN whatever reached the channel is drained back in, as the UI does
        for _ in 0..5 {
            for SourcedEntry { source, entry } in rx.try_iter().collect::<Vec<_>>() {
                workbench.log(source, entry);
            }
        }
        shell.focus_tab(1);
        workbench.focus_changed(&shell);
        workbench.close_viewer(&mut shell);
    });

    // THEN nothing came back: no extra sources, entries or flashes
    assert!(rx.try_iter().next().is_none());
    let mut sources: Vec<_> = workbench.registry().sources().to_vec();
    sources.sort();
    assert_eq!(
        sources,
        vec![Some(SourceId::from("doc1")), Some(SourceId::from("doc2"))]
    );
    let doc2 = workbench
        .registry()
        .buffer(&Some(SourceId::from("doc2")))
        .expect("doc2 buffer");
    assert_eq!(doc2.len(), 1);
    assert_eq!(workbench.status().flash_count(), 1);
}
