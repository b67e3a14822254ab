// SPDX-License-Identifier: MPL-2.0
//! Collector that receives notification events and keeps the recent ones.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::export::{write_atomic, ExportError};
use super::report::{DiagnosticReport, ReportMetadata, ReportSummary, REPORT_VERSION};
use super::{
    sanitize_message, BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind,
    SerializableEvent,
};

/// Events waiting in the channel between two `process_pending` calls.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Sending side of the collector.
///
/// Cheap to clone and usable from any thread. Sending never blocks: when the
/// channel is full the event is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records `kind` now. Free-form messages are sanitized first.
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.try_log(kind);
    }

    /// Like [`log`](Self::log) but reports a full or disconnected channel.
    ///
    /// # Errors
    ///
    /// Returns the rejected event when the collector cannot take it.
    pub fn try_log(&self, kind: DiagnosticEventKind) -> Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx
            .try_send(DiagnosticEvent::new(sanitize_kind(kind)))
    }
}

fn sanitize_kind(kind: DiagnosticEventKind) -> DiagnosticEventKind {
    match kind {
        DiagnosticEventKind::MountFailed { host, message } => DiagnosticEventKind::MountFailed {
            host,
            message: sanitize_message(&message),
        },
        DiagnosticEventKind::ConfigWarning { message } => DiagnosticEventKind::ConfigWarning {
            message: sanitize_message(&message),
        },
        other => other,
    }
}

/// Stores diagnostic events in a memory-bounded circular buffer.
///
/// Events arrive through [`DiagnosticsHandle`]s and are moved into the
/// buffer by [`process_pending`](Self::process_pending), which the app calls
/// on every tick.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    /// Kept to create handles.
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: Instant,
    collection_started_at_utc: DateTime<Utc>,
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .field("started_at", &self.collection_started_at_utc)
            .finish_non_exhaustive()
    }
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the buffer. Returns how many events arrived.
    pub fn process_pending(&mut self) -> usize {
        let mut received = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
            received += 1;
        }
        received
    }

    /// Records an event directly, bypassing the channel.
    pub fn log(&mut self, kind: DiagnosticEventKind) {
        self.buffer.push(DiagnosticEvent::new(sanitize_kind(kind)));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.collection_started_at_utc
    }

    /// Renders the buffer as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Writes the JSON report to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if writing fails and
    /// [`ExportError::Serialization`] if serialization fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        let json = self.export_json()?;
        write_atomic(path, &json)?;
        tracing::info!(events = self.len(), "diagnostics report exported");
        Ok(path.to_path_buf())
    }

    /// Builds a report from the current buffer contents.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn build_report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent::new(event, self.collection_started_at))
            .collect();

        DiagnosticReport {
            metadata: ReportMetadata {
                report_version: REPORT_VERSION,
                app_version: env!("CARGO_PKG_VERSION").to_string(),
                collection_started_at: self.collection_started_at_utc,
                exported_at: Utc::now(),
                collection_duration_ms: self.collection_started_at.elapsed().as_millis() as u64,
                event_count: events.len(),
            },
            summary: ReportSummary::from_events(&events),
            events,
        }
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{CloseReason, NotificationKind, Position};

    fn shown(host: u64) -> DiagnosticEventKind {
        DiagnosticEventKind::NotificationShown {
            host,
            kind: NotificationKind::Info,
            position: Position::TopRight,
        }
    }

    #[test]
    fn new_collector_is_empty() {
        let collector = DiagnosticsCollector::default();

        assert!(collector.is_empty());
        assert_eq!(collector.capacity(), BufferCapacity::default().value());
    }

    #[test]
    fn handle_events_arrive_on_process_pending() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log(shown(1));
        assert!(collector.is_empty());

        assert_eq!(collector.process_pending(), 1);
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn handles_work_across_threads() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        std::thread::spawn(move || handle.log(shown(2)))
            .join()
            .unwrap();

        collector.process_pending();
        assert_eq!(collector.iter().next().unwrap().kind.host(), Some(2));
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        for host in 0..DEFAULT_CHANNEL_CAPACITY as u64 {
            handle.try_log(shown(host)).unwrap();
        }

        assert!(matches!(
            handle.try_log(shown(999)),
            Err(TrySendError::Full(_))
        ));
        handle.log(shown(1000));
    }

    #[test]
    fn mount_failure_messages_are_sanitized() {
        let mut collector = DiagnosticsCollector::default();
        collector.handle().log(DiagnosticEventKind::MountFailed {
            host: 4,
            message: "missing font /home/ada/.fonts/icons.ttf".to_string(),
        });
        collector.process_pending();

        assert_eq!(
            collector.iter().next().unwrap().kind,
            DiagnosticEventKind::MountFailed {
                host: 4,
                message: "missing font <path>".to_string(),
            }
        );
    }

    #[test]
    fn buffer_keeps_only_the_newest_events() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(0));
        let capacity = collector.capacity() as u64;

        for host in 0..capacity + 5 {
            collector.log(shown(host));
        }

        assert_eq!(collector.len() as u64, capacity);
        assert_eq!(collector.iter().next().unwrap().kind.host(), Some(5));
    }

    #[test]
    fn export_json_contains_metadata_summary_and_events() {
        let mut collector = DiagnosticsCollector::default();
        collector.log(shown(1));
        collector.log(DiagnosticEventKind::NotificationClosed {
            host: 1,
            reason: CloseReason::Dismissed,
        });

        let json = collector.export_json().expect("export should succeed");
        let report: DiagnosticReport = serde_json::from_str(&json).expect("valid report json");

        assert_eq!(report.metadata.event_count, 2);
        assert_eq!(report.metadata.report_version, REPORT_VERSION);
        assert_eq!(report.metadata.collection_started_at, collector.started_at());
        assert_eq!(report.summary.shown, 1);
        assert_eq!(report.summary.dismissed, 1);
        assert!(report.events[0].timestamp_ms <= report.events[1].timestamp_ms);
    }

    #[test]
    fn export_to_file_writes_the_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut collector = DiagnosticsCollector::default();
        collector.log(shown(3));

        let path = collector
            .export_to_file(dir.path().join("report.json"))
            .expect("export should succeed");

        let content = std::fs::read_to_string(path).expect("report readable");
        assert!(content.contains("\"notification_shown\""));
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut collector = DiagnosticsCollector::default();
        collector.log(shown(1));
        collector.clear();
        assert!(collector.is_empty());
    }
}
