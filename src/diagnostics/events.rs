// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notification activity.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::notifications::{CloseReason, NotificationKind, Position};

/// A diagnostic event with its capture time.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEvent {
    /// Monotonic capture time, turned into an offset on export.
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self::with_timestamp(kind, Instant::now())
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// What happened. Hosts are identified by their numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A notification was mounted and is now visible.
    NotificationShown {
        host: u64,
        kind: NotificationKind,
        position: Position,
    },

    /// A notification finished its close sequence and its host is gone.
    NotificationClosed { host: u64, reason: CloseReason },

    /// The renderer refused or panicked; the host was removed again.
    MountFailed { host: u64, message: String },

    /// The settings file could not be used and defaults were applied.
    ConfigWarning { message: String },
}

impl DiagnosticEventKind {
    /// Host the event belongs to, if any.
    #[must_use]
    pub fn host(&self) -> Option<u64> {
        match self {
            Self::NotificationShown { host, .. }
            | Self::NotificationClosed { host, .. }
            | Self::MountFailed { host, .. } => Some(*host),
            Self::ConfigWarning { .. } => None,
        }
    }
}

/// A [`DiagnosticEvent`] with its timestamp made relative to the start of
/// collection, ready for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(event: &DiagnosticEvent, collection_start: Instant) -> Self {
        let timestamp_ms = event
            .timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;

        Self {
            timestamp_ms,
            kind: event.kind.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_uses_current_time() {
        let before = Instant::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::ConfigWarning {
            message: "bad".to_string(),
        });

        assert!(event.timestamp >= before);
        assert!(event.timestamp <= Instant::now());
    }

    #[test]
    fn shown_event_serializes_with_type_tag() {
        let event = DiagnosticEventKind::NotificationShown {
            host: 7,
            kind: NotificationKind::Success,
            position: Position::BottomLeft,
        };

        let json = serde_json::to_string(&event).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"notification_shown\""));
        assert!(json.contains("\"kind\":\"success\""));
        assert!(json.contains("\"position\":\"bottom-left\""));
    }

    #[test]
    fn closed_event_deserializes_from_json() {
        let json = r#"{"type":"notification_closed","host":3,"reason":"expired"}"#;
        let event: DiagnosticEventKind =
            serde_json::from_str(json).expect("deserialization should succeed");

        assert_eq!(
            event,
            DiagnosticEventKind::NotificationClosed {
                host: 3,
                reason: CloseReason::Expired,
            }
        );
    }

    #[test]
    fn host_is_reported_for_lifecycle_events_only() {
        let failed = DiagnosticEventKind::MountFailed {
            host: 9,
            message: "x".to_string(),
        };
        let warning = DiagnosticEventKind::ConfigWarning {
            message: "x".to_string(),
        };

        assert_eq!(failed.host(), Some(9));
        assert_eq!(warning.host(), None);
    }

    #[test]
    fn serializable_event_is_relative_and_flat() {
        let start = Instant::now();
        let event = DiagnosticEvent::with_timestamp(
            DiagnosticEventKind::MountFailed {
                host: 1,
                message: "renderer rejected".to_string(),
            },
            start + Duration::from_millis(1_500),
        );

        let serializable = SerializableEvent::new(&event, start);
        assert_eq!(serializable.timestamp_ms, 1_500);

        let json = serde_json::to_string(&serializable).expect("serialization should succeed");
        assert!(json.contains("\"timestamp_ms\":1500"));
        assert!(json.contains("\"type\":\"mount_failed\""));
    }
}
