// SPDX-License-Identifier: MPL-2.0
//! Serializable report built from the diagnostics buffer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DiagnosticEventKind, SerializableEvent};
use crate::notifications::CloseReason;

/// Report version, bumped when the JSON layout changes.
pub const REPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    /// Events oldest first.
    pub events: Vec<SerializableEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    pub report_version: u32,
    pub app_version: String,
    pub collection_started_at: DateTime<Utc>,
    pub exported_at: DateTime<Utc>,
    pub collection_duration_ms: u64,
    pub event_count: usize,
}

/// Counts per event type. Closed notifications are split by reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub shown: usize,
    pub expired: usize,
    pub dismissed: usize,
    pub closed_programmatically: usize,
    pub mount_failures: usize,
    pub config_warnings: usize,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        events
            .iter()
            .fold(Self::default(), |mut summary, event| {
                match &event.kind {
                    DiagnosticEventKind::NotificationShown { .. } => summary.shown += 1,
                    DiagnosticEventKind::NotificationClosed { reason, .. } => match reason {
                        CloseReason::Expired => summary.expired += 1,
                        CloseReason::Dismissed => summary.dismissed += 1,
                        CloseReason::Programmatic => summary.closed_programmatically += 1,
                    },
                    DiagnosticEventKind::MountFailed { .. } => summary.mount_failures += 1,
                    DiagnosticEventKind::ConfigWarning { .. } => summary.config_warnings += 1,
                }
                summary
            })
    }

    /// Notifications that finished their close sequence, whatever the reason.
    #[must_use]
    pub fn closed(&self) -> usize {
        self.expired + self.dismissed + self.closed_programmatically
    }
}
