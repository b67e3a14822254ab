// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for notification activity.
//!
//! Lifecycle events (shown, closed, mount failures) flow from the
//! notification tasks through a [`DiagnosticsHandle`] into a
//! [`DiagnosticsCollector`], which keeps the most recent ones in a
//! [`CircularBuffer`] and can export them as a JSON report. File paths in
//! free-form messages are scrubbed before they are stored.

mod buffer;
mod collector;
mod events;
mod export;
mod report;
mod sanitizer;

pub use buffer::{buffer_capacity_bounds, BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, SerializableEvent};
pub use export::{generate_default_filename, write_atomic, ExportError};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, REPORT_VERSION};
pub use sanitizer::{sanitize_message, MAX_MESSAGE_CHARS};
