// SPDX-License-Identifier: MPL-2.0
//! Lifecycle of one mounted notification.
//!
//! The controller takes over after a successful mount: it marks the instance
//! visible, runs the auto-dismiss timer, waits for the first close trigger,
//! observes the exit delay and finally unmounts the view and removes the host.
//! A single task drives all of this, so the close sequence runs at most once.

use super::host::{HostId, OverlaySurface};
use super::options::NotificationConfig;
use super::renderer::{CloseSignal, MountedView};
use crate::config::NOTIFICATION_EXIT_DELAY_MS;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Time between the start of the close sequence and teardown, matching the
/// exit animation.
pub const EXIT_DELAY: Duration = Duration::from_millis(NOTIFICATION_EXIT_DELAY_MS);

/// Lifecycle state of a notification instance. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstanceState {
    /// Host attached, component not rendered yet.
    Pending,
    Visible,
    /// Exit delay running.
    Closing,
    Closed,
}

/// What started the close sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The auto-dismiss timer fired.
    Expired,
    /// The user clicked the close control.
    Dismissed,
    /// [`NotificationHandle::close`] was called.
    Programmatic,
}

/// Write side of an instance's state, enforcing forward-only transitions.
#[derive(Debug)]
pub(crate) struct StateCell(watch::Sender<InstanceState>);

impl StateCell {
    pub(crate) fn new() -> (Self, watch::Receiver<InstanceState>) {
        let (tx, rx) = watch::channel(InstanceState::Pending);
        (Self(tx), rx)
    }

    /// Moves to `next` if it is later than the current state.
    pub(crate) fn advance(&self, next: InstanceState) -> bool {
        self.0.send_if_modified(|current| {
            if next > *current {
                *current = next;
                true
            } else {
                false
            }
        })
    }
}

/// Caller-side view of a notification.
///
/// Dropping the handle does not affect the notification; it still runs its
/// whole lifecycle.
#[derive(Debug, Clone)]
pub struct NotificationHandle {
    id: HostId,
    config: Arc<NotificationConfig>,
    state: watch::Receiver<InstanceState>,
    close: CloseSignal,
}

impl NotificationHandle {
    pub(crate) fn new(
        id: HostId,
        config: Arc<NotificationConfig>,
        state: watch::Receiver<InstanceState>,
        close: CloseSignal,
    ) -> Self {
        Self {
            id,
            config,
            state,
            close,
        }
    }

    #[must_use]
    pub fn id(&self) -> HostId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> InstanceState {
        *self.state.borrow()
    }

    /// Starts the close sequence. No-op once closing or closed.
    ///
    /// A close requested while the notification is still pending takes
    /// effect right after it mounts.
    pub fn close(&self) {
        if self.state() < InstanceState::Closing {
            self.close.request(CloseReason::Programmatic);
        }
    }

    /// Waits until the notification has been torn down.
    pub async fn closed(&self) {
        let mut state = self.state.clone();
        let _ = state
            .wait_for(|current| *current == InstanceState::Closed)
            .await;
    }
}

/// Owns a mounted notification until it is closed.
pub(crate) struct Controller {
    id: HostId,
    config: Arc<NotificationConfig>,
    view: Box<dyn MountedView>,
    surface: Arc<dyn OverlaySurface>,
    state: StateCell,
    requests: mpsc::UnboundedReceiver<CloseReason>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Controller {
    pub(crate) fn new(
        id: HostId,
        config: Arc<NotificationConfig>,
        view: Box<dyn MountedView>,
        surface: Arc<dyn OverlaySurface>,
        state: StateCell,
        requests: mpsc::UnboundedReceiver<CloseReason>,
        diagnostics: Option<DiagnosticsHandle>,
    ) -> Self {
        Self {
            id,
            config,
            view,
            surface,
            state,
            requests,
            diagnostics,
        }
    }

    /// Drives the notification from visible to closed.
    pub(crate) async fn run(mut self) {
        self.state.advance(InstanceState::Visible);
        tracing::debug!(
            host = %self.id,
            kind = %self.config.kind(),
            position = %self.config.position(),
            "notification mounted"
        );
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log(DiagnosticEventKind::NotificationShown {
                host: self.id.value(),
                kind: self.config.kind(),
                position: self.config.position(),
            });
        }

        let reason = self.wait_for_close().await;
        self.close(reason).await;
    }

    /// Resolves with the first close trigger. Losing the race drops the
    /// timer, which cancels it.
    async fn wait_for_close(&mut self) -> CloseReason {
        let requested = next_request(&mut self.requests);
        match self.config.duration().auto_dismiss() {
            Some(after) => tokio::select! {
                () = tokio::time::sleep(after) => CloseReason::Expired,
                reason = requested => reason,
            },
            None => requested.await,
        }
    }

    async fn close(mut self, reason: CloseReason) {
        self.state.advance(InstanceState::Closing);
        tracing::debug!(host = %self.id, ?reason, "closing notification");
        self.view.closing();

        tokio::time::sleep(EXIT_DELAY).await;

        self.view.unmount();
        if !self.surface.detach(self.id) {
            tracing::debug!(host = %self.id, "host was already detached");
        }
        self.state.advance(InstanceState::Closed);

        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log(DiagnosticEventKind::NotificationClosed {
                host: self.id.value(),
                reason,
            });
        }
    }
}

/// Next close request. If every sender is gone nothing can close the
/// notification any more, so this never resolves.
async fn next_request(requests: &mut mpsc::UnboundedReceiver<CloseReason>) -> CloseReason {
    match requests.recv().await {
        Some(reason) => reason,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_are_ordered_by_lifecycle() {
        assert!(InstanceState::Pending < InstanceState::Visible);
        assert!(InstanceState::Visible < InstanceState::Closing);
        assert!(InstanceState::Closing < InstanceState::Closed);
    }

    #[test]
    fn state_cell_never_moves_backwards() {
        let (cell, rx) = StateCell::new();

        assert!(cell.advance(InstanceState::Visible));
        assert!(cell.advance(InstanceState::Closed));
        assert!(!cell.advance(InstanceState::Closing));
        assert!(!cell.advance(InstanceState::Closed));
        assert_eq!(*rx.borrow(), InstanceState::Closed);
    }

    #[test]
    fn exit_delay_matches_animation_length() {
        assert_eq!(EXIT_DELAY, Duration::from_millis(300));
    }

    #[test]
    fn close_reason_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&CloseReason::Programmatic).unwrap(),
            "\"programmatic\""
        );
    }
}
