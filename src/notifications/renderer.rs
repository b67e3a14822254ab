// SPDX-License-Identifier: MPL-2.0
//! Port to the component that draws a notification into its host.
//!
//! The renderer knows nothing about timers or teardown ordering. It is told
//! to mount, optionally told that the exit animation has started, and finally
//! told to unmount. When the user dismisses the notification, it fires the
//! [`CloseSignal`] it was handed at mount time.

use super::controller::CloseReason;
use super::host::{Host, HostId};
use super::options::NotificationConfig;
use tokio::sync::mpsc;

/// Reasons a notification could not be instantiated into its host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    /// The host was removed from the surface before the component rendered.
    #[error("{0} is not attached to the overlay surface")]
    Detached(HostId),
    /// The renderer refused the notification.
    #[error("renderer rejected the notification: {0}")]
    Rejected(String),
    /// The renderer panicked while mounting.
    #[error("renderer panicked while mounting: {0}")]
    Panicked(String),
}

/// Instantiates notification components into hosts.
pub trait Renderer: Send + Sync {
    /// Renders `config` into `host`.
    ///
    /// `on_close` must be fired when the user dismisses the notification.
    ///
    /// # Errors
    ///
    /// Returns [`MountError`] when the component cannot be rendered.
    fn mount(
        &self,
        host: &Host,
        config: &NotificationConfig,
        on_close: CloseSignal,
    ) -> Result<Box<dyn MountedView>, MountError>;
}

/// A live component tree inside a host.
pub trait MountedView: Send {
    /// Called once when the exit delay starts.
    fn closing(&mut self) {}

    /// Releases the component. Called exactly once, after the exit delay.
    fn unmount(self: Box<Self>);
}

/// Continuation a rendered notification uses to ask for its own closure.
///
/// Firing it more than once, or after the notification closed, is a no-op.
#[derive(Debug, Clone)]
pub struct CloseSignal {
    tx: mpsc::UnboundedSender<CloseReason>,
}

impl CloseSignal {
    pub(crate) fn new(tx: mpsc::UnboundedSender<CloseReason>) -> Self {
        Self { tx }
    }

    /// Requests closure on behalf of the user.
    pub fn close(&self) {
        self.request(CloseReason::Dismissed);
    }

    /// Returns `false` once the owning instance has been torn down.
    pub(crate) fn request(&self, reason: CloseReason) -> bool {
        self.tx.send(reason).is_ok()
    }

    /// Returns true when the owning instance no longer listens for requests.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
