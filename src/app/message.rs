// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::notifications::{NotificationKind, Position};
use crate::ui::toast;
use std::time::Instant;
use tokio::runtime::Handle;

/// Messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Show a notification of the given kind with the configured duration.
    Show(NotificationKind),
    /// Show an info notification that stays until closed.
    ShowSticky,
    /// Try to show a notification with a negative duration.
    ShowInvalid,
    /// Close the most recent notification from code.
    CloseLast,
    SelectPosition(Position),
    ExportDiagnostics,
    Toast(toast::Message),
    /// Redraw tick while toasts are on screen.
    Tick(Instant),
    /// Periodic drain of the diagnostics channel.
    RefreshDiagnostics,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug)]
pub struct Flags {
    /// Runtime the notification tasks are spawned on.
    pub runtime: Handle,
    /// Position override from `--position`. Takes precedence over the
    /// `[notifications]` section of the settings file.
    pub position: Option<Position>,
}
