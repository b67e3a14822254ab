// SPDX-License-Identifier: MPL-2.0
//! Periodic subscriptions of the demo application.

use super::Message;
use crate::config::OVERLAY_TICK_MS;
use iced::{time, Subscription};
use std::time::Duration;

/// Redraws the toast layer while any host is attached, so progress bars move
/// and closed toasts disappear without user input.
pub fn create_tick_subscription(has_hosts: bool) -> Subscription<Message> {
    if has_hosts {
        time::every(Duration::from_millis(OVERLAY_TICK_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Drains lifecycle events into the diagnostics buffer once per second.
pub fn create_diagnostics_subscription() -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::RefreshDiagnostics)
}
