// SPDX-License-Identifier: MPL-2.0
//! Test utilities shared by unit tests.
//!
//! Float assertions come from the `approx` crate; the async helpers assume a
//! tokio runtime with a paused clock.

pub use approx::assert_abs_diff_eq;

use crate::notifications::{
    CloseSignal, Host, MountError, MountedView, NotificationConfig, Renderer,
};

/// Default epsilon for f64 comparisons.
pub const F64_EPSILON: f64 = 1e-10;

/// Lets every task that is ready run to its next await point.
///
/// Mount tasks are spawned, so a test must yield before the notification
/// becomes visible. A handful of rounds covers mount plus controller start.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Renderer that panics on every mount.
#[derive(Debug, Default)]
pub struct PanickingRenderer;

impl Renderer for PanickingRenderer {
    fn mount(
        &self,
        _host: &Host,
        _config: &NotificationConfig,
        _on_close: CloseSignal,
    ) -> Result<Box<dyn MountedView>, MountError> {
        panic!("renderer exploded")
    }
}
