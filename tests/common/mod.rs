// SPDX-License-Identifier: MPL-2.0
//! Shared helpers for integration tests. All of them expect a tokio test
//! runtime with a paused clock.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use toastline::notifications::{HeadlessRenderer, HeadlessSurface, Notifier};

/// Lets spawned notification tasks run to their next await point.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Moves the paused clock forward and lets woken tasks run.
pub async fn advance_ms(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    settle().await;
}

/// A notifier wired to the in-memory surface and renderer.
pub fn headless_notifier() -> (Notifier, Arc<HeadlessSurface>, HeadlessRenderer) {
    let surface = Arc::new(HeadlessSurface::new());
    let renderer = HeadlessRenderer::new();
    let notifier = Notifier::new(
        tokio::runtime::Handle::current(),
        surface.clone(),
        Arc::new(renderer.clone()),
    );
    (notifier, surface, renderer)
}
