// SPDX-License-Identifier: MPL-2.0
mod common;

use common::{advance_ms, settle};
use std::sync::Arc;
use tempfile::tempdir;
use toastline::config::{self, Config};
use toastline::diagnostics::BufferCapacity;
use toastline::notifications::{
    HeadlessRenderer, HeadlessSurface, InstanceState, NotificationKind, NotificationOptions,
    Notifier, Position,
};

#[test]
fn settings_round_trip_through_a_custom_directory() {
    let dir = tempdir().expect("Failed to create temporary directory");

    let mut saved = Config::default();
    saved.notifications = NotificationOptions::new()
        .position(Position::BottomCenter)
        .duration_secs(7.5)
        .show_progress(false);
    saved.diagnostics.buffer_capacity = BufferCapacity::new(500);

    config::save_with_override(&saved, Some(dir.path().join("nested")))
        .expect("Failed to save settings");
    let (loaded, warning) = config::load_with_override(Some(dir.path().join("nested")));

    assert!(warning.is_none());
    assert_eq!(loaded, saved);
}

#[test]
fn invalid_settings_fall_back_to_defaults_with_a_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(
        dir.path().join("settings.toml"),
        "[notifications]\nduration_secs = -3.0\n",
    )
    .expect("Failed to write settings");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert_eq!(loaded, Config::default());
    let warning = warning.expect("warning for invalid settings");
    assert!(warning.contains("negative"), "unexpected warning: {warning}");
}

#[test]
fn missing_settings_file_is_silent() {
    let dir = tempdir().expect("Failed to create temporary directory");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert_eq!(loaded, Config::default());
    assert!(warning.is_none());
}

#[tokio::test(start_paused = true)]
async fn configured_defaults_drive_new_notifications() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(
        dir.path().join("settings.toml"),
        "[notifications]\ntype = \"warning\"\nposition = \"top-left\"\nduration_secs = 0.5\n",
    )
    .expect("Failed to write settings");
    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let surface = Arc::new(HeadlessSurface::new());
    let renderer = HeadlessRenderer::new();
    let notifier = Notifier::new(
        tokio::runtime::Handle::current(),
        surface.clone(),
        Arc::new(renderer.clone()),
    )
    .with_defaults(loaded.notification_defaults().expect("valid defaults"));

    let handle = notifier
        .notify("from settings", NotificationOptions::default())
        .expect("valid options");
    settle().await;

    assert_eq!(handle.config().kind(), NotificationKind::Warning);
    assert_eq!(handle.config().position(), Position::TopLeft);
    assert_eq!(handle.state(), InstanceState::Visible);

    // Per-call options still win over the settings file.
    let explicit = notifier
        .error("explicit", NotificationOptions::new().position(Position::BottomRight))
        .expect("valid options");
    assert_eq!(explicit.config().kind(), NotificationKind::Error);
    assert_eq!(explicit.config().position(), Position::BottomRight);

    advance_ms(500).await;
    advance_ms(300).await;
    assert_eq!(handle.state(), InstanceState::Closed);
}
