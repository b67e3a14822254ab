// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Notification**: display duration, exit delay, overlay stacking
//! - **Overlay Refresh**: how often the UI re-reads the overlay
//! - **Diagnostics**: event buffer bounds

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Display duration used when a caller does not pass one (in seconds).
pub const DEFAULT_NOTIFICATION_DURATION_SECS: f64 = 3.0;

/// Longest accepted display duration (one day). `0` means "until closed".
pub const MAX_NOTIFICATION_DURATION_SECS: f64 = 86_400.0;

/// Length of the exit animation. Teardown happens this long after the
/// close sequence starts.
pub const NOTIFICATION_EXIT_DELAY_MS: u64 = 300;

/// Stacking order of notification hosts, above any application layer.
pub const OVERLAY_Z_INDEX: i32 = 999_999;

// ==========================================================================
// Overlay Refresh Defaults
// ==========================================================================

/// Interval between overlay redraws while notifications are on screen.
pub const OVERLAY_TICK_MS: u64 = 100;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics buffer size.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostics buffer size.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_NOTIFICATION_DURATION_SECS > 0.0);
    assert!(DEFAULT_NOTIFICATION_DURATION_SECS <= MAX_NOTIFICATION_DURATION_SECS);

    // The progress bar must be able to move at least once before teardown.
    assert!(OVERLAY_TICK_MS < NOTIFICATION_EXIT_DELAY_MS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
