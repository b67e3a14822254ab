// SPDX-License-Identifier: MPL-2.0
//! Rendering hosts and the overlay surface they attach to.
//!
//! A [`Host`] is an isolated attachment point that carries exactly one
//! notification. Hosts are appended to a shared [`OverlaySurface`], never
//! replaced, so several notifications can be on screen at once.

use crate::config::OVERLAY_Z_INDEX;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a host (and the notification living in it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(u64);

impl HostId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host-{}", self.0)
    }
}

/// Whether a layer receives pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvents {
    /// The layer is transparent to the pointer; only its content is hit-tested.
    None,
    Auto,
}

/// Placement of a host relative to the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostStyle {
    /// Positioned against the viewport rather than the document flow.
    pub fixed: bool,
    pub top: f32,
    pub left: f32,
    pub width_percent: f32,
    pub height_percent: f32,
    pub pointer_events: PointerEvents,
    pub z_index: i32,
}

impl HostStyle {
    /// Full-viewport, click-through layer above every other UI layer.
    pub const OVERLAY: HostStyle = HostStyle {
        fixed: true,
        top: 0.0,
        left: 0.0,
        width_percent: 100.0,
        height_percent: 100.0,
        pointer_events: PointerEvents::None,
        z_index: OVERLAY_Z_INDEX,
    };
}

impl Default for HostStyle {
    fn default() -> Self {
        Self::OVERLAY
    }
}

/// Handle to one allocated host.
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    id: HostId,
    style: HostStyle,
}

impl Host {
    /// Allocates a fresh, empty overlay host.
    pub(crate) fn allocate() -> Self {
        Self {
            id: HostId::next(),
            style: HostStyle::OVERLAY,
        }
    }

    #[must_use]
    pub fn id(&self) -> HostId {
        self.id
    }

    #[must_use]
    pub fn style(&self) -> HostStyle {
        self.style
    }
}

/// The shared top-level container every host attaches to.
///
/// Implementations must make [`detach`](OverlaySurface::detach) idempotent:
/// detaching an absent host does nothing.
pub trait OverlaySurface: Send + Sync {
    /// Appends `host` to the surface. Existing hosts are left untouched.
    fn attach(&self, host: &Host);

    /// Removes the host. Returns `false` if it was not attached.
    fn detach(&self, id: HostId) -> bool;

    /// Returns whether the host is currently attached.
    fn contains(&self, id: HostId) -> bool;
}
