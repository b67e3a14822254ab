// SPDX-License-Identifier: MPL-2.0
//! The toast layer of the window.
//!
//! [`ToastOverlay`] is both the overlay surface and the renderer of the
//! notification subsystem. Notification tasks write to it from the tokio
//! runtime; the iced view reads a [`ToastSnapshot`] list on every redraw.
//! Nothing in here owns a timer: the instance controllers decide when a
//! toast starts closing and when it goes away.

use crate::notifications::{
    CloseSignal, Host, HostId, MountError, MountedView, NotificationConfig, NotificationKind,
    OverlaySurface, Position, Renderer,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// What the view needs to draw one toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastSnapshot {
    pub id: HostId,
    pub kind: NotificationKind,
    pub position: Position,
    pub message: String,
    pub show_icon: bool,
    pub show_close: bool,
    /// Fraction of the display time left, when a progress bar is shown.
    pub remaining: Option<f32>,
    pub closing: bool,
}

#[derive(Debug)]
struct MountedToast {
    config: NotificationConfig,
    mounted_at: Instant,
    closing: bool,
    on_close: CloseSignal,
}

impl MountedToast {
    fn snapshot(&self, id: HostId, now: Instant) -> ToastSnapshot {
        let remaining = if self.config.show_progress() {
            self.config.duration().auto_dismiss().map(|total| {
                let elapsed = now.saturating_duration_since(self.mounted_at);
                let left = total.saturating_sub(elapsed);
                (left.as_secs_f64() / total.as_secs_f64()) as f32
            })
        } else {
            None
        };

        ToastSnapshot {
            id,
            kind: self.config.kind(),
            position: self.config.position(),
            message: self.config.message().to_string(),
            show_icon: self.config.show_icon(),
            show_close: self.config.show_close(),
            remaining: remaining.map(|fraction| if self.closing { 0.0 } else { fraction }),
            closing: self.closing,
        }
    }
}

/// An attached host and whatever is currently rendered into it.
#[derive(Debug)]
struct Slot {
    host: Host,
    toast: Option<MountedToast>,
}

#[derive(Debug, Default)]
struct OverlayState {
    /// In attach order, which is also creation order.
    slots: Vec<Slot>,
}

impl OverlayState {
    fn slot_mut(&mut self, id: HostId) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| slot.host.id() == id)
    }
}

/// Shared toast layer. Clones refer to the same layer.
#[derive(Debug, Clone, Default)]
pub struct ToastOverlay {
    state: Arc<Mutex<OverlayState>>,
}

impl ToastOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, OverlayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rendered toasts, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ToastSnapshot> {
        self.snapshot_at(Instant::now())
    }

    pub(crate) fn snapshot_at(&self, now: Instant) -> Vec<ToastSnapshot> {
        self.lock()
            .slots
            .iter()
            .filter_map(|slot| {
                slot.toast
                    .as_ref()
                    .map(|toast| toast.snapshot(slot.host.id(), now))
            })
            .collect()
    }

    /// True while any host is attached, rendered or not. The view keeps
    /// ticking until this turns false.
    #[must_use]
    pub fn has_hosts(&self) -> bool {
        !self.lock().slots.is_empty()
    }

    /// Forwards a click on the close control of `id`.
    ///
    /// Returns `false` if nothing is rendered in that host.
    pub fn dismiss(&self, id: HostId) -> bool {
        let signal = self
            .lock()
            .slot_mut(id)
            .and_then(|slot| slot.toast.as_ref())
            .map(|toast| toast.on_close.clone());

        match signal {
            Some(signal) => {
                signal.close();
                true
            }
            None => false,
        }
    }

    fn mark_closing(&self, id: HostId) {
        if let Some(toast) = self.lock().slot_mut(id).and_then(|slot| slot.toast.as_mut()) {
            toast.closing = true;
        }
    }

    fn clear(&self, id: HostId) {
        if let Some(slot) = self.lock().slot_mut(id) {
            slot.toast = None;
        }
    }
}

impl OverlaySurface for ToastOverlay {
    fn attach(&self, host: &Host) {
        let mut state = self.lock();
        if state.slot_mut(host.id()).is_none() {
            state.slots.push(Slot {
                host: host.clone(),
                toast: None,
            });
        }
    }

    fn detach(&self, id: HostId) -> bool {
        let mut state = self.lock();
        let before = state.slots.len();
        state.slots.retain(|slot| slot.host.id() != id);
        state.slots.len() < before
    }

    fn contains(&self, id: HostId) -> bool {
        self.lock().slots.iter().any(|slot| slot.host.id() == id)
    }
}

impl Renderer for ToastOverlay {
    fn mount(
        &self,
        host: &Host,
        config: &NotificationConfig,
        on_close: CloseSignal,
    ) -> Result<Box<dyn MountedView>, MountError> {
        let mut state = self.lock();
        let slot = state
            .slot_mut(host.id())
            .ok_or(MountError::Detached(host.id()))?;

        slot.toast = Some(MountedToast {
            config: config.clone(),
            mounted_at: Instant::now(),
            closing: false,
            on_close,
        });

        Ok(Box::new(ToastView {
            overlay: self.clone(),
            host: host.id(),
        }))
    }
}

struct ToastView {
    overlay: ToastOverlay,
    host: HostId,
}

impl MountedView for ToastView {
    fn closing(&mut self) {
        self.overlay.mark_closing(self.host);
    }

    fn unmount(self: Box<Self>) {
        self.overlay.clear(self.host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{resolve, CloseReason, NotificationOptions};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn mounted(
        overlay: &ToastOverlay,
        options: NotificationOptions,
    ) -> (Host, Box<dyn MountedView>, mpsc::UnboundedReceiver<CloseReason>) {
        let host = Host::allocate();
        let (tx, rx) = mpsc::unbounded_channel();
        overlay.attach(&host);
        let config = resolve("hello", &options).unwrap();
        let view = overlay
            .mount(&host, &config, CloseSignal::new(tx))
            .unwrap();
        (host, view, rx)
    }

    #[test]
    fn attached_but_unrendered_host_has_no_snapshot() {
        let overlay = ToastOverlay::new();
        let host = Host::allocate();

        overlay.attach(&host);

        assert!(overlay.has_hosts());
        assert!(overlay.snapshot().is_empty());
    }

    #[test]
    fn mount_into_detached_host_is_refused() {
        let overlay = ToastOverlay::new();
        let host = Host::allocate();
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = resolve("x", &NotificationOptions::default()).unwrap();

        let result = overlay.mount(&host, &config, CloseSignal::new(tx));

        assert!(matches!(result, Err(MountError::Detached(id)) if id == host.id()));
    }

    #[test]
    fn snapshot_carries_resolved_config() {
        let overlay = ToastOverlay::new();
        let (host, _view, _rx) = mounted(
            &overlay,
            NotificationOptions::new()
                .kind(NotificationKind::Warning)
                .position(Position::BottomCenter)
                .show_icon(false),
        );

        let snapshot = overlay.snapshot();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, host.id());
        assert_eq!(snapshot[0].kind, NotificationKind::Warning);
        assert_eq!(snapshot[0].position, Position::BottomCenter);
        assert!(!snapshot[0].show_icon);
        assert!(snapshot[0].show_close);
        assert!(!snapshot[0].closing);
    }

    #[test]
    fn remaining_time_shrinks_with_elapsed_time() {
        let overlay = ToastOverlay::new();
        let (_host, _view, _rx) = mounted(&overlay, NotificationOptions::new().duration_secs(4.0));
        let start = overlay.snapshot()[0].remaining.unwrap();

        let later = overlay.snapshot_at(Instant::now() + Duration::from_secs(3));
        let after_end = overlay.snapshot_at(Instant::now() + Duration::from_secs(10));

        assert!(start > 0.9);
        assert!(later[0].remaining.unwrap() < 0.3);
        assert_eq!(after_end[0].remaining, Some(0.0));
    }

    #[test]
    fn no_progress_for_sticky_or_disabled_bar() {
        let overlay = ToastOverlay::new();
        let _sticky = mounted(&overlay, NotificationOptions::new().duration_secs(0.0));
        let _hidden = mounted(&overlay, NotificationOptions::new().show_progress(false));

        assert!(overlay.snapshot().iter().all(|toast| toast.remaining.is_none()));
    }

    #[test]
    fn dismiss_fires_close_signal() {
        let overlay = ToastOverlay::new();
        let (host, _view, mut rx) = mounted(&overlay, NotificationOptions::default());

        assert!(overlay.dismiss(host.id()));
        assert_eq!(rx.try_recv().unwrap(), CloseReason::Dismissed);
        assert!(!overlay.dismiss(Host::allocate().id()));
    }

    #[test]
    fn closing_then_unmount_then_detach() {
        let overlay = ToastOverlay::new();
        let (host, mut view, _rx) = mounted(&overlay, NotificationOptions::default());

        view.closing();
        let snapshot = overlay.snapshot();
        assert!(snapshot[0].closing);
        assert_eq!(snapshot[0].remaining, Some(0.0));

        view.unmount();
        assert!(overlay.snapshot().is_empty());
        assert!(overlay.contains(host.id()));

        assert!(overlay.detach(host.id()));
        assert!(!overlay.detach(host.id()));
        assert!(!overlay.has_hosts());
    }

    #[test]
    fn snapshots_keep_creation_order() {
        let overlay = ToastOverlay::new();
        let (first, _a, _ra) = mounted(&overlay, NotificationOptions::default());
        let (second, _b, _rb) = mounted(&overlay, NotificationOptions::default());

        let ids: Vec<_> = overlay.snapshot().iter().map(|toast| toast.id).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
    }
}
