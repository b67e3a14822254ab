// SPDX-License-Identifier: MPL-2.0
//! In-memory surface and renderer for running without a window.
//!
//! Both keep a record of every call, which makes them suitable for driving
//! the notification lifecycle from tests or from tools that only want the
//! lifecycle events (for example, to forward them to a terminal).

use super::host::{Host, HostId, OverlaySurface};
use super::options::{NotificationConfig, NotificationKind};
use super::renderer::{CloseSignal, MountError, MountedView, Renderer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct SurfaceLog {
    /// Attached hosts in attachment order.
    attached: Vec<HostId>,
    detach_calls: HashMap<HostId, usize>,
}

/// Overlay surface that only tracks which hosts are attached.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    log: Mutex<SurfaceLog>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached hosts, oldest first.
    #[must_use]
    pub fn attached(&self) -> Vec<HostId> {
        lock(&self.log).attached.clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.log).attached.is_empty()
    }

    /// Number of times `detach` was called for `id`, attached or not.
    #[must_use]
    pub fn detach_calls(&self, id: HostId) -> usize {
        lock(&self.log).detach_calls.get(&id).copied().unwrap_or(0)
    }
}

impl OverlaySurface for HeadlessSurface {
    fn attach(&self, host: &Host) {
        let mut log = lock(&self.log);
        if !log.attached.contains(&host.id()) {
            log.attached.push(host.id());
        }
    }

    fn detach(&self, id: HostId) -> bool {
        let mut log = lock(&self.log);
        *log.detach_calls.entry(id).or_default() += 1;
        let before = log.attached.len();
        log.attached.retain(|attached| *attached != id);
        log.attached.len() < before
    }

    fn contains(&self, id: HostId) -> bool {
        lock(&self.log).attached.contains(&id)
    }
}

/// A notification as the headless renderer saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNotification {
    pub host: HostId,
    pub kind: NotificationKind,
    pub message: String,
    pub closing: bool,
}

#[derive(Debug, Default)]
struct RendererLog {
    mounted: Vec<RenderedNotification>,
    signals: HashMap<HostId, CloseSignal>,
    unmounts: HashMap<HostId, usize>,
    fail_next: Option<MountError>,
}

/// Renderer that records mounts and lets callers simulate user dismissal.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    log: Arc<Mutex<RendererLog>>,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next mount fail with `error`.
    pub fn fail_next_mount(&self, error: MountError) {
        lock(&self.log).fail_next = Some(error);
    }

    /// Hosts of the notifications currently mounted, oldest first.
    #[must_use]
    pub fn mounted(&self) -> Vec<HostId> {
        lock(&self.log).mounted.iter().map(|n| n.host).collect()
    }

    /// The mounted notification in `host`, if any.
    #[must_use]
    pub fn rendered(&self, host: HostId) -> Option<RenderedNotification> {
        lock(&self.log)
            .mounted
            .iter()
            .find(|n| n.host == host)
            .cloned()
    }

    /// Number of times the view in `host` was unmounted.
    #[must_use]
    pub fn unmount_count(&self, host: HostId) -> usize {
        lock(&self.log).unmounts.get(&host).copied().unwrap_or(0)
    }

    /// Simulates the user clicking the close control of `host`.
    ///
    /// Returns `false` if nothing is mounted there.
    pub fn click_close(&self, host: HostId) -> bool {
        let signal = lock(&self.log).signals.get(&host).cloned();
        match signal {
            Some(signal) => {
                signal.close();
                true
            }
            None => false,
        }
    }

    fn mark_closing(&self, host: HostId) {
        let mut log = lock(&self.log);
        if let Some(rendered) = log.mounted.iter_mut().find(|n| n.host == host) {
            rendered.closing = true;
        }
    }

    fn remove(&self, host: HostId) {
        let mut log = lock(&self.log);
        log.mounted.retain(|n| n.host != host);
        log.signals.remove(&host);
        *log.unmounts.entry(host).or_default() += 1;
    }
}

impl Renderer for HeadlessRenderer {
    fn mount(
        &self,
        host: &Host,
        config: &NotificationConfig,
        on_close: CloseSignal,
    ) -> Result<Box<dyn MountedView>, MountError> {
        let mut log = lock(&self.log);
        if let Some(error) = log.fail_next.take() {
            return Err(error);
        }

        log.mounted.push(RenderedNotification {
            host: host.id(),
            kind: config.kind(),
            message: config.message().to_string(),
            closing: false,
        });
        log.signals.insert(host.id(), on_close);

        Ok(Box::new(HeadlessView {
            renderer: self.clone(),
            host: host.id(),
        }))
    }
}

struct HeadlessView {
    renderer: HeadlessRenderer,
    host: HostId,
}

impl MountedView for HeadlessView {
    fn closing(&mut self) {
        self.renderer.mark_closing(self.host);
    }

    fn unmount(self: Box<Self>) {
        self.renderer.remove(self.host);
    }
}
