// SPDX-License-Identifier: MPL-2.0
//! Mount-point allocation.
//!
//! [`Allocator::display`] attaches a fresh host synchronously, then defers
//! instantiation to a spawned task so the component never renders into a
//! host that is not yet attached. If instantiation fails, the host is removed
//! again and the failure is only logged: a broken toast must never take the
//! calling panel down with it.

use super::controller::{CloseReason, Controller, InstanceState, NotificationHandle, StateCell};
use super::host::{Host, OverlaySurface};
use super::options::NotificationConfig;
use super::renderer::{CloseSignal, MountError, MountedView, Renderer};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Creates hosts and hands them to instance controllers.
#[derive(Clone)]
pub struct Allocator {
    runtime: Handle,
    surface: Arc<dyn OverlaySurface>,
    renderer: Arc<dyn Renderer>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl std::fmt::Debug for Allocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocator")
            .field("diagnostics", &self.diagnostics.is_some())
            .finish_non_exhaustive()
    }
}

impl Allocator {
    pub fn new(
        runtime: Handle,
        surface: Arc<dyn OverlaySurface>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            runtime,
            surface,
            renderer,
            diagnostics: None,
        }
    }

    /// Sets the diagnostics handle lifecycle events and mount failures go to.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    /// Shows `config` in a new host.
    ///
    /// The host is attached before this returns; the component is rendered
    /// on the next scheduling tick. The returned handle may be dropped.
    pub fn display(&self, config: NotificationConfig) -> NotificationHandle {
        let host = Host::allocate();
        self.surface.attach(&host);

        let config = Arc::new(config);
        let (state, state_rx) = StateCell::new();
        let (requests_tx, requests) = mpsc::unbounded_channel();
        let handle = NotificationHandle::new(
            host.id(),
            Arc::clone(&config),
            state_rx,
            CloseSignal::new(requests_tx.clone()),
        );

        let mount = PendingMount {
            host,
            config,
            surface: Arc::clone(&self.surface),
            renderer: Arc::clone(&self.renderer),
            diagnostics: self.diagnostics.clone(),
            state,
            requests_tx,
            requests,
        };
        self.runtime.spawn(mount.run());

        handle
    }
}

/// Everything needed to instantiate one notification once its host is live.
struct PendingMount {
    host: Host,
    config: Arc<NotificationConfig>,
    surface: Arc<dyn OverlaySurface>,
    renderer: Arc<dyn Renderer>,
    diagnostics: Option<DiagnosticsHandle>,
    state: StateCell,
    requests_tx: mpsc::UnboundedSender<CloseReason>,
    requests: mpsc::UnboundedReceiver<CloseReason>,
}

impl PendingMount {
    async fn run(self) {
        let PendingMount {
            host,
            config,
            surface,
            renderer,
            diagnostics,
            state,
            requests_tx,
            requests,
        } = self;

        let on_close = CloseSignal::new(requests_tx);
        match instantiate(surface.as_ref(), renderer.as_ref(), &host, &config, on_close) {
            Ok(view) => {
                Controller::new(host.id(), config, view, surface, state, requests, diagnostics)
                    .run()
                    .await;
            }
            Err(err) => {
                tracing::warn!(host = %host.id(), error = %err, "failed to mount notification");
                if let Some(diagnostics) = &diagnostics {
                    diagnostics.log(DiagnosticEventKind::MountFailed {
                        host: host.id().value(),
                        message: err.to_string(),
                    });
                }
                surface.detach(host.id());
                state.advance(InstanceState::Closed);
            }
        }
    }
}

/// Renders into `host`, refusing detached hosts and containing renderer panics.
fn instantiate(
    surface: &dyn OverlaySurface,
    renderer: &dyn Renderer,
    host: &Host,
    config: &NotificationConfig,
    on_close: CloseSignal,
) -> Result<Box<dyn MountedView>, MountError> {
    if !surface.contains(host.id()) {
        return Err(MountError::Detached(host.id()));
    }

    panic::catch_unwind(AssertUnwindSafe(|| renderer.mount(host, config, on_close)))
        .unwrap_or_else(|payload| Err(MountError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
