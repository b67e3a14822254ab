// SPDX-License-Identifier: MPL-2.0
//! Public entry points for showing notifications.

use super::allocator::Allocator;
use super::controller::NotificationHandle;
use super::host::OverlaySurface;
use super::options::{
    resolve_with, ConfigError, NotificationDefaults, NotificationKind, NotificationOptions,
};
use super::renderer::Renderer;
use crate::diagnostics::DiagnosticsHandle;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Shows notifications. Cheap to clone and share between panels.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use toastline::notifications::{
///     HeadlessRenderer, HeadlessSurface, NotificationOptions, Notifier,
/// };
///
/// # async fn demo() -> Result<(), toastline::notifications::ConfigError> {
/// let notifier = Notifier::new(
///     tokio::runtime::Handle::current(),
///     Arc::new(HeadlessSurface::new()),
///     Arc::new(HeadlessRenderer::new()),
/// );
///
/// notifier.success("Saved", NotificationOptions::new().duration_secs(1.0))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Notifier {
    allocator: Allocator,
    defaults: NotificationDefaults,
}

impl Notifier {
    pub fn new(
        runtime: Handle,
        surface: Arc<dyn OverlaySurface>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            allocator: Allocator::new(runtime, surface, renderer),
            defaults: NotificationDefaults::default(),
        }
    }

    /// Replaces the defaults options are merged onto.
    #[must_use]
    pub fn with_defaults(mut self, defaults: NotificationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.allocator = self.allocator.with_diagnostics(handle);
        self
    }

    #[must_use]
    pub fn defaults(&self) -> &NotificationDefaults {
        &self.defaults
    }

    /// Shows `message` with the given overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is out of range. Nothing is
    /// shown in that case.
    pub fn notify(
        &self,
        message: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationHandle, ConfigError> {
        let config = resolve_with(&self.defaults, message, &options)?;
        Ok(self.allocator.display(config))
    }

    /// [`notify`](Self::notify) with the kind fixed to info.
    ///
    /// # Errors
    ///
    /// See [`notify`](Self::notify).
    pub fn info(
        &self,
        message: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationHandle, ConfigError> {
        self.notify(message, options.kind(NotificationKind::Info))
    }

    /// [`notify`](Self::notify) with the kind fixed to success.
    ///
    /// # Errors
    ///
    /// See [`notify`](Self::notify).
    pub fn success(
        &self,
        message: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationHandle, ConfigError> {
        self.notify(message, options.kind(NotificationKind::Success))
    }

    /// [`notify`](Self::notify) with the kind fixed to warning.
    ///
    /// # Errors
    ///
    /// See [`notify`](Self::notify).
    pub fn warning(
        &self,
        message: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationHandle, ConfigError> {
        self.notify(message, options.kind(NotificationKind::Warning))
    }

    /// [`notify`](Self::notify) with the kind fixed to error.
    ///
    /// # Errors
    ///
    /// See [`notify`](Self::notify).
    pub fn error(
        &self,
        message: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationHandle, ConfigError> {
        self.notify(message, options.kind(NotificationKind::Error))
    }
}
