// SPDX-License-Identifier: MPL-2.0
//! Transient toast notifications.
//!
//! Callers fire a notification and forget about it: the subsystem resolves
//! the options, attaches an isolated host to the overlay surface, renders the
//! component one scheduling tick later, dismisses it after its duration (or
//! when the user or caller closes it), waits for the exit animation, then
//! unmounts the component and removes the host.
//!
//! # Components
//!
//! - [`options`] - option merging and validation (`resolve`)
//! - [`host`] - hosts and the [`OverlaySurface`] port
//! - [`renderer`] - the [`Renderer`] port and [`CloseSignal`]
//! - [`allocator`] - host creation and failure cleanup
//! - [`controller`] - per-instance timer and close sequence
//! - [`facade`] - [`Notifier`] with `notify`/`info`/`success`/`warning`/`error`
//! - [`headless`] - in-memory surface and renderer
//!
//! # Usage
//!
//! ```ignore
//! use toastline::notifications::{NotificationOptions, Notifier};
//!
//! let notifier = Notifier::new(runtime, surface, renderer);
//! notifier.success("Saved", NotificationOptions::new().duration_secs(1.0))?;
//! notifier.info("Pinned", NotificationOptions::new().duration_secs(0.0))?;
//! ```

pub mod allocator;
pub mod controller;
pub mod facade;
pub mod headless;
pub mod host;
pub mod options;
pub mod renderer;

pub use allocator::Allocator;
pub use controller::{CloseReason, InstanceState, NotificationHandle, EXIT_DELAY};
pub use facade::Notifier;
pub use headless::{HeadlessRenderer, HeadlessSurface, RenderedNotification};
pub use host::{Host, HostId, HostStyle, OverlaySurface, PointerEvents};
pub use options::{
    resolve, resolve_with, ConfigError, DisplayDuration, NotificationConfig,
    NotificationDefaults, NotificationKind, NotificationOptions, Position,
};
pub use renderer::{CloseSignal, MountError, MountedView, Renderer};
