// SPDX-License-Identifier: MPL-2.0
//! User interface for notifications.
//!
//! - [`overlay`] - the toast layer, implementing the overlay surface and
//!   renderer ports on top of shared state
//! - [`toast`] - iced widgets that draw the layer
//! - [`design_tokens`] - colors, spacing and sizing constants

pub mod design_tokens;
pub mod overlay;
pub mod toast;

pub use overlay::{ToastOverlay, ToastSnapshot};
