// SPDX-License-Identifier: MPL-2.0
//! `toastline` shows transient toast notifications.
//!
//! Callers fire a notification through [`notifications::Notifier`] and
//! forget about it: it appears on the next scheduling tick, dismisses itself
//! after its duration (or when closed), plays its exit animation, and cleans
//! up after itself. The rendering side is a pair of small traits, so the
//! same lifecycle drives the iced toast layer in [`ui`] and the in-memory
//! [`notifications::HeadlessRenderer`].

pub mod app;
pub mod diagnostics;
pub mod error;
pub mod notifications;
pub mod ui;

pub use app::config;

#[cfg(test)]
mod test_utils;
