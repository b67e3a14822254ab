// SPDX-License-Identifier: MPL-2.0
//! Notification options and the resolver that turns them into a config.
//!
//! Callers hand in a message plus a partial [`NotificationOptions`]; the
//! resolver merges it field by field onto a [`NotificationDefaults`] record
//! and produces a fully populated, immutable [`NotificationConfig`].

use crate::config::{DEFAULT_NOTIFICATION_DURATION_SECS, MAX_NOTIFICATION_DURATION_SECS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Errors raised when an option value violates its type or range constraint.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Duration below zero.
    #[error("notification duration must not be negative (got {0}s)")]
    NegativeDuration(f64),
    /// Duration is NaN or infinite.
    #[error("notification duration must be a finite number")]
    NonFiniteDuration,
    /// Duration above [`MAX_NOTIFICATION_DURATION_SECS`].
    #[error("notification duration is too large (got {0}s)")]
    DurationOutOfRange(f64),
    /// Position name that does not match any [`Position`].
    #[error("unknown notification position `{0}`")]
    UnknownPosition(String),
}

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// All kinds, in display order.
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::Info,
        NotificationKind::Success,
        NotificationKind::Warning,
        NotificationKind::Error,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen anchor a notification stacks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
    TopCenter,
    BottomCenter,
}

impl Position {
    /// All positions, top row first.
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopRight => "top-right",
            Position::TopLeft => "top-left",
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
            Position::TopCenter => "top-center",
            Position::BottomCenter => "bottom-center",
        }
    }

    /// Returns true for the three positions anchored to the top edge.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopCenter | Position::TopRight
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Position::ALL
            .into_iter()
            .find(|position| position.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownPosition(s.to_string()))
    }
}

/// How long a notification stays visible before it dismisses itself.
///
/// A zero duration means the notification never auto-dismisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DisplayDuration(Duration);

impl DisplayDuration {
    /// Never auto-dismiss.
    pub const NEVER: DisplayDuration = DisplayDuration(Duration::ZERO);

    /// Validates a duration given in (possibly fractional) seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for negative, non-finite or absurdly large values.
    pub fn from_secs_f64(secs: f64) -> Result<Self, ConfigError> {
        if !secs.is_finite() {
            return Err(ConfigError::NonFiniteDuration);
        }
        if secs < 0.0 {
            return Err(ConfigError::NegativeDuration(secs));
        }
        if secs > MAX_NOTIFICATION_DURATION_SECS {
            return Err(ConfigError::DurationOutOfRange(secs));
        }
        Duration::try_from_secs_f64(secs)
            .map(Self)
            .map_err(|_| ConfigError::DurationOutOfRange(secs))
    }

    /// Returns the timer duration, or `None` when auto-dismiss is disabled.
    #[must_use]
    pub fn auto_dismiss(self) -> Option<Duration> {
        (!self.0.is_zero()).then_some(self.0)
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }

    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        Self(Duration::from_secs_f64(DEFAULT_NOTIFICATION_DURATION_SECS))
    }
}

/// Partial overrides for a notification. Every field is optional.
///
/// Deserializes from the same shape as the `[notifications]` settings
/// section; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationOptions {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<NotificationKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_icon: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_close: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_progress: Option<bool>,
}

impl NotificationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the display duration in seconds; `0.0` disables auto-dismiss.
    #[must_use]
    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn show_icon(mut self, show: bool) -> Self {
        self.show_icon = Some(show);
        self
    }

    #[must_use]
    pub fn show_close(mut self, show: bool) -> Self {
        self.show_close = Some(show);
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = Some(show);
        self
    }
}

/// Fully populated defaults every resolved config starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotificationDefaults {
    pub kind: NotificationKind,
    pub duration: DisplayDuration,
    pub position: Position,
    pub show_icon: bool,
    pub show_close: bool,
    pub show_progress: bool,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            kind: NotificationKind::Info,
            duration: DisplayDuration::default(),
            position: Position::TopRight,
            show_icon: true,
            show_close: true,
            show_progress: true,
        }
    }
}

impl NotificationDefaults {
    /// Overlays `options` onto these defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is out of range.
    pub fn merged(&self, options: &NotificationOptions) -> Result<Self, ConfigError> {
        let duration = match options.duration_secs {
            Some(secs) => DisplayDuration::from_secs_f64(secs)?,
            None => self.duration,
        };

        Ok(Self {
            kind: options.kind.unwrap_or(self.kind),
            duration,
            position: options.position.unwrap_or(self.position),
            show_icon: options.show_icon.unwrap_or(self.show_icon),
            show_close: options.show_close.unwrap_or(self.show_close),
            show_progress: options.show_progress.unwrap_or(self.show_progress),
        })
    }
}

/// Resolved, immutable configuration for one notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationConfig {
    message: String,
    settings: NotificationDefaults,
}

impl NotificationConfig {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        self.settings.kind
    }

    #[must_use]
    pub fn duration(&self) -> DisplayDuration {
        self.settings.duration
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.settings.position
    }

    #[must_use]
    pub fn show_icon(&self) -> bool {
        self.settings.show_icon
    }

    #[must_use]
    pub fn show_close(&self) -> bool {
        self.settings.show_close
    }

    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.settings.show_progress
    }
}

/// Resolves `options` against the built-in defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] when an override is out of range.
pub fn resolve(
    message: impl Into<String>,
    options: &NotificationOptions,
) -> Result<NotificationConfig, ConfigError> {
    resolve_with(&NotificationDefaults::default(), message, options)
}

/// Resolves `options` against caller-supplied defaults.
///
/// An empty message is accepted and renders as an empty body.
///
/// # Errors
///
/// Returns [`ConfigError`] when an override is out of range.
pub fn resolve_with(
    defaults: &NotificationDefaults,
    message: impl Into<String>,
    options: &NotificationOptions,
) -> Result<NotificationConfig, ConfigError> {
    let settings = defaults.merged(options)?;
    let message = message.into();
    if message.is_empty() {
        tracing::debug!(kind = %settings.kind, "resolving notification with an empty message");
    }

    Ok(NotificationConfig { message, settings })
}
