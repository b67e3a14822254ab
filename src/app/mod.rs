// SPDX-License-Identifier: MPL-2.0
//! Demo application: a control panel that fires notifications into the toast
//! layer of its own window.
//!
//! The `App` struct wires the notification subsystem to the iced runtime.
//! Notification tasks run on the tokio runtime handed in through [`Flags`];
//! the window only reads the overlay state and forwards close clicks.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::diagnostics::{
    generate_default_filename, DiagnosticEventKind, DiagnosticsCollector,
};
use crate::notifications::{
    NotificationHandle, NotificationKind, NotificationOptions, Notifier, Position,
};
use crate::ui::{toast, ToastOverlay};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;

const WINDOW_DEFAULT_WIDTH: f32 = 960.0;
const WINDOW_DEFAULT_HEIGHT: f32 = 640.0;
const MIN_WINDOW_WIDTH: f32 = 640.0;
const MIN_WINDOW_HEIGHT: f32 = 400.0;

/// Root iced application state.
pub struct App {
    notifier: Notifier,
    overlay: ToastOverlay,
    diagnostics: DiagnosticsCollector,
    /// Position used by the control panel buttons.
    position: Position,
    /// Most recent notification, for "close last".
    last: Option<NotificationHandle>,
    /// Last rejected request or export result.
    status: Option<String>,
    shown: u32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("position", &self.position)
            .field("shown", &self.shown)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot closure; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the settings file and builds the app from it.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        (Self::with_config(flags, &config, config_warning), Task::none())
    }

    /// Builds the app from already loaded settings. A settings warning is
    /// recorded in diagnostics and shown as a sticky warning toast.
    fn with_config(flags: Flags, config: &config::Config, warning: Option<String>) -> Self {
        let diagnostics = DiagnosticsCollector::new(config.diagnostics.buffer_capacity);
        let defaults = config.notification_defaults().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid notification defaults, using built-ins");
            Default::default()
        });

        let overlay = ToastOverlay::new();
        let notifier = Notifier::new(
            flags.runtime,
            Arc::new(overlay.clone()),
            Arc::new(overlay.clone()),
        )
        .with_defaults(defaults)
        .with_diagnostics(diagnostics.handle());

        let mut app = Self {
            notifier,
            overlay,
            diagnostics,
            position: flags.position.unwrap_or(defaults.position),
            last: None,
            status: None,
            shown: 0,
        };

        if let Some(warning) = warning {
            app.diagnostics.log(DiagnosticEventKind::ConfigWarning {
                message: warning.clone(),
            });
            app.show(
                warning,
                NotificationOptions::new()
                    .kind(NotificationKind::Warning)
                    .duration_secs(0.0),
            );
        }
        app
    }

    fn title(&self) -> String {
        match self.overlay.snapshot().len() {
            0 => "Toastline".to_string(),
            n => format!("Toastline ({n})"),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_tick_subscription(self.overlay.has_hosts()),
            subscription::create_diagnostics_subscription(),
        ])
    }

    /// Shows `message` at the selected position, recording the handle or
    /// the rejection.
    fn show(&mut self, message: String, options: NotificationOptions) {
        match self.notifier.notify(message, options.position(self.position)) {
            Ok(handle) => {
                self.shown += 1;
                self.last = Some(handle);
                self.status = None;
            }
            Err(err) => {
                tracing::info!(error = %err, "notification rejected");
                self.status = Some(err.to_string());
            }
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Show(kind) => {
                let text = format!("{kind} notification #{}", self.shown + 1);
                self.show(text, NotificationOptions::new().kind(kind));
            }
            Message::ShowSticky => {
                self.show(
                    "Stays until closed".to_string(),
                    NotificationOptions::new().duration_secs(0.0),
                );
            }
            Message::ShowInvalid => {
                self.show(
                    "never shown".to_string(),
                    NotificationOptions::new().duration_secs(-1.0),
                );
            }
            Message::CloseLast => {
                if let Some(handle) = self.last.take() {
                    handle.close();
                }
            }
            Message::SelectPosition(position) => {
                self.position = position;
            }
            Message::ExportDiagnostics => {
                self.diagnostics.process_pending();
                let directory = dirs::document_dir()
                    .or_else(|| std::env::current_dir().ok())
                    .unwrap_or_default();
                match self
                    .diagnostics
                    .export_to_file(directory.join(generate_default_filename()))
                {
                    Ok(path) => self.show(
                        format!("Diagnostics saved to {}", path.display()),
                        NotificationOptions::new().kind(NotificationKind::Success),
                    ),
                    Err(err) => self.show(
                        format!("Diagnostics export failed: {err}"),
                        NotificationOptions::new().kind(NotificationKind::Error),
                    ),
                }
            }
            Message::Toast(toast::Message::Dismiss(id)) => {
                self.overlay.dismiss(id);
            }
            Message::Tick(_) | Message::RefreshDiagnostics => {
                self.diagnostics.process_pending();
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let toasts = self.overlay.snapshot();
        view::view(view::ViewContext {
            position: self.position,
            status: self.status.as_deref(),
            has_last: self.last.is_some(),
            diagnostics_len: self.diagnostics.len(),
            toasts: &toasts,
        })
    }
}
