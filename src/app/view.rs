// SPDX-License-Identifier: MPL-2.0
//! View rendering for the demo application.
//!
//! The control panel fills the window; the toast layer is stacked above it.

use super::Message;
use crate::notifications::{NotificationKind, Position};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::toast;
use crate::ui::ToastSnapshot;
use iced::widget::{button, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub position: Position,
    pub status: Option<&'a str>,
    pub has_last: bool,
    pub diagnostics_len: usize,
    pub toasts: &'a [ToastSnapshot],
}

/// Builds an element that owns everything it shows, so the caller can
/// drop the context right away.
pub fn view<'a>(ctx: ViewContext<'_>) -> Element<'a, Message> {
    let layer = toast::view_overlay(ctx.toasts).map(Message::Toast);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(controls(&ctx))
        .push(layer)
        .into()
}

fn controls<'a>(ctx: &ViewContext<'_>) -> Element<'a, Message> {
    let positions = Position::ALL.into_iter().fold(
        Row::new().spacing(spacing::XS),
        |row, position| {
            let label = if position == ctx.position {
                format!("[{position}]")
            } else {
                position.to_string()
            };
            row.push(action(label, Some(Message::SelectPosition(position))))
        },
    );

    let kinds = NotificationKind::ALL.into_iter().fold(
        Row::new().spacing(spacing::XS),
        |row, kind| row.push(action(kind.to_string(), Some(Message::Show(kind)))),
    );

    let actions = Row::new()
        .spacing(spacing::XS)
        .push(action("sticky".to_string(), Some(Message::ShowSticky)))
        .push(action(
            "close last".to_string(),
            ctx.has_last.then_some(Message::CloseLast),
        ))
        .push(action("invalid duration".to_string(), Some(Message::ShowInvalid)))
        .push(action(
            "export diagnostics".to_string(),
            Some(Message::ExportDiagnostics),
        ));

    let mut column = Column::new()
        .spacing(spacing::MD)
        .push(Text::new("Toastline").size(typography::TITLE_MD))
        .push(caption("Position"))
        .push(positions)
        .push(caption("Show"))
        .push(kinds)
        .push(actions)
        .push(caption(&format!(
            "{} diagnostic event(s) recorded",
            ctx.diagnostics_len
        )));

    if let Some(status) = ctx.status {
        column = column.push(Text::new(status.to_string()).size(typography::BODY));
    }

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::LG)
        .into()
}

fn action<'a>(label: String, on_press: Option<Message>) -> Element<'a, Message> {
    button(Text::new(label).size(typography::BODY))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .on_press_maybe(on_press)
        .into()
}

fn caption<'a>(label: &str) -> Element<'a, Message> {
    Text::new(label.to_string())
        .size(typography::CAPTION)
        .into()
}
