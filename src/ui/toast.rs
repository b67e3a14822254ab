// SPDX-License-Identifier: MPL-2.0
//! Toast widgets.
//!
//! Toasts are small cards with a kind-colored accent border, an optional
//! glyph, the message, an optional close button and an optional bar showing
//! the display time left. They are grouped in six stacks, one per
//! [`Position`], each listing its toasts in creation order.

use super::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use super::overlay::ToastSnapshot;
use crate::notifications::{HostId, NotificationKind, Position};
use iced::widget::{button, container, progress_bar, text, Column, Container, Row, Stack, Text};
use iced::{alignment, Background, Color, Element, Length, Theme};

/// Messages emitted by the toast layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The close button of a toast was pressed.
    Dismiss(HostId),
}

/// Accent color for a notification kind.
#[must_use]
pub fn accent_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Info => palette::INFO_500,
        NotificationKind::Success => palette::SUCCESS_500,
        NotificationKind::Warning => palette::WARNING_500,
        NotificationKind::Error => palette::ERROR_500,
    }
}

fn kind_glyph(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "ℹ",
        NotificationKind::Success => "✔",
        NotificationKind::Warning => "⚠",
        NotificationKind::Error => "✖",
    }
}

fn horizontal_anchor(position: Position) -> alignment::Horizontal {
    match position {
        Position::TopLeft | Position::BottomLeft => alignment::Horizontal::Left,
        Position::TopCenter | Position::BottomCenter => alignment::Horizontal::Center,
        Position::TopRight | Position::BottomRight => alignment::Horizontal::Right,
    }
}

/// Renders a single toast.
pub fn view<'a>(toast: &ToastSnapshot) -> Element<'a, Message> {
    let accent = accent_color(toast.kind);
    let alpha = if toast.closing {
        opacity::CLOSING
    } else {
        opacity::OPAQUE
    };

    let mut content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);

    if toast.show_icon {
        content = content.push(
            Text::new(kind_glyph(toast.kind))
                .size(sizing::ICON_MD)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(Color { a: alpha, ..accent }),
                }),
        );
    }

    content = content.push(
        Container::new(
            Text::new(toast.message.clone())
                .size(typography::BODY)
                .style(move |theme: &Theme| text::Style {
                    color: Some(Color {
                        a: alpha,
                        ..theme.palette().text
                    }),
                }),
        )
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Left),
    );

    if toast.show_close {
        let close = button(Text::new("×").size(sizing::ICON_SM))
            .padding(spacing::XXS)
            .style(dismiss_button_style);
        // A closing toast no longer reacts to clicks.
        let close = if toast.closing {
            close
        } else {
            close.on_press(Message::Dismiss(toast.id))
        };
        content = content.push(close);
    }

    let mut card = Column::new().spacing(spacing::XS).push(content);
    if let Some(remaining) = toast.remaining {
        card = card.push(
            progress_bar(0.0..=1.0, remaining)
                .girth(sizing::PROGRESS_HEIGHT)
                .style(move |theme: &Theme| progress_bar_style(theme, accent)),
        );
    }

    Container::new(card)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_container_style(theme, accent, alpha))
        .into()
}

/// Toasts grouped by position, each group in creation order.
fn stacks(toasts: &[ToastSnapshot]) -> Vec<(Position, Vec<&ToastSnapshot>)> {
    Position::ALL
        .into_iter()
        .map(|position| {
            let group = toasts
                .iter()
                .filter(|toast| toast.position == position)
                .collect();
            (position, group)
        })
        .collect()
}

/// Renders the whole toast layer. Empty areas are transparent and do not
/// capture the pointer, so the layer can sit above the application content.
pub fn view_overlay<'a>(toasts: &[ToastSnapshot]) -> Element<'a, Message> {
    let mut top = Row::new().spacing(spacing::MD);
    let mut bottom = Row::new().spacing(spacing::MD);

    for (position, group) in stacks(toasts) {
        let anchor = horizontal_anchor(position);
        let column = Column::with_children(group.into_iter().map(view))
            .spacing(spacing::XS)
            .align_x(anchor);
        let cell = Container::new(column).width(Length::Fill).align_x(anchor);

        if position.is_top() {
            top = top.push(cell);
        } else {
            bottom = bottom.push(cell);
        }
    }

    let edge = |row: Row<'a, Message>, vertical: alignment::Vertical| {
        Container::new(row)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_y(vertical)
            .padding(spacing::MD)
    };

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(edge(top, alignment::Vertical::Top))
        .push(edge(bottom, alignment::Vertical::Bottom))
        .into()
}

fn toast_container_style(theme: &Theme, accent: Color, alpha: f32) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(Background::Color(Color { a: alpha, ..bg_color })),
        border: iced::Border {
            color: Color { a: alpha, ..accent },
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: if alpha < opacity::OPAQUE {
            shadow::NONE
        } else {
            shadow::MD
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn progress_bar_style(theme: &Theme, accent: Color) -> progress_bar::Style {
    progress_bar::Style {
        background: Background::Color(theme.extended_palette().background.weak.color),
        bar: Background::Color(accent),
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover = |alpha: f32| button::Style {
        background: Some(Background::Color(Color {
            a: alpha,
            ..palette::GRAY_400
        })),
        text_color: base.text,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    };

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered => hover(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => hover(opacity::OVERLAY_MEDIUM),
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Host;

    fn snapshot(position: Position) -> ToastSnapshot {
        ToastSnapshot {
            id: Host::allocate().id(),
            kind: NotificationKind::Info,
            position,
            message: "hello".to_string(),
            show_icon: true,
            show_close: true,
            remaining: Some(0.5),
            closing: false,
        }
    }

    #[test]
    fn each_kind_has_its_own_accent() {
        let colors: Vec<Color> = NotificationKind::ALL.into_iter().map(accent_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn toast_container_style_uses_accent_color() {
        let accent = palette::SUCCESS_500;
        let style = toast_container_style(&Theme::Dark, accent, opacity::OPAQUE);

        assert_eq!(style.border.color, accent);
        assert_eq!(style.shadow, shadow::MD);
        assert!(style.background.is_some());
    }

    #[test]
    fn closing_toast_is_faded() {
        let style = toast_container_style(&Theme::Light, palette::ERROR_500, opacity::CLOSING);

        assert_eq!(style.border.color.a, opacity::CLOSING);
        assert_eq!(style.shadow, shadow::NONE);
    }

    #[test]
    fn stacks_group_by_position_in_creation_order() {
        let first = snapshot(Position::BottomLeft);
        let second = snapshot(Position::TopRight);
        let third = snapshot(Position::BottomLeft);
        let toasts = vec![first.clone(), second.clone(), third.clone()];

        let grouped = stacks(&toasts);

        assert_eq!(grouped.len(), Position::ALL.len());
        let bottom_left = &grouped
            .iter()
            .find(|(position, _)| *position == Position::BottomLeft)
            .unwrap()
            .1;
        let ids: Vec<_> = bottom_left.iter().map(|toast| toast.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[test]
    fn anchors_follow_position_column() {
        assert_eq!(
            horizontal_anchor(Position::TopLeft),
            alignment::Horizontal::Left
        );
        assert_eq!(
            horizontal_anchor(Position::BottomCenter),
            alignment::Horizontal::Center
        );
        assert_eq!(
            horizontal_anchor(Position::BottomRight),
            alignment::Horizontal::Right
        );
    }

    #[test]
    fn view_overlay_builds_for_every_position() {
        let toasts: Vec<_> = Position::ALL.into_iter().map(snapshot).collect();
        let _element: Element<'_, Message> = view_overlay(&toasts);
        let _empty: Element<'_, Message> = view_overlay(&[]);
    }
}
