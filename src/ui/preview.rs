/// Preview panel for the current image
///
/// Shows a loading placeholder while a request is in flight, otherwise
/// the current image with its parameters and the regenerate/clear
/// actions, or an empty-state hint when nothing has been generated.

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Element, Length};

use crate::state::session::Session;
use crate::Message;

pub fn preview_panel<'a>(
    session: &'a Session,
    handle: Option<&'a image::Handle>,
) -> Element<'a, Message> {
    let content: Element<Message> = if session.loading() {
        text("Generating...").size(20).into()
    } else if let Some(current) = session.current() {
        let rendered: Element<Message> = match handle {
            Some(handle) => image(handle.clone()).width(Length::Fill).into(),
            // Remote URLs carry no embedded payload to decode
            None => text("Preview unavailable for remotely stored images")
                .size(14)
                .into(),
        };

        column![
            rendered,
            text(&current.prompt).size(16),
            text(format!(
                "{} | {} | {}",
                current.style,
                current.aspect_ratio,
                current.created_at.format("%Y-%m-%d %H:%M")
            ))
            .size(13),
            row![
                button("Regenerate").on_press(Message::Regenerate).padding(8),
                button("Clear").on_press(Message::ClearImage).padding(8),
            ]
            .spacing(10),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
    } else {
        column![
            text("No image generated yet").size(18),
            text("Enter a prompt and press Generate to create your first image").size(14),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into()
    };

    container(content)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(20)
        .into()
}
