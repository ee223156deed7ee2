/// History grid: one selectable card per past generation
///
/// Cards are laid out with `iced_aw`'s Wrap so the grid reflows with
/// the window. Selecting a card emits the entry's index; the session
/// decides what that means.

use iced::widget::{button, column, image, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::session::Session;
use crate::Message;

const THUMBNAIL_WIDTH: f32 = 140.0;
const SNIPPET_LEN: usize = 40;

pub fn history_panel<'a>(
    session: &'a Session,
    thumbnails: &'a [Option<image::Handle>],
) -> Element<'a, Message> {
    let header = row![
        text("Generation History").size(20).width(Length::Fill),
        text(format!("Last {} images", session.history().len())).size(14),
        button("Clear History")
            .on_press(Message::ClearHistory)
            .padding(6),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let cards: Vec<Element<Message>> = session
        .history()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let thumb: Element<Message> = match thumbnails.get(index).and_then(|t| t.as_ref()) {
                Some(handle) => image(handle.clone())
                    .width(Length::Fixed(THUMBNAIL_WIDTH))
                    .into(),
                None => text("(no preview)").size(12).into(),
            };

            button(
                column![thumb, text(snippet(&entry.prompt)).size(12)]
                    .spacing(6)
                    .width(Length::Fixed(THUMBNAIL_WIDTH)),
            )
            .on_press(Message::SelectFromHistory(index))
            .padding(6)
            .into()
        })
        .collect();

    column![
        header,
        Wrap::with_elements(cards).spacing(10.0).line_spacing(10.0)
    ]
    .spacing(12)
    .into()
}

/// Shorten a prompt for the card caption
fn snippet(prompt: &str) -> String {
    if prompt.chars().count() <= SNIPPET_LEN {
        prompt.to_string()
    } else {
        let cut: String = prompt.chars().take(SNIPPET_LEN).collect();
        format!("{}...", cut.trim_end())
    }
}
