/// Input panel: prompt, style and ratio selectors, generate button
///
/// Everything is driven by the session; while a request is in flight
/// the inputs stop emitting messages, which is the UI half of the
/// "one request at a time" guard.

use iced::widget::{button, column, pick_list, text, text_input};
use iced::{Element, Length};

use crate::state::data::{AspectRatio, Style};
use crate::state::session::Session;
use crate::ui::{ERROR_COLOR, WARNING_COLOR};
use crate::Message;

const PANEL_WIDTH: f32 = 320.0;

pub fn input_panel(session: &Session, configured: bool) -> Element<'_, Message> {
    let loading = session.loading();
    let draft = session.draft();

    let prompt_input = text_input(
        "Describe the image you want to generate...",
        &draft.prompt,
    )
    .on_input_maybe((!loading).then_some(Message::PromptChanged))
    .on_submit(Message::Generate)
    .padding(10);

    let style_picker =
        pick_list(Style::ALL, Some(draft.style), Message::StyleSelected).width(Length::Fill);

    let ratio_picker = pick_list(
        AspectRatio::ALL,
        Some(draft.aspect_ratio),
        Message::AspectRatioSelected,
    )
    .width(Length::Fill);

    let can_generate = !loading && !draft.prompt.trim().is_empty();
    let generate = button(text(if loading {
        "Generating..."
    } else {
        "Generate Image"
    }))
    .on_press_maybe(can_generate.then_some(Message::Generate))
    .padding(10)
    .width(Length::Fill);

    let mut panel = column![
        text("Generate Image").size(24),
        text("Image Description").size(14),
        prompt_input,
        text("Style").size(14),
        style_picker,
        text("Aspect Ratio").size(14),
        ratio_picker,
        generate,
    ]
    .spacing(12)
    .width(Length::Fixed(PANEL_WIDTH));

    if !configured {
        panel = panel.push(
            text("STABILITY_API_KEY is not set. Generation will fail until it is configured.")
                .size(14)
                .color(WARNING_COLOR),
        );
    }

    if let Some(error) = session.error() {
        panel = panel.push(text(error.to_string()).size(14).color(ERROR_COLOR));
    }

    panel.into()
}
