/// Presentation layer
///
/// Stateless view functions that render coordinator state and emit
/// application messages. No module here mutates anything.

use base64::Engine;
use iced::widget::image;
use iced::Color;

use crate::state::data::GeneratedImage;

pub mod controls;
pub mod history;
pub mod preview;

pub(crate) const ERROR_COLOR: Color = Color {
    r: 0.91,
    g: 0.36,
    b: 0.36,
    a: 1.0,
};

pub(crate) const WARNING_COLOR: Color = Color {
    r: 0.93,
    g: 0.76,
    b: 0.31,
    a: 1.0,
};

/// Decode a generation's embedded data URI into renderable bytes.
///
/// Returns `None` for remote URLs or undecodable payloads; callers
/// render a text fallback in that case. Decoding happens once per
/// state change, not per frame, so the widget handle can be cached.
pub fn image_handle(generated: &GeneratedImage) -> Option<image::Handle> {
    let (_, payload) = generated.image_url.split_once("base64,")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    Some(image::Handle::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Draft, GenerationRequest};

    fn image_with_url(url: &str) -> GeneratedImage {
        let request = GenerationRequest::from_draft(&Draft {
            prompt: "a fox".to_string(),
            ..Draft::default()
        });
        GeneratedImage::new(&request, url.to_string())
    }

    #[test]
    fn test_data_uri_decodes() {
        let generated = image_with_url("data:image/png;base64,aGVsbG8=");
        assert!(image_handle(&generated).is_some());
    }

    #[test]
    fn test_remote_url_has_no_handle() {
        let generated = image_with_url("https://example.com/image.png");
        assert!(image_handle(&generated).is_none());
    }

    #[test]
    fn test_invalid_payload_has_no_handle() {
        let generated = image_with_url("data:image/png;base64,@@not-base64@@");
        assert!(image_handle(&generated).is_none());
    }
}
