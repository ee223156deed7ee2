/// Generation session coordinator
///
/// Owns all mutable session state: the editable draft, the loading
/// flag, the error slot, the current image, and the bounded history.
/// Pure state machine; the application loop performs the actual
/// network call and persistence and feeds results back through
/// `complete`.
///
/// Invariants:
/// - at most one request in flight (`submit`/`regenerate` return `None`
///   while `loading` is set)
/// - a failure never clears the previously shown image; the error is
///   an overlay, not a replacement
/// - history is most-recent-first and never exceeds `MAX_HISTORY`

use crate::error::GenerateError;
use crate::state::data::{AspectRatio, Draft, GeneratedImage, GenerationRequest, Style};
use crate::state::history::MAX_HISTORY;

/// Message shown when the user submits an empty or whitespace-only prompt
const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt";

#[derive(Debug, Default)]
pub struct Session {
    draft: Draft,
    loading: bool,
    error: Option<GenerateError>,
    current: Option<GeneratedImage>,
    history: Vec<GeneratedImage>,
}

impl Session {
    /// Create a session seeded with previously persisted history
    pub fn with_history(history: Vec<GeneratedImage>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    // ---- accessors ----

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&GenerateError> {
        self.error.as_ref()
    }

    pub fn current(&self) -> Option<&GeneratedImage> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[GeneratedImage] {
        &self.history
    }

    // ---- draft edits ----

    pub fn set_prompt(&mut self, prompt: String) {
        self.draft.prompt = prompt;
    }

    pub fn set_style(&mut self, style: Style) {
        self.draft.style = style;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.draft.aspect_ratio = aspect_ratio;
    }

    // ---- transitions ----

    /// Submit the current draft.
    ///
    /// Returns the request snapshot to run, or `None` when nothing
    /// should be issued: a request is already in flight, or the prompt
    /// is empty (which sets the validation error instead).
    pub fn submit(&mut self) -> Option<GenerationRequest> {
        if self.loading {
            return None;
        }

        if self.draft.prompt.trim().is_empty() {
            self.error = Some(GenerateError::Validation(EMPTY_PROMPT_MESSAGE.to_string()));
            return None;
        }

        self.error = None;
        self.loading = true;
        Some(GenerationRequest::from_draft(&self.draft))
    }

    /// Resubmit the current image's stored parameters.
    ///
    /// The stored prompt/style/ratio overwrite the draft first, so any
    /// edits made since that image was generated are discarded. No-op
    /// without a current image.
    pub fn regenerate(&mut self) -> Option<GenerationRequest> {
        let image = self.current.as_ref()?;
        self.draft = Draft {
            prompt: image.prompt.clone(),
            style: image.style,
            aspect_ratio: image.aspect_ratio,
        };
        self.submit()
    }

    /// Record the outcome of a generation request.
    ///
    /// On success the new image becomes current and is prepended to
    /// history (truncated to `MAX_HISTORY`); returns `true` so the
    /// caller persists the updated history. On failure the error is
    /// stored and the prior current image is left untouched.
    pub fn complete(&mut self, result: Result<GeneratedImage, GenerateError>) -> bool {
        self.loading = false;
        match result {
            Ok(image) => {
                self.history.insert(0, image.clone());
                self.history.truncate(MAX_HISTORY);
                self.current = Some(image);
                true
            }
            Err(error) => {
                self.error = Some(error);
                false
            }
        }
    }

    /// Clear the current image, the draft prompt, and any error.
    /// Style/ratio selections and history are untouched.
    pub fn clear_image(&mut self) {
        self.current = None;
        self.draft.prompt.clear();
        self.error = None;
    }

    /// Make a history entry current and copy its parameters into the
    /// draft. History order is unchanged and nothing is re-generated.
    /// Out-of-range indices are ignored.
    pub fn select_from_history(&mut self, index: usize) {
        let Some(image) = self.history.get(index).cloned() else {
            return;
        };
        self.draft = Draft {
            prompt: image.prompt.clone(),
            style: image.style,
            aspect_ratio: image.aspect_ratio,
        };
        self.current = Some(image);
    }

    /// Drop all history entries. The caller also clears the store.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
