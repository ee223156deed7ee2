use iced::widget::{column, image, row, scrollable};
use iced::{Element, Task, Theme};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod error;
mod state;
mod ui;

use api::StabilityClient;
use error::GenerateError;
use state::data::{AspectRatio, GeneratedImage, GenerationRequest, Style};
use state::history::HistoryStore;
use state::session::Session;

/// Main application state
struct ImageStudio {
    /// The generation session coordinator (draft, loading, error, history)
    session: Session,
    /// On-disk history persistence
    store: HistoryStore,
    /// Stability AI client
    client: StabilityClient,
    /// Decoded widget handle for the current image, refreshed on state
    /// changes so the view never decodes per frame
    preview: Option<image::Handle>,
    /// Decoded widget handles for the history grid, index-aligned
    thumbnails: Vec<Option<image::Handle>>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User edited the prompt field
    PromptChanged(String),
    /// User picked a style
    StyleSelected(Style),
    /// User picked an aspect ratio
    AspectRatioSelected(AspectRatio),
    /// User submitted the draft
    Generate,
    /// User asked to rerun the current image's stored parameters
    Regenerate,
    /// User cleared the current image
    ClearImage,
    /// User clicked a history card
    SelectFromHistory(usize),
    /// User cleared the whole history
    ClearHistory,
    /// The background generation request finished
    GenerationComplete(Result<GeneratedImage, GenerateError>),
}

impl ImageStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let store = HistoryStore::new();
        let history = store.load();
        info!(
            "loaded {} previous generations from {}",
            history.len(),
            store.path().display()
        );

        let client = StabilityClient::new();
        if !client.is_configured() {
            warn!("{} is not set; generation requests will fail", api::API_KEY_ENV);
        }

        let mut app = ImageStudio {
            session: Session::with_history(history),
            store,
            client,
            preview: None,
            thumbnails: Vec::new(),
        };
        app.refresh_thumbnails();

        (app, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PromptChanged(prompt) => self.session.set_prompt(prompt),
            Message::StyleSelected(style) => self.session.set_style(style),
            Message::AspectRatioSelected(ratio) => self.session.set_aspect_ratio(ratio),

            Message::Generate => {
                if let Some(request) = self.session.submit() {
                    return self.spawn_generation(request);
                }
            }

            Message::Regenerate => {
                if let Some(request) = self.session.regenerate() {
                    return self.spawn_generation(request);
                }
            }

            Message::ClearImage => {
                self.session.clear_image();
                self.preview = None;
            }

            Message::SelectFromHistory(index) => {
                self.session.select_from_history(index);
                self.refresh_preview();
            }

            Message::ClearHistory => {
                self.session.clear_history();
                self.store.clear();
                self.thumbnails.clear();
            }

            Message::GenerationComplete(result) => {
                if let Err(error) = &result {
                    warn!("generation failed: {}", error);
                }
                if self.session.complete(result) {
                    // Same transition that makes the image current also
                    // persists the updated, truncated history
                    self.store.save(self.session.history());
                    self.refresh_preview();
                    self.refresh_thumbnails();
                }
            }
        }

        Task::none()
    }

    /// Launch the single outbound generation request as a background task
    fn spawn_generation(&self, request: GenerationRequest) -> Task<Message> {
        info!("generating image for prompt: {}", request.prompt);
        let client = self.client.clone();
        Task::perform(
            async move {
                let image_url = client.generate(&request.enhanced_prompt).await?;
                Ok(GeneratedImage::new(&request, image_url))
            },
            Message::GenerationComplete,
        )
    }

    fn refresh_preview(&mut self) {
        self.preview = self.session.current().and_then(ui::image_handle);
    }

    fn refresh_thumbnails(&mut self) {
        self.thumbnails = self.session.history().iter().map(ui::image_handle).collect();
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let top = row![
            ui::controls::input_panel(&self.session, self.client.is_configured()),
            ui::preview::preview_panel(&self.session, self.preview.as_ref()),
        ]
        .spacing(20);

        let mut content = column![top].spacing(20).padding(40);

        if !self.session.history().is_empty() {
            content = content.push(ui::history::history_panel(&self.session, &self.thumbnails));
        }

        scrollable(content).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    iced::application("AI Image Studio", ImageStudio::update, ImageStudio::view)
        .theme(ImageStudio::theme)
        .centered()
        .run_with(ImageStudio::new)
}
