//! Stability AI integration
//!
//! Wraps the single text-to-image call this app makes: one POST per
//! invocation, no retries, no caching. Generation parameters
//! (resolution, step count, guidance scale) are policy constants, not
//! user-configurable. Provider failures are classified into tagged
//! error kinds with rewritten user-facing messages.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GenerateError, ProviderErrorKind};

/// Environment variable holding the bearer credential
pub const API_KEY_ENV: &str = "STABILITY_API_KEY";
/// Optional base-URL override (points the client at a stub in tests)
const API_URL_ENV: &str = "STABILITY_API_URL";

const DEFAULT_BASE_URL: &str = "https://api.stability.ai";
const ENGINE_PATH: &str = "/v1/generation/stable-diffusion-xl-1024-v1-0/text-to-image";

// Fixed generation policy
const CFG_SCALE: u32 = 7;
const WIDTH: u32 = 1024;
const HEIGHT: u32 = 1024;
const STEPS: u32 = 30;
const SAMPLES: u32 = 1;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const MISSING_KEY_MESSAGE: &str =
    "Stability API key not configured. Set STABILITY_API_KEY and restart.";
const CREDITS_MESSAGE: &str =
    "Insufficient Stability AI credits. Please add credits at: https://dreamstudio.ai/account/credits";
const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again in a moment.";
const INVALID_KEY_MESSAGE: &str = "Invalid API key. Please check your STABILITY_API_KEY.";
const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from Stability AI API";

/// Weighted prompt fragment as the API expects it
#[derive(Debug, Serialize)]
struct TextPrompt {
    text: String,
    weight: f32,
}

/// Text-to-image request body
#[derive(Debug, Serialize)]
struct TextToImageRequest {
    text_prompts: Vec<TextPrompt>,
    cfg_scale: u32,
    height: u32,
    width: u32,
    steps: u32,
    samples: u32,
}

impl TextToImageRequest {
    fn new(prompt: &str) -> Self {
        Self {
            text_prompts: vec![TextPrompt {
                text: prompt.to_string(),
                weight: 1.0,
            }],
            cfg_scale: CFG_SCALE,
            height: HEIGHT,
            width: WIDTH,
            steps: STEPS,
            samples: SAMPLES,
        }
    }
}

/// Text-to-image success body
#[derive(Debug, Deserialize)]
struct TextToImageResponse {
    #[serde(default)]
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(default)]
    base64: String,
}

/// Structured failure body the API returns on non-success statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

/// Stability AI client
#[derive(Debug, Clone)]
pub struct StabilityClient {
    /// HTTP client
    client: Client,
    /// API key; `None` means unconfigured
    api_key: Option<String>,
    /// API base URL
    base_url: String,
}

impl StabilityClient {
    /// Create a client from the environment
    pub fn new() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::build(api_key, base_url)
    }

    /// Create a client with an explicit credential (used by tests)
    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self::build(api_key, DEFAULT_BASE_URL.to_string())
    }

    fn build(api_key: Option<String>, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key,
            base_url,
        }
    }

    /// Check if an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate one image for the given (already enhanced) prompt.
    ///
    /// Returns a `data:image/png;base64,...` URI on success. Exactly
    /// one outbound request; a missing credential fails before any
    /// network activity.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| GenerateError::Config(MISSING_KEY_MESSAGE.to_string()))?;

        let request = TextToImageRequest::new(prompt);
        debug!("Sending text-to-image request to Stability API");

        let response = self
            .client
            .post(format!("{}{}", self.base_url, ENGINE_PATH))
            .header("Accept", "application/json")
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerateError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Stability API error: {} - {}", status, body);
            return Err(classify_provider_error(status, &body));
        }

        let parsed: TextToImageResponse = response
            .json()
            .await
            .map_err(|_| GenerateError::Protocol(INVALID_RESPONSE_MESSAGE.to_string()))?;

        first_artifact_data_uri(parsed)
    }
}

impl Default for StabilityClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the first artifact and wrap it as a displayable data URI
fn first_artifact_data_uri(response: TextToImageResponse) -> Result<String, GenerateError> {
    response
        .artifacts
        .into_iter()
        .find(|a| !a.base64.is_empty())
        .map(|a| format!("data:image/png;base64,{}", a.base64))
        .ok_or_else(|| GenerateError::Protocol(INVALID_RESPONSE_MESSAGE.to_string()))
}

/// Map a non-success status + body to a tagged provider error.
///
/// Recognized failure names get a rewritten, specific message; anything
/// else passes the provider's message through verbatim, falling back to
/// a status-derived message when the body is unparseable.
fn classify_provider_error(status: StatusCode, body: &str) -> GenerateError {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).unwrap_or_else(|_| ApiErrorBody {
        name: String::new(),
        message: String::new(),
    });

    let tagged = |needle: &str| parsed.name.contains(needle) || parsed.message.contains(needle);

    let (kind, message) = if tagged("insufficient_balance") {
        (ProviderErrorKind::InsufficientCredits, CREDITS_MESSAGE.to_string())
    } else if tagged("rate_limit") {
        (ProviderErrorKind::RateLimited, RATE_LIMIT_MESSAGE.to_string())
    } else if tagged("invalid_api_key") {
        (ProviderErrorKind::InvalidCredential, INVALID_KEY_MESSAGE.to_string())
    } else if !parsed.message.is_empty() {
        (ProviderErrorKind::Other, parsed.message)
    } else {
        (ProviderErrorKind::Other, format!("HTTP error {}", status))
    };

    GenerateError::Provider { kind, message }
}
