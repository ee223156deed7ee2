/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the persistence layer, the provider client, and the UI layer.
/// `GeneratedImage` is serialized to JSON for history storage,
/// so its field names and enum spellings are part of the on-disk
/// format and must not change casually.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visual style applied to a generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Realistic,
    Cartoon,
    Anime,
    #[serde(rename = "3D")]
    ThreeD,
}

impl Style {
    /// All selectable styles, in display order
    pub const ALL: [Style; 4] = [Style::Realistic, Style::Cartoon, Style::Anime, Style::ThreeD];

    /// Display string; also the spelling used in the enhanced prompt and on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Realistic => "Realistic",
            Style::Cartoon => "Cartoon",
            Style::Anime => "Anime",
            Style::ThreeD => "3D",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output aspect ratio for a generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Widescreen,
}

impl AspectRatio {
    /// All selectable ratios, in display order
    pub const ALL: [AspectRatio; 2] = [AspectRatio::Square, AspectRatio::Widescreen];

    /// Display string; also the spelling used in the enhanced prompt and on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Widescreen => "16:9",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The in-progress, editable prompt/style/ratio triple not yet submitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub prompt: String,
    pub style: Style,
    pub aspect_ratio: AspectRatio,
}

impl Draft {
    /// Compose the prompt actually sent to the provider.
    /// Fixed template: the style and ratio are appended as plain text.
    pub fn enhanced_prompt(&self) -> String {
        format!(
            "{} in {} style, {} aspect ratio",
            self.prompt, self.style, self.aspect_ratio
        )
    }
}

/// Immutable snapshot of a draft taken at submission time.
///
/// The async generation task works from this snapshot, so edits made
/// to the live draft while the request is in flight cannot leak into
/// the result.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub enhanced_prompt: String,
    pub style: Style,
    pub aspect_ratio: AspectRatio,
}

impl GenerationRequest {
    /// Snapshot a draft. The caller has already validated the prompt.
    pub fn from_draft(draft: &Draft) -> Self {
        let trimmed = Draft {
            prompt: draft.prompt.trim().to_string(),
            ..draft.clone()
        };
        Self {
            prompt: trimmed.prompt.clone(),
            enhanced_prompt: trimmed.enhanced_prompt(),
            style: trimmed.style,
            aspect_ratio: trimmed.aspect_ratio,
        }
    }
}

/// Represents a single completed generation
///
/// Every field is set exactly once at construction and never mutated.
/// `enhanced_prompt` is derivable from the other fields but is stored,
/// not recomputed, so display is a pure read.
/// Serialized with camelCase keys to match the persisted history format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    /// Millisecond-timestamp-derived token, monotonic enough for display ordering
    pub id: String,
    /// Raw user text, non-empty when created
    pub prompt: String,
    /// The exact prompt sent to the provider
    pub enhanced_prompt: String,
    pub style: Style,
    pub aspect_ratio: AspectRatio,
    /// `data:image/png;base64,...` URI (or a remote URL); opaque to this app
    pub image_url: String,
    /// Assigned at creation, never mutated; ISO-8601 on disk
    pub created_at: DateTime<Utc>,
}

impl GeneratedImage {
    /// Build the value object for a successful generation
    pub fn new(request: &GenerationRequest, image_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            prompt: request.prompt.clone(),
            enhanced_prompt: request.enhanced_prompt.clone(),
            style: request.style,
            aspect_ratio: request.aspect_ratio,
            image_url,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhanced_prompt_template() {
        let draft = Draft {
            prompt: "A serene mountain landscape".to_string(),
            style: Style::Anime,
            aspect_ratio: AspectRatio::Widescreen,
        };
        assert_eq!(
            draft.enhanced_prompt(),
            "A serene mountain landscape in Anime style, 16:9 aspect ratio"
        );
    }

    #[test]
    fn test_request_snapshot_trims_prompt() {
        let draft = Draft {
            prompt: "  a fox  ".to_string(),
            style: Style::ThreeD,
            aspect_ratio: AspectRatio::Square,
        };
        let request = GenerationRequest::from_draft(&draft);
        assert_eq!(request.prompt, "a fox");
        assert_eq!(request.enhanced_prompt, "a fox in 3D style, 1:1 aspect ratio");
    }

    #[test]
    fn test_image_json_format() {
        let request = GenerationRequest {
            prompt: "a fox".to_string(),
            enhanced_prompt: "a fox in 3D style, 16:9 aspect ratio".to_string(),
            style: Style::ThreeD,
            aspect_ratio: AspectRatio::Widescreen,
        };
        let image = GeneratedImage::new(&request, "data:image/png;base64,AAAA".to_string());

        let json = serde_json::to_value(&image).unwrap();
        // Field names and enum spellings are the on-disk format
        assert_eq!(json["enhancedPrompt"], "a fox in 3D style, 16:9 aspect ratio");
        assert_eq!(json["style"], "3D");
        assert_eq!(json["aspectRatio"], "16:9");
        assert_eq!(json["imageUrl"], "data:image/png;base64,AAAA");
        assert!(json["createdAt"].is_string());

        let restored: GeneratedImage = serde_json::from_value(json).unwrap();
        assert_eq!(restored, image);
    }
}
