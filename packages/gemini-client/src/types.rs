//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Content Generation
// =============================================================================

/// Content generation request.
///
/// The model name is part of the request URL, not the JSON body, so it is
/// skipped during serialization.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model to use (e.g., "gemini-pro")
    #[serde(skip)]
    pub model: String,

    /// Conversation contents, oldest first
    pub contents: Vec<Content>,

    /// Generation parameters
    #[serde(
        rename = "generationConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Create a new request for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: Vec::new(),
            generation_config: None,
        }
    }

    /// Append one content entry to the conversation.
    pub fn content(mut self, content: Content) -> Self {
        self.contents.push(content);
        self
    }

    /// Replace the conversation contents.
    pub fn contents(mut self, contents: Vec<Content>) -> Self {
        self.contents = contents;
        self
    }

    /// Set generation parameters.
    pub fn generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// One conversation entry.
///
/// Gemini distinguishes the human party ("user") from the model party
/// ("model"); there is no separate system role in the v1beta chat surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Role: "user" or "model"
    pub role: String,

    /// Content parts (text-only here)
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user-role entry with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Create a model-role entry with a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// One piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Generation parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Maximum tokens in the generated reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Top-k sampling cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl GenerationConfig {
    /// Set maximum output tokens.
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set nucleus sampling threshold.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set top-k cutoff.
    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

/// Content generation response.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Reply text from the first candidate
    pub text: String,

    /// Token usage statistics
    pub usage: Option<UsageMetadata>,
}

/// Raw generation response from the API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponseRaw {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt
    pub prompt_token_count: Option<u32>,

    /// Tokens across generated candidates
    pub candidates_token_count: Option<u32>,

    /// Total tokens used
    pub total_token_count: Option<u32>,
}
