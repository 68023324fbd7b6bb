//! Server dependencies for route handlers (using traits for testability)
//!
//! This module provides the central dependency container shared by all
//! handlers. Collaborators are constructed once at startup and injected;
//! there are no load-time globals.

use anyhow::Result;
use async_trait::async_trait;
use gemini_client::{Content, GeminiClient, GenerateRequest, GenerationConfig};
use std::sync::Arc;

use crate::domains::auth::store::OtpStore;
use crate::domains::chat::GEMINI_MODEL;
use crate::kernel::{BaseChatModel, BaseMailService};

// =============================================================================
// GeminiClient Adapter (implements BaseChatModel trait)
// =============================================================================

/// Wrapper around GeminiClient that implements the BaseChatModel trait
pub struct GeminiAdapter {
    client: GeminiClient,
}

impl GeminiAdapter {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseChatModel for GeminiAdapter {
    async fn generate(&self, contents: Vec<Content>, config: GenerationConfig) -> Result<String> {
        let request = GenerateRequest::new(GEMINI_MODEL)
            .contents(contents)
            .generation_config(config);

        let response = self
            .client
            .generate_content(request)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(response.text)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to route handlers
#[derive(Clone)]
pub struct ServerDeps {
    pub otp_store: Arc<dyn OtpStore>,
    pub mailer: Arc<dyn BaseMailService>,
    /// LLM collaborator; None when the Gemini credential is not configured,
    /// which /chat reports as a server configuration error
    pub chat_model: Option<Arc<dyn BaseChatModel>>,
}

impl ServerDeps {
    pub fn new(
        otp_store: Arc<dyn OtpStore>,
        mailer: Arc<dyn BaseMailService>,
        chat_model: Option<Arc<dyn BaseChatModel>>,
    ) -> Self {
        Self {
            otp_store,
            mailer,
            chat_model,
        }
    }
}
