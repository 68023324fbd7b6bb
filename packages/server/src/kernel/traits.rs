// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (what to prompt for, what to send) lives in domain functions
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMailService)

use anyhow::Result;
use async_trait::async_trait;
use gemini_client::{Content, GenerationConfig};

// =============================================================================
// Mail Service Trait (Infrastructure - OTP delivery)
// =============================================================================

#[async_trait]
pub trait BaseMailService: Send + Sync {
    /// Deliver a one-time code to the recipient's mailbox
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<()>;
}

// =============================================================================
// Chat Model Trait (Infrastructure - LLM collaborator)
// =============================================================================

#[async_trait]
pub trait BaseChatModel: Send + Sync {
    /// Generate a reply for already-shaped conversation contents
    async fn generate(&self, contents: Vec<Content>, config: GenerationConfig) -> Result<String>;
}
