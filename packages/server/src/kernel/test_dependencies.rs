// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use gemini_client::{Content, GenerationConfig};
use std::sync::{Arc, Mutex};

use super::{BaseChatModel, BaseMailService, ServerDeps};
use crate::domains::auth::store::InMemoryOtpStore;

// =============================================================================
// Mock Mail Service
// =============================================================================

/// Arguments captured from a delivery call
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub code: String,
}

pub struct MockMailService {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail: bool,
}

impl MockMailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Make every delivery call fail after recording it
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Get all delivery calls with their arguments
    pub fn sent_calls(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Check if a delivery was attempted for an address
    pub fn was_sent_to(&self, to: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|e| e.to == to)
    }

    /// Code from the most recent delivery call
    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|e| e.code.clone())
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailService for MockMailService {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<()> {
        // Record the call
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            code: code.to_string(),
        });

        if self.fail {
            anyhow::bail!("mock delivery failure");
        }
        Ok(())
    }
}

// =============================================================================
// Mock Chat Model
// =============================================================================

/// Arguments captured from a generate call
#[derive(Debug, Clone)]
pub struct GenerateCallArgs {
    pub contents: Vec<Content>,
    pub config: GenerationConfig,
}

pub struct MockChatModel {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<GenerateCallArgs>>>,
    fail: bool,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Queue a reply to be returned
    pub fn with_response(self, reply: &str) -> Self {
        self.responses.lock().unwrap().push(reply.to_string());
        self
    }

    /// Make every generate call fail after recording it
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Get all generate calls with their arguments
    pub fn calls(&self) -> Vec<GenerateCallArgs> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseChatModel for MockChatModel {
    async fn generate(&self, contents: Vec<Content>, config: GenerationConfig) -> Result<String> {
        // Record the call with all arguments
        self.calls.lock().unwrap().push(GenerateCallArgs {
            contents,
            config,
        });

        if self.fail {
            anyhow::bail!("mock LLM failure");
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            Ok(responses.remove(0))
        } else {
            Ok("Mock reply from Gemini.".to_string())
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of mock collaborators plus handles for assertions
pub struct TestDependencies {
    pub otp_store: Arc<InMemoryOtpStore>,
    pub mailer: Arc<MockMailService>,
    pub chat_model: Arc<MockChatModel>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            otp_store: Arc::new(InMemoryOtpStore::new()),
            mailer: Arc::new(MockMailService::new()),
            chat_model: Arc::new(MockChatModel::new()),
        }
    }

    pub fn with_mailer(mut self, mailer: MockMailService) -> Self {
        self.mailer = Arc::new(mailer);
        self
    }

    pub fn with_chat_model(mut self, chat_model: MockChatModel) -> Self {
        self.chat_model = Arc::new(chat_model);
        self
    }

    /// Build ServerDeps backed by the mocks
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.otp_store.clone(),
            self.mailer.clone(),
            Some(self.chat_model.clone()),
        )
    }

    /// Build ServerDeps with no LLM collaborator (missing credential)
    pub fn server_deps_without_chat_model(&self) -> ServerDeps {
        ServerDeps::new(self.otp_store.clone(), self.mailer.clone(), None)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
