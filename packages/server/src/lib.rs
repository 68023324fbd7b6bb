// LegalAI - API Core
//
// This crate provides the backend API for the legal-assistant chat client:
// email OTP authentication gating a relay that forwards conversations to
// Gemini with a fixed Indian-law system prompt.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
