//! Chat domain - relays client transcripts to the LLM collaborator
//!
//! The client owns conversation history and resends the full transcript on
//! every turn; nothing is persisted server-side.

pub mod models;
pub mod relay;

pub use models::{ChatRole, ChatTurn};
pub use relay::{build_contents, generation_defaults, relay_chat, GEMINI_MODEL};
