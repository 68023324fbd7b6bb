//! Chat relay - shapes a transcript into one Gemini exchange
//!
//! Every request replays the full conversation: a fixed two-turn preamble
//! (domain-restriction prompt plus the model's acknowledgment), the caller's
//! prior turns in order, then the last turn as the new user message.

use anyhow::{bail, Result};
use gemini_client::{Content, GenerationConfig};

use super::models::{ChatRole, ChatTurn};
use crate::kernel::BaseChatModel;

/// Model serving the relay.
pub const GEMINI_MODEL: &str = "gemini-pro";

const MAX_OUTPUT_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.8;
const TOP_K: u32 = 40;

/// Domain-restriction instructions sent ahead of every conversation.
pub const LEGAL_SYSTEM_PROMPT: &str = "\
You are an AI assistant specializing in Indian law. Your responses should:
1. Focus exclusively on Indian legal system, laws, and regulations
2. Provide general information and explanations about Indian law
3. Always mention that your responses are for informational purposes only and not legal advice
4. Recommend consulting with a qualified legal professional for specific legal situations
5. Stay updated to constitutional amendments and supreme court judgments up to 2024
6. If a question is not related to Indian law, politely redirect the conversation to Indian legal topics
7. Use simple, clear language while explaining legal concepts
8. When citing laws, mention specific sections and acts
9. If unsure about any information, clearly state that
10. Never give specific legal advice about personal cases
If the question is not related to Indian law, respond with: \"I specialize in Indian law. Please ask me questions related to Indian legal system, laws, and regulations.\"";

/// Fixed acknowledgment replayed as the model's answer to the preamble.
pub const SYSTEM_ACK: &str = "I understand my role and boundaries as an Indian law \
assistant. I will proceed according to these guidelines.";

/// Fixed generation parameters for every relay call.
pub fn generation_defaults() -> GenerationConfig {
    GenerationConfig::default()
        .max_output_tokens(MAX_OUTPUT_TOKENS)
        .temperature(TEMPERATURE)
        .top_p(TOP_P)
        .top_k(TOP_K)
}

/// Shape a transcript into Gemini contents.
///
/// `turns` must be non-empty. The last turn is submitted as the new user
/// message regardless of its recorded role; prior turns are replayed with
/// assistant turns mapped to the provider's model role.
pub fn build_contents(turns: &[ChatTurn]) -> Vec<Content> {
    let (last, history) = turns.split_last().expect("transcript must be non-empty");

    let mut contents = Vec::with_capacity(history.len() + 3);
    contents.push(Content::user(LEGAL_SYSTEM_PROMPT));
    contents.push(Content::model(SYSTEM_ACK));
    for turn in history {
        contents.push(match turn.role {
            ChatRole::User => Content::user(turn.content.as_str()),
            ChatRole::Assistant => Content::model(turn.content.as_str()),
        });
    }
    contents.push(Content::user(last.content.as_str()));
    contents
}

/// Forward a transcript to the LLM collaborator and wrap its reply.
pub async fn relay_chat(turns: &[ChatTurn], model: &dyn BaseChatModel) -> Result<ChatTurn> {
    if turns.is_empty() {
        bail!("transcript must contain at least one turn");
    }

    let contents = build_contents(turns);
    let reply = model.generate(contents, generation_defaults()).await?;

    Ok(ChatTurn::assistant(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_turn_gets_two_turn_preamble() {
        let turns = vec![ChatTurn::user("What is Section 302 IPC?")];
        let contents = build_contents(&turns);

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[0].text(), LEGAL_SYSTEM_PROMPT);
        assert_eq!(contents[1].role, "model");
        assert_eq!(contents[1].text(), SYSTEM_ACK);
        assert_eq!(contents[2], Content::user("What is Section 302 IPC?"));
    }

    #[test]
    fn test_history_is_replayed_in_order_with_model_role() {
        let turns = vec![
            ChatTurn::user("What is bail?"),
            ChatTurn::assistant("Bail is..."),
            ChatTurn::user("And anticipatory bail?"),
        ];
        let contents = build_contents(&turns);

        assert_eq!(contents.len(), 5);
        assert_eq!(contents[2], Content::user("What is bail?"));
        assert_eq!(contents[3], Content::model("Bail is..."));
        // The new message is always submitted as the user party
        assert_eq!(contents[4], Content::user("And anticipatory bail?"));
    }

    #[test]
    fn test_generation_defaults_are_fixed() {
        let config = generation_defaults();
        assert_eq!(config.max_output_tokens, Some(1000));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.top_p, Some(0.8));
        assert_eq!(config.top_k, Some(40));
    }
}
