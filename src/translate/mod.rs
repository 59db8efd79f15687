// City-name translation through a chat-completion API
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::CityTranslator;

use serde::{Deserialize, Serialize};

pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

pub const SYSTEM_PROMPT: &str = "You translate city names for a Chinese weather service. \
Translate the given city name into Simplified Chinese. \
Reply with only the translated city name, with no punctuation, explanation or extra text.";

/// AMap expects Chinese names or adcodes, so any Latin letter marks a name
/// that should go through the translator first.
pub fn needs_translation(city: &str) -> bool {
    city.chars().any(|c| c.is_ascii_alphabetic())
}

/// OpenAI-compatible chat-completion request body
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
