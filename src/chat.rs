//! Conversation state for the assistant side panel.

use thiserror::Error;

use crate::backend::BackendError;

/// Backend limit on a single chat message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

pub const GREETING: &str = "Hello! I'm ExoAI, your exoplanet research assistant. \
Ask me about exoplanets, detection methods, or how to read your classification results.";
pub const DEFAULT_ERROR: &str = "Sorry, I encountered an error. Please try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Assistant messages that report a failure instead of an answer.
    pub is_error: bool,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChatSendError {
    /// A reply to the previous message is still outstanding.
    #[error("Please wait for the current reply.")]
    Busy,
    #[error("Message must be between 1 and {} characters", MAX_MESSAGE_CHARS)]
    TooLong { chars: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                text: GREETING.to_string(),
                is_error: false,
            }],
            awaiting_reply: false,
        }
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Input stays disabled while this is true.
    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Queue a user message. Returns the trimmed text to send, or `None` when
    /// there is nothing to send.
    pub fn send(&mut self, input: &str) -> Result<Option<String>, ChatSendError> {
        let message = input.trim();
        if message.is_empty() {
            return Ok(None);
        }
        if self.awaiting_reply {
            return Err(ChatSendError::Busy);
        }
        let chars = message.chars().count();
        if chars > MAX_MESSAGE_CHARS {
            return Err(ChatSendError::TooLong { chars });
        }
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: message.to_string(),
            is_error: false,
        });
        self.awaiting_reply = true;
        Ok(Some(message.to_string()))
    }

    /// Record the outcome of the outstanding request.
    pub fn receive(&mut self, reply: Result<String, BackendError>) {
        self.awaiting_reply = false;
        let message = match reply {
            Ok(text) => ChatMessage {
                role: ChatRole::Assistant,
                text,
                is_error: false,
            },
            Err(err) => {
                tracing::warn!("Chat request failed: {err}");
                ChatMessage {
                    role: ChatRole::Assistant,
                    text: error_text(&err),
                    is_error: true,
                }
            }
        };
        self.messages.push(message);
    }

    /// Start over with just the greeting.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn error_text(err: &BackendError) -> String {
    match err {
        BackendError::Rejected(message) => message.clone(),
        BackendError::Transport(_) => NETWORK_ERROR.to_string(),
        _ => DEFAULT_ERROR.to_string(),
    }
}
