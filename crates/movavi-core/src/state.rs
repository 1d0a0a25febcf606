//! UI-agnostic chat state types
//!
//! Shared by every front-end; nothing here depends on a UI framework.

use crate::format::{escape_html, FormattedResponse};

pub const WELCOME_MESSAGE: &str = "👋 Hi! I'm your AI movie review assistant. Ask me about any movie and I'll help you decide if it's worth watching!";
pub const LOADING_TEXT: &str = "Thinking...";

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    Formatted(FormattedResponse),
    Loading,
}

/// A message in the chat list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub body: MessageBody,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            body: MessageBody::Text(text.into()),
        }
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            body: MessageBody::Text(text.into()),
        }
    }

    pub fn assistant(formatted: FormattedResponse) -> Self {
        Self {
            role: ChatRole::Assistant,
            body: MessageBody::Formatted(formatted),
        }
    }

    pub fn error(reason: impl std::fmt::Display) -> Self {
        Self {
            role: ChatRole::Error,
            body: MessageBody::Text(format!("Sorry, something went wrong: {}", reason)),
        }
    }

    pub fn loading() -> Self {
        Self {
            role: ChatRole::Assistant,
            body: MessageBody::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.body, MessageBody::Loading)
    }

    /// Markup for HTML front-ends. User and error text is escaped.
    pub fn markup(&self) -> String {
        match &self.body {
            MessageBody::Formatted(formatted) => formatted.html.clone(),
            MessageBody::Loading => format!(r#"<span class="loading"></span>{}"#, LOADING_TEXT),
            MessageBody::Text(text) => escape_html(text),
        }
    }

    /// Plain text content, if this message has any.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text(text) => Some(text),
            MessageBody::Formatted(formatted) => Some(&formatted.body),
            MessageBody::Loading => None,
        }
    }
}

/// The ask button: disabled and relabelled while a request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl SubmitControl {
    pub const IDLE_LABEL: &'static str = "Ask";
    pub const BUSY_LABEL: &'static str = LOADING_TEXT;

    pub fn busy(&mut self) {
        self.enabled = false;
        self.label = Self::BUSY_LABEL;
    }

    pub fn release(&mut self) {
        self.enabled = true;
        self.label = Self::IDLE_LABEL;
    }
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: Self::IDLE_LABEL,
        }
    }
}
