//! Chat session: the state behind the chat page and the operations the
//! front-end binds to user input.

use crate::backend::{MovieAnswer, MovieBackend, MovieData};
use crate::error::BackendError;
use crate::format::format_response;
use crate::navigation::NavigationState;
use crate::state::{ChatMessage, SubmitControl, WELCOME_MESSAGE};

/// Canned questions offered on the home page.
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "Should I watch Inception?",
    "Tell me about The Dark Knight",
    "Is 'Parasite' worth watching?",
    "What about Interstellar?",
];

pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pub input: String,
    submit: SubmitControl,
    pub navigation: NavigationState,
    movie_info: Option<MovieData>,
    focus_requested: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant_text(WELCOME_MESSAGE)],
            input: String::new(),
            submit: SubmitControl::default(),
            navigation: NavigationState::default(),
            movie_info: None,
            focus_requested: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn is_waiting(&self) -> bool {
        !self.submit.enabled
    }

    pub fn movie_info(&self) -> Option<&MovieData> {
        self.movie_info.as_ref()
    }

    /// Start a submission of `text`.
    ///
    /// Returns the trimmed question to send, or `None` when the text is blank
    /// or a request is already in flight.
    pub fn begin_submission(&mut self, text: &str) -> Option<String> {
        let question = text.trim();
        if question.is_empty() || self.is_waiting() {
            return None;
        }
        let question = question.to_string();

        self.messages.push(ChatMessage::user(question.clone()));
        self.input.clear();
        self.submit.busy();
        self.messages.push(ChatMessage::loading());

        tracing::debug!(question = %question, "submission started");
        Some(question)
    }

    /// Finish the in-flight submission with its outcome.
    ///
    /// The placeholder is removed before the terminal message is appended.
    /// The submit control is released on every path.
    pub fn complete_submission(&mut self, outcome: Result<MovieAnswer, BackendError>) {
        self.remove_placeholder();

        match outcome {
            Ok(answer) => {
                self.messages
                    .push(ChatMessage::assistant(format_response(&answer.ai_response)));
                if let Some(data) = answer.movie_data {
                    self.show_movie_info(data);
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "movie request failed");
                self.messages.push(ChatMessage::error(&err));
            }
        }

        self.submit.release();
        self.focus_requested = true;
    }

    /// Submit `text` and wait for the backend's answer.
    pub async fn submit_question(&mut self, text: &str, backend: &dyn MovieBackend) {
        let Some(question) = self.begin_submission(text) else {
            return;
        };
        let outcome = backend.ask(&question).await;
        self.complete_submission(outcome);
    }

    fn remove_placeholder(&mut self) {
        if let Some(pos) = self.messages.iter().position(|m| m.is_loading()) {
            self.messages.remove(pos);
        }
    }

    /// Put example `idx` into the input. Returns the prompt if it exists.
    pub fn use_example(&mut self, idx: usize) -> Option<&'static str> {
        let prompt = EXAMPLE_PROMPTS.get(idx).copied()?;
        self.input = prompt.to_string();
        Some(prompt)
    }

    pub fn navigate_to(&mut self, page_id: &str) -> bool {
        self.navigation.navigate_to(page_id)
    }

    pub fn toggle_menu(&mut self) {
        self.navigation.toggle_menu();
    }

    pub fn show_movie_info(&mut self, data: MovieData) {
        self.movie_info = Some(data);
    }

    pub fn clear_movie_info(&mut self) {
        self.movie_info = None;
    }

    /// True once after each finished submission; the front-end should move
    /// focus back to the input.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
