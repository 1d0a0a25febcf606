use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;

use movavi_core::{
    BackendError, ChatSession, Environment, MovieAnswer, MovieBackend, Page, EXAMPLE_PROMPTS,
};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Chat,
    Examples,
    Input,
}

pub type ReplyTask = JoinHandle<Result<MovieAnswer, BackendError>>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,
    pub session: ChatSession,

    // Input editing
    pub input_cursor: usize, // cursor position in session.input, in chars

    // Chat view
    pub chat_scroll: u16,
    pub chat_height: u16, // Height of chat area for scroll calculations
    pub chat_width: u16,  // Width of chat area for wrap calculations
    pub example_state: ListState,
    pub menu_state: ListState,

    // In-flight request
    pub reply_task: Option<ReplyTask>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Panel areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
    pub info_area: Option<Rect>,

    pub backend: Arc<dyn MovieBackend>,
    pub environment: Environment,
}

impl App {
    pub fn new(backend: Arc<dyn MovieBackend>, environment: Environment) -> Self {
        let mut example_state = ListState::default();
        example_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            focus: FocusPane::Input,
            session: ChatSession::new(),

            input_cursor: 0,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            example_state,
            menu_state: ListState::default(),

            reply_task: None,

            animation_frame: 0,

            chat_area: None,
            info_area: None,

            backend,
            environment,
        }
    }

    /// Send the current input. Does nothing for blank input or while a
    /// request is already running.
    pub fn submit_input(&mut self) {
        if self.reply_task.is_some() {
            return;
        }
        let text = self.session.input.clone();
        let Some(question) = self.session.begin_submission(&text) else {
            return;
        };

        self.input_cursor = 0;
        self.input_mode = InputMode::Normal;
        self.scroll_chat_to_bottom();

        let backend = Arc::clone(&self.backend);
        self.reply_task = Some(tokio::spawn(async move { backend.ask(&question).await }));
    }

    /// Fill the input with an example prompt and send it.
    pub fn submit_example(&mut self, idx: usize) {
        if self.session.use_example(idx).is_some() {
            self.input_cursor = self.session.input.chars().count();
            self.submit_input();
        }
    }

    /// Collect the reply if the request task has finished.
    pub async fn poll_reply(&mut self) {
        let finished = self
            .reply_task
            .as_ref()
            .map(|task| task.is_finished())
            .unwrap_or(false);
        if finished {
            self.finish_reply().await;
        }
    }

    /// Wait for the in-flight request (if any) and apply its outcome.
    pub async fn finish_reply(&mut self) {
        let Some(task) = self.reply_task.take() else {
            return;
        };

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(join_err) => Err(BackendError::Interrupted(join_err.to_string())),
        };
        self.session.complete_submission(outcome);

        if self.session.take_focus_request() {
            self.focus = FocusPane::Input;
            self.input_mode = InputMode::Editing;
            self.input_cursor = self.session.input.chars().count();
        }
        self.scroll_chat_to_bottom();
    }

    pub fn navigate_to(&mut self, page: Page) {
        self.session.navigate_to(page.id());
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_menu(&mut self) {
        self.session.toggle_menu();
        if self.session.navigation.menu_open {
            let current = Page::all()
                .iter()
                .position(|p| *p == self.session.navigation.active);
            self.menu_state.select(current);
        }
    }

    pub fn menu_nav_down(&mut self) {
        let len = Page::all().len();
        let i = self.menu_state.selected().map(|i| (i + 1) % len).unwrap_or(0);
        self.menu_state.select(Some(i));
    }

    pub fn menu_nav_up(&mut self) {
        let len = Page::all().len();
        let i = self
            .menu_state
            .selected()
            .map(|i| (i + len - 1) % len)
            .unwrap_or(0);
        self.menu_state.select(Some(i));
    }

    pub fn select_menu_item(&mut self) {
        if let Some(page) = self.menu_state.selected().and_then(|i| Page::all().get(i).copied()) {
            self.navigate_to(page);
        }
    }

    pub fn example_nav_down(&mut self) {
        let i = self
            .example_state
            .selected()
            .map(|i| (i + 1).min(EXAMPLE_PROMPTS.len() - 1))
            .unwrap_or(0);
        self.example_state.select(Some(i));
    }

    pub fn example_nav_up(&mut self) {
        let i = self
            .example_state
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        self.example_state.select(Some(i));
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.session.is_waiting() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines);
    }

    pub fn scroll_chat_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    /// Scroll chat to bottom so the newest message is visible
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;
        for line in render::chat_lines(self.session.messages(), self.animation_frame) {
            // Use character count, not byte length, for proper UTF-8 handling
            let char_count = line.width();
            total_lines = total_lines.saturating_add(if char_count == 0 {
                1
            } else {
                ((char_count / wrap_width) + 1) as u16
            });
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use movavi_core::{ChatRole, HealthStatus};

    struct EchoBackend;

    #[async_trait]
    impl MovieBackend for EchoBackend {
        async fn ask(&self, prompt: &str) -> Result<MovieAnswer, BackendError> {
            if prompt.contains("fail") {
                return Err(BackendError::status(500, "Internal Server Error"));
            }
            Ok(MovieAnswer {
                ai_response: format!("You asked: {}", prompt),
                ..Default::default()
            })
        }

        async fn health(&self) -> Result<HealthStatus, BackendError> {
            Err(BackendError::status(503, "Service Unavailable"))
        }
    }

    struct PanickingBackend;

    #[async_trait]
    impl MovieBackend for PanickingBackend {
        async fn ask(&self, _prompt: &str) -> Result<MovieAnswer, BackendError> {
            panic!("backend exploded");
        }

        async fn health(&self) -> Result<HealthStatus, BackendError> {
            unreachable!()
        }
    }

    fn app_with(backend: impl MovieBackend + 'static) -> App {
        App::new(Arc::new(backend), Environment::Local)
    }

    #[tokio::test]
    async fn test_submit_and_finish_reply() {
        let mut app = app_with(EchoBackend);
        app.session.input = "Is Up good?".to_string();
        app.submit_input();

        assert!(app.reply_task.is_some());
        assert!(!app.session.submit_control().enabled);
        assert_eq!(app.input_mode, InputMode::Normal);

        app.finish_reply().await;

        let last = app.session.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.text(), Some("You asked: Is Up good?"));
        assert!(app.session.submit_control().enabled);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.focus, FocusPane::Input);
    }

    #[tokio::test]
    async fn test_blank_input_does_not_spawn() {
        let mut app = app_with(EchoBackend);
        app.session.input = "   ".to_string();
        app.submit_input();
        assert!(app.reply_task.is_none());
        assert_eq!(app.session.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_error_reply_reenables_submit() {
        let mut app = app_with(EchoBackend);
        app.session.input = "please fail".to_string();
        app.submit_input();
        app.finish_reply().await;

        let last = app.session.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Error);
        assert!(last.text().unwrap().contains("500"));
        assert!(app.session.submit_control().enabled);
    }

    #[tokio::test]
    async fn test_panicking_task_becomes_error() {
        let mut app = app_with(PanickingBackend);
        app.session.input = "boom".to_string();
        app.submit_input();
        app.finish_reply().await;

        let last = app.session.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Error);
        assert!(app.session.submit_control().enabled);
        assert!(app.session.messages().iter().all(|m| !m.is_loading()));
    }

    #[tokio::test]
    async fn test_example_submission() {
        let mut app = app_with(EchoBackend);
        app.submit_example(1);
        app.finish_reply().await;
        assert_eq!(
            app.session.messages()[1].text(),
            Some(EXAMPLE_PROMPTS[1])
        );
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = app_with(EchoBackend);
        app.toggle_menu();
        assert!(app.session.navigation.menu_open);
        assert_eq!(app.menu_state.selected(), Some(0));
        app.menu_nav_down();
        app.select_menu_item();
        assert_eq!(app.session.navigation.active, Page::About);
        assert!(!app.session.navigation.menu_open);
        app.menu_nav_up();
    }
}
