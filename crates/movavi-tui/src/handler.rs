use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use movavi_core::Page;

use crate::app::{App, FocusPane, InputMode};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.session.navigation.menu_open {
        handle_menu(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_menu(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') => app.toggle_menu(),
        KeyCode::Char('j') | KeyCode::Down => app.menu_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.menu_nav_up(),
        KeyCode::Enter => app.select_menu_item(),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Page switching works everywhere
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('m') => {
            app.toggle_menu();
            return;
        }
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            if let Some(page) = Page::all().get(idx) {
                app.navigate_to(*page);
            }
            return;
        }
        _ => {}
    }

    match app.session.navigation.active {
        Page::Home => handle_home_normal(app, key),
        Page::About | Page::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Backspace) {
                app.navigate_to(Page::Home);
            }
        }
    }
}

fn handle_home_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        // Tab cycles focus: Chat -> Examples -> Input
        KeyCode::Tab => {
            app.focus = match app.focus {
                FocusPane::Chat => FocusPane::Examples,
                FocusPane::Examples => FocusPane::Input,
                FocusPane::Input => FocusPane::Chat,
            };
        }

        KeyCode::Char('i') => {
            app.focus = FocusPane::Input;
            app.input_mode = InputMode::Editing;
        }

        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            FocusPane::Examples => app.example_nav_down(),
            _ => app.scroll_chat_down(1),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            FocusPane::Examples => app.example_nav_up(),
            _ => app.scroll_chat_up(1),
        },

        // Half-page scroll
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_chat_down((app.chat_height / 2).max(1));
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_chat_up((app.chat_height / 2).max(1));
        }
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),
        KeyCode::Char('g') => app.chat_scroll = 0,

        KeyCode::Enter => match app.focus {
            FocusPane::Examples => {
                if let Some(i) = app.example_state.selected() {
                    app.submit_example(i);
                }
            }
            FocusPane::Input => app.input_mode = InputMode::Editing,
            FocusPane::Chat => {}
        },

        // Hide the movie info panel
        KeyCode::Char('c') => app.session.clear_movie_info(),

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    let input = &mut app.session.input;
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.submit_input();
        }
        KeyCode::Backspace => {
            if app.input_cursor > 0 {
                app.input_cursor -= 1;
                let byte_pos = char_to_byte_index(input, app.input_cursor);
                input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = input.chars().count();
            if app.input_cursor < char_count {
                let byte_pos = char_to_byte_index(input, app.input_cursor);
                input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = input.chars().count();
            app.input_cursor = (app.input_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.input_cursor = 0;
        }
        KeyCode::End => {
            app.input_cursor = input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(input, app.input_cursor);
            input.insert(byte_pos, c);
            app.input_cursor += 1;
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_chat = app
        .chat_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !in_chat {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_chat_down(3),
        MouseEventKind::ScrollUp => app.scroll_chat_up(3),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use movavi_core::{
        BackendError, ChatRole, Environment, HealthStatus, MovieAnswer, MovieBackend,
    };
    use std::sync::Arc;

    struct OkBackend;

    #[async_trait]
    impl MovieBackend for OkBackend {
        async fn ask(&self, _prompt: &str) -> Result<MovieAnswer, BackendError> {
            Ok(MovieAnswer {
                ai_response: "Yes.".to_string(),
                ..Default::default()
            })
        }

        async fn health(&self) -> Result<HealthStatus, BackendError> {
            Err(BackendError::status(503, "Service Unavailable"))
        }
    }

    fn app() -> App {
        App::new(Arc::new(OkBackend), Environment::Local)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_typing_and_enter_submits() {
        let mut app = app();
        type_text(&mut app, "Is Up good?");
        assert_eq!(app.session.input, "Is Up good?");

        press(&mut app, KeyCode::Enter);
        assert!(app.reply_task.is_some());
        assert!(app.session.input.is_empty());

        app.finish_reply().await;
        let roles: Vec<_> = app.session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]);
    }

    #[tokio::test]
    async fn test_enter_on_blank_input_does_nothing() {
        let mut app = app();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.reply_task.is_none());
        assert_eq!(app.session.messages().len(), 1);
    }

    #[test]
    fn test_cursor_editing_is_utf8_safe() {
        let mut app = app();
        type_text(&mut app, "Amélie");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.input, "Amlie");
        assert_eq!(app.input_cursor, 2);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.session.input, "mlie");
    }

    #[test]
    fn test_number_keys_switch_pages() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.session.navigation.active, Page::About);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session.navigation.active, Page::Home);
    }

    #[test]
    fn test_menu_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('m'));
        assert!(app.session.navigation.menu_open);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.navigation.active, Page::Help);
        assert!(!app.session.navigation.menu_open);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_event(&mut app, AppEvent::Key(key)).unwrap();
        assert!(app.should_quit);
    }
}
