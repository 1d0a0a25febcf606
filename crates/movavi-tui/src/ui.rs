use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use movavi_core::{Page, EXAMPLE_PROMPTS};

use crate::app::{App, FocusPane, InputMode};
use crate::render;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.session.navigation.active {
        Page::Home => render_home_page(app, frame, body_area),
        Page::About => render_about_page(frame, body_area),
        Page::Help => render_help_page(frame, body_area),
    }

    render_footer(app, frame, footer_area);

    if app.session.navigation.menu_open {
        render_menu(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" 🎬 Movavi ", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
    ];

    for (i, page) in Page::all().iter().enumerate() {
        let style = if app.session.navigation.is_active(*page) {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, page.title()), style));
    }

    spans.push(Span::styled(
        format!("  [{}] v{}", app.environment.as_str(), env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::Gray),
    ));

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " INSERT ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |key: &'static str, label: &'static str| {
        [Span::styled(key, key_style), Span::styled(label, label_style)]
    };

    let hints: Vec<Span> = if app.session.navigation.menu_open {
        [hint(" j/k ", " nav "), hint(" Enter ", " open "), hint(" Esc ", " close ")].concat()
    } else if app.input_mode == InputMode::Editing {
        [hint(" Enter ", " ask "), hint(" Esc ", " stop typing ")].concat()
    } else if app.session.navigation.active == Page::Home {
        let mut hints = vec![hint(" Tab ", " focus ")];
        match app.focus {
            FocusPane::Examples => hints.push(hint(" Enter ", " ask example ")),
            FocusPane::Input => hints.push(hint(" i ", " type ")),
            FocusPane::Chat => hints.push(hint(" j/k ", " scroll ")),
        }
        if app.session.movie_info().is_some() {
            hints.push(hint(" c ", " clear info "));
        }
        hints.extend([hint(" m ", " menu "), hint(" q ", " quit ")]);
        hints.concat()
    } else {
        [hint(" Esc ", " chat "), hint(" m ", " menu "), hint(" q ", " quit ")].concat()
    };

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn border_color(focused: bool) -> Color {
    if focused { Color::Cyan } else { Color::DarkGray }
}

fn render_home_page(app: &mut App, frame: &mut Frame, area: Rect) {
    let [chat_column, side_column] = Layout::horizontal([
        Constraint::Percentage(68),
        Constraint::Percentage(32),
    ])
    .areas(area);

    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(chat_column);

    // Store areas for mouse hit-testing
    app.chat_area = Some(chat_area);

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2);

    render_chat(app, frame, chat_area);
    render_input(app, frame, input_area);

    let examples_height = (EXAMPLE_PROMPTS.len() + 2) as u16;
    let [examples_area, info_area] = Layout::vertical([
        Constraint::Length(examples_height),
        Constraint::Min(0),
    ])
    .areas(side_column);

    render_examples(app, frame, examples_area);
    render_movie_info(app, frame, info_area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app.focus == FocusPane::Chat)))
        .title(" Chat ");

    let lines = render::chat_lines(app.session.messages(), app.animation_frame);
    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let control = app.session.submit_control();
    let editing = app.input_mode == InputMode::Editing;

    let input_border_color = if !control.enabled {
        Color::DarkGray
    } else if editing || app.focus == FocusPane::Input {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let title = if control.enabled {
        format!(" {} (Enter) ", control.label)
    } else {
        format!(" {} ", control.label)
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input_border_color))
        .title(title);

    // Calculate visible portion of input with horizontal scrolling
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let (visible_text, style) = if app.session.input.is_empty() && !editing {
        (
            "Ask about any movie...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            app.session
                .input
                .chars()
                .skip(scroll_offset)
                .take(inner_width)
                .collect(),
            Style::default().fg(Color::Cyan),
        )
    };

    frame.render_widget(Paragraph::new(visible_text).style(style).block(input_block), area);

    // Show cursor when editing
    if editing && !app.session.navigation.menu_open {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_examples(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app.focus == FocusPane::Examples)))
        .title(" Try asking ");

    let items: Vec<ListItem> = EXAMPLE_PROMPTS
        .iter()
        .map(|prompt| ListItem::new(*prompt))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    if app.focus == FocusPane::Examples {
        frame.render_stateful_widget(list, area, &mut app.example_state);
    } else {
        frame.render_widget(list, area);
    }
}

fn render_movie_info(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(data) = app.session.movie_info() else {
        app.info_area = None;
        return;
    };
    app.info_area = Some(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Movie Info ");

    let info = Paragraph::new(Text::from(render::movie_info_lines(data)))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(info, area);
}

fn render_about_page(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "About Movavi",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("Movavi is an AI movie review assistant. Ask whether a film is worth"),
        Line::from("your evening and it answers with a short overview (poster, rating,"),
        Line::from("genre, runtime, director and cast) followed by a written review."),
        Line::default(),
        Line::from("Movie data comes from OMDb; the review is generated by the Movavi API."),
    ];

    let about = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" About "))
        .wrap(Wrap { trim: true });
    frame.render_widget(about, area);
}

fn render_help_page(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let rows = [
        ("i", "start typing a question"),
        ("Enter", "ask (while typing) / ask the selected example"),
        ("Esc", "stop typing / back to chat"),
        ("Tab", "cycle focus: chat, examples, input"),
        ("j/k", "scroll chat or move through examples"),
        ("Ctrl+d/u", "half-page scroll"),
        ("c", "hide the movie info panel"),
        ("1-3", "switch page"),
        ("m", "open the navigation menu"),
        ("q / Ctrl+c", "quit"),
    ];

    let lines: Vec<Line> = rows
        .iter()
        .map(|(k, desc)| {
            Line::from(vec![
                Span::styled(format!("{:>12}  ", k), key),
                Span::raw(*desc),
            ])
        })
        .collect();

    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Keys "));
    frame.render_widget(help, area);
}

fn render_menu(app: &mut App, frame: &mut Frame, area: Rect) {
    let popup_width = 24.min(area.width);
    let popup_height = (Page::all().len() + 2) as u16;
    let popup_area = Rect::new(
        area.width.saturating_sub(popup_width) / 2,
        area.height.saturating_sub(popup_height) / 2,
        popup_width,
        popup_height.min(area.height),
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = Page::all()
        .iter()
        .map(|page| ListItem::new(format!(" {} ", page.title())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Go to "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup_area, &mut app.menu_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use movavi_core::{
        BackendError, Environment, HealthStatus, MovieAnswer, MovieBackend, MovieData,
    };
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    struct NoBackend;

    #[async_trait]
    impl MovieBackend for NoBackend {
        async fn ask(&self, _prompt: &str) -> Result<MovieAnswer, BackendError> {
            Err(BackendError::status(503, "Service Unavailable"))
        }

        async fn health(&self) -> Result<HealthStatus, BackendError> {
            Err(BackendError::status(503, "Service Unavailable"))
        }
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        App::new(Arc::new(NoBackend), Environment::Local)
    }

    #[test]
    fn test_home_page_shows_welcome_and_examples() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains("Movavi"));
        assert!(screen.contains("AI movie review assistant"));
        assert!(screen.contains("Should I watch Inception?"));
        assert!(screen.contains("Ask (Enter)"));
        assert!(screen.contains("[local]"));
        assert!(app.chat_area.is_some());
    }

    #[test]
    fn test_busy_input_shows_thinking_label() {
        let mut app = app();
        app.session.begin_submission("Alien?").unwrap();
        let screen = draw(&mut app);
        assert!(screen.contains(" Thinking... "));
        assert!(!screen.contains("Ask (Enter)"));
    }

    #[test]
    fn test_movie_info_panel() {
        let mut app = app();
        app.session.show_movie_info(MovieData {
            title: Some("Heat".to_string()),
            year: Some("1995".to_string()),
            ..Default::default()
        });
        let screen = draw(&mut app);
        assert!(screen.contains("Movie Info"));
        assert!(screen.contains("Heat (1995)"));
        assert!(app.info_area.is_some());
    }

    #[test]
    fn test_about_page_and_menu() {
        let mut app = app();
        app.navigate_to(Page::About);
        app.toggle_menu();
        let screen = draw(&mut app);
        assert!(screen.contains("About Movavi"));
        assert!(screen.contains("Go to"));
    }
}
