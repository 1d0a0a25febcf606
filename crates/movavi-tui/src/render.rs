//! Converts chat messages into styled terminal lines.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use movavi_core::{ChatMessage, ChatRole, MessageBody, MovieData, MovieOverview};

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_inline(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'*') {
            // Consume the second *
            chars.next();

            if !current_text.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current_text), base));
            }

            // Find closing **
            let mut bold_text = String::new();
            let mut found_close = false;

            while let Some(c) = chars.next() {
                if c == '*' && chars.peek() == Some(&'*') {
                    chars.next();
                    found_close = true;
                    break;
                }
                bold_text.push(c);
            }

            if found_close && !bold_text.is_empty() {
                spans.push(Span::styled(bold_text, base.add_modifier(Modifier::BOLD)));
            } else {
                // No closing **, treat as literal
                current_text.push_str("**");
                current_text.push_str(&bold_text);
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::styled(current_text, base));
    }

    spans
}

/// Render one line of markdown: headings, bullets and bold text.
pub fn markdown_line(text: &str) -> Line<'static> {
    let trimmed = text.trim_start();

    let heading_level = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&heading_level) && trimmed[heading_level..].starts_with(' ') {
        let color = if heading_level <= 2 { Color::Magenta } else { Color::Blue };
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        return Line::from(parse_inline(trimmed[heading_level..].trim(), style));
    }

    if let Some(item) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        let mut spans = vec![Span::styled("  • ", Style::default().fg(Color::Yellow))];
        spans.extend(parse_inline(item, Style::default()));
        return Line::from(spans);
    }

    let spans = parse_inline(text, Style::default());
    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

/// Terminal version of the overview banner.
pub fn overview_lines(overview: &MovieOverview) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD);
    let badge = Style::default().bg(Color::DarkGray).fg(Color::White);

    let poster = match overview.poster() {
        Some(url) => Span::styled(format!("🖼  {}", url), Style::default().fg(Color::DarkGray)),
        None => Span::raw("🎬"),
    };

    let mut lines = vec![
        Line::from(vec![
            poster,
            Span::raw("  "),
            Span::styled(
                overview.title().to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            overview.rating().to_string(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(vec![
            Span::styled(format!(" {} ", overview.genre()), badge),
            Span::raw(" "),
            Span::styled(format!(" {} ", overview.runtime()), badge),
        ]),
        Line::from(vec![
            Span::styled("Director: ", label),
            Span::raw(overview.director().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Cast: ", label),
            Span::raw(overview.cast().to_string()),
        ]),
    ];

    if let Some(plot) = overview.plot() {
        lines.push(Line::from(Span::styled(
            plot.to_string(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(24),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Lines for the movie-info side panel.
pub fn movie_info_lines(data: &MovieData) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            data.heading(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(data.rating_label(), Style::default().fg(Color::Yellow))),
        Line::default(),
        Line::from(vec![Span::styled("Genre: ", label), Span::raw(data.genre().to_string())]),
        Line::from(vec![Span::styled("Runtime: ", label), Span::raw(data.runtime().to_string())]),
        Line::from(vec![Span::styled("Rated: ", label), Span::raw(data.rated().to_string())]),
        Line::from(vec![Span::styled("Director: ", label), Span::raw(data.director().to_string())]),
        Line::from(vec![Span::styled("Cast: ", label), Span::raw(data.actors().to_string())]),
    ];

    if let Some(plot) = data.plot() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", plot),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    match data.poster() {
        Some(url) => lines.push(Line::from(Span::styled(
            format!("Poster: {}", url),
            Style::default().fg(Color::DarkGray),
        ))),
        None => lines.push(Line::from(Span::styled(
            "No Image Available",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines
}

fn role_line(role: ChatRole) -> Line<'static> {
    let (label, color) = match role {
        ChatRole::User => ("You:", Color::Cyan),
        ChatRole::Assistant => ("AI:", Color::Yellow),
        ChatRole::Error => ("Error:", Color::Red),
    };
    Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// All chat messages as terminal lines, in order.
pub fn chat_lines(messages: &[ChatMessage], animation_frame: u8) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for msg in messages {
        lines.push(role_line(msg.role));

        match (&msg.body, msg.role) {
            (MessageBody::Loading, _) => {
                // Animated ellipsis: cycles through ".", "..", "..."
                let dots = ".".repeat((animation_frame as usize) + 1);
                lines.push(Line::from(Span::styled(
                    format!("Thinking{}", dots),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                )));
            }
            (MessageBody::Text(text), ChatRole::Assistant) => {
                lines.extend(text.lines().map(markdown_line));
            }
            (MessageBody::Text(text), ChatRole::Error) => {
                lines.extend(
                    text.lines()
                        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Red)))),
                );
            }
            (MessageBody::Text(text), ChatRole::User) => {
                lines.extend(text.lines().map(|l| Line::from(l.to_string())));
            }
            (MessageBody::Formatted(formatted), _) => {
                if let Some(overview) = &formatted.overview {
                    lines.extend(overview_lines(overview));
                }
                lines.extend(formatted.body.lines().map(markdown_line));
            }
        }

        lines.push(Line::default());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use movavi_core::format_response;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_bold_is_styled() {
        let line = markdown_line("This is **great** stuff");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "great");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_unclosed_bold_is_literal() {
        assert_eq!(plain(&markdown_line("a **b")), "a **b");
    }

    #[test]
    fn test_heading_and_bullet() {
        assert_eq!(plain(&markdown_line("## Rating")), "Rating");
        assert_eq!(plain(&markdown_line("- Strong cast")), "  • Strong cast");
        assert_eq!(plain(&markdown_line("#hashtag")), "#hashtag");
    }

    #[test]
    fn test_formatted_message_lines() {
        let formatted = format_response(
            "---MOVIE_OVERVIEW_START---\n**Title:** Inception\n**Rating:** 8.8\n---MOVIE_OVERVIEW_END---\nYes, highly recommended.",
        );
        let lines = chat_lines(&[ChatMessage::assistant(formatted)], 0);
        let text: Vec<String> = lines.iter().map(plain).collect();

        assert_eq!(text[0], "AI:");
        assert_eq!(text[1], "🎬  Inception");
        assert_eq!(text[2], "8.8");
        assert!(text.contains(&"Yes, highly recommended.".to_string()));
        assert!(!text.iter().any(|l| l.contains("MOVIE_OVERVIEW")));
    }

    #[test]
    fn test_loading_animation() {
        let lines = chat_lines(&[ChatMessage::loading()], 2);
        assert_eq!(plain(&lines[1]), "Thinking...");
    }
}
