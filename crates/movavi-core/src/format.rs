//! Turns raw backend answers into renderable markup.

use pulldown_cmark::{html, Event, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::sync::OnceLock;

use crate::overview::{extract_overview, MovieOverview};

/// A backend answer after formatting.
///
/// `overview` and `body` keep the structure for front-ends that draw their
/// own widgets; `html` is the final markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResponse {
    pub overview: Option<MovieOverview>,
    pub body: String,
    pub html: String,
}

/// Format an answer: overview banner (if any) followed by the markdown body.
pub fn format_response(text: &str) -> FormattedResponse {
    match extract_overview(text) {
        Some((overview, remainder)) => {
            let mut html = render_banner(&overview);
            if !remainder.is_empty() {
                html.push_str(&render_markdown(&remainder));
            }
            FormattedResponse {
                overview: Some(overview),
                body: remainder,
                html,
            }
        }
        None => FormattedResponse {
            overview: None,
            body: text.to_string(),
            html: render_markdown(text),
        },
    }
}

/// Render markdown to HTML with GitHub-flavored extensions.
///
/// Single newlines inside a paragraph become `<br />`. Bare `http(s)://`
/// and `www.` URLs outside links and code blocks become links.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let mut events: Vec<Event> = Vec::new();
    // Adjacent text events are joined so a URL is never split
    let mut pending = String::new();
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in Parser::new_ext(text, options) {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => link_depth += 1,
            Event::End(TagEnd::Link | TagEnd::Image) => link_depth = link_depth.saturating_sub(1),
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            _ => {}
        }

        match event {
            Event::Text(text) if link_depth == 0 && !in_code_block => pending.push_str(&text),
            other => {
                flush_text(&mut pending, &mut events);
                events.push(match other {
                    Event::SoftBreak => Event::HardBreak,
                    other => other,
                });
            }
        }
    }
    flush_text(&mut pending, &mut events);

    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, events.into_iter());
    output
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:https?://|www\.)[^\s<]+").expect("url pattern is valid")
    })
}

/// Emit buffered text, turning bare URLs into link events.
fn flush_text<'a>(pending: &mut String, events: &mut Vec<Event<'a>>) {
    if pending.is_empty() {
        return;
    }
    let text = std::mem::take(pending);
    let mut last = 0;

    for found in url_pattern().find_iter(&text) {
        // Trailing punctuation belongs to the sentence, not the URL
        let url = found
            .as_str()
            .trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '\'', '"']);
        if url.ends_with("://") || url.len() <= "www.".len() {
            continue;
        }

        if found.start() > last {
            events.push(Event::Text(text[last..found.start()].to_string().into()));
        }
        let href = if url.starts_with("www.") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.into(),
            title: "".into(),
            id: "".into(),
        }));
        events.push(Event::Text(url.to_string().into()));
        events.push(Event::End(TagEnd::Link));
        last = found.start() + url.len();
    }

    if last < text.len() {
        events.push(Event::Text(text[last..].to_string().into()));
    }
}

/// Render the fixed-layout overview banner.
///
/// Values are HTML-escaped, so they appear verbatim in the rendered page
/// while the raw markup carries entities (`Fast & Furious` becomes
/// `Fast &amp; Furious`).
pub fn render_banner(overview: &MovieOverview) -> String {
    let title = escape_html(overview.title());

    let poster = match overview.poster() {
        Some(url) => format!(
            r#"<div class="movie-poster-container"><img src="{}" alt="{} Poster" class="movie-banner-poster" /></div>"#,
            escape_html(url),
            title
        ),
        None => r#"<div class="movie-poster-container"><div class="movie-banner-poster no-poster"><span>🎬</span></div></div>"#
            .to_string(),
    };

    let plot = overview
        .plot()
        .map(|plot| format!(r#"<p class="movie-plot">{}</p>"#, escape_html(plot)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div class="movie-overview-banner">"#,
            r#"<div class="movie-overview-content">"#,
            r#"<div class="movie-banner-layout">"#,
            "{poster}",
            r#"<div class="movie-info-content">"#,
            r#"<h2 class="movie-title">{title}</h2>"#,
            r#"<div class="movie-rating">{rating}</div>"#,
            r#"<div class="movie-meta-row">"#,
            r#"<span class="meta-badge">{genre}</span>"#,
            r#"<span class="meta-badge">{runtime}</span>"#,
            "</div>",
            r#"<p class="movie-director"><strong>Director:</strong> {director}</p>"#,
            r#"<p class="movie-cast"><strong>Cast:</strong> {cast}</p>"#,
            "{plot}",
            "</div></div></div></div>\n",
        ),
        poster = poster,
        title = title,
        rating = escape_html(overview.rating()),
        genre = escape_html(overview.genre()),
        runtime = escape_html(overview.runtime()),
        director = escape_html(overview.director()),
        cast = escape_html(overview.cast()),
        plot = plot,
    )
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
