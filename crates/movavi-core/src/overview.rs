//! The movie overview block embedded in backend answers.
//!
//! The backend may prefix its prose with a delimited block of labelled
//! fields:
//!
//! ```text
//! ---MOVIE_OVERVIEW_START---
//! **Title:** Inception (2010)
//! **Rating:** ⭐ 8.8/10
//! ---MOVIE_OVERVIEW_END---
//! Yes, highly recommended.
//! ```
//!
//! Only the first block is honored. Inside it every line is matched against
//! the fixed `**Label:** value` grammar; anything else is skipped.

use regex::Regex;
use std::sync::OnceLock;

pub const OVERVIEW_START: &str = "---MOVIE_OVERVIEW_START---";
pub const OVERVIEW_END: &str = "---MOVIE_OVERVIEW_END---";

/// Marker value the backend uses for a missing poster.
const NO_POSTER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewField {
    Title,
    Poster,
    Rating,
    Genre,
    Runtime,
    Director,
    Cast,
    Plot,
}

impl OverviewField {
    pub fn all() -> [OverviewField; 8] {
        [
            OverviewField::Title,
            OverviewField::Poster,
            OverviewField::Rating,
            OverviewField::Genre,
            OverviewField::Runtime,
            OverviewField::Director,
            OverviewField::Cast,
            OverviewField::Plot,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverviewField::Title => "Title",
            OverviewField::Poster => "Poster",
            OverviewField::Rating => "Rating",
            OverviewField::Genre => "Genre",
            OverviewField::Runtime => "Runtime",
            OverviewField::Director => "Director",
            OverviewField::Cast => "Cast",
            OverviewField::Plot => "Plot",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(label))
    }
}

/// Structured metadata pulled out of an overview block.
///
/// Every field is optional; the accessor methods supply the display
/// fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieOverview {
    pub title: Option<String>,
    pub poster_url: Option<String>,
    pub rating: Option<String>,
    pub genre: Option<String>,
    pub runtime: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub plot: Option<String>,
}

impl MovieOverview {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Movie")
    }

    pub fn rating(&self) -> &str {
        self.rating.as_deref().unwrap_or("No Rating")
    }

    pub fn genre(&self) -> &str {
        self.genre.as_deref().unwrap_or("Unknown Genre")
    }

    pub fn runtime(&self) -> &str {
        self.runtime.as_deref().unwrap_or("Unknown Runtime")
    }

    pub fn director(&self) -> &str {
        self.director.as_deref().unwrap_or("Unknown")
    }

    pub fn cast(&self) -> &str {
        self.cast.as_deref().unwrap_or("Unknown")
    }

    pub fn plot(&self) -> Option<&str> {
        self.plot.as_deref()
    }

    /// Poster URL, unless absent or the `N/A` placeholder.
    pub fn poster(&self) -> Option<&str> {
        self.poster_url
            .as_deref()
            .filter(|url| !url.eq_ignore_ascii_case(NO_POSTER))
    }

    fn slot(&mut self, field: OverviewField) -> &mut Option<String> {
        match field {
            OverviewField::Title => &mut self.title,
            OverviewField::Poster => &mut self.poster_url,
            OverviewField::Rating => &mut self.rating,
            OverviewField::Genre => &mut self.genre,
            OverviewField::Runtime => &mut self.runtime,
            OverviewField::Director => &mut self.director,
            OverviewField::Cast => &mut self.cast,
            OverviewField::Plot => &mut self.plot,
        }
    }

    /// Parse the body of an overview block (the text between the markers).
    pub fn parse(block: &str) -> Self {
        let mut overview = MovieOverview::default();

        for line in block.lines() {
            let Some((field, value)) = parse_field_line(line) else {
                continue;
            };
            let slot = overview.slot(field);
            // First occurrence wins
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }

        overview
    }
}

fn field_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\*\*\s*([A-Za-z]+)\s*:\s*\*\*(.*)$").expect("field line pattern is valid")
    })
}

/// Match one line against `**Label:** value`. Empty values count as absent.
fn parse_field_line(line: &str) -> Option<(OverviewField, &str)> {
    let captures = field_line_pattern().captures(line.trim())?;
    let field = OverviewField::from_label(captures.get(1)?.as_str())?;
    let value = captures.get(2)?.as_str().trim();

    if value.is_empty() {
        None
    } else {
        Some((field, value))
    }
}

/// Split `text` into its first overview block and the remaining prose.
///
/// Returns `None` when there is no start marker or no end marker after it.
/// The remainder is trimmed.
pub fn extract_overview(text: &str) -> Option<(MovieOverview, String)> {
    let start = text.find(OVERVIEW_START)?;
    let body_start = start + OVERVIEW_START.len();
    let body_len = text[body_start..].find(OVERVIEW_END)?;
    let body_end = body_start + body_len;
    let region_end = body_end + OVERVIEW_END.len();

    let overview = MovieOverview::parse(&text[body_start..body_end]);

    let mut remainder = String::with_capacity(text.len() - (region_end - start));
    remainder.push_str(&text[..start]);
    remainder.push_str(&text[region_end..]);

    Some((overview, remainder.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "---MOVIE_OVERVIEW_START---
**Title:** The Dark Knight (2008)
**Poster:** https://example.com/dk.jpg
**Rating:** ⭐ 9.0/10
**Genre:** Action, Crime, Drama
**Runtime:** 152 min
**Director:** Christopher Nolan
**Cast:** Christian Bale, Heath Ledger, Aaron Eckhart
**Plot:** When the menace known as the Joker wreaks havoc...
---MOVIE_OVERVIEW_END---

## Recommendation
Watch it.";

    #[test]
    fn test_extracts_all_fields() {
        let (overview, remainder) = extract_overview(FULL).unwrap();
        assert_eq!(overview.title(), "The Dark Knight (2008)");
        assert_eq!(overview.poster(), Some("https://example.com/dk.jpg"));
        assert_eq!(overview.rating(), "⭐ 9.0/10");
        assert_eq!(overview.genre(), "Action, Crime, Drama");
        assert_eq!(overview.runtime(), "152 min");
        assert_eq!(overview.director(), "Christopher Nolan");
        assert_eq!(overview.cast(), "Christian Bale, Heath Ledger, Aaron Eckhart");
        assert_eq!(
            overview.plot(),
            Some("When the menace known as the Joker wreaks havoc...")
        );
        assert_eq!(remainder, "## Recommendation\nWatch it.");
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let text = "---MOVIE_OVERVIEW_START---\n**Title:** Inception\n---MOVIE_OVERVIEW_END---";
        let (overview, remainder) = extract_overview(text).unwrap();
        assert_eq!(overview.title(), "Inception");
        assert_eq!(overview.rating(), "No Rating");
        assert_eq!(overview.genre(), "Unknown Genre");
        assert_eq!(overview.runtime(), "Unknown Runtime");
        assert_eq!(overview.director(), "Unknown");
        assert_eq!(overview.cast(), "Unknown");
        assert_eq!(overview.plot(), None);
        assert_eq!(overview.poster(), None);
        assert!(remainder.is_empty());
    }

    #[test]
    fn test_placeholder_poster_is_ignored() {
        let overview = MovieOverview::parse("**Poster:** N/A");
        assert_eq!(overview.poster_url.as_deref(), Some("N/A"));
        assert_eq!(overview.poster(), None);
    }

    #[test]
    fn test_fields_in_any_order_and_unknown_lines_skipped() {
        let overview = MovieOverview::parse(
            "some chatter\n**Plot:** Dreams.\n**Budget:** $160M\n  **title:**   Inception  \n",
        );
        assert_eq!(overview.title(), "Inception");
        assert_eq!(overview.plot(), Some("Dreams."));
    }

    #[test]
    fn test_empty_value_does_not_swallow_next_line() {
        let overview = MovieOverview::parse("**Title:**\n**Rating:** 8.8");
        assert_eq!(overview.title, None);
        assert_eq!(overview.rating(), "8.8");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let overview = MovieOverview::parse("**Title:** First\n**Title:** Second");
        assert_eq!(overview.title(), "First");
    }

    #[test]
    fn test_no_markers() {
        assert!(extract_overview("Just a plain answer.").is_none());
    }

    #[test]
    fn test_unterminated_block_is_not_an_overview() {
        assert!(extract_overview("---MOVIE_OVERVIEW_START---\n**Title:** X\nno end").is_none());
    }

    #[test]
    fn test_end_marker_before_start_is_ignored() {
        let text = "---MOVIE_OVERVIEW_END---\n---MOVIE_OVERVIEW_START---\n**Title:** X";
        assert!(extract_overview(text).is_none());
    }

    #[test]
    fn test_only_first_block_is_honored() {
        let text = "---MOVIE_OVERVIEW_START---\n**Title:** One\n---MOVIE_OVERVIEW_END---\n\
                    between\n---MOVIE_OVERVIEW_START---\n**Title:** Two\n---MOVIE_OVERVIEW_END---";
        let (overview, remainder) = extract_overview(text).unwrap();
        assert_eq!(overview.title(), "One");
        assert!(remainder.starts_with("between"));
        assert!(remainder.contains("**Title:** Two"));
    }

    #[test]
    fn test_prose_before_block_is_kept() {
        let text = "Intro line.\n---MOVIE_OVERVIEW_START---\n**Title:** X\n---MOVIE_OVERVIEW_END---\nOutro.";
        let (_, remainder) = extract_overview(text).unwrap();
        assert_eq!(remainder, "Intro line.\n\nOutro.");
    }
}
