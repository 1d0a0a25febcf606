//! The remote movie backend that looks up films and writes the reviews.

pub mod movavi;

pub use movavi::MovaviClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Something that can answer a free-text movie question.
#[async_trait]
pub trait MovieBackend: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<MovieAnswer, BackendError>;

    async fn health(&self) -> Result<HealthStatus, BackendError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieQuestion {
    pub user_prompt: String,
}

/// Successful body of `POST /movie`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieAnswer {
    pub ai_response: String,
    #[serde(default)]
    pub movie_data: Option<MovieData>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// OMDB-style record the backend attaches when it recognised a title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub rated: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub actors: Option<String>,
    #[serde(default, rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
}

/// OMDB uses "N/A" for unknown values.
fn known(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty() && *v != "N/A")
}

impl MovieData {
    pub fn heading(&self) -> String {
        let title = known(&self.title).unwrap_or("Unknown");
        match known(&self.year) {
            Some(year) => format!("{} ({})", title, year),
            None => title.to_string(),
        }
    }

    pub fn rating_label(&self) -> String {
        match known(&self.imdb_rating) {
            Some(rating) => format!("⭐ {}/10", rating),
            None => "⭐ No Rating".to_string(),
        }
    }

    pub fn genre(&self) -> &str {
        known(&self.genre).unwrap_or("Unknown")
    }

    pub fn runtime(&self) -> &str {
        known(&self.runtime).unwrap_or("Unknown")
    }

    pub fn rated(&self) -> &str {
        known(&self.rated).unwrap_or("Unrated")
    }

    pub fn director(&self) -> &str {
        known(&self.director).unwrap_or("Unknown")
    }

    pub fn actors(&self) -> &str {
        known(&self.actors).unwrap_or("Unknown")
    }

    pub fn plot(&self) -> Option<&str> {
        known(&self.plot)
    }

    pub fn poster(&self) -> Option<&str> {
        known(&self.poster)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
