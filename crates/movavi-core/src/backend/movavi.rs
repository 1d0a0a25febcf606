use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::{HealthStatus, MovieAnswer, MovieBackend, MovieQuestion};
use crate::error::BackendError;

/// HTTP client for the Movavi review API.
#[derive(Clone)]
pub struct MovaviClient {
    client: Client,
    base_url: String,
}

impl MovaviClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
            ));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MovieBackend for MovaviClient {
    async fn ask(&self, prompt: &str) -> Result<MovieAnswer, BackendError> {
        let url = format!("{}/movie", self.base_url);
        let request = MovieQuestion {
            user_prompt: prompt.to_string(),
        };

        tracing::debug!(%url, "sending movie question");
        let response = self.client.post(&url).json(&request).send().await?;

        let answer: MovieAnswer = Self::decode(response).await?;
        tracing::info!(
            model = answer.model.as_deref().unwrap_or("unknown"),
            has_movie_data = answer.movie_data.is_some(),
            "received movie answer"
        );
        Ok(answer)
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }
}
