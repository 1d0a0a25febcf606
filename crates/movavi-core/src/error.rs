use thiserror::Error;

/// Failures on the request path to the movie backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The in-flight request task ended without producing an answer.
    #[error("request interrupted: {0}")]
    Interrupted(String),
}

impl BackendError {
    pub fn status(code: u16, reason: impl Into<String>) -> Self {
        BackendError::Status {
            code,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_carries_code_and_reason() {
        let err = BackendError::status(500, "Internal Server Error");
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }
}
