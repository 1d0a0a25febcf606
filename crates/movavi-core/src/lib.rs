pub mod backend;
pub mod config;
pub mod error;
pub mod format;
pub mod navigation;
pub mod overview;
pub mod session;
pub mod state;

// Re-export main types for convenience
pub use backend::{HealthStatus, MovaviClient, MovieAnswer, MovieBackend, MovieData};
pub use config::{Config, Environment};
pub use error::BackendError;
pub use format::{format_response, render_banner, render_markdown, FormattedResponse};
pub use navigation::{NavigationState, Page};
pub use overview::{extract_overview, MovieOverview};
pub use session::{ChatSession, EXAMPLE_PROMPTS};
pub use state::{ChatMessage, ChatRole, MessageBody, SubmitControl};
