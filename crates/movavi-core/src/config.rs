use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PRODUCTION_URL: &str = "https://web-production-0b3e.up.railway.app";
const LOCAL_URL: &str = "http://localhost:8000";

/// Variable that overrides the environment for one run.
pub const ENV_VAR: &str = "MOVAVI_ENV";

/// Which of the two fixed backends to talk to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Local,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_URL,
            Environment::Local => LOCAL_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Local => "local",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Some(Environment::Production),
            "local" | "dev" | "development" => Some(Environment::Local),
            _ => None,
        }
    }

    /// Debug builds talk to the local backend, release builds to production.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Environment::Local
        } else {
            Environment::Production
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub environment: Option<Environment>,
    pub log_filter: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    /// Resolve the environment: `MOVAVI_ENV`, then the config file, then the
    /// build profile.
    pub fn environment(&self) -> Environment {
        self.resolve_environment(std::env::var(ENV_VAR).ok().as_deref())
    }

    fn resolve_environment(&self, env_override: Option<&str>) -> Environment {
        if let Some(value) = env_override {
            match Environment::from_str(value) {
                Some(env) => return env,
                None => tracing::warn!(value, "ignoring unknown {}", ENV_VAR),
            }
        }
        self.environment.unwrap_or_else(Environment::from_build)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or("info")
    }

    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("movavi"))
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }
}
