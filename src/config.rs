use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_GENERATION_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";

/// How the question generator treats a backend that returns a different number
/// of questions than was asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountPolicy {
    /// The generated list is authoritative; the mismatch is only logged.
    AcceptGenerated,
    /// Any mismatch is a format error.
    RequireExact,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub generation_api_key: Option<SecretString>,
    pub generation_api_base: String,
    pub generation_model: String,
    pub generation_timeout_secs: u64,
    pub count_policy: CountPolicy,
    pub session_idle_minutes: i64,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            generation_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            generation_api_base: env::var("GENERATION_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GENERATION_API_BASE.to_string()),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string()),
            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(60),
            count_policy: env::var("QUIZ_STRICT_QUESTION_COUNT")
                .ok()
                .map(|v| parse_count_policy(&v))
                .unwrap_or(CountPolicy::AcceptGenerated),
            session_idle_minutes: env::var("SESSION_IDLE_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(60),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn has_credential(&self) -> bool {
        self.generation_api_key.is_some()
    }

    /// The generation backend credential, or a user-facing configuration error.
    pub fn credential(&self) -> AppResult<&SecretString> {
        self.generation_api_key.as_ref().ok_or_else(|| {
            AppError::ConfigError(
                "GEMINI_API_KEY not found. Please add it to the environment or .env".to_string(),
            )
        })
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            generation_api_key: Some(SecretString::from("test-api-key".to_string())),
            generation_api_base: "http://127.0.0.1:9".to_string(),
            generation_model: "test-model".to_string(),
            generation_timeout_secs: 5,
            count_policy: CountPolicy::AcceptGenerated,
            session_idle_minutes: 60,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
        }
    }
}

fn parse_count_policy(value: &str) -> CountPolicy {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => CountPolicy::RequireExact,
        _ => CountPolicy::AcceptGenerated,
    }
}
