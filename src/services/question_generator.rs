use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;

#[cfg(test)]
use mockall::automock;

use crate::{
    config::{Config, CountPolicy},
    constants::{build_quiz_prompt, QUIZ_SYSTEM_PROMPT},
    errors::{AppError, AppResult},
    models::{
        domain::{Difficulty, Question},
        dto::quiz_dto::GeneratedQuestion,
    },
};

// First '[' through last ']', across newlines.
static JSON_ARRAY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("JSON_ARRAY_REGEX is a valid regex pattern"));

/// Black-box text generation backend: prompt in, free text out.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Chat-completions backend reached through an OpenAI-compatible endpoint.
pub struct OpenAiTextGenerator {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTextGenerator {
    /// A missing credential does not fail construction; every `generate` call
    /// reports it as a configuration error instead.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = match config.credential() {
            Ok(api_key) => {
                let http_client = reqwest::Client::builder()
                    .timeout(config.generation_timeout())
                    .build()
                    .map_err(|e| {
                        AppError::InternalError(format!("Failed to build HTTP client: {}", e))
                    })?;

                let openai_config = OpenAIConfig::new()
                    .with_api_base(config.generation_api_base.clone())
                    .with_api_key(api_key.expose_secret());

                Some(Client::with_config(openai_config).with_http_client(http_client))
            }
            Err(e) => {
                log::warn!("Question generation disabled: {}", e);
                None
            }
        };

        Ok(Self {
            client,
            model: config.generation_model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let client = self.client.as_ref().ok_or_else(|| {
            AppError::ConfigError(
                "GEMINI_API_KEY not found. Please add it to the environment or .env".to_string(),
            )
        })?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(QUIZ_SYSTEM_PROMPT)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::GenerationServiceError(
                    "Generation service returned an empty response".to_string(),
                )
            })
    }
}

/// Turns (topic, difficulty, count) into a validated list of questions.
pub struct QuestionGenerator {
    backend: Arc<dyn TextGenerator>,
    timeout: Duration,
    count_policy: CountPolicy,
}

impl QuestionGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>, timeout: Duration, count_policy: CountPolicy) -> Self {
        Self {
            backend,
            timeout,
            count_policy,
        }
    }

    pub fn from_config(backend: Arc<dyn TextGenerator>, config: &Config) -> Self {
        Self::new(backend, config.generation_timeout(), config.count_policy)
    }

    pub async fn fetch_questions(
        &self,
        topic: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> AppResult<Vec<Question>> {
        let prompt = build_quiz_prompt(topic, difficulty, count);

        let raw = tokio::time::timeout(self.timeout, self.backend.generate(&prompt))
            .await
            .map_err(|_| {
                AppError::GenerationServiceError(format!(
                    "Generation service did not respond within {}s",
                    self.timeout.as_secs()
                ))
            })??;

        let questions = parse_questions(&raw)?;

        if questions.len() != count {
            match self.count_policy {
                CountPolicy::AcceptGenerated => log::warn!(
                    "Requested {} questions on '{}' but received {}; using the generated list",
                    count,
                    topic,
                    questions.len()
                ),
                CountPolicy::RequireExact => {
                    return Err(AppError::GenerationFormatError(format!(
                        "expected {} questions, got {}",
                        count,
                        questions.len()
                    )))
                }
            }
        }

        Ok(questions)
    }
}

/// Returns the first bracketed span of `raw`, greedy across newlines.
pub fn extract_json_array(raw: &str) -> AppResult<&str> {
    JSON_ARRAY_REGEX
        .find(raw.trim())
        .map(|m| m.as_str())
        .ok_or_else(|| {
            AppError::GenerationFormatError("No valid JSON found in the response.".to_string())
        })
}

/// Parses and validates a backend reply. Either every element is a valid
/// question or the whole reply is rejected.
pub fn parse_questions(raw: &str) -> AppResult<Vec<Question>> {
    let array = extract_json_array(raw)?;

    let elements: Vec<serde_json::Value> = serde_json::from_str(array)
        .map_err(|e| AppError::GenerationFormatError(format!("invalid JSON array: {}", e)))?;

    if elements.is_empty() {
        return Err(AppError::GenerationFormatError(
            "the response contained no questions".to_string(),
        ));
    }

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let position = index + 1;
            serde_json::from_value::<GeneratedQuestion>(element)
                .map_err(|e| {
                    AppError::GenerationFormatError(format!("question {}: {}", position, e))
                })?
                .into_question(position)
        })
        .collect()
}
