use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::InMemorySessionRepository,
    services::{
        question_generator::{OpenAiTextGenerator, QuestionGenerator, TextGenerator},
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let backend = Arc::new(OpenAiTextGenerator::from_config(&config)?);
        Ok(Self::with_backend(config, backend))
    }

    /// Wires the state around any generation backend.
    pub fn with_backend(config: Config, backend: Arc<dyn TextGenerator>) -> Self {
        let generator = QuestionGenerator::from_config(backend, &config);
        let session_repository = Arc::new(InMemorySessionRepository::new());
        let quiz_service = Arc::new(QuizService::new(session_repository, generator));

        Self {
            quiz_service,
            config: Arc::new(config),
        }
    }
}
