use async_graphql::InputObject;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::errors::AppError;
use crate::models::domain::{
    difficulty::is_allowed_question_count, Difficulty, QuizConfig, QuizInputs,
};

fn validate_topic(topic: &str) -> Result<(), ValidationError> {
    if topic.trim().is_empty() {
        return Err(ValidationError::new("blank_topic")
            .with_message("Please enter a topic for the quiz.".into()));
    }
    Ok(())
}

fn validate_question_count(count: u8) -> Result<(), ValidationError> {
    if !is_allowed_question_count(count) {
        return Err(ValidationError::new("question_count")
            .with_message("Question count must be one of 3, 5, 10 or 15.".into()));
    }
    Ok(())
}

/// Topic, difficulty and question count as submitted by the configuration screen.
#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct QuizConfigInput {
    #[validate(length(max = 200), custom(function = "validate_topic"))]
    pub topic: String,

    pub difficulty: Difficulty,

    #[validate(custom(function = "validate_question_count"))]
    pub question_count: u8,
}

impl TryFrom<QuizConfigInput> for QuizConfig {
    type Error = AppError;

    fn try_from(input: QuizConfigInput) -> Result<Self, Self::Error> {
        input.validate()?;
        QuizConfig::new(&input.topic, input.difficulty, input.question_count)
    }
}

impl From<QuizConfigInput> for QuizInputs {
    fn from(input: QuizConfigInput) -> Self {
        QuizInputs {
            topic: input.topic,
            difficulty: input.difficulty,
            question_count: input.question_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 1000))]
    pub choice: String,
}
