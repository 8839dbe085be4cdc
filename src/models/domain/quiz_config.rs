use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::difficulty::{
    is_allowed_question_count, Difficulty, ALLOWED_QUESTION_COUNTS,
};

/// Snapshot of the configuration a quiz was generated with. Never changes
/// while the quiz it belongs to is running.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizConfig {
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: u8,
}

impl QuizConfig {
    pub fn new(topic: &str, difficulty: Difficulty, question_count: u8) -> AppResult<Self> {
        let config = QuizConfig {
            topic: topic.trim().to_string(),
            difficulty,
            question_count,
        };
        config.ensure_valid()?;
        Ok(config)
    }

    pub fn ensure_valid(&self) -> AppResult<()> {
        if self.topic.trim().is_empty() {
            return Err(AppError::ConfigError(
                "Please enter a topic for the quiz.".to_string(),
            ));
        }

        if !is_allowed_question_count(self.question_count) {
            return Err(AppError::ConfigError(format!(
                "Question count must be one of {:?}, got {}",
                ALLOWED_QUESTION_COUNTS, self.question_count
            )));
        }

        Ok(())
    }
}

/// Current values of the configuration inputs. Unlike [`QuizConfig`] these are
/// not validated: the topic may still be empty while the user is typing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizInputs {
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: u8,
}

impl Default for QuizInputs {
    fn default() -> Self {
        QuizInputs {
            topic: String::new(),
            difficulty: Difficulty::default(),
            question_count: ALLOWED_QUESTION_COUNTS[0],
        }
    }
}

impl From<&QuizConfig> for QuizInputs {
    fn from(config: &QuizConfig) -> Self {
        QuizInputs {
            topic: config.topic.clone(),
            difficulty: config.difficulty,
            question_count: config.question_count,
        }
    }
}
