use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{difficulty::Difficulty, question::Question};

/// One line of the answer log. Appended once per answered question.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct AnswerRecord {
    pub question_text: String,
    pub chosen_option: String,
    pub correct_option: String,
    pub is_correct: bool,
    pub difficulty: Difficulty,
    pub explanation: String,
    pub answered_at: DateTime<Utc>,
}

impl AnswerRecord {
    pub fn new(question: &Question, chosen: &str, difficulty: Difficulty) -> Self {
        AnswerRecord {
            question_text: question.text.clone(),
            chosen_option: chosen.to_string(),
            correct_option: question.correct_answer.clone(),
            is_correct: question.is_correct(chosen),
            difficulty,
            explanation: question.explanation.clone(),
            answered_at: Utc::now(),
        }
    }
}
