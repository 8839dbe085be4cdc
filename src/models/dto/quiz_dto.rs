use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{Question, OPTIONS_PER_QUESTION};

/// One element of the JSON array the generation backend is asked to return.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedQuestion {
    /// The question text.
    pub question: String,
    /// Exactly four answer options.
    pub options: Vec<String>,
    /// The correct option, copied verbatim from `options`.
    pub answer: String,
    /// A short explanation of why the answer is correct.
    pub explanation: String,
}

impl GeneratedQuestion {
    /// Checks the element and turns it into a domain question. `position` is
    /// 1-based and only used in error messages.
    pub fn into_question(self, position: usize) -> AppResult<Question> {
        let invalid =
            |reason: String| AppError::GenerationFormatError(format!("question {}: {}", position, reason));

        if self.question.trim().is_empty() {
            return Err(invalid("empty question text".to_string()));
        }

        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(invalid(format!(
                "expected {} options, got {}",
                OPTIONS_PER_QUESTION,
                self.options.len()
            )));
        }

        if self.options.iter().any(|option| option.trim().is_empty()) {
            return Err(invalid("empty option text".to_string()));
        }

        let distinct: HashSet<&str> = self.options.iter().map(String::as_str).collect();
        if distinct.len() != self.options.len() {
            return Err(invalid("options are not distinct".to_string()));
        }

        if !self.options.iter().any(|option| *option == self.answer) {
            return Err(invalid(format!(
                "answer '{}' is not one of the options",
                self.answer
            )));
        }

        Ok(Question {
            text: self.question,
            options: self.options,
            correct_answer: self.answer,
            explanation: self.explanation,
        })
    }
}
