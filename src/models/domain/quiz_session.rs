use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{
    answer_record::AnswerRecord, question::Question, quiz_config::QuizConfig,
};

/// State of one quiz attempt, from generation to completion or restart.
///
/// `answers.len() == current_index` while the current question is unanswered,
/// and `answers.len() == current_index + 1` while it is locked.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizSession {
    pub config: QuizConfig,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub current_locked: bool,
    pub answers: Vec<AnswerRecord>,
    pub started: bool,
    pub started_at: DateTime<Utc>,
}

impl QuizSession {
    pub fn new(config: QuizConfig, questions: Vec<Question>) -> Self {
        QuizSession {
            config,
            questions,
            current_index: 0,
            current_locked: false,
            answers: Vec::new(),
            started: true,
            started_at: Utc::now(),
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// The record for the current question, present only while it is locked.
    pub fn current_answer(&self) -> Option<&AnswerRecord> {
        if self.current_locked {
            self.answers.get(self.current_index)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        let total = self.total();
        total > 0 && self.current_index == total && self.answers.len() == total
    }

    /// Fraction of questions moved past, `0.0` for an empty quiz.
    pub fn progress(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.current_index as f64 / total as f64
        }
    }
}
