use serde::{Deserialize, Serialize};

pub const OPTIONS_PER_QUESTION: usize = 4;

/// A validated multiple-choice question. Built only from parsed generator
/// output and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl Question {
    /// Exact string comparison; no trimming or case folding.
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }

    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|option| option == choice)
    }
}
