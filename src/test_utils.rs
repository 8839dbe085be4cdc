#[cfg(test)]
pub mod fixtures {
    use serde_json::json;

    use crate::models::domain::{AnswerRecord, Difficulty, Question, QuizConfig};

    /// The configuration used by most controller tests: Algebra, Easy, 3 questions.
    pub fn sample_config() -> QuizConfig {
        QuizConfig {
            topic: "Algebra".to_string(),
            difficulty: Difficulty::Easy,
            question_count: 3,
        }
    }

    /// `count` questions where option "A{n}" is always the correct one.
    pub fn sample_questions(count: usize) -> Vec<Question> {
        (1..=count)
            .map(|n| Question {
                text: format!("Question {}?", n),
                options: vec![
                    format!("A{}", n),
                    format!("B{}", n),
                    format!("C{}", n),
                    format!("D{}", n),
                ],
                correct_answer: format!("A{}", n),
                explanation: format!("A{} is right.", n),
            })
            .collect()
    }

    /// JSON array matching [`sample_questions`], as the backend would send it.
    pub fn sample_questions_json(count: usize) -> String {
        let items: Vec<serde_json::Value> = sample_questions(count)
            .into_iter()
            .map(|q| {
                json!({
                    "question": q.text,
                    "options": q.options,
                    "answer": q.correct_answer,
                    "explanation": q.explanation,
                })
            })
            .collect();
        serde_json::Value::Array(items).to_string()
    }

    /// A chatty model reply wrapping the JSON array in prose and a code fence.
    pub fn sample_model_reply(count: usize) -> String {
        format!(
            "Sure! Here are your questions:\n```json\n{}\n```\nGood luck!",
            sample_questions_json(count)
        )
    }

    pub fn answer(question: &str, chosen: &str, correct: &str, difficulty: Difficulty) -> AnswerRecord {
        AnswerRecord {
            question_text: question.to_string(),
            chosen_option: chosen.to_string(),
            correct_option: correct.to_string(),
            is_correct: chosen == correct,
            difficulty,
            explanation: format!("{} is the answer.", correct),
            answered_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_questions() {
        let questions = sample_questions(3);
        assert_eq!(questions.len(), 3);
        assert!(questions
            .iter()
            .all(|q| q.options.len() == 4 && q.has_option(&q.correct_answer)));
    }

    #[test]
    fn test_fixtures_sample_model_reply_contains_array() {
        let reply = sample_model_reply(2);
        assert!(reply.contains("[{"));
        assert!(reply.starts_with("Sure!"));
    }

    #[test]
    fn test_fixtures_answer_grades_choice() {
        let record = answer("Q", "x", "y", crate::models::domain::Difficulty::Hard);
        assert!(!record.is_correct);
        assert_eq!(record.correct_option, "y");
    }
}
