use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::domain::{
        AnswerRecord, Difficulty, QuizConfig, QuizInputs, ALLOWED_QUESTION_COUNTS,
    },
    services::{
        quiz_controller::{QuizController, QuizPhase, Transition},
        results_service::{QuestionOutcome, QuizSummary, ResultsService},
    },
};

/// The question as shown before it is answered; the correct answer is withheld.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<String>,
}

/// Feedback shown once the current question is locked.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AnswerFeedback {
    pub chosen: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

/// Everything a screen needs to render one session.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SessionView {
    pub id: String,
    pub phase: QuizPhase,
    pub inputs: Option<QuizInputs>,
    pub config: Option<QuizConfig>,
    pub current_question: Option<QuestionView>,
    /// 1-based number of the current question.
    pub question_number: Option<usize>,
    pub total: usize,
    pub progress: f64,
    pub locked: bool,
    pub feedback: Option<AnswerFeedback>,
    pub history: Vec<QuestionOutcome>,
    pub started_at: Option<DateTime<Utc>>,
}

impl From<&QuizController> for SessionView {
    fn from(controller: &QuizController) -> Self {
        let session = controller.session();
        let current = session.and_then(|s| s.current_question());

        SessionView {
            id: controller.id.to_string(),
            phase: controller.phase(),
            inputs: controller.inputs().cloned(),
            config: session.map(|s| s.config.clone()),
            current_question: current.map(|q| QuestionView {
                text: q.text.clone(),
                options: q.options.clone(),
            }),
            question_number: current.and(session.map(|s| s.current_index + 1)),
            total: session.map(|s| s.total()).unwrap_or(0),
            progress: controller.progress(),
            locked: session.map(|s| s.current_locked).unwrap_or(false),
            feedback: session.and_then(|s| s.current_answer()).map(|record| AnswerFeedback {
                chosen: record.chosen_option.clone(),
                is_correct: record.is_correct,
                correct_answer: record.correct_option.clone(),
                explanation: record.explanation.clone(),
            }),
            history: ResultsService::breakdown(controller.answers()),
            started_at: session.map(|s| s.started_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct TransitionResponse {
    /// False when the transition's precondition did not hold and nothing changed.
    pub applied: bool,
    pub session: SessionView,
}

impl TransitionResponse {
    pub fn new(transition: Transition, controller: &QuizController) -> Self {
        Self {
            applied: transition == Transition::Applied,
            session: SessionView::from(controller),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct DifficultyAccuracy {
    pub difficulty: Difficulty,
    pub accuracy: f64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ResultsView {
    pub score: usize,
    pub total: usize,
    pub accuracy_by_difficulty: Vec<DifficultyAccuracy>,
    pub breakdown: Vec<QuestionOutcome>,
    pub answers: Vec<AnswerRecord>,
}

impl ResultsView {
    pub fn new(summary: QuizSummary, answers: &[AnswerRecord]) -> Self {
        ResultsView {
            score: summary.score,
            total: summary.total,
            accuracy_by_difficulty: summary
                .accuracy_by_difficulty
                .into_iter()
                .map(|(difficulty, accuracy)| DifficultyAccuracy {
                    difficulty,
                    accuracy,
                })
                .collect(),
            breakdown: ResultsService::breakdown(answers),
            answers: answers.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizOptionsView {
    pub difficulties: Vec<Difficulty>,
    pub question_counts: Vec<u8>,
}

impl Default for QuizOptionsView {
    fn default() -> Self {
        Self {
            difficulties: Difficulty::ALL.to_vec(),
            question_counts: ALLOWED_QUESTION_COUNTS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::answer;

    #[test]
    fn idle_session_view_is_empty() {
        let view = SessionView::from(&QuizController::new());

        assert_eq!(view.phase, QuizPhase::Idle);
        assert!(view.current_question.is_none());
        assert!(view.question_number.is_none());
        assert_eq!(view.total, 0);
        assert_eq!(view.progress, 0.0);
        assert!(view.feedback.is_none());
        assert!(view.history.is_empty());
    }

    #[test]
    fn results_view_flattens_accuracy_map() {
        let answers = vec![
            answer("q1", "a", "a", Difficulty::Hard),
            answer("q2", "b", "a", Difficulty::Easy),
        ];

        let view = ResultsView::new(ResultsService::summarize(&answers), &answers);

        assert_eq!(view.score, 1);
        assert_eq!(view.total, 2);
        let difficulties: Vec<Difficulty> = view
            .accuracy_by_difficulty
            .iter()
            .map(|a| a.difficulty)
            .collect();
        assert_eq!(difficulties, vec![Difficulty::Easy, Difficulty::Hard]);
        assert_eq!(view.breakdown.len(), 2);
        assert_eq!(view.answers.len(), 2);
    }

    #[test]
    fn quiz_options_list_offered_choices() {
        let options = QuizOptionsView::default();

        assert_eq!(options.question_counts, vec![3, 5, 10, 15]);
        assert_eq!(options.difficulties.len(), 3);
    }
}
