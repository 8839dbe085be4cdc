use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AnswerRecord, Question, QuizConfig, QuizInputs, QuizSession},
    services::question_generator::QuestionGenerator,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
pub enum QuizPhase {
    Idle,
    Configuring,
    InProgress,
    Completed,
}

/// Result of a transition whose precondition may not hold. Ignored
/// transitions leave the controller untouched and are not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

/// Owns one user's quiz state and performs every transition on it.
#[derive(Clone, Debug)]
pub struct QuizController {
    pub id: Uuid,
    phase: QuizPhase,
    inputs: Option<QuizInputs>,
    session: Option<QuizSession>,
    last_active: DateTime<Utc>,
}

impl QuizController {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: QuizPhase::Idle,
            inputs: None,
            session: None,
            last_active: Utc::now(),
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn inputs(&self) -> Option<&QuizInputs> {
        self.inputs.as_ref()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        self.session
            .as_ref()
            .map(|s| s.answers.as_slice())
            .unwrap_or(&[])
    }

    /// Display progress; `0.0` when there is no quiz or it has no questions.
    pub fn progress(&self) -> f64 {
        self.session.as_ref().map(QuizSession::progress).unwrap_or(0.0)
    }

    /// Records the configuration inputs. Does not touch a running quiz.
    pub fn configure(&mut self, inputs: QuizInputs) {
        self.inputs = Some(inputs);
        if self.phase == QuizPhase::Idle {
            self.phase = QuizPhase::Configuring;
        }
        self.touch();
    }

    /// Generates questions for `config` and, only if that succeeds, replaces
    /// any existing session with a fresh one.
    pub async fn start_quiz(
        &mut self,
        config: QuizConfig,
        generator: &QuestionGenerator,
    ) -> AppResult<()> {
        config.ensure_valid()?;
        self.configure(QuizInputs::from(&config));

        let questions = generator
            .fetch_questions(
                &config.topic,
                config.difficulty,
                config.question_count as usize,
            )
            .await?;

        // The generated list is authoritative; the snapshot records its length.
        let mut config = config;
        config.question_count = u8::try_from(questions.len()).map_err(|_| {
            AppError::GenerationFormatError(format!(
                "too many questions returned: {}",
                questions.len()
            ))
        })?;

        self.install(config, questions);
        Ok(())
    }

    fn install(&mut self, config: QuizConfig, questions: Vec<Question>) {
        log::info!(
            "Session {} started a {} quiz on '{}' with {} questions",
            self.id,
            config.difficulty,
            config.topic,
            questions.len()
        );
        self.session = Some(QuizSession::new(config, questions));
        self.phase = QuizPhase::InProgress;
        self.touch();
    }

    /// Grades `choice` against the current question and locks it. A second
    /// submission before `advance` is ignored.
    pub fn submit_answer(&mut self, choice: &str) -> Transition {
        if self.phase != QuizPhase::InProgress {
            log::debug!("Session {}: submit ignored in phase {:?}", self.id, self.phase);
            return Transition::Ignored;
        }

        let Some(session) = self.session.as_mut() else {
            return Transition::Ignored;
        };

        if session.current_locked {
            log::debug!("Session {}: submit ignored, question already answered", self.id);
            return Transition::Ignored;
        }

        let Some(question) = session.questions.get(session.current_index) else {
            return Transition::Ignored;
        };

        let record = AnswerRecord::new(question, choice, session.config.difficulty);
        session.answers.push(record);
        session.current_locked = true;
        self.touch();
        Transition::Applied
    }

    /// Moves past a locked question, completing the quiz after the last one.
    pub fn advance(&mut self) -> Transition {
        if self.phase != QuizPhase::InProgress {
            log::debug!("Session {}: advance ignored in phase {:?}", self.id, self.phase);
            return Transition::Ignored;
        }

        let Some(session) = self.session.as_mut() else {
            return Transition::Ignored;
        };

        if !session.current_locked {
            log::debug!("Session {}: advance ignored, question not answered", self.id);
            return Transition::Ignored;
        }

        session.current_index += 1;
        session.current_locked = false;
        if session.is_complete() {
            session.started = false;
            self.phase = QuizPhase::Completed;
            log::info!(
                "Session {} completed its quiz with {}/{} correct",
                self.id,
                session.answers.iter().filter(|a| a.is_correct).count(),
                session.total()
            );
        }
        self.touch();
        Transition::Applied
    }

    /// Drops the current quiz entirely. Configuration inputs are kept.
    pub fn restart(&mut self) {
        log::info!("Session {} restarted", self.id);
        self.session = None;
        self.phase = QuizPhase::Idle;
        self.touch();
    }

    fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

impl Default for QuizController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::{
        config::CountPolicy,
        models::domain::Difficulty,
        services::question_generator::MockTextGenerator,
        test_utils::fixtures::{sample_config, sample_questions, sample_questions_json},
    };

    fn generator_returning(count: usize) -> QuestionGenerator {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .returning(move |_| Ok(sample_questions_json(count)));
        QuestionGenerator::new(Arc::new(mock), Duration::from_secs(5), CountPolicy::AcceptGenerated)
    }

    fn failing_generator(error: AppError) -> QuestionGenerator {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(move |_| Err(error.clone()));
        QuestionGenerator::new(Arc::new(mock), Duration::from_secs(5), CountPolicy::AcceptGenerated)
    }

    fn in_progress(count: usize) -> QuizController {
        let mut controller = QuizController::new();
        let mut config = sample_config();
        config.question_count = count as u8;
        controller.install(config, sample_questions(count));
        controller
    }

    fn assert_lock_invariant(controller: &QuizController) {
        let session = controller.session().expect("session should exist");
        let expected = session.current_index + usize::from(session.current_locked);
        assert_eq!(session.answers.len(), expected);
    }

    #[test]
    fn new_controller_is_idle() {
        let controller = QuizController::new();

        assert_eq!(controller.phase(), QuizPhase::Idle);
        assert!(controller.session().is_none());
        assert!(controller.answers().is_empty());
        assert_eq!(controller.progress(), 0.0);
    }

    #[test]
    fn configure_moves_idle_to_configuring() {
        let mut controller = QuizController::new();
        controller.configure(QuizInputs::default());

        assert_eq!(controller.phase(), QuizPhase::Configuring);
        assert!(controller.inputs().is_some());
    }

    #[tokio::test]
    async fn start_quiz_creates_fresh_session() {
        let mut controller = QuizController::new();

        controller
            .start_quiz(sample_config(), &generator_returning(3))
            .await
            .expect("start should succeed");

        let session = controller.session().expect("session should exist");
        assert_eq!(controller.phase(), QuizPhase::InProgress);
        assert_eq!(session.current_index, 0);
        assert!(!session.current_locked);
        assert!(session.answers.is_empty());
        assert!(session.started);
        assert_eq!(session.total(), 3);
    }

    #[tokio::test]
    async fn start_quiz_with_blank_topic_changes_nothing() {
        let mut controller = QuizController::new();
        let mut config = sample_config();
        config.topic = "   ".to_string();

        let result = controller.start_quiz(config, &generator_returning(3)).await;

        assert!(matches!(result, Err(AppError::ConfigError(_))));
        assert_eq!(controller.phase(), QuizPhase::Idle);
        assert!(controller.inputs().is_none());
        assert!(controller.session().is_none());
    }

    #[tokio::test]
    async fn failed_generation_creates_no_session() {
        let mut controller = QuizController::new();

        let result = controller
            .start_quiz(
                sample_config(),
                &failing_generator(AppError::GenerationServiceError("down".into())),
            )
            .await;

        assert!(matches!(result, Err(AppError::GenerationServiceError(_))));
        assert_eq!(controller.phase(), QuizPhase::Configuring);
        assert!(controller.session().is_none());
    }

    #[tokio::test]
    async fn failed_regeneration_keeps_running_quiz() {
        let mut controller = in_progress(3);
        controller.submit_answer("A1");
        let before = controller.session().cloned();

        let result = controller
            .start_quiz(
                sample_config(),
                &failing_generator(AppError::GenerationFormatError("bad".into())),
            )
            .await;

        assert!(matches!(result, Err(AppError::GenerationFormatError(_))));
        assert_eq!(controller.phase(), QuizPhase::InProgress);
        assert_eq!(controller.session().cloned(), before);
    }

    #[tokio::test]
    async fn regeneration_mid_quiz_replaces_session() {
        let mut controller = in_progress(3);
        controller.submit_answer("A1");
        controller.advance();

        let mut config = sample_config();
        config.question_count = 5;
        controller
            .start_quiz(config, &generator_returning(5))
            .await
            .expect("start should succeed");

        let session = controller.session().unwrap();
        assert_eq!(session.total(), 5);
        assert_eq!(session.current_index, 0);
        assert!(session.answers.is_empty());
    }

    #[test]
    fn submit_records_exact_match_and_locks() {
        let mut controller = in_progress(3);

        assert_eq!(controller.submit_answer("a1"), Transition::Applied);

        let session = controller.session().unwrap();
        assert!(session.current_locked);
        assert_eq!(session.answers.len(), 1);
        assert!(!session.answers[0].is_correct);
        assert_eq!(session.answers[0].correct_option, "A1");
        assert_eq!(session.answers[0].difficulty, Difficulty::Easy);
        assert_lock_invariant(&controller);
    }

    #[test]
    fn second_submit_before_advance_is_ignored() {
        let mut controller = in_progress(3);

        assert_eq!(controller.submit_answer("B1"), Transition::Applied);
        assert_eq!(controller.submit_answer("A1"), Transition::Ignored);

        let answers = controller.answers();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].chosen_option, "B1");
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut controller = in_progress(3);

        assert_eq!(controller.advance(), Transition::Ignored);
        assert_eq!(controller.session().unwrap().current_index, 0);
    }

    #[test]
    fn advance_unlocks_next_question() {
        let mut controller = in_progress(3);
        controller.submit_answer("A1");

        assert_eq!(controller.advance(), Transition::Applied);

        let session = controller.session().unwrap();
        assert_eq!(session.current_index, 1);
        assert!(!session.current_locked);
        assert_lock_invariant(&controller);
        assert!((controller.progress() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn answering_every_question_completes_quiz() {
        let mut controller = in_progress(3);

        for n in 1..=3 {
            controller.submit_answer(&format!("A{}", n));
            assert_lock_invariant(&controller);
            controller.advance();
        }

        let session = controller.session().unwrap();
        assert_eq!(controller.phase(), QuizPhase::Completed);
        assert!(session.is_complete());
        assert!(!session.started);
        assert!(!session.current_locked);
        assert_eq!(session.answers.len(), session.total());
        assert_eq!(controller.progress(), 1.0);
    }

    #[test]
    fn transitions_after_completion_are_ignored() {
        let mut controller = in_progress(1);
        controller.submit_answer("A1");
        controller.advance();

        assert_eq!(controller.submit_answer("B1"), Transition::Ignored);
        assert_eq!(controller.advance(), Transition::Ignored);
        assert_eq!(controller.answers().len(), 1);
    }

    #[test]
    fn transitions_while_idle_are_ignored() {
        let mut controller = QuizController::new();

        assert_eq!(controller.submit_answer("A1"), Transition::Ignored);
        assert_eq!(controller.advance(), Transition::Ignored);
        assert_eq!(controller.phase(), QuizPhase::Idle);
    }

    #[tokio::test]
    async fn restart_clears_session_but_keeps_inputs() {
        let mut controller = QuizController::new();
        controller
            .start_quiz(sample_config(), &generator_returning(3))
            .await
            .unwrap();
        for n in 1..=3 {
            controller.submit_answer(&format!("A{}", n));
            controller.advance();
        }

        controller.restart();

        assert_eq!(controller.phase(), QuizPhase::Idle);
        assert!(controller.session().is_none());
        assert!(controller.answers().is_empty());
        assert_eq!(
            controller.inputs().map(|i| i.topic.as_str()),
            Some("Algebra")
        );
    }

    #[tokio::test]
    async fn quiz_after_restart_shares_nothing_with_previous() {
        let mut controller = QuizController::new();
        controller
            .start_quiz(sample_config(), &generator_returning(3))
            .await
            .unwrap();
        controller.submit_answer("A1");
        controller.restart();

        let config = QuizConfig::new("Geometry", Difficulty::Hard, 5).unwrap();
        controller
            .start_quiz(config, &generator_returning(5))
            .await
            .unwrap();

        let session = controller.session().unwrap();
        assert_eq!(session.config.topic, "Geometry");
        assert!(session.answers.is_empty());
        assert_eq!(session.current_index, 0);
        assert_eq!(session.total(), 5);
    }

    #[tokio::test]
    async fn shorter_generated_list_sets_session_count() {
        let mut controller = QuizController::new();
        let mut config = sample_config();
        config.question_count = 5;

        controller
            .start_quiz(config, &generator_returning(2))
            .await
            .expect("shorter list should be accepted");

        let session = controller.session().unwrap();
        assert_eq!(session.total(), 2);
        assert_eq!(session.config.question_count, 2);
        assert_eq!(controller.inputs().map(|i| i.question_count), Some(5));

        for n in 1..=2 {
            controller.submit_answer(&format!("A{}", n));
            controller.advance();
        }
        assert_eq!(controller.phase(), QuizPhase::Completed);
    }
}
