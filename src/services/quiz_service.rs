use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{QuizConfig, QuizInputs},
        dto::{
            request::{QuizConfigInput, SubmitAnswerRequest},
            response::{ResultsView, SessionView, TransitionResponse},
        },
    },
    repositories::{SessionHandle, SessionRepository},
    services::{
        question_generator::QuestionGenerator,
        quiz_controller::{QuizController, QuizPhase},
        results_service::ResultsService,
    },
};

/// Routes every operation to the controller owned by the given session id.
/// Each operation holds that session's lock from start to finish, so
/// transitions on one session never interleave.
pub struct QuizService {
    repository: Arc<dyn SessionRepository>,
    generator: QuestionGenerator,
}

impl QuizService {
    pub fn new(repository: Arc<dyn SessionRepository>, generator: QuestionGenerator) -> Self {
        Self {
            repository,
            generator,
        }
    }

    async fn handle(&self, id: &Uuid) -> AppResult<SessionHandle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", id)))
    }

    pub async fn create_session(&self) -> AppResult<SessionView> {
        let handle = self.repository.create(QuizController::new()).await?;
        let controller = handle.lock().await;
        log::info!("Created quiz session {}", controller.id);
        Ok(SessionView::from(&*controller))
    }

    pub async fn get_session(&self, id: &Uuid) -> AppResult<SessionView> {
        let handle = self.handle(id).await?;
        let controller = handle.lock().await;
        Ok(SessionView::from(&*controller))
    }

    /// Stores the configuration screen's inputs without validating them.
    pub async fn configure(&self, id: &Uuid, input: QuizConfigInput) -> AppResult<SessionView> {
        let handle = self.handle(id).await?;
        let mut controller = handle.lock().await;
        controller.configure(QuizInputs::from(input));
        Ok(SessionView::from(&*controller))
    }

    /// Validates the inputs and generates a new quiz. The session stays locked
    /// while the backend is called. On any failure the previous quiz, if there
    /// was one, is left in place.
    pub async fn start_quiz(&self, id: &Uuid, input: QuizConfigInput) -> AppResult<SessionView> {
        let config = QuizConfig::try_from(input)?;
        let handle = self.handle(id).await?;
        let mut controller = handle.lock().await;

        match controller.start_quiz(config, &self.generator).await {
            Ok(()) => Ok(SessionView::from(&*controller)),
            Err(err) => {
                log::error!("Session {}: quiz generation failed: {}", id, err);
                Err(err)
            }
        }
    }

    pub async fn submit_answer(
        &self,
        id: &Uuid,
        request: SubmitAnswerRequest,
    ) -> AppResult<TransitionResponse> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        let handle = self.handle(id).await?;
        let mut controller = handle.lock().await;

        if let Some(session) = controller.session() {
            let awaiting_answer =
                controller.phase() == QuizPhase::InProgress && !session.current_locked;
            if let Some(question) = session.current_question().filter(|_| awaiting_answer) {
                if !question.has_option(&request.choice) {
                    return Err(AppError::ValidationError(format!(
                        "'{}' is not one of the options for this question",
                        request.choice
                    )));
                }
            }
        }

        let transition = controller.submit_answer(&request.choice);
        Ok(TransitionResponse::new(transition, &controller))
    }

    pub async fn advance(&self, id: &Uuid) -> AppResult<TransitionResponse> {
        let handle = self.handle(id).await?;
        let mut controller = handle.lock().await;
        let transition = controller.advance();
        Ok(TransitionResponse::new(transition, &controller))
    }

    pub async fn restart(&self, id: &Uuid) -> AppResult<SessionView> {
        let handle = self.handle(id).await?;
        let mut controller = handle.lock().await;
        controller.restart();
        Ok(SessionView::from(&*controller))
    }

    pub async fn results(&self, id: &Uuid) -> AppResult<ResultsView> {
        let handle = self.handle(id).await?;
        let controller = handle.lock().await;
        ensure_completed(&controller)?;
        let answers = controller.answers();
        Ok(ResultsView::new(ResultsService::summarize(answers), answers))
    }

    pub async fn export_csv(&self, id: &Uuid) -> AppResult<String> {
        let handle = self.handle(id).await?;
        let controller = handle.lock().await;
        ensure_completed(&controller)?;
        ResultsService::to_csv(controller.answers())
    }

    pub async fn delete_session(&self, id: &Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("Deleted quiz session {}", id);
        Ok(())
    }

    pub async fn purge_idle(&self, cutoff: DateTime<Utc>) -> AppResult<usize> {
        let purged = self.repository.purge_idle(cutoff).await?;
        if purged > 0 {
            log::info!("Purged {} idle quiz sessions", purged);
        }
        Ok(purged)
    }
}

fn ensure_completed(controller: &QuizController) -> AppResult<()> {
    if controller.phase() != QuizPhase::Completed {
        return Err(AppError::ValidationError(
            "Results are only available once the quiz is completed".to_string(),
        ));
    }
    Ok(())
}
