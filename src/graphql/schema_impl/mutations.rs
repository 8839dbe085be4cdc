use async_graphql::{Context, Object, ID};

use crate::{
    graphql::helpers::{app_state, extend, parse_id},
    models::dto::{
        request::{QuizConfigInput, SubmitAnswerRequest},
        response::{SessionView, TransitionResponse},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_session(&self, ctx: &Context<'_>) -> async_graphql::Result<SessionView> {
        let state = app_state(ctx)?;
        extend(state.quiz_service.create_session().await)
    }

    async fn configure(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: QuizConfigInput,
    ) -> async_graphql::Result<SessionView> {
        let state = app_state(ctx)?;
        let id = extend(parse_id(&id))?;
        extend(state.quiz_service.configure(&id, input).await)
    }

    async fn start_quiz(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: QuizConfigInput,
    ) -> async_graphql::Result<SessionView> {
        let state = app_state(ctx)?;
        let id = extend(parse_id(&id))?;
        extend(state.quiz_service.start_quiz(&id, input).await)
    }

    async fn submit_answer(
        &self,
        ctx: &Context<'_>,
        id: ID,
        choice: String,
    ) -> async_graphql::Result<TransitionResponse> {
        let state = app_state(ctx)?;
        let id = extend(parse_id(&id))?;
        extend(
            state
                .quiz_service
                .submit_answer(&id, SubmitAnswerRequest { choice })
                .await,
        )
    }

    async fn advance(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<TransitionResponse> {
        let state = app_state(ctx)?;
        let id = extend(parse_id(&id))?;
        extend(state.quiz_service.advance(&id).await)
    }

    async fn restart(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<SessionView> {
        let state = app_state(ctx)?;
        let id = extend(parse_id(&id))?;
        extend(state.quiz_service.restart(&id).await)
    }
}
