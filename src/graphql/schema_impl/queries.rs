use async_graphql::{Context, Object, ID};

use crate::{
    graphql::helpers::{app_state, extend, parse_id},
    models::dto::response::{QuizOptionsView, ResultsView, SessionView},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn session(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<SessionView> {
        let state = app_state(ctx)?;
        let id = extend(parse_id(&id))?;
        extend(state.quiz_service.get_session(&id).await)
    }

    /// Available only once the session's quiz is completed.
    async fn results(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<ResultsView> {
        let state = app_state(ctx)?;
        let id = extend(parse_id(&id))?;
        extend(state.quiz_service.results(&id).await)
    }

    async fn quiz_options(&self) -> QuizOptionsView {
        QuizOptionsView::default()
    }
}
