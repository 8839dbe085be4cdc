use async_graphql::{Context, ErrorExtensions};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Parses a session id passed as a GraphQL `ID`.
pub fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::ValidationError("Invalid UUID format".to_string()))
}

pub fn app_state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AppState> {
    ctx.data::<AppState>()
}

/// Converts a service result into a GraphQL result carrying `code` and
/// `retryable` extensions.
pub fn extend<T>(result: AppResult<T>) -> async_graphql::Result<T> {
    result.map_err(|e| e.extend())
}
