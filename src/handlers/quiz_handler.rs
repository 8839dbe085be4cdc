use actix_web::{get, http::header, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{QuizConfigInput, SubmitAnswerRequest},
        response::QuizOptionsView,
    },
};

pub const CSV_FILE_NAME: &str = "quiz_results.csv";

#[get("/api/quiz/options")]
async fn quiz_options() -> HttpResponse {
    HttpResponse::Ok().json(QuizOptionsView::default())
}

#[post("/api/sessions")]
async fn create_session(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let session = state.quiz_service.create_session().await?;
    Ok(HttpResponse::Created().json(session))
}

#[get("/api/sessions/{id}")]
async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.quiz_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[actix_web::delete("/api/sessions/{id}")]
async fn delete_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_session(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/api/sessions/{id}/config")]
async fn configure_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<QuizConfigInput>,
) -> Result<HttpResponse, AppError> {
    let session = state
        .quiz_service
        .configure(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/api/sessions/{id}/quiz")]
async fn start_quiz(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<QuizConfigInput>,
) -> Result<HttpResponse, AppError> {
    let session = state
        .quiz_service
        .start_quiz(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(session))
}

#[post("/api/sessions/{id}/answer")]
async fn submit_answer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .submit_answer(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/advance")]
async fn advance(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_service.advance(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/restart")]
async fn restart(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.quiz_service.restart(&id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[get("/api/sessions/{id}/results")]
async fn get_results(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let results = state.quiz_service.results(&id).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/api/sessions/{id}/results.csv")]
async fn download_results_csv(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let csv = state.quiz_service.export_csv(&id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
        ))
        .body(csv))
}

/// Registers every quiz route on an actix `App`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(quiz_options)
        .service(create_session)
        .service(get_session)
        .service(delete_session)
        .service(configure_session)
        .service(start_quiz)
        .service(submit_answer)
        .service(advance)
        .service(restart)
        .service(get_results)
        .service(download_results_csv);
}
