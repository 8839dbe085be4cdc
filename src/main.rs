use std::time::Duration;

use actix_cors::Cors;
use actix_web::{get, middleware::Logger, post, web, App, HttpResponse, HttpServer, Responder};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use quizgen_server::{
    app_state::AppState,
    config::Config,
    graphql::{create_schema, Schema},
    handlers::{configure_routes, health_check},
};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[post("/graphql")]
async fn graphql_handler(schema: web::Data<Schema>, request: GraphQLRequest) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

#[get("/graphiql")]
async fn graphiql() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

fn build_cors(config: &Config) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    match &config.cors_allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

fn spawn_idle_session_purge(state: AppState) {
    let idle = chrono::Duration::minutes(state.config.session_idle_minutes);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let cutoff = chrono::Utc::now() - idle;
            if let Err(e) = state.quiz_service.purge_idle(cutoff).await {
                log::error!("Failed to purge idle sessions: {}", e);
            }
        }
    });
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if !config.has_credential() {
        log::error!("GEMINI_API_KEY not found. Quiz generation will fail until it is set.");
    }

    let app_state = AppState::new(config.clone())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let schema = create_schema(app_state.clone());

    spawn_idle_session_purge(app_state.clone());

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    log::info!("Starting HTTP server on {}:{}", host, port);
    log::info!("GraphiQL playground: http://{}:{}/graphiql", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(build_cors(&config))
            .wrap(Logger::default())
            .service(health_check)
            .configure(configure_routes)
            .service(graphql_handler)
            .service(graphiql)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
