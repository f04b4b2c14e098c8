mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::doc::ApiDoc;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, patch, post};
use log::info;
use migration::{Migrator, MigratorTrait};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let db = database::db::connect(&database_url)
        .await
        .expect("failed to connect to the database");
    Migrator::up(&db, None).await.expect("failed to run migrations");

    let state = AppState { db };

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route(
            "/courses",
            get(routes::course::list_courses).post(routes::course::create_course),
        )
        .route("/courses/{id}", get(routes::course::get_course))
        .route(
            "/sections",
            get(routes::section::list_sections).post(routes::section::create_section),
        )
        .route("/sections/{id}", get(routes::section::get_section))
        .route(
            "/sections/{id}/status",
            patch(routes::section::set_section_status),
        )
        .route("/sections/{id}/grades", post(routes::section::submit_grades))
        .route("/terms/end", post(routes::section::end_term))
        .route("/enrollments", post(routes::enrollment::enroll))
        .route("/enrollments/drop", post(routes::enrollment::disenroll))
        .route("/students/{id}/gpa", get(routes::student::get_gpa))
        .route("/students/{id}/schedule", get(routes::student::get_schedule))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("failed to bind listener");
    info!("Running axum on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .expect("server error");
}
