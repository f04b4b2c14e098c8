use sea_orm::DatabaseConnection;

/// Shared handles owned by the process entry point and injected into
/// every route. The connection pool is built exactly once, in `main`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
