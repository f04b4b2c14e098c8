use sea_orm::{Database, DatabaseConnection, DbErr};

/// Opens a connection pool against the given database URL.
///
/// The URL is read from the environment once at the process entry point
/// and the resulting handle is passed down to the services, so there is
/// exactly one pool per process.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
