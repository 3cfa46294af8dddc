pub mod audit;
pub mod reglementation;
pub mod users;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

/// Initialise le pool de connexions PostgreSQL
pub async fn init_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

/// Applique les migrations embarquées dans le binaire
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Code SQLSTATE d'une erreur renvoyée par PostgreSQL
fn sqlstate(error: &sqlx::Error) -> Option<String> {
    error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .map(|code| code.into_owned())
}

/// Violation de clé étrangère (réglementation inexistante, ...)
pub fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    sqlstate(error).as_deref() == Some("23503")
}

/// Violation de contrainte d'unicité (email déjà utilisé, ...)
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    sqlstate(error).as_deref() == Some("23505")
}
