use sqlx::{PgExecutor, PgPool};

use crate::models::user::User;

const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, role, is_active, created_at";

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)");
    sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Charge un utilisateur en verrouillant sa ligne jusqu'à la fin de la transaction
pub async fn find_by_id_for_update<'e, E>(
    executor: E,
    id: i32,
) -> Result<Option<User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
    sqlx::query_as::<_, User>(&sql).fetch_all(pool).await
}

/// Nouvel utilisateur à insérer
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: &'a str,
}

pub async fn create(pool: &PgPool, user: &NewUser<'_>) -> Result<User, sqlx::Error> {
    let sql = format!(
        "INSERT INTO users (email, password_hash, first_name, last_name, role) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.role)
        .fetch_one(pool)
        .await
}

/// Enregistre l'état complet d'un utilisateur déjà chargé puis modifié
pub async fn save<'e, E>(executor: E, user: &User) -> Result<User, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        "UPDATE users SET email = $2, password_hash = $3, first_name = $4, last_name = $5, \
         role = $6, is_active = $7 WHERE id = $1 RETURNING {USER_COLUMNS}"
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.role)
        .bind(user.is_active)
        .fetch_one(executor)
        .await
}

pub async fn delete<'e, E>(executor: E, id: i32) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Identifiants des administrateurs actifs, verrouillés par ordre d'id.
///
/// À appeler avant tout autre verrou sur `users` dans la transaction : deux
/// modifications concurrentes prennent alors les verrous dans le même ordre.
pub async fn lock_active_admins<'e, E>(executor: E) -> Result<Vec<i32>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar(
        "SELECT id FROM users WHERE role = 'admin' AND is_active ORDER BY id FOR UPDATE",
    )
    .fetch_all(executor)
    .await
}
