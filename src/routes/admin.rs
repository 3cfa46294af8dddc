use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;

use crate::config::Config;
use crate::db::{self, users::NewUser};
use crate::errors::{ApiError, ApiResult};
use crate::models::user::{
    is_known_role, removes_last_admin, CreateUserForm, UpdateUserForm, UserProfile,
};
use crate::routes::auth::{email_taken, normalize_email};
use crate::utils::extract_user::AdminUser;
use crate::utils::hash;

const LAST_ADMIN: &str = "Impossible : il s'agit du dernier administrateur actif";

/// Route pour obtenir la liste des utilisateurs (accessible uniquement aux administrateurs)
#[get("/users")]
async fn list_users(pool: web::Data<PgPool>, _admin: AdminUser) -> ApiResult<HttpResponse> {
    let users: Vec<UserProfile> = db::users::list(&pool)
        .await?
        .into_iter()
        .map(UserProfile::from)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

/// Route pour ajouter un utilisateur en tant qu'administrateur
#[post("/users")]
async fn create_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    admin: AdminUser,
    form: web::Json<CreateUserForm>,
) -> ApiResult<HttpResponse> {
    let email = normalize_email(&form.email)?;
    if !is_known_role(&form.role) {
        return Err(ApiError::Validation(format!("Rôle inconnu: {}", form.role)));
    }
    hash::validate_password(&form.password).map_err(ApiError::Validation)?;

    if db::users::find_by_email(&pool, &email).await?.is_some() {
        return Err(ApiError::Conflict("Email déjà utilisé".into()));
    }

    let hashed_password = hash::hash_password(&form.password, config.bcrypt_cost)?;
    let user = db::users::create(
        &pool,
        &NewUser {
            email: &email,
            password_hash: &hashed_password,
            first_name: form.first_name.trim(),
            last_name: form.last_name.trim(),
            role: &form.role,
        },
    )
    .await
    .map_err(email_taken)?;

    tracing::info!(admin_id = admin.0.id, user_id = user.id, "utilisateur créé");
    Ok(HttpResponse::Created().json(UserProfile::from(user)))
}

/// Route pour mettre à jour les informations d'un utilisateur
#[put("/users/{id}")]
async fn update_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    admin: AdminUser,
    path: web::Path<i32>,
    form: web::Json<UpdateUserForm>,
) -> ApiResult<HttpResponse> {
    let user_id = path.into_inner();
    let form = form.into_inner();

    let mut tx = pool.begin().await?;
    let admins = db::users::lock_active_admins(&mut *tx).await?;
    let before = db::users::find_by_id_for_update(&mut *tx, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Utilisateur {user_id} introuvable")))?;
    let mut user = before.clone();

    if let Some(email) = form.email.as_deref() {
        user.email = normalize_email(email)?;
    }
    if let Some(first_name) = form.first_name {
        user.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = form.last_name {
        user.last_name = last_name.trim().to_string();
    }
    if let Some(password) = form.password.as_deref() {
        hash::validate_password(password).map_err(ApiError::Validation)?;
        user.password_hash = hash::hash_password(password, config.bcrypt_cost)?;
    }
    if let Some(role) = form.role {
        if !is_known_role(&role) {
            return Err(ApiError::Validation(format!("Rôle inconnu: {role}")));
        }
        user.role = role;
    }
    if let Some(is_active) = form.is_active {
        user.is_active = is_active;
    }

    // Rétrogradation ou désactivation : il doit rester un administrateur actif
    if removes_last_admin(&before, Some(&user), other_admins(&admins, user_id)) {
        return Err(ApiError::Conflict(LAST_ADMIN.into()));
    }

    let user = db::users::save(&mut *tx, &user)
        .await
        .map_err(email_taken)?;
    tx.commit().await?;

    tracing::info!(admin_id = admin.0.id, user_id, "utilisateur mis à jour");
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

/// Route pour supprimer un utilisateur ; ses audits sont conservés
#[delete("/users/{id}")]
async fn delete_user(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let user_id = path.into_inner();

    let mut tx = pool.begin().await?;
    let admins = db::users::lock_active_admins(&mut *tx).await?;
    let user = db::users::find_by_id_for_update(&mut *tx, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Utilisateur {user_id} introuvable")))?;

    if removes_last_admin(&user, None, other_admins(&admins, user_id)) {
        return Err(ApiError::Conflict(LAST_ADMIN.into()));
    }

    db::users::delete(&mut *tx, user_id).await?;
    tx.commit().await?;

    tracing::info!(admin_id = admin.0.id, user_id, "utilisateur supprimé");
    Ok(HttpResponse::NoContent().finish())
}

fn other_admins(active_admins: &[i32], user_id: i32) -> usize {
    active_admins.iter().filter(|id| **id != user_id).count()
}

/// Configuration des routes spécifiques aux administrateurs
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users);
    cfg.service(create_user);
    cfg.service(update_user);
    cfg.service(delete_user);
}
