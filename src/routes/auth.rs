use actix_web::{get, post, put, web, HttpResponse};
use chrono::Duration;
use sqlx::PgPool;

use crate::config::Config;
use crate::db::{self, users::NewUser};
use crate::errors::{ApiError, ApiResult};
use crate::models::user::{
    LoginForm, ProfileForm, RegisterForm, Session, User, UserProfile, ROLE_ADMIN, ROLE_USER,
};
use crate::utils::extract_user::AuthenticatedUser;
use crate::utils::{hash, jwt};

/// Émet un jeton pour l'utilisateur et construit la session renvoyée au client
pub(crate) fn open_session(user: User, config: &Config) -> ApiResult<Session> {
    let (token, expires_at) = jwt::create_token(
        user.id,
        &user.role,
        &config.jwt_secret,
        Duration::hours(config.jwt_ttl_hours),
    )?;

    Ok(Session {
        token,
        user: user.into(),
        expires_at,
    })
}

/// Vérifie le format minimal d'une adresse email et la normalise
pub(crate) fn normalize_email(email: &str) -> ApiResult<String> {
    let email = email.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
        .unwrap_or(false);
    if !valid {
        return Err(ApiError::Validation("Adresse email invalide".into()));
    }
    Ok(email)
}

/// Traduit une violation d'unicité sur l'email en 409 ; les autres erreurs restent internes
pub(crate) fn email_taken(error: sqlx::Error) -> ApiError {
    if db::is_unique_violation(&error) {
        ApiError::Conflict("Email déjà utilisé".into())
    } else {
        error.into()
    }
}

/// Route pour l'inscription des utilisateurs
#[post("/register")]
async fn register(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    form: web::Json<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let email = normalize_email(&form.email)?;
    hash::validate_password(&form.password).map_err(ApiError::Validation)?;

    // Vérifier si l'email est déjà utilisé
    if db::users::find_by_email(&pool, &email).await?.is_some() {
        return Err(ApiError::Conflict("Email déjà utilisé".into()));
    }

    let hashed_password = hash::hash_password(&form.password, config.bcrypt_cost)?;

    // Déterminer le rôle en fonction du code d'accès
    let role = match form.access_code.as_deref() {
        Some(code) if code.trim() == config.admin_secret_code.trim() => ROLE_ADMIN,
        _ => ROLE_USER,
    };

    let user = db::users::create(
        &pool,
        &NewUser {
            email: &email,
            password_hash: &hashed_password,
            first_name: form.first_name.trim(),
            last_name: form.last_name.trim(),
            role,
        },
    )
    .await
    .map_err(email_taken)?;

    tracing::info!(user_id = user.id, role, "inscription");
    Ok(HttpResponse::Created().json(UserProfile::from(user)))
}

/// Route pour la connexion des utilisateurs
#[post("/login")]
async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    form: web::Json<LoginForm>,
) -> ApiResult<HttpResponse> {
    let invalid = || ApiError::Unauthorized("Identifiants invalides".into());

    let email = form.email.trim().to_lowercase();
    let user = db::users::find_by_email(&pool, &email)
        .await?
        .ok_or_else(invalid)?;

    if !hash::verify_password(&form.password, &user.password_hash) {
        tracing::warn!(user_id = user.id, "échec de connexion");
        return Err(invalid());
    }
    if !user.is_active {
        return Err(ApiError::Unauthorized("Compte désactivé".into()));
    }

    tracing::info!(user_id = user.id, "connexion");
    Ok(HttpResponse::Ok().json(open_session(user, &config)?))
}

/// Émet un nouveau jeton à partir d'un jeton encore valide
#[post("/refresh")]
async fn refresh(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    auth: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    // Le rôle et l'état du compte sont relus : le jeton peut être périmé sur ces points
    let user = db::users::find_by_id(pool.get_ref(), auth.id)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| ApiError::Unauthorized("Compte introuvable ou désactivé".into()))?;

    Ok(HttpResponse::Ok().json(open_session(user, &config)?))
}

#[get("/me")]
async fn me(pool: web::Data<PgPool>, auth: AuthenticatedUser) -> ApiResult<HttpResponse> {
    let user = db::users::find_by_id(pool.get_ref(), auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Utilisateur introuvable".into()))?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

/// Mise à jour du profil de l'utilisateur connecté
#[put("/me")]
async fn update_me(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    auth: AuthenticatedUser,
    form: web::Json<ProfileForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let mut user = db::users::find_by_id(pool.get_ref(), auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Utilisateur introuvable".into()))?;

    if let Some(email) = form.email.as_deref() {
        let email = normalize_email(email)?;
        if email != user.email {
            if db::users::find_by_email(&pool, &email).await?.is_some() {
                return Err(ApiError::Conflict("Email déjà utilisé".into()));
            }
            user.email = email;
        }
    }
    if let Some(first_name) = form.first_name {
        user.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = form.last_name {
        user.last_name = last_name.trim().to_string();
    }
    if let Some(new_password) = form.new_password.as_deref() {
        let current = form.current_password.as_deref().unwrap_or_default();
        if !hash::verify_password(current, &user.password_hash) {
            return Err(ApiError::Unauthorized("Mot de passe actuel incorrect".into()));
        }
        hash::validate_password(new_password).map_err(ApiError::Validation)?;
        user.password_hash = hash::hash_password(new_password, config.bcrypt_cost)?;
    }

    let user = db::users::save(pool.get_ref(), &user)
        .await
        .map_err(email_taken)?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

/// Configuration des routes d'authentification
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register);
    cfg.service(login);
    cfg.service(refresh);
    cfg.service(me);
    cfg.service(update_me);
}
