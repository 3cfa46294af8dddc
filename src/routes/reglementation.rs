use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;

use crate::analyse::group_by_domain;
use crate::db;
use crate::errors::{ApiError, ApiResult};
use crate::models::filter::AuditFilter;
use crate::routes::load_filtered;
use crate::utils::extract_user::AuthenticatedUser;

/// Liste des réglementations avec leur audit, filtrée par les paramètres de requête
#[get("")]
async fn list(
    pool: web::Data<PgPool>,
    _auth: AuthenticatedUser,
    filter: web::Query<AuditFilter>,
) -> ApiResult<HttpResponse> {
    let records = load_filtered(&pool, &filter).await?;
    tracing::debug!(count = records.len(), "liste des réglementations");
    Ok(HttpResponse::Ok().json(records))
}

/// Mêmes résultats, regroupés par domaine
#[get("/grouped")]
async fn grouped(
    pool: web::Data<PgPool>,
    _auth: AuthenticatedUser,
    filter: web::Query<AuditFilter>,
) -> ApiResult<HttpResponse> {
    let records = load_filtered(&pool, &filter).await?;
    Ok(HttpResponse::Ok().json(group_by_domain(&records)))
}

#[get("/domaines")]
async fn domains(pool: web::Data<PgPool>, _auth: AuthenticatedUser) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(db::reglementation::list_domains(&pool).await?))
}

#[get("/{id}")]
async fn get_one(
    pool: web::Data<PgPool>,
    _auth: AuthenticatedUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let record = db::reglementation::find_with_audit(&pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Réglementation {id} introuvable")))?;
    Ok(HttpResponse::Ok().json(record))
}

// Configuration des routes pour le module `reglementation`
pub fn config(cfg: &mut web::ServiceConfig) {
    // `/grouped` et `/domaines` avant `/{id}`
    cfg.service(list);
    cfg.service(grouped);
    cfg.service(domains);
    cfg.service(get_one);
}
