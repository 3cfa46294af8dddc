use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::db;
use crate::errors::{ApiError, ApiResult};
use crate::models::audit::{AuditForm, BulkAuditForm};
use crate::utils::extract_user::AuthenticatedUser;

fn missing_regulation(reglementation_id: i32) -> ApiError {
    ApiError::NotFound(format!("Réglementation {reglementation_id} introuvable"))
}

/// Convertit une violation de clé étrangère en 404 sur la réglementation
fn map_save_error(error: sqlx::Error, reglementation_id: i32) -> ApiError {
    if db::is_foreign_key_violation(&error) {
        missing_regulation(reglementation_id)
    } else {
        error.into()
    }
}

/// Enregistre l'audit d'une réglementation (création ou mise à jour)
#[post("")]
async fn save(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    form: web::Json<AuditForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner().normalized();
    let record = db::audit::upsert(pool.get_ref(), &form, auth.id)
        .await
        .map_err(|error| map_save_error(error, form.reglementation_id))?;

    tracing::info!(
        reglementation_id = record.reglementation_id,
        user_id = auth.id,
        "audit enregistré"
    );
    Ok(HttpResponse::Ok().json(record))
}

/// Enregistre plusieurs audits dans une seule transaction (tout ou rien)
#[post("/bulk")]
async fn save_bulk(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    form: web::Json<BulkAuditForm>,
) -> ApiResult<HttpResponse> {
    let audits: Vec<AuditForm> = form
        .into_inner()
        .audits
        .into_iter()
        .map(AuditForm::normalized)
        .collect();

    if audits.is_empty() {
        return Err(ApiError::Validation("Aucun audit à enregistrer".into()));
    }

    let mut tx = pool.begin().await?;
    for audit in &audits {
        db::audit::upsert(&mut *tx, audit, auth.id)
            .await
            .map_err(|error| map_save_error(error, audit.reglementation_id))?;
    }
    tx.commit().await?;

    tracing::info!(count = audits.len(), user_id = auth.id, "audits enregistrés en masse");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "saved": audits.len() })))
}

#[get("/{reglementation_id}")]
async fn get_for_regulation(
    pool: web::Data<PgPool>,
    _auth: AuthenticatedUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let reglementation_id = path.into_inner();
    let record = db::audit::find_by_reglementation(&pool, reglementation_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Aucun audit pour la réglementation {reglementation_id}"
            ))
        })?;
    Ok(HttpResponse::Ok().json(record))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(save);
    cfg.service(save_bulk);
    cfg.service(get_for_regulation);
}
