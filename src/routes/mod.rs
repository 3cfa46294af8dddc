pub mod admin;
pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod reglementation;
pub mod reports;

use actix_web::{get, web, HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use sqlx::PgPool;

use crate::analyse::filter_records;
use crate::db;
use crate::errors::ApiResult;
use crate::models::filter::AuditFilter;
use crate::models::reglementation::RegulationAudit;

/// Date du jour, sans heure, utilisée par les filtres d'échéance
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Charge toutes les réglementations puis applique le filtre
pub(crate) async fn load_filtered(
    pool: &PgPool,
    filter: &AuditFilter,
) -> ApiResult<Vec<RegulationAudit>> {
    let records = db::reglementation::list_with_audits(pool).await?;
    if filter.is_empty() {
        return Ok(records);
    }
    Ok(filter_records(&records, filter, today()))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Configuration de toutes les routes de l'API
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api")
            .service(web::scope("/auth").configure(auth::config))
            .service(web::scope("/reglementation").configure(reglementation::config))
            .service(web::scope("/audit").configure(audit::config))
            .service(web::scope("/dashboard").configure(dashboard::config))
            .service(web::scope("/reports").configure(reports::config))
            .service(web::scope("/admin").configure(admin::config)),
    );
}
