use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{post, web, HttpResponse};
use sqlx::PgPool;

use crate::analyse::compute_statistics;
use crate::errors::ApiResult;
use crate::models::filter::AuditFilter;
use crate::reports;
use crate::routes::{load_filtered, today};
use crate::utils::extract_user::AuthenticatedUser;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn attachment(filename: String) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename)],
    }
}

/// Export CSV des audits correspondant au filtre
#[post("/csv")]
async fn export_csv(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    filter: web::Json<AuditFilter>,
) -> ApiResult<HttpResponse> {
    let records = load_filtered(&pool, &filter).await?;
    let body = reports::csv::render(&records)?;

    tracing::info!(user_id = auth.id, count = records.len(), "export CSV");
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(attachment(format!("audit-conformite-{}.csv", today())))
        .body(body))
}

/// Export Excel : détail des audits et synthèse
#[post("/excel")]
async fn export_excel(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    filter: web::Json<AuditFilter>,
) -> ApiResult<HttpResponse> {
    let today = today();
    let records = load_filtered(&pool, &filter).await?;
    let stats = compute_statistics(&records, today);
    let body = reports::excel::render(&records, &stats)?;

    tracing::info!(user_id = auth.id, count = records.len(), "export Excel");
    Ok(HttpResponse::Ok()
        .content_type(XLSX_MIME)
        .insert_header(attachment(format!("audit-conformite-{today}.xlsx")))
        .body(body))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(export_csv);
    cfg.service(export_excel);
}
