use actix_web::{get, post, web, HttpResponse};
use chrono::{Days, NaiveDate};
use serde::Deserialize;
use sqlx::PgPool;

use crate::analyse::compute_statistics;
use crate::db;
use crate::errors::{ApiError, ApiResult};
use crate::models::filter::AuditFilter;
use crate::models::reglementation::RegulationAudit;
use crate::routes::{load_filtered, today};
use crate::utils::extract_user::AuthenticatedUser;

const MAX_UPCOMING_DAYS: u64 = 365;

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<u64>,
}

/// Échéances dépassées, la plus ancienne en premier
pub fn overdue_records(records: Vec<RegulationAudit>, today: NaiveDate) -> Vec<RegulationAudit> {
    let mut result: Vec<RegulationAudit> = records
        .into_iter()
        .filter(|record| record.deadline.is_some_and(|deadline| deadline < today))
        .collect();
    result.sort_by_key(|record| record.deadline);
    result
}

/// Échéances comprises entre aujourd'hui et `today + days` inclus
pub fn upcoming_records(
    records: Vec<RegulationAudit>,
    today: NaiveDate,
    days: u64,
) -> Vec<RegulationAudit> {
    let limit = today
        .checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX);
    let mut result: Vec<RegulationAudit> = records
        .into_iter()
        .filter(|record| {
            record
                .deadline
                .is_some_and(|deadline| today <= deadline && deadline <= limit)
        })
        .collect();
    result.sort_by_key(|record| record.deadline);
    result
}

async fn statistics_response(pool: &PgPool, filter: &AuditFilter) -> ApiResult<HttpResponse> {
    let records = load_filtered(pool, filter).await?;
    Ok(HttpResponse::Ok().json(compute_statistics(&records, today())))
}

#[get("/stats")]
async fn stats(
    pool: web::Data<PgPool>,
    _auth: AuthenticatedUser,
    filter: web::Query<AuditFilter>,
) -> ApiResult<HttpResponse> {
    statistics_response(&pool, &filter).await
}

#[post("/stats")]
async fn stats_with_body(
    pool: web::Data<PgPool>,
    _auth: AuthenticatedUser,
    filter: web::Json<AuditFilter>,
) -> ApiResult<HttpResponse> {
    statistics_response(&pool, &filter).await
}

#[get("/overdue")]
async fn overdue(pool: web::Data<PgPool>, _auth: AuthenticatedUser) -> ApiResult<HttpResponse> {
    let records = db::reglementation::list_with_audits(&pool).await?;
    Ok(HttpResponse::Ok().json(overdue_records(records, today())))
}

#[get("/upcoming")]
async fn upcoming(
    pool: web::Data<PgPool>,
    _auth: AuthenticatedUser,
    query: web::Query<UpcomingQuery>,
) -> ApiResult<HttpResponse> {
    let days = query.days.unwrap_or(30);
    if days > MAX_UPCOMING_DAYS {
        return Err(ApiError::Validation(format!(
            "days doit être compris entre 0 et {MAX_UPCOMING_DAYS}"
        )));
    }

    let records = db::reglementation::list_with_audits(&pool).await?;
    Ok(HttpResponse::Ok().json(upcoming_records(records, today(), days)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(stats);
    cfg.service(stats_with_body);
    cfg.service(overdue);
    cfg.service(upcoming);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn due(id: i32, deadline: Option<NaiveDate>) -> RegulationAudit {
        RegulationAudit {
            id,
            deadline,
            ..RegulationAudit::default()
        }
    }

    fn sample() -> Vec<RegulationAudit> {
        vec![
            due(1, Some(date(2024, 5, 20))),
            due(2, Some(date(2024, 6, 1))),
            due(3, None),
            due(4, Some(date(2024, 4, 1))),
            due(5, Some(date(2024, 7, 1))),
            due(6, Some(date(2024, 6, 10))),
        ]
    }

    fn ids(records: &[RegulationAudit]) -> Vec<i32> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn overdue_sorted_oldest_first() {
        let result = overdue_records(sample(), date(2024, 6, 1));
        assert_eq!(ids(&result), vec![4, 1]);
    }

    #[test]
    fn upcoming_within_window_soonest_first() {
        let result = upcoming_records(sample(), date(2024, 6, 1), 30);
        assert_eq!(ids(&result), vec![2, 6, 5]);

        let result = upcoming_records(sample(), date(2024, 6, 1), 0);
        assert_eq!(ids(&result), vec![2]);
    }
}
