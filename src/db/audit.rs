use sqlx::{PgExecutor, PgPool};

use crate::models::audit::{AuditForm, AuditRecord};

const AUDIT_COLUMNS: &str = "id, reglementation_id, conformite, priorite, faisabilite, \
     plan_action, deadline, owner, user_id, created_at, updated_at";

/// Crée ou met à jour l'audit d'une réglementation (un seul audit par réglementation)
pub async fn upsert<'e, E>(
    executor: E,
    form: &AuditForm,
    user_id: i32,
) -> Result<AuditRecord, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        "INSERT INTO audit_conformite \
             (reglementation_id, conformite, priorite, faisabilite, plan_action, deadline, owner, user_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (reglementation_id) DO UPDATE SET \
             conformite = EXCLUDED.conformite, \
             priorite = EXCLUDED.priorite, \
             faisabilite = EXCLUDED.faisabilite, \
             plan_action = EXCLUDED.plan_action, \
             deadline = EXCLUDED.deadline, \
             owner = EXCLUDED.owner, \
             user_id = EXCLUDED.user_id, \
             updated_at = NOW() \
         RETURNING {AUDIT_COLUMNS}"
    );

    sqlx::query_as::<_, AuditRecord>(&sql)
        .bind(form.reglementation_id)
        .bind(&form.conformite)
        .bind(&form.priorite)
        .bind(&form.faisabilite)
        .bind(&form.plan_action)
        .bind(form.deadline)
        .bind(&form.owner)
        .bind(user_id)
        .fetch_one(executor)
        .await
}

pub async fn find_by_reglementation(
    pool: &PgPool,
    reglementation_id: i32,
) -> Result<Option<AuditRecord>, sqlx::Error> {
    let sql = format!("SELECT {AUDIT_COLUMNS} FROM audit_conformite WHERE reglementation_id = $1");
    sqlx::query_as::<_, AuditRecord>(&sql)
        .bind(reglementation_id)
        .fetch_optional(pool)
        .await
}
