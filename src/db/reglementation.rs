use sqlx::PgPool;

use crate::models::reglementation::RegulationAudit;

const SELECT_WITH_AUDIT: &str = "SELECT r.id, r.domaine, r.chapitre, r.sous_chapitre, r.titre, \
     r.exigence, r.lois, r.documents, a.conformite, a.priorite, a.faisabilite, a.plan_action, \
     a.deadline, a.owner, a.created_at, a.updated_at \
     FROM reglementation_all r \
     LEFT JOIN audit_conformite a ON a.reglementation_id = r.id";

/// Toutes les réglementations avec leur audit éventuel
pub async fn list_with_audits(pool: &PgPool) -> Result<Vec<RegulationAudit>, sqlx::Error> {
    let sql = format!(
        "{SELECT_WITH_AUDIT} ORDER BY r.domaine NULLS LAST, r.chapitre NULLS LAST, \
         r.sous_chapitre NULLS LAST, r.id"
    );
    sqlx::query_as::<_, RegulationAudit>(&sql)
        .fetch_all(pool)
        .await
}

pub async fn find_with_audit(
    pool: &PgPool,
    id: i32,
) -> Result<Option<RegulationAudit>, sqlx::Error> {
    let sql = format!("{SELECT_WITH_AUDIT} WHERE r.id = $1");
    sqlx::query_as::<_, RegulationAudit>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Liste des domaines distincts, pour les listes déroulantes de filtre
pub async fn list_domains(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT domaine FROM reglementation_all \
         WHERE domaine IS NOT NULL AND btrim(domaine) <> '' ORDER BY domaine",
    )
    .fetch_all(pool)
    .await
}
