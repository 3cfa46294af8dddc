use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Une exigence réglementaire avec les champs de son audit (jointure gauche).
///
/// Tous les champs d'audit sont optionnels : une réglementation jamais auditée
/// est renvoyée avec `conformite`, `priorite`, ... à `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RegulationAudit {
    pub id: i32,
    pub domaine: Option<String>,
    pub chapitre: Option<String>,
    pub sous_chapitre: Option<String>,
    pub titre: Option<String>,
    pub exigence: Option<String>,
    pub lois: Option<String>,
    pub documents: Option<String>,
    pub conformite: Option<String>,
    #[serde(rename = "prioritée", alias = "priorite", alias = "risque")]
    pub priorite: Option<String>,
    pub faisabilite: Option<String>,
    pub plan_action: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub owner: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
