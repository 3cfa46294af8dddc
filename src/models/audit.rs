use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Enregistrement d'audit tel que stocké dans `audit_conformite`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditRecord {
    pub id: i32,
    pub reglementation_id: i32,
    pub conformite: Option<String>,
    #[serde(rename = "prioritée")]
    pub priorite: Option<String>,
    pub faisabilite: Option<String>,
    pub plan_action: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub owner: Option<String>,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Corps d'une sauvegarde d'audit (création ou mise à jour)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditForm {
    pub reglementation_id: i32,
    #[serde(default)]
    pub conformite: Option<String>,
    #[serde(rename = "prioritée", alias = "priorite", alias = "risque", default)]
    pub priorite: Option<String>,
    #[serde(default)]
    pub faisabilite: Option<String>,
    #[serde(default)]
    pub plan_action: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl AuditForm {
    /// Supprime les espaces superflus et remplace les chaînes vides par `None`
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            reglementation_id: self.reglementation_id,
            conformite: clean(self.conformite),
            priorite: clean(self.priorite),
            faisabilite: clean(self.faisabilite),
            plan_action: clean(self.plan_action),
            deadline: self.deadline,
            owner: clean(self.owner),
        }
    }
}

/// Sauvegarde groupée de plusieurs audits
#[derive(Debug, Deserialize)]
pub struct BulkAuditForm {
    pub audits: Vec<AuditForm>,
}
