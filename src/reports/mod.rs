//! Rendu des rapports d'audit (CSV, Excel).

pub mod csv;
pub mod excel;

use crate::models::reglementation::RegulationAudit;

/// En-têtes des colonnes, communes aux deux formats
pub const COLUMNS: [&str; 14] = [
    "ID",
    "Domaine",
    "Chapitre",
    "Sous-chapitre",
    "Titre",
    "Exigence",
    "Lois",
    "Documents",
    "Conformité",
    "Priorité",
    "Faisabilité",
    "Plan d'action",
    "Échéance",
    "Responsable",
];

/// Valeurs d'une ligne dans l'ordre de `COLUMNS`
pub fn row_values(record: &RegulationAudit) -> [String; 14] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    [
        record.id.to_string(),
        text(&record.domaine),
        text(&record.chapitre),
        text(&record.sous_chapitre),
        text(&record.titre),
        text(&record.exigence),
        text(&record.lois),
        text(&record.documents),
        text(&record.conformite),
        text(&record.priorite),
        text(&record.faisabilite),
        text(&record.plan_action),
        record
            .deadline
            .map(|deadline| deadline.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        text(&record.owner),
    ]
}
