use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::conformity::ConformityBucket;
use super::labels::{FeasibilityLabel, PriorityLabel};
use super::UNDEFINED_KEY;
use crate::models::reglementation::RegulationAudit;

/// Comptage par catégorie de conformité
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConformityCounts {
    pub conforme: usize,
    pub non_conforme: usize,
    pub non_applicable: usize,
    pub en_attente: usize,
}

impl ConformityCounts {
    fn add(&mut self, bucket: ConformityBucket) {
        match bucket {
            ConformityBucket::Conforme => self.conforme += 1,
            ConformityBucket::NonConforme => self.non_conforme += 1,
            ConformityBucket::NonApplicable => self.non_applicable += 1,
            ConformityBucket::EnAttente => self.en_attente += 1,
        }
    }

    /// Nombre d'exigences évaluées
    pub fn assessed(&self) -> usize {
        self.conforme + self.non_conforme + self.non_applicable
    }

    pub fn total(&self) -> usize {
        self.assessed() + self.en_attente
    }
}

/// État d'échéance utilisé pour le croisement priorité × échéance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DeadlineStatus {
    #[serde(rename = "Échue")]
    Echue,
    #[serde(rename = "À venir")]
    AVenir,
}

impl DeadlineStatus {
    /// « Échue » seulement si une échéance existe et est antérieure à `today`
    pub fn of(deadline: Option<NaiveDate>, today: NaiveDate) -> Self {
        match deadline {
            Some(deadline) if deadline < today => Self::Echue,
            _ => Self::AVenir,
        }
    }
}

/// Statistiques du tableau de bord
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub conformity: ConformityCounts,
    pub by_priority: BTreeMap<PriorityLabel, usize>,
    pub by_feasibility: BTreeMap<FeasibilityLabel, usize>,
    pub by_domain: BTreeMap<String, usize>,
    pub by_owner: BTreeMap<String, usize>,
    pub priority_feasibility: BTreeMap<PriorityLabel, BTreeMap<FeasibilityLabel, usize>>,
    pub priority_deadline: BTreeMap<PriorityLabel, BTreeMap<DeadlineStatus, usize>>,
    pub overdue: usize,
    pub conformity_rate: u32,
    pub completion_rate: u32,
}

/// Calcule l'ensemble des statistiques en une passe.
///
/// Les libellés de priorité et de faisabilité sont tous présents (à zéro au
/// besoin) pour que les graphiques gardent des axes stables.
pub fn compute_statistics(records: &[RegulationAudit], today: NaiveDate) -> Statistics {
    let mut conformity = ConformityCounts::default();
    let mut by_priority: BTreeMap<PriorityLabel, usize> =
        PriorityLabel::ALL.iter().map(|label| (*label, 0)).collect();
    let mut by_feasibility: BTreeMap<FeasibilityLabel, usize> =
        FeasibilityLabel::ALL.iter().map(|label| (*label, 0)).collect();
    let mut by_domain = BTreeMap::new();
    let mut by_owner = BTreeMap::new();
    let mut priority_feasibility: BTreeMap<PriorityLabel, BTreeMap<FeasibilityLabel, usize>> =
        PriorityLabel::ALL
            .iter()
            .map(|priority| {
                let row = FeasibilityLabel::ALL.iter().map(|f| (*f, 0)).collect();
                (*priority, row)
            })
            .collect();
    let mut priority_deadline: BTreeMap<PriorityLabel, BTreeMap<DeadlineStatus, usize>> =
        PriorityLabel::ALL
            .iter()
            .map(|priority| {
                let row = [DeadlineStatus::Echue, DeadlineStatus::AVenir]
                    .into_iter()
                    .map(|status| (status, 0))
                    .collect();
                (*priority, row)
            })
            .collect();
    let mut overdue = 0;

    for record in records {
        conformity.add(ConformityBucket::normalize(record.conformite.as_deref()));

        let priority = PriorityLabel::classify(record.priorite.as_deref());
        let feasibility = FeasibilityLabel::classify(record.faisabilite.as_deref());
        let deadline_status = DeadlineStatus::of(record.deadline, today);

        *by_priority.entry(priority).or_default() += 1;
        *by_feasibility.entry(feasibility).or_default() += 1;
        *by_domain.entry(key_or_undefined(record.domaine.as_deref())).or_default() += 1;
        *by_owner.entry(key_or_undefined(record.owner.as_deref())).or_default() += 1;
        *priority_feasibility
            .entry(priority)
            .or_default()
            .entry(feasibility)
            .or_default() += 1;
        *priority_deadline
            .entry(priority)
            .or_default()
            .entry(deadline_status)
            .or_default() += 1;

        if deadline_status == DeadlineStatus::Echue {
            overdue += 1;
        }
    }

    Statistics {
        total: records.len(),
        conformity,
        by_priority,
        by_feasibility,
        by_domain,
        by_owner,
        priority_feasibility,
        priority_deadline,
        overdue,
        conformity_rate: conformity_rate(&conformity),
        completion_rate: percentage(conformity.assessed(), conformity.total()),
    }
}

/// (conforme + non applicable) / évalués × 100, arrondi ; 0 si rien n'est évalué
pub fn conformity_rate(counts: &ConformityCounts) -> u32 {
    percentage(counts.conforme + counts.non_applicable, counts.assessed())
}

/// Pourcentage arrondi au plus proche (demi vers le haut), 0 si `denominator` vaut 0
pub fn percentage(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let rounded = (200 * numerator + denominator) / (2 * denominator);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Clé de regroupement : la valeur stockée telle quelle, « Non défini » si elle est vide.
///
/// Pas de trim, pour que la clé reste utilisable comme filtre exact.
pub(crate) fn key_or_undefined(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => UNDEFINED_KEY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn with_conformite(value: Option<&str>) -> RegulationAudit {
        RegulationAudit {
            conformite: value.map(str::to_string),
            ..RegulationAudit::default()
        }
    }

    #[test]
    fn reference_example() {
        let records = vec![
            with_conformite(Some("Conforme")),
            with_conformite(Some("non conforme")),
            with_conformite(None),
        ];

        let stats = compute_statistics(&records, today());
        assert_eq!(
            stats.conformity,
            ConformityCounts {
                conforme: 1,
                non_conforme: 1,
                non_applicable: 0,
                en_attente: 1,
            }
        );
        assert_eq!(stats.conformity_rate, 50);
        assert_eq!(stats.completion_rate, 67);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn non_applicable_counts_as_compliant() {
        let records = vec![
            with_conformite(Some("Non applicable")),
            with_conformite(Some("Non conforme")),
            with_conformite(Some("Non conforme")),
        ];
        assert_eq!(compute_statistics(&records, today()).conformity_rate, 33);
    }

    #[test]
    fn empty_input_yields_zero_rates() {
        let stats = compute_statistics(&[], today());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.conformity_rate, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.by_priority.len(), PriorityLabel::ALL.len());
        assert!(stats.by_priority.values().all(|count| *count == 0));
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn cross_tabulations() {
        let records = vec![
            RegulationAudit {
                priorite: Some("1. Critique".to_string()),
                faisabilite: Some("Facile".to_string()),
                deadline: NaiveDate::from_ymd_opt(2024, 5, 1),
                domaine: Some("Sécurité".to_string()),
                owner: Some("Alice".to_string()),
                ..RegulationAudit::default()
            },
            RegulationAudit {
                priorite: Some("critique".to_string()),
                faisabilite: Some("Difficile".to_string()),
                deadline: Some(today()),
                domaine: Some("Sécurité".to_string()),
                ..RegulationAudit::default()
            },
            RegulationAudit {
                priorite: None,
                faisabilite: None,
                deadline: None,
                domaine: Some("  ".to_string()),
                ..RegulationAudit::default()
            },
        ];

        let stats = compute_statistics(&records, today());

        assert_eq!(stats.by_priority[&PriorityLabel::Critique], 2);
        assert_eq!(stats.by_priority[&PriorityLabel::NonDefinie], 1);
        assert_eq!(stats.by_feasibility[&FeasibilityLabel::NonEvaluee], 1);
        assert_eq!(
            stats.priority_feasibility[&PriorityLabel::Critique][&FeasibilityLabel::Facile],
            1
        );
        assert_eq!(
            stats.priority_feasibility[&PriorityLabel::Critique][&FeasibilityLabel::Difficile],
            1
        );
        assert_eq!(
            stats.priority_deadline[&PriorityLabel::Critique][&DeadlineStatus::Echue],
            1
        );
        assert_eq!(
            stats.priority_deadline[&PriorityLabel::Critique][&DeadlineStatus::AVenir],
            1
        );
        assert_eq!(
            stats.priority_deadline[&PriorityLabel::NonDefinie][&DeadlineStatus::AVenir],
            1
        );
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.by_domain["Sécurité"], 2);
        assert_eq!(stats.by_domain[UNDEFINED_KEY], 1);
        assert_eq!(stats.by_owner["Alice"], 1);
        assert_eq!(stats.by_owner[UNDEFINED_KEY], 2);
    }

    #[test]
    fn serializes_label_keys() {
        let stats = compute_statistics(&[with_conformite(Some("Conforme"))], today());
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["conformity"]["conforme"], 1);
        assert_eq!(value["by_priority"]["Non définie"], 1);
        assert_eq!(value["priority_deadline"]["Non définie"]["À venir"], 1);
        assert_eq!(value["priority_deadline"]["Non définie"]["Échue"], 0);
    }

    #[test]
    fn domain_keys_match_the_domain_filter() {
        let record = RegulationAudit {
            domaine: Some("Sécurité ".to_string()),
            ..RegulationAudit::default()
        };
        let stats = compute_statistics(std::slice::from_ref(&record), today());
        let key = stats.by_domain.keys().next().cloned().unwrap();
        assert_eq!(key, "Sécurité ");

        let filter = crate::models::filter::AuditFilter {
            domaine: Some(key),
            ..Default::default()
        };
        assert!(crate::analyse::filter::matches(&record, &filter, today()));
    }

    proptest! {
        #[test]
        fn bucket_counts_sum_to_total(
            values in prop::collection::vec(
                prop::option::of(prop::sample::select(vec![
                    "Conforme", "conforme ", "Non conforme", "NONCONFORME",
                    "Non applicable", "", "En attente", "autre",
                ])),
                0..60,
            )
        ) {
            let records: Vec<RegulationAudit> =
                values.iter().map(|value| with_conformite(*value)).collect();
            let stats = compute_statistics(&records, today());

            prop_assert_eq!(stats.conformity.total(), stats.total);
            prop_assert_eq!(stats.by_priority.values().sum::<usize>(), stats.total);
            prop_assert_eq!(stats.by_domain.values().sum::<usize>(), stats.total);
            prop_assert!(stats.conformity_rate <= 100);
            prop_assert!(stats.completion_rate <= 100);
        }
    }
}
