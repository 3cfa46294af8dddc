use chrono::{Days, NaiveDate};

use crate::models::filter::{AuditFilter, DeadlineWindow};
use crate::models::reglementation::RegulationAudit;

/// Indique si un enregistrement satisfait tous les prédicats actifs du filtre.
///
/// `today` est une date sans heure ; le résultat ne dépend que de ses arguments.
pub fn matches(record: &RegulationAudit, filter: &AuditFilter, today: NaiveDate) -> bool {
    matches_search(record, filter.search.as_deref())
        && matches_exact(record.domaine.as_deref(), filter.domaine.as_deref())
        && matches_exact(record.conformite.as_deref(), filter.statut.as_deref())
        && matches_exact(record.priorite.as_deref(), filter.priorite.as_deref())
        && matches_exact(record.owner.as_deref(), filter.owner.as_deref())
        && matches_deadline(record.deadline, filter.deadline_proche, today)
}

/// Filtre une liste en conservant l'ordre d'origine
pub fn filter_records(
    records: &[RegulationAudit],
    filter: &AuditFilter,
    today: NaiveDate,
) -> Vec<RegulationAudit> {
    records
        .iter()
        .filter(|record| matches(record, filter, today))
        .cloned()
        .collect()
}

/// Recherche plein texte insensible à la casse sur le titre, l'exigence et le domaine
pub fn matches_search(record: &RegulationAudit, search: Option<&str>) -> bool {
    let Some(search) = search.filter(|s| !s.is_empty()) else {
        return true;
    };
    let needle = search.to_lowercase();

    [&record.titre, &record.exigence, &record.domaine]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Égalité stricte avec la valeur stockée ; un filtre absent accepte tout
pub fn matches_exact(value: Option<&str>, expected: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => value == Some(expected),
    }
}

pub fn matches_deadline(
    deadline: Option<NaiveDate>,
    window: Option<DeadlineWindow>,
    today: NaiveDate,
) -> bool {
    let Some(window) = window else {
        return true;
    };
    let Some(deadline) = deadline else {
        return false;
    };

    match window.days() {
        None => deadline < today,
        Some(days) => {
            let limit = today
                .checked_add_days(Days::new(days))
                .unwrap_or(NaiveDate::MAX);
            today <= deadline && deadline <= limit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_with_deadline(deadline: Option<NaiveDate>) -> RegulationAudit {
        RegulationAudit {
            id: 1,
            deadline,
            ..RegulationAudit::default()
        }
    }

    fn deadline_filter(window: DeadlineWindow) -> AuditFilter {
        AuditFilter {
            deadline_proche: Some(window),
            ..AuditFilter::default()
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let today = date(2024, 6, 1);
        assert!(matches(&RegulationAudit::default(), &AuditFilter::default(), today));
    }

    #[test]
    fn search_is_case_insensitive_on_text_fields() {
        let record = RegulationAudit {
            titre: Some("Gestion des déchets".to_string()),
            exigence: Some("Tenir un registre".to_string()),
            domaine: Some("Environnement".to_string()),
            lois: Some("Code pénal".to_string()),
            ..RegulationAudit::default()
        };

        assert!(matches_search(&record, Some("DÉCHETS")));
        assert!(matches_search(&record, Some("registre")));
        assert!(matches_search(&record, Some("environ")));
        assert!(matches_search(&record, Some("")));
        assert!(!matches_search(&record, Some("pénal")));
    }

    #[test]
    fn exact_filters_are_case_sensitive() {
        let record = RegulationAudit {
            domaine: Some("Sécurité".to_string()),
            conformite: Some("Conforme".to_string()),
            owner: Some("Alice".to_string()),
            ..RegulationAudit::default()
        };
        let today = date(2024, 6, 1);

        let mut filter = AuditFilter {
            statut: Some("Conforme".to_string()),
            ..AuditFilter::default()
        };
        assert!(matches(&record, &filter, today));

        filter.statut = Some("conforme".to_string());
        assert!(!matches(&record, &filter, today));

        let filter = AuditFilter {
            priorite: Some("Faible".to_string()),
            ..AuditFilter::default()
        };
        assert!(!matches(&record, &filter, today), "valeur absente, filtre actif");
    }

    #[test]
    fn deadline_boundaries() {
        let today = date(2024, 6, 1);
        let due_today = record_with_deadline(Some(today));
        let due_yesterday = record_with_deadline(Some(date(2024, 5, 31)));

        for window in [DeadlineWindow::Days7, DeadlineWindow::Days30, DeadlineWindow::Days90] {
            assert!(matches(&due_today, &deadline_filter(window), today));
            assert!(!matches(&due_yesterday, &deadline_filter(window), today));
        }
        assert!(!matches(&due_today, &deadline_filter(DeadlineWindow::Expired), today));
        assert!(matches(&due_yesterday, &deadline_filter(DeadlineWindow::Expired), today));
    }

    #[test]
    fn deadline_window_upper_bound_is_inclusive() {
        let today = date(2024, 6, 1);
        let filter = deadline_filter(DeadlineWindow::Days7);
        assert!(matches(&record_with_deadline(Some(date(2024, 6, 8))), &filter, today));
        assert!(!matches(&record_with_deadline(Some(date(2024, 6, 9))), &filter, today));
    }

    #[test]
    fn thirty_day_window_example() {
        let today = date(2024, 6, 1);
        let filter = deadline_filter(DeadlineWindow::Days30);

        let records = vec![
            RegulationAudit { id: 1, deadline: Some(date(2024, 6, 20)), ..Default::default() },
            RegulationAudit { id: 2, deadline: Some(date(2024, 7, 15)), ..Default::default() },
            RegulationAudit { id: 3, deadline: None, ..Default::default() },
        ];

        let kept: Vec<i32> = filter_records(&records, &filter, today)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(kept, vec![1]);
    }

    #[test]
    fn missing_deadline_only_matches_without_window() {
        let today = date(2024, 6, 1);
        assert!(matches_deadline(None, None, today));
        assert!(!matches_deadline(None, Some(DeadlineWindow::Expired), today));
        assert!(!matches_deadline(None, Some(DeadlineWindow::Days90), today));
    }

    fn text() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::sample::select(vec![
            "Conforme".to_string(),
            "Non conforme".to_string(),
            "Sécurité".to_string(),
            "Environnement".to_string(),
            "Alice".to_string(),
            "Bob".to_string(),
        ]))
    }

    fn arb_record() -> impl Strategy<Value = RegulationAudit> {
        (
            (text(), text(), text(), text()),
            (text(), text(), prop::option::of(-120i64..120)),
        )
            .prop_map(|((domaine, titre, conformite, priorite), (owner, exigence, offset))| {
                RegulationAudit {
                    id: 0,
                    domaine,
                    titre,
                    exigence,
                    conformite,
                    priorite,
                    owner,
                    deadline: offset.map(|days| date(2024, 6, 1) + chrono::Duration::days(days)),
                    ..RegulationAudit::default()
                }
            })
    }

    fn window() -> impl Strategy<Value = Option<DeadlineWindow>> {
        prop::option::of(prop::sample::select(vec![
            DeadlineWindow::Days7,
            DeadlineWindow::Days30,
            DeadlineWindow::Days90,
            DeadlineWindow::Expired,
        ]))
    }

    fn arb_filter() -> impl Strategy<Value = AuditFilter> {
        (text(), text(), text(), text(), window(), prop::option::of("[a-zé]{0,3}")).prop_map(
            |(domaine, statut, priorite, owner, deadline_proche, search)| AuditFilter {
                domaine,
                statut,
                priorite,
                owner,
                deadline_proche,
                search,
            },
        )
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(
            records in prop::collection::vec(arb_record(), 0..40),
            filter in arb_filter(),
        ) {
            let today = date(2024, 6, 1);
            let once = filter_records(&records, &filter, today);
            let twice = filter_records(&once, &filter, today);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn matches_is_conjunction_of_single_predicates(
            record in arb_record(),
            filter in arb_filter(),
        ) {
            let today = date(2024, 6, 1);
            let singles = [
                AuditFilter { domaine: filter.domaine.clone(), ..AuditFilter::default() },
                AuditFilter { statut: filter.statut.clone(), ..AuditFilter::default() },
                AuditFilter { priorite: filter.priorite.clone(), ..AuditFilter::default() },
                AuditFilter { owner: filter.owner.clone(), ..AuditFilter::default() },
                AuditFilter { deadline_proche: filter.deadline_proche, ..AuditFilter::default() },
                AuditFilter { search: filter.search.clone(), ..AuditFilter::default() },
            ];
            let expected = singles.iter().all(|single| matches(&record, single, today));
            prop_assert_eq!(matches(&record, &filter, today), expected);
        }
    }
}
