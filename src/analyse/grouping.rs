use std::collections::BTreeMap;

use super::stats::key_or_undefined;
use crate::models::reglementation::RegulationAudit;

/// Regroupe les enregistrements par domaine.
///
/// L'ordre d'entrée est conservé à l'intérieur de chaque groupe ; un domaine
/// absent ou vide est rangé sous « Non défini ».
pub fn group_by_domain(records: &[RegulationAudit]) -> BTreeMap<String, Vec<RegulationAudit>> {
    let mut groups: BTreeMap<String, Vec<RegulationAudit>> = BTreeMap::new();
    for record in records {
        groups
            .entry(key_or_undefined(record.domaine.as_deref()))
            .or_default()
            .push(record.clone());
    }
    groups
}
