use serde::Serialize;

/// Niveau de priorité normalisé, dans l'ordre d'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PriorityLabel {
    #[serde(rename = "Critique")]
    Critique,
    #[serde(rename = "Élevée")]
    Elevee,
    #[serde(rename = "Modérée")]
    Moderee,
    #[serde(rename = "Faible")]
    Faible,
    #[serde(rename = "Amélioration")]
    Amelioration,
    #[serde(rename = "Non définie")]
    NonDefinie,
}

impl PriorityLabel {
    pub const ALL: [Self; 6] = [
        Self::Critique,
        Self::Elevee,
        Self::Moderee,
        Self::Faible,
        Self::Amelioration,
        Self::NonDefinie,
    ];

    /// Classe une priorité libre (`prioritée` / `risque`).
    ///
    /// Recherche insensible à la casse ; le premier motif trouvé l'emporte.
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::NonDefinie;
        };
        let value = raw.to_lowercase();

        const PATTERNS: [(&str, PriorityLabel); 5] = [
            ("critique", PriorityLabel::Critique),
            ("élevée", PriorityLabel::Elevee),
            ("modérée", PriorityLabel::Moderee),
            ("faible", PriorityLabel::Faible),
            ("amélioration", PriorityLabel::Amelioration),
        ];

        PATTERNS
            .iter()
            .find(|(pattern, _)| value.contains(pattern))
            .map(|(_, label)| *label)
            .unwrap_or(Self::NonDefinie)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Critique => "Critique",
            Self::Elevee => "Élevée",
            Self::Moderee => "Modérée",
            Self::Faible => "Faible",
            Self::Amelioration => "Amélioration",
            Self::NonDefinie => "Non définie",
        }
    }
}

/// Faisabilité normalisée du plan d'action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FeasibilityLabel {
    #[serde(rename = "Facile")]
    Facile,
    #[serde(rename = "Moyen")]
    Moyen,
    #[serde(rename = "Difficile")]
    Difficile,
    #[serde(rename = "Non évaluée")]
    NonEvaluee,
}

impl FeasibilityLabel {
    pub const ALL: [Self; 4] = [Self::Facile, Self::Moyen, Self::Difficile, Self::NonEvaluee];

    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::NonEvaluee;
        };
        let value = raw.to_lowercase();

        if value.contains("facile") {
            Self::Facile
        } else if value.contains("moyen") {
            Self::Moyen
        } else if value.contains("difficile") {
            Self::Difficile
        } else {
            Self::NonEvaluee
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Facile => "Facile",
            Self::Moyen => "Moyen",
            Self::Difficile => "Difficile",
            Self::NonEvaluee => "Non évaluée",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ignores_decoration_and_case() {
        assert_eq!(PriorityLabel::classify(Some("2. Élevée 🟠")), PriorityLabel::Elevee);
        assert_eq!(PriorityLabel::classify(Some("élevée - urgent")), PriorityLabel::Elevee);
        assert_eq!(PriorityLabel::classify(Some("1. CRITIQUE 🔴")), PriorityLabel::Critique);
        assert_eq!(PriorityLabel::classify(Some("3. Modérée")), PriorityLabel::Moderee);
        assert_eq!(PriorityLabel::classify(Some("Faible")), PriorityLabel::Faible);
        assert_eq!(
            PriorityLabel::classify(Some("5. Amélioration continue")),
            PriorityLabel::Amelioration
        );
    }

    #[test]
    fn priority_first_match_wins() {
        // « critique » est testé avant « faible »
        assert_eq!(
            PriorityLabel::classify(Some("faible mais critique")),
            PriorityLabel::Critique
        );
    }

    #[test]
    fn priority_defaults_to_undefined() {
        assert_eq!(PriorityLabel::classify(None), PriorityLabel::NonDefinie);
        assert_eq!(PriorityLabel::classify(Some("")), PriorityLabel::NonDefinie);
        assert_eq!(PriorityLabel::classify(Some("urgent")), PriorityLabel::NonDefinie);
    }

    #[test]
    fn feasibility_buckets() {
        assert_eq!(FeasibilityLabel::classify(Some("Facile")), FeasibilityLabel::Facile);
        assert_eq!(FeasibilityLabel::classify(Some("2 - MOYEN")), FeasibilityLabel::Moyen);
        assert_eq!(
            FeasibilityLabel::classify(Some("Très difficile")),
            FeasibilityLabel::Difficile
        );
        assert_eq!(FeasibilityLabel::classify(None), FeasibilityLabel::NonEvaluee);
        assert_eq!(FeasibilityLabel::classify(Some("?")), FeasibilityLabel::NonEvaluee);
    }

    #[test]
    fn labels_serialize_as_display_text() {
        assert_eq!(
            serde_json::to_value(PriorityLabel::Elevee).unwrap(),
            serde_json::json!("Élevée")
        );
        assert_eq!(
            serde_json::to_value(FeasibilityLabel::NonEvaluee).unwrap(),
            serde_json::json!("Non évaluée")
        );
        for label in PriorityLabel::ALL {
            assert_eq!(
                serde_json::to_value(label).unwrap(),
                serde_json::json!(label.label())
            );
        }
    }

    #[test]
    fn labels_are_ordered_for_display() {
        let mut labels = PriorityLabel::ALL.to_vec();
        labels.reverse();
        labels.sort();
        assert_eq!(labels, PriorityLabel::ALL.to_vec());
    }
}
