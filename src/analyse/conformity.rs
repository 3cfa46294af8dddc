use serde::Serialize;

/// Catégorie canonique d'un statut de conformité saisi librement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConformityBucket {
    Conforme,
    NonConforme,
    NonApplicable,
    EnAttente,
}

impl ConformityBucket {
    /// Classe une valeur brute de `conformite`.
    ///
    /// La valeur est nettoyée (trim + minuscules) puis comparée aux variantes
    /// littérales connues ; tout le reste, vide ou absent compris, est « en attente ».
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::EnAttente;
        };

        match raw.trim().to_lowercase().as_str() {
            "conforme" => Self::Conforme,
            "non conforme" | "nonconforme" => Self::NonConforme,
            "non applicable" | "nonapplicable" => Self::NonApplicable,
            _ => Self::EnAttente,
        }
    }

    /// Libellé affiché dans les vues et les exports
    pub fn label(self) -> &'static str {
        match self {
            Self::Conforme => "Conforme",
            Self::NonConforme => "Non conforme",
            Self::NonApplicable => "Non applicable",
            Self::EnAttente => "En attente",
        }
    }
}
