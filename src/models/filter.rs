use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fenêtre d'échéance proposée par le filtre « deadline proche »
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineWindow {
    /// Échéance dans les 7 prochains jours
    Days7,
    /// Échéance dans les 30 prochains jours
    Days30,
    /// Échéance dans les 90 prochains jours
    Days90,
    /// Échéance déjà dépassée
    Expired,
}

impl DeadlineWindow {
    /// Nombre de jours couverts par la fenêtre, `None` pour `Expired`
    pub fn days(self) -> Option<u64> {
        match self {
            Self::Days7 => Some(7),
            Self::Days30 => Some(30),
            Self::Days90 => Some(90),
            Self::Expired => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Days7 => "7",
            Self::Days30 => "30",
            Self::Days90 => "90",
            Self::Expired => "expired",
        }
    }
}

impl FromStr for DeadlineWindow {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "7" => Ok(Self::Days7),
            "30" => Ok(Self::Days30),
            "90" => Ok(Self::Days90),
            "expired" => Ok(Self::Expired),
            other => Err(format!(
                "deadlineProche invalide « {other} » (attendu : 7, 30, 90 ou expired)"
            )),
        }
    }
}

impl Serialize for DeadlineWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Configuration de filtrage envoyée par le frontend.
///
/// Un champ absent, vide ou composé uniquement d'espaces n'impose aucune
/// contrainte : les listes déroulantes du frontend envoient `""` pour « tous ».
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFilter {
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub domaine: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub statut: Option<String>,
    #[serde(
        rename = "prioritée",
        alias = "priorite",
        alias = "risque",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub priorite: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(
        rename = "deadlineProche",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline_proche: Option<DeadlineWindow>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl AuditFilter {
    /// Vrai si aucun prédicat n'est actif
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Désérialise une chaîne optionnelle en `None` lorsqu'elle est vide,
/// sinon la convertit via `FromStr` (la valeur d'origine est conservée telle quelle).
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .parse::<T>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
