//! Filtrage et agrégation des audits de conformité.
//!
//! Fonctions pures sur des listes déjà chargées en mémoire : aucune E/S,
//! aucun état partagé. Les routes du tableau de bord et des rapports
//! s'appuient toutes sur ce module pour que les comptages restent cohérents.

pub mod conformity;
pub mod filter;
pub mod grouping;
pub mod labels;
pub mod stats;

/// Clé utilisée lorsqu'un domaine ou un responsable est absent
pub const UNDEFINED_KEY: &str = "Non défini";

pub use conformity::ConformityBucket;
pub use filter::filter_records;
pub use grouping::group_by_domain;
pub use labels::{FeasibilityLabel, PriorityLabel};
pub use stats::{compute_statistics, Statistics};
