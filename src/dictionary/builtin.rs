use std::collections::BTreeMap;

use crate::models::RiskLevel;

use super::{Dictionary, DictionaryEntry};

pub const BUILTIN_VERSION: &str = "builtin-1";

/// The curated default terms. Keys are already normalized.
pub fn builtin_entries() -> Vec<DictionaryEntry> {
    [
        ("gelatin", RiskLevel::Medium, "Source unspecified; likely animal."),
        ("pork gelatin", RiskLevel::High, "Specifically pork-derived."),
        ("carmine", RiskLevel::High, "Derived from insects (E120)."),
        ("e120", RiskLevel::High, "Carmine/Insects."),
        ("whey", RiskLevel::Low, "Generally halal if enzymes are plant-based."),
        ("alcohol", RiskLevel::High, "May be used in flavorings or as a preservative."),
    ]
    .into_iter()
    .map(|(key, level, explanation)| DictionaryEntry::new(key, level, explanation))
    .collect()
}

/// Snapshot of [`builtin_entries`], skipping validation since the table is fixed.
pub fn builtin() -> Dictionary {
    let entries: BTreeMap<String, DictionaryEntry> = builtin_entries()
        .into_iter()
        .map(|entry| (entry.key.clone(), entry))
        .collect();

    Dictionary {
        version: Some(BUILTIN_VERSION.to_string()),
        entries,
    }
}
