use std::cmp::Ordering;

use tracing::debug;

use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::models::{CandidateItem, Finding, RiskLevel};

/// What to emit for items no dictionary key matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Unmatched items produce no finding.
    #[default]
    MatchedOnly,
    /// Unmatched items produce a finding with level `unknown` and no key.
    EveryItem,
}

/// Find the strongest dictionary entry contained in `item.text`.
///
/// Among all keys that occur as a substring, the winner is the longest key
/// (in characters), then the most severe level, then the smallest key. The
/// result does not depend on the dictionary's iteration order.
pub fn match_item(item: &CandidateItem, dictionary: &Dictionary) -> Option<Finding> {
    let entry = dictionary
        .entries()
        .filter(|entry| item.text.contains(entry.key.as_str()))
        .max_by(|a, b| precedence(a, b))?;

    debug!(
        item = item.index,
        text = %item.text,
        key = %entry.key,
        level = %entry.level,
        "ingredient matched"
    );

    Some(Finding {
        item: item.index,
        span: item.span,
        matched_key: Some(entry.key.clone()),
        level: entry.level,
        explanation: entry.explanation.clone(),
    })
}

/// Apply [`match_item`] to every item, keeping item order.
pub fn match_items(
    items: &[CandidateItem],
    dictionary: &Dictionary,
    policy: MatchPolicy,
) -> Vec<Finding> {
    items
        .iter()
        .filter_map(|item| match (match_item(item, dictionary), policy) {
            (Some(finding), _) => Some(finding),
            (None, MatchPolicy::MatchedOnly) => None,
            (None, MatchPolicy::EveryItem) => Some(unmatched(item)),
        })
        .collect()
}

fn unmatched(item: &CandidateItem) -> Finding {
    Finding {
        item: item.index,
        span: item.span,
        matched_key: None,
        level: RiskLevel::Unknown,
        explanation: String::new(),
    }
}

/// `Greater` means `a` wins over `b`.
fn precedence(a: &DictionaryEntry, b: &DictionaryEntry) -> Ordering {
    a.key
        .chars()
        .count()
        .cmp(&b.key.chars().count())
        .then(a.level.cmp(&b.level))
        .then_with(|| b.key.cmp(&a.key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::builtin::builtin;
    use crate::tagger::tokenizer::tokenize;

    fn dict(entries: &[(&str, RiskLevel)]) -> Dictionary {
        Dictionary::from_entries(
            None,
            entries
                .iter()
                .map(|(k, l)| DictionaryEntry::new(*k, *l, format!("{k} explanation"))),
        )
        .unwrap()
    }

    fn single(text: &str) -> CandidateItem {
        tokenize(text).remove(0)
    }

    #[test]
    fn test_longest_key_wins() {
        let d = dict(&[("gelatin", RiskLevel::Medium), ("pork gelatin", RiskLevel::High)]);
        let finding = match_item(&single("Pork Gelatin (Bovine)"), &d).unwrap();
        assert_eq!(finding.matched_key.as_deref(), Some("pork gelatin"));
        assert_eq!(finding.level, RiskLevel::High);
        assert_eq!(finding.explanation, "pork gelatin explanation");
    }

    #[test]
    fn test_longer_key_beats_higher_level() {
        let d = dict(&[("whey powder", RiskLevel::Low), ("whey", RiskLevel::High)]);
        let finding = match_item(&single("sweet whey powder"), &d).unwrap();
        assert_eq!(finding.matched_key.as_deref(), Some("whey powder"));
        assert_eq!(finding.level, RiskLevel::Low);
    }

    #[test]
    fn test_equal_length_prefers_severity() {
        let d = dict(&[("lard", RiskLevel::High), ("malt", RiskLevel::Low)]);
        let finding = match_item(&single("malt lard blend"), &d).unwrap();
        assert_eq!(finding.matched_key.as_deref(), Some("lard"));
    }

    #[test]
    fn test_equal_length_and_level_prefers_smallest_key() {
        let d = dict(&[("rum", RiskLevel::High), ("gin", RiskLevel::High)]);
        let finding = match_item(&single("rum and gin flavour"), &d).unwrap();
        assert_eq!(finding.matched_key.as_deref(), Some("gin"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "crème" is 5 chars / 6 bytes, "cream" is 5 chars / 5 bytes; severity decides.
        let d = dict(&[("crème", RiskLevel::Low), ("cream", RiskLevel::Medium)]);
        let finding = match_item(&single("crème cream"), &d).unwrap();
        assert_eq!(finding.matched_key.as_deref(), Some("cream"));
    }

    #[test]
    fn test_no_match_yields_none() {
        assert!(match_item(&single("Cocoa Butter"), &builtin()).is_none());
    }

    #[test]
    fn test_case_insensitive() {
        let d = builtin();
        let upper = match_item(&single("GELATIN"), &d).unwrap();
        let lower = match_item(&single("gelatin"), &d).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.matched_key.as_deref(), Some("gelatin"));
    }

    #[test]
    fn test_match_items_policies() {
        let items = tokenize("Sugar, Whey, Salt");
        let d = builtin();

        let matched = match_items(&items, &d, MatchPolicy::MatchedOnly);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].item, 1);

        let every = match_items(&items, &d, MatchPolicy::EveryItem);
        assert_eq!(every.len(), 3);
        assert_eq!(every[0].level, RiskLevel::Unknown);
        assert!(every[0].matched_key.is_none());
        assert!(every[0].explanation.is_empty());
        assert_eq!(every[1].level, RiskLevel::Low);
        let order: Vec<usize> = every.iter().map(|f| f.item).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
