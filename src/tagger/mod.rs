//! Ingredient risk tagging: text → candidate items → findings → verdict.
//!
//! - [`tokenizer`]: case-folds and splits raw ingredient text into indexed items.
//! - [`matcher`]: resolves each item to its strongest dictionary entry.
//! - [`aggregator`]: reduces findings to one overall [`RiskLevel`](crate::models::RiskLevel).
//!
//! Everything here is pure: no I/O, no shared mutable state.

pub mod aggregator;
pub mod matcher;
pub mod tokenizer;

pub use matcher::MatchPolicy;

use tracing::debug;

use crate::dictionary::Dictionary;
use crate::models::{Product, ProductReport, Verdict};

/// Run the full pipeline over one ingredient text.
pub fn classify(text: &str, dictionary: &Dictionary, policy: MatchPolicy) -> Verdict {
    let items = tokenizer::tokenize(text);
    let findings = matcher::match_items(&items, dictionary, policy);
    let verdict = aggregator::aggregate(findings);

    debug!(
        items = items.len(),
        findings = verdict.findings.len(),
        overall = %verdict.overall_level,
        "ingredient text classified"
    );

    verdict
}

/// Classify every product against the same snapshot.
pub fn classify_products(
    products: Vec<Product>,
    dictionary: &Dictionary,
    policy: MatchPolicy,
) -> Vec<ProductReport> {
    products
        .into_iter()
        .map(|product| {
            let verdict = classify(&product.ingredients_text, dictionary, policy);
            ProductReport { product, verdict }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::builtin::builtin;
    use crate::dictionary::DictionaryEntry;
    use crate::models::RiskLevel;

    const CHOCOLATE: &str = "Sugar, Cocoa Butter, Milk Solids (14%), Cocoa Mass, Gelatin (Pork), \
                             Emulsifiers (Soy Lecithin, 476), Flavours, Carmine.";

    #[test]
    fn test_chocolate_scenario() {
        let verdict = classify(CHOCOLATE, &builtin(), MatchPolicy::MatchedOnly);
        assert_eq!(verdict.overall_level, RiskLevel::High);
        assert_eq!(verdict.findings.len(), 2);

        // "gelatin (pork)" does not contain the phrase "pork gelatin".
        let gelatin = &verdict.findings[0];
        assert_eq!(gelatin.item, 4);
        assert_eq!(gelatin.matched_key.as_deref(), Some("gelatin"));
        assert_eq!(gelatin.level, RiskLevel::Medium);
        assert_eq!(gelatin.excerpt(CHOCOLATE), "Gelatin (Pork)");

        let carmine = &verdict.findings[1];
        assert_eq!(carmine.item, 8);
        assert_eq!(carmine.matched_key.as_deref(), Some("carmine"));
        assert_eq!(carmine.level, RiskLevel::High);
        assert_eq!(carmine.explanation, "Derived from insects (E120).");
    }

    #[test]
    fn test_pork_gelatin_phrase() {
        let dict = Dictionary::from_entries(
            None,
            vec![
                DictionaryEntry::new("gelatin", RiskLevel::Medium, ""),
                DictionaryEntry::new("pork gelatin", RiskLevel::High, ""),
            ],
        )
        .unwrap();
        let verdict = classify("Pork Gelatin (Bovine)", &dict, MatchPolicy::MatchedOnly);
        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(verdict.findings[0].matched_key.as_deref(), Some("pork gelatin"));
        assert_eq!(verdict.overall_level, RiskLevel::High);
    }

    #[test]
    fn test_deterministic_verdicts() {
        let dict = builtin();
        let a = serde_json::to_string(&classify(CHOCOLATE, &dict, MatchPolicy::EveryItem)).unwrap();
        let b = serde_json::to_string(&classify(CHOCOLATE, &dict, MatchPolicy::EveryItem)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_findings_follow_item_order() {
        let text = "Carmine, Whey, Water, Alcohol, Gelatin";
        for policy in [MatchPolicy::MatchedOnly, MatchPolicy::EveryItem] {
            let verdict = classify(text, &builtin(), policy);
            assert!(verdict.findings.windows(2).all(|w| w[0].item <= w[1].item));
        }
    }

    #[test]
    fn test_empty_text_is_unknown() {
        for text in ["", "   "] {
            let verdict = classify(text, &builtin(), MatchPolicy::EveryItem);
            assert_eq!(verdict.overall_level, RiskLevel::Unknown);
            assert!(verdict.findings.is_empty());
        }
    }

    #[test]
    fn test_adding_high_entry_never_lowers_level() {
        let base = builtin();
        let texts = [
            CHOCOLATE,
            "Whey Powder, Sugar",
            "Natural Flavours, Salt",
            "Sweet Whey, Gelatin",
        ];
        let additions = ["whey powder", "flavours", "salt", "sweet whey", "e", "gelatin (pork)"];

        for text in texts {
            let before = classify(text, &base, MatchPolicy::MatchedOnly).overall_level;
            for key in additions {
                let extended = base
                    .with_entry(DictionaryEntry::new(key, RiskLevel::High, ""))
                    .unwrap();
                let after = classify(text, &extended, MatchPolicy::MatchedOnly).overall_level;
                assert!(after >= before, "{key:?} lowered {text:?}");
            }
        }
    }

    #[test]
    fn test_classify_products_keeps_product_order() {
        let products = vec![
            Product::from_text("water", "Water"),
            Product::from_text("gummies", "Glucose Syrup, Gelatin, E120"),
        ];
        let reports = classify_products(products, &builtin(), MatchPolicy::MatchedOnly);
        assert_eq!(reports[0].product.name, "water");
        assert_eq!(reports[0].verdict.overall_level, RiskLevel::Unknown);
        assert_eq!(reports[1].verdict.overall_level, RiskLevel::High);
        assert_eq!(reports[1].verdict.findings.len(), 2);
    }
}
