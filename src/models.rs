use serde::{Deserialize, Serialize};

/// Severity of an ingredient, ordered `Unknown < Low < Medium < High`.
///
/// `Unknown` means no dictionary entry matched, not that the level of a
/// matched entry is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Unknown,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Unknown => write!(f, "unknown"),
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Byte offsets `[start, end)` into the untouched ingredient text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// One normalized, delimiter-separated segment of an ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub text: String,
    pub span: Span,
    pub index: usize,
}

/// Outcome of matching one candidate item against the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Index of the originating [`CandidateItem`].
    pub item: usize,
    pub span: Span,
    pub matched_key: Option<String>,
    pub level: RiskLevel,
    pub explanation: String,
}

impl Finding {
    /// The slice of `source` this finding was produced from, original casing intact.
    pub fn excerpt<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }

    pub fn is_match(&self) -> bool {
        self.matched_key.is_some()
    }
}

/// Aggregated result for one ingredient text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub overall_level: RiskLevel,
    pub findings: Vec<Finding>,
}

impl Verdict {
    /// Findings backed by a dictionary entry, skipping `unknown` placeholders.
    pub fn matched(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_match())
    }
}

/// A product as delivered by the catalog or read from a saved product file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub off_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub ingredients_text: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Product {
    /// Product wrapper for free-standing ingredient text.
    pub fn from_text(name: impl Into<String>, ingredients_text: impl Into<String>) -> Self {
        Product {
            off_id: None,
            name: name.into(),
            brand: String::new(),
            ingredients_text: ingredients_text.into(),
            labels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductReport {
    pub product: Product,
    pub verdict: Verdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Unknown < RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(
            [RiskLevel::Low, RiskLevel::High, RiskLevel::Unknown].iter().max(),
            Some(&RiskLevel::High)
        );
    }

    #[test]
    fn test_risk_level_serde_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"medium\"");
        let level: RiskLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(level, RiskLevel::High);
    }

    #[test]
    fn test_finding_excerpt_keeps_original_casing() {
        let source = "Sugar, Gelatin (Pork)";
        let finding = Finding {
            item: 1,
            span: Span { start: 7, end: 21 },
            matched_key: Some("gelatin".to_string()),
            level: RiskLevel::Medium,
            explanation: String::new(),
        };
        assert_eq!(finding.excerpt(source), "Gelatin (Pork)");
    }

    #[test]
    fn test_product_defaults_when_fields_missing() {
        let product: Product = serde_json::from_str(r#"{"name": "Bar"}"#).unwrap();
        assert_eq!(product.name, "Bar");
        assert!(product.off_id.is_none());
        assert!(product.ingredients_text.is_empty());
        assert!(product.labels.is_empty());
    }
}
