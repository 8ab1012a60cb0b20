use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::models::{ProductReport, RiskLevel};

/// Plain-text alert listing every high-risk product and why it was flagged.
pub fn render(reports: &[ProductReport], date: NaiveDate) -> String {
    let mut out = String::new();
    let flagged: Vec<&ProductReport> = reports
        .iter()
        .filter(|r| r.verdict.overall_level == RiskLevel::High)
        .collect();

    let _ = writeln!(out, "Ingredient Risk Alert - {}", date.format("%B %d, %Y"));
    let _ = writeln!(out, "{}", "=".repeat(40));

    if flagged.is_empty() {
        let _ = writeln!(
            out,
            "No high-risk products were flagged among {} checked.",
            reports.len()
        );
    } else {
        let _ = writeln!(
            out,
            "We detected {} high-risk product{} out of {} checked. Please be cautious:\n",
            flagged.len(),
            if flagged.len() == 1 { "" } else { "s" },
            reports.len()
        );
        for report in flagged {
            write_product(&mut out, report);
        }
    }

    let _ = writeln!(out, "\nStay safe and always check your labels.");
    let _ = write!(out, "Generated by ingredient-checkr v{}", env!("CARGO_PKG_VERSION"));
    out
}

fn write_product(out: &mut String, report: &ProductReport) {
    let product = &report.product;
    let brand = if product.brand.is_empty() {
        "Unknown Brand"
    } else {
        product.brand.as_str()
    };

    let _ = writeln!(out, "! {} ({})", product.name, brand);
    let _ = writeln!(
        out,
        "   Risk Level: {}",
        report.verdict.overall_level.to_string().to_uppercase()
    );
    for finding in report.verdict.matched().filter(|f| f.level == RiskLevel::High) {
        let _ = writeln!(
            out,
            "   Reason: {} - {}",
            finding.excerpt(&product.ingredients_text),
            finding.explanation
        );
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::builtin::builtin;
    use crate::models::Product;
    use crate::tagger::{classify_products, MatchPolicy};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_digest_lists_high_risk_products() {
        let mut gums = Product::from_text("Fruit Gums", "Glucose Syrup, Gelatin, Carmine");
        gums.brand = "Sweetco".to_string();
        let products = vec![gums, Product::from_text("Crackers", "Flour, Whey")];
        let reports = classify_products(products, &builtin(), MatchPolicy::MatchedOnly);

        let text = render(&reports, date());
        assert!(text.starts_with("Ingredient Risk Alert - June 03, 2024\n"));
        assert!(text.contains("We detected 1 high-risk product out of 2 checked."));
        assert!(text.contains("! Fruit Gums (Sweetco)"));
        assert!(text.contains("   Risk Level: HIGH"));
        assert!(text.contains("   Reason: Carmine - Derived from insects (E120)."));
        assert!(!text.contains("Gelatin -"));
        assert!(!text.contains("Crackers"));
    }

    #[test]
    fn test_digest_all_clear() {
        let reports = classify_products(
            vec![Product::from_text("Water", "Water")],
            &builtin(),
            MatchPolicy::MatchedOnly,
        );
        let text = render(&reports, date());
        assert!(text.contains("No high-risk products were flagged among 1 checked."));
        assert!(text.contains("Stay safe and always check your labels."));
    }
}
