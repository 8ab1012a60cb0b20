use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::dictionary::Dictionary;
use crate::models::{ProductReport, RiskLevel};

use super::LevelCounts;

/// Render a colored terminal report.
pub fn render(
    reports: &[ProductReport],
    dictionary: &Dictionary,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let counts = LevelCounts::from_reports(reports);

    if quiet {
        println!(
            "Products: {}  High: {}  Medium: {}  Low: {}  Unknown: {}",
            reports.len(),
            counts.high.to_string().red(),
            counts.medium.to_string().yellow(),
            counts.low.to_string().green(),
            counts.unknown.to_string().dimmed(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "ingredient-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        " Dictionary: {} ({} terms)\n",
        dictionary.version().unwrap_or("unversioned"),
        dictionary.len()
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Products checked  : {}", reports.len()));
    println!(" │  {:<48} │", format!("{}  High           : {:>4}", "✗".red(), counts.high));
    println!(" │  {:<48} │", format!("{}  Medium         : {:>4}", "⚠".yellow(), counts.medium));
    println!(" │  {:<48} │", format!("{}  Low            : {:>4}", "✓".green(), counts.low));
    println!(" │  {:<48} │", format!("{}  No match       : {:>4}", "·".dimmed(), counts.unknown));
    println!(" └────────────────────────────────────────────────────┘\n");

    for report in reports {
        let level = report.verdict.overall_level;
        let flagged = report.verdict.matched().count();
        if flagged == 0 && !verbose {
            continue;
        }

        println!(
            " {} {} {}",
            level_tag(level),
            report.product.name.bold(),
            brand_suffix(&report.product.brand).dimmed()
        );
        if report.verdict.findings.is_empty() {
            println!("   no dictionary terms found\n");
            continue;
        }
        println!();
        render_table(report);
        println!();
    }

    Ok(())
}

fn render_table(report: &ProductReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Ingredient").add_attribute(Attribute::Bold),
            Cell::new("Matched").add_attribute(Attribute::Bold),
            Cell::new("Level").add_attribute(Attribute::Bold),
            Cell::new("Explanation").add_attribute(Attribute::Bold),
        ]);

    for finding in &report.verdict.findings {
        table.add_row(vec![
            Cell::new(finding.item).set_alignment(CellAlignment::Right),
            Cell::new(finding.excerpt(&report.product.ingredients_text)),
            Cell::new(finding.matched_key.as_deref().unwrap_or("—")),
            Cell::new(finding.level.to_string())
                .fg(level_color(finding.level))
                .set_alignment(CellAlignment::Center),
            Cell::new(&finding.explanation),
        ]);
    }

    println!("{}", table);
}

fn level_tag(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::High => "[HIGH]".red().bold(),
        RiskLevel::Medium => "[MEDIUM]".yellow().bold(),
        RiskLevel::Low => "[LOW]".green().bold(),
        RiskLevel::Unknown => "[UNKNOWN]".dimmed(),
    }
}

fn level_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::High => Color::Red,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::Low => Color::Green,
        RiskLevel::Unknown => Color::DarkGrey,
    }
}

fn brand_suffix(brand: &str) -> String {
    if brand.is_empty() {
        String::new()
    } else {
        format!("({})", brand)
    }
}
