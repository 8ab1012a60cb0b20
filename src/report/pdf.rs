use std::path::Path;

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use crate::dictionary::Dictionary;
use crate::models::{ProductReport, RiskLevel};

use super::LevelCounts;

type Rgb3 = (f32, f32, f32);

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const T_END: f32 = PAGE_W - MARGIN;
const COVER_HDR_H: f32 = 72.0;

// ── Palette ───────────────────────────────────────────────────────────────────
const BG: Rgb3 = (1.00, 1.00, 1.00);
const PANEL_ALT: Rgb3 = (0.95, 0.97, 0.96);
const PANEL_BORDER: Rgb3 = (0.85, 0.89, 0.87);
const ACCENT_GRN: Rgb3 = (0.05, 0.55, 0.42);
const ACCENT_TEAL: Rgb3 = (0.10, 0.42, 0.62);
const TEXT_PRI: Rgb3 = (0.07, 0.10, 0.09);
const TEXT_SEC: Rgb3 = (0.34, 0.42, 0.40);
const TEXT_MUT: Rgb3 = (0.56, 0.64, 0.62);
const WHITE: Rgb3 = (1.00, 1.00, 1.00);
const WHITE_DIM: Rgb3 = (0.84, 0.95, 0.91);

const R_BADGE: f32 = 1.5;

// ── Findings table layout ─────────────────────────────────────────────────────
const COL_X: [f32; 4] = [MARGIN, MARGIN + 48.0, MARGIN + 110.0, MARGIN + 150.0];
const HEADERS: [&str; 4] = ["PRODUCT", "INGREDIENT", "MATCHED", "LEVEL"];
const HDR_Y: f32 = 268.5;
const FIRST_Y: f32 = 259.5;
const BOT_MARGIN: f32 = 25.0;
const BASE_ROW_H: f32 = 7.0;
const EXTRA_LINE_H: f32 = 3.5;
const INGREDIENT_WRAP: usize = 34;

/// Render the PDF digest: cover page, then the findings table.
pub fn render(reports: &[ProductReport], dictionary: &Dictionary, output_path: &Path) -> Result<()> {
    let doc = PdfDocument::empty("Ingredient Risk Digest");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    add_cover_page(&doc, &fonts, reports, dictionary);
    add_findings_pages(&doc, &fonts, &table_rows(reports));

    let bytes = doc.save_to_bytes()?;
    std::fs::write(output_path, &bytes)
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    println!("PDF digest written to: {}", output_path.display());
    Ok(())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// One line of the findings table.
#[derive(Debug, PartialEq)]
struct TableRow {
    product: String,
    ingredient: Vec<String>,
    matched: String,
    level: RiskLevel,
}

impl TableRow {
    fn height(&self) -> f32 {
        BASE_ROW_H + self.ingredient.len().saturating_sub(1) as f32 * EXTRA_LINE_H
    }
}

/// Flatten reports into rows: one per finding, one placeholder per clean product.
fn table_rows(reports: &[ProductReport]) -> Vec<TableRow> {
    let mut rows = Vec::new();
    for report in reports {
        let source = &report.product.ingredients_text;
        if report.verdict.findings.is_empty() {
            rows.push(TableRow {
                product: report.product.name.clone(),
                ingredient: vec!["no dictionary terms found".to_string()],
                matched: "-".to_string(),
                level: RiskLevel::Unknown,
            });
            continue;
        }
        for finding in &report.verdict.findings {
            rows.push(TableRow {
                product: report.product.name.clone(),
                ingredient: wrap_text(finding.excerpt(source), INGREDIENT_WRAP),
                matched: finding.matched_key.clone().unwrap_or_else(|| "-".to_string()),
                level: finding.level,
            });
        }
    }
    rows
}

// ── Cover page ────────────────────────────────────────────────────────────────

fn add_cover_page(
    doc: &PdfDocumentReference,
    fonts: &Fonts,
    reports: &[ProductReport],
    dictionary: &Dictionary,
) {
    let canvas = Canvas::page(doc, "Cover");
    let counts = LevelCounts::from_reports(reports);
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    canvas.rect(0.0, 0.0, PAGE_W, PAGE_H, BG);

    let hdr_bot = PAGE_H - COVER_HDR_H;
    canvas.gradient(0.0, hdr_bot, PAGE_W, COVER_HDR_H, ACCENT_GRN, ACCENT_TEAL, 28);
    canvas.text(
        &format!("ingredient-checkr v{}", env!("CARGO_PKG_VERSION")),
        7.5, PAGE_W - MARGIN - 44.0, PAGE_H - 10.5, &fonts.regular, WHITE_DIM,
    );
    canvas.text("Ingredient Risk", 28.0, MARGIN, PAGE_H - 26.0, &fonts.bold, WHITE);
    canvas.text("Digest", 28.0, MARGIN, PAGE_H - 41.0, &fonts.bold, WHITE_DIM);

    // Dictionary chip
    let chip_y = hdr_bot - 18.0;
    let chip_h = 12.0;
    canvas.rounded(MARGIN, chip_y, 106.0, chip_h, R_BADGE, BG);
    canvas.rounded_outline(MARGIN, chip_y, 106.0, chip_h, R_BADGE, PANEL_BORDER);
    canvas.rect(MARGIN, chip_y, 2.5, chip_h, ACCENT_GRN);
    canvas.text("DICTIONARY", 6.0, MARGIN + 5.0, chip_y + chip_h - 3.8, &fonts.bold, TEXT_MUT);
    canvas.text(
        &truncate(
            &format!(
                "{}  ·  {} terms",
                dictionary.version().unwrap_or("unversioned"),
                dictionary.len()
            ),
            40,
        ),
        9.5, MARGIN + 5.0, chip_y + 2.8, &fonts.bold, TEXT_PRI,
    );
    canvas.text(&format!("Checked  {}", today), 9.0, MARGIN, chip_y - 8.0, &fonts.regular, TEXT_SEC);

    let rule_y = chip_y - 16.5;
    canvas.hline(MARGIN, T_END, rule_y, PANEL_BORDER);
    canvas.text("OVERVIEW", 6.5, MARGIN, rule_y - 7.0, &fonts.bold, TEXT_MUT);

    let cards = [
        ("PRODUCTS", reports.len(), ACCENT_TEAL),
        ("HIGH", counts.high, level_colors(RiskLevel::High).1),
        ("MEDIUM", counts.medium, level_colors(RiskLevel::Medium).1),
        ("LOW", counts.low, level_colors(RiskLevel::Low).1),
        ("NO MATCH", counts.unknown, TEXT_MUT),
    ];
    let gap = 4.0;
    let card_w = (T_END - MARGIN - gap * (cards.len() - 1) as f32) / cards.len() as f32;
    let card_y = rule_y - 42.0;
    let card_h = 26.0;
    for (i, (label, value, accent)) in cards.iter().enumerate() {
        let x = MARGIN + (card_w + gap) * i as f32;
        canvas.rounded(x, card_y, card_w, card_h, R_BADGE, BG);
        canvas.rounded_outline(x, card_y, card_w, card_h, R_BADGE, PANEL_BORDER);
        canvas.rect(x, card_y + card_h - 2.0, card_w, 2.0, *accent);
        canvas.text(&value.to_string(), 20.0, x + 5.0, card_y + card_h * 0.38, &fonts.bold, *accent);
        canvas.text(label, 6.5, x + 5.0, card_y + 3.5, &fonts.regular, TEXT_MUT);
    }

    let section_y = card_y - 13.0;
    canvas.hline(MARGIN, T_END, section_y, PANEL_BORDER);
    canvas.text("HOW TO READ THIS", 6.5, MARGIN, section_y - 7.5, &fonts.bold, TEXT_MUT);
    let notes = [
        ("Findings", "Each flagged ingredient, the dictionary term it matched and its level"),
        ("Overall level", "A product takes the level of its most severe finding"),
        ("No match", "Nothing in the list matched the dictionary; this is not a clean bill"),
    ];
    for (j, (title, desc)) in notes.iter().enumerate() {
        let y = section_y - 15.0 - j as f32 * 10.0;
        canvas.rounded(MARGIN, y + 2.0, 2.0, 2.0, 1.0, ACCENT_GRN);
        canvas.text(title, 8.5, MARGIN + 5.0, y + 2.0, &fonts.bold, TEXT_PRI);
        canvas.text(desc, 8.0, MARGIN + 5.0, y - 3.5, &fonts.regular, TEXT_SEC);
    }

    canvas.hline(MARGIN, T_END, 22.0, PANEL_BORDER);
    canvas.text(
        &format!("Generated by ingredient-checkr v{}", env!("CARGO_PKG_VERSION")),
        7.5, MARGIN, 15.0, &fonts.regular, TEXT_MUT,
    );
    canvas.text(&today, 7.5, T_END - 22.0, 15.0, &fonts.regular, TEXT_MUT);
}

// ── Findings table ────────────────────────────────────────────────────────────

fn add_findings_pages(doc: &PdfDocumentReference, fonts: &Fonts, rows: &[TableRow]) {
    let mut canvas: Option<Canvas> = None;
    let mut page_num = 0u32;
    let mut cur_y = FIRST_Y;

    for (row_idx, row) in rows.iter().enumerate() {
        let row_h = row.height();
        if canvas.is_none() || cur_y - row_h < BOT_MARGIN {
            page_num += 1;
            canvas = Some(findings_page(doc, fonts, page_num));
            cur_y = FIRST_Y;
        }
        let Some(page) = canvas.as_ref() else { continue };

        if row_idx % 2 == 0 {
            page.rect(MARGIN, cur_y - row_h + 1.5, T_END - MARGIN, row_h, PANEL_ALT);
        }

        let text_y = cur_y - 4.0;
        page.text(&truncate(&row.product, 28), 8.0, COL_X[0] + 1.5, text_y, &fonts.regular, TEXT_PRI);
        for (j, line) in row.ingredient.iter().enumerate() {
            let y = text_y - j as f32 * EXTRA_LINE_H;
            page.text(line, 8.0, COL_X[1] + 1.5, y, &fonts.regular, TEXT_SEC);
        }
        page.text(&truncate(&row.matched, 22), 8.0, COL_X[2] + 1.5, text_y, &fonts.regular, TEXT_SEC);

        let (bg, fg) = level_colors(row.level);
        let badge_x = COL_X[3] + 1.5;
        let badge_y = cur_y - row_h + 2.2;
        page.rounded(badge_x, badge_y, 22.0, 4.8, R_BADGE, bg);
        page.text(
            &row.level.to_string().to_uppercase(),
            7.0, badge_x + 3.0, badge_y + 1.1, &fonts.bold, fg,
        );

        page.hline(MARGIN, T_END, cur_y - row_h + 1.5, PANEL_BORDER);
        cur_y -= row_h;
    }
}

fn findings_page(doc: &PdfDocumentReference, fonts: &Fonts, page_num: u32) -> Canvas {
    let canvas = Canvas::page(doc, "Findings");

    canvas.rect(0.0, 0.0, PAGE_W, PAGE_H, BG);
    canvas.gradient(0.0, PAGE_H - 2.5, PAGE_W, 2.5, ACCENT_GRN, ACCENT_TEAL, 21);
    canvas.text("Findings", 14.0, MARGIN, 282.5, &fonts.bold, TEXT_PRI);
    canvas.text(&format!("Page {}", page_num), 8.0, T_END - 14.0, 283.0, &fonts.regular, TEXT_MUT);
    canvas.hline(MARGIN, T_END, 277.5, PANEL_BORDER);

    canvas.rounded(MARGIN, HDR_Y - 7.5, T_END - MARGIN, 9.5, R_BADGE, BG);
    canvas.rounded_outline(MARGIN, HDR_Y - 7.5, T_END - MARGIN, 9.5, R_BADGE, PANEL_BORDER);
    for (x, header) in COL_X.iter().zip(HEADERS) {
        canvas.text(header, 7.0, x + 1.5, HDR_Y - 4.0, &fonts.bold, TEXT_MUT);
    }

    canvas.hline(MARGIN, T_END, 22.0, PANEL_BORDER);
    canvas.text(
        &format!("ingredient-checkr v{}", env!("CARGO_PKG_VERSION")),
        7.5, MARGIN, 15.0, &fonts.regular, TEXT_MUT,
    );
    canvas
}

/// Badge background and foreground for a level.
fn level_colors(level: RiskLevel) -> (Rgb3, Rgb3) {
    match level {
        RiskLevel::High => ((1.00, 0.91, 0.91), (0.76, 0.09, 0.13)),
        RiskLevel::Medium => ((1.00, 0.95, 0.87), (0.70, 0.40, 0.02)),
        RiskLevel::Low => ((0.90, 0.98, 0.92), (0.07, 0.52, 0.22)),
        RiskLevel::Unknown => ((0.94, 0.95, 0.95), TEXT_MUT),
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────────

fn color((r, g, b): Rgb3) -> Color {
    Color::Rgb(Rgb { r, g, b, icc_profile: None })
}

/// One page layer plus the shape primitives the digest needs.
struct Canvas {
    layer: PdfLayerReference,
}

impl Canvas {
    fn page(doc: &PdfDocumentReference, name: &str) -> Self {
        let (page, layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), name);
        Canvas {
            layer: doc.get_page(page).get_layer(layer),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn text(&self, s: &str, size: f32, x: f32, y: f32, font: &IndirectFontRef, fill: Rgb3) {
        self.layer.set_fill_color(color(fill));
        self.layer.use_text(s, size, Mm(x), Mm(y), font);
    }

    fn rect(&self, x: f32, y: f32, w: f32, h: f32, fill: Rgb3) {
        let ring = vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x), Mm(y + h)), false),
        ];
        self.layer.set_fill_color(color(fill));
        self.polygon(ring, PaintMode::Fill);
    }

    #[allow(clippy::too_many_arguments)]
    fn rounded(&self, x: f32, y: f32, w: f32, h: f32, r: f32, fill: Rgb3) {
        self.layer.set_fill_color(color(fill));
        self.polygon(rounded_ring(x, y, w, h, r), PaintMode::Fill);
    }

    #[allow(clippy::too_many_arguments)]
    fn rounded_outline(&self, x: f32, y: f32, w: f32, h: f32, r: f32, stroke: Rgb3) {
        self.layer.set_outline_color(color(stroke));
        self.layer.set_outline_thickness(0.4);
        self.polygon(rounded_ring(x, y, w, h, r), PaintMode::Stroke);
        self.layer.set_outline_thickness(1.0);
    }

    fn hline(&self, x1: f32, x2: f32, y: f32, stroke: Rgb3) {
        self.layer.set_outline_color(color(stroke));
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        });
        self.layer.set_outline_thickness(1.0);
    }

    /// Left-to-right gradient made of `steps` overlapping vertical strips.
    #[allow(clippy::too_many_arguments)]
    fn gradient(&self, x: f32, y: f32, w: f32, h: f32, from: Rgb3, to: Rgb3, steps: usize) {
        let step_w = w / steps as f32;
        for i in 0..steps {
            let t = i as f32 / (steps - 1).max(1) as f32;
            let mix = (
                from.0 + (to.0 - from.0) * t,
                from.1 + (to.1 - from.1) * t,
                from.2 + (to.2 - from.2) * t,
            );
            self.rect(x + i as f32 * step_w, y, step_w + 0.6, h, mix);
        }
    }

    fn polygon(&self, ring: Vec<(Point, bool)>, mode: PaintMode) {
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }
}

/// Rounded rectangle outline, 8 segments per corner arc.
fn rounded_ring(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<(Point, bool)> {
    const SEGS: usize = 8;
    let r = r.min(w / 2.0).min(h / 2.0);
    let corners = [
        (x + w - r, y + r, 270.0f32),
        (x + w - r, y + h - r, 0.0),
        (x + r, y + h - r, 90.0),
        (x + r, y + r, 180.0),
    ];

    corners
        .iter()
        .flat_map(|&(cx, cy, start)| {
            (0..=SEGS).map(move |i| {
                let angle = (start + 90.0 * i as f32 / SEGS as f32).to_radians();
                (Point::new(Mm(cx + r * angle.cos()), Mm(cy + r * angle.sin())), false)
            })
        })
        .collect()
}

// ── Text helpers ──────────────────────────────────────────────────────────────

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    } else {
        s.to_string()
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
