//! Report renderers for classification results.
//!
//! - [`terminal`]: colored summary box plus a findings table per flagged product.
//! - [`pdf`]: cover page with stat cards and a paginated findings table.
//! - [`digest`]: plain-text alert listing the high-risk products.

pub mod digest;
pub mod pdf;
pub mod terminal;

use crate::models::{ProductReport, RiskLevel};

/// Number of products per overall level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LevelCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
}

impl LevelCounts {
    pub fn from_reports(reports: &[ProductReport]) -> Self {
        let mut counts = LevelCounts::default();
        for report in reports {
            match report.verdict.overall_level {
                RiskLevel::High => counts.high += 1,
                RiskLevel::Medium => counts.medium += 1,
                RiskLevel::Low => counts.low += 1,
                RiskLevel::Unknown => counts.unknown += 1,
            }
        }
        counts
    }
}
