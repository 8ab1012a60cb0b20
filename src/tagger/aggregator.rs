use crate::models::{Finding, RiskLevel, Verdict};

/// Reduce per-item findings to one verdict.
///
/// The overall level is the most severe finding, or `unknown` when nothing
/// matched. Findings keep the order they were given in.
pub fn aggregate(findings: Vec<Finding>) -> Verdict {
    let overall_level = findings
        .iter()
        .map(|f| f.level)
        .max()
        .unwrap_or(RiskLevel::Unknown);

    Verdict {
        overall_level,
        findings,
    }
}
