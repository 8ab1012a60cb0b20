use std::sync::OnceLock;

use regex::Regex;

use crate::models::{CandidateItem, Span};

/// Characters that separate items in an ingredient list.
const DELIMITERS: &str = r"[,;.\n]";

fn delimiter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DELIMITERS).expect("delimiter pattern compiles"))
}

/// Case-fold and trim a phrase so it can be compared with dictionary keys.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split raw ingredient text into normalized candidate items.
///
/// Empty segments (consecutive delimiters, trailing punctuation) are dropped.
/// Parentheses get no special treatment, so `"Emulsifiers (Soy Lecithin, 476)"`
/// yields `"emulsifiers (soy lecithin"` and `"476)"` as siblings.
pub fn tokenize(text: &str) -> Vec<CandidateItem> {
    let mut items = Vec::new();
    let mut seg_start = 0;

    let bounds = delimiter_re()
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((text.len(), text.len())));

    for (delim_start, delim_end) in bounds {
        let segment = &text[seg_start..delim_start];
        let trimmed = segment.trim();

        if !trimmed.is_empty() {
            let lead = segment.len() - segment.trim_start().len();
            let start = seg_start + lead;
            let index = items.len();
            items.push(CandidateItem {
                text: trimmed.to_lowercase(),
                span: Span {
                    start,
                    end: start + trimmed.len(),
                },
                index,
            });
        }

        seg_start = delim_end;
    }

    items
}
