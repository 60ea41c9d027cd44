//! Keyword Matcher — compares extracted keywords against résumé text.
//!
//! Two modes:
//! - `Strict` (ATS): exact, case-insensitive, word-boundary matching. A phrase
//!   matches only when every constituent word is present. `/` and `-` are
//!   boundaries, so "Python/Django" carries both "python" and "django".
//! - `Fuzzy` (HR layer only): a keyword word matches when its stem equals the stem
//!   of any résumé token, or of a part of one split at `/`, `-` or `.`. Not used
//!   for the ATS score unless the caller opts out of strict mode.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ats::keywords::{contains_term, tokenize, Keyword};
use crate::ats::stemmer::stem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Strict,
    Fuzzy,
}

impl MatchMode {
    pub fn from_strict_flag(strict_mode: bool) -> Self {
        if strict_mode {
            MatchMode::Strict
        } else {
            MatchMode::Fuzzy
        }
    }
}

/// Outcome of matching a keyword set against a résumé.
///
/// `matched` and `missing` partition the input keywords in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<Keyword>,
    pub missing: Vec<Keyword>,
    /// round(100 × matched / total); 100 when there was nothing to match.
    pub match_pct: u32,
}

pub fn match_keywords(resume_text: &str, keywords: &[Keyword], mode: MatchMode) -> MatchResult {
    let (matched, missing): (Vec<Keyword>, Vec<Keyword>) = match mode {
        MatchMode::Strict => {
            let resume_lower = resume_text.to_lowercase();
            keywords
                .iter()
                .cloned()
                .partition(|kw| kw.words().all(|w| contains_term(&resume_lower, w)))
        }
        MatchMode::Fuzzy => {
            let stems: HashSet<String> = tokenize(resume_text)
                .iter()
                .flat_map(|t| std::iter::once(t.as_str()).chain(t.split(['/', '-', '.'])))
                .filter(|part| !part.is_empty())
                .map(stem)
                .collect();
            keywords
                .iter()
                .cloned()
                .partition(|kw| kw.words().all(|w| stems.contains(&stem(w))))
        }
    };

    let match_pct = match_percentage(matched.len(), keywords.len());
    MatchResult {
        matched,
        missing,
        match_pct,
    }
}

fn match_percentage(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    ((matched as f64 / total as f64) * 100.0).round() as u32
}
