//! Visa / work-authorization signal detection.
//!
//! Two independent sources: the user's explicitly selected status, and pattern
//! matches in the résumé text. Signals are deduplicated by label and kept in order
//! of first detection. `OPT`, `CPT`, `EAD` and `USCIS` are matched on the uppercase
//! form only, so "optimal" or "concept" never trigger.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::context::{UserContext, VisaStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaSignalResult {
    pub visa_flagged: bool,
    pub signals: Vec<String>,
}

/// Ordered catalogue of (label, pattern). Case-insensitive entries carry `(?i)`.
const VISA_PATTERNS: &[(&str, &str)] = &[
    // Visa type codes
    ("H-1B visa mention", r"(?i)\bH-?1B\b"),
    // "F-1" alone is also the ML metric, so require visa context.
    (
        "F-1 visa mention",
        r"(?i)\bF-?1\s+(?:visa|student|status)\b|\b(?:on|holding)\s+(?:an?\s+)?F-?1\b",
    ),
    ("J-1 visa mention", r"(?i)\bJ-1\b"),
    ("L-1 visa mention", r"(?i)\bL-1[AB]?\b"),
    ("O-1 visa mention", r"(?i)\bO-1[AB]?\b"),
    ("E-2/E-3 visa mention", r"(?i)\bE-[23]\b"),
    ("H-4 visa mention", r"(?i)\bH-4\b|\bH4 (?:visa|EAD)\b"),
    // Uppercase-only abbreviations
    ("OPT mention", r"\bOPT\b"),
    ("CPT mention", r"\bCPT\b"),
    ("EAD mention", r"\bEAD\b"),
    // Work-authorization phrases
    ("Work authorization mention", r"(?i)\bwork authori[sz]ation\b"),
    (
        "Sponsorship requirement",
        r"(?i)\b(?:requires?|requiring|need|needs|seeking)\s+(?:visa\s+)?sponsorship\b",
    ),
    ("Green card mention", r"(?i)\bgreen card\b"),
    ("Permanent resident mention", r"(?i)\bpermanent resident\b"),
    ("Immigration status mention", r"(?i)\bimmigration status\b"),
    ("Work permit mention", r"(?i)\bwork permit\b"),
    // Government forms
    ("USCIS reference", r"\bUSCIS\b"),
    ("I-140 petition reference", r"(?i)\bI-140\b"),
    ("I-485 application reference", r"(?i)\bI-485\b"),
];

static COMPILED_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    VISA_PATTERNS
        .iter()
        .map(|(label, pattern)| (*label, Regex::new(pattern).expect("visa regex is valid")))
        .collect()
});

fn user_status_signal(status: VisaStatus) -> Option<&'static str> {
    match status {
        VisaStatus::H1b => Some("User-reported H-1B status"),
        VisaStatus::OptCpt => Some("User-reported OPT/CPT status"),
        VisaStatus::Other => Some("User-reported non-immigrant visa status"),
        VisaStatus::UsCitizen | VisaStatus::GreenCard | VisaStatus::PreferNotToSay => None,
    }
}

fn push_unique(signals: &mut Vec<String>, label: &str) {
    if !signals.iter().any(|s| s == label) {
        signals.push(label.to_string());
    }
}

pub fn detect_visa_status(resume_text: &str, user_context: Option<&UserContext>) -> VisaSignalResult {
    let mut signals = Vec::new();

    if let Some(label) = user_context
        .and_then(|ctx| ctx.visa_status)
        .and_then(user_status_signal)
    {
        push_unique(&mut signals, label);
    }

    for (label, re) in COMPILED_PATTERNS.iter() {
        if re.is_match(resume_text) {
            push_unique(&mut signals, label);
        }
    }

    VisaSignalResult {
        visa_flagged: !signals.is_empty(),
        signals,
    }
}
