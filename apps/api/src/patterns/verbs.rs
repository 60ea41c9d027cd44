//! Action-verb classification for résumé bullets.
//!
//! A bullet's opening verb is checked against curated strong and weak sets.
//! Weak verbs describe presence rather than outcome ("helped", "worked on",
//! "responsible for"); anything else that is not strong counts as `Other`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbStrength {
    Strong,
    Weak,
    Other,
}

pub const STRONG_VERBS: &[&str] = &[
    "accelerated", "achieved", "architected", "authored", "automated", "boosted", "built",
    "championed", "coached", "consolidated", "created", "cut", "decreased", "delivered",
    "deployed", "designed", "developed", "directed", "doubled", "drove", "eliminated",
    "engineered", "established", "expanded", "founded", "generated", "grew", "headed",
    "implemented", "improved", "increased", "initiated", "integrated", "introduced", "launched",
    "led", "managed", "mentored", "migrated", "modernized", "negotiated", "optimized",
    "orchestrated", "overhauled", "oversaw", "owned", "pioneered", "produced", "published",
    "rebuilt", "redesigned", "reduced", "refactored", "resolved", "restructured", "saved",
    "scaled", "secured", "shipped", "simplified", "spearheaded", "standardized", "streamlined",
    "trained", "transformed", "tripled", "unified", "won",
];

pub const WEAK_VERBS: &[&str] = &[
    "assisted", "attended", "contributed", "did", "duties", "exposed", "familiarized", "handled",
    "helped", "involved", "made", "participated", "responsible", "served", "supported", "tasked",
    "tried", "used", "utilized", "worked",
];

/// First alphabetic word of a bullet, lowercased. Leading markers and numbering
/// are expected to be stripped already.
pub fn leading_verb(bullet: &str) -> Option<String> {
    bullet
        .split_whitespace()
        .next()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphabetic())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
}

pub fn classify_verb(verb: &str) -> VerbStrength {
    let verb = verb.to_lowercase();
    if STRONG_VERBS.contains(&verb.as_str()) {
        VerbStrength::Strong
    } else if WEAK_VERBS.contains(&verb.as_str()) {
        VerbStrength::Weak
    } else {
        VerbStrength::Other
    }
}

pub fn is_strong_verb(word: &str) -> bool {
    classify_verb(word) == VerbStrength::Strong
}
