//! Keyword Extractor — pulls salient terms out of a job description.
//!
//! Known multi-word phrases are scanned first and take priority: any word that is
//! part of a matched phrase is never emitted on its own. Remaining tokens are kept
//! when they are not stop words and carry enough signal (length ≥ 3, or a known
//! short technical term such as "go" or "ml").

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A normalized (trimmed, lowercase) keyword: a single word or a short phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Keyword(String);

impl Keyword {
    pub fn new(term: impl AsRef<str>) -> Self {
        let normalized = term
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constituent words, in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl From<&str> for Keyword {
    fn from(term: &str) -> Self {
        Keyword::new(term)
    }
}

impl From<String> for Keyword {
    fn from(term: String) -> Self {
        Keyword::new(term)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static tables
// ────────────────────────────────────────────────────────────────────────────

/// Multi-word technical and professional phrases (≤ 3 words). Single-token entries
/// like "ci/cd" are listed here so they are always emitted, even if short.
const KNOWN_PHRASES: &[&str] = &[
    "machine learning",
    "deep learning",
    "natural language processing",
    "computer vision",
    "data science",
    "data analysis",
    "data engineering",
    "data pipelines",
    "big data",
    "large language models",
    "ci/cd",
    "continuous integration",
    "continuous delivery",
    "test driven development",
    "unit testing",
    "version control",
    "distributed systems",
    "system design",
    "software development",
    "software engineering",
    "full stack",
    "front end",
    "back end",
    "rest api",
    "rest apis",
    "react native",
    "spring boot",
    "ruby on rails",
    "google cloud",
    "amazon web services",
    "cloud computing",
    "infrastructure as code",
    "sql server",
    "power bi",
    "project management",
    "product management",
    "stakeholder management",
    "agile methodologies",
    "user experience",
    "user research",
    "customer service",
    "problem solving",
    "cross functional",
    "financial modeling",
    "supply chain",
    "quality assurance",
    "information security",
    "site reliability",
];

/// Very short tokens that are still meaningful terms.
const SHORT_TERMS: &[&str] = &[
    "c", "r", "go", "ai", "ml", "ui", "ux", "qa", "bi", "c#", "js", "ts", "hr", "pm", "ar", "vr",
];

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "again", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "etc", "every", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "least", "less", "like", "may", "me", "might", "more", "most", "must", "my", "no",
    "nor", "not", "now", "of", "off", "on", "once", "one", "only", "or", "other", "our", "ours",
    "out", "over", "own", "per", "plus", "same", "shall", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "upon", "us", "very", "via", "was", "we",
    "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "within", "without", "would", "you", "your", "yours",
    // Job-posting boilerplate
    "ability", "able", "applicant", "applicants", "apply", "benefits", "best", "bonus", "candidate",
    "candidates", "company", "competitive", "culture", "environment", "equal", "excellent",
    "experience", "experienced", "familiarity", "good", "great", "help", "ideal", "including",
    "join", "knowledge", "looking", "new", "offer", "opportunity", "opportunities", "plus",
    "position", "preferred", "proficiency", "proficient", "qualifications", "related", "required",
    "requirements", "responsibilities", "responsible", "role", "salary", "seeking", "skills",
    "strong", "team", "teams", "understanding", "well", "work", "working", "world", "year",
    "years", "yrs",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9][a-z0-9+#./\-]*").expect("token regex is valid"));

// ────────────────────────────────────────────────────────────────────────────
// Tokenization helpers (shared with the matcher and job-type classifier)
// ────────────────────────────────────────────────────────────────────────────

/// Lowercases and splits text into word tokens, keeping in-word technical
/// punctuation ("c++", "node.js", "ci/cd") and trimming trailing `.`, `/`, `-`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().trim_end_matches(['.', '/', '-']).to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// True if `term` occurs in `haystack_lower` with non-alphanumeric characters
/// (or the string edge) on both sides. A trailing `+` or `#` extends the word,
/// so "c" does not match inside "c++" or "c#". Both inputs must already be lowercase.
pub(crate) fn contains_term(haystack_lower: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack_lower.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before_ok = haystack_lower[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack_lower[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric() && c != '+' && c != '#');
        before_ok && after_ok
    })
}

fn is_significant(token: &str) -> bool {
    if STOP_WORD_SET.contains(token) || !token.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    token.chars().count() >= 3 || SHORT_TERMS.contains(&token)
}

/// Index of the first contiguous occurrence of `needle` in `tokens`.
fn find_sequence(tokens: &[String], needle: &[&str]) -> Option<usize> {
    if needle.is_empty() || needle.len() > tokens.len() {
        return None;
    }
    tokens
        .windows(needle.len())
        .position(|window| window.iter().zip(needle).all(|(t, n)| t == n))
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Extracts deduplicated keywords from a job description.
///
/// Phrases come first (ordered by first appearance), then single words (ordered
/// by first appearance). Empty input yields an empty list.
pub fn extract_keywords(job_description: &str) -> Vec<Keyword> {
    let tokens = tokenize(job_description);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut phrase_hits: Vec<(usize, &'static str)> = Vec::new();
    let mut absorbed: HashSet<&'static str> = HashSet::new();

    for &phrase in KNOWN_PHRASES {
        let parts: Vec<&'static str> = phrase.split_whitespace().collect();
        if let Some(position) = find_sequence(&tokens, &parts) {
            phrase_hits.push((position, phrase));
            absorbed.extend(parts);
        }
    }
    phrase_hits.sort_by_key(|(position, _)| *position);

    let mut seen: HashSet<String> = HashSet::new();
    let mut keywords = Vec::new();

    for (_, phrase) in phrase_hits {
        if seen.insert(phrase.to_string()) {
            keywords.push(Keyword::new(phrase));
        }
    }

    for token in &tokens {
        if absorbed.contains(token.as_str()) || !is_significant(token) {
            continue;
        }
        if seen.insert(token.clone()) {
            keywords.push(Keyword::new(token));
        }
    }

    keywords
}
