//! Content pattern extraction: how well a résumé's bullets are written.
//!
//! Measures verb strength, quantified metrics, Challenge-Action-Result framing
//! and bullet length, plus optional coverage of a job description's keywords.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ats::keywords::Keyword;
use crate::ats::matcher::{match_keywords, MatchMode};
use crate::ats::sections::{section_order, SectionKind};

use super::formatting::bullet_lines;
use super::verbs::{classify_verb, is_strong_verb, leading_verb, VerbStrength};

// ────────────────────────────────────────────────────────────────────────────
// Metric catalogue
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Percentage,
    Dollar,
    Multiplier,
    Headcount,
    UserCount,
}

static METRIC_PATTERNS: LazyLock<Vec<(MetricKind, Regex)>> = LazyLock::new(|| {
    [
        (MetricKind::Percentage, r"\b\d+(?:\.\d+)?\s?%"),
        (
            MetricKind::Dollar,
            r"(?i)[$€£]\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:k|m|mm|b|bn|million|billion|thousand)\b)?",
        ),
        (
            MetricKind::Multiplier,
            r"(?i)\b\d+(?:\.\d+)?x\b|\b(?:doubled|tripled|quadrupled)\b",
        ),
        (
            MetricKind::Headcount,
            r"(?i)\bteam of \d+\b|\b\d+\+?\s+(?:engineers|developers|people|employees|staff|members|direct reports|reports|designers|analysts|interns|volunteers|cooks)\b",
        ),
        (
            MetricKind::UserCount,
            r"(?i)\b\d[\d,.]*\s?[km]?\+?\s+(?:users|customers|clients|subscribers|visitors|accounts|downloads|transactions|requests|orders|covers)\b",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("metric regex is valid")))
    .collect()
});

/// Count of each metric kind found in `text`, in catalogue order.
pub fn metric_census(text: &str) -> Vec<(MetricKind, usize)> {
    METRIC_PATTERNS
        .iter()
        .map(|(kind, re)| (*kind, re.find_iter(text).count()))
        .collect()
}

fn has_metric(text: &str) -> bool {
    METRIC_PATTERNS.iter().any(|(_, re)| re.is_match(text))
}

// ────────────────────────────────────────────────────────────────────────────
// Framing
// ────────────────────────────────────────────────────────────────────────────

static CHALLENGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:challenges?|problems?|issues?|bottlenecks?|legacy|manual|slow|inefficient|declining|failing|outdated|backlog|risks?|pain points?|outages?|churn)\b",
    )
    .expect("challenge regex is valid")
});

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:by|through|via)\s+[a-z]+ing\b").expect("action regex is valid")
});

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("word regex is valid"));

static RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:resulting in|resulted in|leading to|led to|saving|reducing|increasing|improving|cutting|boosting|achieving)\b|\b\d+(?:\.\d+)?\s?%",
    )
    .expect("result regex is valid")
});

/// Byte offset just past the first action cue at or after `from`: either a
/// "by/through/via + gerund" phrase or a strong action verb.
fn find_action(bullet: &str, from: usize) -> Option<usize> {
    let rest = &bullet[from..];
    let phrase = ACTION_RE.find(rest).map(|m| (m.start(), m.end()));
    let verb = WORD_RE
        .find_iter(rest)
        .find(|m| is_strong_verb(m.as_str()))
        .map(|m| (m.start(), m.end()));
    [phrase, verb]
        .into_iter()
        .flatten()
        .min_by_key(|(start, _)| *start)
        .map(|(_, end)| from + end)
}

/// Challenge, then action, then result, in that order within one bullet.
pub fn is_car_bullet(bullet: &str) -> bool {
    let Some(challenge) = CHALLENGE_RE.find(bullet) else {
        return false;
    };
    let Some(after_action) = find_action(bullet, challenge.end()) else {
        return false;
    };
    RESULT_RE.is_match(&bullet[after_action..])
}

/// Opens with a strong verb and states an outcome.
pub fn is_action_result_bullet(bullet: &str) -> bool {
    let opens_strong = leading_verb(bullet).is_some_and(|v| is_strong_verb(&v));
    opens_strong && (RESULT_RE.is_match(bullet) || has_metric(bullet))
}

// ────────────────────────────────────────────────────────────────────────────
// Stats
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbStats {
    pub strong: usize,
    pub weak: usize,
    pub other: usize,
    /// Share of bullets opening with a strong verb, 0..=1.
    pub strong_ratio: f32,
    pub unique_verbs: usize,
    /// Distinct opening verbs per bullet, 0..=1.
    pub diversity: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub percentages: usize,
    pub dollar_amounts: usize,
    pub multipliers: usize,
    pub headcounts: usize,
    pub user_counts: usize,
    pub total: usize,
    /// Metrics per bullet; metrics per 100 words when there are no bullets.
    pub density: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FramingStats {
    pub car_bullets: usize,
    pub action_result_bullets: usize,
    pub quantified_bullets: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletStats {
    pub count: usize,
    pub avg_words: f32,
    pub avg_chars: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPatterns {
    pub verbs: VerbStats,
    pub metrics: MetricStats,
    pub framing: FramingStats,
    pub bullets: BulletStats,
    pub section_order: Vec<SectionKind>,
    /// Fraction of supplied JD keywords present (strict match), 0..=1.
    pub jd_keyword_coverage: Option<f32>,
}

fn ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

fn verb_stats(bullets: &[&str]) -> VerbStats {
    let mut stats = VerbStats::default();
    let mut seen = HashSet::new();
    for verb in bullets.iter().filter_map(|b| leading_verb(b)) {
        match classify_verb(&verb) {
            VerbStrength::Strong => stats.strong += 1,
            VerbStrength::Weak => stats.weak += 1,
            VerbStrength::Other => stats.other += 1,
        }
        seen.insert(verb);
    }
    stats.unique_verbs = seen.len();
    stats.strong_ratio = ratio(stats.strong, bullets.len());
    stats.diversity = ratio(stats.unique_verbs, bullets.len());
    stats
}

fn metric_stats(text: &str, bullet_count: usize) -> MetricStats {
    let mut stats = MetricStats::default();
    for (kind, count) in metric_census(text) {
        match kind {
            MetricKind::Percentage => stats.percentages = count,
            MetricKind::Dollar => stats.dollar_amounts = count,
            MetricKind::Multiplier => stats.multipliers = count,
            MetricKind::Headcount => stats.headcounts = count,
            MetricKind::UserCount => stats.user_counts = count,
        }
        stats.total += count;
    }
    stats.density = if bullet_count > 0 {
        ratio(stats.total, bullet_count)
    } else {
        ratio(stats.total * 100, text.split_whitespace().count())
    };
    stats
}

fn framing_stats(bullets: &[&str]) -> FramingStats {
    FramingStats {
        car_bullets: bullets.iter().filter(|b| is_car_bullet(b)).count(),
        action_result_bullets: bullets.iter().filter(|b| is_action_result_bullet(b)).count(),
        quantified_bullets: bullets.iter().filter(|b| has_metric(b)).count(),
    }
}

fn bullet_stats(bullets: &[&str]) -> BulletStats {
    let words: usize = bullets.iter().map(|b| b.split_whitespace().count()).sum();
    let chars: usize = bullets.iter().map(|b| b.chars().count()).sum();
    BulletStats {
        count: bullets.len(),
        avg_words: ratio(words, bullets.len()),
        avg_chars: ratio(chars, bullets.len()),
    }
}

pub fn extract_content_patterns(text: &str, jd_keywords: Option<&[Keyword]>) -> ContentPatterns {
    let bullets = bullet_lines(text);
    let jd_keyword_coverage = jd_keywords
        .filter(|kws| !kws.is_empty())
        .map(|kws| match_keywords(text, kws, MatchMode::Strict).match_pct as f32 / 100.0);

    ContentPatterns {
        verbs: verb_stats(&bullets),
        metrics: metric_stats(text, bullets.len()),
        framing: framing_stats(&bullets),
        bullets: bullet_stats(&bullets),
        section_order: section_order(text),
        jd_keyword_coverage,
    }
}
