//! Formatting pattern extraction: how a résumé is laid out, independent of
//! what it says. Bullet markers, heading capitalization, date notations and
//! section order are tallied so two résumés can be compared side by side.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ats::formatting::{date_format_census, estimate_page_count, DateFormat};
use crate::ats::sections::{parse_heading_line, section_order, SectionKind};

// ────────────────────────────────────────────────────────────────────────────
// Bullets
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletStyle {
    /// "-", "–", "—"
    Dash,
    /// "•", "·", "▪", "●", "◦", "‣", "*"
    Dot,
    /// "1.", "2)"
    Number,
}

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:([-–—])|([•·▪●◦‣*])|(\d{1,2}[.)]))\s+(\S.*)$")
        .expect("bullet regex is valid")
});

/// A bullet line split into its marker style and its text.
pub(crate) fn parse_bullet(line: &str) -> Option<(BulletStyle, &str)> {
    let caps = BULLET_RE.captures(line)?;
    let style = if caps.get(1).is_some() {
        BulletStyle::Dash
    } else if caps.get(2).is_some() {
        BulletStyle::Dot
    } else {
        BulletStyle::Number
    };
    let body = caps.get(4)?.as_str().trim_end();
    Some((style, body))
}

/// Text of every bullet line, in document order.
pub(crate) fn bullet_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter_map(parse_bullet)
        .map(|(_, body)| body)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletCensus {
    pub dash: usize,
    pub dot: usize,
    pub number: usize,
    /// Plain lines with no marker (non-empty, not headings).
    pub none: usize,
    pub dominant: Option<BulletStyle>,
    /// More than one marker style in use.
    pub mixed: bool,
}

fn bullet_census(text: &str) -> BulletCensus {
    let mut census = BulletCensus::default();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match parse_bullet(line) {
            Some((BulletStyle::Dash, _)) => census.dash += 1,
            Some((BulletStyle::Dot, _)) => census.dot += 1,
            Some((BulletStyle::Number, _)) => census.number += 1,
            None if parse_heading_line(line).is_none() => census.none += 1,
            None => {}
        }
    }
    let in_use: Vec<(BulletStyle, usize)> = [
        (BulletStyle::Dash, census.dash),
        (BulletStyle::Dot, census.dot),
        (BulletStyle::Number, census.number),
    ]
    .into_iter()
    .filter(|(_, n)| *n > 0)
    .collect();
    census.mixed = in_use.len() > 1;
    // Ties resolve in declaration order: dash, dot, number.
    census.dominant = in_use
        .into_iter()
        .fold(None, |best: Option<(BulletStyle, usize)>, (style, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((style, n)),
        })
        .map(|(style, _)| style);
    census
}

// ────────────────────────────────────────────────────────────────────────────
// Headings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingCase {
    Upper,
    Title,
    Other,
}

pub(crate) fn heading_case(heading: &str) -> HeadingCase {
    let letters: Vec<char> = heading.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return HeadingCase::Other;
    }
    if letters.iter().all(|c| c.is_uppercase()) {
        return HeadingCase::Upper;
    }
    let title = heading
        .split_whitespace()
        .filter_map(|w| w.chars().find(|c| c.is_alphabetic()))
        .all(|c| c.is_uppercase());
    if title {
        HeadingCase::Title
    } else {
        HeadingCase::Other
    }
}

fn heading_text(line: &str) -> &str {
    let trimmed = line.trim();
    let head = match parse_heading_line(trimmed) {
        Some((_, rest)) if !rest.is_empty() => trimmed.split_once(':').map_or(trimmed, |(h, _)| h),
        _ => trimmed,
    };
    head.trim_matches(|c: char| matches!(c, '#' | '*' | '-' | '•' | '=' | '_' | ':') || c.is_whitespace())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingCensus {
    pub upper: usize,
    pub title: usize,
    pub other: usize,
    pub consistent: bool,
}

fn heading_census(text: &str) -> HeadingCensus {
    let mut census = HeadingCensus::default();
    for line in text.lines().filter(|l| parse_heading_line(l).is_some()) {
        match heading_case(heading_text(line)) {
            HeadingCase::Upper => census.upper += 1,
            HeadingCase::Title => census.title += 1,
            HeadingCase::Other => census.other += 1,
        }
    }
    census.consistent = [census.upper, census.title, census.other]
        .iter()
        .filter(|n| **n > 0)
        .count()
        <= 1;
    census
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormatCount {
    pub format: DateFormat,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateCensus {
    pub formats: Vec<DateFormatCount>,
    pub dominant: Option<DateFormat>,
    /// At most one month-bearing notation. Year-only ranges never break this.
    pub consistent: bool,
}

fn date_census(text: &str) -> DateCensus {
    let formats: Vec<DateFormatCount> = date_format_census(text)
        .into_iter()
        .map(|(format, count)| DateFormatCount { format, count })
        .collect();
    let dominant = formats
        .iter()
        .fold(None, |best: Option<&DateFormatCount>, f| match best {
            Some(b) if b.count >= f.count => best,
            _ => Some(f),
        })
        .map(|f| f.format);
    let consistent = formats
        .iter()
        .filter(|f| f.format != DateFormat::YearOnly)
        .count()
        <= 1;
    DateCensus {
        formats,
        dominant,
        consistent,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingPatterns {
    pub bullets: BulletCensus,
    pub headings: HeadingCensus,
    pub dates: DateCensus,
    pub section_order: Vec<SectionKind>,
    pub word_count: usize,
    pub line_count: usize,
    pub page_count: u32,
}

/// Describes the layout conventions of `text`. `page_count` overrides the
/// word-based estimate when the caller knows the rendered length.
pub fn extract_formatting_patterns(text: &str, page_count: Option<u32>) -> FormattingPatterns {
    let word_count = text.split_whitespace().count();
    FormattingPatterns {
        bullets: bullet_census(text),
        headings: heading_census(text),
        dates: date_census(text),
        section_order: section_order(text),
        word_count,
        line_count: text.lines().filter(|l| !l.trim().is_empty()).count(),
        page_count: page_count.unwrap_or_else(|| estimate_page_count(word_count)),
    }
}
