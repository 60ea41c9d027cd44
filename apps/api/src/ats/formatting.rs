//! Formatting Checker — structural hygiene score for a plain-text résumé.
//!
//! Starts at 100 and subtracts a fixed penalty per detected issue. The score is
//! clamped to [0, 100].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Issue types (shared with the aggregator)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingEmail,
    MissingPhone,
    TableLayout,
    InconsistentDates,
    TooManyPages,
    TooShort,
    Graphics,
    MissingSection,
}

/// A single problem surfaced to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattingResult {
    pub score: u32,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormattingOptions {
    pub page_count: Option<u32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Constants and patterns
// ────────────────────────────────────────────────────────────────────────────

const MIN_WORDS: usize = 150;
const MAX_PAGES: u32 = 2;
/// Used only when the caller does not supply a page count.
pub(crate) const WORDS_PER_PAGE: usize = 500;

pub(crate) static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b").expect("email regex is valid")
});

pub(crate) static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s.\-]?)?\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}\b")
        .expect("phone regex is valid")
});

static GRAPHIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\[(?:image|photo|picture|graphic|logo|chart|icon|figure)[^\]]*\]|<img\b|\.(?:png|jpe?g|gif|svg)\b",
    )
    .expect("graphic regex is valid")
});

/// Date notations recognized across résumé entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// "Jan 2020", "January 2020"
    MonthName,
    /// "01/2020"
    NumericSlash,
    /// "2020-01"
    Iso,
    /// "2019 – 2021"
    YearOnly,
}

/// Ordered date-format catalogue for month-bearing notations.
static DATE_FORMAT_PATTERNS: LazyLock<Vec<(DateFormat, Regex)>> = LazyLock::new(|| {
    [
        (
            DateFormat::MonthName,
            r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(?:19|20)\d{2}\b",
        ),
        (DateFormat::NumericSlash, r"\b(?:0?[1-9]|1[0-2])/(?:19|20)\d{2}\b"),
        (DateFormat::Iso, r"\b(?:19|20)\d{2}-(?:0[1-9]|1[0-2])\b"),
    ]
    .into_iter()
    .map(|(format, pattern)| (format, Regex::new(pattern).expect("date regex is valid")))
    .collect()
});

/// Year ranges. The optional month / numeric prefix groups let us discard ranges
/// whose start date already belongs to another notation ("Apr 2021 - Present").
static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+|(\d{1,2}/))?\b(?:19|20)\d{2}\s*[\-–]\s*(?:(?:19|20)\d{2}|present|current)\b",
    )
    .expect("year range regex is valid")
});

/// Counts occurrences of each date notation, in catalogue order, skipping absent ones.
///
/// Year-only ranges are counted for statistics but never make a résumé
/// inconsistent on their own.
pub fn date_format_census(text: &str) -> Vec<(DateFormat, usize)> {
    let year_only = YEAR_RANGE_RE
        .captures_iter(text)
        .filter(|caps| caps.get(1).is_none() && caps.get(2).is_none())
        .count();

    DATE_FORMAT_PATTERNS
        .iter()
        .map(|(format, re)| (*format, re.find_iter(text).count()))
        .chain(std::iter::once((DateFormat::YearOnly, year_only)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

pub(crate) fn estimate_page_count(word_count: usize) -> u32 {
    (word_count.div_ceil(WORDS_PER_PAGE)).max(1) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Checks
// ────────────────────────────────────────────────────────────────────────────

impl IssueKind {
    fn penalty(self) -> u32 {
        match self {
            IssueKind::MissingEmail => 15,
            IssueKind::MissingPhone => 10,
            IssueKind::TableLayout => 15,
            IssueKind::InconsistentDates => 10,
            IssueKind::TooManyPages => 10,
            IssueKind::TooShort => 15,
            IssueKind::Graphics => 10,
            IssueKind::MissingSection => 0,
        }
    }

    fn severity(self) -> Severity {
        match self {
            IssueKind::MissingEmail | IssueKind::TableLayout => Severity::Critical,
            _ => Severity::Warning,
        }
    }
}

fn issue(kind: IssueKind, message: String) -> Issue {
    Issue {
        kind,
        severity: kind.severity(),
        message,
    }
}

fn has_table_layout(text: &str) -> bool {
    let pipe_rows = text
        .lines()
        .filter(|l| l.matches('|').count() >= 2)
        .count();
    let tab_rows = text.lines().filter(|l| l.trim().contains('\t')).count();
    let box_drawing = text
        .chars()
        .any(|c| matches!(c, '─' | '│' | '┌' | '┐' | '└' | '┘' | '┼' | '╔' | '║'));
    pipe_rows >= 2 || tab_rows >= 3 || box_drawing
}

/// Scores structural hygiene of résumé text.
pub fn check_formatting(resume_text: &str, options: FormattingOptions) -> FormattingResult {
    let mut issues = Vec::new();

    if !EMAIL_RE.is_match(resume_text) {
        issues.push(issue(
            IssueKind::MissingEmail,
            "No email address found. ATS systems rely on it to contact you.".to_string(),
        ));
    }

    if !PHONE_RE.is_match(resume_text) {
        issues.push(issue(
            IssueKind::MissingPhone,
            "No phone number found.".to_string(),
        ));
    }

    if has_table_layout(resume_text) {
        issues.push(issue(
            IssueKind::TableLayout,
            "Table or tab-aligned layout detected. Many ATS parsers scramble columns; use a single-column layout."
                .to_string(),
        ));
    }

    let inconsistent: Vec<DateFormat> = date_format_census(resume_text)
        .into_iter()
        .map(|(format, _)| format)
        .filter(|format| *format != DateFormat::YearOnly)
        .collect();
    if inconsistent.len() > 1 {
        issues.push(issue(
            IssueKind::InconsistentDates,
            format!(
                "Dates use {} different formats. Pick one (e.g. \"Jan 2020\") and use it everywhere.",
                inconsistent.len()
            ),
        ));
    }

    let word_count = resume_text.split_whitespace().count();
    let pages = options
        .page_count
        .unwrap_or_else(|| estimate_page_count(word_count));
    if pages > MAX_PAGES {
        issues.push(issue(
            IssueKind::TooManyPages,
            format!("Résumé is {pages} pages. Keep it to {MAX_PAGES} pages or fewer."),
        ));
    }

    if word_count < MIN_WORDS {
        issues.push(issue(
            IssueKind::TooShort,
            format!("Only {word_count} words. Aim for at least {MIN_WORDS} words of substance."),
        ));
    }

    if GRAPHIC_RE.is_match(resume_text) {
        issues.push(issue(
            IssueKind::Graphics,
            "Images or graphics detected. ATS systems cannot read them; move that content into text."
                .to_string(),
        ));
    }

    let penalty: u32 = issues.iter().map(|i| i.kind.penalty()).sum();
    let score = 100_i64.saturating_sub(penalty as i64).clamp(0, 100) as u32;

    FormattingResult { score, issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(words: usize) -> String {
        (0..words).map(|_| "delivered").collect::<Vec<_>>().join(" ")
    }

    fn clean_resume() -> String {
        format!(
            "Jane Doe\njane.doe@example.com | (555) 123-4567\n\nExperience\nJan 2020 - Mar 2023 Engineer\n{}",
            filler(200)
        )
    }

    fn kinds(result: &FormattingResult) -> Vec<IssueKind> {
        result.issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_clean_resume_scores_100() {
        let result = check_formatting(&clean_resume(), FormattingOptions::default());
        assert_eq!(result.score, 100, "issues: {:?}", result.issues);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_missing_contact_info_penalized() {
        let text = filler(200);
        let result = check_formatting(&text, FormattingOptions::default());
        assert!(kinds(&result).contains(&IssueKind::MissingEmail));
        assert!(kinds(&result).contains(&IssueKind::MissingPhone));
        assert_eq!(result.score, 75);
    }

    #[test]
    fn test_too_many_pages() {
        let result = check_formatting(&clean_resume(), FormattingOptions { page_count: Some(3) });
        assert!(kinds(&result).contains(&IssueKind::TooManyPages));
        assert_eq!(result.score, 90);
    }

    #[test]
    fn test_inconsistent_dates_detected() {
        let text = format!("{}\nFeb 2019 - 12/2019\n2018-04 start", clean_resume());
        let result = check_formatting(&text, FormattingOptions::default());
        assert!(kinds(&result).contains(&IssueKind::InconsistentDates));
    }

    #[test]
    fn test_month_prefixed_words_are_not_dates() {
        let census = date_format_census("Led marketing 2021 launch. Engineer 01/2020 - 03/2022");
        assert_eq!(census, vec![(DateFormat::NumericSlash, 2)]);
        let census = date_format_census("Promoted from junior 2019 cohort; decided 2020 roadmap");
        assert!(census.is_empty(), "{census:?}");
        let census = date_format_census("September 2019, Sept. 2020, June 2021");
        assert_eq!(census, vec![(DateFormat::MonthName, 3)]);
    }

    #[test]
    fn test_consistent_numeric_dates_not_flagged_by_prose() {
        let text = format!(
            "Jane Doe\njane.doe@example.com\n\nExperience\nLed marketing 2021 launch\n01/2020 - 03/2022 Engineer\n{}",
            filler(200)
        );
        let result = check_formatting(&text, FormattingOptions::default());
        assert!(!kinds(&result).contains(&IssueKind::InconsistentDates));
    }

    #[test]
    fn test_year_only_ranges_do_not_count_as_inconsistent() {
        let text = format!("{}\nEducation\nState University 2012 - 2016", clean_resume());
        let result = check_formatting(&text, FormattingOptions::default());
        assert!(!kinds(&result).contains(&IssueKind::InconsistentDates));
    }

    #[test]
    fn test_table_layout_detected() {
        let text = format!("{}\n| Skill | Years |\n| Rust | 5 |", clean_resume());
        let result = check_formatting(&text, FormattingOptions::default());
        assert!(kinds(&result).contains(&IssueKind::TableLayout));
        let table_issue = result
            .issues
            .iter()
            .find(|i| i.kind == IssueKind::TableLayout)
            .unwrap();
        assert_eq!(table_issue.severity, Severity::Critical);
    }

    #[test]
    fn test_graphics_detected() {
        let text = format!("{}\n[Image: headshot]", clean_resume());
        let result = check_formatting(&text, FormattingOptions::default());
        assert!(kinds(&result).contains(&IssueKind::Graphics));
    }

    #[test]
    fn test_score_floor_for_degenerate_input() {
        let text = "[logo]\n| a | b |\n| c | d |\nJan 2020 01/2021 2022-03";
        let result = check_formatting(text, FormattingOptions { page_count: Some(10) });
        assert!(result.issues.len() >= 7);
        assert!(result.score <= 100);
        assert_eq!(result.score, 15);
    }

    #[test]
    fn test_date_census_counts() {
        let census = date_format_census("Jan 2020 - Mar 2021, Apr 2021 - Present, 2015 - 2019");
        assert!(census.contains(&(DateFormat::MonthName, 3)));
        assert!(census.contains(&(DateFormat::YearOnly, 1)));
    }

    #[test]
    fn test_estimate_page_count() {
        assert_eq!(estimate_page_count(0), 1);
        assert_eq!(estimate_page_count(500), 1);
        assert_eq!(estimate_page_count(1200), 3);
    }
}
