//! ATS Score Aggregator — combines keyword, formatting and section sub-scores.

use serde::{Deserialize, Serialize};

use crate::ats::formatting::{FormattingResult, Issue, IssueKind, Severity};
use crate::ats::job_type::{JobType, WeightProfile};
use crate::ats::keywords::Keyword;
use crate::ats::matcher::MatchResult;
use crate::ats::sections::{SectionCheck, SectionResult};

/// Minimum overall score considered a pass.
pub const PASS_THRESHOLD: u32 = 75;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsScore {
    pub overall: u32,
    pub passed: bool,
    pub matched_keywords: Vec<Keyword>,
    pub missing_keywords: Vec<Keyword>,
    pub keyword_match_pct: u32,
    pub formatting_score: u32,
    pub section_score: u32,
    pub sections: Vec<SectionCheck>,
    /// Formatting issues followed by one issue per missing section.
    /// Missing keywords are reported only through `missing_keywords`.
    pub issues: Vec<Issue>,
    /// Set by `run_ats_analysis`; `None` when the score was assembled from parts.
    pub job_type: Option<JobType>,
    pub weights: WeightProfile,
}

fn missing_section_issue(section: &SectionCheck) -> Issue {
    let severity = match section.name.as_str() {
        "Contact" | "Experience" => Severity::Critical,
        "Summary" => Severity::Info,
        _ => Severity::Warning,
    };
    Issue {
        kind: IssueKind::MissingSection,
        severity,
        message: format!(
            "No \"{}\" section detected. Add a clearly labelled heading so ATS parsers can find it.",
            section.name
        ),
    }
}

pub fn compute_ats_score(
    match_result: &MatchResult,
    formatting: &FormattingResult,
    sections: &SectionResult,
    weights: WeightProfile,
) -> AtsScore {
    let weighted = match_result.match_pct as f64 * weights.keywords
        + formatting.score as f64 * weights.formatting
        + sections.score as f64 * weights.sections;
    let overall = weighted.round().clamp(0.0, 100.0) as u32;

    let issues: Vec<Issue> = formatting
        .issues
        .iter()
        .cloned()
        .chain(sections.missing().map(missing_section_issue))
        .collect();

    AtsScore {
        overall,
        passed: overall >= PASS_THRESHOLD,
        matched_keywords: match_result.matched.clone(),
        missing_keywords: match_result.missing.clone(),
        keyword_match_pct: match_result.match_pct,
        formatting_score: formatting.score,
        section_score: sections.score,
        sections: sections.sections.clone(),
        issues,
        job_type: None,
        weights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_result(pct: u32, missing: &[&str]) -> MatchResult {
        MatchResult {
            matched: vec![Keyword::new("rust")],
            missing: missing.iter().map(|m| Keyword::new(m)).collect(),
            match_pct: pct,
        }
    }

    fn sections(found: [bool; 5]) -> SectionResult {
        let names = ["Contact", "Summary", "Experience", "Education", "Skills"];
        let sections: Vec<SectionCheck> = names
            .iter()
            .zip(found)
            .map(|(name, found)| SectionCheck {
                name: name.to_string(),
                found,
            })
            .collect();
        let n = found.iter().filter(|f| **f).count();
        SectionResult {
            score: ((n as f64 / 5.0) * 100.0).round() as u32,
            sections,
        }
    }

    #[test]
    fn test_weighted_overall() {
        let formatting = FormattingResult {
            score: 80,
            issues: vec![],
        };
        let score = compute_ats_score(
            &match_result(60, &[]),
            &formatting,
            &sections([true; 5]),
            WeightProfile::TECH,
        );
        // 60*0.6 + 80*0.2 + 100*0.2 = 36 + 16 + 20 = 72
        assert_eq!(score.overall, 72);
        assert!(!score.passed);
    }

    #[test]
    fn test_pass_threshold_is_inclusive() {
        let formatting = FormattingResult {
            score: 75,
            issues: vec![],
        };
        let sections = SectionResult {
            score: 75,
            sections: vec![],
        };
        let score = compute_ats_score(&match_result(75, &[]), &formatting, &sections, WeightProfile::GENERAL);
        assert_eq!(score.overall, 75);
        assert!(score.passed);
    }

    #[test]
    fn test_missing_keywords_are_not_issues() {
        let formatting = FormattingResult {
            score: 100,
            issues: vec![],
        };
        let score = compute_ats_score(
            &match_result(10, &["kafka", "spark", "airflow", "dbt"]),
            &formatting,
            &sections([true; 5]),
            WeightProfile::GENERAL,
        );
        assert_eq!(score.missing_keywords.len(), 4);
        assert!(score.issues.is_empty());
    }

    #[test]
    fn test_issues_concatenate_formatting_then_sections() {
        let formatting = FormattingResult {
            score: 85,
            issues: vec![Issue {
                kind: IssueKind::MissingEmail,
                severity: Severity::Critical,
                message: "no email".to_string(),
            }],
        };
        let score = compute_ats_score(
            &match_result(50, &[]),
            &formatting,
            &sections([true, false, true, true, false]),
            WeightProfile::GENERAL,
        );
        let kinds: Vec<IssueKind> = score.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![IssueKind::MissingEmail, IssueKind::MissingSection, IssueKind::MissingSection]
        );
        assert_eq!(score.issues[1].severity, Severity::Info);
        assert!(score.issues[2].message.contains("Skills"));
        assert_eq!(score.job_type, None);
    }
}
