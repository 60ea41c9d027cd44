// ATS simulation: deterministic lexical and structural analysis of a résumé
// against a job description. Pure and synchronous; callers on the async runtime
// should wrap `run_ats_analysis` in `spawn_blocking`.

pub mod formatting;
pub mod handlers;
pub mod job_type;
pub mod keywords;
pub mod matcher;
pub mod score;
pub mod sections;
pub mod stemmer;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use formatting::{check_formatting, FormattingOptions, FormattingResult, Issue, Severity};
pub use job_type::{detect_job_type, JobType, WeightProfile};
pub use keywords::{extract_keywords, Keyword};
pub use matcher::{match_keywords, MatchMode, MatchResult};
pub use score::{compute_ats_score, AtsScore};
pub use sections::{validate_sections, SectionResult};

fn default_strict_mode() -> bool {
    true
}

/// Caller-supplied options for an ATS run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtsOptions {
    #[serde(default)]
    pub page_count: Option<u32>,
    /// Exact-boundary keyword matching. Only the HR layer should turn this off.
    #[serde(default = "default_strict_mode")]
    pub strict_mode: bool,
}

impl Default for AtsOptions {
    fn default() -> Self {
        Self {
            page_count: None,
            strict_mode: true,
        }
    }
}

/// Full ATS pipeline: extract → match → format check → section check → aggregate.
pub fn run_ats_analysis(resume_text: &str, job_description: &str, options: AtsOptions) -> AtsScore {
    let keywords = extract_keywords(job_description);
    let match_result = match_keywords(
        resume_text,
        &keywords,
        MatchMode::from_strict_flag(options.strict_mode),
    );
    let formatting = check_formatting(
        resume_text,
        FormattingOptions {
            page_count: options.page_count,
        },
    );
    let sections = validate_sections(resume_text);

    let job_type = detect_job_type(job_description);
    let weights = job_type.weights();
    debug!(
        ?job_type,
        keywords = keywords.len(),
        match_pct = match_result.match_pct,
        formatting = formatting.score,
        sections = sections.score,
        "ATS sub-scores computed"
    );

    let mut score = compute_ats_score(&match_result, &formatting, &sections, weights);
    score.job_type = Some(job_type);
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    const TECH_RESUME: &str = "Alex Rivera
alex.rivera@example.com | (555) 201-3344 | Austin, TX

Summary
Full stack engineer with six years of experience shipping web products end to end.
Comfortable owning features from database schema through deployment.

Experience
Software Engineer, Brightline Labs, Jan 2020 - Present
- Built React dashboards backed by Python services and PostgreSQL, serving 40,000 users
- Containerized every service with Docker and deployed to AWS with automated pipelines
- Led agile ceremonies for a team of 6 engineers and cut release time by 30%
- Designed REST endpoints and background jobs processing 2 million events per day
Junior Developer, Northwind Apps, Jun 2017 - Dec 2019
- Maintained Python scripts and internal tools used by the support organization
- Migrated legacy reports into PostgreSQL views, reducing query time by 45%
- Wrote integration tests and documentation for the billing platform

Education
B.S. Computer Science, University of Texas, May 2017

Skills
Python, React, PostgreSQL, Docker, AWS, agile, JavaScript, TypeScript, Git, Linux
Additional: testing, code review, mentoring, technical writing, monitoring, on-call support
";

    const TECH_JD: &str = "We are hiring a Software Engineer to build web products.
You will work with Python, React, PostgreSQL, Docker and AWS in an agile team.
Experience with JavaScript and Git is expected.";

    const CHEF_RESUME: &str = "Marco Bellini
marco.bellini@example.com | (555) 987-6543

Experience
Executive Chef, Trattoria Roma, Mar 2015 - Present
- Designed seasonal menus and managed a kitchen brigade of 12 cooks
- Reduced food waste by 20% through inventory rotation

Education
Culinary Institute of America, 2012 - 2014
";

    const SENIOR_SWE_JD: &str = "Senior Software Engineer, Platform. As a tech lead you will architect
distributed systems in Go and Kubernetes, own our CI/CD pipeline, mentor engineers,
and drive observability with Prometheus and Grafana. 10+ years of backend engineering,
deep knowledge of microservices, gRPC, Kafka and PostgreSQL.";

    #[test]
    fn test_matching_resume_scores_well() {
        let score = run_ats_analysis(TECH_RESUME, TECH_JD, AtsOptions::default());
        assert!(score.overall > 0);
        assert!(!score.matched_keywords.is_empty());
        assert_eq!(score.passed, score.overall >= 75);
        assert_eq!(score.job_type, Some(JobType::Tech));
        assert_eq!(score.weights, WeightProfile::TECH);
        for kw in ["python", "react", "postgresql", "docker", "aws", "agile"] {
            assert!(
                score.matched_keywords.contains(&Keyword::new(kw)),
                "expected {kw} to match"
            );
        }
    }

    #[test]
    fn test_chef_resume_fails_senior_swe_job() {
        let score = run_ats_analysis(CHEF_RESUME, SENIOR_SWE_JD, AtsOptions::default());
        assert!(score.overall < 50, "overall was {}", score.overall);
        assert!(score.missing_keywords.len() > 3);
        assert_eq!(score.job_type, Some(JobType::Senior));
        assert!(!score.passed);
    }

    #[test]
    fn test_keyword_partition_invariant() {
        let score = run_ats_analysis(TECH_RESUME, SENIOR_SWE_JD, AtsOptions::default());
        let total = extract_keywords(SENIOR_SWE_JD).len();
        assert_eq!(score.matched_keywords.len() + score.missing_keywords.len(), total);
    }

    #[test]
    fn test_fuzzy_mode_never_scores_below_strict() {
        let strict = run_ats_analysis(TECH_RESUME, SENIOR_SWE_JD, AtsOptions::default());
        let fuzzy = run_ats_analysis(
            TECH_RESUME,
            SENIOR_SWE_JD,
            AtsOptions {
                strict_mode: false,
                ..AtsOptions::default()
            },
        );
        assert!(fuzzy.keyword_match_pct >= strict.keyword_match_pct);
    }

    #[test]
    fn test_empty_job_description_is_degraded_not_error() {
        let score = run_ats_analysis(TECH_RESUME, "", AtsOptions::default());
        assert_eq!(score.keyword_match_pct, 100);
        assert!(score.missing_keywords.is_empty());
        assert_eq!(score.job_type, Some(JobType::General));
    }

    #[test]
    fn test_options_deserialize_with_strict_default() {
        let opts: AtsOptions = serde_json::from_str("{}").unwrap();
        assert!(opts.strict_mode);
        assert_eq!(opts.page_count, None);
        let opts: AtsOptions = serde_json::from_str(r#"{"page_count": 3, "strict_mode": false}"#).unwrap();
        assert!(!opts.strict_mode);
        assert_eq!(opts.page_count, Some(3));
    }
}
