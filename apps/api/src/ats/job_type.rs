//! Job-Type Classifier — picks the weighting profile for the ATS aggregate.
//!
//! Rules are evaluated in `JOB_TYPE_RULES` order, first match wins:
//! senior > tech > entry > general. A senior *and* tech-flavored posting is senior.

use serde::{Deserialize, Serialize};

use crate::ats::keywords::contains_term;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Tech,
    Senior,
    Entry,
    General,
}

/// Relative weight of each ATS sub-score. The three weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub keywords: f64,
    pub formatting: f64,
    pub sections: f64,
}

impl WeightProfile {
    pub const TECH: WeightProfile = WeightProfile {
        keywords: 0.60,
        formatting: 0.20,
        sections: 0.20,
    };
    pub const SENIOR: WeightProfile = WeightProfile {
        keywords: 0.50,
        formatting: 0.25,
        sections: 0.25,
    };
    pub const ENTRY: WeightProfile = WeightProfile {
        keywords: 0.35,
        formatting: 0.40,
        sections: 0.25,
    };
    pub const GENERAL: WeightProfile = WeightProfile {
        keywords: 0.45,
        formatting: 0.30,
        sections: 0.25,
    };

    pub fn total(&self) -> f64 {
        self.keywords + self.formatting + self.sections
    }
}

impl JobType {
    pub fn weights(self) -> WeightProfile {
        match self {
            JobType::Tech => WeightProfile::TECH,
            JobType::Senior => WeightProfile::SENIOR,
            JobType::Entry => WeightProfile::ENTRY,
            JobType::General => WeightProfile::GENERAL,
        }
    }
}

struct JobTypeRule {
    job_type: JobType,
    signals: &'static [&'static str],
    /// Distinct signals required for the rule to fire.
    min_hits: usize,
}

const SENIOR_SIGNALS: &[&str] = &["senior", "staff", "lead", "10+ years", "architect"];

const TECH_SIGNALS: &[&str] = &[
    "software",
    "engineer",
    "engineering",
    "developer",
    "programming",
    "backend",
    "frontend",
    "full stack",
    "devops",
    "api",
    "apis",
    "cloud",
    "aws",
    "azure",
    "gcp",
    "kubernetes",
    "docker",
    "python",
    "java",
    "javascript",
    "typescript",
    "react",
    "node.js",
    "golang",
    "rust",
    "sql",
    "database",
    "machine learning",
    "data scientist",
    "microservices",
    "ci/cd",
];

const ENTRY_SIGNALS: &[&str] = &["junior", "entry-level", "entry level", "0-2 years"];

/// Priority-ordered; first rule whose `min_hits` is reached wins.
const JOB_TYPE_RULES: &[JobTypeRule] = &[
    JobTypeRule {
        job_type: JobType::Senior,
        signals: SENIOR_SIGNALS,
        min_hits: 2,
    },
    JobTypeRule {
        job_type: JobType::Tech,
        signals: TECH_SIGNALS,
        min_hits: 2,
    },
    JobTypeRule {
        job_type: JobType::Entry,
        signals: ENTRY_SIGNALS,
        min_hits: 1,
    },
];

pub fn detect_job_type(job_description: &str) -> JobType {
    let lower = job_description.to_lowercase();
    JOB_TYPE_RULES
        .iter()
        .find(|rule| {
            rule.signals
                .iter()
                .filter(|signal| contains_term(&lower, signal))
                .count()
                >= rule.min_hits
        })
        .map(|rule| rule.job_type)
        .unwrap_or(JobType::General)
}
