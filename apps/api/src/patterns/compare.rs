//! Compares a user's content patterns against a reference résumé and reports
//! only the metrics where the user falls short.

use serde::{Deserialize, Serialize};

use super::content::ContentPatterns;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternComparison {
    pub metric: String,
    pub user_value: f32,
    pub reference_value: f32,
    pub insight: String,
}

struct MetricRule {
    metric: &'static str,
    value: fn(&ContentPatterns) -> Option<f32>,
    /// Minimum gap (reference - user) before the metric is reported.
    tolerance: f32,
    insight: fn(f32, f32) -> String,
}

fn share(part: usize, whole: usize) -> Option<f32> {
    (whole > 0).then(|| part as f32 / whole as f32)
}

const METRIC_RULES: &[MetricRule] = &[
    MetricRule {
        metric: "strong_verb_ratio",
        value: |p| share(p.verbs.strong, p.bullets.count),
        tolerance: 0.05,
        insight: |user, reference| {
            format!(
                "{:.0}% of your bullets open with a strong action verb, versus {:.0}% in the reference. \
                 Lead with verbs like \"Led\", \"Built\" or \"Reduced\".",
                user * 100.0,
                reference * 100.0
            )
        },
    },
    MetricRule {
        metric: "verb_diversity",
        value: |p| share(p.verbs.unique_verbs, p.bullets.count),
        tolerance: 0.10,
        insight: |user, reference| {
            format!(
                "Your opening verbs repeat more often ({:.0}% distinct versus {:.0}%). Vary how bullets start.",
                user * 100.0,
                reference * 100.0
            )
        },
    },
    MetricRule {
        metric: "metric_density",
        value: |p| Some(p.metrics.density),
        tolerance: 0.10,
        insight: |user, reference| {
            format!(
                "You average {user:.1} quantified metrics per bullet; the reference averages {reference:.1}. \
                 Add percentages, dollar amounts, team sizes or user counts."
            )
        },
    },
    MetricRule {
        metric: "quantified_bullet_share",
        value: |p| share(p.framing.quantified_bullets, p.bullets.count),
        tolerance: 0.05,
        insight: |user, reference| {
            format!(
                "{:.0}% of your bullets contain a number, versus {:.0}% in the reference.",
                user * 100.0,
                reference * 100.0
            )
        },
    },
    MetricRule {
        metric: "car_bullets",
        value: |p| Some(p.framing.car_bullets as f32),
        tolerance: 0.5,
        insight: |user, reference| {
            format!(
                "The reference frames {reference:.0} bullets as Challenge-Action-Result; you frame {user:.0}. \
                 State the problem, what you did, and the outcome."
            )
        },
    },
    MetricRule {
        metric: "avg_bullet_words",
        value: |p| (p.bullets.count > 0).then_some(p.bullets.avg_words),
        tolerance: 3.0,
        insight: |user, reference| {
            format!(
                "Your bullets average {user:.0} words versus {reference:.0}. Add scope and results to thin bullets."
            )
        },
    },
    MetricRule {
        metric: "jd_keyword_coverage",
        value: |p| p.jd_keyword_coverage,
        tolerance: 0.05,
        insight: |user, reference| {
            format!(
                "You cover {:.0}% of the job description's keywords; the reference covers {:.0}%.",
                user * 100.0,
                reference * 100.0
            )
        },
    },
];

/// Metrics where `user` trails `reference` by more than the rule's tolerance,
/// in rule order. Metrics undefined on either side are skipped.
pub fn compare_patterns(user: &ContentPatterns, reference: &ContentPatterns) -> Vec<PatternComparison> {
    METRIC_RULES
        .iter()
        .filter_map(|rule| {
            let user_value = (rule.value)(user)?;
            let reference_value = (rule.value)(reference)?;
            (reference_value - user_value > rule.tolerance).then(|| PatternComparison {
                metric: rule.metric.to_string(),
                user_value,
                reference_value,
                insight: (rule.insight)(user_value, reference_value),
            })
        })
        .collect()
}
