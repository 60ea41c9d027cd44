//! One-page fitter — trims a structured résumé until its estimated height fits
//! a single page.
//!
//! The fitter is a small state machine over an ordered pipeline of trimming
//! steps. Each step is a pure transform (draft in, draft plus removal log out)
//! and is only tried while the previous estimate still overflows the page.
//! Confidence drops with every step taken.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::metrics::{default_template, estimate_height, find_template, LayoutStyle};
use crate::models::resume::{ExperienceEntry, StructuredResume};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStep {
    CapBulletsAtFour,
    CapBulletsAtThree,
    ShortenSummary,
    TightenStyle,
    DropProjects,
    CapSkills,
    KeepRecentRoles,
    Aggressive,
}

/// Trimming order. A step only runs when everything before it left the page overflowing.
pub const FIT_PIPELINE: [FitStep; 8] = [
    FitStep::CapBulletsAtFour,
    FitStep::CapBulletsAtThree,
    FitStep::ShortenSummary,
    FitStep::TightenStyle,
    FitStep::DropProjects,
    FitStep::CapSkills,
    FitStep::KeepRecentRoles,
    FitStep::Aggressive,
];

/// Confidence after `n` steps, indexed by `n`. Index 0 is the untouched résumé.
const FIT_CONFIDENCE: [u8; FIT_PIPELINE.len() + 1] = [95, 88, 82, 76, 70, 62, 55, 48, 40];

const SUMMARY_TARGET_CHARS: usize = 200;
const MAX_SKILLS_PER_CATEGORY: usize = 8;
const RECENT_ROLES: usize = 3;
const AGGRESSIVE_BULLETS: usize = 2;
const AGGRESSIVE_ROLES: usize = 2;

/// Résumé plus the style it is estimated with; the unit every step transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub resume: StructuredResume,
    pub style: LayoutStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub resume: StructuredResume,
    pub style: LayoutStyle,
    pub steps_applied: Vec<FitStep>,
    /// Human-readable log of content removed, in the order it was removed.
    pub removed_content: Vec<String>,
    pub estimated_lines: u32,
    pub page_budget_lines: u32,
    pub fits: bool,
    /// 0–100.
    pub fit_confidence: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Steps
// ────────────────────────────────────────────────────────────────────────────

impl FitStep {
    pub fn apply(self, draft: Draft) -> (Draft, Vec<String>) {
        let Draft { mut resume, style } = draft;
        let mut removed = Vec::new();
        let style = match self {
            FitStep::CapBulletsAtFour => {
                removed.extend(cap_bullets(&mut resume, 4));
                style
            }
            FitStep::CapBulletsAtThree => {
                removed.extend(cap_bullets(&mut resume, 3));
                style
            }
            FitStep::ShortenSummary => {
                removed.extend(shorten_summary(&mut resume, SUMMARY_TARGET_CHARS));
                style
            }
            FitStep::TightenStyle => style.tightened(),
            FitStep::DropProjects => {
                removed.extend(drop_projects(&mut resume));
                style
            }
            FitStep::CapSkills => {
                removed.extend(cap_skills(&mut resume, MAX_SKILLS_PER_CATEGORY));
                style
            }
            FitStep::KeepRecentRoles => {
                removed.extend(keep_recent_roles(&mut resume, RECENT_ROLES));
                style
            }
            FitStep::Aggressive => {
                removed.extend(cap_bullets(&mut resume, AGGRESSIVE_BULLETS));
                removed.extend(keep_recent_roles(&mut resume, AGGRESSIVE_ROLES));
                style
            }
        };
        (Draft { resume, style }, removed)
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn cap_bullets(resume: &mut StructuredResume, max: usize) -> Vec<String> {
    resume
        .experience
        .iter_mut()
        .filter(|e| e.bullets.len() > max)
        .map(|entry| {
            let cut = entry.bullets.len() - max;
            entry.bullets.truncate(max);
            format!("Removed {} from {}", plural(cut, "bullet"), entry.label())
        })
        .collect()
}

/// Cuts at the last sentence end within `max_chars`, falling back to the last
/// word boundary with an ellipsis.
pub(crate) fn truncate_at_sentence(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let limit = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i);
    let window = &text[..limit];

    let sentence_end = window
        .char_indices()
        .filter(|&(i, c)| {
            matches!(c, '.' | '!' | '?')
                && text[i + c.len_utf8()..]
                    .chars()
                    .next()
                    .map_or(true, char::is_whitespace)
        })
        .map(|(i, c)| i + c.len_utf8())
        .last();
    if let Some(end) = sentence_end {
        return window[..end].to_string();
    }

    match window.rfind(char::is_whitespace) {
        Some(space) => format!("{}...", window[..space].trim_end()),
        None => format!("{window}..."),
    }
}

fn shorten_summary(resume: &mut StructuredResume, max_chars: usize) -> Vec<String> {
    let Some(summary) = resume.summary.as_mut() else {
        return Vec::new();
    };
    let before = summary.chars().count();
    let shortened = truncate_at_sentence(summary, max_chars);
    let after = shortened.chars().count();
    if after >= before {
        return Vec::new();
    }
    *summary = shortened;
    vec![format!("Shortened summary from {before} to {after} characters")]
}

fn drop_projects(resume: &mut StructuredResume) -> Vec<String> {
    if resume.projects.is_empty() {
        return Vec::new();
    }
    let names: Vec<String> = resume.projects.drain(..).map(|p| p.name).collect();
    vec![format!(
        "Removed Projects section ({}: {})",
        plural(names.len(), "project"),
        names.join(", ")
    )]
}

fn cap_skills(resume: &mut StructuredResume, max: usize) -> Vec<String> {
    resume
        .skills
        .iter_mut()
        .filter(|c| c.skills.len() > max)
        .map(|category| {
            let dropped = category.skills.split_off(max);
            format!(
                "Removed {} from {}: {}",
                plural(dropped.len(), "skill"),
                category.name,
                dropped.join(", ")
            )
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Recency
// ────────────────────────────────────────────────────────────────────────────

/// How recent a role is, by end date. Declaration order is ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Recency {
    Unknown,
    Ended(NaiveDate),
    Ongoing,
}

pub(crate) fn parse_end_date(raw: Option<&str>) -> Recency {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Recency::Unknown;
    };
    let lower = raw.to_lowercase();
    if matches!(lower.as_str(), "present" | "current" | "now" | "ongoing") {
        return Recency::Ongoing;
    }

    let cleaned = raw.replace(['.', ','], "");
    let parsed = if let Ok(year) = cleaned.parse::<i32>() {
        NaiveDate::from_ymd_opt(year, 1, 1)
    } else {
        [
            (format!("{cleaned}-01"), "%Y-%m-%d"),
            (format!("01/{cleaned}"), "%d/%m/%Y"),
            (format!("01 {cleaned}"), "%d %B %Y"),
        ]
        .iter()
        .find_map(|(candidate, fmt)| NaiveDate::parse_from_str(candidate, fmt).ok())
    };
    parsed.map_or(Recency::Unknown, Recency::Ended)
}

fn recency(entry: &ExperienceEntry) -> Recency {
    parse_end_date(entry.end_date.as_deref())
}

/// Keeps the `keep` most recent roles in their original order. Ties keep
/// document order.
fn keep_recent_roles(resume: &mut StructuredResume, keep: usize) -> Vec<String> {
    if resume.experience.len() <= keep {
        return Vec::new();
    }
    let mut ranked: Vec<usize> = (0..resume.experience.len()).collect();
    ranked.sort_by(|&a, &b| {
        recency(&resume.experience[b])
            .cmp(&recency(&resume.experience[a]))
            .then(a.cmp(&b))
    });
    let kept: Vec<usize> = ranked.into_iter().take(keep).collect();

    let mut removed = Vec::new();
    let entries = std::mem::take(&mut resume.experience);
    for (i, entry) in entries.into_iter().enumerate() {
        if kept.contains(&i) {
            resume.experience.push(entry);
        } else {
            removed.push(format!("Removed role: {}", entry.label()));
        }
    }
    removed
}

// ────────────────────────────────────────────────────────────────────────────
// Driver
// ────────────────────────────────────────────────────────────────────────────

/// Trims `resume` step by step until it fits one page of `template_id`.
/// Unknown templates fall back to the default with a warning.
pub fn fit_to_one_page(resume: StructuredResume, template_id: &str) -> FitResult {
    let template = find_template(template_id).unwrap_or_else(|| {
        warn!(template_id, "Unknown template, falling back to {}", default_template().id);
        default_template()
    });
    let budget = template.page_budget_lines;

    let mut draft = Draft {
        resume,
        style: LayoutStyle::for_template(template),
    };
    let mut height = estimate_height(&draft.resume, &draft.style);
    let mut steps_applied = Vec::new();
    let mut removed_content = Vec::new();

    for step in FIT_PIPELINE {
        if height <= budget as f32 {
            break;
        }
        let (next, removed) = step.apply(draft);
        draft = next;
        height = estimate_height(&draft.resume, &draft.style);
        debug!(?step, height, budget, "Applied fit step");
        steps_applied.push(step);
        removed_content.extend(removed);
    }

    let fits = height <= budget as f32;
    if !fits {
        warn!(height, budget, "Résumé still overflows after every fit step");
    }

    FitResult {
        fit_confidence: FIT_CONFIDENCE[steps_applied.len()],
        resume: draft.resume,
        style: draft.style,
        steps_applied,
        removed_content,
        estimated_lines: height.ceil() as u32,
        page_budget_lines: budget,
        fits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ContactInfo, ProjectEntry, SkillCategory};

    fn role(title: &str, end: Option<&str>, bullets: usize) -> ExperienceEntry {
        ExperienceEntry {
            title: title.into(),
            company: "Acme".into(),
            end_date: end.map(Into::into),
            bullets: (0..bullets)
                .map(|i| format!("Delivered improvement number {i} to the platform and measured it"))
                .collect(),
            ..Default::default()
        }
    }

    fn small_resume() -> StructuredResume {
        StructuredResume {
            contact: ContactInfo {
                name: "Jane Doe".into(),
                email: Some("jane@example.com".into()),
                ..Default::default()
            },
            summary: Some("Backend engineer.".into()),
            experience: vec![role("Engineer", Some("Present"), 3)],
            ..Default::default()
        }
    }

    fn long_resume() -> StructuredResume {
        let long_bullet = "Led a cross-functional effort to redesign the ingestion path, \
                           coordinating four teams and cutting end-to-end latency by forty percent"
            .to_string();
        StructuredResume {
            contact: ContactInfo {
                name: "Jane Doe".into(),
                email: Some("jane@example.com".into()),
                ..Default::default()
            },
            summary: Some("Engineer with a decade of experience. ".repeat(12)),
            experience: (0..6)
                .map(|i| ExperienceEntry {
                    title: format!("Role {i}"),
                    company: "Acme".into(),
                    end_date: Some(format!("{}", 2023 - i)),
                    bullets: vec![long_bullet.clone(); 7],
                    ..Default::default()
                })
                .collect(),
            projects: vec![ProjectEntry {
                name: "scorer".into(),
                description: Some("A résumé scorer".into()),
                ..Default::default()
            }],
            skills: vec![SkillCategory {
                name: "Languages".into(),
                skills: (0..12).map(|i| format!("lang{i}")).collect(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_already_fits_is_untouched() {
        let resume = small_resume();
        let result = fit_to_one_page(resume.clone(), "classic");
        assert!(result.fits);
        assert!(result.removed_content.is_empty());
        assert!(result.steps_applied.is_empty());
        assert_eq!(result.fit_confidence, 95);
        assert_eq!(result.resume, resume);
    }

    #[test]
    fn test_long_resume_is_trimmed_to_fit() {
        let result = fit_to_one_page(long_resume(), "classic");
        assert!(result.fits);
        assert!(!result.steps_applied.is_empty());
        assert!(!result.removed_content.is_empty());
        assert!(result.fit_confidence < 95);
        assert_eq!(
            result.fit_confidence,
            FIT_CONFIDENCE[result.steps_applied.len()]
        );
        assert!(result.estimated_lines <= result.page_budget_lines);
        // Steps run in pipeline order.
        assert_eq!(result.steps_applied[..], FIT_PIPELINE[..result.steps_applied.len()]);
    }

    #[test]
    fn test_confidence_is_monotonic() {
        assert!(FIT_CONFIDENCE.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(FIT_CONFIDENCE[0], 95);
        assert_eq!(FIT_CONFIDENCE[FIT_PIPELINE.len()], 40);
    }

    #[test]
    fn test_unknown_template_falls_back() {
        let result = fit_to_one_page(small_resume(), "holographic");
        assert_eq!(result.style.template, "classic");
    }

    #[test]
    fn test_cap_bullets_step() {
        let draft = Draft {
            resume: StructuredResume {
                experience: vec![role("A", None, 6), role("B", None, 2)],
                ..Default::default()
            },
            style: LayoutStyle::for_template(default_template()),
        };
        let (next, removed) = FitStep::CapBulletsAtFour.apply(draft);
        assert_eq!(next.resume.experience[0].bullets.len(), 4);
        assert_eq!(next.resume.experience[1].bullets.len(), 2);
        assert_eq!(removed, vec!["Removed 2 bullets from A at Acme".to_string()]);
    }

    #[test]
    fn test_tighten_style_removes_nothing() {
        let draft = Draft {
            resume: small_resume(),
            style: LayoutStyle::for_template(default_template()),
        };
        let (next, removed) = FitStep::TightenStyle.apply(draft.clone());
        assert!(removed.is_empty());
        assert!(next.style.compact);
        assert_eq!(next.resume, draft.resume);
    }

    #[test]
    fn test_truncate_at_sentence() {
        let text = "First sentence here. Second sentence is a good deal longer than the first.";
        assert_eq!(truncate_at_sentence(text, 30), "First sentence here.");
        assert_eq!(truncate_at_sentence("short", 30), "short");
        assert_eq!(
            truncate_at_sentence("no sentence breaks in this rather long line", 20),
            "no sentence breaks..."
        );
    }

    #[test]
    fn test_parse_end_date() {
        assert_eq!(parse_end_date(Some("Present")), Recency::Ongoing);
        assert_eq!(parse_end_date(None), Recency::Unknown);
        assert_eq!(parse_end_date(Some("someday")), Recency::Unknown);
        let jun_2021 = Recency::Ended(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap());
        assert_eq!(parse_end_date(Some("2021-06")), jun_2021);
        assert_eq!(parse_end_date(Some("06/2021")), jun_2021);
        assert_eq!(parse_end_date(Some("Jun 2021")), jun_2021);
        assert_eq!(parse_end_date(Some("June 2021")), jun_2021);
        assert_eq!(
            parse_end_date(Some("2019")),
            Recency::Ended(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap())
        );
        assert!(Recency::Ongoing > jun_2021 && jun_2021 > Recency::Unknown);
    }

    #[test]
    fn test_keep_recent_roles_preserves_order() {
        let mut resume = StructuredResume {
            experience: vec![
                role("Old", Some("2015"), 1),
                role("Current", Some("Present"), 1),
                role("Mystery", Some("n/a"), 1),
                role("Recent", Some("Mar 2022"), 1),
            ],
            ..Default::default()
        };
        let removed = keep_recent_roles(&mut resume, 2);
        let titles: Vec<&str> = resume.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Current", "Recent"]);
        assert_eq!(
            removed,
            vec!["Removed role: Old at Acme".to_string(), "Removed role: Mystery at Acme".to_string()]
        );
    }

    #[test]
    fn test_drop_projects_and_cap_skills() {
        let mut resume = long_resume();
        let removed = drop_projects(&mut resume);
        assert!(resume.projects.is_empty());
        assert_eq!(removed, vec!["Removed Projects section (1 project: scorer)".to_string()]);

        let removed = cap_skills(&mut resume, 8);
        assert_eq!(resume.skills[0].skills.len(), 8);
        assert_eq!(removed.len(), 1);
        assert!(removed[0].starts_with("Removed 4 skills from Languages"));
    }
}
