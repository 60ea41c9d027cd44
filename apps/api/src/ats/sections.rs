//! Section Validator — heading-pattern library and standard-section detection.
//!
//! The heading library is shared: the semantic scorer uses `split_sections` to
//! cut a résumé into named chunks, and pattern extraction uses it for section order.

use serde::{Deserialize, Serialize};

use crate::ats::formatting::{EMAIL_RE, PHONE_RE};
use crate::patterns::formatting::parse_bullet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Awards,
    Publications,
    Volunteer,
    Languages,
    Interests,
}

impl SectionKind {
    /// Stable lowercase label, used as the section name in semantic scoring.
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Awards => "awards",
            SectionKind::Publications => "publications",
            SectionKind::Volunteer => "volunteer",
            SectionKind::Languages => "languages",
            SectionKind::Interests => "interests",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SectionKind::Contact => "Contact",
            SectionKind::Summary => "Summary",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
            SectionKind::Certifications => "Certifications",
            SectionKind::Awards => "Awards",
            SectionKind::Publications => "Publications",
            SectionKind::Volunteer => "Volunteer",
            SectionKind::Languages => "Languages",
            SectionKind::Interests => "Interests",
        }
    }
}

/// Heading synonyms, evaluated in order; first match wins. A heading matches a
/// synonym when the normalized line equals it. Lines written as headings (ALL
/// CAPS or colon-terminated) may also start with it followed by a space
/// ("SKILLS & TOOLS", "Experience (selected):").
const HEADING_PATTERNS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Contact,
        &[
            "contact",
            "contact information",
            "contact info",
            "contact details",
            "personal information",
            "personal details",
        ],
    ),
    (
        SectionKind::Summary,
        &[
            "summary",
            "professional summary",
            "career summary",
            "executive summary",
            "profile",
            "professional profile",
            "about me",
            "about",
            "objective",
            "career objective",
            "overview",
        ],
    ),
    (
        SectionKind::Volunteer,
        &["volunteer", "volunteering", "volunteer experience", "community involvement"],
    ),
    (
        SectionKind::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "relevant experience",
            "employment",
            "employment history",
            "work history",
            "career history",
            "professional background",
        ],
    ),
    (
        SectionKind::Education,
        &[
            "education",
            "academic background",
            "education and training",
            "academics",
            "academic qualifications",
        ],
    ),
    (
        SectionKind::Skills,
        &[
            "skills",
            "technical skills",
            "key skills",
            "core competencies",
            "competencies",
            "expertise",
            "areas of expertise",
            "technologies",
            "tech stack",
            "tools",
        ],
    ),
    (
        SectionKind::Projects,
        &["projects", "personal projects", "key projects", "side projects", "selected projects"],
    ),
    (
        SectionKind::Certifications,
        &[
            "certifications",
            "certificates",
            "licenses",
            "licenses and certifications",
            "licenses & certifications",
        ],
    ),
    (
        SectionKind::Awards,
        &["awards", "honors", "honors and awards", "achievements", "accomplishments"],
    ),
    (SectionKind::Publications, &["publications", "papers", "research"]),
    (SectionKind::Languages, &["languages"]),
    (SectionKind::Interests, &["interests", "hobbies", "hobbies and interests"]),
];

/// Sections every résumé is checked for, in report order.
pub const STANDARD_SECTIONS: [SectionKind; 5] = [
    SectionKind::Contact,
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
];

/// Lines scanned for the "contact info without a heading" heuristic.
const CONTACT_SCAN_LINES: usize = 8;
const MAX_HEADING_CHARS: usize = 40;
const MAX_HEADING_WORDS: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Heading detection
// ────────────────────────────────────────────────────────────────────────────

fn normalize_heading(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(['#', '*', '-', '•', '=', '_'])
        .trim_end_matches(['*', '=', '_'])
        .trim()
        .trim_end_matches(':')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_all_caps(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

fn match_heading(normalized: &str, allow_prefix: bool) -> Option<SectionKind> {
    if normalized.is_empty()
        || normalized.chars().count() > MAX_HEADING_CHARS
        || normalized.split_whitespace().count() > MAX_HEADING_WORDS
    {
        return None;
    }
    HEADING_PATTERNS
        .iter()
        .find(|(_, synonyms)| {
            synonyms.iter().any(|syn| {
                normalized == *syn
                    || (allow_prefix
                        && normalized
                            .strip_prefix(syn)
                            .is_some_and(|rest| rest.starts_with(' ')))
            })
        })
        .map(|(kind, _)| *kind)
}

/// Recognizes a heading line. Supports inline headings ("Skills: Rust, Go"), in
/// which case the text after the colon is returned as the remainder. Bullet
/// lines are never headings.
pub fn parse_heading_line(line: &str) -> Option<(SectionKind, &str)> {
    let trimmed = line.trim();
    if parse_bullet(trimmed).is_some() {
        return None;
    }
    let heading_like = trimmed.ends_with(':') || is_all_caps(trimmed);
    if let Some(kind) = match_heading(&normalize_heading(trimmed), heading_like) {
        return Some((kind, ""));
    }
    let (head, rest) = trimmed.split_once(':')?;
    let kind = match_heading(&normalize_heading(head), true)?;
    Some((kind, rest.trim()))
}

fn has_contact_block(resume_text: &str) -> bool {
    resume_text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(CONTACT_SCAN_LINES)
        .any(|l| EMAIL_RE.is_match(l) || PHONE_RE.is_match(l))
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCheck {
    pub name: String,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    /// round(100 × found / total)
    pub score: u32,
    pub sections: Vec<SectionCheck>,
}

impl SectionResult {
    pub fn missing(&self) -> impl Iterator<Item = &SectionCheck> {
        self.sections.iter().filter(|s| !s.found)
    }
}

/// Checks the résumé for each of the standard sections. Always reports all five.
pub fn validate_sections(resume_text: &str) -> SectionResult {
    let detected: Vec<SectionKind> = resume_text
        .lines()
        .filter_map(parse_heading_line)
        .map(|(kind, _)| kind)
        .collect();

    let sections: Vec<SectionCheck> = STANDARD_SECTIONS
        .iter()
        .map(|&kind| {
            let found = detected.contains(&kind)
                || (kind == SectionKind::Contact && has_contact_block(resume_text));
            SectionCheck {
                name: kind.display_name().to_string(),
                found,
            }
        })
        .collect();

    let found = sections.iter().filter(|s| s.found).count();
    let score = ((found as f64 / sections.len() as f64) * 100.0).round() as u32;

    SectionResult { score, sections }
}

// ────────────────────────────────────────────────────────────────────────────
// Splitting
// ────────────────────────────────────────────────────────────────────────────

/// Name given to the whole text when no headings are detected.
pub const FULL_TEXT_SECTION: &str = "full_text";

/// A named chunk of résumé text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSection {
    pub name: String,
    pub content: String,
}

fn push_section(name: &str, buffer: &mut Vec<&str>, sections: &mut Vec<ResumeSection>) {
    let content = buffer.join("\n").trim().to_string();
    buffer.clear();
    if content.is_empty() {
        return;
    }
    match sections.iter_mut().find(|s| s.name == name) {
        Some(existing) => {
            existing.content.push('\n');
            existing.content.push_str(&content);
        }
        None => sections.push(ResumeSection {
            name: name.to_string(),
            content,
        }),
    }
}

/// Splits résumé text into sections at detected headings.
///
/// Text before the first heading becomes a `contact` section (name, email, links).
/// Repeated headings of the same kind are merged. If no heading is found at all,
/// the whole text is returned as a single `full_text` section.
pub fn split_sections(resume_text: &str) -> Vec<ResumeSection> {
    let mut sections: Vec<ResumeSection> = Vec::new();
    let mut current = SectionKind::Contact.label().to_string();
    let mut buffer: Vec<&str> = Vec::new();
    let mut saw_heading = false;

    for line in resume_text.lines() {
        match parse_heading_line(line) {
            Some((kind, remainder)) => {
                push_section(&current, &mut buffer, &mut sections);
                saw_heading = true;
                current = kind.label().to_string();
                if !remainder.is_empty() {
                    buffer.push(remainder);
                }
            }
            None => buffer.push(line),
        }
    }
    push_section(&current, &mut buffer, &mut sections);

    if !saw_heading {
        let content = resume_text.trim();
        if content.is_empty() {
            return Vec::new();
        }
        return vec![ResumeSection {
            name: FULL_TEXT_SECTION.to_string(),
            content: content.to_string(),
        }];
    }

    sections
}

/// Section kinds in the order their headings first appear.
pub fn section_order(resume_text: &str) -> Vec<SectionKind> {
    let mut order = Vec::new();
    for (kind, _) in resume_text.lines().filter_map(parse_heading_line) {
        if !order.contains(&kind) {
            order.push(kind);
        }
    }
    order
}
