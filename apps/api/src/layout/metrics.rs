//! Template metrics and page-height estimation for structured résumés.
//!
//! Heights are counted in text lines. Each template fixes an average number of
//! characters per line and a page budget; text is word-wrapped greedily against
//! that width. This is an approximation of the rendered PDF, good enough to
//! decide whether trimming is needed but not to place glyphs.

use serde::{Deserialize, Serialize};

use crate::models::resume::StructuredResume;

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    pub id: &'static str,
    /// Average characters that fit on one body line.
    pub chars_per_line: u32,
    /// Line slots on a single page, header and spacing included.
    pub page_budget_lines: u32,
    /// Blank space after each section, in lines.
    pub section_spacing_lines: f32,
}

pub const DEFAULT_TEMPLATE_ID: &str = "classic";

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "classic",
        chars_per_line: 90,
        page_budget_lines: 50,
        section_spacing_lines: 1.0,
    },
    Template {
        id: "modern",
        chars_per_line: 85,
        page_budget_lines: 48,
        section_spacing_lines: 1.0,
    },
    Template {
        id: "compact",
        chars_per_line: 100,
        page_budget_lines: 56,
        section_spacing_lines: 0.5,
    },
    Template {
        id: "executive",
        chars_per_line: 80,
        page_budget_lines: 46,
        section_spacing_lines: 1.5,
    },
];

pub fn find_template(id: &str) -> Option<&'static Template> {
    let id = id.trim();
    TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

pub fn default_template() -> &'static Template {
    &TEMPLATES[0]
}

// ────────────────────────────────────────────────────────────────────────────
// Layout style
// ────────────────────────────────────────────────────────────────────────────

/// Extra characters per line gained by the compact style's tighter font.
const COMPACT_WIDTH_FACTOR: f32 = 1.12;
const COMPACT_LINE_SCALE: f32 = 0.9;
/// Bullet indent, in characters.
const BULLET_INDENT: u32 = 2;

/// The concrete style a résumé is estimated (and rendered) with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutStyle {
    pub template: String,
    pub chars_per_line: u32,
    /// Multiplier on body line height; below 1.0 packs lines tighter.
    pub line_scale: f32,
    pub section_spacing_lines: f32,
    pub compact: bool,
}

impl LayoutStyle {
    pub fn for_template(template: &Template) -> Self {
        Self {
            template: template.id.to_string(),
            chars_per_line: template.chars_per_line,
            line_scale: 1.0,
            section_spacing_lines: template.section_spacing_lines,
            compact: false,
        }
    }

    /// Compact rendition of this style. Applying it twice changes nothing.
    pub fn tightened(&self) -> Self {
        if self.compact {
            return self.clone();
        }
        Self {
            template: self.template.clone(),
            chars_per_line: (self.chars_per_line as f32 * COMPACT_WIDTH_FACTOR).round() as u32,
            line_scale: COMPACT_LINE_SCALE,
            section_spacing_lines: self.section_spacing_lines / 2.0,
            compact: true,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Estimation
// ────────────────────────────────────────────────────────────────────────────

/// Lines `text` occupies when greedily word-wrapped at `width` characters.
pub fn wrapped_lines(text: &str, width: u32) -> u32 {
    let width = width.max(1) as usize;
    let mut lines = 0u32;
    let mut current = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current == 0 {
            lines += 1;
            current = len;
        } else if current + 1 + len > width {
            lines += 1;
            current = len;
        } else {
            current += 1 + len;
        }
    }
    lines
}

fn join_present<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn bullet_lines(items: &[String], width: u32) -> u32 {
    items.iter().map(|b| wrapped_lines(b, width)).sum()
}

/// Estimated height of `resume` in line slots under `style`.
pub fn estimate_height(resume: &StructuredResume, style: &LayoutStyle) -> f32 {
    let width = style.chars_per_line;
    let bullet_width = width.saturating_sub(BULLET_INDENT);

    let mut body = 0u32;
    let mut sections = 0u32;

    let contact = &resume.contact;
    if !contact.name.trim().is_empty() {
        body += 1;
    }
    let contact_line = join_present(
        [contact.email.as_deref(), contact.phone.as_deref(), contact.location.as_deref()]
            .into_iter()
            .chain(contact.links.iter().map(|l| Some(l.as_str()))),
    );
    body += wrapped_lines(&contact_line, width);

    if let Some(summary) = resume.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        sections += 1;
        body += 1 + wrapped_lines(summary, width);
    }

    if !resume.experience.is_empty() {
        sections += 1;
        body += 1;
        for entry in &resume.experience {
            body += 1 + bullet_lines(&entry.bullets, bullet_width);
        }
    }

    if !resume.education.is_empty() {
        sections += 1;
        body += 1;
        for entry in &resume.education {
            body += 1 + bullet_lines(&entry.details, bullet_width);
        }
    }

    let skill_lines: Vec<String> = resume
        .skills
        .iter()
        .filter(|c| !c.skills.is_empty())
        .map(|c| format!("{}: {}", c.name, c.skills.join(", ")))
        .collect();
    if !skill_lines.is_empty() {
        sections += 1;
        body += 1 + skill_lines.iter().map(|l| wrapped_lines(l, width)).sum::<u32>();
    }

    if !resume.projects.is_empty() {
        sections += 1;
        body += 1;
        for project in &resume.projects {
            let description = project.description.as_deref().unwrap_or_default();
            body += 1 + wrapped_lines(description, width) + bullet_lines(&project.bullets, bullet_width);
        }
    }

    if !resume.certifications.is_empty() {
        sections += 1;
        body += 1 + bullet_lines(&resume.certifications, bullet_width);
    }

    body as f32 * style.line_scale + sections as f32 * style.section_spacing_lines
}
