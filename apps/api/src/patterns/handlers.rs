//! Axum route handlers for the pattern extraction API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::ats::handlers::require_text;
use crate::ats::{extract_keywords, Keyword};
use crate::errors::AppError;
use crate::patterns::{
    compare_patterns, extract_content_patterns, extract_formatting_patterns, ContentPatterns,
    FormattingPatterns, PatternComparison,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FormattingPatternsRequest {
    pub text: String,
    #[serde(default)]
    pub page_count: Option<u32>,
}

/// JD keywords can be passed directly or extracted from a job description.
/// Explicit keywords win when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct JdSource {
    #[serde(default)]
    pub jd_keywords: Option<Vec<Keyword>>,
    #[serde(default)]
    pub job_description: Option<String>,
}

impl JdSource {
    fn keywords(self) -> Option<Vec<Keyword>> {
        self.jd_keywords.or_else(|| {
            self.job_description
                .filter(|jd| !jd.trim().is_empty())
                .map(|jd| extract_keywords(&jd))
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ContentPatternsRequest {
    pub text: String,
    #[serde(flatten)]
    pub jd: JdSource,
}

#[derive(Debug, Deserialize)]
pub struct ComparePatternsRequest {
    pub user_text: String,
    pub reference_text: String,
    #[serde(flatten)]
    pub jd: JdSource,
}

#[derive(Debug, Serialize)]
pub struct ComparePatternsResponse {
    pub user: ContentPatterns,
    pub reference: ContentPatterns,
    pub comparisons: Vec<PatternComparison>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/patterns/formatting
pub async fn handle_formatting_patterns(
    Json(request): Json<FormattingPatternsRequest>,
) -> Result<Json<FormattingPatterns>, AppError> {
    require_text("text", &request.text)?;
    Ok(Json(extract_formatting_patterns(
        &request.text,
        request.page_count,
    )))
}

/// POST /api/v1/patterns/content
pub async fn handle_content_patterns(
    Json(request): Json<ContentPatternsRequest>,
) -> Result<Json<ContentPatterns>, AppError> {
    require_text("text", &request.text)?;
    let keywords = request.jd.keywords();
    Ok(Json(extract_content_patterns(
        &request.text,
        keywords.as_deref(),
    )))
}

/// POST /api/v1/patterns/compare
///
/// Extracts content patterns from both texts and returns the metrics where the
/// user's résumé trails the reference, each with a coaching insight.
pub async fn handle_compare_patterns(
    Json(request): Json<ComparePatternsRequest>,
) -> Result<Json<ComparePatternsResponse>, AppError> {
    require_text("user_text", &request.user_text)?;
    require_text("reference_text", &request.reference_text)?;

    let keywords = request.jd.keywords();
    let user = extract_content_patterns(&request.user_text, keywords.as_deref());
    let reference = extract_content_patterns(&request.reference_text, keywords.as_deref());
    let comparisons = compare_patterns(&user, &reference);

    Ok(Json(ComparePatternsResponse {
        user,
        reference,
        comparisons,
    }))
}
