//! Axum route handlers for the analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ats::{
    extract_keywords, match_keywords, run_ats_analysis, AtsOptions, AtsScore, MatchMode,
    MatchResult,
};
use crate::errors::AppError;
use crate::models::context::UserContext;
use crate::semantic::{run_semantic_analysis, SemanticScore};
use crate::state::AppState;
use crate::visa::{detect_visa_status, VisaSignalResult};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    /// May be empty: scoring degrades (no keywords, 100% match) rather than failing.
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub options: AtsOptions,
    #[serde(default)]
    pub user_context: Option<UserContext>,
}

#[derive(Debug, Deserialize)]
pub struct VisaRequest {
    pub resume_text: String,
    #[serde(default)]
    pub user_context: Option<UserContext>,
}

/// Combined ATS + HR report. The semantic half is optional: a provider failure is
/// reported in `semantic_error` and everything else is still returned.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub ats: AtsScore,
    /// Stemmed keyword view, as a lenient human reviewer would read the résumé.
    pub hr_keyword_match: MatchResult,
    pub semantic: Option<SemanticScore>,
    pub semantic_error: Option<String>,
    pub visa: VisaSignalResult,
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis/ats
///
/// Deterministic ATS score. CPU-bound, so it runs on the blocking pool.
pub async fn handle_ats(Json(request): Json<AnalysisRequest>) -> Result<Json<AtsScore>, AppError> {
    require_text("resume_text", &request.resume_text)?;

    let AnalysisRequest {
        resume_text,
        job_description,
        options,
        ..
    } = request;
    let score = tokio::task::spawn_blocking(move || {
        run_ats_analysis(&resume_text, &job_description, options)
    })
    .await?;

    info!(overall = score.overall, passed = score.passed, "ATS analysis complete");
    Ok(Json(score))
}

/// POST /api/v1/analysis/visa
pub async fn handle_visa(Json(request): Json<VisaRequest>) -> Result<Json<VisaSignalResult>, AppError> {
    require_text("resume_text", &request.resume_text)?;
    Ok(Json(detect_visa_status(
        &request.resume_text,
        request.user_context.as_ref(),
    )))
}

/// POST /api/v1/analysis
///
/// Runs the ATS and semantic pipelines concurrently against the same input.
/// Only the semantic half touches the network; its failure never hides the ATS result.
pub async fn handle_full_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    require_text("resume_text", &request.resume_text)?;

    let lexical = {
        let resume_text = request.resume_text.clone();
        let job_description = request.job_description.clone();
        let options = request.options;
        tokio::task::spawn_blocking(move || {
            let ats = run_ats_analysis(&resume_text, &job_description, options);
            let keywords = extract_keywords(&job_description);
            let hr = match_keywords(&resume_text, &keywords, MatchMode::Fuzzy);
            (ats, hr)
        })
    };
    let semantic = run_semantic_analysis(
        state.embeddings.as_ref(),
        &request.resume_text,
        &request.job_description,
    );

    let (lexical, semantic) = tokio::join!(lexical, semantic);
    let (ats, hr_keyword_match) = lexical?;

    let (semantic, semantic_error) = match semantic {
        Ok(analysis) => (Some(analysis.score), None),
        Err(e) => {
            warn!(error = %e, "Semantic analysis failed; returning ATS result only");
            (None, Some(e.to_string()))
        }
    };

    let visa = detect_visa_status(&request.resume_text, request.user_context.as_ref());

    info!(
        ats = ats.overall,
        semantic = semantic.as_ref().map(|s| s.overall_score),
        visa_flagged = visa.visa_flagged,
        "Combined analysis complete"
    );

    Ok(Json(AnalysisReport {
        ats,
        hr_keyword_match,
        semantic,
        semantic_error,
        visa,
    }))
}
