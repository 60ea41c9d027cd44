//! Axum route handler for the one-page fitter.

use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::layout::metrics::DEFAULT_TEMPLATE_ID;
use crate::layout::{fit_to_one_page, FitResult};
use crate::models::resume::StructuredResume;

fn default_template_id() -> String {
    DEFAULT_TEMPLATE_ID.to_string()
}

#[derive(Debug, Deserialize)]
pub struct FitRequest {
    pub resume: StructuredResume,
    #[serde(default = "default_template_id")]
    pub template_id: String,
}

/// POST /api/v1/layout/fit
///
/// Height estimation is CPU-bound — runs inside spawn_blocking.
pub async fn handle_fit(Json(request): Json<FitRequest>) -> Result<Json<FitResult>, AppError> {
    let resume = request.resume;
    if resume.experience.is_empty() && resume.summary.is_none() && resume.skills.is_empty() {
        return Err(AppError::Validation(
            "resume must contain a summary, experience or skills".to_string(),
        ));
    }

    let template_id = request.template_id;
    let result = tokio::task::spawn_blocking(move || fit_to_one_page(resume, &template_id)).await?;

    info!(
        fits = result.fits,
        steps = result.steps_applied.len(),
        confidence = result.fit_confidence,
        "One-page fit complete"
    );
    Ok(Json(result))
}
