//! Axum route handler for the semantic scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::handlers::require_text;
use crate::errors::AppError;
use crate::semantic::{run_semantic_analysis, EmbeddingProvider, SemanticScore};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SemanticRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// Scores without the raw vectors, which are large and of no use to callers.
#[derive(Debug, Serialize)]
pub struct SemanticResponse {
    pub model: String,
    pub dimensions: usize,
    pub sections_embedded: Vec<String>,
    pub score: SemanticScore,
}

/// POST /api/v1/analysis/semantic
pub async fn handle_semantic(
    State(state): State<AppState>,
    Json(request): Json<SemanticRequest>,
) -> Result<Json<SemanticResponse>, AppError> {
    require_text("resume_text", &request.resume_text)?;
    require_text("job_description", &request.job_description)?;

    let analysis = run_semantic_analysis(
        state.embeddings.as_ref(),
        &request.resume_text,
        &request.job_description,
    )
    .await?;

    info!(
        overall = analysis.score.overall_score,
        sections = analysis.resume_embeddings.len(),
        "Semantic analysis complete"
    );

    Ok(Json(SemanticResponse {
        model: state.config.embedding_model.clone(),
        dimensions: state.embeddings.dimensions(),
        sections_embedded: analysis
            .resume_embeddings
            .into_iter()
            .map(|s| s.section)
            .collect(),
        score: analysis.score,
    }))
}
