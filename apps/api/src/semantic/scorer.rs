//! Semantic Scorer — section-level embedding similarity against a job description.
//!
//! Algorithm:
//! 1. Split the résumé into named sections (shared heading library).
//! 2. Drop sections under `MIN_SECTION_CHARS`.
//! 3. Embed every surviving section plus the JD in one batch call.
//! 4. Score each section: cosine similarity rescaled to 0–100.
//! 5. Overall = Σ(weight × score) / Σ(weight), clamped to 0–100.
//!
//! Any embedding failure aborts the whole analysis. Scoring a failed section as
//! zero would silently corrupt the weighted average.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::ats::sections::{split_sections, ResumeSection, FULL_TEXT_SECTION};
use crate::semantic::embeddings::{EmbeddingError, EmbeddingProvider};
use crate::semantic::similarity::{cosine_similarity, similarity_to_score, SimilarityError};

/// Sections shorter than this (in characters, after trimming) are not embedded.
pub const MIN_SECTION_CHARS: usize = 20;

/// Per-section weight in the overall score. Unknown section names weigh 1.0,
/// so idiosyncratic headings still count.
const SECTION_WEIGHTS: &[(&str, f32)] = &[
    ("skills", 1.5),
    ("experience", 1.5),
    ("summary", 1.2),
    ("projects", 1.0),
    (FULL_TEXT_SECTION, 1.0),
    ("certifications", 0.8),
    ("education", 0.8),
    ("publications", 0.7),
    ("awards", 0.6),
    ("volunteer", 0.5),
    ("contact", 0.3),
    ("languages", 0.3),
    ("interests", 0.2),
];
const DEFAULT_SECTION_WEIGHT: f32 = 1.0;

pub fn section_weight(name: &str) -> f32 {
    SECTION_WEIGHTS
        .iter()
        .find(|(section, _)| *section == name)
        .map(|(_, weight)| *weight)
        .unwrap_or(DEFAULT_SECTION_WEIGHT)
}

#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("similarity failed: {0}")]
    Similarity(#[from] SimilarityError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEmbedding {
    pub section: String,
    pub embedding: Vec<f32>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionScore {
    pub section: String,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticScore {
    pub overall_score: f32,
    pub section_scores: Vec<SectionScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    pub resume_embeddings: Vec<SectionEmbedding>,
    pub jd_embedding: Vec<f32>,
    pub score: SemanticScore,
}

fn meaningful_sections(resume_text: &str) -> Vec<ResumeSection> {
    let sections = split_sections(resume_text);
    if sections.len() == 1 && sections[0].name == FULL_TEXT_SECTION {
        warn!("No section headings detected; scoring résumé as a single full-text section");
    }
    sections
        .into_iter()
        .filter(|s| s.content.trim().chars().count() >= MIN_SECTION_CHARS)
        .collect()
}

/// Weighted combination of per-section similarities.
pub fn compute_semantic_score(
    sections: &[SectionEmbedding],
    jd_embedding: &[f32],
) -> Result<SemanticScore, SimilarityError> {
    let mut section_scores = Vec::with_capacity(sections.len());
    let mut weighted_sum = 0.0_f32;
    let mut weight_total = 0.0_f32;

    for section in sections {
        let similarity = cosine_similarity(&section.embedding, jd_embedding)?;
        let score = similarity_to_score(similarity);
        let weight = section_weight(&section.section);
        weighted_sum += score * weight;
        weight_total += weight;
        section_scores.push(SectionScore {
            section: section.section.clone(),
            score,
        });
    }

    let overall_score = if weight_total > 0.0 {
        (weighted_sum / weight_total).clamp(0.0, 100.0)
    } else {
        0.0
    };

    Ok(SemanticScore {
        overall_score,
        section_scores,
    })
}

/// Embeds résumé sections and the job description and scores their similarity.
///
/// A résumé with no section of at least `MIN_SECTION_CHARS` characters, or a blank
/// job description, fails with `EmbeddingError::EmptyInput`.
pub async fn run_semantic_analysis(
    provider: &dyn EmbeddingProvider,
    resume_text: &str,
    job_description: &str,
) -> Result<SemanticAnalysis, SemanticError> {
    if job_description.trim().is_empty() {
        return Err(EmbeddingError::EmptyInput.into());
    }
    let sections = meaningful_sections(resume_text);
    if sections.is_empty() {
        return Err(EmbeddingError::EmptyInput.into());
    }

    let mut inputs: Vec<String> = sections.iter().map(|s| s.content.clone()).collect();
    inputs.push(job_description.to_string());

    let mut vectors = provider.embed_batch(&inputs).await?;
    if vectors.len() != inputs.len() {
        return Err(EmbeddingError::MissingEmbeddings {
            expected: inputs.len(),
            actual: vectors.len(),
        }
        .into());
    }
    let jd_embedding = vectors.pop().unwrap_or_default();

    let resume_embeddings: Vec<SectionEmbedding> = sections
        .into_iter()
        .zip(vectors)
        .map(|(section, embedding)| SectionEmbedding {
            section: section.name,
            embedding,
            content: section.content,
        })
        .collect();

    let score = compute_semantic_score(&resume_embeddings, &jd_embedding)?;
    debug!(
        sections = resume_embeddings.len(),
        overall = score.overall_score,
        "Semantic analysis complete"
    );

    Ok(SemanticAnalysis {
        resume_embeddings,
        jd_embedding,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::mock::{FailingEmbedder, MockEmbedder};

    const RESUME: &str = "Dana Kim
dana.kim@example.com

Summary
Backend engineer focused on Python services and PostgreSQL data models.

Experience
Built Python APIs with Docker on AWS, owned PostgreSQL migrations and React admin tools.

Education
BSc Math, 2016

Skills
Python, PostgreSQL, Docker, AWS, React, Redis
";

    const JD: &str = "Python engineer to build APIs with PostgreSQL, Docker, AWS and React.";

    fn embedding(section: &str, v: Vec<f32>) -> SectionEmbedding {
        SectionEmbedding {
            section: section.to_string(),
            embedding: v,
            content: String::new(),
        }
    }

    #[test]
    fn test_section_weights() {
        assert!(section_weight("skills") > section_weight("education"));
        assert!(section_weight("experience") > section_weight("education"));
        assert_eq!(section_weight("my side quests"), 1.0);
    }

    #[test]
    fn test_weighted_average() {
        let jd = vec![1.0, 0.0];
        let sections = vec![
            embedding("skills", vec![1.0, 0.0]),    // 100, weight 1.5
            embedding("education", vec![-1.0, 0.0]), // 0, weight 0.8
        ];
        let score = compute_semantic_score(&sections, &jd).unwrap();
        let expected = 100.0 * 1.5 / (1.5 + 0.8);
        assert!((score.overall_score - expected).abs() < 1e-3);
        assert_eq!(score.section_scores.len(), 2);
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let sections = vec![embedding("skills", vec![1.0, 0.0, 0.0])];
        let err = compute_semantic_score(&sections, &[1.0, 0.0]).unwrap_err();
        assert_eq!(err, SimilarityError::LengthMismatch { left: 3, right: 2 });
    }

    #[tokio::test]
    async fn test_short_sections_are_dropped() {
        let provider = MockEmbedder::default();
        let analysis = run_semantic_analysis(&provider, RESUME, JD).await.unwrap();
        let names: Vec<&str> = analysis
            .resume_embeddings
            .iter()
            .map(|e| e.section.as_str())
            .collect();
        // contact ("Dana Kim\ndana.kim@example.com") is long enough; education is not.
        assert!(!names.contains(&"education"));
        assert!(names.contains(&"skills"));
        assert!(names.contains(&"experience"));
        assert_eq!(analysis.jd_embedding.len(), provider.dimensions);
        assert_eq!(provider.calls(), 1, "sections and JD go in one batch");
    }

    #[tokio::test]
    async fn test_overall_in_range_and_relevant_beats_irrelevant() {
        let provider = MockEmbedder::default();
        let relevant = run_semantic_analysis(&provider, RESUME, JD).await.unwrap();
        let chef = "Experience\nExecutive chef running a forty seat trattoria kitchen, seasonal menus, pastry.";
        let irrelevant = run_semantic_analysis(&provider, chef, JD).await.unwrap();
        for s in [&relevant.score, &irrelevant.score] {
            assert!((0.0..=100.0).contains(&s.overall_score));
        }
        assert!(relevant.score.overall_score > irrelevant.score.overall_score);
    }

    #[tokio::test]
    async fn test_no_headings_uses_full_text() {
        let provider = MockEmbedder::default();
        let analysis = run_semantic_analysis(
            &provider,
            "Python developer with years of Docker and AWS work.",
            JD,
        )
        .await
        .unwrap();
        assert_eq!(analysis.resume_embeddings.len(), 1);
        assert_eq!(analysis.resume_embeddings[0].section, FULL_TEXT_SECTION);
    }

    #[tokio::test]
    async fn test_blank_job_description_is_input_error() {
        let provider = MockEmbedder::default();
        let err = run_semantic_analysis(&provider, RESUME, "   ").await.unwrap_err();
        assert!(matches!(err, SemanticError::Embedding(EmbeddingError::EmptyInput)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_meaningful_sections_is_input_error() {
        let provider = MockEmbedder::default();
        let err = run_semantic_analysis(&provider, "Skills\nGo", JD).await.unwrap_err();
        assert!(matches!(err, SemanticError::Embedding(EmbeddingError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_provider_failure_aborts() {
        let err = run_semantic_analysis(&FailingEmbedder, RESUME, JD).await.unwrap_err();
        assert!(matches!(
            err,
            SemanticError::Embedding(EmbeddingError::Api { status: 503, .. })
        ));
    }
}
