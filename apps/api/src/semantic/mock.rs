//! Test embedders.
//!
//! `MockEmbedder` hashes each token into a bucket and L2-normalizes the counts, so
//! texts sharing vocabulary land close together. Deterministic within a process.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::embeddings::{prepare_input, EmbeddingError, EmbeddingProvider};
use crate::ats::keywords::tokenize;

pub struct MockEmbedder {
    pub dimensions: usize,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of provider round-trips made so far (a batch counts once).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0_f32; self.dimensions];
        for token in tokenize(text) {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            embedding[(hasher.finish() as usize) % self.dimensions] += 1.0;
        }
        let norm: f32 = embedding.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }
        embedding
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let input = prepare_input(text)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vectorize(input))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let inputs = texts
            .iter()
            .map(|t| prepare_input(t))
            .collect::<Result<Vec<_>, _>>()?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(inputs.into_iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Always fails with an API error, as an unavailable provider would.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::Api {
            status: 503,
            message: "provider unavailable".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::similarity::cosine_similarity;

    #[tokio::test]
    async fn test_mock_is_deterministic_and_normalized() {
        let embedder = MockEmbedder::new(64);
        let a = embedder.embed("rust backend services").await.unwrap();
        let b = embedder.embed("rust backend services").await.unwrap();
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_shared_vocabulary_is_closer() {
        let embedder = MockEmbedder::default();
        let jd = embedder.embed("python react postgresql docker aws").await.unwrap();
        let near = embedder.embed("python react docker aws developer").await.unwrap();
        let far = embedder.embed("risotto pastry sauces menu kitchen").await.unwrap();
        assert!(cosine_similarity(&jd, &near).unwrap() > cosine_similarity(&jd, &far).unwrap());
    }

    #[tokio::test]
    async fn test_batch_counts_one_call() {
        let embedder = MockEmbedder::new(16);
        let out = embedder
            .embed_batch(&["a b".to_string(), "c d".to_string()])
            .await
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(embedder.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_rejects_blank_input() {
        let embedder = MockEmbedder::new(16);
        assert!(matches!(embedder.embed("   ").await, Err(EmbeddingError::EmptyInput)));
    }
}
