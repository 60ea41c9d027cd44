// Semantic (HR-side) scoring: section embeddings compared against the job
// description. The only module that crosses a process boundary, through
// `EmbeddingProvider`.

pub mod embeddings;
pub mod handlers;
#[cfg(test)]
pub mod mock;
pub mod scorer;
pub mod similarity;

pub use embeddings::{EmbeddingError, EmbeddingProvider, OpenAiEmbeddings};
pub use scorer::{run_semantic_analysis, SemanticAnalysis, SemanticError, SemanticScore};
