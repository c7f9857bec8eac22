//! Cosine similarity ranking over stored chunk embeddings

use docqa_core::models::Chunk;

use crate::models::SourceReference;

/// Number of passages kept when no explicit K is given
pub const DEFAULT_TOP_K: usize = 5;

/// Cosine similarity of two vectors.
///
/// Returns 0 instead of failing when the dimensions differ, when either
/// vector is empty, or when either has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        if a.len() != b.len() {
            tracing::warn!(left = a.len(), right = b.len(), "Embedding dimensions don't match");
        }
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold((0.0f32, 0.0f32, 0.0f32), |acc, (x, y)| {
        (acc.0 + x * y, acc.1 + x * x, acc.2 + y * y)
    });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Rank chunks by similarity to `query` and keep the best `k`.
///
/// Non-finite scores are discarded. Ties keep the order of `chunks`.
pub fn rank_chunks(query: &[f32], chunks: &[Chunk], k: usize) -> Vec<SourceReference> {
    let mut scored: Vec<SourceReference> = chunks
        .iter()
        .filter_map(|chunk| {
            let score = cosine_similarity(query, &chunk.embedding);
            score.is_finite().then(|| SourceReference {
                chunk_id: chunk.id,
                document_id: chunk.document_id,
                index: chunk.index,
                excerpt: chunk.text.clone(),
                score,
            })
        })
        .collect();

    // Vec::sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k);
    scored
}
