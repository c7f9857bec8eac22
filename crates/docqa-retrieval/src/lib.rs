//! DocQA Retrieval - Ingest, ranking and answer pipelines
//!
//! This crate implements the retrieval use cases, orchestrating the chunker,
//! the embedding and generation providers and the document/chunk stores.

pub mod answer;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod ranking;

pub use answer::{AnswerGenerator, FALLBACK_ANSWER};
pub use ingest::IngestPipeline;
pub use models::{IngestOutcome, QueryPlan, QueryResult, SourceReference};
pub use pipeline::RetrievalPipeline;
pub use prompt::build_prompt;
pub use ranking::{cosine_similarity, rank_chunks, DEFAULT_TOP_K};
